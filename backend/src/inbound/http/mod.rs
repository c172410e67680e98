//! HTTP inbound adapter exposing the coffee resource and health probes.

pub mod coffees;
pub mod error;
pub mod health;
pub mod multipart;
pub mod state;

pub use error::ApiResult;

//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: coffee repositories (PostgreSQL via Diesel, in-memory)
//! - **storage**: S3 image uploads

pub mod persistence;
pub mod storage;

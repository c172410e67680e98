//! Dashboard for the coffee catalogue.
//!
//! - [`client`]: the [`CoffeeApi`] port and its `reqwest` implementation
//! - [`cache`]: the [`QueryCache`] shared through [`DashboardContext`]
//! - [`list_view`] and [`detail_view`]: headless view models
//! - [`render`]: plain-text rendering used by the `coffee-dashboard` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use coffee_dashboard::{CoffeeListView, DashboardContext, DEFAULT_TIMEOUT, HttpCoffeeClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpCoffeeClient::new("http://localhost:8080/api", DEFAULT_TIMEOUT)?;
//! let mut list = CoffeeListView::new(DashboardContext::new(Arc::new(client)));
//! list.load().await;
//! println!("{} coffees", list.stats().total);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod context;
pub mod detail_view;
pub mod list_view;
pub mod model;
pub mod render;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use cache::{QueryCache, QueryKey};
pub use client::{ClientError, CoffeeApi, DEFAULT_TIMEOUT, HttpCoffeeClient};
pub use context::DashboardContext;
pub use detail_view::{CoffeeDetailView, DetailMode, DetailState, EditForm, EditOutcome};
pub use list_view::{
    AddDialog, AddForm, CoffeeListView, DeleteDialog, ListState, PLACEHOLDER_IMAGE,
};
pub use model::{Coffee, CoffeeUpdate, ImageFile, NewCoffee, NewCoffeeUpload};
pub use stats::CatalogueStats;

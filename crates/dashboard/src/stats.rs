//! Summary figures shown above the coffee list.

use crate::model::Coffee;

/// Count and mean price of a coffee list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogueStats {
    /// Number of coffees.
    pub total: usize,
    /// Mean price; `None` for an empty list.
    pub average_price: Option<f64>,
}

impl CatalogueStats {
    /// Compute the figures for `coffees`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean price of a small list"
    )]
    pub fn from_coffees(coffees: &[Coffee]) -> Self {
        let total = coffees.len();
        let average_price = (total > 0)
            .then(|| coffees.iter().map(|c| c.price).sum::<f64>() / total as f64);
        Self {
            total,
            average_price,
        }
    }
}

/// Format a price as dollars with two decimals.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Format an optional average, using `n/a` for an empty catalogue.
#[must_use]
pub fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "n/a".to_owned(), format_price)
}

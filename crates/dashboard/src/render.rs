//! Plain-text rendering of the view models.

use std::fmt::{self, Write};

use crate::detail_view::{CoffeeDetailView, DetailMode, DetailState};
use crate::list_view::{AddDialog, CoffeeListView, DeleteDialog, ListState};
use crate::stats::{format_average, format_price};

/// Render the list page: summary, table, and any open dialog.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_list(view: &CoffeeListView, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Coffee Dashboard")?;
    if matches!(view.state(), ListState::Loading) {
        return writeln!(out, "Loading...");
    }

    let stats = view.stats();
    writeln!(out, "Total Coffees: {}", stats.total)?;
    writeln!(out, "Average Price: {}", format_average(stats.average_price))?;
    writeln!(out)?;
    writeln!(out, "{:>4}  {:<20} {:>8}  {}", "ID", "Name", "Price", "Description")?;
    for coffee in view.coffees() {
        writeln!(
            out,
            "{:>4}  {:<20} {:>8}  {}",
            coffee.id,
            coffee.name,
            format_price(coffee.price),
            coffee.description.as_deref().unwrap_or("")
        )?;
    }

    if let AddDialog::Open(form) = view.add_dialog() {
        writeln!(out)?;
        writeln!(out, "Add Coffee")?;
        writeln!(out, "  name: {}", form.name)?;
        writeln!(out, "  description: {}", form.description)?;
        writeln!(out, "  price: {}", form.price)?;
        writeln!(out, "  image: {}", form.image)?;
    }
    if let DeleteDialog::Open { target } = view.delete_dialog() {
        writeln!(out)?;
        writeln!(out, "Confirm Deletion")?;
        writeln!(out, "Are you sure you want to delete coffee {target}?")?;
    }
    Ok(())
}

/// Render the detail page in its current mode.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_detail(view: &CoffeeDetailView, out: &mut impl Write) -> fmt::Result {
    let coffee = match view.state() {
        DetailState::Loading => return writeln!(out, "Loading..."),
        DetailState::NotFound => return writeln!(out, "Coffee not found"),
        DetailState::Loaded(coffee) => coffee,
    };

    match view.mode() {
        DetailMode::Viewing => {
            writeln!(out, "{}", coffee.name)?;
            writeln!(out, "Image: {}", coffee.image)?;
            if let Some(description) = &coffee.description {
                writeln!(out, "{description}")?;
            }
            writeln!(out, "Price: {}", format_price(coffee.price))
        }
        DetailMode::Editing => {
            let form = view.form();
            writeln!(out, "Edit Coffee")?;
            writeln!(out, "  name: {}", form.name)?;
            writeln!(out, "  description: {}", form.description)?;
            writeln!(out, "  price: {}", form.price)?;
            writeln!(out, "  image: {}", form.image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DashboardContext;
    use crate::test_support::{StubApi, coffee};
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[tokio::test]
    async fn list_shows_summary_and_rows() {
        let api = Arc::new(StubApi::with_coffees(vec![coffee(1, "Espresso", 1.5)]));
        let mut view = CoffeeListView::new(DashboardContext::new(api));
        view.load().await;
        view.request_delete(1);

        let mut text = String::new();
        render_list(&view, &mut text).expect("render");

        assert!(text.contains("Total Coffees: 1"));
        assert!(text.contains("Average Price: $1.50"));
        assert!(text.contains("Espresso"));
        assert!(text.contains("delete coffee 1?"));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_list_renders_empty_with_na_average() {
        let mut view = CoffeeListView::new(DashboardContext::new(Arc::new(StubApi::failing())));
        view.load().await;

        let mut text = String::new();
        render_list(&view, &mut text).expect("render");

        assert!(text.contains("Total Coffees: 0"));
        assert!(text.contains("Average Price: n/a"));
    }

    #[rstest]
    #[case(false, "Price: $2.80")]
    #[case(true, "Edit Coffee")]
    #[tokio::test]
    async fn detail_renders_its_mode(#[case] edit: bool, #[case] expected: &str) {
        let api = Arc::new(StubApi::with_coffees(vec![coffee(3, "Cappuccino", 2.8)]));
        let mut view = CoffeeDetailView::new(DashboardContext::new(api), 3, edit);
        view.load().await;

        let mut text = String::new();
        render_detail(&view, &mut text).expect("render");

        assert!(text.contains(expected), "{text}");
    }
}

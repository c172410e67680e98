//! Internal Diesel row structs for the `coffees` table.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types and report rows that fail validation as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Coffee, CoffeeId, CoffeeName, CoffeeValidationError, ImageRef, Price};

use super::schema::coffees;

/// Row struct for reading from the coffees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coffees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CoffeeRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CoffeeRow> for Coffee {
    type Error = CoffeeValidationError;

    fn try_from(row: CoffeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CoffeeId::new(row.id),
            name: CoffeeName::new(row.name)?,
            description: row.description,
            price: Price::new(row.price)?,
            image: ImageRef::new(row.image)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for new coffee rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coffees)]
pub(crate) struct NewCoffeeRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub image: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = coffees)]
pub(crate) struct CoffeeChangeset<'a> {
    pub name: Option<&'a str>,
    pub price: Option<f64>,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

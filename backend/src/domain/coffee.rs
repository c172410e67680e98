//! Coffee catalogue entity and its validated building blocks.
//!
//! A [`Coffee`] is the only aggregate in the catalogue. Identifiers are
//! assigned by the store and never change; names are unique across the
//! catalogue (enforced by the store, surfaced as a repository error).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation errors raised by the coffee value constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoffeeValidationError {
    /// The identifier is not a number.
    #[error("coffee id must be an integer")]
    InvalidId,
    /// The name is empty once trimmed.
    #[error("coffee name must not be empty")]
    EmptyName,
    /// The price is not a finite number.
    #[error("coffee price must be a finite number")]
    NonFinitePrice,
    /// The price text could not be parsed.
    #[error("coffee price must be numeric")]
    UnparsablePrice,
    /// The image reference is empty once trimmed.
    #[error("coffee image must not be empty")]
    EmptyImage,
}

/// Store-assigned surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoffeeId(i32);

impl CoffeeId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for CoffeeId {
    type Err = CoffeeValidationError;

    /// Parse a path segment such as `"42"`.
    ///
    /// # Examples
    /// ```
    /// use coffee_backend::domain::CoffeeId;
    ///
    /// let id: CoffeeId = "42".parse().expect("numeric id");
    /// assert_eq!(id.get(), 42);
    /// assert!("latte".parse::<CoffeeId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| CoffeeValidationError::InvalidId)
    }
}

impl fmt::Display for CoffeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank display name, unique within the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoffeeName(String);

impl CoffeeName {
    /// Validate and wrap a name.
    ///
    /// # Examples
    /// ```
    /// use coffee_backend::domain::CoffeeName;
    ///
    /// assert!(CoffeeName::new("Flat White").is_ok());
    /// assert!(CoffeeName::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, CoffeeValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoffeeValidationError::EmptyName);
        }
        Ok(Self(value))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CoffeeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CoffeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit price. Any finite value is accepted, including zero and negatives.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate and wrap a price.
    pub fn new(value: f64) -> Result<Self, CoffeeValidationError> {
        if !value.is_finite() {
            return Err(CoffeeValidationError::NonFinitePrice);
        }
        Ok(Self(value))
    }

    /// Parse a decimal price from form text such as `"2.50"`.
    ///
    /// # Examples
    /// ```
    /// use coffee_backend::domain::Price;
    ///
    /// assert_eq!(Price::parse("2.5").map(Price::get), Ok(2.5));
    /// assert!(Price::parse("cheap").is_err());
    /// assert!(Price::parse("NaN").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, CoffeeValidationError> {
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(|_| CoffeeValidationError::UnparsablePrice)?;
        Self::new(value)
    }

    /// Raw floating point value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Image reference: a direct URL or a generated object-storage URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate and wrap an image reference.
    pub fn new(value: impl Into<String>) -> Result<Self, CoffeeValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoffeeValidationError::EmptyImage);
        }
        Ok(Self(value))
    }

    /// Borrow the reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A persisted catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Coffee {
    /// Store-assigned identifier.
    pub id: CoffeeId,
    /// Unique display name.
    pub name: CoffeeName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: ImageRef,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a coffee.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeDraft {
    /// Unique display name.
    pub name: CoffeeName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: ImageRef,
}

/// Partial update of the mutable coffee fields.
///
/// `None` leaves a field unchanged. The description is not part of the
/// update surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeePatch {
    /// Replacement name.
    pub name: Option<CoffeeName>,
    /// Replacement price.
    pub price: Option<Price>,
    /// Replacement image URL.
    pub image: Option<ImageRef>,
}

impl CoffeePatch {
    /// Apply the patch to an in-memory record, refreshing `updated_at`.
    pub fn apply_to(&self, coffee: &mut Coffee, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            coffee.name = name.clone();
        }
        if let Some(price) = self.price {
            coffee.price = price;
        }
        if let Some(image) = &self.image {
            coffee.image = image.clone();
        }
        coffee.updated_at = now;
    }
}

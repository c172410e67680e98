//! Port abstraction for coffee persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Coffee, CoffeeDraft, CoffeeId, CoffeePatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by coffee repository adapters.
    pub enum CoffeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "coffee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "coffee repository query failed: {message}",
        /// Another coffee already uses the requested name.
        DuplicateName { name: String } => "coffee named {name} already exists",
    }
}

/// Storage for catalogue entries.
///
/// Timestamps are supplied by the caller so services control the clock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    /// Return every coffee, ordered by identifier.
    async fn list(&self) -> Result<Vec<Coffee>, CoffeeRepositoryError>;

    /// Fetch one coffee by identifier.
    async fn find_by_id(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeRepositoryError>;

    /// Insert a new coffee and return the stored row.
    async fn create(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<Coffee, CoffeeRepositoryError>;

    /// Apply a partial update. Returns `None` when the id does not exist.
    async fn update(
        &self,
        id: CoffeeId,
        patch: &CoffeePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Coffee>, CoffeeRepositoryError>;

    /// Hard-delete a coffee. Returns `false` when the id does not exist.
    async fn delete(&self, id: CoffeeId) -> Result<bool, CoffeeRepositoryError>;

    /// Insert unless a coffee with the same name exists.
    ///
    /// Returns `true` when a row was inserted and `false` when the name was
    /// already taken. Existing rows are left untouched.
    async fn insert_if_absent(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<bool, CoffeeRepositoryError>;
}

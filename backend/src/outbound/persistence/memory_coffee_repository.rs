//! In-process coffee repository.
//!
//! Backs the server when no `DATABASE_URL` is configured and gives tests a
//! store with the same uniqueness and id-assignment rules as PostgreSQL.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CoffeeRepository, CoffeeRepositoryError};
use crate::domain::{Coffee, CoffeeDraft, CoffeeId, CoffeePatch};

#[derive(Debug, Default)]
struct Table {
    next_id: i32,
    rows: Vec<Coffee>,
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<CoffeeId>) -> bool {
        self.rows
            .iter()
            .any(|row| row.name.as_str() == name && Some(row.id) != except)
    }

    fn insert(
        &mut self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<Coffee, CoffeeRepositoryError> {
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CoffeeRepositoryError::query("coffee id sequence exhausted"))?;
        let coffee = Coffee {
            id: CoffeeId::new(self.next_id),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            image: draft.image.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.push(coffee.clone());
        Ok(coffee)
    }
}

/// Mutex-guarded coffee table with serial identifiers starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryCoffeeRepository {
    table: Mutex<Table>,
}

impl InMemoryCoffeeRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CoffeeRepository for InMemoryCoffeeRepository {
    async fn list(&self) -> Result<Vec<Coffee>, CoffeeRepositoryError> {
        Ok(self.lock().rows.clone())
    }

    async fn find_by_id(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeRepositoryError> {
        Ok(self.lock().rows.iter().find(|row| row.id == id).cloned())
    }

    async fn create(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<Coffee, CoffeeRepositoryError> {
        let mut table = self.lock();
        if table.name_taken(draft.name.as_str(), None) {
            return Err(CoffeeRepositoryError::duplicate_name(draft.name.as_str()));
        }
        table.insert(draft, now)
    }

    async fn update(
        &self,
        id: CoffeeId,
        patch: &CoffeePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Coffee>, CoffeeRepositoryError> {
        let mut table = self.lock();
        if let Some(name) = &patch.name {
            if table.name_taken(name.as_str(), Some(id)) {
                return Err(CoffeeRepositoryError::duplicate_name(name.as_str()));
            }
        }
        let Some(row) = table.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        patch.apply_to(row, now);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: CoffeeId) -> Result<bool, CoffeeRepositoryError> {
        let mut table = self.lock();
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok(table.rows.len() != before)
    }

    async fn insert_if_absent(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<bool, CoffeeRepositoryError> {
        let mut table = self.lock();
        if table.name_taken(draft.name.as_str(), None) {
            return Ok(false);
        }
        table.insert(draft, now)?;
        Ok(true)
    }
}

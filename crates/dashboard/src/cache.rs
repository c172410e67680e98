//! Query cache shared by the dashboard views.
//!
//! Built once at the application root and handed to every view through
//! [`DashboardContext`](crate::DashboardContext). The lock is never held
//! across a network call.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::client::{ClientError, CoffeeApi};
use crate::model::Coffee;

/// Cache keys, one per query the views issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full coffee list.
    CoffeeList,
    /// One coffee by id.
    Coffee(i32),
}

#[derive(Debug, Clone)]
enum Entry {
    List(Vec<Coffee>),
    Coffee(Coffee),
}

/// Memoised query results keyed by [`QueryKey`].
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True when `key` holds a cached result.
    #[must_use]
    pub fn contains(&self, key: QueryKey) -> bool {
        self.lock().contains_key(&key)
    }

    /// Drop the entry for `key`, returning whether one existed.
    pub fn invalidate(&self, key: QueryKey) -> bool {
        let removed = self.lock().remove(&key).is_some();
        debug!(?key, removed, "query cache invalidated");
        removed
    }

    /// Cached list, if present.
    #[must_use]
    pub fn list(&self) -> Option<Vec<Coffee>> {
        match self.lock().get(&QueryKey::CoffeeList) {
            Some(Entry::List(coffees)) => Some(coffees.clone()),
            _ => None,
        }
    }

    /// Cached coffee, if present.
    #[must_use]
    pub fn coffee(&self, id: i32) -> Option<Coffee> {
        match self.lock().get(&QueryKey::Coffee(id)) {
            Some(Entry::Coffee(coffee)) => Some(coffee.clone()),
            _ => None,
        }
    }

    /// Return the cached list or fetch and cache it.
    ///
    /// # Errors
    ///
    /// Propagates the client error when the fetch fails; nothing is cached.
    pub async fn fetch_list(&self, api: &dyn CoffeeApi) -> Result<Vec<Coffee>, ClientError> {
        if let Some(coffees) = self.list() {
            return Ok(coffees);
        }
        let coffees = api.list().await?;
        self.lock()
            .insert(QueryKey::CoffeeList, Entry::List(coffees.clone()));
        Ok(coffees)
    }

    /// Return the cached coffee or fetch and cache it.
    ///
    /// # Errors
    ///
    /// Propagates the client error when the fetch fails; nothing is cached.
    pub async fn fetch_coffee(&self, api: &dyn CoffeeApi, id: i32) -> Result<Coffee, ClientError> {
        if let Some(coffee) = self.coffee(id) {
            return Ok(coffee);
        }
        let coffee = api.get_by_id(id).await?;
        self.lock()
            .insert(QueryKey::Coffee(id), Entry::Coffee(coffee.clone()));
        Ok(coffee)
    }
}

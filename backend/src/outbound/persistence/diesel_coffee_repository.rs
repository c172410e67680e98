//! PostgreSQL-backed `CoffeeRepository` adapter.
//!
//! Uniqueness of `name` is enforced by the `coffees_name_key` constraint;
//! violations surface as `CoffeeRepositoryError::DuplicateName`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CoffeeRepository, CoffeeRepositoryError};
use crate::domain::{Coffee, CoffeeDraft, CoffeeId, CoffeePatch};

use super::models::{CoffeeChangeset, CoffeeRow, NewCoffeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::coffees;

/// Diesel-backed implementation of the coffee repository.
#[derive(Clone)]
pub struct DieselCoffeeRepository {
    pool: DbPool,
}

impl DieselCoffeeRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use coffee_backend::outbound::persistence::{DbPool, DieselCoffeeRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/coffee")).await?;
    /// let repository = DieselCoffeeRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CoffeeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CoffeeRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors. `name` identifies the row being
/// written so unique violations can be reported against it.
fn map_diesel_error(error: diesel::result::Error, name: Option<&str>) -> CoffeeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => match name {
            Some(name) => CoffeeRepositoryError::duplicate_name(name),
            None => CoffeeRepositoryError::query(info.message().to_owned()),
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CoffeeRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => CoffeeRepositoryError::query("record not found"),
        DieselError::DatabaseError(_, info) => {
            CoffeeRepositoryError::query(info.message().to_owned())
        }
        other => CoffeeRepositoryError::query(other.to_string()),
    }
}

fn row_to_coffee(row: CoffeeRow) -> Result<Coffee, CoffeeRepositoryError> {
    let id = row.id;
    Coffee::try_from(row).map_err(|err| {
        CoffeeRepositoryError::query(format!("stored coffee {id} is invalid: {err}"))
    })
}

fn new_row(draft: &CoffeeDraft, now: DateTime<Utc>) -> NewCoffeeRow<'_> {
    NewCoffeeRow {
        name: draft.name.as_str(),
        description: draft.description.as_deref(),
        price: draft.price.get(),
        image: draft.image.as_str(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl CoffeeRepository for DieselCoffeeRepository {
    async fn list(&self) -> Result<Vec<Coffee>, CoffeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CoffeeRow> = coffees::table
            .order(coffees::id.asc())
            .select(CoffeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_coffee).collect()
    }

    async fn find_by_id(&self, id: CoffeeId) -> Result<Option<Coffee>, CoffeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CoffeeRow> = coffees::table
            .find(id.get())
            .select(CoffeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_coffee).transpose()
    }

    async fn create(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<Coffee, CoffeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CoffeeRow = diesel::insert_into(coffees::table)
            .values(&new_row(draft, now))
            .returning(CoffeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft.name.as_str())))?;
        row_to_coffee(row)
    }

    async fn update(
        &self,
        id: CoffeeId,
        patch: &CoffeePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Coffee>, CoffeeRepositoryError> {
        let changeset = CoffeeChangeset {
            name: patch.name.as_ref().map(|name| name.as_str()),
            price: patch.price.map(|price| price.get()),
            image: patch.image.as_ref().map(|image| image.as_str()),
            updated_at: now,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CoffeeRow> = diesel::update(coffees::table.find(id.get()))
            .set(&changeset)
            .returning(CoffeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, changeset.name))?;
        row.map(row_to_coffee).transpose()
    }

    async fn delete(&self, id: CoffeeId) -> Result<bool, CoffeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(coffees::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(affected > 0)
    }

    async fn insert_if_absent(
        &self,
        draft: &CoffeeDraft,
        now: DateTime<Utc>,
    ) -> Result<bool, CoffeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::insert_into(coffees::table)
            .values(&new_row(draft, now))
            .on_conflict(coffees::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(draft.name.as_str())))?;
        Ok(affected > 0)
    }
}

//! In-process `CoffeeApi` stub for view and cache tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::client::{ClientError, CoffeeApi};
use crate::model::{Coffee, CoffeeUpdate, NewCoffee, NewCoffeeUpload};

pub(crate) fn coffee(id: i32, name: &str, price: f64) -> Coffee {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Coffee {
        id,
        name: name.to_owned(),
        description: Some(format!("{name} description")),
        price,
        image: format!("https://example.test/{id}.jpg"),
        created_at: at,
        updated_at: at,
    }
}

#[derive(Default)]
struct State {
    coffees: Vec<Coffee>,
    failing: bool,
    list_calls: usize,
    get_calls: usize,
    last_update: Option<CoffeeUpdate>,
    last_upload: Option<NewCoffeeUpload>,
}

/// Stub API over a vector of coffees; `failing` makes every call error.
#[derive(Default)]
pub(crate) struct StubApi {
    state: Mutex<State>,
}

impl StubApi {
    pub(crate) fn with_coffees(coffees: Vec<Coffee>) -> Self {
        Self {
            state: Mutex::new(State {
                coffees,
                ..State::default()
            }),
        }
    }

    pub(crate) fn failing() -> Self {
        let api = Self::default();
        api.set_failing(true);
        api
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.lock().get_calls
    }

    pub(crate) fn last_update(&self) -> Option<CoffeeUpdate> {
        self.lock().last_update.clone()
    }

    pub(crate) fn last_upload(&self) -> Option<NewCoffeeUpload> {
        self.lock().last_upload.clone()
    }

    fn insert(
        state: &mut State,
        name: String,
        description: Option<String>,
        price: f64,
        image: String,
    ) -> Coffee {
        let id = state.coffees.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut created = coffee(id, &name, price);
        created.description = description;
        created.image = image;
        state.coffees.push(created.clone());
        created
    }
}

#[async_trait]
impl CoffeeApi for StubApi {
    async fn list(&self) -> Result<Vec<Coffee>, ClientError> {
        let mut state = self.lock();
        state.list_calls += 1;
        if state.failing {
            return Err(ClientError::List);
        }
        Ok(state.coffees.clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Coffee, ClientError> {
        let mut state = self.lock();
        state.get_calls += 1;
        if state.failing {
            return Err(ClientError::Get);
        }
        state
            .coffees
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ClientError::Get)
    }

    async fn create(&self, coffee: &NewCoffee) -> Result<Coffee, ClientError> {
        let mut state = self.lock();
        if state.failing || state.coffees.iter().any(|c| c.name == coffee.name) {
            return Err(ClientError::Create);
        }
        Ok(Self::insert(
            &mut state,
            coffee.name.clone(),
            coffee.description.clone(),
            coffee.price,
            coffee.image.clone(),
        ))
    }

    async fn create_with_image(&self, coffee: NewCoffeeUpload) -> Result<Coffee, ClientError> {
        let mut state = self.lock();
        if state.failing {
            return Err(ClientError::Create);
        }
        let image = format!("https://cdn.example.test/{}", coffee.file.file_name);
        let created = Self::insert(
            &mut state,
            coffee.name.clone(),
            coffee.description.clone(),
            coffee.price,
            image,
        );
        state.last_upload = Some(coffee);
        Ok(created)
    }

    async fn update(&self, id: i32, update: &CoffeeUpdate) -> Result<Coffee, ClientError> {
        let mut state = self.lock();
        state.last_update = Some(update.clone());
        if state.failing {
            return Err(ClientError::Update);
        }
        let row = state
            .coffees
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClientError::Update)?;
        if let Some(name) = &update.name {
            row.name.clone_from(name);
        }
        if let Some(price) = update.price {
            row.price = price;
        }
        if let Some(image) = &update.image {
            row.image.clone_from(image);
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let mut state = self.lock();
        let before = state.coffees.len();
        state.coffees.retain(|c| c.id != id);
        if state.failing || state.coffees.len() == before {
            return Err(ClientError::Delete);
        }
        Ok(())
    }
}

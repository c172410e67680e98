//! End-to-end coverage: the dashboard HTTP client against a live server.

use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::web;
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

use coffee_backend::domain::ports::{
    CoffeeRepository, ImageStore, ImageStoreError, ImageUpload,
};
use coffee_backend::inbound::http::health::HealthState;
use coffee_backend::outbound::persistence::InMemoryCoffeeRepository;
use coffee_backend::seed::seed_catalogue;
use coffee_backend::server::{Listen, ServerConfig, create_server};
use coffee_dashboard::{
    ClientError, CoffeeApi, CoffeeUpdate, HttpCoffeeClient, ImageFile, NewCoffee,
    NewCoffeeUpload,
};

#[derive(Default)]
struct RecordingImageStore {
    keys: Mutex<Vec<String>>,
}

impl RecordingImageStore {
    fn keys(&self) -> Vec<String> {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    async fn put_image(&self, upload: ImageUpload) -> Result<String, ImageStoreError> {
        let url = format!("https://bucket.example.test/{}", upload.key);
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(upload.key);
        Ok(url)
    }
}

struct Running {
    client: HttpCoffeeClient,
    handle: ServerHandle,
}

impl Running {
    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn start(
    prefix: &str,
    repository: Arc<dyn CoffeeRepository>,
    images: Arc<dyn ImageStore>,
) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let config = ServerConfig::new(Listen::Listener(listener))
        .with_repository(repository)
        .with_image_store(images);
    let server = create_server(web::Data::new(HealthState::new()), config).expect("server");
    let handle = server.handle();
    actix_rt::spawn(server);

    let client = HttpCoffeeClient::new(&format!("http://{addr}{prefix}"), Duration::from_secs(5))
        .expect("client");
    Running { client, handle }
}

fn espresso() -> NewCoffee {
    NewCoffee {
        name: "Espresso".to_owned(),
        description: Some("Strong and short".to_owned()),
        price: 1.5,
        image: "https://example.test/espresso.jpg".to_owned(),
    }
}

#[rstest]
#[case("")]
#[case("/api")]
#[actix_rt::test]
async fn created_coffee_is_listed_and_fetchable(#[case] prefix: &str) {
    let running = start(
        prefix,
        Arc::new(InMemoryCoffeeRepository::new()),
        Arc::new(RecordingImageStore::default()),
    );

    let created = running.client.create(&espresso()).await.expect("create");
    let fetched = running.client.get_by_id(created.id).await.expect("get");
    let listed = running.client.list().await.expect("list");

    assert_eq!(fetched, created);
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(created.name, "Espresso");
    assert_eq!(created.created_at, created.updated_at);
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn duplicate_names_are_rejected() {
    let running = start(
        "/api",
        Arc::new(InMemoryCoffeeRepository::new()),
        Arc::new(RecordingImageStore::default()),
    );

    running
        .client
        .create(&espresso())
        .await
        .expect("first create");
    let err = running
        .client
        .create(&espresso())
        .await
        .expect_err("duplicate");

    assert_eq!(err, ClientError::Create);
    assert_eq!(running.client.list().await.expect("list").len(), 1);
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn price_only_update_keeps_other_fields() {
    let running = start(
        "/api",
        Arc::new(InMemoryCoffeeRepository::new()),
        Arc::new(RecordingImageStore::default()),
    );
    let created = running.client.create(&espresso()).await.expect("create");

    let update = CoffeeUpdate {
        price: Some(1.75),
        ..CoffeeUpdate::default()
    };
    let updated = running
        .client
        .update(created.id, &update)
        .await
        .expect("update");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.image, created.image);
    assert_eq!(updated.description, created.description);
    assert!((updated.price - 1.75).abs() < f64::EPSILON);
    assert!(updated.updated_at >= created.updated_at);
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn deleted_coffee_is_gone() {
    let running = start(
        "/api",
        Arc::new(InMemoryCoffeeRepository::new()),
        Arc::new(RecordingImageStore::default()),
    );
    let created = running.client.create(&espresso()).await.expect("create");

    running.client.delete(created.id).await.expect("delete");

    assert_eq!(
        running.client.get_by_id(created.id).await,
        Err(ClientError::Get)
    );
    assert_eq!(running.client.delete(created.id).await, Err(ClientError::Delete));
    assert!(running.client.list().await.expect("list").is_empty());
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn missing_coffee_cannot_be_updated() {
    let running = start(
        "/api",
        Arc::new(InMemoryCoffeeRepository::new()),
        Arc::new(RecordingImageStore::default()),
    );

    let update = CoffeeUpdate {
        name: Some("Ghost".to_owned()),
        ..CoffeeUpdate::default()
    };

    assert_eq!(
        running.client.update(999, &update).await,
        Err(ClientError::Update)
    );
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn uploaded_image_url_is_stored() {
    let images = Arc::new(RecordingImageStore::default());
    let running = start(
        "/api",
        Arc::new(InMemoryCoffeeRepository::new()),
        images.clone(),
    );

    let upload = NewCoffeeUpload {
        name: "Flat White".to_owned(),
        description: None,
        price: 3.1,
        file: ImageFile {
            file_name: "flat white.png".to_owned(),
            content_type: Some("image/png".to_owned()),
            bytes: b"\x89PNG".to_vec(),
        },
    };
    let created = running
        .client
        .create_with_image(upload)
        .await
        .expect("create with image");

    let keys = images.keys();
    assert_eq!(keys.len(), 1);
    assert_eq!(created.image, format!("https://bucket.example.test/{}", keys[0]));
    running.stop().await;
}

#[rstest]
#[actix_rt::test]
async fn seeding_twice_serves_seven_coffees() {
    let repository: Arc<dyn CoffeeRepository> = Arc::new(InMemoryCoffeeRepository::new());
    seed_catalogue(None, repository.clone(), Arc::new(DefaultClock))
        .await
        .expect("first seed");
    let second = seed_catalogue(None, repository.clone(), Arc::new(DefaultClock))
        .await
        .expect("second seed");
    let running = start("/api", repository, Arc::new(RecordingImageStore::default()));

    let coffees = running.client.list().await.expect("list");

    assert_eq!(second.inserted, 0);
    assert_eq!(coffees.len(), 7);
    assert!(coffees.iter().any(|coffee| coffee.name == "Espresso"));
    running.stop().await;
}

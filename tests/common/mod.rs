#![allow(dead_code)]

use std::sync::{Arc, Once};

use rendezvous::models::{User, calendar_date};
use rendezvous::services::jwt::JwtService;
use rendezvous::services::store::{MemoryStore, Store};
use rendezvous::utils::clock;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &[u8] = b"rendezvous-test-secret";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("rendezvous=debug")
            .with_test_writer()
            .init();
    });
}

/// A running server plus handles to its store and a token minter.
pub struct TestApp {
    /// Format: `http://127.0.0.1:8492`
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub jwt_service: JwtService,
    pub client: reqwest::Client,
}

/// A seeded user with a valid access token.
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

/// Spawns the application on a random port backed by a fresh [`MemoryStore`].
pub async fn spawn_app() -> TestApp {
    init_tracing_once();

    let store = Arc::new(MemoryStore::new());

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    let app = rendezvous::app(store.clone(), JwtService::from_secret(TEST_JWT_SECRET));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        store,
        jwt_service: JwtService::from_secret(TEST_JWT_SECRET),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    /// Inserts a user directly into the store and mints a token for them.
    pub async fn create_user(&self, name: &str) -> TestUser {
        let user = User::new(name);
        self.store
            .insert_user(&user)
            .await
            .expect("Failed to seed user");
        let token = self
            .jwt_service
            .create_access_token(user.id)
            .expect("Failed to create access token");

        TestUser { id: user.id, token }
    }

    pub async fn like(&self, user: &TestUser, target: Uuid) -> reqwest::Response {
        self.client
            .post(format!("{}/api/likes/{target}", self.address))
            .bearer_auth(&user.token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn unlike(&self, user: &TestUser, target: Uuid) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/likes/{target}", self.address))
            .bearer_auth(&user.token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn submit_availability(
        &self,
        user: &TestUser,
        match_id: Uuid,
        body: &Value,
    ) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/api/matches/{match_id}/availability",
                self.address
            ))
            .bearer_auth(&user.token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn match_detail(&self, user: &TestUser, match_id: Uuid) -> reqwest::Response {
        self.client
            .get(format!("{}/api/matches/{match_id}", self.address))
            .bearer_auth(&user.token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Makes `a` and `b` like each other and returns the match id.
    pub async fn create_match(&self, a: &TestUser, b: &TestUser) -> Uuid {
        assert_eq!(self.like(a, b.id).await.status(), reqwest::StatusCode::CREATED);
        let response = self.like(b, a.id).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["isMatch"], json!(true));
        body["matchId"]
            .as_str()
            .and_then(|id| Uuid::try_parse(id).ok())
            .expect("Missing match id")
    }
}

/// `today + offset` as `YYYY-MM-DD`.
pub fn day(offset: i64) -> String {
    (clock::today() + time::Duration::days(offset))
        .format(calendar_date::FORMAT)
        .unwrap()
}

pub fn slots_body(slots: &[(&str, &str, &str)]) -> Value {
    json!({
        "slots": slots
            .iter()
            .map(|(date, start, end)| json!({"date": date, "startTime": start, "endTime": end}))
            .collect::<Vec<_>>()
    })
}

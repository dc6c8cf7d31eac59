//! Shared harness for the API integration tests.
//!
//! Wires the real routing table against in-memory repositories and local
//! doubles for the OAuth provider and image storage, so the full HTTP
//! surface runs without a database or network.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use atelier_api::routes::AppState;
use atelier_core::domain::value_objects::ExternalProfile;
use atelier_core::errors::{AuthError, DomainError};
use atelier_core::repositories::memory::{
    InMemoryClientRepository, InMemoryStyleRepository, InMemoryUserRepository,
};
use atelier_core::services::auth::AuthConfig;
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::{ImageStorage, ImageUpload, StoredImage};
use atelier_core::services::token::TokenServiceConfig;
use atelier_core::services::{
    AdminService, AuthService, ClientService, StyleService, TokenService,
};
use atelier_shared::config::Environment;

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

/// OAuth double resolving pre-registered codes to fixed profiles.
pub struct StubOAuthProvider {
    profiles: Mutex<HashMap<String, ExternalProfile>>,
}

impl StubOAuthProvider {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, code: &str, profile: ExternalProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(code.to_string(), profile);
    }
}

#[async_trait]
impl OAuthProvider for StubOAuthProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://accounts.google.test/o/oauth2/v2/auth?state={state}")
    }

    async fn exchange_and_verify(&self, code: &str) -> Result<ExternalProfile, DomainError> {
        self.profiles
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or(DomainError::Auth(AuthError::OAuthExchangeFailed))
    }
}

/// Image storage double tracking which uploads are still hosted.
pub struct StubImageStorage {
    next_id: AtomicU64,
    live: Mutex<HashSet<String>>,
    fail_uploads: AtomicBool,
}

impl StubImageStorage {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            live: Mutex::new(HashSet::new()),
            fail_uploads: AtomicBool::new(false),
        }
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn is_live(&self, public_id: &str) -> bool {
        self.live.lock().unwrap().contains(public_id)
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for StubImageStorage {
    async fn upload(&self, upload: ImageUpload) -> Result<StoredImage, DomainError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(DomainError::internal("image host unavailable"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let public_id = format!("test/{id}");
        self.live.lock().unwrap().insert(public_id.clone());
        Ok(StoredImage {
            url: format!("https://images.test/{id}/{}", upload.file_name),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.live.lock().unwrap().remove(public_id);
        Ok(())
    }
}

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryClientRepository,
    InMemoryStyleRepository,
    StubOAuthProvider,
    StubImageStorage,
>;

pub struct TestApp {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub clients: Arc<InMemoryClientRepository>,
    pub styles: Arc<InMemoryStyleRepository>,
    pub oauth: Arc<StubOAuthProvider>,
    pub storage: Arc<StubImageStorage>,
    pub token_service: Arc<TokenService>,
}

/// Seeds a user straight into the repository and issues a bearer token,
/// skipping the HTTP registration round trip.
pub async fn seed_user(harness: &TestApp, email: &str, is_admin: bool) -> (uuid::Uuid, String) {
    use atelier_core::domain::entities::User;
    use atelier_core::repositories::UserRepository;

    let mut user = User::new(
        "Seeded User".to_string(),
        email.to_string(),
        "$2b$12$unused-hash-for-seeded-accounts".to_string(),
    );
    user.is_admin = is_admin;
    let user = harness.users.create(user).await.unwrap();
    let token = harness
        .token_service
        .issue_access_token(user.id, is_admin)
        .unwrap();
    (user.id, token)
}

pub fn token_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: ACCESS_SECRET.to_string(),
        refresh_secret: REFRESH_SECRET.to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

pub fn test_app() -> TestApp {
    test_app_with(AuthConfig::new(None))
}

pub fn test_app_with(auth_config: AuthConfig) -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let clients = Arc::new(InMemoryClientRepository::new());
    let styles = Arc::new(InMemoryStyleRepository::new());
    let oauth = Arc::new(StubOAuthProvider::new());
    let storage = Arc::new(StubImageStorage::new());

    let token_service = Arc::new(TokenService::new(token_config()));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        oauth.clone(),
        token_service.clone(),
        auth_config,
    ));
    let client_service = Arc::new(ClientService::new(clients.clone(), styles.clone()));
    let style_service = Arc::new(StyleService::new(
        styles.clone(),
        clients.clone(),
        storage.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(
        users.clone(),
        clients.clone(),
        styles.clone(),
    ));

    let state = web::Data::new(AppState {
        auth_service,
        client_service,
        style_service,
        admin_service,
        token_service: token_service.clone(),
        environment: Environment::Production,
        frontend_origin: "http://localhost:3000".to_string(),
    });

    TestApp {
        state,
        users,
        clients,
        styles,
        oauth,
        storage,
        token_service,
    }
}

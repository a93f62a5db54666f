//! Test helpers: build the router over a test storage backend.
//!
//! Run from workspace root: `cargo test -p s3bridge-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::TestServer;
use s3bridge_api::setup::routes;
use s3bridge_api::state::AppState;
use s3bridge_storage::{MemoryStorage, ObjectStorage};
use std::sync::Arc;

pub use storage::{FailingStorage, StalledStorage};

/// Test application: server plus the storage it talks to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn ObjectStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Router backed by an empty in-memory store.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(MemoryStorage::new()))
}

pub fn setup_test_app_with(storage: Arc<dyn ObjectStorage>) -> TestApp {
    let app = routes::setup_routes(AppState::new(storage.clone()));
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");
    TestApp { server, storage }
}

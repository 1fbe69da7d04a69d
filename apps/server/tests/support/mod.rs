//! Shared harness for the HTTP integration tests.
//!
//! Every test gets its own `AppState` over the in-memory store and drives the router
//! directly, without binding a socket.

use anyhow::Context;
use atlas::{
    api::create_router,
    config::{Config, STORE_IN_MEMORY},
    models::{Country, Greeting},
    state::{AppState, AppStateOptions, StoreKind},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use std::{future::Future, pin::Pin};
use tower::ServiceExt;

pub type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.request_with_extra_headers(method, path, body, &[]).await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call")?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, bytes.to_vec()))
    }

    /// Insert a country through the service and return its id.
    pub async fn seed_country(&self, name: &str, capital: &str) -> anyhow::Result<i64> {
        let created = self
            .state
            .country_service
            .create(Country::new(name, capital))
            .await?;
        created.id.context("seeded country has no id")
    }

    /// Insert a greeting through the service and return its id.
    pub async fn seed_greeting(&self, text: &str, language: &str) -> anyhow::Result<i64> {
        let created = self
            .state
            .greeting_service
            .create(Greeting::new(text, language))
            .await?;
        created.id.context("seeded greeting has no id")
    }
}

pub async fn with_test_app<F>(test: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_test_app_with_config(|_| {}, test).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, test: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = Config::default();
    config.database.store = STORE_IN_MEMORY.to_string();
    configure(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid test config: {e}"))?;

    let options = AppStateOptions::from_config(&config);
    anyhow::ensure!(
        options.store == StoreKind::InMemory,
        "tests must not touch a database"
    );

    let state = AppState::new_with_options(config, options)
        .await
        .context("init in-memory app state")?;
    let router = create_router(state.clone());

    test(TestApp { router, state }).await
}

pub fn to_json_body<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec(value).context("serialize request body")
}

pub fn json_body(bytes: &[u8]) -> anyhow::Result<serde_json::Value> {
    serde_json::from_slice(bytes).with_context(|| {
        format!(
            "response is not JSON: {}",
            String::from_utf8_lossy(bytes)
        )
    })
}

pub fn assert_status(got: StatusCode, expected: StatusCode, what: &str) {
    assert_eq!(got, expected, "unexpected status for {what}");
}

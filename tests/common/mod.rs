#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use bankly_api::auth::{CredentialHasher, TokenCodec};
use bankly_api::database::User;
use bankly_api::testing::MemoryUserStore;
use bankly_api::AppState;

pub const SECRET: &str = "test-signing-secret";

/// Router over an in-memory store holding u1, u2 (standard) and u3 (admin).
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub codec: TokenCodec,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let hasher = CredentialHasher::minimal();
        let codec = TokenCodec::new(SECRET.as_bytes(), 1).expect("test codec");

        let seed = [
            ("u1", "fn1", "ln1", "email1", "phone1", "pwd1", false),
            ("u2", "fn2", "ln2", "email2", "phone2", "pwd2", false),
            ("u3", "fn3", "ln3", "email3", "phone3", "pwd3", true),
        ];
        let users = seed.iter().map(|(username, first, last, email, phone, password, admin)| User {
            username: username.to_string(),
            password: hasher.hash(password).expect("hash seed password"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            admin: *admin,
        });
        let store = Arc::new(MemoryUserStore::with_users(users.collect::<Vec<_>>()));

        let state = AppState::new(codec.clone(), hasher, store.clone()).with_audit_logging(true);
        Self {
            router: bankly_api::app(state),
            store,
            codec,
        }
    }

    /// A valid token for one of the seeded users.
    pub fn token(&self, username: &str) -> String {
        self.codec
            .issue(username, username == "u3")
            .expect("issue test token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await.context("router call")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.send(Method::POST, uri, None, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Method::DELETE, uri, token, None).await
    }
}

#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use popcorn_gallery::app::{self, AppState};
use popcorn_gallery::auth::JwtKeys;
use popcorn_gallery::config::GalleryConfig;
use popcorn_gallery::database::models::{NewUser, User};
use popcorn_gallery::database::{MemoryProjectStore, MemoryUserStore, UserStore};

pub const SITE_URL: &str = "https://gallery.test";

/// Router over in-memory stores, driven without a socket
pub struct TestApp {
    pub router: Router,
    pub projects: Arc<MemoryProjectStore>,
    pub users: Arc<MemoryUserStore>,
    pub jwt: JwtKeys,
}

impl TestApp {
    pub fn new() -> Self {
        let projects = Arc::new(MemoryProjectStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let jwt = JwtKeys::new("integration-secret", 1).expect("jwt keys");
        let gallery = GalleryConfig {
            site_url: SITE_URL.to_string(),
            templates: vec!["basic".to_string(), "base-template".to_string()],
            forkable_by_default: true,
            name_max_length: 255,
        };
        let state = AppState::new(projects.clone(), users.clone(), gallery, jwt.clone())
            .expect("app state");

        Self {
            router: app::router(state),
            projects,
            users,
            jwt,
        }
    }

    /// Create a user and return it with a bearer token
    pub async fn login(&self, handle: &str) -> (User, String) {
        let user = self
            .users
            .insert(NewUser::from_handle(handle))
            .await
            .expect("insert user");
        let token = self.jwt.issue(user.id, &user.username).expect("issue token");
        (user, token)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }
}

/// The server binary running on a free port
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Memory stores only; never touch a database from the environment
        let child = Command::new(env!("CARGO_BIN_EXE_popcorn-gallery"))
            .env("GALLERY_API_PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("DATABASE_URL", "")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

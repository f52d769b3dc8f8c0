use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use in_n_out_books::config::config;
use in_n_out_books::database::Fixtures;
use in_n_out_books::{app, AppState};

/// Lowest cost bcrypt accepts; keeps seeding fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the application on a free port with a freshly seeded store
    pub async fn spawn() -> Result<Self> {
        init_tracing();

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let db = Fixtures::builtin()?.into_database(TEST_BCRYPT_COST)?;
        let app = app(AppState::new(db, TEST_BCRYPT_COST), config());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        // The server task dies with the test's runtime
        tokio::spawn(async move { axum::serve(listener, app).await });

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// Quiet by default; RUST_LOG=debug shows request traces for a failing test
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Read a response body as JSON, treating an empty body as `null`
pub async fn body_json(res: reqwest::Response) -> Result<Value> {
    let bytes = res.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

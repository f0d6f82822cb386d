use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

/// One server process per test, on its own port with its own SQLite file,
/// so tests start from a clean database and cannot interfere.
pub struct TestServer {
    pub base_url: String,
    child: Child,
    _db_dir: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let db_dir = tempfile::tempdir().context("failed to create temp dir")?;
        let db_path = db_dir.path().join("fithub.db");

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fithub-api"));
        cmd.env("FITHUB_PORT", port.to_string())
            .env("DATABASE_URL", format!("sqlite://{}", db_path.display()))
            .env("SECURITY_JWT_SECRET", "integration-test-secret")
            // Pin the dashboard clock so "today" is deterministic
            .env("FITHUB_TODAY", "2025-11-04")
            .env_remove("APP_ENV")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        let server = Self {
            base_url,
            child,
            _db_dir: db_dir,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Register a user and return the created id
pub async fn register(
    client: &reqwest::Client,
    server: &TestServer,
    username: &str,
    password: &str,
) -> Result<i64> {
    let res = client
        .post(format!("{}/api/register", server.base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
    let body = res.json::<Value>().await?;
    body["data"]["id"]
        .as_i64()
        .context("register response missing id")
}

/// Exchange credentials for a bearer token
pub async fn obtain_token(
    client: &reqwest::Client,
    server: &TestServer,
    username: &str,
    password: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/api/token", server.base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "token failed: {}", res.status());
    let body = res.json::<Value>().await?;
    Ok(body["data"]["token"]
        .as_str()
        .context("token response missing token")?
        .to_string())
}

/// Register + token in one step for tests that just need a principal
pub async fn authenticated_user(
    client: &reqwest::Client,
    server: &TestServer,
    username: &str,
) -> Result<String> {
    register(client, server, username, "password123").await?;
    obtain_token(client, server, username, "password123").await
}

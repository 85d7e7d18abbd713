use anyhow::Context as _;
use clap::Parser;
use common::{
    expirations::{ExpirationStore as _, JsonFileExpirationStore},
    proxy_api::{ProxyApiClient, ProxyServerConfig},
    time,
    tracing::init_tracing,
};

use crate::{cli::Cli, enforcer::enforce_expirations};

mod cli;
mod enforcement_state;
mod enforcer;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let cli = Cli::parse();

    // Failures are logged rather than turned into an exit code, the next scheduled
    // run will try again
    let _ = start(cli).await.map_err(|e| {
        tracing::error!("{:#}", e);
    });
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Starting expiration check...");
    tracing::info!("Cli args: {cli:?}");

    let proxy_config = ProxyServerConfig::load(&cli.proxy_config_path)
        .context("Could not read proxy server config or find apiUrl, exiting")?;

    tracing::info!("Proxy management API at {}", proxy_config.redacted_api_url());

    let proxy_client = ProxyApiClient::new(proxy_config.api_url)?;

    let store = JsonFileExpirationStore::new(cli.expirations_path);
    let table = store.get_all().await;

    if table.is_empty() {
        tracing::info!(
            "No expiration dates found in {}, exiting",
            store.path().display()
        );
        return Ok(());
    }

    let now = time::now_millis();

    let report = enforce_expirations(&table, &proxy_client, now, cli.dry_run).await;
    report.log_summary();

    tracing::info!("Expiration check finished.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        net::SocketAddr,
        path::{Path, PathBuf},
        sync::{Arc, Mutex},
    };

    use axum::{
        extract::{Path as UrlPath, State},
        http::StatusCode,
        routing::put,
        Router,
    };
    use serde_json::{json, Value};
    use tempfile::{tempdir, TempDir};
    use tokio::net::TcpListener;

    use super::*;

    #[derive(Clone)]
    struct FakeProxy {
        respond_with: StatusCode,
        received: Arc<Mutex<Vec<(String, Value)>>>,
    }

    impl FakeProxy {
        fn new(respond_with: StatusCode) -> Self {
            Self {
                respond_with,
                received: Arc::default(),
            }
        }

        fn received(&self) -> Vec<(String, Value)> {
            self.received.lock().unwrap().clone()
        }
    }

    async fn put_data_limit(
        State(proxy): State<FakeProxy>,
        UrlPath(key_id): UrlPath<String>,
        body: String,
    ) -> StatusCode {
        let body = serde_json::from_str(&body).unwrap_or(Value::Null);
        proxy.received.lock().unwrap().push((key_id, body));

        proxy.respond_with
    }

    async fn start_fake_proxy(proxy: FakeProxy) -> SocketAddr {
        let app = Router::new()
            .route("/s3cr3t/access-keys/{key_id}/data-limit", put(put_data_limit))
            .with_state(proxy);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        addr
    }

    fn write_proxy_config(dir: &Path, contents: Value) -> PathBuf {
        let path = dir.join("shadowbox_server_config.json");
        std::fs::write(&path, contents.to_string()).unwrap();
        path
    }

    fn write_expirations(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("expirations.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn cli(proxy_config_path: PathBuf, expirations_path: PathBuf) -> Cli {
        Cli {
            expirations_path,
            proxy_config_path,
            dry_run: false,
        }
    }

    async fn proxy_with_config(respond_with: StatusCode) -> (TempDir, FakeProxy, PathBuf) {
        let dir = tempdir().unwrap();
        let proxy = FakeProxy::new(respond_with);
        let addr = start_fake_proxy(proxy.clone()).await;

        let config_path = write_proxy_config(
            dir.path(),
            json!({ "apiUrl": format!("http://{addr}/s3cr3t"), "hostname": "127.0.0.1" }),
        );

        (dir, proxy, config_path)
    }

    #[tokio::test]
    async fn missing_proxy_config_aborts_before_enforcing() {
        let (dir, proxy, _) = proxy_with_config(StatusCode::NO_CONTENT).await;
        let expirations_path = write_expirations(dir.path(), r#"{"abc": 1000}"#);

        let result = start(cli(dir.path().join("nope.json"), expirations_path)).await;

        assert!(result.is_err());
        assert!(proxy.received().is_empty());
    }

    #[tokio::test]
    async fn proxy_config_without_api_url_aborts_before_enforcing() {
        let (dir, proxy, _) = proxy_with_config(StatusCode::NO_CONTENT).await;
        let expirations_path = write_expirations(dir.path(), r#"{"abc": 1000}"#);
        let config_path = write_proxy_config(dir.path(), json!({ "hostname": "127.0.0.1" }));

        let result = start(cli(config_path, expirations_path)).await;

        assert!(result.is_err());
        assert!(proxy.received().is_empty());
    }

    #[tokio::test]
    async fn proxy_config_with_malformed_api_url_aborts_before_enforcing() {
        let (dir, proxy, _) = proxy_with_config(StatusCode::NO_CONTENT).await;
        let expirations_path = write_expirations(dir.path(), r#"{"abc": 1000}"#);
        let config_path = write_proxy_config(dir.path(), json!({ "apiUrl": "not a url" }));

        let result = start(cli(config_path, expirations_path)).await;

        assert!(result.is_err());
        assert!(proxy.received().is_empty());
    }

    #[tokio::test]
    async fn absent_or_empty_table_ends_cleanly() {
        let (dir, proxy, config_path) = proxy_with_config(StatusCode::NO_CONTENT).await;

        let absent = dir.path().join("expirations.json");
        start(cli(config_path.clone(), absent))
            .await
            .expect("Run with absent table");

        let empty = write_expirations(dir.path(), "{}");
        start(cli(config_path.clone(), empty))
            .await
            .expect("Run with empty table");

        let corrupt = write_expirations(dir.path(), "{ not json");
        start(cli(config_path, corrupt))
            .await
            .expect("Run with corrupt table");

        assert!(proxy.received().is_empty());
    }

    #[tokio::test]
    async fn expired_key_is_blocked_with_one_byte() {
        let (dir, proxy, config_path) = proxy_with_config(StatusCode::NO_CONTENT).await;
        let expirations_path = write_expirations(
            dir.path(),
            r#"{"abc": 1000, "later": 9223372036854775807}"#,
        );

        start(cli(config_path, expirations_path))
            .await
            .expect("Run enforcement");

        assert_eq!(
            proxy.received(),
            vec![("abc".to_owned(), json!({ "limit": { "bytes": 1 } }))]
        );
    }

    #[tokio::test]
    async fn failing_proxy_does_not_fail_the_run() {
        let (dir, proxy, config_path) = proxy_with_config(StatusCode::INTERNAL_SERVER_ERROR).await;
        let expirations_path = write_expirations(dir.path(), r#"{"abc": 1000}"#);

        start(cli(config_path, expirations_path))
            .await
            .expect("Run enforcement");

        assert_eq!(proxy.received().len(), 1);
    }

    #[tokio::test]
    async fn dry_run_makes_no_calls() {
        let (dir, proxy, config_path) = proxy_with_config(StatusCode::NO_CONTENT).await;
        let expirations_path = write_expirations(dir.path(), r#"{"abc": 1000}"#);

        let mut cli = cli(config_path, expirations_path);
        cli.dry_run = true;

        start(cli).await.expect("Run enforcement");

        assert!(proxy.received().is_empty());
    }
}

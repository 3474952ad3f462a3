use std::sync::{Arc, OnceLock};

use axum::Router;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("PRACTICUM_TOKEN", "practicum-token");
    std::env::set_var("TELEGRAM_TOKEN", "telegram-token");
    std::env::set_var("TELEGRAM_CHAT_ID", "100500");
    std::env::remove_var("PRACTICUM_ENDPOINT");
    std::env::remove_var("TELEGRAM_API_BASE");
    std::env::remove_var("RETRY_PERIOD_SECONDS");
    std::env::remove_var("HTTP_TIMEOUT_SECONDS");
    std::env::remove_var("BOT_LOG_LEVEL");
    std::env::remove_var("BOT_LOG_JSON");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
    std::env::remove_var("PROMETHEUS_ADDR");
}

/// Serves `app` on an ephemeral local port and returns its base url.
pub(crate) async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
    let addr = listener.local_addr().expect("test server addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}

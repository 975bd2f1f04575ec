//! Liveness endpoint for process supervisors
//!
//! Answers `/healthz` with `200 ok` for as long as the process is up. It
//! knows nothing about update outcomes and shares no state with the
//! scheduler.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::any;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Path of the liveness probe
pub const HEALTH_PATH: &str = "/healthz";

/// Router serving the liveness probe
pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, any(healthz))
}

async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Serve the liveness probe on an already bound listener
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, router()).await
}

/// Start the liveness server on `0.0.0.0:port` in its own task
///
/// Bind and serve failures are logged and end the task; they never take
/// the update loop down with them.
pub fn spawn(port: u16) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        info!(%addr, "Health check server starting");

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(%addr, error = %e, "Health check server failed to bind");
                return;
            }
        };

        if let Err(e) = serve(listener).await {
            error!(error = %e, "Health check server failed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn start_health_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener));
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let base = start_health_server().await;

        let response = reqwest::get(format!("{}{}", base, HEALTH_PATH)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn healthz_accepts_any_method() {
        let base = start_health_server().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}{}", base, HEALTH_PATH))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let response = client
            .head(format!("{}{}", base, HEALTH_PATH))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let base = start_health_server().await;

        let response = reqwest::get(format!("{}/status", base)).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn bind_failure_is_not_fatal() {
        let taken = TcpListener::bind("0.0.0.0:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let handle = spawn(port);
        let result = handle.await;

        assert!(result.is_ok(), "task ends quietly instead of panicking");
        drop(taken);
    }
}

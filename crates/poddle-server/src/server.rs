//! TCP listener serving the HTTP routes.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerSettings;
use crate::error::ServerResult;
use crate::routes::router;
use crate::service::EposNowService;

/// Bound HTTP server, ready to run.
pub struct HttpServer {
    listener: TcpListener,
    router: Router,
}

impl HttpServer {
    /// Binds the listener described by `settings`.
    ///
    /// Port `0` picks a free port; see [`HttpServer::local_addr`].
    pub async fn bind(settings: &ServerSettings, service: EposNowService) -> ServerResult<Self> {
        let listener = TcpListener::bind((settings.bind_address.as_str(), settings.port)).await?;
        Ok(Self {
            listener,
            router: router(service),
        })
    }

    /// Returns the address the server is listening on.
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` completes, then drains in-flight
    /// requests.
    pub async fn run<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.local_addr()?, "HTTP server listening");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use poddle_providers::eposnow::{EposNowProvider, ProviderConfig};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn service() -> EposNowService {
        let config = ProviderConfig::new("client", "secret", "pkg", "https://app.example.com/cb")
            .with_timeout(Duration::from_secs(1));
        EposNowService::new(EposNowProvider::new(config).unwrap())
    }

    #[tokio::test]
    async fn serves_health_and_shuts_down() {
        let settings = ServerSettings {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
        };
        let server = HttpServer::bind(&settings, service()).await.unwrap();
        let addr = server.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run(async move {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains(r#"{"status":"ok"}"#));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn bind_conflict_is_an_error() {
        let first = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let settings = ServerSettings {
            bind_address: "127.0.0.1".to_string(),
            port: first.local_addr().unwrap().port(),
        };
        assert!(HttpServer::bind(&settings, service()).await.is_err());
    }
}

//! Shared fixtures for gateway tests: an in-process stub backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;

use crate::config::GatewayConfig;
use crate::gateway::SessionGateway;
use crate::storage::MemoryStorage;

/// Stub backend bound to an ephemeral localhost port.
pub struct StubBackend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubBackend {
    pub async fn spawn(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = router.layer(middleware::from_fn_with_state(hits.clone(), count_hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), hits }
    }

    /// Number of requests the stub has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Arc<AtomicUsize>>, request: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

/// URL of a port nothing listens on, for transport-failure cases.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn gateway(base_url: &str, storage: &Arc<MemoryStorage>) -> SessionGateway {
    let config = GatewayConfig::new(base_url).unwrap();
    SessionGateway::new(&config, storage.clone()).unwrap()
}

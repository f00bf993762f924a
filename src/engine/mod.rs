mod route_api;

use tokio::sync::RwLock;

use crate::entities::Route;

/// In-memory route store backing the reference server.
///
/// Routes are kept in creation order, which is the order `get_routes` returns.
#[derive(Default)]
pub struct Engine {
    routes: RwLock<Vec<Route>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new")]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self {
            routes: RwLock::new(routes),
        }
    }

    pub async fn len(&self) -> usize {
        self.routes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.routes.read().await.is_empty()
    }
}

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Route, RoutePatch};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    /// Persists a new route; any `id` on the input is ignored.
    async fn create_route(&self, route: Route) -> Result<Route, Error>;
    async fn get_routes(&self) -> Result<Vec<Route>, Error>;
    async fn update_route(&self, id: &str, patch: RoutePatch) -> Result<Route, Error>;
    async fn delete_route(&self, id: &str) -> Result<(), Error>;
}

pub type DynAPI = Arc<dyn RouteAPI + Send + Sync>;

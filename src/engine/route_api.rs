use super::Engine;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    entities::{Route, RoutePatch},
    error::{not_found_error, Error},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self, route))]
    async fn create_route(&self, route: Route) -> Result<Route, Error> {
        let mut route = route;
        route.id = Some(Uuid::new_v4().to_string());
        if route.created_at.is_none() {
            route.created_at = Some(Utc::now().to_rfc3339());
        }

        self.routes.write().await.push(route.clone());

        tracing::info!("created route with id: {:?}", &route.id);

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn get_routes(&self) -> Result<Vec<Route>, Error> {
        Ok(self.routes.read().await.clone())
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_route(&self, id: &str, patch: RoutePatch) -> Result<Route, Error> {
        let mut routes = self.routes.write().await;

        let route = routes
            .iter_mut()
            .find(|route| route.id.as_deref() == Some(id))
            .ok_or_else(|| not_found_error())?;

        if !route.apply(&patch) {
            tracing::debug!("patch left route unchanged");
        }

        Ok(route.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, id: &str) -> Result<(), Error> {
        let mut routes = self.routes.write().await;

        let index = routes
            .iter()
            .position(|route| route.id.as_deref() == Some(id))
            .ok_or_else(|| not_found_error())?;
        routes.remove(index);

        Ok(())
    }
}

#[cfg(test)]
fn sample_route(title: &str) -> Route {
    use crate::entities::{RoutePoint, RouteType};

    let mut route = Route::new(title, RouteType::Nature);
    route.points = vec![
        RoutePoint::new(41.04, 29.03, "Ortakoy".into(), 0),
        RoutePoint::new(41.08, 29.04, "Bebek".into(), 1),
    ];
    route
}

#[test]
fn create_assigns_id_test() {
    use tokio_test::block_on;

    let engine = Engine::new();

    let mut draft = sample_route("Bosphorus");
    draft.id = Some("client-supplied".into());
    let created = block_on(engine.create_route(draft)).unwrap();

    assert!(created.id.is_some());
    assert_ne!(created.id.as_deref(), Some("client-supplied"));
    assert!(created.created_at.is_some());

    let routes = block_on(engine.get_routes()).unwrap();
    assert_eq!(routes, vec![created]);
}

#[test]
fn list_preserves_creation_order_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    for title in ["first", "second", "third"] {
        block_on(engine.create_route(sample_route(title))).unwrap();
    }

    let titles: Vec<String> = block_on(engine.get_routes())
        .unwrap()
        .into_iter()
        .map(|route| route.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn update_and_delete_unknown_test() {
    use tokio_test::block_on;

    let engine = Engine::new();

    let result = block_on(engine.update_route("missing", RoutePatch::favorite(true)));
    assert!(matches!(result, Err(Error::NotFound)));

    let result = block_on(engine.delete_route("missing"));
    assert!(matches!(result, Err(Error::NotFound)));
}

#[test]
fn delete_twice_test() {
    use tokio_test::block_on;

    let engine = Engine::new();
    let created = block_on(engine.create_route(sample_route("Bosphorus"))).unwrap();
    let id = created.id.unwrap();

    block_on(engine.delete_route(&id)).unwrap();
    assert_eq!(block_on(engine.len()), 0);
    assert!(matches!(
        block_on(engine.delete_route(&id)),
        Err(Error::NotFound)
    ));
}

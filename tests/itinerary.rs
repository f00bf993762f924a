mod common;

use std::sync::Arc;

use async_trait::async_trait;

use common::{city_walk, point, spawn_engine};
use routebook::api::{DynAPI, RouteAPI};
use routebook::engine::Engine;
use routebook::entities::{Route, RouteDraft, RoutePatch, RouteType, Tag};
use routebook::error::Error;
use routebook::itinerary::{Itinerary, RouteFilter, SortOption};

fn route(title: &str, route_type: RouteType) -> Route {
    let mut route = Route::new(title, route_type);
    route.points = vec![
        point("start", 41.0, 28.9, 0),
        point("end", 41.1, 29.0, 1),
    ];
    route
}

/// Lists whatever it was seeded with and rejects every mutation.
struct ReadOnlyAPI {
    routes: Vec<Route>,
}

#[async_trait]
impl RouteAPI for ReadOnlyAPI {
    async fn create_route(&self, _: Route) -> Result<Route, Error> {
        Err(Error::Timeout)
    }

    async fn get_routes(&self) -> Result<Vec<Route>, Error> {
        Ok(self.routes.clone())
    }

    async fn update_route(&self, _: &str, _: RoutePatch) -> Result<Route, Error> {
        Err(Error::Network("connection reset".into()))
    }

    async fn delete_route(&self, _: &str) -> Result<(), Error> {
        Err(Error::Http {
            status: 500,
            body: None,
        })
    }
}

#[tokio::test]
async fn draft_to_favorite_over_http_test() {
    let (client, _) = spawn_engine();
    let mut itinerary = Itinerary::new(Arc::new(client));

    let mut draft = RouteDraft::new();
    draft.set_title("City Walk");
    draft.set_type(RouteType::Historical);
    draft.set_cover_photo(Some("file:///photos/cover.jpg".into()));
    draft.add_point(41.0086, 28.9802);
    draft.add_point(41.0115, 28.9834);
    draft.toggle_tag(Tag::Free);

    let id = itinerary
        .save(draft.finish(false).unwrap())
        .await
        .unwrap()
        .id
        .clone()
        .unwrap();

    let saved = itinerary.find(&id).unwrap();
    assert_eq!(saved.cover_photo.as_deref(), Some("file:///photos/cover.jpg"));
    assert_eq!(saved.tags.len(), 1);

    assert!(itinerary.toggle_favorite(&id).await.unwrap());
    assert!(itinerary.find(&id).unwrap().is_favorite);

    itinerary.refresh().await.unwrap();
    assert!(itinerary.find(&id).unwrap().is_favorite);

    assert!(!itinerary.toggle_favorite(&id).await.unwrap());
    itinerary.delete(&id).await.unwrap();
    assert!(itinerary.routes().is_empty());

    itinerary.refresh().await.unwrap();
    assert!(itinerary.routes().is_empty());
}

#[tokio::test]
async fn save_sorts_points_test() {
    let engine = Arc::new(Engine::new());
    let mut itinerary = Itinerary::new(engine.clone());

    let mut route = city_walk();
    route.points.reverse();
    let saved = itinerary.save(route).await.unwrap();

    let orders: Vec<u32> = saved.points.iter().map(|p| p.order).collect();
    assert_eq!(orders, vec![0, 1]);
}

#[tokio::test]
async fn failed_mutations_leave_local_state_test() {
    let mut seeded = route("Bosphorus", RouteType::Nature);
    seeded.id = Some("1".into());
    let api: DynAPI = Arc::new(ReadOnlyAPI {
        routes: vec![seeded.clone()],
    });
    let mut itinerary = Itinerary::new(api);
    itinerary.refresh().await.unwrap();

    let err = itinerary.toggle_favorite("1").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert!(!itinerary.find("1").unwrap().is_favorite);

    let err = itinerary.delete("1").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(itinerary.routes(), &[seeded]);

    let err = itinerary.save(route("New", RouteType::Food)).await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(itinerary.routes().len(), 1);
}

#[tokio::test]
async fn toggle_unknown_route_test() {
    let mut itinerary = Itinerary::new(Arc::new(Engine::new()));

    let err = itinerary.toggle_favorite("nope").await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn view_filter_and_sort_test() {
    let mut walk = route("istanbul old town", RouteType::Historical);
    walk.created_at = Some("2024-01-15".into());
    walk.rating = Some(4.8);
    walk.duration = Some("4 hours".into());

    let mut cruise = route("Bosphorus", RouteType::Nature);
    cruise.created_at = Some("2024-01-12T10:00:00Z".into());
    cruise.rating = Some(4.5);
    cruise.duration = Some("3 hours".into());

    let mut market = route("Grand Bazaar", RouteType::Shopping);
    market.created_at = None;
    market.rating = None;
    market.duration = Some("2 hours".into());

    let engine = Engine::with_routes(vec![walk, cruise, market]);
    let mut itinerary = Itinerary::new(Arc::new(engine));
    itinerary.refresh().await.unwrap();

    let titles = |sort| -> Vec<String> {
        itinerary
            .view(RouteFilter::All, sort)
            .into_iter()
            .map(|route| route.title.clone())
            .collect()
    };

    assert_eq!(
        titles(SortOption::Name),
        vec!["Bosphorus", "Grand Bazaar", "istanbul old town"]
    );
    assert_eq!(
        titles(SortOption::Date),
        vec!["istanbul old town", "Bosphorus", "Grand Bazaar"]
    );
    assert_eq!(
        titles(SortOption::Rating),
        vec!["istanbul old town", "Bosphorus", "Grand Bazaar"]
    );
    assert_eq!(
        titles(SortOption::Duration),
        vec!["Grand Bazaar", "Bosphorus", "istanbul old town"]
    );

    let nature = itinerary.view(RouteFilter::Type(RouteType::Nature), SortOption::default());
    assert_eq!(nature.len(), 1);
    assert_eq!(nature[0].title, "Bosphorus");

    assert!(itinerary
        .view(RouteFilter::Type(RouteType::Food), SortOption::Name)
        .is_empty());
}

use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;

use crate::{
    api::DynAPI,
    entities::{Route, RoutePatch, RouteType},
    error::{invalid_input_error, Error},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RouteFilter {
    #[default]
    All,
    Type(RouteType),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOption {
    Name,
    /// Newest first.
    #[default]
    Date,
    /// Highest first.
    Rating,
    /// Shortest first.
    Duration,
}

/// The caller's local copy of the route list.
///
/// Mutations go to the server first; the local copy only changes once the
/// server has acknowledged them, so a failed request leaves it untouched.
pub struct Itinerary {
    api: DynAPI,
    routes: Vec<Route>,
}

impl Itinerary {
    pub fn new(api: DynAPI) -> Self {
        Self {
            api,
            routes: Vec::new(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn find(&self, id: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.id.as_deref() == Some(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&[Route], Error> {
        self.routes = self.api.get_routes().await?;

        tracing::info!("fetched {} routes", self.routes.len());

        Ok(&self.routes)
    }

    #[tracing::instrument(skip(self, route))]
    pub async fn save(&mut self, route: Route) -> Result<&Route, Error> {
        let mut route = route;
        route.sort_points();

        let created = self.api.create_route(route).await?;
        self.routes.push(created);

        Ok(&self.routes[self.routes.len() - 1])
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool, Error> {
        let current = self
            .find(id)
            .ok_or_else(|| invalid_input_error(format!("unknown route {}", id)))?
            .is_favorite;

        self.set_favorite(id, !current).await?;

        Ok(!current)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_favorite(&mut self, id: &str, is_favorite: bool) -> Result<(), Error> {
        let patch = RoutePatch::favorite(is_favorite);

        self.api.update_route(id, patch.clone()).await?;

        // re-apply the acknowledged mutation instead of adopting the response
        if let Some(route) = self
            .routes
            .iter_mut()
            .find(|route| route.id.as_deref() == Some(id))
        {
            route.apply(&patch);
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> Result<(), Error> {
        self.api.delete_route(id).await?;

        self.routes.retain(|route| route.id.as_deref() != Some(id));

        Ok(())
    }

    pub fn view(&self, filter: RouteFilter, sort: SortOption) -> Vec<&Route> {
        let mut routes: Vec<&Route> = self
            .routes
            .iter()
            .filter(|route| match filter {
                RouteFilter::All => true,
                RouteFilter::Type(route_type) => route.route_type == route_type,
            })
            .collect();

        routes.sort_by(|a, b| compare(a, b, sort));

        routes
    }
}

fn compare(a: &Route, b: &Route, sort: SortOption) -> Ordering {
    match sort {
        SortOption::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOption::Date => {
            let key = |route: &Route| route.created_at.as_deref().and_then(parse_date);
            descending(key(a), key(b))
        }
        SortOption::Rating => descending_by(a.rating, b.rating, |x, y| {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }),
        SortOption::Duration => {
            let key = |route: &Route| route.duration.as_deref().and_then(leading_number);
            ascending(key(a), key(b))
        }
    }
}

fn ascending<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    descending_by(a, b, |x, y| x.cmp(y))
}

fn descending_by<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&b, &a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates, as a UTC timestamp.
fn parse_date(text: &str) -> Option<i64> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.timestamp());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp())
}

/// Leading integer of a display string such as "4 hours" or "90 min".
fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

#[test]
fn parse_date_test() {
    assert_eq!(parse_date("1970-01-02"), Some(86_400));
    assert_eq!(parse_date("1970-01-01T00:01:00Z"), Some(60));
    assert_eq!(parse_date("1970-01-01T02:00:00+02:00"), Some(0));
    assert_eq!(parse_date("yesterday"), None);
}

#[test]
fn leading_number_test() {
    assert_eq!(leading_number("4 hours"), Some(4));
    assert_eq!(leading_number(" 90min"), Some(90));
    assert_eq!(leading_number("about 3"), None);
}

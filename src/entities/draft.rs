use std::collections::BTreeSet;

use crate::entities::point::is_minutes;
use crate::entities::{Route, RoutePoint, RouteType, Tag};
use crate::error::{invalid_input_error, Error};

pub const MIN_POINTS: usize = 2;

/// Route being composed on the caller's side, before it is submitted.
#[derive(Clone, Debug, Default)]
pub struct RouteDraft {
    pub title: String,
    pub route_type: RouteType,
    pub points: Vec<RoutePoint>,
    pub tags: BTreeSet<Tag>,
    pub cover_photo: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PointUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl RouteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_type(&mut self, route_type: RouteType) {
        self.route_type = route_type;
    }

    pub fn set_cover_photo(&mut self, uri: Option<String>) {
        self.cover_photo = uri;
    }

    pub fn add_point(&mut self, latitude: f64, longitude: f64) -> &RoutePoint {
        // one past the highest order so removals never produce duplicates
        let order = self
            .points
            .iter()
            .map(|point| point.order + 1)
            .max()
            .unwrap_or(0);
        let title = format!("Point {}", self.points.len() + 1);

        self.points.push(RoutePoint::new(latitude, longitude, title, order));
        &self.points[self.points.len() - 1]
    }

    pub fn update_point(&mut self, id: &str, update: PointUpdate) -> Result<&RoutePoint, Error> {
        if let Some(duration) = &update.duration {
            if !is_minutes(duration) {
                return Err(invalid_input_error("duration must be digits only"));
            }
        }

        let point = self
            .points
            .iter_mut()
            .find(|point| point.id == id)
            .ok_or_else(|| invalid_input_error(format!("unknown point {}", id)))?;

        if let Some(title) = update.title {
            point.title = title;
        }
        if let Some(description) = update.description {
            point.description = description;
        }
        if let Some(duration) = update.duration {
            point.duration = duration;
        }

        Ok(point)
    }

    pub fn remove_point(&mut self, id: &str) -> bool {
        let before = self.points.len();
        self.points.retain(|point| point.id != id);
        self.points.len() != before
    }

    /// Adds the tag if absent, removes it if present. Returns whether it is now set.
    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        if self.tags.remove(&tag) {
            false
        } else {
            self.tags.insert(tag);
            true
        }
    }

    pub fn finish(mut self, as_draft: bool) -> Result<Route, Error> {
        if !as_draft {
            if self.title.trim().is_empty() {
                return Err(invalid_input_error("route title is required"));
            }
            if self.points.len() < MIN_POINTS {
                return Err(invalid_input_error(format!(
                    "a route needs at least {} points",
                    MIN_POINTS
                )));
            }
        }

        self.points.sort_by_key(|point| point.order);

        let mut route = Route::new(self.title, self.route_type);
        route.points = self.points;
        route.tags = self.tags;
        route.cover_photo = self.cover_photo;
        route.is_draft = as_draft;

        Ok(route)
    }
}

#[test]
fn add_point_defaults_test() {
    let mut draft = RouteDraft::new();

    let first = draft.add_point(41.0, 28.9).clone();
    let second = draft.add_point(41.1, 29.0).clone();

    assert_eq!(first.title, "Point 1");
    assert_eq!(second.title, "Point 2");
    assert_eq!(first.duration, "30");
    assert_eq!((first.order, second.order), (0, 1));
    assert_ne!(first.id, second.id);
}

#[test]
fn orders_stay_unique_after_removal_test() {
    let mut draft = RouteDraft::new();
    let first = draft.add_point(41.0, 28.9).id.clone();
    draft.add_point(41.1, 29.0);

    assert!(draft.remove_point(&first));
    assert!(!draft.remove_point(&first));

    let third = draft.add_point(41.2, 29.1).clone();
    assert_eq!(third.order, 2);

    let orders: BTreeSet<u32> = draft.points.iter().map(|p| p.order).collect();
    assert_eq!(orders.len(), draft.points.len());
}

#[test]
fn update_point_test() {
    let mut draft = RouteDraft::new();
    let id = draft.add_point(41.0, 28.9).id.clone();

    let update = PointUpdate {
        title: Some("Galata Tower".into()),
        duration: Some("45".into()),
        ..Default::default()
    };
    let point = draft.update_point(&id, update).unwrap();
    assert_eq!(point.title, "Galata Tower");
    assert_eq!(point.duration, "45");

    let bad = PointUpdate {
        duration: Some("an hour".into()),
        ..Default::default()
    };
    assert!(matches!(
        draft.update_point(&id, bad),
        Err(Error::InvalidInput(_))
    ));
    assert!(draft.update_point("missing", PointUpdate::default()).is_err());
}

#[test]
fn toggle_tag_test() {
    let mut draft = RouteDraft::new();

    assert!(draft.toggle_tag(Tag::Wifi));
    assert!(draft.toggle_tag(Tag::Free));
    assert!(!draft.toggle_tag(Tag::Wifi));

    assert_eq!(draft.tags.iter().copied().collect::<Vec<_>>(), vec![Tag::Free]);
}

#[test]
fn finish_validation_test() {
    let mut draft = RouteDraft::new();
    draft.add_point(41.0, 28.9);

    assert!(draft.clone().finish(false).is_err());

    let route = draft.clone().finish(true).unwrap();
    assert!(route.is_draft);
    assert_eq!(route.id, None);

    draft.set_title("   ");
    draft.add_point(41.1, 29.0);
    assert!(draft.clone().finish(false).is_err());

    draft.set_title("City Walk");
    let route = draft.finish(false).unwrap();
    assert!(!route.is_draft);
    assert_eq!(route.points.len(), 2);
}

#[test]
fn finish_sorts_points_test() {
    let mut draft = RouteDraft::new();
    draft.set_title("Reordered");
    draft.add_point(41.0, 28.9);
    draft.add_point(41.1, 29.0);
    draft.points.swap(0, 1);

    let route = draft.finish(false).unwrap();
    let orders: Vec<u32> = route.points.iter().map(|p| p.order).collect();
    assert_eq!(orders, vec![0, 1]);
}

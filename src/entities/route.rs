use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::{RoutePoint, RouteType, Tag};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    #[serde(default)]
    pub points: Vec<RoutePoint>,
    /// Unknown tag names are dropped on decode so one bad tag cannot fail a listing.
    #[serde(default, deserialize_with = "crate::entities::tag::deserialize_known_tags")]
    pub tags: BTreeSet<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
    #[serde(default)]
    pub is_draft: bool,
}

/// Fields to change on an existing route. Absent fields are left untouched.
///
/// An optional field cannot be cleared: `null` reads the same as absent, so
/// `{"coverPhoto": null}` keeps the stored photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub route_type: Option<RouteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<RoutePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

impl RoutePatch {
    pub fn favorite(is_favorite: bool) -> Self {
        RoutePatch {
            is_favorite: Some(is_favorite),
            ..Default::default()
        }
    }
}

impl Route {
    pub fn new(title: impl Into<String>, route_type: RouteType) -> Self {
        Route {
            title: title.into(),
            route_type,
            ..Default::default()
        }
    }

    pub fn sort_points(&mut self) {
        self.points.sort_by_key(|point| point.order);
    }

    /// Returns true when the patch changed anything.
    pub fn apply(&mut self, patch: &RoutePatch) -> bool {
        let before = self.clone();

        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(route_type) = patch.route_type {
            self.route_type = route_type;
        }
        if let Some(points) = &patch.points {
            self.points = points.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(cover_photo) = &patch.cover_photo {
            self.cover_photo = Some(cover_photo.clone());
        }
        if let Some(duration) = &patch.duration {
            self.duration = Some(duration.clone());
        }
        if let Some(distance) = &patch.distance {
            self.distance = Some(distance.clone());
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        if let Some(last_visited) = &patch.last_visited {
            self.last_visited = Some(last_visited.clone());
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(visit_count) = patch.visit_count {
            self.visit_count = Some(visit_count);
        }
        if let Some(is_draft) = patch.is_draft {
            self.is_draft = is_draft;
        }

        *self != before
    }

    pub fn share_message(&self) -> String {
        let mut points: Vec<&RoutePoint> = self.points.iter().collect();
        points.sort_by_key(|point| point.order);

        let stops = points
            .iter()
            .map(|point| format!("- {}", point.title))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nStops on this route:\n{}\n\nTotal distance: {}\nDuration: {}",
            self.title,
            stops,
            self.distance.as_deref().unwrap_or("-"),
            self.duration.as_deref().unwrap_or("-"),
        )
    }
}

#[cfg(test)]
fn point(title: &str, order: u32) -> RoutePoint {
    RoutePoint::new(41.0, 29.0, title.into(), order)
}

#[test]
fn wire_format_test() {
    use serde_json::json;

    let mut route = Route::new("City Walk", RouteType::Historical);
    route.tags.insert(Tag::Free);
    route.points.push(point("Hagia Sophia", 0));

    let encoded = serde_json::to_value(&route).unwrap();

    assert_eq!(encoded["title"], json!("City Walk"));
    assert_eq!(encoded["type"], json!("historical"));
    assert_eq!(encoded["tags"], json!(["free"]));
    assert_eq!(encoded["isFavorite"], json!(false));
    assert_eq!(encoded["isDraft"], json!(false));
    assert!(encoded.get("id").is_none());
    assert!(encoded.get("coverPhoto").is_none());
}

#[test]
fn decode_server_representation_test() {
    let body = r#"{
        "id": "42",
        "title": "Bosphorus Tour",
        "type": "nature",
        "points": [
            {"id": "a", "latitude": 41.04, "longitude": 29.03, "title": "Ortakoy", "description": "", "duration": "30", "order": 0},
            {"id": "b", "latitude": 41.08, "longitude": 29.04, "title": "Bebek", "duration": "45", "order": 1}
        ],
        "tags": ["wifi", "family", "wifi"],
        "rating": 4.5,
        "createdAt": "2024-01-12",
        "isFavorite": true,
        "visitCount": 1
    }"#;

    let route: Route = serde_json::from_str(body).unwrap();

    assert_eq!(route.id.as_deref(), Some("42"));
    assert_eq!(route.route_type, RouteType::Nature);
    assert_eq!(route.points.len(), 2);
    assert_eq!(route.points[1].description, "");
    assert_eq!(route.tags.len(), 2);
    assert!(route.tags.contains(&Tag::Family));
    assert!(route.is_favorite);
    assert_eq!(route.visit_count, Some(1));
    assert_eq!(route.cover_photo, None);
}

#[test]
fn apply_patch_test() {
    let mut route = Route::new("City Walk", RouteType::Food);

    assert!(route.apply(&RoutePatch::favorite(true)));
    assert!(route.is_favorite);
    assert_eq!(route.title, "City Walk");

    assert!(!route.apply(&RoutePatch::favorite(true)));

    let patch = RoutePatch {
        title: Some("Street Food".into()),
        rating: Some(4.0),
        ..Default::default()
    };
    assert!(route.apply(&patch));
    assert_eq!(route.title, "Street Food");
    assert_eq!(route.rating, Some(4.0));
    assert!(route.is_favorite);
}

#[test]
fn patch_serializes_changed_fields_only_test() {
    let encoded = serde_json::to_value(RoutePatch::favorite(true)).unwrap();
    assert_eq!(encoded, serde_json::json!({ "isFavorite": true }));
}

#[test]
fn share_message_test() {
    let mut route = Route::new("Old Town", RouteType::Historical);
    route.points = vec![point("Palace", 1), point("Mosque", 0)];
    route.distance = Some("5.2 km".into());

    let message = route.share_message();

    assert!(message.starts_with("Old Town\n"));
    assert!(message.contains("- Mosque\n- Palace"));
    assert!(message.contains("Total distance: 5.2 km"));
    assert!(message.ends_with("Duration: -"));
}

#[test]
fn unknown_tags_are_dropped_test() {
    let body = r#"{"title": "Market", "type": "food", "tags": ["free", "rooftop", "wifi"]}"#;

    let route: Route = serde_json::from_str(body).unwrap();

    assert_eq!(
        route.tags.into_iter().collect::<Vec<_>>(),
        vec![Tag::Free, Tag::Wifi]
    );
}

#[test]
fn null_patch_field_keeps_value_test() {
    let mut route = Route::new("City Walk", RouteType::Historical);
    route.cover_photo = Some("file:///cover.jpg".into());

    let patch: RoutePatch = serde_json::from_str(r#"{"coverPhoto": null}"#).unwrap();

    assert_eq!(patch, RoutePatch::default());
    assert!(!route.apply(&patch));
    assert_eq!(route.cover_photo.as_deref(), Some("file:///cover.jpg"));
}

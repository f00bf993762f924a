use geo_types::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DWELL_MINUTES: &str = "30";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Planned dwell time in minutes, digits only.
    pub duration: String,
    pub order: u32,
}

impl RoutePoint {
    pub fn new(latitude: f64, longitude: f64, title: String, order: u32) -> Self {
        RoutePoint {
            id: Uuid::new_v4().to_string(),
            latitude,
            longitude,
            title,
            description: String::new(),
            duration: DEFAULT_DWELL_MINUTES.into(),
            order,
        }
    }

    pub fn minutes(&self) -> Option<u32> {
        if is_minutes(&self.duration) {
            self.duration.parse().ok()
        } else {
            None
        }
    }
}

impl From<&RoutePoint> for Point<f64> {
    fn from(point: &RoutePoint) -> Self {
        Point::new(point.longitude, point.latitude)
    }
}

pub fn is_minutes(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

#[test]
fn new_point_defaults_test() {
    let point = RoutePoint::new(41.0, 29.0, "Point 1".into(), 0);

    assert_eq!(point.description, "");
    assert_eq!(point.minutes(), Some(30));
    assert_eq!(point.order, 0);
    assert!(!point.id.is_empty());

    let geo: Point<f64> = (&point).into();
    assert_eq!(geo.x(), 29.0);
    assert_eq!(geo.y(), 41.0);
}

#[test]
fn minutes_rejects_non_digits_test() {
    assert!(is_minutes("45"));
    assert!(!is_minutes(""));
    assert!(!is_minutes("4h"));
    assert!(!is_minutes("-5"));
}

use geo_types::{coord, Point, Rect};

use crate::entities::RoutePoint;

pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0421;

const PADDING: f64 = 1.5;

/// Visible map area: a centre plus the span shown around it, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapRegion {
    fn default() -> Self {
        Self {
            latitude: 41.0256,
            longitude: 28.9744,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }
}

impl MapRegion {
    /// Centres on the mean coordinate of `points` and widens the span to fit
    /// them all. Returns `None` for an empty slice.
    pub fn around(points: &[RoutePoint]) -> Option<Self> {
        let first: Point<f64> = points.first()?.into();

        let mut bounds = Rect::new(first.0, first.0);
        let mut sum = coord! { x: 0.0, y: 0.0 };

        for point in points {
            let point: Point<f64> = point.into();
            sum = sum + point.0;
            bounds = Rect::new(
                coord! { x: bounds.min().x.min(point.x()), y: bounds.min().y.min(point.y()) },
                coord! { x: bounds.max().x.max(point.x()), y: bounds.max().y.max(point.y()) },
            );
        }

        let n = points.len() as f64;

        Some(Self {
            latitude: sum.y / n,
            longitude: sum.x / n,
            latitude_delta: (bounds.height() * PADDING).max(DEFAULT_LATITUDE_DELTA),
            longitude_delta: (bounds.width() * PADDING).max(DEFAULT_LONGITUDE_DELTA),
        })
    }
}

#[cfg(test)]
fn at(latitude: f64, longitude: f64) -> RoutePoint {
    RoutePoint::new(latitude, longitude, String::new(), 0)
}

#[test]
fn empty_points_test() {
    assert_eq!(MapRegion::around(&[]), None);
}

#[test]
fn single_point_uses_default_span_test() {
    let region = MapRegion::around(&[at(41.0, 29.0)]).unwrap();

    assert_eq!(region.latitude, 41.0);
    assert_eq!(region.longitude, 29.0);
    assert_eq!(region.latitude_delta, DEFAULT_LATITUDE_DELTA);
    assert_eq!(region.longitude_delta, DEFAULT_LONGITUDE_DELTA);
}

#[test]
fn centre_is_mean_test() {
    let points = [at(40.0, 28.0), at(41.0, 29.0), at(42.0, 33.0)];
    let region = MapRegion::around(&points).unwrap();

    assert!((region.latitude - 41.0).abs() < 1e-9);
    assert!((region.longitude - 30.0).abs() < 1e-9);
    assert!((region.latitude_delta - 3.0).abs() < 1e-9);
    assert!((region.longitude_delta - 7.5).abs() < 1e-9);
}

mod draft;
mod point;
mod route;
mod tag;

pub use draft::{PointUpdate, RouteDraft, MIN_POINTS};
pub use point::{RoutePoint, DEFAULT_DWELL_MINUTES};
pub use route::{Route, RoutePatch};
pub use tag::{RouteType, Tag};

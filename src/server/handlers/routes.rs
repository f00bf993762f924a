use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;

use crate::api::DynAPI;
use crate::entities::{Route, RoutePatch};
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(route): Json<Route>,
) -> Result<(StatusCode, Json<Route>), Error> {
    let route = api.create_route(route).await?;

    Ok((StatusCode::CREATED, route.into()))
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Route>>, Error> {
    let routes = api.get_routes().await?;

    Ok(routes.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(patch): Json<RoutePatch>,
) -> Result<Json<Route>, Error> {
    let route = api.update_route(&id, patch).await?;

    Ok(route.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    api.delete_route(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

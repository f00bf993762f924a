mod handlers;

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch},
    Router,
};

use crate::api::{DynAPI, RouteAPI};
use crate::error::Error;
use crate::server::handlers::routes;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/api/routes", get(routes::list).post(routes::create))
        .route(
            "/api/routes/:id",
            patch(routes::update).delete(routes::delete),
        )
        .layer(Extension(api))
}

pub async fn serve<T: RouteAPI + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
) -> Result<(), Error> {
    let listener = TcpListener::bind(addr).map_err(|err| Error::Server(err.to_string()))?;

    serve_listener(Arc::new(api), listener).await
}

/// Serves on an already bound listener, e.g. one bound to port 0.
pub async fn serve_listener(api: DynAPI, listener: TcpListener) -> Result<(), Error> {
    let addr = listener
        .local_addr()
        .map_err(|err| Error::Server(err.to_string()))?;

    tracing::info!("listening on {}", addr);

    axum::Server::from_tcp(listener)
        .map_err(|err| Error::Server(err.to_string()))?
        .serve(router(api).into_make_service())
        .await
        .map_err(|err| Error::Server(err.to_string()))
}

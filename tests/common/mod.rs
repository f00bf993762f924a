#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use routebook::api::DynAPI;
use routebook::client::{Hooks, NoopHooks, RouteClient};
use routebook::config::ClientConfig;
use routebook::engine::Engine;
use routebook::entities::{Route, RoutePoint, RouteType, Tag};
use routebook::error::Error;
use routebook::server::serve_listener;

fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    (listener, addr)
}

/// Runs the reference server over a fresh engine and returns a client for it.
pub fn spawn_engine() -> (RouteClient, Arc<Engine>) {
    let engine = Arc::new(Engine::new());
    let (listener, addr) = bind();

    let api: DynAPI = engine.clone();
    tokio::spawn(serve_listener(api, listener));

    (client_for(addr, Duration::from_secs(30)), engine)
}

/// Runs an arbitrary router, for servers that misbehave on purpose.
pub fn spawn_router(router: Router, timeout: Duration) -> RouteClient {
    let (listener, addr) = bind();

    let server = axum::Server::from_tcp(listener)
        .expect("listener should be usable")
        .serve(router.into_make_service());
    tokio::spawn(server);

    client_for(addr, timeout)
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> RouteClient {
    let (listener, addr) = bind();
    drop(listener);

    client_for(addr, Duration::from_secs(5))
}

pub fn client_for(addr: SocketAddr, timeout: Duration) -> RouteClient {
    let config = ClientConfig::new(&format!("http://{}/api", addr))
        .expect("base url should parse")
        .with_timeout(timeout);

    RouteClient::new(config)
        .expect("client should build")
        .with_hooks(Arc::new(NoopHooks))
}

pub fn point(title: &str, latitude: f64, longitude: f64, order: u32) -> RoutePoint {
    RoutePoint::new(latitude, longitude, title.into(), order)
}

pub fn city_walk() -> Route {
    let mut route = Route::new("City Walk", RouteType::Historical);
    route.points = vec![
        point("Hagia Sophia", 41.008583, 28.980175, 0),
        point("Topkapi Palace", 41.011481, 28.983379, 1),
    ];
    route.tags.insert(Tag::Free);
    route
}

#[derive(Default)]
pub struct RecordingHooks {
    pub events: Mutex<Vec<String>>,
}

impl RecordingHooks {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Hooks for RecordingHooks {
    fn on_request(&self, method: &Method, url: &Url, _: Option<&Value>) {
        self.push(format!("request {} {}", method, url.path()));
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, _: Option<&Value>) {
        self.push(format!("response {} {} {}", status.as_u16(), method, url.path()));
    }

    fn on_error(&self, method: &Method, url: &Url, err: &Error) {
        self.push(format!("error {} {}: {}", method, url.path(), err.code()));
    }
}

use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::error::Error;

/// Observes every round trip made by a [`RouteClient`](super::RouteClient).
///
/// Hooks only observe: they cannot alter the request or swallow an error.
pub trait Hooks: Send + Sync {
    fn on_request(&self, method: &Method, url: &Url, body: Option<&Value>);
    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body: Option<&Value>);
    fn on_error(&self, method: &Method, url: &Url, err: &Error);
}

/// Logs requests, responses and failures through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHooks;

impl Hooks for TracingHooks {
    fn on_request(&self, method: &Method, url: &Url, body: Option<&Value>) {
        tracing::info!("request: {} {}", method, url);
        if let Some(body) = body {
            tracing::debug!("request data: {}", body);
        }
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body: Option<&Value>) {
        tracing::info!("response: {} {} {}", status.as_u16(), method, url);
        if let Some(body) = body {
            tracing::debug!("response data: {}", body);
        }
    }

    fn on_error(&self, method: &Method, url: &Url, err: &Error) {
        match err {
            Error::Timeout => tracing::error!("request timeout: {} {}", method, url),
            Error::Network(msg) => tracing::error!("network error: {} {}: {}", method, url, msg),
            Error::Http { status, body } => {
                tracing::error!("response error: {} {} {}: {:?}", status, method, url, body)
            }
            _ => tracing::error!("request error: {} {}: {}", method, url, err),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl Hooks for NoopHooks {
    fn on_request(&self, _: &Method, _: &Url, _: Option<&Value>) {}
    fn on_response(&self, _: &Method, _: &Url, _: StatusCode, _: Option<&Value>) {}
    fn on_error(&self, _: &Method, _: &Url, _: &Error) {}
}

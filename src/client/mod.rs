mod hooks;

pub use hooks::{Hooks, NoopHooks, TracingHooks};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    api::RouteAPI,
    config::ClientConfig,
    entities::{Route, RoutePatch},
    error::Error,
};

const ROUTES: &str = "routes";

/// HTTP client for the route collection.
///
/// Each call is a single attempt: no retries, no caching. Failures reach the
/// error hook and are then returned to the caller unchanged.
#[derive(Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    config: ClientConfig,
    hooks: Arc<dyn Hooks>,
}

impl RouteClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            hooks: Arc::new(TracingHooks),
        })
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn Hooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn execute(
        &self,
        method: Method,
        url: &Url,
        body: Option<Value>,
    ) -> Result<Option<Value>, Error> {
        self.hooks.on_request(&method, url, body.as_ref());

        let mut req = self.http.request(method.clone(), url.clone());
        if let Some(body) = &body {
            req = req.json(body);
        }

        let result = async {
            let res = req.send().await?;
            let status = res.status();
            let data = parse_body(&res.text().await?);
            Ok::<_, reqwest::Error>((status, data))
        }
        .await;

        let (status, data) = match result {
            Ok(pair) => pair,
            Err(err) => return Err(self.fail(&method, url, err.into())),
        };

        if !status.is_success() {
            let err = Error::Http {
                status: status.as_u16(),
                body: data,
            };
            return Err(self.fail(&method, url, err));
        }

        self.hooks.on_response(&method, url, status, data.as_ref());

        Ok(data)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &Url,
        data: Option<Value>,
    ) -> Result<T, Error> {
        let result = match data {
            Some(value) => serde_json::from_value(value).map_err(Error::from),
            None => Err(Error::Decode("empty response body".into())),
        };

        result.map_err(|err| self.fail(method, url, err))
    }

    fn fail(&self, method: &Method, url: &Url, err: Error) -> Error {
        self.hooks.on_error(method, url, &err);
        err
    }
}

/// Empty bodies become `None`; bodies that are not JSON are kept as a string.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[async_trait]
impl RouteAPI for RouteClient {
    #[tracing::instrument(skip(self, route))]
    async fn create_route(&self, route: Route) -> Result<Route, Error> {
        let url = self.config.endpoint(&[ROUTES])?;

        let mut route = route;
        route.id = None;
        let body = serde_json::to_value(&route)?;

        let data = self.execute(Method::POST, &url, Some(body)).await?;
        self.decode(&Method::POST, &url, data)
    }

    #[tracing::instrument(skip(self))]
    async fn get_routes(&self) -> Result<Vec<Route>, Error> {
        let url = self.config.endpoint(&[ROUTES])?;

        let data = self.execute(Method::GET, &url, None).await?;
        self.decode(&Method::GET, &url, data)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update_route(&self, id: &str, patch: RoutePatch) -> Result<Route, Error> {
        let url = self.config.endpoint(&[ROUTES, id])?;
        let body = serde_json::to_value(&patch)?;

        let data = self.execute(Method::PATCH, &url, Some(body)).await?;
        self.decode(&Method::PATCH, &url, data)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, id: &str) -> Result<(), Error> {
        let url = self.config.endpoint(&[ROUTES, id])?;

        self.execute(Method::DELETE, &url, None).await?;

        Ok(())
    }
}

#[test]
fn parse_body_test() {
    use serde_json::json;

    assert_eq!(parse_body(""), None);
    assert_eq!(parse_body("  \n"), None);
    assert_eq!(parse_body("{\"a\":1}"), Some(json!({ "a": 1 })));
    assert_eq!(parse_body("Bad Gateway"), Some(json!("Bad Gateway")));
}

use reqwest::Url;
use std::env;
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Static settings of a [`RouteClient`](crate::client::RouteClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url =
            Url::parse(base_url).map_err(|err| Error::Config(format!("{}: {}", base_url, err)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base url", base_url)));
        }

        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `ROUTE_API_BASE_URL` and the optional `ROUTE_API_TIMEOUT_MS`,
    /// loading `.env` first when one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let base_url = env::var("ROUTE_API_BASE_URL")?;
        let config = Self::new(&base_url)?;

        match env::var("ROUTE_API_TIMEOUT_MS") {
            Ok(ms) => {
                let ms: u64 = ms
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| Error::Config(format!("invalid timeout: {}", ms)))?;
                Ok(config.with_timeout(Duration::from_millis(ms)))
            }
            Err(env::VarError::NotPresent) => Ok(config),
            Err(err) => Err(err.into()),
        }
    }

    /// Joins path segments onto the base url, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[test]
fn default_config_test() {
    let config = ClientConfig::default();

    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(
        config.endpoint(&["routes"]).unwrap().as_str(),
        "http://localhost:3000/api/routes"
    );
}

#[test]
fn endpoint_join_test() {
    let config = ClientConfig::new("http://example.com/api/").unwrap();

    assert_eq!(
        config.endpoint(&["routes", "abc"]).unwrap().as_str(),
        "http://example.com/api/routes/abc"
    );
    assert_eq!(
        config.endpoint(&["routes", "a b/c"]).unwrap().as_str(),
        "http://example.com/api/routes/a%20b%2Fc"
    );
}

#[test]
fn invalid_base_url_test() {
    assert!(matches!(
        ClientConfig::new("not a url"),
        Err(Error::Config(_))
    ));
    assert!(ClientConfig::new("mailto:someone@example.com").is_err());
}

#[test]
fn from_env_test() {
    env::set_var("ROUTE_API_BASE_URL", "http://routes.example.com/api");
    env::remove_var("ROUTE_API_TIMEOUT_MS");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url.as_str(), "http://routes.example.com/api");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);

    env::set_var("ROUTE_API_TIMEOUT_MS", "1500");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.timeout, Duration::from_millis(1500));

    for bad in ["soon", "0", "-1"] {
        env::set_var("ROUTE_API_TIMEOUT_MS", bad);
        assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));
    }

    env::remove_var("ROUTE_API_TIMEOUT_MS");
    env::remove_var("ROUTE_API_BASE_URL");
    assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));
}

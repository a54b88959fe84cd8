#![allow(dead_code)]

use cep_temperature::config::{Config, RemoteApiConfig};
use cep_temperature::domain::validators::ValidatorKind;
use cep_temperature::server::build_state;
use cep_temperature::state::AppState;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WEATHER_KEY: &str = "test-weather-key";

/// Location and weather services backing one test.
pub struct Upstreams {
    pub location: MockServer,
    pub weather: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            location: MockServer::start().await,
            weather: MockServer::start().await,
        }
    }

    pub fn config(&self, validator: ValidatorKind) -> Config {
        Config {
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            location_api: RemoteApiConfig {
                base_url: format!("{}/ws", self.location.uri()),
                token: None,
            },
            location_path_suffix: Some("json".to_string()),
            weather_api: RemoteApiConfig {
                base_url: format!("{}/v1", self.weather.uri()),
                token: Some(WEATHER_KEY.to_string()),
            },
            upstream_api: None,
            cep_validator: validator,
            cep_states: Vec::new(),
            http_timeout_seconds: 5,
            otlp: None,
        }
    }

    pub fn state(&self, validator: ValidatorKind) -> AppState {
        build_state(&self.config(validator), CancellationToken::new()).unwrap()
    }

    fn unreachable_config(validator: ValidatorKind) -> Config {
        Config {
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            location_api: RemoteApiConfig {
                base_url: "http://127.0.0.1:9/ws".to_string(),
                token: None,
            },
            location_path_suffix: Some("json".to_string()),
            weather_api: RemoteApiConfig {
                base_url: "http://127.0.0.1:9/v1".to_string(),
                token: None,
            },
            upstream_api: None,
            cep_validator: validator,
            cep_states: Vec::new(),
            http_timeout_seconds: 5,
            otlp: None,
        }
    }

    /// Answers `GET /ws/{cep}/json` with `{"localidade": city}`.
    pub async fn mount_location(&self, cep: &str, city: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/ws/{cep}/json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cep": cep,
                "localidade": city,
            })))
            .mount(&self.location)
            .await;
    }

    /// Answers the current-weather endpoint for `city`.
    pub async fn mount_weather(&self, city: &str, temp_c: f64, temp_f: f64) {
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("key", WEATHER_KEY))
            .and(query_param("q", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": { "temp_c": temp_c, "temp_f": temp_f }
            })))
            .mount(&self.weather)
            .await;
    }

    pub async fn weather_requests(&self) -> usize {
        self.weather.received_requests().await.unwrap_or_default().len()
    }

    pub async fn location_requests(&self) -> usize {
        self.location.received_requests().await.unwrap_or_default().len()
    }
}

pub const UPSTREAM_TOKEN: &str = "test-upstream-token";

/// Upstream temperature service behind a gateway-mode instance.
pub struct Gateway {
    pub upstream: MockServer,
}

impl Gateway {
    pub async fn start() -> Self {
        Self {
            upstream: MockServer::start().await,
        }
    }

    /// Gateway configuration; the local APIs point nowhere and must not be
    /// called.
    pub fn config(&self, validator: ValidatorKind) -> Config {
        let mut config = Upstreams::unreachable_config(validator);
        config.upstream_api = Some(RemoteApiConfig {
            base_url: self.upstream.uri(),
            token: Some(UPSTREAM_TOKEN.to_string()),
        });
        config
    }

    pub fn state(&self, validator: ValidatorKind) -> AppState {
        build_state(&self.config(validator), CancellationToken::new()).unwrap()
    }

    /// Answers `GET /{cep}` with a temperature document.
    pub async fn mount_temperature(&self, cep: &str, city: &str, temp_c: f64, temp_f: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/{cep}")))
            .and(header("Authentication", format!("bearer {UPSTREAM_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": city,
                "temp_C": temp_c,
                "temp_F": temp_f,
                "temp_K": temp_c + 273.15,
            })))
            .mount(&self.upstream)
            .await;
    }

    pub async fn upstream_requests(&self) -> usize {
        self.upstream.received_requests().await.unwrap_or_default().len()
    }
}

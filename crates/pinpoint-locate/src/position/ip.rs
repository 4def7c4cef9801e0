use std::fmt;
use std::time::Duration;

use exn::ResultExt;
use isahc::prelude::*;
use isahc::Request;

use crate::Coordinates;

use super::{LocationError, PositionFuture, PositionSource};

pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors raised while talking to the IP geolocation service.
#[derive(Debug)]
pub struct Error(String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

/// Approximates the device position from its public IP address.
pub struct Backend {
    endpoint: String,
    user_agent: String,
}

impl Backend {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl PositionSource for Backend {
    fn current_position(&self) -> PositionFuture<'_> {
        Box::pin(async move {
            locate(&self.endpoint, &self.user_agent)
                .await
                .map_err(|e| {
                    tracing::warn!(?e, "IP geolocation failed");
                    LocationError::SensorUnavailable
                })
        })
    }
}

#[derive(serde::Deserialize)]
struct LookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

async fn locate(endpoint: &str, user_agent: &str) -> exn::Result<Coordinates, Error> {
    let request = Request::get(endpoint)
        .timeout(REQUEST_TIMEOUT)
        .header("User-Agent", user_agent)
        .header("Accept", "application/json")
        .body(())
        .or_raise(|| Error(format!("build request for {endpoint}")))?;

    let client = isahc::HttpClient::new().or_raise(|| Error("create HTTP client".into()))?;
    let mut response = client
        .send_async(request)
        .await
        .or_raise(|| Error(format!("send request to {endpoint}")))?;

    if !response.status().is_success() {
        exn::bail!(Error(format!(
            "{endpoint} returned status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .or_raise(|| Error("read IP geolocation response".into()))?;
    decode(&body)
}

fn decode(body: &str) -> exn::Result<Coordinates, Error> {
    let response: LookupResponse = serde_json::from_str(body)
        .or_raise(|| Error("decode IP geolocation response".into()))?;

    if response.status != "success" {
        exn::bail!(Error(format!(
            "IP geolocation {}: {}",
            response.status,
            response.message.unwrap_or_default()
        )));
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
        _ => exn::bail!(Error("IP geolocation response without coordinates".into())),
    }
}

use std::time::Duration;

use exn::ResultExt;
use isahc::prelude::*;
use isahc::Request;

use crate::Coordinates;

use super::{Address, Error, Geocoder, ReverseFuture};

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Reverse geocoding against an OpenStreetMap Nominatim instance.
#[derive(Clone)]
pub struct Backend {
    endpoint: String,
    user_agent: String,
}

impl Backend {
    /// `user_agent` is mandatory under the Nominatim usage policy.
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl Geocoder for Backend {
    fn reverse_geocode(&self, coordinates: Coordinates) -> ReverseFuture<'_> {
        Box::pin(reverse_geocode(
            &self.endpoint,
            &self.user_agent,
            coordinates,
        ))
    }
}

#[derive(serde::Deserialize)]
struct ReverseResult {
    address: Option<Address>,
    error: Option<String>,
}

fn request_url(endpoint: &str, coordinates: Coordinates) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}format=json&lat={}&lon={}",
        coordinates.latitude, coordinates.longitude
    )
}

async fn reverse_geocode(
    endpoint: &str,
    user_agent: &str,
    coordinates: Coordinates,
) -> exn::Result<Option<Address>, Error> {
    let url = request_url(endpoint, coordinates);

    let request = Request::get(&url)
        .timeout(REQUEST_TIMEOUT)
        .header("User-Agent", user_agent)
        .header("Accept", "application/json")
        .body(())
        .or_raise(|| Error(format!("build request for {url}")))?;

    let client = isahc::HttpClient::new().or_raise(|| Error("create HTTP client".into()))?;
    let mut response = client
        .send_async(request)
        .await
        .or_raise(|| Error(format!("send request to {url}")))?;

    if !response.status().is_success() {
        exn::bail!(Error(format!(
            "nominatim returned status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .or_raise(|| Error("read reverse geocoding response".into()))?;
    decode(&body)
}

fn decode(body: &str) -> exn::Result<Option<Address>, Error> {
    let result: ReverseResult = serde_json::from_str(body)
        .or_raise(|| Error("decode reverse geocoding response".into()))?;
    if let Some(error) = &result.error {
        tracing::debug!(%error, "nominatim has no result");
    }
    Ok(result.address)
}

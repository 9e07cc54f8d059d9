//! IP-based geolocation lookup.
//!
//! One GET, no timeout, no retry. Callers that want the dashboard semantics
//! use [`GeoLocator::locate`], which never fails and degrades to
//! [`LocationFix::offline`].

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::oneshot;
use url::Url;

use super::{Coordinates, LocationFix};
use crate::error::GeoError;

pub const DEFAULT_LOOKUP_URL: &str = "https://ipapi.co/json/";

const USER_AGENT: &str = "tminus";

/// Shape of the lookup response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

pub struct GeoLocator {
    client: Client,
    endpoint: Url,
}

impl GeoLocator {
    /// Build a locator for `endpoint`.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidEndpoint`] if `endpoint` is not an http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, GeoError> {
        let parsed = Url::parse(endpoint).map_err(|e| GeoError::InvalidEndpoint {
            url: endpoint.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GeoError::InvalidEndpoint {
                url: endpoint.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            client: Client::new(),
            endpoint: parsed,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve the observer location, falling back to the default fix on any
    /// failure.
    pub async fn locate(&self) -> LocationFix {
        match self.try_locate().await {
            Ok(fix) => {
                tracing::info!(label = %fix.label, coordinates = %fix.coordinates, "location resolved");
                fix
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "geolocation failed, using default location");
                LocationFix::offline()
            }
        }
    }

    /// Run [`GeoLocator::locate`] on the current runtime and hand back the
    /// receiving end. The ticker consumes it at most once.
    pub fn spawn(self) -> oneshot::Receiver<LocationFix> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let fix = self.locate().await;
            if tx.send(fix).is_err() {
                tracing::debug!("location receiver dropped before lookup finished");
            }
        });
        rx
    }

    /// Resolve the observer location, surfacing the failure reason.
    pub async fn try_locate(&self) -> Result<LocationFix, GeoError> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeoError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<LocationFix, GeoError> {
    let data: LookupResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Malformed(e.to_string()))?;

    let (Some(latitude), Some(longitude)) = (data.latitude, data.longitude) else {
        return Err(GeoError::Malformed("missing latitude/longitude".into()));
    };
    let coordinates =
        Coordinates::new(latitude, longitude).map_err(|e| GeoError::Malformed(e.to_string()))?;

    Ok(LocationFix::resolved(
        coordinates,
        data.city.as_deref().unwrap_or_default(),
        data.country_code.as_deref().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::NetworkStatus;

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(GeoLocator::new("ftp://example.com/json").is_err());
        assert!(GeoLocator::new("not a url").is_err());
        assert!(GeoLocator::new(DEFAULT_LOOKUP_URL).is_ok());
    }

    #[test]
    fn parses_full_response() {
        let fix = parse_response(
            r#"{"ip":"1.2.3.4","city":"Reykjavik","country_code":"IS","latitude":64.1466,"longitude":-21.9426}"#,
        )
        .unwrap();
        assert_eq!(fix.label, "REYKJAVIK, IS");
        assert_eq!(fix.status, NetworkStatus::Online);
        assert_eq!(fix.coordinates.latitude(), 64.1466);
    }

    #[test]
    fn error_payload_is_malformed() {
        let err = parse_response(r#"{"error": true, "reason": "RateLimited"}"#).unwrap_err();
        assert!(matches!(err, GeoError::Malformed(_)));
    }

    #[test]
    fn out_of_range_coordinates_are_malformed() {
        let err = parse_response(r#"{"latitude": 200.0, "longitude": 0.0}"#).unwrap_err();
        assert!(matches!(err, GeoError::Malformed(_)));
    }
}

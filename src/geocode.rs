// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Reverse geocoding: coordinates to a street address.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{
  config::{Language, Settings},
  error::Error,
  prim::{Coordinates, format_float},
};

/// Looks up the address at a location.
pub trait Geocoder {
  /// `Ok(None)` when the service has no address for `coordinates`.
  fn reverse(&self, coordinates: Coordinates, language: Language) -> Result<Option<String>, Error>;
}

/// OpenStreetMap's Nominatim reverse endpoint.
pub struct Nominatim {
  client:   Client,
  endpoint: String,
}

impl Nominatim {
  pub fn new(settings: &Settings) -> Result<Self, Error> {
    let client = Client::builder()
      .user_agent(&settings.geocoder_user_agent)
      .timeout(Duration::from_secs(settings.geocoder_timeout_secs))
      .build()
      .map_err(|e| Error::GeocodeService(format!("Failed to build HTTP client ({e}).")))?;

    Ok(Self {
      client,
      endpoint: settings.geocoder_endpoint.clone(),
    })
  }
}

impl Geocoder for Nominatim {
  fn reverse(&self, coordinates: Coordinates, language: Language) -> Result<Option<String>, Error> {
    let lat = format_float(coordinates.latitude);
    let lon = format_float(coordinates.longitude);
    log::debug!("Reverse geocoding ({lat}, {lon}) via {}.", self.endpoint);

    let response = self
      .client
      .get(&self.endpoint)
      .query(&[
        ("format", "jsonv2"),
        ("lat", lat.as_str()),
        ("lon", lon.as_str()),
        ("accept-language", language.code()),
      ])
      .send()
      .map_err(|e| Error::GeocodeService(e.to_string()))?;

    if !response.status().is_success() {
      return Err(Error::GeocodeService(format!(
        "HTTP status: {}",
        response.status()
      )));
    }

    let body = response
      .text()
      .map_err(|e| Error::GeocodeService(e.to_string()))?;
    log::trace!("Geocoder response:\n{body}");

    parse_reverse_response(&body)
  }
}

#[derive(Deserialize)]
struct ReverseResponse {
  display_name: Option<String>,
  error:        Option<String>,
}

/// Extracts the address from a `jsonv2` reverse response.
pub fn parse_reverse_response(body: &str) -> Result<Option<String>, Error> {
  let response = serde_json::from_str::<ReverseResponse>(body)
    .map_err(|e| Error::GeocodeService(format!("Unparsable response ({e}).")))?;

  match (response.display_name, response.error) {
    (Some(address), _) if !address.trim().is_empty() => Ok(Some(address)),
    (_, Some(error)) => {
      log::debug!("Geocoder has no result: {error}");
      Ok(None)
    }
    _ => Ok(None),
  }
}

/// Address at `coordinates`, or the localized "not found" sentinel.
pub fn resolve_address(
  geocoder: &dyn Geocoder,
  coordinates: Coordinates,
  language: Language,
) -> Result<String, Error> {
  Ok(
    geocoder
      .reverse(coordinates, language)?
      .unwrap_or_else(|| language.address_not_found().to_string()),
  )
}

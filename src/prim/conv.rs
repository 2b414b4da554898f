// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Coordinate and date conversions, and the map links derived from
//! coordinates.

use chrono::NaiveDate;

use super::format_float;
use crate::config::constants;

/// Converts degrees, minutes and seconds to decimal degrees. All three must be
/// present; zero counts as present.
pub fn to_decimal_degrees(deg: Option<f64>, min: Option<f64>, sec: Option<f64>) -> Option<f64> {
  Some(deg? + (min? / 60.0) + (sec? / 3600.0))
}

/// Signs `magnitude` by its hemisphere marker: `S` and `W` are negative.
pub fn apply_direction(magnitude: f64, direction: Option<&str>) -> f64 {
  match direction.map(str::trim) {
    Some("S" | "s" | "W" | "w") => -magnitude.abs(),
    Some("N" | "n" | "E" | "e") | None => magnitude.abs(),
    Some(other) => {
      log::warn!("Unknown GPS direction `{other}`. Treating as positive.");
      magnitude.abs()
    }
  }
}

/// Converts a colon-separated GPS date (`2023:05:01`) to `2023.05.01`.
/// Unparseable dates keep their text with `:` swapped for `.`.
pub fn format_capture_date(date: &str) -> String {
  match NaiveDate::parse_from_str(date.trim(), "%Y:%m:%d") {
    Ok(d) => d.format("%Y.%m.%d").to_string(),
    Err(e) => {
      log::warn!("Unable to parse GPS date `{date}` ({e}).");
      date.replace(':', ".")
    }
  }
}

/// Latitude and longitude in signed decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

/// Links to the location on three map services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLinks {
  pub google_maps: String,
  pub twogis:      String,
  pub yandex_maps: String,
}

impl MapLinks {
  pub const NAMES: [&'static str; 3] = ["google_maps", "twogis", "yandex_maps"];

  pub fn new(coordinates: Coordinates) -> Self {
    let lat = format_float(coordinates.latitude);
    let lon = format_float(coordinates.longitude);

    Self {
      google_maps: format!("{}{lat},{lon}", constants::URL_GOOGLE_MAPS),
      twogis:      format!("{}{lat}%2C{lon}", constants::URL_TWOGIS),
      yandex_maps: format!(
        "{}&sll={lon}%2C{lat}&text={lat}%2C{lon}&z=18",
        constants::URL_YANDEX_MAPS
      ),
    }
  }

  /// Name → link, in report order.
  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    Self::NAMES.into_iter().zip([
      self.google_maps.as_str(),
      self.twogis.as_str(),
      self.yandex_maps.as_str(),
    ])
  }
}


#[cfg(test)]
mod test_apply_direction {
  use super::*;

  #[test]
  fn keeps_north_and_east_positive() {
    assert_eq!(apply_direction(40.5, Some("N")), 40.5);
    assert_eq!(apply_direction(79.5, Some("E")), 79.5);
  }

  #[test]
  fn keeps_missing_direction_positive() {
    assert_eq!(apply_direction(12.0, None), 12.0);
  }

  #[test]
  fn negates_south_and_west() {
    assert_eq!(apply_direction(40.5, Some("S")), -40.5);
    assert_eq!(apply_direction(79.5, Some("w")), -79.5);
  }

  #[test]
  fn treats_unknown_direction_as_positive() {
    assert_eq!(apply_direction(1.0, Some("X")), 1.0);
  }
}

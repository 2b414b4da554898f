// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Structured view over the GPS tag group.

use super::{
  Category,
  Coordinates,
  GPS_CAPTURE_DATE,
  GPS_GROUP,
  GPS_GROUP_FALLBACK,
  GPS_LATITUDE,
  GPS_LATITUDE_DIRECTION,
  GPS_LONGITUDE,
  GPS_LONGITUDE_DIRECTION,
  InfoMap,
  RawTagMap,
  TagValue,
  apply_direction,
  fields,
  format_capture_date,
  to_decimal_degrees,
};

/// A degree / minute / second triple. A component is `None` when it isn't a
/// finite number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
  pub degrees: Option<f64>,
  pub minutes: Option<f64>,
  pub seconds: Option<f64>,
}

impl Dms {
  /// Reads a triple. Anything but a three element list is no triple at all.
  fn from_value(value: &TagValue) -> Option<Self> {
    let [degrees, minutes, seconds] = value.as_list()? else {
      log::warn!("Unexpected GPS coordinate `{value}`. Expected three components.");
      return None;
    };

    Some(Self {
      degrees: degrees.as_f64(),
      minutes: minutes.as_f64(),
      seconds: seconds.as_f64(),
    })
  }

  /// Unsigned decimal degrees.
  pub fn to_decimal(self) -> Option<f64> {
    to_decimal_degrees(self.degrees, self.minutes, self.seconds)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GpsRecord {
  tags: RawTagMap,
}

impl GpsRecord {
  /// Selects the GPS group from `tags`, preferring 34853 over 34851. `None` if
  /// neither group is present.
  pub fn from_tags(tags: &RawTagMap) -> Option<Self> {
    let group = tags
      .get(&GPS_GROUP)
      .and_then(TagValue::as_group)
      .or_else(|| tags.get(&GPS_GROUP_FALLBACK).and_then(TagValue::as_group))?;

    Some(Self { tags: group.clone() })
  }

  pub fn get(&self, tag: u16) -> Option<&TagValue> {
    self.tags.get(&tag)
  }

  pub fn latitude_direction(&self) -> Option<&str> {
    self.get(GPS_LATITUDE_DIRECTION).and_then(TagValue::as_text)
  }

  pub fn longitude_direction(&self) -> Option<&str> {
    self.get(GPS_LONGITUDE_DIRECTION).and_then(TagValue::as_text)
  }

  pub fn latitude_dms(&self) -> Option<Dms> {
    self.get(GPS_LATITUDE).and_then(Dms::from_value)
  }

  pub fn longitude_dms(&self) -> Option<Dms> {
    self.get(GPS_LONGITUDE).and_then(Dms::from_value)
  }

  /// Signed decimal latitude.
  pub fn latitude(&self) -> Option<f64> {
    let magnitude = self.latitude_dms()?.to_decimal()?;
    Some(apply_direction(magnitude, self.latitude_direction()))
  }

  /// Signed decimal longitude.
  pub fn longitude(&self) -> Option<f64> {
    let magnitude = self.longitude_dms()?.to_decimal()?;
    Some(apply_direction(magnitude, self.longitude_direction()))
  }

  /// Both coordinates, or nothing.
  pub fn coordinates(&self) -> Option<Coordinates> {
    Some(Coordinates {
      latitude:  self.latitude()?,
      longitude: self.longitude()?,
    })
  }

  pub fn capture_date(&self) -> Option<String> {
    let date = self.get(GPS_CAPTURE_DATE)?;
    match date.as_text() {
      Some(text) => Some(format_capture_date(text)),
      None => Some(date.to_string()),
    }
  }

  /// Field name → value, with coordinates in signed decimal degrees and the
  /// capture date reformatted.
  pub fn to_info(&self) -> InfoMap {
    let mut info = InfoMap::default();
    for descriptor in fields(Category::Gps) {
      let value = match descriptor.tag {
        GPS_LATITUDE => self.latitude().map(TagValue::Real),
        GPS_LONGITUDE => self.longitude().map(TagValue::Real),
        GPS_CAPTURE_DATE => self.capture_date().map(TagValue::Text),
        tag => self.get(tag).cloned(),
      };
      info.insert(descriptor.name, value);
    }
    info
  }
}

/// GPS fields for a photo without a GPS group: every field, no values.
pub fn empty_gps_info() -> InfoMap {
  let mut info = InfoMap::default();
  for descriptor in fields(Category::Gps) {
    info.insert(descriptor.name, None);
  }
  info
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! The fixed table of tag code → semantic field name, shared by the mapper
//! and the report renderers.

use super::{RawTagMap, TagValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
  Gps,
  Device,
  Image,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
  pub tag:      u16,
  pub name:     &'static str,
  pub category: Category,
}

const fn field(tag: u16, name: &'static str, category: Category) -> FieldDescriptor {
  FieldDescriptor { tag, name, category }
}

/// Codes are inside the GPS group, not the top-level map.
pub const GPS_LATITUDE_DIRECTION: u16 = 1;
pub const GPS_LATITUDE: u16 = 2;
pub const GPS_LONGITUDE_DIRECTION: u16 = 3;
pub const GPS_LONGITUDE: u16 = 4;
pub const GPS_CAPTURE_DATE: u16 = 29;

/// Preferred GPS group, and the group used when it's missing.
pub const GPS_GROUP: u16 = 34853;
pub const GPS_GROUP_FALLBACK: u16 = 34851;

/// Table order is report order.
///
/// `exposure_mode` is mapped twice (37383, then 41987). The second mapping
/// wins the value while the first keeps the position. Neither code is the Exif
/// ExposureMode tag (41986); left as is until the intended field is confirmed.
pub const FIELDS: [FieldDescriptor; 54] = [
  // GPS.
  field(GPS_LATITUDE_DIRECTION, "latitude_direction", Category::Gps),
  field(GPS_LATITUDE, "latitude", Category::Gps),
  field(GPS_LONGITUDE_DIRECTION, "longitude_direction", Category::Gps),
  field(GPS_LONGITUDE, "longitude", Category::Gps),
  field(5, "altitude", Category::Gps),
  field(6, "altitude_accuracy", Category::Gps),
  field(7, "time_fixed", Category::Gps),
  field(12, "quality_code", Category::Gps),
  field(13, "accuracy", Category::Gps),
  field(16, "orientation1", Category::Gps),
  field(17, "speed1", Category::Gps),
  field(23, "orientation2", Category::Gps),
  field(24, "speed2", Category::Gps),
  field(GPS_CAPTURE_DATE, "capture_date", Category::Gps),
  field(31, "magnetic_declination", Category::Gps),
  // Device.
  field(316, "device_model", Category::Device),
  field(272, "model", Category::Device),
  field(305, "firmware_version", Category::Device),
  field(37377, "shutter_speed", Category::Device),
  field(42035, "camera_manufacturer", Category::Device),
  field(42036, "lens_info", Category::Device),
  // Image.
  field(322, "image_width", Category::Image),
  field(323, "image_height", Category::Image),
  field(296, "orientation", Category::Image),
  field(34665, "exif_offset", Category::Image),
  field(271, "manufacturer", Category::Image),
  field(274, "compression", Category::Image),
  field(306, "date_and_time", Category::Image),
  field(282, "x_resolution", Category::Image),
  field(283, "y_resolution", Category::Image),
  field(36864, "exif_version", Category::Image),
  field(37378, "aperture_value", Category::Image),
  field(36867, "date_and_time_original", Category::Image),
  field(36868, "date_and_time_digitized", Category::Image),
  field(37379, "iso_speed_rating", Category::Image),
  field(37380, "brightness_value", Category::Image),
  field(37383, "exposure_mode", Category::Image),
  field(40961, "color_space", Category::Image),
  field(37385, "flash", Category::Image),
  field(37386, "focal_length", Category::Image),
  field(40962, "pixel_x_dimension", Category::Image),
  field(40963, "pixel_y_dimension", Category::Image),
  field(41989, "contrast", Category::Image),
  field(36880, "offset_time", Category::Image),
  field(37521, "offset_time_original", Category::Image),
  field(37522, "offset_time_digitized", Category::Image),
  field(33434, "exposure_time", Category::Image),
  field(33437, "f_number", Category::Image),
  field(41729, "scene_type", Category::Image),
  field(34850, "exposure_program", Category::Image),
  field(34855, "iso_rating", Category::Image),
  field(41986, "custom_rendered", Category::Image),
  field(41987, "exposure_mode", Category::Image),
  field(42034, "exposure_bias", Category::Image),
];

pub fn fields(category: Category) -> impl Iterator<Item = &'static FieldDescriptor> {
  FIELDS.iter().filter(move |f| f.category == category)
}

/// Ordered field name → value mapping. Names are unique; inserting a name
/// again replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfoMap {
  entries: Vec<(&'static str, Option<TagValue>)>,
}

pub type DeviceInfo = InfoMap;
pub type ImageInfo = InfoMap;

impl InfoMap {
  /// Value for `name`. Outer `None`: no such field. Inner `None`: field
  /// present but without a value.
  pub fn get(&self, name: &str) -> Option<Option<&TagValue>> {
    self
      .entries
      .iter()
      .find(|(n, _)| *n == name)
      .map(|(_, v)| v.as_ref())
  }

  pub fn insert(&mut self, name: &'static str, value: Option<TagValue>) {
    if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
      entry.1 = value;
    } else {
      self.entries.push((name, value));
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&TagValue>)> {
    self.entries.iter().map(|(n, v)| (*n, v.as_ref()))
  }

  /// Appends `other`, in order.
  pub fn extend(&mut self, other: InfoMap) {
    for (name, value) in other.entries {
      self.insert(name, value);
    }
  }
}

/// Maps the top-level tags of `tags` to fields of `category`, without
/// transformation. Never fails; missing tags map to `None`.
pub fn map_fields(tags: &RawTagMap, category: Category) -> InfoMap {
  let mut info = InfoMap::default();
  for descriptor in fields(category) {
    info.insert(descriptor.name, tags.get(&descriptor.tag).cloned());
  }
  info
}

pub fn device_info(tags: &RawTagMap) -> DeviceInfo {
  map_fields(tags, Category::Device)
}

pub fn image_info(tags: &RawTagMap) -> ImageInfo {
  map_fields(tags, Category::Image)
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Failures that abort a metadata query.
//!
//! A tag that simply isn't present is never an error; it surfaces as `None`.

use std::{
  fmt::{self, Display, Formatter},
  io,
  path::PathBuf,
};

#[derive(Debug)]
pub enum Error {
  /// Source isn't a readable HEIF container, or the codec couldn't decode it.
  Decode(String),
  /// Container holds no Exif record.
  MetadataAbsent(PathBuf),
  /// Codec output couldn't carry the Exif block.
  Encode(String),
  /// Intermediate JPEG has no readable tag block.
  TagRead(String),
  /// Geocoding service unreachable or answered with garbage.
  GeocodeService(String),
  Io(String),
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Error::Decode(msg) => write!(f, "Decode failed: {msg}"),
      Error::MetadataAbsent(path) => write!(f, "{}: No Exif metadata found.", path.display()),
      Error::Encode(msg) => write!(f, "Encode failed: {msg}"),
      Error::TagRead(msg) => write!(f, "Tag read failed: {msg}"),
      Error::GeocodeService(msg) => write!(f, "Geocoding service failed: {msg}"),
      Error::Io(msg) => write!(f, "I/O failed: {msg}"),
    }
  }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
  fn from(e: io::Error) -> Self {
    Error::Io(e.to_string())
  }
}

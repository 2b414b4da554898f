// Copyright 2023-5 Seth Pendergrass. See LICENSE.

use std::{
  fmt::{self, Display, Formatter},
  path::{Path, PathBuf},
};

/// One input photo, by path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhotoSource {
  path: PathBuf,
}

impl PhotoSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// File name up to its first `.` (`IMG_0001.HEIC` → `IMG_0001`). Names every
  /// file derived from this photo.
  pub fn base_name(&self) -> String {
    let name = self
      .path
      .file_name()
      .map(|n| n.to_string_lossy())
      .unwrap_or_default();

    match name.split_once('.') {
      Some((base, _)) => base.to_string(),
      None => name.to_string(),
    }
  }
}

impl AsRef<Path> for PhotoSource {
  fn as_ref(&self) -> &Path {
    &self.path
  }
}

impl Display for PhotoSource {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.path.display())
  }
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Helper for setting up test directories with synthetic photos.

use std::{
  env,
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use super::heic_bytes;
use crate::prim::PhotoSource;

static TEST_ROOT: LazyLock<PathBuf> =
  LazyLock::new(|| env::temp_dir().join(format!("{}_tests", env!("CARGO_PKG_NAME"))));

/// Helper for creating directories for tests needing actual files.
pub struct TestDir {
  root: PathBuf,
}

impl TestDir {
  /// Creates a new, empty directory under `TEST_ROOT`. Note: Prefer using
  /// `test_dir!()` macro.
  pub fn new(test_path: PathBuf) -> Self {
    let root_rel = TEST_ROOT.join(test_path);
    if root_rel.exists() {
      fs::remove_dir_all(&root_rel).unwrap();
    }
    fs::create_dir_all(&root_rel).unwrap();

    Self {
      root: root_rel.canonicalize().unwrap(),
    }
  }

  pub fn get_path(&self, file: impl AsRef<Path>) -> PathBuf {
    self.root.join(file)
  }

  /// Intermediate directory. Not created up front.
  pub fn temp(&self) -> PathBuf {
    self.root.join("temp")
  }

  /// Report directory. Not created up front.
  pub fn document(&self) -> PathBuf {
    self.root.join("document")
  }

  pub fn write_file(&self, file: &str, contents: &[u8]) -> PhotoSource {
    let path = self.get_path(file);
    assert!(!path.exists(), "File already exists: {path:?}");

    fs::write(&path, contents).unwrap();
    PhotoSource::new(path)
  }

  /// Writes a HEIF container holding `tiff` as its Exif item, or no Exif item
  /// at all.
  pub fn write_heic(&self, file: &str, tiff: Option<Vec<u8>>) -> PhotoSource {
    self.write_file(file, &heic_bytes(tiff.as_deref()))
  }
}

#[macro_export]
macro_rules! test_path {
  () => {{
    // HACK: Get module hierarchy for caller.
    let mut function = $crate::testing::type_of(|| ()).rsplit("::");
    // 0th element is `{closure}`.
    let case = function.nth(1).unwrap();
    let suite = function.next().unwrap();
    let module = function.next().unwrap();

    std::path::PathBuf::from(format!("{module}/{suite}/{case}"))
  }};
}

#[macro_export]
macro_rules! test_dir {
  () => {{ $crate::testing::TestDir::new($crate::test_path!()) }};
}

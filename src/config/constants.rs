// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Fixed values for directories, collaborators and report layout.

// Working directories, relative to the current directory.
pub const DIR_TEMP: &str = "temp";
pub const DIR_DOCUMENT: &str = "document";

// Reverse geocoding.
pub const GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
pub const GEOCODER_TIMEOUT_SECS: u64 = 10;
pub const GEOCODER_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Raster conversion via libheif's command line tool.
pub const HEIF_CONVERT: &str = "heif-convert";
pub const JPEG_QUALITY: u8 = 90;

/// Brands accepted in `ftyp`, as major or compatible brand.
pub const HEIF_BRANDS: [&[u8; 4]; 8] = [
  b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"mif1", b"msf1",
];

/// Orientation tag, and the value it is forced to in the intermediate JPEG so
/// readers never rotate or reinterpret it.
pub const TAG_ORIENTATION: u16 = 274;
pub const ORIENTATION_NORMALIZED: u16 = 0;

// Map link templates. Coordinates are appended by `prim::MapLinks`.
pub const URL_GOOGLE_MAPS: &str = "https://www.google.kz/maps/place/";
pub const URL_TWOGIS: &str = "https://2gis.kz/almaty/search/";
pub const URL_YANDEX_MAPS: &str = "https://yandex.kz/maps/162/almaty/?ll=76.839462%2C43.239393&mode=search";

/// Width field names are padded to in text reports.
pub const LABEL_WIDTH: usize = 30;

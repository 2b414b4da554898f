// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod test_dir;

use std::{cell::Cell, fs, io::Cursor, path::Path, rc::Rc};

use exif::{Field, In, Rational, Tag, Value, experimental::Writer};
pub use test_dir::*;

pub use crate::{assert_close, assert_err, test_dir, test_path};
use crate::{
  config::Language,
  error::Error,
  geocode::Geocoder,
  io::RasterCodec,
  prim::{Coordinates, RawTagMap, TagValue},
};

pub fn type_of<T>(_: T) -> &'static str {
  std::any::type_name::<T>()
}

fn make_box(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
  let size = u32::try_from(8 + payload.len()).unwrap();
  [&size.to_be_bytes()[..], &kind[..], payload].concat()
}

fn make_full_box(kind: &[u8; 4], version: u8, payload: &[u8]) -> Vec<u8> {
  make_box(kind, &[&[version, 0, 0, 0][..], payload].concat())
}

fn make_infe(item_id: u16, item_type: &[u8; 4]) -> Vec<u8> {
  make_full_box(b"infe", 2, &[&item_id.to_be_bytes()[..], &[0, 0][..], &item_type[..], &b"\0"[..]].concat())
}

/// Minimal HEIC container: `ftyp`, then `meta` with an image item (ID 1) and,
/// given `tiff`, an Exif item (ID 2) stored in `mdat`.
pub fn heic_bytes(tiff: Option<&[u8]>) -> Vec<u8> {
  build_heic(tiff, None)
}

/// Like `heic_bytes`, but the Exif item's location claims `offset` and
/// `length` regardless of where the payload actually lies.
pub fn heic_bytes_with_extent(tiff: &[u8], offset: u32, length: u32) -> Vec<u8> {
  build_heic(Some(tiff), Some((offset, length)))
}

fn build_heic(tiff: Option<&[u8]>, extent: Option<(u32, u32)>) -> Vec<u8> {
  let ftyp = make_box(b"ftyp", b"heic\0\0\0\0mif1heic");
  let hdlr = make_full_box(b"hdlr", 0, &[&[0; 4][..], &b"pict"[..], &[0; 12][..], &b"\0"[..]].concat());

  let mut entries = make_infe(1, b"hvc1");
  let mut item_count: u16 = 1;
  let payload = match tiff {
    Some(tiff) => {
      entries.extend(make_infe(2, b"Exif"));
      item_count += 1;
      [&[0, 0, 0, 6][..], &b"Exif\0\0"[..], tiff].concat()
    }
    None => b"pixels".to_vec(),
  };
  let iinf = make_full_box(b"iinf", 0, &[&item_count.to_be_bytes()[..], entries.as_slice()].concat());
  let payload_len = u32::try_from(payload.len()).unwrap();

  let make_meta = |offset: u32| {
    let (offset, length) = extent.unwrap_or((offset, payload_len));
    let mut iloc = vec![0x44, 0x00];
    if tiff.is_some() {
      iloc.extend(1u16.to_be_bytes());
      iloc.extend(2u16.to_be_bytes());
      iloc.extend(0u16.to_be_bytes());
      iloc.extend(1u16.to_be_bytes());
      iloc.extend(offset.to_be_bytes());
      iloc.extend(length.to_be_bytes());
    } else {
      iloc.extend(0u16.to_be_bytes());
    }
    let children = [hdlr.as_slice(), iinf.as_slice(), make_full_box(b"iloc", 0, &iloc).as_slice()].concat();
    make_full_box(b"meta", 0, &children)
  };

  // Item offsets are absolute, so size `meta` once before placing `mdat`.
  let mdat_offset = ftyp.len() + make_meta(0).len() + 8;
  let meta = make_meta(u32::try_from(mdat_offset).unwrap());

  [ftyp, meta, make_box(b"mdat", &payload)].concat()
}

/// Big-endian TIFF block holding `fields`.
pub fn tiff_block(fields: &[Field]) -> Vec<u8> {
  let mut writer = Writer::new();
  for field in fields {
    writer.push_field(field);
  }

  let mut buf = Cursor::new(Vec::new());
  writer.write(&mut buf, false).unwrap();
  buf.into_inner()
}

fn field(tag: Tag, value: Value) -> Field {
  Field {
    tag,
    ifd_num: In::PRIMARY,
    value,
  }
}

fn ascii(text: &str) -> Value {
  Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn rational(num: u32, denom: u32) -> Value {
  Value::Rational(vec![Rational { num, denom }])
}

fn triple([d, m, s]: [u32; 3]) -> Value {
  Value::Rational(vec![
    Rational { num: d, denom: 1 },
    Rational { num: m, denom: 1 },
    Rational { num: s, denom: 1 },
  ])
}

/// Typical iPhone tags, without GPS. Orientation is 6 (rotated).
pub fn camera_fields() -> Vec<Field> {
  vec![
    field(Tag::Make, ascii("Apple")),
    field(Tag::Model, ascii("iPhone 12")),
    field(Tag::Orientation, Value::Short(vec![6])),
    field(Tag::XResolution, rational(72, 1)),
    field(Tag::Software, ascii("16.4.1")),
    field(Tag::DateTime, ascii("2023:05:01 12:34:56")),
    field(Tag::ExposureTime, rational(1, 120)),
    field(Tag::FNumber, rational(8, 5)),
    field(Tag::PhotographicSensitivity, Value::Short(vec![100])),
    field(Tag::WhiteBalance, Value::Short(vec![0])),
    field(Tag::LensModel, ascii("iPhone 12 back camera")),
  ]
}

/// GPS IFD fields for the given hemispheres and whole-number triples.
pub fn gps_fields(lat_dir: &str, lat: [u32; 3], lon_dir: &str, lon: [u32; 3]) -> Vec<Field> {
  vec![
    field(Tag::GPSLatitudeRef, ascii(lat_dir)),
    field(Tag::GPSLatitude, triple(lat)),
    field(Tag::GPSLongitudeRef, ascii(lon_dir)),
    field(Tag::GPSLongitude, triple(lon)),
    field(Tag::GPSDateStamp, ascii("2023:05:01")),
  ]
}

pub fn dms(degrees: f64, minutes: f64, seconds: f64) -> TagValue {
  TagValue::List(vec![
    TagValue::Real(degrees),
    TagValue::Real(minutes),
    TagValue::Real(seconds),
  ])
}

/// GPS group as the tag extractor nests it.
pub fn gps_group(lat_dir: &str, [lat_d, lat_m, lat_s]: [f64; 3], lon_dir: &str, [lon_d, lon_m, lon_s]: [f64; 3]) -> TagValue {
  TagValue::Group(RawTagMap::from([
    (1, TagValue::Text(lat_dir.to_string())),
    (2, dms(lat_d, lat_m, lat_s)),
    (3, TagValue::Text(lon_dir.to_string())),
    (4, dms(lon_d, lon_m, lon_s)),
  ]))
}

/// Writes a small, valid JPEG without an Exif segment.
pub fn write_jpeg(path: impl AsRef<Path>) {
  image::RgbImage::from_pixel(16, 16, image::Rgb([200, 120, 40]))
    .save(path)
    .unwrap();
}

/// Codec that ignores its input. Writes a real JPEG unless given other bytes,
/// and counts its calls.
#[derive(Default)]
pub struct StubCodec {
  output: Option<Vec<u8>>,
  calls:  Rc<Cell<usize>>,
}

impl StubCodec {
  pub fn writing(output: &[u8]) -> Self {
    Self {
      output: Some(output.to_vec()),
      ..Self::default()
    }
  }

  /// Shared call counter, readable after the codec is moved.
  pub fn calls(&self) -> Rc<Cell<usize>> {
    Rc::clone(&self.calls)
  }
}

impl RasterCodec for StubCodec {
  fn transcode(&self, _source: &Path, dest: &Path) -> Result<(), Error> {
    self.calls.set(self.calls.get() + 1);
    match &self.output {
      Some(output) => fs::write(dest, output)?,
      None => write_jpeg(dest),
    }
    Ok(())
  }
}

pub enum StubGeocoder {
  Found(&'static str),
  NotFound,
  Unreachable,
}

impl Geocoder for StubGeocoder {
  fn reverse(&self, _coordinates: Coordinates, _language: Language) -> Result<Option<String>, Error> {
    match self {
      StubGeocoder::Found(address) => Ok(Some((*address).to_string())),
      StubGeocoder::NotFound => Ok(None),
      StubGeocoder::Unreachable => Err(Error::GeocodeService("connection refused".to_string())),
    }
  }
}

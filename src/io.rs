// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Functions for converting photos, reading their tags and writing reports.
//!
//! Report and intermediate files are written in place, not atomically. A crash
//! mid-write leaves a partial file behind.

mod tiff;

use std::{
  ffi::OsStr,
  fs::{self, File},
  io::{BufReader, Cursor},
  iter,
  path::{Path, PathBuf},
  process::Command,
};

use byteorder::{BigEndian, ByteOrder};
use exif::{Context, Exif, In, Tag};
use img_parts::{Bytes, ImageEXIF, jpeg::Jpeg};

use crate::{
  config::{
    Language,
    constants::{HEIF_BRANDS, ORIENTATION_NORMALIZED, TAG_ORIENTATION},
  },
  error::Error,
  prim::{GPS_GROUP, PhotoSource, RawTagMap, TagValue},
  report::Report,
};

/// `Exif\0\0` plus the segment length field, which must fit in a `u16` along
/// with the TIFF block.
const APP1_OVERHEAD: usize = 8;

/// Decodes a HEIC photo and re-encodes it as JPEG. Metadata in the output is
/// irrelevant; it gets replaced.
pub trait RasterCodec {
  fn transcode(&self, source: &Path, dest: &Path) -> Result<(), Error>;
}

/// Converts with libheif's `heif-convert`.
pub struct HeifConvert {
  program: PathBuf,
  quality: u8,
}

impl HeifConvert {
  pub fn new(program: impl Into<PathBuf>, quality: u8) -> Self {
    Self {
      program: program.into(),
      quality,
    }
  }
}

impl RasterCodec for HeifConvert {
  fn transcode(&self, source: &Path, dest: &Path) -> Result<(), Error> {
    let quality = self.quality.to_string();
    let args = [
      OsStr::new("-q"),
      OsStr::new(&quality),
      source.as_os_str(),
      dest.as_os_str(),
    ];

    run_command(&self.program, args).map_err(Error::Decode)?;
    Ok(())
  }
}

/// Converts `source` to `<dir_temp>/<base name>.jpg`, carrying over its Exif
/// block with the orientation tag normalized. Returns the JPEG's path.
pub fn convert_heic(
  source: &PhotoSource,
  dir_temp: impl AsRef<Path>,
  codec: &dyn RasterCodec,
) -> Result<PathBuf, Error> {
  let bytes = fs::read(source).map_err(|e| Error::Io(format!("{source}: Failed to read ({e}).")))?;

  check_heif_brand(&bytes).map_err(|e| Error::Decode(format!("{source}: {e}")))?;

  let exif = read_exif(&bytes)
    .map_err(|e| Error::Decode(format!("{source}: {e}")))?
    .ok_or_else(|| Error::MetadataAbsent(source.path().to_path_buf()))?;
  let tiff = normalize_orientation(source, &exif)?;

  let dir_temp = dir_temp.as_ref();
  fs::create_dir_all(dir_temp)
    .map_err(|e| Error::Io(format!("{}: Failed to create directory ({e}).", dir_temp.display())))?;
  let artifact = dir_temp.join(format!("{}.jpg", source.base_name()));

  codec.transcode(source.path(), &artifact)?;
  embed_exif(&artifact, tiff)?;

  log::info!("{source}: Converted to {}.", artifact.display());
  Ok(artifact)
}

/// Requires `bytes` to open with an `ftyp` box naming a HEIF brand, either as
/// the major brand or a compatible one.
fn check_heif_brand(bytes: &[u8]) -> Result<(), String> {
  let (Some(size), Some(b"ftyp")) = (bytes.get(0..4), bytes.get(4..8)) else {
    return Err("missing `ftyp` box".to_string());
  };
  let size = usize::try_from(BigEndian::read_u32(size)).map_err(|e| e.to_string())?;
  let ftyp = bytes
    .get(8..size)
    .ok_or_else(|| format!("`ftyp` box of {size} bytes is truncated"))?;
  let major = ftyp.get(0..4).ok_or("`ftyp` box has no major brand")?;
  let compatible = ftyp.get(8..).unwrap_or_default().chunks_exact(4);

  if iter::once(major).chain(compatible).any(|brand| HEIF_BRANDS.iter().any(|b| &b[..] == brand)) {
    Ok(())
  } else {
    Err(format!("unsupported brand `{}`", String::from_utf8_lossy(major)))
  }
}

/// The container's Exif record, or `None` if it has none.
fn read_exif(bytes: &[u8]) -> Result<Option<Exif>, exif::Error> {
  match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
    Ok(exif) => Ok(Some(exif)),
    Err(exif::Error::NotFound(_)) => Ok(None),
    Err(e) => Err(e),
  }
}

/// TIFF block of `exif` with the orientation tag set to the normalized value,
/// inserting the tag when IFD0 lacks it.
fn normalize_orientation(source: &PhotoSource, exif: &Exif) -> Result<Vec<u8>, Error> {
  let mut tiff = exif.buf().to_vec();
  if tiff::set_short(&mut tiff, TAG_ORIENTATION, ORIENTATION_NORMALIZED)
    .map_err(|e| Error::Decode(format!("{source}: {e}")))?
  {
    return Ok(tiff);
  }

  log::debug!("{source}: No orientation tag. Rebuilding Exif block with one.");
  tiff::rebuild_with_short(exif, Tag(Context::Tiff, TAG_ORIENTATION), ORIENTATION_NORMALIZED)
    .map_err(|e| Error::Encode(format!("{source}: Failed to rebuild Exif block ({e}).")))
}

/// Replaces the Exif segment of the JPEG at `path` with `tiff`.
fn embed_exif(path: &Path, tiff: Vec<u8>) -> Result<(), Error> {
  if tiff.len() + APP1_OVERHEAD > usize::from(u16::MAX) {
    return Err(Error::Encode(format!(
      "{}: Exif block of {} bytes does not fit in a JPEG segment.",
      path.display(),
      tiff.len()
    )));
  }

  let bytes = fs::read(path).map_err(|e| Error::Io(format!("{}: Failed to read ({e}).", path.display())))?;
  let mut jpeg = Jpeg::from_bytes(Bytes::from(bytes))
    .map_err(|e| Error::Encode(format!("{}: Not a JPEG ({e}).", path.display())))?;

  jpeg.set_exif(Some(Bytes::from(tiff)));

  fs::write(path, jpeg.encoder().bytes())
    .map_err(|e| Error::Io(format!("{}: Failed to write ({e}).", path.display())))
}

/// Reads the tags of the JPEG at `artifact`.
pub fn read_tags(artifact: impl AsRef<Path>) -> Result<RawTagMap, Error> {
  let artifact = artifact.as_ref();
  let file =
    File::open(artifact).map_err(|e| Error::Io(format!("{}: Failed to open ({e}).", artifact.display())))?;

  let exif = exif::Reader::new()
    .read_from_container(&mut BufReader::new(file))
    .map_err(|e| Error::TagRead(format!("{} ({e}).", artifact.display())))?;

  let tags = collect_tags(exif.fields());
  log::debug!("{}: Read {} tags.", artifact.display(), tags.len());
  Ok(tags)
}

/// Flattens primary image fields into a tag map. GPS fields are nested under
/// the GPS pointer tag; thumbnail and interoperability fields are dropped.
fn collect_tags<'a>(fields: impl Iterator<Item = &'a exif::Field>) -> RawTagMap {
  let mut tags = RawTagMap::new();
  let mut gps = RawTagMap::new();
  let mut has_gps = false;

  for field in fields {
    if field.ifd_num != In::PRIMARY {
      continue;
    }
    if field.tag == Tag::GPSInfoIFDPointer {
      has_gps = true;
      continue;
    }

    let Some(value) = TagValue::from_exif(&field.value) else {
      log::debug!("Skipping tag {} with no usable value.", field.tag.number());
      continue;
    };

    match field.tag.context() {
      Context::Gps => {
        gps.insert(field.tag.number(), value);
      }
      Context::Interop => {}
      _ => {
        tags.insert(field.tag.number(), value);
      }
    }
  }

  if has_gps || !gps.is_empty() {
    tags.insert(GPS_GROUP, TagValue::Group(gps));
  }

  tags
}

/// Writes `report` as text to `<dir_document>/<base name>.txt`.
pub fn write_text_report(
  report: &Report,
  dir_document: impl AsRef<Path>,
  source: &PhotoSource,
) -> Result<PathBuf, Error> {
  let path = document_path(dir_document, source, "txt")?;

  fs::write(&path, report.render_text())
    .map_err(|e| Error::Io(format!("{}: Failed to write ({e}).", path.display())))?;

  log::info!("{source}: Wrote {}.", path.display());
  Ok(path)
}

/// Writes `report` as CSV to `<dir_document>/<base name>.csv`.
pub fn write_csv_report(
  report: &Report,
  dir_document: impl AsRef<Path>,
  source: &PhotoSource,
  language: Language,
) -> Result<PathBuf, Error> {
  let path = document_path(dir_document, source, "csv")?;

  let file =
    File::create(&path).map_err(|e| Error::Io(format!("{}: Failed to create ({e}).", path.display())))?;
  report
    .render_csv(file, language.csv_headers())
    .map_err(|e| Error::Io(format!("{}: Failed to write ({e}).", path.display())))?;

  log::info!("{source}: Wrote {}.", path.display());
  Ok(path)
}

/// Path for a report on `source`, creating `dir_document` if needed.
fn document_path(dir_document: impl AsRef<Path>, source: &PhotoSource, ext: &str) -> Result<PathBuf, Error> {
  let dir_document = dir_document.as_ref();
  fs::create_dir_all(dir_document).map_err(|e| {
    Error::Io(format!(
      "{}: Failed to create directory ({e}).",
      dir_document.display()
    ))
  })?;

  Ok(dir_document.join(format!("{}.{ext}", source.base_name())))
}

/// Runs `program` with `args`, returning stdout.
pub fn run_command<I: IntoIterator<Item = S>, S: AsRef<OsStr>>(
  program: impl AsRef<Path>,
  args: I,
) -> Result<Vec<u8>, String> {
  let program = program.as_ref();
  let mut cmd = Command::new(program);
  cmd.args(args);

  let output = cmd.output().map_err(|e| {
    format!(
      "{} failed to run.\nArgs:\n{}\nError:\n{e}",
      program.display(),
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
    )
  })?;

  log::trace!(
    "{} output:\n{}",
    program.display(),
    String::from_utf8_lossy(&output.stdout)
  );

  if !output.status.success() {
    return Err(format!(
      "{} did not run successfully.\nArgs:\n{}\nstderr:\n{}",
      program.display(),
      cmd
        .get_args()
        .collect::<Vec<_>>()
        .join(OsStr::new(" "))
        .display(),
      String::from_utf8_lossy(&output.stderr)
    ));
  }

  Ok(output.stdout)
}

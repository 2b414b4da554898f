// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Queries against one photo's metadata.

use std::{
  fmt::{self, Display, Formatter},
  path::PathBuf,
};

use once_cell::unsync::OnceCell;

use crate::{
  config::{Language, Settings},
  error::Error,
  geocode::{Geocoder, resolve_address},
  io::{self, HeifConvert, RasterCodec},
  prim::{
    Coordinates,
    DeviceInfo,
    GpsRecord,
    ImageInfo,
    InfoMap,
    MapLinks,
    PhotoSource,
    RawTagMap,
    device_info,
    empty_gps_info,
    image_info,
  },
  report::Report,
};

/// One HEIC photo. Its tags are extracted on first use and kept for the life
/// of the instance.
pub struct PhotoMetadata {
  source:       PhotoSource,
  dir_temp:     PathBuf,
  dir_document: PathBuf,
  codec:        Box<dyn RasterCodec>,
  tags:         OnceCell<RawTagMap>,
}

impl PhotoMetadata {
  /// Photo at `source`, converted with `heif-convert` as configured.
  pub fn new(source: PhotoSource, settings: &Settings) -> Self {
    Self::with_codec(
      source,
      &settings.dir_temp,
      &settings.dir_document,
      Box::new(HeifConvert::new(&settings.heif_convert, settings.jpeg_quality)),
    )
  }

  pub fn with_codec(
    source: PhotoSource,
    dir_temp: impl Into<PathBuf>,
    dir_document: impl Into<PathBuf>,
    codec: Box<dyn RasterCodec>,
  ) -> Self {
    Self {
      source,
      dir_temp: dir_temp.into(),
      dir_document: dir_document.into(),
      codec,
      tags: OnceCell::new(),
    }
  }

  /// Raw tags, running the conversion pipeline on first call only.
  pub fn tags(&self) -> Result<&RawTagMap, Error> {
    self.tags.get_or_try_init(|| {
      log::debug!("{}: Extracting tags.", self.source);
      let artifact = io::convert_heic(&self.source, &self.dir_temp, self.codec.as_ref())?;
      io::read_tags(artifact)
    })
  }

  pub fn device_informations(&self) -> Result<DeviceInfo, Error> {
    Ok(device_info(self.tags()?))
  }

  pub fn image_informations(&self) -> Result<ImageInfo, Error> {
    Ok(image_info(self.tags()?))
  }

  /// The GPS group, if the photo has one.
  pub fn gps_record(&self) -> Result<Option<GpsRecord>, Error> {
    Ok(GpsRecord::from_tags(self.tags()?))
  }

  pub fn gps_informations(&self) -> Result<Option<InfoMap>, Error> {
    Ok(self.gps_record()?.map(|gps| gps.to_info()))
  }

  /// Signed decimal coordinates, if both are present.
  pub fn get_location(&self) -> Result<Option<Coordinates>, Error> {
    Ok(self.gps_record()?.and_then(|gps| gps.coordinates()))
  }

  pub fn get_location_url(&self) -> Result<Option<MapLinks>, Error> {
    Ok(self.get_location()?.map(MapLinks::new))
  }

  /// Address at the photo's location. `None` without a location, in which
  /// case `geocoder` isn't consulted.
  pub fn get_location_address(
    &self,
    geocoder: &dyn Geocoder,
    language: Language,
  ) -> Result<Option<String>, Error> {
    match self.get_location()? {
      Some(coordinates) => resolve_address(geocoder, coordinates, language).map(Some),
      None => {
        log::debug!("{}: No location. Skipping address lookup.", self.source);
        Ok(None)
      }
    }
  }

  /// GPS, device and image fields, in that order. GPS fields are present even
  /// without a GPS group.
  pub fn informations(&self) -> Result<InfoMap, Error> {
    let mut info = self.gps_informations()?.unwrap_or_else(empty_gps_info);
    info.extend(self.device_informations()?);
    info.extend(self.image_informations()?);
    Ok(info)
  }

  /// All fields plus map links, and the address when `geocoder` is given.
  pub fn report(&self, geocoder: Option<&dyn Geocoder>, language: Language) -> Result<Report, Error> {
    let report = Report::new(&self.informations()?, self.get_location_url()?.as_ref());

    match geocoder {
      Some(geocoder) => Ok(report.with_address(self.get_location_address(geocoder, language)?)),
      None => Ok(report),
    }
  }

  pub fn informations_text(&self) -> Result<String, Error> {
    Ok(self.report(None, Language::default())?.render_text())
  }

  /// Writes the report as CSV, with headers in `language`. Returns its path.
  pub fn get_csv_informations(
    &self,
    geocoder: Option<&dyn Geocoder>,
    language: Language,
  ) -> Result<PathBuf, Error> {
    let report = self.report(geocoder, language)?;
    io::write_csv_report(&report, &self.dir_document, &self.source, language)
  }

  /// Writes the text report. Returns its path.
  pub fn get_text_file(&self, geocoder: Option<&dyn Geocoder>, language: Language) -> Result<PathBuf, Error> {
    let report = self.report(geocoder, language)?;
    io::write_text_report(&report, &self.dir_document, &self.source)
  }
}

impl Display for PhotoMetadata {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "PhotoMetadata('{}')", self.source)
  }
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Reads the Exif metadata of a HEIC photo and reports its device, image and
//! GPS details, with map links and an optional street address.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

mod config;
mod error;
mod geocode;
mod io;
mod photo;
mod prim;
mod report;
mod setup;
#[cfg(test)]
mod testing;

use crate::{
  config::{Language, Settings},
  error::Error,
  geocode::{Geocoder, Nominatim},
  photo::PhotoMetadata,
  prim::{InfoMap, PhotoSource},
  report::{field_label, title_case},
};

#[derive(Parser)]
struct Args {
  /// HEIC photo to read.
  path: PathBuf,

  /// Directory for intermediate JPEGs.
  #[arg(long, global = true)]
  temp: Option<PathBuf>,

  /// Directory for written reports.
  #[arg(long, global = true)]
  document: Option<PathBuf>,

  /// Language for CSV headers and addresses.
  #[arg(long, value_enum, global = true)]
  language: Option<Language>,

  /// Verbosity level. Max: 2.
  #[arg(short, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print device fields.
  Device,
  /// Print image fields.
  Image,
  /// Print GPS fields.
  Gps,
  /// Print the location in decimal degrees.
  Location,
  /// Print map links for the location.
  Urls,
  /// Print the street address at the location.
  Address,
  /// Print the full report.
  Text,
  /// Write the full report as CSV.
  Csv {
    /// Add the street address.
    #[arg(long)]
    address: bool,
  },
  /// Write the full report as text.
  TextFile {
    /// Add the street address.
    #[arg(long)]
    address: bool,
  },
}

fn main() {
  let args = Args::parse();
  setup::configure_logging(args.verbose);

  let mut settings = match setup::load_settings() {
    Ok(settings) => settings,
    Err(e) => {
      log::error!("{e}");
      std::process::exit(1);
    }
  };
  if let Some(temp) = args.temp {
    settings.dir_temp = temp;
  }
  if let Some(document) = args.document {
    settings.dir_document = document;
  }
  if let Some(language) = args.language {
    settings.language = language;
  }

  let photo = PhotoMetadata::new(PhotoSource::new(args.path), &settings);
  log::debug!("{photo}");

  if let Err(e) = run(&photo, &settings, args.command) {
    log::error!("{e}");
    std::process::exit(1);
  }
}

fn run(photo: &PhotoMetadata, settings: &Settings, command: Commands) -> Result<(), Error> {
  let language = settings.language;

  match command {
    Commands::Device => print_info(&photo.device_informations()?),
    Commands::Image => print_info(&photo.image_informations()?),
    Commands::Gps => match photo.gps_informations()? {
      Some(info) => print_info(&info),
      None => println!("None"),
    },
    Commands::Location => match photo.get_location()? {
      Some(c) => println!("{}, {}", c.latitude, c.longitude),
      None => println!("None"),
    },
    Commands::Urls => match photo.get_location_url()? {
      Some(links) => {
        for (name, link) in links.iter() {
          println!("{}: {link}", field_label(name));
        }
      }
      None => println!("None"),
    },
    Commands::Address => {
      let geocoder = Nominatim::new(settings)?;
      match photo.get_location_address(&geocoder, language)? {
        Some(address) => println!("{address}"),
        None => println!("None"),
      }
    }
    Commands::Text => print!("{}", photo.informations_text()?),
    Commands::Csv { address } => {
      let geocoder = address.then(|| Nominatim::new(settings)).transpose()?;
      let path = photo.get_csv_informations(geocoder.as_ref().map(|g| g as &dyn Geocoder), language)?;
      println!("{}", path.display());
    }
    Commands::TextFile { address } => {
      let geocoder = address.then(|| Nominatim::new(settings)).transpose()?;
      let path = photo.get_text_file(geocoder.as_ref().map(|g| g as &dyn Geocoder), language)?;
      println!("{}", path.display());
    }
  }

  Ok(())
}

fn print_info(info: &InfoMap) {
  for (name, value) in info.iter() {
    let value = value.map_or_else(|| "None".to_string(), |v| title_case(&v.to_string()));
    println!("{}: {value}", field_label(name));
  }
}

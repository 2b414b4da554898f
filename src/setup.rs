// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program setup functions.

use std::{fs, io::Write, path::Path};

use env_logger::Builder;
use log::LevelFilter;

use crate::config::Settings;

const CONFIG_FILE: &str = "config.json";

/// Sets up `env_logger` with the format "LEVEL\tmessage" (e.g. "WARN\tsomething
/// went wrong").
///
/// Log levels:
/// Error: Failed queries.
/// Warn: Tag values that can't be interpreted.
/// Info: Conversions and written reports.
/// Debug: Container and tag details.
/// Trace: Collaborator output.
pub fn configure_logging(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  Builder::new()
    .filter_level(level)
    .format(|buf, record| {
      let style = buf.default_level_style(record.level());
      writeln!(
        buf,
        "{style}{}{style:#}\t{}",
        record.level(),
        record.args()
      )
    })
    .init();
}

/// Reads settings from `XDG_CONFIG_HOME/heic_meta/config.json`, or defaults if
/// there is no such file.
pub fn load_settings() -> Result<Settings, String> {
  let xdg_dirs = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));

  match xdg_dirs.find_config_file(CONFIG_FILE) {
    Some(path) => read_settings(&path),
    None => {
      log::debug!("No {CONFIG_FILE} found. Using default settings.");
      Ok(Settings::default())
    }
  }
}

fn read_settings(path: &Path) -> Result<Settings, String> {
  log::debug!("Reading settings from {}.", path.display());

  let json =
    fs::read_to_string(path).map_err(|e| format!("{}: Failed to read settings ({e}).", path.display()))?;
  Settings::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Structure for holding configuration.

use std::path::PathBuf;

use serde::Deserialize;

pub mod constants;

/// Language for report headers, the "not found" sentinel and geocoder results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  En,
  #[default]
  Ru,
}

impl Language {
  /// Code sent to the geocoder as the preferred response language.
  pub fn code(self) -> &'static str {
    match self {
      Language::En => "en",
      Language::Ru => "ru",
    }
  }

  pub fn csv_headers(self) -> [&'static str; 2] {
    match self {
      Language::En => ["Keys", "Values"],
      Language::Ru => ["Ключи", "Значения"],
    }
  }

  pub fn address_not_found(self) -> &'static str {
    match self {
      Language::En => "Address not found.",
      Language::Ru => "Адрес не найден.",
    }
  }
}

/// Settings read from `config.json` under `XDG_CONFIG_HOME/heic_meta`. Every
/// field is optional in the file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub dir_temp:              PathBuf,
  pub dir_document:          PathBuf,
  pub language:              Language,
  pub geocoder_endpoint:     String,
  pub geocoder_user_agent:   String,
  pub geocoder_timeout_secs: u64,
  pub heif_convert:          PathBuf,
  pub jpeg_quality:          u8,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      dir_temp:              PathBuf::from(constants::DIR_TEMP),
      dir_document:          PathBuf::from(constants::DIR_DOCUMENT),
      language:              Language::default(),
      geocoder_endpoint:     constants::GEOCODER_ENDPOINT.to_string(),
      geocoder_user_agent:   constants::GEOCODER_USER_AGENT.to_string(),
      geocoder_timeout_secs: constants::GEOCODER_TIMEOUT_SECS,
      heif_convert:          PathBuf::from(constants::HEIF_CONVERT),
      jpeg_quality:          constants::JPEG_QUALITY,
    }
  }
}

impl Settings {
  pub fn from_json(json: &str) -> Result<Self, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid settings ({e})."))
  }
}

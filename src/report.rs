// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Renders a photo's fields as aligned text or CSV.

use std::io::Write;

use crate::{
  config::constants::LABEL_WIDTH,
  prim::{InfoMap, MapLinks},
};

const MISSING: &str = "None";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
  name:       &'static str,
  value:      Option<String>,
  title_case: bool,
}

/// Ordered (field, value) rows. Formatting happens at render time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
  rows: Vec<Row>,
}

impl Report {
  /// Rows for every field in `info`, then one per map link. Without `links`
  /// the link rows are still present, with no value.
  pub fn new(info: &InfoMap, links: Option<&MapLinks>) -> Self {
    let mut rows = info
      .iter()
      .map(|(name, value)| Row {
        name,
        value: value.map(ToString::to_string),
        title_case: true,
      })
      .collect::<Vec<_>>();

    match links {
      Some(links) => rows.extend(links.iter().map(|(name, link)| Row {
        name,
        value: Some(link.to_string()),
        title_case: false,
      })),
      None => rows.extend(MapLinks::NAMES.into_iter().map(|name| Row {
        name,
        value: None,
        title_case: false,
      })),
    }

    Self { rows }
  }

  /// Appends an `address` row, rendered as is.
  #[must_use]
  pub fn with_address(mut self, address: Option<String>) -> Self {
    self.rows.push(Row {
      name: "address",
      value: address,
      title_case: false,
    });
    self
  }

  /// (label, value) pairs as they appear in either rendering. Labels are not
  /// padded.
  pub fn entries(&self) -> impl Iterator<Item = (String, String)> + '_ {
    self.rows.iter().map(|row| {
      let value = match &row.value {
        Some(value) if row.title_case => title_case(value),
        Some(value) => value.clone(),
        None => MISSING.to_string(),
      };
      (field_label(row.name), value)
    })
  }

  /// One `<label> | ->\t <value>` line per row, labels padded to a fixed
  /// width.
  pub fn render_text(&self) -> String {
    self
      .entries()
      .map(|(label, value)| format!("{label:<LABEL_WIDTH$} | ->\t {value}\n"))
      .collect()
  }

  /// Header row of `headers`, then one row per entry.
  pub fn render_csv<W: Write>(&self, writer: W, headers: [&str; 2]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(headers)?;
    for (label, value) in self.entries() {
      writer.write_record([label, value])?;
    }

    writer.flush()?;
    Ok(())
  }
}

/// `image_width` → `Image Width`.
pub fn field_label(name: &str) -> String {
  title_case(&name.replace('_', " "))
}

/// Uppercases each cased character that follows an uncased one and
/// lowercases the rest (`iPhone 12 pro` → `Iphone 12 Pro`).
pub fn title_case(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut prev_cased = false;

  for c in text.chars() {
    let cased = c.is_lowercase() || c.is_uppercase();
    if !cased {
      out.push(c);
    } else if prev_cased {
      out.extend(c.to_lowercase());
    } else {
      out.extend(c.to_uppercase());
    }
    prev_cased = cased;
  }

  out
}


#[cfg(test)]
mod test_report {
  use super::*;
  use crate::prim::{Coordinates, TagValue};

  fn info() -> InfoMap {
    let mut info = InfoMap::default();
    info.insert("latitude", Some(TagValue::Real(40.5)));
    info.insert("model", Some(TagValue::Text("iPhone 12".to_string())));
    info.insert("lens_info", None);
    info
  }

  fn links() -> MapLinks {
    MapLinks::new(Coordinates {
      latitude:  40.5,
      longitude: -79.25,
    })
  }

  #[test]
  fn appends_address_last() {
    let report = Report::new(&info(), Some(&links())).with_address(Some("Abay avenue, Almaty".to_string()));

    let (label, value) = report.entries().last().unwrap();

    assert_eq!(label, "Address");
    assert_eq!(value, "Abay avenue, Almaty");
  }

  #[test]
  fn renders_missing_address_as_none() {
    let report = Report::new(&info(), None).with_address(None);

    assert_eq!(report.entries().last().unwrap(), ("Address".to_string(), "None".to_string()));
  }

  #[test]
  fn keeps_link_rows_without_links() {
    let report = Report::new(&info(), None);

    let entries = report.entries().collect::<Vec<_>>();

    assert_eq!(entries.len(), 6);
    assert_eq!(entries[3], ("Google Maps".to_string(), "None".to_string()));
    assert_eq!(entries[5], ("Yandex Maps".to_string(), "None".to_string()));
  }

  #[test]
  fn leaves_links_as_is() {
    let report = Report::new(&info(), Some(&links()));

    let entries = report.entries().collect::<Vec<_>>();

    assert_eq!(entries[3].1, "https://www.google.kz/maps/place/40.5,-79.25");
  }

  #[test]
  fn renders_missing_value_as_none() {
    let report = Report::new(&info(), None);

    assert_eq!(report.entries().nth(2).unwrap().1, "None");
  }

  #[test]
  fn title_cases_values() {
    let report = Report::new(&info(), None);

    assert_eq!(report.entries().nth(1).unwrap().1, "Iphone 12");
  }
}

// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Untyped tag values, as read from an Exif block.

use std::{
  collections::BTreeMap,
  fmt::{self, Display, Formatter},
};

/// Tag code → value, for the primary image. The GPS IFD is nested as a
/// [`TagValue::Group`] under its pointer tag.
pub type RawTagMap = BTreeMap<u16, TagValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
  Text(String),
  Integer(i64),
  /// Rationals and floats, resolved to `f64`.
  Real(f64),
  Bytes(Vec<u8>),
  List(Vec<TagValue>),
  Group(RawTagMap),
}

impl TagValue {
  /// Numeric value, if this is a finite number.
  #[allow(clippy::cast_precision_loss)]
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      TagValue::Integer(i) => Some(*i as f64),
      TagValue::Real(r) if r.is_finite() => Some(*r),
      _ => None,
    }
  }

  pub fn as_group(&self) -> Option<&RawTagMap> {
    match self {
      TagValue::Group(group) => Some(group),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[TagValue]> {
    match self {
      TagValue::List(list) => Some(list),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      TagValue::Text(text) => Some(text),
      _ => None,
    }
  }

  /// Collapses single-element arrays to a scalar.
  fn from_vec(mut values: Vec<TagValue>) -> Option<TagValue> {
    match values.len() {
      0 => None,
      1 => values.pop(),
      _ => Some(TagValue::List(values)),
    }
  }

  /// Converts a field value from `kamadak-exif`. `None` for values with no
  /// meaningful representation (unknown types, empty arrays).
  pub fn from_exif(value: &exif::Value) -> Option<TagValue> {
    use exif::Value;

    let ints = |v: Vec<i64>| TagValue::from_vec(v.into_iter().map(TagValue::Integer).collect());
    let reals = |v: Vec<f64>| TagValue::from_vec(v.into_iter().map(TagValue::Real).collect());

    match value {
      Value::Ascii(lines) => {
        let mut texts = lines
          .iter()
          .map(|l| {
            let text = String::from_utf8_lossy(l);
            TagValue::Text(text.trim_end_matches('\0').to_string())
          })
          .collect::<Vec<_>>();
        if texts.is_empty() {
          texts.push(TagValue::Text(String::new()));
        }
        TagValue::from_vec(texts)
      }
      Value::Byte(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::Short(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::Long(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::SByte(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::SShort(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::SLong(v) => ints(v.iter().map(|&n| i64::from(n)).collect()),
      Value::Rational(v) => reals(v.iter().map(exif::Rational::to_f64).collect()),
      Value::SRational(v) => reals(v.iter().map(exif::SRational::to_f64).collect()),
      Value::Float(v) => reals(v.iter().map(|&n| f64::from(n)).collect()),
      Value::Double(v) => reals(v.clone()),
      Value::Undefined(bytes, _) => Some(TagValue::Bytes(bytes.clone())),
      _ => None,
    }
  }
}

impl Display for TagValue {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TagValue::Text(text) => write!(f, "{text}"),
      TagValue::Integer(i) => write!(f, "{i}"),
      TagValue::Real(r) => write!(f, "{}", format_float(*r)),
      TagValue::Bytes(bytes) => {
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
          write!(f, "{}", String::from_utf8_lossy(bytes))
        } else {
          let hex = bytes.iter().map(|b| format!("{b:02x}")).collect::<String>();
          write!(f, "0x{hex}")
        }
      }
      TagValue::List(values) => {
        let joined = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(f, "({joined})")
      }
      TagValue::Group(group) => {
        let joined = group
          .iter()
          .map(|(tag, value)| format!("{tag}: {value}"))
          .collect::<Vec<_>>()
          .join(", ");
        write!(f, "{{{joined}}}")
      }
    }
  }
}

/// Shortest round-trip form, as Python's `repr` writes it: always with a
/// fractional part (`10.0`, not `10`), and in exponent form below `1e-4` or
/// from `1e16` on (`1e-07`, `1.5e+16`).
pub fn format_float(value: f64) -> String {
  if !value.is_finite() {
    return value.to_string().to_lowercase();
  }

  let scientific = format!("{value:e}");
  let Some((mantissa, exponent)) = scientific.split_once('e') else {
    return scientific;
  };
  let Ok(exponent) = exponent.parse::<i32>() else {
    return scientific;
  };

  if !(-4..16).contains(&exponent) {
    let sign = if exponent < 0 { '-' } else { '+' };
    return format!("{mantissa}e{sign}{:02}", exponent.abs());
  }

  let s = value.to_string();
  if s.contains('.') { s } else { format!("{s}.0") }
}

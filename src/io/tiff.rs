// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Edits to a raw TIFF (Exif) block.

use std::io::{self, Cursor};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use exif::{Exif, Field, In, Tag, Value, experimental::Writer};

const TIFF_MAGIC: u16 = 42;
const IFD_ENTRY_LEN: usize = 12;
const TYPE_SHORT: u16 = 3;

fn invalid(msg: impl Into<String>) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

/// Overwrites the SHORT value of `tag` in IFD0. Returns whether the tag was
/// present; an absent tag leaves the block untouched.
pub fn set_short(tiff: &mut [u8], tag: u16, value: u16) -> io::Result<bool> {
  match tiff.get(0..2) {
    Some(b"II") => set_short_with::<LittleEndian>(tiff, tag, value),
    Some(b"MM") => set_short_with::<BigEndian>(tiff, tag, value),
    _ => Err(invalid("missing TIFF byte order mark")),
  }
}

fn set_short_with<B: ByteOrder>(tiff: &mut [u8], tag: u16, value: u16) -> io::Result<bool> {
  let header = tiff.get(2..8).ok_or_else(|| invalid("truncated TIFF header"))?;
  if B::read_u16(&header[0..2]) != TIFF_MAGIC {
    return Err(invalid("bad TIFF magic number"));
  }
  let ifd = B::read_u32(&header[2..6]) as usize;

  let count = tiff
    .get(ifd..ifd + 2)
    .map(B::read_u16)
    .ok_or_else(|| invalid("IFD0 offset out of range"))?;

  for i in 0..usize::from(count) {
    let start = ifd + 2 + i * IFD_ENTRY_LEN;
    let entry = tiff
      .get_mut(start..start + IFD_ENTRY_LEN)
      .ok_or_else(|| invalid("truncated IFD0"))?;

    if B::read_u16(&entry[0..2]) != tag {
      continue;
    }
    let field_type = B::read_u16(&entry[2..4]);
    if field_type != TYPE_SHORT {
      return Err(invalid(format!("tag {tag} has type {field_type}, expected SHORT")));
    }
    // Count stays as is; the first value sits at the start of the value field.
    B::write_u16(&mut entry[8..10], value);
    return Ok(true);
  }

  Ok(false)
}

/// Re-encodes the IFD0, Exif and GPS fields of `exif` with `tag` set to the
/// SHORT `value`. Thumbnail fields and fields of unknown type are dropped.
pub fn rebuild_with_short(exif: &Exif, tag: Tag, value: u16) -> Result<Vec<u8>, exif::Error> {
  let added = Field {
    tag,
    ifd_num: In::PRIMARY,
    value: Value::Short(vec![value]),
  };

  let mut writer = Writer::new();
  for field in exif.fields() {
    let pointer = matches!(
      field.tag,
      Tag::ExifIFDPointer | Tag::GPSInfoIFDPointer | Tag::InteropIFDPointer
    );
    if field.ifd_num != In::PRIMARY || field.tag == tag || pointer || matches!(field.value, Value::Unknown(..)) {
      continue;
    }
    writer.push_field(field);
  }
  writer.push_field(&added);

  let mut buf = Cursor::new(Vec::new());
  writer.write(&mut buf, exif.little_endian())?;
  Ok(buf.into_inner())
}

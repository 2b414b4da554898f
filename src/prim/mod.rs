// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types for representing a photo's tags and the fields derived
//! from them.

mod conv;
mod fields;
mod gps;
mod source;
mod tags;

pub use conv::*;
pub use fields::*;
pub use gps::*;
pub use source::*;
pub use tags::*;

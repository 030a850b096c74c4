use las::Vlr;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::bounds::Bounds;
use crate::model::vector3::Vector3;

pub const GENERATING_SOFTWARE: &str = "rusty-las-tiler";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Version {
	pub major: u8,
	pub minor: u8,
}

/// LAS header without point counts, which the writer derives.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
	pub file_source_id: u16,
	pub global_encoding: u16,
	pub guid: [u8; 16],
	pub version: Version,
	pub system_identifier: [u8; 32],
	pub generating_software: [u8; 32],
	pub creation_day_of_year: u16,
	pub creation_year: u16,
	pub point_format: u8,
	pub scale: Vector3,
	pub offset: Vector3,
	pub bounds: Bounds,
	pub vlrs: Vec<Vlr>,
	/// Bytes past the standard header of the version
	pub header_padding: Vec<u8>,
}

impl Header {
	pub fn new(point_format: u8, scale: Vector3, offset: Vector3) -> Header {
		Header {
			file_source_id: 0,
			global_encoding: 0,
			guid: [0; 16],
			version: Version { major: 1, minor: 2 },
			system_identifier: fixed_text(""),
			generating_software: fixed_text(GENERATING_SOFTWARE),
			creation_day_of_year: 0,
			creation_year: 0,
			point_format,
			scale,
			offset,
			bounds: Bounds::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
			vlrs: Vec::new(),
			header_padding: Vec::new(),
		}
	}

	pub fn system_identifier(&self) -> String {
		text_of(&self.system_identifier)
	}

	pub fn generating_software(&self) -> String {
		text_of(&self.generating_software)
	}

	pub fn set_system_identifier(&mut self, text: &str) {
		self.system_identifier = fixed_text(text);
	}

	pub fn to_real(&self, raw: [i32; 3]) -> Vector3 {
		let stored = Vector3::new(raw[0] as f64, raw[1] as f64, raw[2] as f64);
		stored * self.scale + self.offset
	}

	pub fn quantize(&self, point: &Vector3) -> Result<[i32; 3]> {
		Ok([
			quantize_axis(point.x, self.scale.x, self.offset.x)?,
			quantize_axis(point.y, self.scale.y, self.offset.y)?,
			quantize_axis(point.z, self.scale.z, self.offset.z)?,
		])
	}

	pub fn same_quantization(&self, other: &Header) -> bool {
		self.scale == other.scale && self.offset == other.offset
	}
}

fn quantize_axis(value: f64, scale: f64, offset: f64) -> Result<i32> {
	let stored = ((value - offset) / scale).round();
	if stored.is_finite() && stored >= i32::MIN as f64 && stored <= i32::MAX as f64 {
		Ok(stored as i32)
	} else {
		Err(Error::CoordinateOverflow {
			value,
			scale,
			offset,
		})
	}
}

/// NUL padded copy of `text`, truncated to the field width.
pub fn fixed_text<const N: usize>(text: &str) -> [u8; N] {
	let mut field = [0u8; N];
	let bytes = text.as_bytes();
	let len = bytes.len().min(N);
	field[..len].copy_from_slice(&bytes[..len]);
	field
}

pub fn text_of(field: &[u8]) -> String {
	let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
	String::from_utf8_lossy(&field[..end]).trim().to_string()
}

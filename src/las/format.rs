use las::point::Format;

use crate::error::{Error, Result};
use crate::model::dimension::{Dimension, DimensionType, Schema};

pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";
pub const INTENSITY: &str = "intensity";
pub const RETURN_NUMBER: &str = "return_number";
pub const NUMBER_OF_RETURNS: &str = "number_of_returns";
pub const SCAN_DIRECTION_FLAG: &str = "scan_direction_flag";
pub const EDGE_OF_FLIGHT_LINE: &str = "edge_of_flight_line";
pub const CLASSIFICATION: &str = "classification";
pub const SYNTHETIC: &str = "synthetic";
pub const KEY_POINT: &str = "key_point";
pub const WITHHELD: &str = "withheld";
pub const OVERLAP: &str = "overlap";
pub const SCANNER_CHANNEL: &str = "scanner_channel";
pub const SCAN_ANGLE_RANK: &str = "scan_angle_rank";
pub const SCAN_ANGLE: &str = "scan_angle";
pub const USER_DATA: &str = "user_data";
pub const POINT_SOURCE_ID: &str = "point_source_id";
pub const GPS_TIME: &str = "gps_time";
pub const RED: &str = "red";
pub const GREEN: &str = "green";
pub const BLUE: &str = "blue";
pub const NIR: &str = "nir";
pub const EXTRA_BYTES: &str = "extra_bytes";

/// Bits 6 and 7 of a header format id flag LAZ compression.
const COMPRESSION_BITS: u8 = 0xC0;

/// Uncompressed point format `id` carrying `extra_bytes` per record.
pub fn point_format(id: u8, extra_bytes: u16) -> Result<Format> {
	let mut format = Format::new(id & !COMPRESSION_BITS)?;
	if format.has_waveform {
		return Err(Error::UnsupportedPointFormat(id));
	}
	format.is_compressed = false;
	format.extra_bytes = extra_bytes;
	Ok(format)
}

pub fn format_id(id: u8) -> u8 {
	id & !COMPRESSION_BITS
}

/// Dimensions of a record of `format`, in record order.
pub fn schema(format: &Format) -> Schema {
	let mut dimensions = vec![
		Dimension::new(X, DimensionType::Int32),
		Dimension::new(Y, DimensionType::Int32),
		Dimension::new(Z, DimensionType::Int32),
		Dimension::new(INTENSITY, DimensionType::UInt16),
		Dimension::new(RETURN_NUMBER, DimensionType::UInt8),
		Dimension::new(NUMBER_OF_RETURNS, DimensionType::UInt8),
		Dimension::new(SCAN_DIRECTION_FLAG, DimensionType::UInt8),
		Dimension::new(EDGE_OF_FLIGHT_LINE, DimensionType::UInt8),
		Dimension::new(CLASSIFICATION, DimensionType::UInt8),
		Dimension::new(SYNTHETIC, DimensionType::UInt8),
		Dimension::new(KEY_POINT, DimensionType::UInt8),
		Dimension::new(WITHHELD, DimensionType::UInt8),
	];
	if format.is_extended {
		dimensions.push(Dimension::new(OVERLAP, DimensionType::UInt8));
		dimensions.push(Dimension::new(SCANNER_CHANNEL, DimensionType::UInt8));
		dimensions.push(Dimension::new(SCAN_ANGLE, DimensionType::Double));
	} else {
		dimensions.push(Dimension::new(SCAN_ANGLE_RANK, DimensionType::Int8));
	}
	dimensions.push(Dimension::new(USER_DATA, DimensionType::UInt8));
	dimensions.push(Dimension::new(POINT_SOURCE_ID, DimensionType::UInt16));
	if format.has_gps_time {
		dimensions.push(Dimension::new(GPS_TIME, DimensionType::Double));
	}
	if format.has_color {
		dimensions.push(Dimension::new(RED, DimensionType::UInt16));
		dimensions.push(Dimension::new(GREEN, DimensionType::UInt16));
		dimensions.push(Dimension::new(BLUE, DimensionType::UInt16));
	}
	if format.has_nir {
		dimensions.push(Dimension::new(NIR, DimensionType::UInt16));
	}
	if format.extra_bytes > 0 {
		dimensions.push(Dimension::new(
			EXTRA_BYTES,
			DimensionType::Bytes(format.extra_bytes),
		));
	}

	Schema::new(dimensions)
}

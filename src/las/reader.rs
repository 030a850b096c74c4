use las::point::{Format, ScanDirection};
use las::{raw, Color, Point, Read, Reader, Vlr};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::las::format::{format_id, point_format, schema};
use crate::model::bounds::Bounds;
use crate::model::dataset::{Dataset, PointBlock};
use crate::model::dimension::Column;
use crate::model::header::{Header, Version};
use crate::model::vector3::Vector3;

const LASZIP_USER_ID: &str = "laszip encoded";
const LASZIP_RECORD_ID: u16 = 22204;

/// Legacy formats store the overlap flag as this class code.
pub(crate) const OVERLAP_CLASS: u8 = 12;

pub fn read_las(path: &Path) -> Result<Dataset> {
	let dataset = from_bytes(fs::read(path)?)?;
	debug!("read {} points from {}", dataset.len(), path.display());
	Ok(dataset)
}

pub fn from_bytes(buf: Vec<u8>) -> Result<Dataset> {
	let raw = raw::Header::read_from(Cursor::new(buf.as_slice()))?;
	let mut reader = Reader::new(Cursor::new(buf))?;
	let format = point_format(
		raw.point_data_record_format,
		reader.header().point_format().extra_bytes,
	)?;
	let vlrs: Vec<Vlr> = reader
		.header()
		.vlrs()
		.iter()
		.filter(|vlr| !is_laszip(vlr))
		.cloned()
		.collect();
	let count = reader.header().number_of_points() as usize;

	let header = Header {
		file_source_id: raw.file_source_id,
		global_encoding: raw.global_encoding,
		guid: raw.guid,
		version: Version {
			major: raw.version.major,
			minor: raw.version.minor,
		},
		system_identifier: raw.system_identifier,
		generating_software: raw.generating_software,
		creation_day_of_year: raw.file_creation_day_of_year,
		creation_year: raw.file_creation_year,
		point_format: format_id(raw.point_data_record_format),
		scale: Vector3::new(raw.x_scale_factor, raw.y_scale_factor, raw.z_scale_factor),
		offset: Vector3::new(raw.x_offset, raw.y_offset, raw.z_offset),
		bounds: Bounds::new(raw.max_x, raw.max_y, raw.max_z, raw.min_x, raw.min_y, raw.min_z),
		vlrs,
		header_padding: raw.padding,
	};
	let points = decode_points(reader.points(), count, &header, &format)?;

	Ok(Dataset::new(header, points))
}

fn is_laszip(vlr: &Vlr) -> bool {
	vlr.user_id == LASZIP_USER_ID && vlr.record_id == LASZIP_RECORD_ID
}

fn decode_points<I>(points: I, count: usize, header: &Header, format: &Format) -> Result<PointBlock>
where
	I: Iterator<Item = std::result::Result<Point, las::Error>>,
{
	let mut x = Vec::with_capacity(count);
	let mut y = Vec::with_capacity(count);
	let mut z = Vec::with_capacity(count);
	let mut intensity = Vec::with_capacity(count);
	let mut return_number = Vec::with_capacity(count);
	let mut number_of_returns = Vec::with_capacity(count);
	let mut scan_direction_flag = Vec::with_capacity(count);
	let mut edge_of_flight_line = Vec::with_capacity(count);
	let mut classification = Vec::with_capacity(count);
	let mut synthetic = Vec::with_capacity(count);
	let mut key_point = Vec::with_capacity(count);
	let mut withheld = Vec::with_capacity(count);
	let mut overlap = Vec::new();
	let mut scanner_channel = Vec::new();
	let mut scan_angle = Vec::new();
	let mut scan_angle_rank = Vec::new();
	let mut user_data = Vec::with_capacity(count);
	let mut point_source_id = Vec::with_capacity(count);
	let mut gps_time = Vec::new();
	let mut red = Vec::new();
	let mut green = Vec::new();
	let mut blue = Vec::new();
	let mut nir = Vec::new();
	let mut extra = Vec::with_capacity(count * format.extra_bytes as usize);

	for point in points {
		let point = point?;
		let [px, py, pz] = header.quantize(&Vector3::new(point.x, point.y, point.z))?;
		x.push(px);
		y.push(py);
		z.push(pz);
		intensity.push(point.intensity);
		return_number.push(point.return_number);
		number_of_returns.push(point.number_of_returns);
		scan_direction_flag.push(u8::from(point.scan_direction == ScanDirection::LeftToRight));
		edge_of_flight_line.push(u8::from(point.is_edge_of_flight_line));
		synthetic.push(u8::from(point.is_synthetic));
		key_point.push(u8::from(point.is_key_point));
		withheld.push(u8::from(point.is_withheld));

		if format.is_extended {
			classification.push(u8::from(point.classification));
			overlap.push(u8::from(point.is_overlap));
			scanner_channel.push(point.scanner_channel);
			scan_angle.push(f64::from(point.scan_angle));
		} else {
			classification.push(match point.is_overlap {
				true => OVERLAP_CLASS,
				false => u8::from(point.classification),
			});
			scan_angle_rank.push(point.scan_angle as i8);
		}
		user_data.push(point.user_data);
		point_source_id.push(point.point_source_id);

		if format.has_gps_time {
			gps_time.push(point.gps_time.unwrap_or_default());
		}
		if format.has_color {
			let color = point.color.unwrap_or(Color {
				red: 0,
				green: 0,
				blue: 0,
			});
			red.push(color.red);
			green.push(color.green);
			blue.push(color.blue);
		}
		if format.has_nir {
			nir.push(point.nir.unwrap_or_default());
		}
		extra.extend_from_slice(&point.extra_bytes);
	}

	let mut columns = vec![
		Column::Int32(x),
		Column::Int32(y),
		Column::Int32(z),
		Column::UInt16(intensity),
		Column::UInt8(return_number),
		Column::UInt8(number_of_returns),
		Column::UInt8(scan_direction_flag),
		Column::UInt8(edge_of_flight_line),
		Column::UInt8(classification),
		Column::UInt8(synthetic),
		Column::UInt8(key_point),
		Column::UInt8(withheld),
	];
	if format.is_extended {
		columns.push(Column::UInt8(overlap));
		columns.push(Column::UInt8(scanner_channel));
		columns.push(Column::Double(scan_angle));
	} else {
		columns.push(Column::Int8(scan_angle_rank));
	}
	columns.push(Column::UInt8(user_data));
	columns.push(Column::UInt16(point_source_id));
	if format.has_gps_time {
		columns.push(Column::Double(gps_time));
	}
	if format.has_color {
		columns.push(Column::UInt16(red));
		columns.push(Column::UInt16(green));
		columns.push(Column::UInt16(blue));
	}
	if format.has_nir {
		columns.push(Column::UInt16(nir));
	}
	if format.extra_bytes > 0 {
		columns.push(Column::Bytes {
			width: format.extra_bytes,
			data: extra,
		});
	}

	PointBlock::new(schema(format), columns)
}

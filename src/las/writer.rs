use las::point::{Classification, Format, ScanDirection};
use las::raw::header::{Evlr, LargeFile};
use las::{raw, Color, Point, Transform, Vector};
use log::debug;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::las::format::*;
use crate::las::reader::OVERLAP_CLASS;
use crate::las::{header_size, VLR_HEADER_SIZE};
use crate::model::dataset::{Dataset, PointBlock};
use crate::model::dimension::Column;
use crate::model::header::Header;
use crate::output::write_atomically;

pub fn write_las(dataset: &Dataset, path: &Path) -> Result<()> {
	write_atomically(path, |file| write_to(dataset, file))?;
	debug!("wrote {} points to {}", dataset.len(), path.display());
	Ok(())
}

pub fn to_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
	let mut buffer = Vec::new();
	write_to(dataset, &mut buffer)?;
	Ok(buffer)
}

pub fn write_to<W: Write>(dataset: &Dataset, w: &mut W) -> Result<()> {
	let header = &dataset.header;
	let points = &dataset.points;
	let extra_width = match points.column(EXTRA_BYTES) {
		Some(Column::Bytes { width, .. }) => *width,
		_ => 0,
	};
	let format = point_format(header.point_format, extra_width)?;
	let minor = header.version.minor;
	if format.is_extended && minor < 4 {
		return Err(Error::UnsupportedPointFormat(header.point_format));
	}
	let expected = schema(&format);
	if &expected != points.schema() {
		return Err(Error::SchemaMismatch {
			input: format!("point format {}", header.point_format),
			expected: expected.to_string(),
			found: points.schema().to_string(),
		});
	}

	let by_return = points_by_return(points)?;
	let total = points.len() as u64;
	let (legacy_total, legacy_by_return) = match u32::try_from(total) {
		_ if format.is_extended => (0, [0; 5]),
		Ok(total) => {
			let mut legacy = [0u32; 5];
			for (count, &n) in legacy.iter_mut().zip(&by_return) {
				*count = n as u32;
			}
			(total, legacy)
		}
		Err(_) if minor >= 4 => (0, [0; 5]),
		Err(_) => return Err(Error::TooManyPoints(points.len())),
	};

	let header_size = header_size(minor) + header.header_padding.len();
	let vlr_size: usize = header
		.vlrs
		.iter()
		.map(|vlr| VLR_HEADER_SIZE + vlr.data.len())
		.sum();
	let bounds = &header.bounds;
	let raw_header = raw::Header {
		file_source_id: header.file_source_id,
		global_encoding: header.global_encoding,
		guid: header.guid,
		version: las::Version::new(header.version.major, minor),
		system_identifier: header.system_identifier,
		generating_software: header.generating_software,
		file_creation_day_of_year: header.creation_day_of_year,
		file_creation_year: header.creation_year,
		header_size: header_size as u16,
		offset_to_point_data: (header_size + vlr_size) as u32,
		number_of_variable_length_records: header.vlrs.len() as u32,
		point_data_record_format: header.point_format,
		point_data_record_length: format.len(),
		number_of_point_records: legacy_total,
		number_of_points_by_return: legacy_by_return,
		x_scale_factor: header.scale.x,
		y_scale_factor: header.scale.y,
		z_scale_factor: header.scale.z,
		x_offset: header.offset.x,
		y_offset: header.offset.y,
		z_offset: header.offset.z,
		max_x: bounds.ux,
		min_x: bounds.lx,
		max_y: bounds.uy,
		min_y: bounds.ly,
		max_z: bounds.uz,
		min_z: bounds.lz,
		start_of_waveform_data_packet_record: (minor >= 3).then_some(0),
		evlr: (minor >= 4).then_some(Evlr {
			start_of_first_evlr: 0,
			number_of_evlrs: 0,
		}),
		large_file: (minor >= 4).then_some(LargeFile {
			number_of_point_records: total,
			number_of_points_by_return: by_return,
		}),
		padding: header.header_padding.clone(),
		..Default::default()
	};
	raw_header.write_to(&mut *w)?;

	for vlr in &header.vlrs {
		vlr.clone().into_raw(false)?.write_to(&mut *w)?;
	}

	write_points(w, header, &format, points)
}

fn points_by_return(points: &PointBlock) -> Result<[u64; 15]> {
	let mut counts = [0u64; 15];
	for &r in points.uint8s(RETURN_NUMBER)? {
		if (1..=15).contains(&r) {
			counts[r as usize - 1] += 1;
		}
	}
	Ok(counts)
}

fn write_points<W: Write>(
	w: &mut W,
	header: &Header,
	format: &Format,
	points: &PointBlock,
) -> Result<()> {
	let (x, y, z) = (points.int32s(X)?, points.int32s(Y)?, points.int32s(Z)?);
	let intensity = points.uint16s(INTENSITY)?;
	let return_number = points.uint8s(RETURN_NUMBER)?;
	let number_of_returns = points.uint8s(NUMBER_OF_RETURNS)?;
	let scan_direction_flag = points.uint8s(SCAN_DIRECTION_FLAG)?;
	let edge_of_flight_line = points.uint8s(EDGE_OF_FLIGHT_LINE)?;
	let classification = points.uint8s(CLASSIFICATION)?;
	let synthetic = points.uint8s(SYNTHETIC)?;
	let key_point = points.uint8s(KEY_POINT)?;
	let withheld = points.uint8s(WITHHELD)?;
	let user_data = points.uint8s(USER_DATA)?;
	let point_source_id = points.uint16s(POINT_SOURCE_ID)?;
	let (overlap, scanner_channel, scan_angle): (&[u8], &[u8], Vec<f32>) = match format.is_extended {
		true => (
			points.uint8s(OVERLAP)?,
			points.uint8s(SCANNER_CHANNEL)?,
			points.doubles(SCAN_ANGLE)?.iter().map(|&a| a as f32).collect(),
		),
		false => (
			&[],
			&[],
			points.int8s(SCAN_ANGLE_RANK)?.iter().map(|&a| f32::from(a)).collect(),
		),
	};
	let gps_time = match format.has_gps_time {
		true => points.doubles(GPS_TIME)?,
		false => &[][..],
	};
	let (red, green, blue) = match format.has_color {
		true => (points.uint16s(RED)?, points.uint16s(GREEN)?, points.uint16s(BLUE)?),
		false => (&[][..], &[][..], &[][..]),
	};
	let nir = match format.has_nir {
		true => points.uint16s(NIR)?,
		false => &[][..],
	};
	let extra = match points.column(EXTRA_BYTES) {
		Some(Column::Bytes { data, .. }) => data.as_slice(),
		_ => &[][..],
	};
	let extra_width = format.extra_bytes as usize;

	let transforms = Vector {
		x: Transform {
			scale: header.scale.x,
			offset: header.offset.x,
		},
		y: Transform {
			scale: header.scale.y,
			offset: header.offset.y,
		},
		z: Transform {
			scale: header.scale.z,
			offset: header.offset.z,
		},
	};

	for i in 0..points.len() {
		let real = header.to_real([x[i], y[i], z[i]]);
		// class 12 has no classification of its own, it only marks overlap
		let (class, overlap_class) = match Classification::new(classification[i]) {
			Ok(class) => (class, false),
			Err(_) if classification[i] == OVERLAP_CLASS => (Classification::Unclassified, true),
			Err(err) => return Err(err.into()),
		};
		let point = Point {
			x: real.x,
			y: real.y,
			z: real.z,
			intensity: intensity[i],
			return_number: return_number[i],
			number_of_returns: number_of_returns[i],
			scan_direction: match scan_direction_flag[i] {
				0 => ScanDirection::RightToLeft,
				_ => ScanDirection::LeftToRight,
			},
			is_edge_of_flight_line: edge_of_flight_line[i] != 0,
			classification: class,
			is_synthetic: synthetic[i] != 0,
			is_key_point: key_point[i] != 0,
			is_withheld: withheld[i] != 0,
			is_overlap: overlap_class || overlap.get(i).map_or(false, |&flag| flag != 0),
			scanner_channel: scanner_channel.get(i).copied().unwrap_or_default(),
			scan_angle: scan_angle[i],
			user_data: user_data[i],
			point_source_id: point_source_id[i],
			gps_time: format.has_gps_time.then(|| gps_time[i]),
			color: format.has_color.then(|| Color {
				red: red[i],
				green: green[i],
				blue: blue[i],
			}),
			nir: format.has_nir.then(|| nir[i]),
			extra_bytes: extra[i * extra_width..(i + 1) * extra_width].to_vec(),
			..Default::default()
		};
		point.into_raw(&transforms)?.write_to(&mut *w, format)?;
	}
	Ok(())
}

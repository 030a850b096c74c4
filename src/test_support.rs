//! Datasets built in memory for unit tests.

use std::path::Path;

use crate::las::format::*;
use crate::las::write_las;
use crate::model::bounds::{find_bounds, Bounds};
use crate::model::dataset::{Dataset, PointBlock};
use crate::model::dimension::{Column, DimensionType};
use crate::model::header::Header;
use crate::model::vector3::Vector3;

pub const SCALE: f64 = 0.01;

/// Point format 0 dataset with one point per `(x, y)`, quantized at 0.01.
pub fn sample_dataset(points: &[(f64, f64)]) -> Dataset {
	sample_dataset_with_format(0, 0, points)
}

/// Attribute values derive from the point index `i`: intensity `i`, return
/// number `i % 2 + 1`, classification `i % 3 + 1`, gps time `i + 0.5`.
/// Extended formats get a LAS 1.4 header.
pub fn sample_dataset_with_format(format_id: u8, extra_width: u16, points: &[(f64, f64)]) -> Dataset {
	let schema = schema(&point_format(format_id, extra_width).unwrap());
	let mut header = Header::new(format_id, Vector3::splat(SCALE), Vector3::splat(0.0));
	if format_id >= 6 {
		header.version.minor = 4;
	}
	let real: Vec<Vector3> = points.iter().map(|&(x, y)| Vector3::new(x, y, x + y)).collect();
	header.bounds = find_bounds(&real).unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));

	let raw: Vec<[i32; 3]> = real.iter().map(|p| header.quantize(p).unwrap()).collect();
	let n = points.len();
	let columns = schema
		.dimensions()
		.iter()
		.map(|d| match (d.name.as_str(), d.r#type) {
			(X, _) => Column::Int32(raw.iter().map(|r| r[0]).collect()),
			(Y, _) => Column::Int32(raw.iter().map(|r| r[1]).collect()),
			(Z, _) => Column::Int32(raw.iter().map(|r| r[2]).collect()),
			(INTENSITY, _) => Column::UInt16((0..n).map(|i| i as u16).collect()),
			(RETURN_NUMBER, _) => Column::UInt8((0..n).map(|i| (i % 2 + 1) as u8).collect()),
			(NUMBER_OF_RETURNS, _) => Column::UInt8(vec![2; n]),
			(CLASSIFICATION, _) => Column::UInt8((0..n).map(|i| (i % 3 + 1) as u8).collect()),
			(SCAN_ANGLE_RANK, _) => Column::Int8((0..n).map(|i| -((i % 90) as i8)).collect()),
			(SCAN_ANGLE, _) => Column::Double(vec![0.0; n]),
			(POINT_SOURCE_ID, _) => Column::UInt16(vec![7; n]),
			(GPS_TIME, _) => Column::Double((0..n).map(|i| i as f64 + 0.5).collect()),
			(RED, _) | (GREEN, _) | (BLUE, _) => {
				Column::UInt16((0..n).map(|i| (i * 257) as u16).collect())
			}
			(NIR, _) => Column::UInt16((0..n).map(|i| (i * 3) as u16).collect()),
			(_, DimensionType::Bytes(width)) => Column::Bytes {
				width,
				data: (0..n * width as usize).map(|b| b as u8).collect(),
			},
			(_, DimensionType::UInt8) => Column::UInt8((0..n).map(|i| (i % 2) as u8).collect()),
			(_, other) => panic!("no sample values for {:?}", other),
		})
		.collect();

	Dataset::new(header, PointBlock::new(schema, columns).unwrap())
}

/// `n` points on a regular lattice covering `[0, side) x [0, side)`.
pub fn lattice(n_per_axis: usize, side: f64) -> Vec<(f64, f64)> {
	let step = side / n_per_axis as f64;
	let mut points = Vec::with_capacity(n_per_axis * n_per_axis);
	for i in 0..n_per_axis {
		for j in 0..n_per_axis {
			points.push((i as f64 * step, j as f64 * step));
		}
	}
	points
}

pub fn write_sample(path: &Path, points: &[(f64, f64)]) -> Dataset {
	let dataset = sample_dataset(points);
	write_las(&dataset, path).unwrap();
	dataset
}

/// Compressed point format 0 file written by the `las` crate itself, with
/// scale 0.001 and intensity `i`.
pub fn write_laz(path: &Path, points: &[(f64, f64)]) {
	let mut builder = las::Builder::from((1, 2));
	builder.point_format.is_compressed = true;
	let header = builder.into_header().unwrap();
	let mut writer = las::Writer::from_path(path, header).unwrap();
	for (i, &(x, y)) in points.iter().enumerate() {
		let point = las::Point {
			x,
			y,
			z: x + y,
			intensity: i as u16,
			return_number: 1,
			number_of_returns: 1,
			..Default::default()
		};
		las::Write::write(&mut writer, point).unwrap();
	}
	writer.close().unwrap();
}

/// One row per point holding every dimension value, for multiset comparisons.
pub fn point_rows(dataset: &Dataset) -> Vec<String> {
	let mut rows: Vec<String> = (0..dataset.len())
		.map(|i| {
			dataset
				.points
				.iter()
				.map(|(_, column)| match column {
					Column::Int8(v) => v[i].to_string(),
					Column::UInt8(v) => v[i].to_string(),
					Column::UInt16(v) => v[i].to_string(),
					Column::Int32(v) => v[i].to_string(),
					Column::Double(v) => v[i].to_string(),
					Column::Bytes { width, data } => {
						let w = *width as usize;
						format!("{:?}", &data[i * w..(i + 1) * w])
					}
				})
				.collect::<Vec<_>>()
				.join(",")
		})
		.collect();
	rows.sort();
	rows
}

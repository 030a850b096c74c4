use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::las::format::{CLASSIFICATION, NUMBER_OF_RETURNS, RETURN_NUMBER};
use crate::las::read_las;
use crate::model::dataset::Dataset;
use crate::output::write_atomically;

/// Header metadata and attribute statistics of one LAS file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetSummary {
	pub file_path: String,
	pub version: String,
	pub point_format: u8,
	pub num_points: usize,
	pub area_m2: f64,
	pub point_density_m2: f64,
	pub system_identifier: String,
	pub generating_software: String,
	/// `YYYY-DDD`, `None` when the header carries no date
	pub creation_date: Option<String>,
	pub x_min: f64,
	pub x_max: f64,
	pub y_min: f64,
	pub y_max: f64,
	pub z_min: f64,
	pub z_max: f64,
	pub scale_x: f64,
	pub scale_y: f64,
	pub scale_z: f64,
	pub offset_x: f64,
	pub offset_y: f64,
	pub offset_z: f64,
	pub classes: BTreeMap<u8, usize>,
	pub returns: BTreeMap<u8, usize>,
	pub returns_per_pulse: BTreeMap<u8, usize>,
}

fn count_values(values: &[u8]) -> BTreeMap<u8, usize> {
	let mut counts = BTreeMap::new();
	for &value in values {
		*counts.entry(value).or_insert(0) += 1;
	}
	counts
}

impl DatasetSummary {
	pub fn new(file_path: &str, dataset: &Dataset) -> DatasetSummary {
		let header = &dataset.header;
		let bounds = &header.bounds;
		let area = bounds.area();
		let num_points = dataset.len();
		let counts = |name: &str| count_values(dataset.points.uint8s(name).unwrap_or(&[]));

		DatasetSummary {
			file_path: file_path.to_string(),
			version: format!("{}.{}", header.version.major, header.version.minor),
			point_format: header.point_format,
			num_points,
			area_m2: area,
			point_density_m2: if area > 0.0 { num_points as f64 / area } else { 0.0 },
			system_identifier: header.system_identifier(),
			generating_software: header.generating_software(),
			creation_date: if header.creation_year == 0 {
				None
			} else {
				Some(format!(
					"{:04}-{:03}",
					header.creation_year, header.creation_day_of_year
				))
			},
			x_min: bounds.lx,
			x_max: bounds.ux,
			y_min: bounds.ly,
			y_max: bounds.uy,
			z_min: bounds.lz,
			z_max: bounds.uz,
			scale_x: header.scale.x,
			scale_y: header.scale.y,
			scale_z: header.scale.z,
			offset_x: header.offset.x,
			offset_y: header.offset.y,
			offset_z: header.offset.z,
			classes: counts(CLASSIFICATION),
			returns: counts(RETURN_NUMBER),
			returns_per_pulse: counts(NUMBER_OF_RETURNS),
		}
	}

	pub fn properties(&self) -> Vec<(String, String)> {
		let mut rows: Vec<(String, String)> = vec![
			("file_path".into(), self.file_path.clone()),
			("version".into(), self.version.clone()),
			("point_format".into(), self.point_format.to_string()),
			("num_points".into(), self.num_points.to_string()),
			("area_m2".into(), self.area_m2.to_string()),
			("point_density_m2".into(), self.point_density_m2.to_string()),
			("system_identifier".into(), self.system_identifier.clone()),
			("generating_software".into(), self.generating_software.clone()),
			(
				"creation_date".into(),
				self.creation_date.clone().unwrap_or_default(),
			),
		];
		let axes = [
			("x_min", self.x_min),
			("x_max", self.x_max),
			("y_min", self.y_min),
			("y_max", self.y_max),
			("z_min", self.z_min),
			("z_max", self.z_max),
			("scale_x", self.scale_x),
			("scale_y", self.scale_y),
			("scale_z", self.scale_z),
			("offset_x", self.offset_x),
			("offset_y", self.offset_y),
			("offset_z", self.offset_z),
		];
		rows.extend(axes.iter().map(|(name, value)| (name.to_string(), value.to_string())));

		for (prefix, counts) in [
			("class", &self.classes),
			("return", &self.returns),
			("returns_per_pulse", &self.returns_per_pulse),
		] {
			rows.extend(
				counts
					.iter()
					.map(|(value, count)| (format!("{}_{}", prefix, value), count.to_string())),
			);
		}
		rows
	}
}

pub fn unix_timestamp() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_or(0, |elapsed| elapsed.as_secs())
}

pub fn summarize_file(input: &Path) -> Result<DatasetSummary> {
	let dataset = read_las(input)?;
	let path = fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf());
	info!("Processing: {}", input.display());
	Ok(DatasetSummary::new(&path.display().to_string(), &dataset))
}

/// Appends one `file_name`, `timestamp`, `property,value` block to `path`.
pub fn write_csv(summary: &DatasetSummary, path: &Path, timestamp: u64) -> Result<()> {
	let existing = if path.exists() { fs::read(path)? } else { Vec::new() };
	let file_name = Path::new(&summary.file_path)
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| summary.file_path.clone());

	write_atomically(path, |writer| {
		writer.write_all(&existing)?;
		let mut records = csv::Writer::from_writer(&mut *writer);
		records.write_record(["file_name", file_name.as_str()])?;
		records.write_record(["timestamp", timestamp.to_string().as_str()])?;
		records.write_record(["property", "value"])?;
		for (property, value) in summary.properties() {
			records.write_record([property, value])?;
		}
		records.flush()?;
		Ok(())
	})
}

pub fn write_json(summary: &DatasetSummary, path: &Path) -> Result<()> {
	write_atomically(path, |writer| {
		serde_json::to_writer_pretty(&mut *writer, summary)?;
		writer.write_all(b"\n")?;
		Ok(())
	})
}

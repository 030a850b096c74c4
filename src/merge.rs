use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::las::format::{X, Y, Z};
use crate::las::{has_las_extension, read_las, write_las};
use crate::model::bounds::find_bounds;
use crate::model::dataset::Dataset;
use crate::model::dimension::Column;
use crate::options::{MergeOptions, MergeOrder};

#[derive(Clone, Debug, PartialEq)]
pub enum MergeOutcome {
	/// Nothing to merge, no output written
	NoInputFiles,
	Merged {
		output: PathBuf,
		files: usize,
		points: usize,
		skipped: Vec<PathBuf>,
	},
}

/// The first dataset pushed fixes the header and the schema.
#[derive(Debug, Default)]
pub struct Merger {
	merged: Option<Dataset>,
}

impl Merger {
	pub fn new() -> Merger {
		Merger::default()
	}

	pub fn push(&mut self, source: &str, mut dataset: Dataset) -> Result<()> {
		let merged = match &mut self.merged {
			None => {
				self.merged = Some(dataset);
				return Ok(());
			}
			Some(merged) => merged,
		};

		if merged.schema() != dataset.schema() {
			return Err(Error::SchemaMismatch {
				input: source.to_string(),
				expected: merged.schema().to_string(),
				found: dataset.schema().to_string(),
			});
		}
		if !merged.header.same_quantization(&dataset.header) {
			debug!("re-quantizing {} into the scale and offset of the first input", source);
			requantize(&mut dataset, merged)?;
		}

		merged.points.append(&dataset.points)
	}

	pub fn finish(self) -> Option<Dataset> {
		self.merged
	}
}

fn requantize(dataset: &mut Dataset, target: &Dataset) -> Result<()> {
	let coordinates = dataset.coordinates()?;
	let mut xs = Vec::with_capacity(coordinates.len());
	let mut ys = Vec::with_capacity(coordinates.len());
	let mut zs = Vec::with_capacity(coordinates.len());
	for point in &coordinates {
		let [x, y, z] = target.header.quantize(point)?;
		xs.push(x);
		ys.push(y);
		zs.push(z);
	}
	dataset.points.replace_column(X, Column::Int32(xs))?;
	dataset.points.replace_column(Y, Column::Int32(ys))?;
	dataset.points.replace_column(Z, Column::Int32(zs))?;
	dataset.header.scale = target.header.scale;
	dataset.header.offset = target.header.offset;
	Ok(())
}

pub fn discover_inputs(input_dir: &Path, order: MergeOrder) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	for entry in fs::read_dir(input_dir)? {
		let path = entry?.path();
		if path.is_file() && has_las_extension(&path) {
			files.push(path);
		}
	}
	if order == MergeOrder::Sorted {
		files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
	}
	Ok(files)
}

/// Merged dataset and the skipped files, `None` when no file could be merged.
pub fn merge_files(files: &[PathBuf], options: &MergeOptions) -> Result<Option<(Dataset, Vec<PathBuf>)>> {
	let mut merger = Merger::new();
	let mut skipped = Vec::new();

	for (n, path) in files.iter().enumerate() {
		info!("Reading file {}/{}: {}", n + 1, files.len(), path.display());
		let result = read_las(path).and_then(|dataset| merger.push(&path.display().to_string(), dataset));
		match result {
			Ok(()) => {}
			Err(err) if options.skip_invalid => {
				warn!("skipping {}: {}", path.display(), err);
				skipped.push(path.clone());
			}
			Err(err) => return Err(err),
		}
	}

	let mut merged = match merger.finish() {
		Some(merged) => merged,
		None => return Ok(None),
	};
	if options.recompute_bounds {
		if let Some(bounds) = find_bounds(&merged.coordinates()?) {
			merged.header.bounds = bounds;
		}
	}
	Ok(Some((merged, skipped)))
}

/// An existing `output_file` inside `input_dir` is not treated as input.
pub fn merge_dir(input_dir: &Path, output_file: &Path, options: &MergeOptions) -> Result<MergeOutcome> {
	let output = fs::canonicalize(output_file).ok();
	let files: Vec<PathBuf> = discover_inputs(input_dir, options.order)?
		.into_iter()
		.filter(|path| output.is_none() || fs::canonicalize(path).ok() != output)
		.collect();

	if files.is_empty() {
		warn!("No LAS/LAZ files found in: {}", input_dir.display());
		return Ok(MergeOutcome::NoInputFiles);
	}
	info!("Found {} files to merge.", files.len());

	let (merged, skipped) = match merge_files(&files, options)? {
		Some(result) => result,
		None => {
			warn!("none of the {} files in {} could be merged", files.len(), input_dir.display());
			return Ok(MergeOutcome::NoInputFiles);
		}
	};

	write_las(&merged, output_file)?;
	debug!("wrote {} points to {}", merged.len(), output_file.display());

	Ok(MergeOutcome::Merged {
		output: output_file.to_path_buf(),
		files: files.len() - skipped.len(),
		points: merged.len(),
		skipped,
	})
}

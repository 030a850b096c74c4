use log::info;
use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

use crate::error::Result;
use crate::las::{read_las, write_las};
use crate::model::dataset::Dataset;
use crate::options::ThinOptions;

pub fn kept_count(len: usize, fraction: f64) -> usize {
	((len as f64) * fraction).floor() as usize
}

/// Kept points stay in source order; the same seed keeps the same points.
pub fn thin(dataset: &Dataset, options: &ThinOptions) -> Result<Dataset> {
	options.validate()?;

	let keep = kept_count(dataset.len(), options.fraction);
	let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
	let mut indices = index::sample(&mut rng, dataset.len(), keep).into_vec();
	indices.sort_unstable();

	Ok(dataset.select(&indices))
}

pub fn thin_file(input: &Path, output: &Path, options: &ThinOptions) -> Result<usize> {
	options.validate()?;

	let dataset = read_las(input)?;
	info!("Total points: {}", dataset.len());
	let thinned = thin(&dataset, options)?;
	info!(
		"Retaining {} points ({:.2}%)",
		thinned.len(),
		options.fraction * 100.0
	);
	write_las(&thinned, output)?;
	Ok(thinned.len())
}

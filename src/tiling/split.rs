use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::las::{read_las, write_las};
use crate::model::bounds::find_bounds;
use crate::model::dataset::Dataset;
use crate::options::SplitOptions;
use crate::tiling::assign::{assign_points, Tile};
use crate::tiling::grid::{TileGrid, TileIndex};

#[derive(Clone, Debug, PartialEq)]
pub struct WrittenTile {
	pub index: TileIndex,
	pub path: PathBuf,
	pub points: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitOutcome {
	/// `None` when the input held no points
	pub grid: Option<TileGrid>,
	pub tiles: Vec<WrittenTile>,
}

pub fn tile_file_name(index: TileIndex) -> String {
	format!("tile_{}_{}.las", index.i, index.j)
}

pub fn split_dataset(dataset: &Dataset, options: &SplitOptions) -> Result<Option<(TileGrid, Vec<Tile>)>> {
	options.validate()?;

	let points = dataset.coordinates()?;
	let extent = match find_bounds(&points) {
		Some(extent) => extent,
		None if points.is_empty() => return Ok(None),
		// every coordinate is NaN
		None => return Err(Error::UnassignedPoints(points.len())),
	};
	info!(
		"Input file extent: X({}, {}), Y({}, {})",
		extent.lx, extent.ux, extent.ly, extent.uy
	);

	let grid = TileGrid::plan(&extent, options)?;
	info!(
		"Splitting into {} x {} tiles...",
		grid.num_tiles_x(),
		grid.num_tiles_y()
	);
	let tiles = assign_points(&grid, &points)?;
	debug!("{} of {} tiles hold points", tiles.len(), grid.len());

	Ok(Some((grid, tiles)))
}

pub fn materialize(dataset: &Dataset, tile: &Tile) -> Dataset {
	dataset.select(&tile.indices)
}

/// Writes every non-empty tile of `input` to `output_dir` as `tile_{i}_{j}.las`.
pub fn split_file(input: &Path, output_dir: &Path, options: &SplitOptions) -> Result<SplitOutcome> {
	split_file_with(input, output_dir, options, |_| {})
}

/// Like [`split_file`], calling `on_tile` as soon as each tile is on disk.
pub fn split_file_with<F>(
	input: &Path,
	output_dir: &Path,
	options: &SplitOptions,
	mut on_tile: F,
) -> Result<SplitOutcome>
where
	F: FnMut(&WrittenTile),
{
	options.validate()?;

	let dataset = read_las(input)?;
	let (grid, tiles) = match split_dataset(&dataset, options)? {
		Some(planned) => planned,
		None => {
			warn!("{} holds no points, no tiles written", input.display());
			return Ok(SplitOutcome {
				grid: None,
				tiles: Vec::new(),
			});
		}
	};

	fs::create_dir_all(output_dir)?;

	let mut written = Vec::with_capacity(tiles.len());
	for tile in &tiles {
		let path = output_dir.join(tile_file_name(tile.index));
		write_las(&materialize(&dataset, tile), &path)?;
		debug!("wrote tile {} with {} points to {}", tile.index, tile.len(), path.display());
		let tile = WrittenTile {
			index: tile.index,
			path,
			points: tile.len(),
		};
		on_tile(&tile);
		written.push(tile);
	}

	Ok(SplitOutcome {
		grid: Some(grid),
		tiles: written,
	})
}

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::vector3::Vector3;
use crate::tiling::grid::{TileBounds, TileGrid, TileIndex};

/// Points of a source dataset that fall in one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
	pub index: TileIndex,
	pub bounds: TileBounds,
	/// Ascending source point indices
	pub indices: Vec<usize>,
}

impl Tile {
	pub fn len(&self) -> usize {
		self.indices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}
}

/// Non-empty tiles in index order; any point no tile holds is an error.
pub fn assign_points(grid: &TileGrid, points: &[Vector3]) -> Result<Vec<Tile>> {
	let mut buckets: BTreeMap<TileIndex, Vec<usize>> = BTreeMap::new();
	let mut outside = 0usize;

	for (n, point) in points.iter().enumerate() {
		match grid.locate(point.x, point.y) {
			Some(index) => buckets.entry(index).or_default().push(n),
			None => outside += 1,
		}
	}

	if outside > 0 {
		return Err(Error::UnassignedPoints(outside));
	}

	Ok(buckets
		.into_iter()
		.map(|(index, indices)| Tile {
			index,
			bounds: grid.bounds(index),
			indices,
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::bounds::find_bounds;
	use crate::options::SplitOptions;
	use crate::test_support::lattice;

	fn points(coordinates: &[(f64, f64)]) -> Vec<Vector3> {
		coordinates
			.iter()
			.map(|&(x, y)| Vector3::new(x, y, 0.0))
			.collect()
	}

	fn assign(coordinates: &[(f64, f64)], w: f64, h: f64) -> (TileGrid, Vec<Tile>) {
		let points = points(coordinates);
		let extent = find_bounds(&points).unwrap();
		let grid = TileGrid::plan(&extent, &SplitOptions::new(w, h)).unwrap();
		let tiles = assign_points(&grid, &points).unwrap();
		(grid, tiles)
	}

	#[test]
	fn every_point_lands_in_exactly_one_tile() {
		let mut coordinates = lattice(13, 97.0);
		// corners and edges of the extent
		coordinates.extend([(0.0, 0.0), (97.0, 0.0), (0.0, 97.0), (97.0, 97.0), (48.5, 97.0)]);
		let (_, tiles) = assign(&coordinates, 10.0, 25.0);

		let mut seen = vec![0u32; coordinates.len()];
		for tile in &tiles {
			for &n in &tile.indices {
				seen[n] += 1;
			}
		}
		assert!(seen.iter().all(|&count| count == 1));
	}

	#[test]
	fn points_on_the_global_maximum_are_kept() {
		let coordinates = [(0.0, 0.0), (25.0, 25.0), (100.0, 40.0), (40.0, 100.0), (100.0, 100.0)];
		let (_, tiles) = assign(&coordinates, 50.0, 50.0);

		let total: usize = tiles.iter().map(Tile::len).sum();
		assert_eq!(total, coordinates.len());
		let last = tiles.iter().find(|t| t.index == TileIndex::new(1, 1)).unwrap();
		assert_eq!(last.indices, vec![4]);
	}

	#[test]
	fn empty_tiles_are_not_returned() {
		// two clusters in opposite corners of a 3 x 3 grid
		let coordinates = [(0.0, 0.0), (1.0, 1.0), (29.0, 29.0), (30.0, 30.0)];
		let (grid, tiles) = assign(&coordinates, 10.0, 10.0);

		assert_eq!(grid.len(), 9);
		let indices: Vec<TileIndex> = tiles.iter().map(|t| t.index).collect();
		assert_eq!(indices, vec![TileIndex::new(0, 0), TileIndex::new(2, 2)]);
		assert!(tiles.iter().all(|t| !t.is_empty()));
	}

	#[test]
	fn points_outside_the_grid_are_an_error() {
		let inside = points(&[(0.0, 0.0), (10.0, 10.0)]);
		let grid = TileGrid::plan(&find_bounds(&inside).unwrap(), &SplitOptions::new(5.0, 5.0)).unwrap();

		let mut stray = inside.clone();
		stray.push(Vector3::new(10.5, 3.0, 0.0));
		stray.push(Vector3::new(f64::NAN, 3.0, 0.0));
		let err = assign_points(&grid, &stray).unwrap_err();
		assert!(matches!(err, Error::UnassignedPoints(2)));
	}

	#[test]
	fn indices_keep_source_order() {
		let coordinates = [(9.0, 1.0), (1.0, 1.0), (60.0, 1.0), (5.0, 2.0)];
		let (_, tiles) = assign(&coordinates, 50.0, 50.0);
		assert_eq!(tiles[0].indices, vec![0, 1, 3]);
		assert_eq!(tiles[1].indices, vec![2]);
	}

	#[test]
	fn four_quadrants_of_a_hundred_points() {
		let coordinates = lattice(10, 100.0);
		let (grid, tiles) = assign(&coordinates, 50.0, 50.0);

		assert_eq!(grid.num_tiles_x(), 2);
		assert_eq!(grid.num_tiles_y(), 2);
		let indices: Vec<TileIndex> = tiles.iter().map(|t| t.index).collect();
		assert_eq!(
			indices,
			vec![
				TileIndex::new(0, 0),
				TileIndex::new(0, 1),
				TileIndex::new(1, 0),
				TileIndex::new(1, 1)
			]
		);
		assert_eq!(tiles.iter().map(Tile::len).sum::<usize>(), 100);
	}
}

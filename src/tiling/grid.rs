use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::bounds::Bounds;
use crate::options::SplitOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TileIndex {
	pub i: usize,
	pub j: usize,
}

impl TileIndex {
	pub fn new(i: usize, j: usize) -> TileIndex {
		TileIndex { i, j }
	}
}

impl fmt::Display for TileIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.i, self.j)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TileBounds {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

/// One axis of the grid: `count` cells of `size` starting at `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Axis {
	origin: f64,
	size: f64,
	count: usize,
	/// Closed upper bound of the last cell
	upper: f64,
}

/// Cells per axis beyond which a tiling is refused.
const MAX_CELLS: f64 = u32::MAX as f64;

impl Axis {
	fn new(min: f64, max: f64, size: f64) -> Option<Axis> {
		let cells = ((max - min) / size).ceil().max(1.0);
		if !(cells <= MAX_CELLS) {
			return None;
		}
		let count = cells as usize;
		let mut axis = Axis {
			origin: min,
			size,
			count,
			upper: max,
		};
		axis.upper = axis.edge(count).max(max);
		Some(axis)
	}

	/// Lower edge of cell `k`; the upper edge of cell `k - 1`.
	fn edge(&self, k: usize) -> f64 {
		self.origin + k as f64 * self.size
	}

	fn contains(&self, k: usize, value: f64) -> bool {
		let last = self.count - 1;
		k <= last
			&& self.edge(k) <= value
			&& if k == last {
				value <= self.upper
			} else {
				value < self.edge(k + 1)
			}
	}

	fn locate(&self, value: f64) -> Option<usize> {
		if !(value >= self.origin && value <= self.upper) {
			return None;
		}

		// first guess by division, then settle against the exact edges
		let last = self.count - 1;
		let mut k = (((value - self.origin) / self.size).floor() as usize).min(last);
		while k > 0 && value < self.edge(k) {
			k -= 1;
		}
		while k < last && value >= self.edge(k + 1) {
			k += 1;
		}
		Some(k)
	}
}

/// Tiles are half open, except the last column and row which are closed at
/// the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
	x: Axis,
	y: Axis,
	tiles: usize,
}

impl TileGrid {
	pub fn plan(extent: &Bounds, options: &SplitOptions) -> Result<TileGrid> {
		options.validate()?;
		let too_many = || Error::TooManyTiles {
			width: options.tile_width,
			height: options.tile_height,
		};
		let x = Axis::new(extent.lx, extent.ux, options.tile_width).ok_or_else(too_many)?;
		let y = Axis::new(extent.ly, extent.uy, options.tile_height).ok_or_else(too_many)?;
		let tiles = x.count.checked_mul(y.count).ok_or_else(too_many)?;
		Ok(TileGrid { x, y, tiles })
	}

	pub fn num_tiles_x(&self) -> usize {
		self.x.count
	}

	pub fn num_tiles_y(&self) -> usize {
		self.y.count
	}

	pub fn len(&self) -> usize {
		self.tiles
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn indices(&self) -> impl Iterator<Item = TileIndex> {
		let ny = self.y.count;
		(0..self.x.count).flat_map(move |i| (0..ny).map(move |j| TileIndex::new(i, j)))
	}

	pub fn bounds(&self, index: TileIndex) -> TileBounds {
		TileBounds {
			min_x: self.x.edge(index.i),
			max_x: self.x.edge(index.i + 1),
			min_y: self.y.edge(index.j),
			max_y: self.y.edge(index.j + 1),
		}
	}

	pub fn contains(&self, index: TileIndex, x: f64, y: f64) -> bool {
		self.x.contains(index.i, x) && self.y.contains(index.j, y)
	}

	/// The single tile holding `(x, y)`, `None` outside the grid.
	pub fn locate(&self, x: f64, y: f64) -> Option<TileIndex> {
		Some(TileIndex::new(self.x.locate(x)?, self.y.locate(y)?))
	}
}

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitOptions {
	pub tile_width: f64,
	pub tile_height: f64,
}

impl SplitOptions {
	pub fn new(tile_width: f64, tile_height: f64) -> SplitOptions {
		SplitOptions {
			tile_width,
			tile_height,
		}
	}

	pub fn validate(&self) -> Result<()> {
		let valid = |size: f64| size.is_finite() && size > 0.0;
		if valid(self.tile_width) && valid(self.tile_height) {
			Ok(())
		} else {
			Err(Error::InvalidTileSize {
				width: self.tile_width,
				height: self.tile_height,
			})
		}
	}
}

/// Order in which discovered merge inputs are processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergeOrder {
	/// Sorted by file name, identical on every platform
	#[default]
	Sorted,
	/// Whatever order the file system lists the directory in
	Listing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOptions {
	pub order: MergeOrder,
	/// Log and skip unreadable or mismatching inputs instead of failing
	pub skip_invalid: bool,
	/// Replace the inherited bounds with those of the merged points
	pub recompute_bounds: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThinOptions {
	pub fraction: f64,
	pub seed: u64,
}

impl ThinOptions {
	pub fn validate(&self) -> Result<()> {
		if self.fraction > 0.0 && self.fraction < 1.0 {
			Ok(())
		} else {
			Err(Error::InvalidFraction(self.fraction))
		}
	}
}

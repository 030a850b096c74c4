use thiserror::Error;

use crate::model::dimension::DimensionType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	/// Tile width and height must be finite and strictly positive
	#[error("tile width and height must be positive, got {width} x {height}")]
	InvalidTileSize { width: f64, height: f64 },

	/// A merge input does not expose the schema of the first input
	#[error("schema of {input} does not match the first input: expected [{expected}], found [{found}]")]
	SchemaMismatch {
		input: String,
		expected: String,
		found: String,
	},

	#[error("a {width} x {height} tiling of this extent needs more tiles than can be addressed")]
	TooManyTiles { width: f64, height: f64 },

	#[error("{0} points fall outside every tile")]
	UnassignedPoints(usize),

	#[error("unsupported point format {0}")]
	UnsupportedPointFormat(u8),

	#[error("column {name} has {found} values, expected {expected}")]
	ColumnLength {
		name: String,
		expected: usize,
		found: usize,
	},

	#[error("column {name} holds {found:?} values, expected {expected:?}")]
	ColumnType {
		name: String,
		expected: DimensionType,
		found: DimensionType,
	},

	#[error("{0} points do not fit the point count of this LAS version")]
	TooManyPoints(usize),

	#[error("dimension {0} is not part of the schema")]
	MissingDimension(String),

	/// A real coordinate does not fit the quantization of the target header
	#[error("coordinate {value} cannot be stored with scale {scale} and offset {offset}")]
	CoordinateOverflow { value: f64, scale: f64, offset: f64 },

	#[error("fraction must be between 0 and 1 (exclusive), got {0}")]
	InvalidFraction(f64),

	#[error(transparent)]
	Las(#[from] las::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

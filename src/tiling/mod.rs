pub mod assign;
pub mod grid;
pub mod split;

pub use assign::{assign_points, Tile};
pub use grid::{TileBounds, TileGrid, TileIndex};
pub use split::{split_dataset, split_file, split_file_with, tile_file_name, SplitOutcome, WrittenTile};

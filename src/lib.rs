pub mod error;
pub mod info;
pub mod las;
pub mod merge;
pub mod model;
pub mod options;
pub mod output;
pub mod thinning;
pub mod tiling;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};

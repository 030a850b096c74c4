//! LAS and LAZ container, versions 1.0 to 1.4, non-waveform point formats.

pub mod format;
pub mod reader;
pub mod writer;

pub use reader::read_las;
pub use writer::write_las;

/// Extensions merge discovery accepts, compared case-insensitively.
pub const EXTENSIONS: [&str; 2] = ["las", "laz"];

/// Fixed part of a variable length record, before its payload.
pub const VLR_HEADER_SIZE: usize = 54;

pub fn header_size(minor: u8) -> usize {
	match minor {
		0..=2 => 227,
		3 => 235,
		_ => 375,
	}
}

pub fn has_las_extension(path: &std::path::Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
		.unwrap_or(false)
}

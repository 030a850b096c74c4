use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;

/// On failure whatever was at `path` before is left untouched.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
	F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut temp = NamedTempFile::new_in(dir)?;
	{
		let mut writer = BufWriter::new(temp.as_file_mut());
		write(&mut writer)?;
		writer.flush()?;
	}
	temp.as_file().sync_all()?;
	temp.persist(path).map_err(|e| e.error)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use std::fs;
	use tempfile::tempdir;

	#[test]
	fn replaces_existing_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
		let dir = tempdir()?;
		let path = dir.path().join("out.bin");
		fs::write(&path, b"old contents that are longer")?;

		write_atomically(&path, |w| {
			w.write_all(b"new")?;
			Ok(())
		})?;

		assert_eq!(fs::read(&path)?, b"new");
		Ok(())
	}

	#[test]
	fn failed_write_leaves_nothing_behind() -> std::result::Result<(), Box<dyn std::error::Error>> {
		let dir = tempdir()?;
		let path = dir.path().join("out.bin");
		fs::write(&path, b"previous")?;

		let result = write_atomically(&path, |w| {
			w.write_all(b"partial")?;
			Err(Error::MissingDimension("payload".into()))
		});

		assert!(result.is_err());
		assert_eq!(fs::read(&path)?, b"previous");
		assert_eq!(fs::read_dir(dir.path())?.count(), 1);
		Ok(())
	}
}

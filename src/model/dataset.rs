use crate::error::{Error, Result};
use crate::model::dimension::{Column, Dimension, DimensionType, Schema};
use crate::model::header::Header;
use crate::model::vector3::Vector3;

macro_rules! typed_accessor {
	($fn_name:ident, $variant:ident, $t:ty) => {
		pub fn $fn_name(&self, name: &str) -> Result<&[$t]> {
			match self.column(name) {
				Some(Column::$variant(values)) => Ok(values),
				Some(other) => Err(Error::ColumnType {
					name: name.to_string(),
					expected: DimensionType::$variant,
					found: other.r#type(),
				}),
				None => Err(Error::MissingDimension(name.to_string())),
			}
		}
	};
}

/// Columns of every point, keyed by the dimensions of a schema.
#[derive(Clone, Debug, PartialEq)]
pub struct PointBlock {
	schema: Schema,
	columns: Vec<Column>,
	len: usize,
}

impl PointBlock {
	/// Checks that there is one column per dimension, of the declared type,
	/// and that all columns have the same length.
	pub fn new(schema: Schema, columns: Vec<Column>) -> Result<PointBlock> {
		if columns.len() != schema.len() {
			return Err(Error::ColumnLength {
				name: "<columns>".to_string(),
				expected: schema.len(),
				found: columns.len(),
			});
		}

		let len = columns.first().map(Column::len).unwrap_or(0);
		for (dimension, column) in schema.dimensions().iter().zip(&columns) {
			if column.r#type() != dimension.r#type {
				return Err(Error::ColumnType {
					name: dimension.name.clone(),
					expected: dimension.r#type,
					found: column.r#type(),
				});
			}
			if column.len() != len {
				return Err(Error::ColumnLength {
					name: dimension.name.clone(),
					expected: len,
					found: column.len(),
				});
			}
		}

		Ok(PointBlock {
			schema,
			columns,
			len,
		})
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Dimension, &Column)> {
		self.schema.dimensions().iter().zip(&self.columns)
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.schema.position(name).map(|i| &self.columns[i])
	}

	/// Swaps in new values for one dimension. Type and length must not change.
	pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
		let index = self
			.schema
			.position(name)
			.ok_or_else(|| Error::MissingDimension(name.to_string()))?;
		let expected = self.schema.dimensions()[index].r#type;
		if column.r#type() != expected {
			return Err(Error::ColumnType {
				name: name.to_string(),
				expected,
				found: column.r#type(),
			});
		}
		if column.len() != self.len {
			return Err(Error::ColumnLength {
				name: name.to_string(),
				expected: self.len,
				found: column.len(),
			});
		}
		self.columns[index] = column;
		Ok(())
	}

	pub fn select(&self, indices: &[usize]) -> PointBlock {
		PointBlock {
			schema: self.schema.clone(),
			columns: self.columns.iter().map(|c| c.select(indices)).collect(),
			len: indices.len(),
		}
	}

	pub fn append(&mut self, other: &PointBlock) -> Result<()> {
		if self.schema != other.schema {
			return Err(Error::SchemaMismatch {
				input: "<point block>".to_string(),
				expected: self.schema.to_string(),
				found: other.schema.to_string(),
			});
		}
		for (dimension, (column, extra)) in self
			.schema
			.dimensions()
			.iter()
			.zip(self.columns.iter_mut().zip(&other.columns))
		{
			column.extend(&dimension.name, extra)?;
		}
		self.len += other.len;
		Ok(())
	}

	typed_accessor!(int8s, Int8, i8);
	typed_accessor!(uint8s, UInt8, u8);
	typed_accessor!(uint16s, UInt16, u16);
	typed_accessor!(int32s, Int32, i32);
	typed_accessor!(doubles, Double, f64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
	pub header: Header,
	pub points: PointBlock,
}

impl Dataset {
	pub fn new(header: Header, points: PointBlock) -> Dataset {
		Dataset { header, points }
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn schema(&self) -> &Schema {
		self.points.schema()
	}

	pub fn raw_coordinates(&self) -> Result<(&[i32], &[i32], &[i32])> {
		Ok((
			self.points.int32s("x")?,
			self.points.int32s("y")?,
			self.points.int32s("z")?,
		))
	}

	pub fn coordinates(&self) -> Result<Vec<Vector3>> {
		let (xs, ys, zs) = self.raw_coordinates()?;
		Ok(xs
			.iter()
			.zip(ys)
			.zip(zs)
			.map(|((&x, &y), &z)| self.header.to_real([x, y, z]))
			.collect())
	}

	pub fn select(&self, indices: &[usize]) -> Dataset {
		Dataset {
			header: self.header.clone(),
			points: self.points.select(indices),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::sample_dataset;
	use approx::assert_relative_eq;

	#[test]
	fn rejects_misaligned_columns() {
		let schema = Schema::new(vec![
			Dimension::new("intensity", DimensionType::UInt16),
			Dimension::new("classification", DimensionType::UInt8),
		]);
		let err = PointBlock::new(
			schema,
			vec![Column::UInt16(vec![1, 2, 3]), Column::UInt8(vec![2, 2])],
		)
		.unwrap_err();

		assert!(matches!(err, Error::ColumnLength { ref name, expected: 3, found: 2 } if name == "classification"));
	}

	#[test]
	fn rejects_wrong_column_type() {
		let schema = Schema::new(vec![Dimension::new("intensity", DimensionType::UInt16)]);
		let err = PointBlock::new(schema, vec![Column::UInt8(vec![1])]).unwrap_err();
		assert!(matches!(err, Error::ColumnType { .. }));
	}

	#[test]
	fn select_slices_every_dimension() -> Result<()> {
		let dataset = sample_dataset(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
		let tile = dataset.select(&[1, 3]);

		assert_eq!(tile.len(), 2);
		assert_eq!(tile.header, dataset.header);
		assert_eq!(tile.schema(), dataset.schema());
		assert_eq!(tile.points.uint16s("intensity")?, &[1, 3]);
		let coordinates = tile.coordinates()?;
		assert_relative_eq!(coordinates[0].x, 1.0, epsilon = 1e-9);
		assert_relative_eq!(coordinates[1].y, 3.0, epsilon = 1e-9);
		Ok(())
	}

	#[test]
	fn append_concatenates_in_order() -> Result<()> {
		let mut first = sample_dataset(&[(0.0, 0.0), (1.0, 0.0)]).points;
		let second = sample_dataset(&[(5.0, 5.0)]).points;
		first.append(&second)?;

		assert_eq!(first.len(), 3);
		assert_eq!(first.int32s("x")?, &[0, 100, 500]);
		Ok(())
	}

	#[test]
	fn typed_access_checks_name_and_type() {
		let dataset = sample_dataset(&[(0.0, 0.0)]);
		assert!(matches!(
			dataset.points.uint8s("nope"),
			Err(Error::MissingDimension(_))
		));
		assert!(matches!(
			dataset.points.uint8s("intensity"),
			Err(Error::ColumnType { .. })
		));
	}
}

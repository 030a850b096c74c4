use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DimensionType {
	Int8,
	UInt8,
	UInt16,
	Int32,
	Double,
	/// Opaque fixed-width bytes per point
	Bytes(u16),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dimension {
	pub name: String,
	pub r#type: DimensionType,
}

impl Dimension {
	pub fn new(name: &str, r#type: DimensionType) -> Dimension {
		Dimension {
			name: name.to_string(),
			r#type,
		}
	}
}

/// Ordered list of the dimensions every point carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
	dimensions: Vec<Dimension>,
}

impl Schema {
	pub fn new(dimensions: Vec<Dimension>) -> Schema {
		Schema { dimensions }
	}

	pub fn dimensions(&self) -> &[Dimension] {
		&self.dimensions
	}

	pub fn len(&self) -> usize {
		self.dimensions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.dimensions.is_empty()
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.dimensions.iter().position(|d| d.name == name)
	}

	pub fn get(&self, name: &str) -> Option<&Dimension> {
		self.dimensions.iter().find(|d| d.name == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.dimensions.iter().map(|d| d.name.as_str())
	}
}

impl fmt::Display for Schema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, dimension) in self.dimensions.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}:{:?}", dimension.name, dimension.r#type)?;
		}
		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
	Int8(Vec<i8>),
	UInt8(Vec<u8>),
	UInt16(Vec<u16>),
	Int32(Vec<i32>),
	Double(Vec<f64>),
	Bytes { width: u16, data: Vec<u8> },
}

impl Column {
	pub fn r#type(&self) -> DimensionType {
		match self {
			Column::Int8(_) => DimensionType::Int8,
			Column::UInt8(_) => DimensionType::UInt8,
			Column::UInt16(_) => DimensionType::UInt16,
			Column::Int32(_) => DimensionType::Int32,
			Column::Double(_) => DimensionType::Double,
			Column::Bytes { width, .. } => DimensionType::Bytes(*width),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Column::Int8(values) => values.len(),
			Column::UInt8(values) => values.len(),
			Column::UInt16(values) => values.len(),
			Column::Int32(values) => values.len(),
			Column::Double(values) => values.len(),
			Column::Bytes { width, data } => match width {
				0 => 0,
				w => data.len() / *w as usize,
			},
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn select(&self, indices: &[usize]) -> Column {
		fn pick<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
			indices.iter().map(|&i| values[i]).collect()
		}

		match self {
			Column::Int8(values) => Column::Int8(pick(values, indices)),
			Column::UInt8(values) => Column::UInt8(pick(values, indices)),
			Column::UInt16(values) => Column::UInt16(pick(values, indices)),
			Column::Int32(values) => Column::Int32(pick(values, indices)),
			Column::Double(values) => Column::Double(pick(values, indices)),
			Column::Bytes { width, data } => {
				let w = *width as usize;
				let mut selected = Vec::with_capacity(indices.len() * w);
				for &i in indices {
					selected.extend_from_slice(&data[i * w..(i + 1) * w]);
				}
				Column::Bytes {
					width: *width,
					data: selected,
				}
			}
		}
	}

	pub fn extend(&mut self, name: &str, other: &Column) -> Result<()> {
		match (self, other) {
			(Column::Int8(a), Column::Int8(b)) => a.extend_from_slice(b),
			(Column::UInt8(a), Column::UInt8(b)) => a.extend_from_slice(b),
			(Column::UInt16(a), Column::UInt16(b)) => a.extend_from_slice(b),
			(Column::Int32(a), Column::Int32(b)) => a.extend_from_slice(b),
			(Column::Double(a), Column::Double(b)) => a.extend_from_slice(b),
			(
				Column::Bytes { width: wa, data: a },
				Column::Bytes { width: wb, data: b },
			) if wa == wb => a.extend_from_slice(b),
			(this, other) => {
				return Err(Error::ColumnType {
					name: name.to_string(),
					expected: this.r#type(),
					found: other.r#type(),
				})
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn select_keeps_requested_order() {
		let column = Column::UInt16(vec![10, 11, 12, 13]);
		assert_eq!(column.select(&[3, 0, 2]), Column::UInt16(vec![13, 10, 12]));
	}

	#[test]
	fn select_slices_fixed_width_bytes() {
		let column = Column::Bytes {
			width: 2,
			data: vec![1, 2, 3, 4, 5, 6],
		};
		let selected = column.select(&[2, 0]);

		assert_eq!(selected.len(), 2);
		assert_eq!(
			selected,
			Column::Bytes {
				width: 2,
				data: vec![5, 6, 1, 2]
			}
		);
	}

	#[test]
	fn extend_rejects_other_types() {
		let mut column = Column::UInt8(vec![1]);
		let err = column.extend("classification", &Column::UInt16(vec![2])).unwrap_err();
		assert!(matches!(err, Error::ColumnType { .. }));

		column.extend("classification", &Column::UInt8(vec![2, 3])).unwrap();
		assert_eq!(column, Column::UInt8(vec![1, 2, 3]));
	}

	#[test]
	fn schema_display_lists_dimensions_in_order() {
		let schema = Schema::new(vec![
			Dimension::new("x", DimensionType::Int32),
			Dimension::new("intensity", DimensionType::UInt16),
		]);
		assert_eq!(schema.to_string(), "x:Int32, intensity:UInt16");
		assert_eq!(schema.position("intensity"), Some(1));
		assert!(schema.get("gps_time").is_none());
	}
}

use serde::Serialize;
use std::ops;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Vector3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vector3 {
	pub fn new(x: f64, y: f64, z: f64) -> Vector3 {
		Vector3 { x, y, z }
	}

	pub fn splat(value: f64) -> Vector3 {
		Vector3 {
			x: value,
			y: value,
			z: value,
		}
	}

	pub fn from_array(values: [f64; 3]) -> Vector3 {
		Vector3 {
			x: values[0],
			y: values[1],
			z: values[2],
		}
	}

	pub fn to_array(&self) -> [f64; 3] {
		[self.x, self.y, self.z]
	}
}

impl ops::Mul<Vector3> for Vector3 {
	type Output = Vector3;

	fn mul(self, _rhs: Vector3) -> Vector3 {
		Vector3 {
			x: self.x * _rhs.x,
			y: self.y * _rhs.y,
			z: self.z * _rhs.z,
		}
	}
}

impl ops::Add<Vector3> for Vector3 {
	type Output = Vector3;

	fn add(self, _rhs: Vector3) -> Vector3 {
		Vector3 {
			x: self.x + _rhs.x,
			y: self.y + _rhs.y,
			z: self.z + _rhs.z,
		}
	}
}

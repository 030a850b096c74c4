use crate::model::vector3::Vector3;
use ord_subset::OrdSubsetIterExt;
use serde::Serialize;

/// Axis-aligned box, `l*` lower and `u*` upper corner.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
    pub ux: f64,
    pub uy: f64,
    pub uz: f64,
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl Bounds {
    pub fn new(ux: f64, uy: f64, uz: f64, lx: f64, ly: f64, lz: f64) -> Bounds {
        Bounds {
            size_x: (lx - ux).abs(),
            size_y: (ly - uy).abs(),
            size_z: (lz - uz).abs(),
            ux,
            uy,
            uz,
            lx,
            ly,
            lz,
        }
    }

    pub fn min(&self) -> Vector3 {
        Vector3::new(self.lx, self.ly, self.lz)
    }

    pub fn max(&self) -> Vector3 {
        Vector3::new(self.ux, self.uy, self.uz)
    }

    /// Planar footprint, 0 for degenerate boxes.
    pub fn area(&self) -> f64 {
        self.size_x * self.size_y
    }
}

/// Smallest box holding every point, `None` when there are no comparable
/// coordinates.
pub fn find_bounds(points: &[Vector3]) -> Option<Bounds> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = points.iter().map(|p| p.z).collect();

    Some(Bounds::new(
        *xs.iter().ord_subset_max()?,
        *ys.iter().ord_subset_max()?,
        *zs.iter().ord_subset_max()?,
        *xs.iter().ord_subset_min()?,
        *ys.iter().ord_subset_min()?,
        *zs.iter().ord_subset_min()?,
    ))
}

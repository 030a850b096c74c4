pub mod bounds;
pub mod dataset;
pub mod dimension;
pub mod header;
pub mod vector3;

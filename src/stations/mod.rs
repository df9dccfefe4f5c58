pub mod coordinates;
pub mod reduce;

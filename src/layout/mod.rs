pub mod params;
pub mod placement;

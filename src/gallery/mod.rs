pub mod model;
pub mod paginate;
pub mod source;

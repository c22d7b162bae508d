pub mod predict;
pub mod status;
pub mod weekly;

pub use predict::predict;
pub use status::status;
pub use weekly::weekly;

pub mod error;
pub mod geometry;
pub mod path;
pub mod settings;

pub use error::*;
pub use geometry::*;
pub use path::*;
pub use settings::*;

pub mod error;
pub mod grid;

pub use error::{ArcError, Result};
pub use grid::{Grid, GridError};

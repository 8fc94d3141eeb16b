mod catalog;
mod content;
mod error;

pub use catalog::*;
pub use content::*;
pub use error::*;

pub mod content;
pub mod gemini;
pub mod image;
pub mod requests;
pub mod style;

pub use content::*;
pub use image::*;
pub use requests::*;
pub use style::*;

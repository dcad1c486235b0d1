//! Domain models for the snapmint pipeline
//!
//! Types for the image stages, upload records, recipient resolution and
//! the mint request lifecycle.

mod image;
mod mint;
mod recipient;
mod upload;

pub use image::*;
pub use mint::*;
pub use recipient::*;
pub use upload::*;

//! Service layer for image-brightness
//!
//! Infrastructure concerns (files, byte buffers, async streams) live here so
//! the analysis pipeline only ever sees decoded images.

pub mod io;

pub use io::{format_name, ImageIOService, LoadedImage};

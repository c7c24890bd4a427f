//! Library for rendering procedural application icons and packaging them into
//! Windows Icon (.ico) files.
//!
//! Icons are drawn from vector shapes (a rounded-rectangle background with a
//! code glyph) at any pixel size, then written out as standalone PNG files
//! and as a multi-resolution ICO container whose entries hold PNG payloads.
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) for more information
//! about the file format.
//!
//! # Example
//!
//! ```no_run
//! use appicon::{GlyphRenderer, write_ico, DEFAULT_VARIANT_THRESHOLD};
//! use std::path::Path;
//!
//! let renderer = GlyphRenderer::default();
//! write_ico(&[16, 32, 48, 256],
//!           &renderer,
//!           DEFAULT_VARIANT_THRESHOLD,
//!           Path::new("icon.ico"))
//!     .expect("failed to write ICO file");
//! ```

#![warn(missing_docs)]

mod config;
mod entry;
mod generate;
mod icondir;
mod image;
mod pngio;
mod raster;

pub use self::config::{IconConfig, PngTarget, validate_sizes};
pub use self::entry::{DirRecord, ICON_DIR_ENTRY_LENGTH, IconDirEntry,
                      dimension_byte};
pub use self::generate::{build_icon_dir, generate, write_ico, write_png};
pub use self::icondir::{ICON_DIR_HEADER_LENGTH, IconDir, ResourceType};
pub use self::image::Image;
pub use self::raster::{DEFAULT_VARIANT_THRESHOLD, GlyphRenderer, Palette,
                       Rasterizer, Rgb, Variant};

use std::io::{self, Error, ErrorKind};

use super::raster::{DEFAULT_VARIANT_THRESHOLD, GlyphRenderer, Palette};

/// A standalone PNG file to render.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PngTarget {
    /// File name, relative to the output directory.
    pub filename: String,
    /// Width and height of the image, in pixels.
    pub size: u32,
}

impl PngTarget {
    /// Creates a PNG target.
    pub fn new(filename: &str, size: u32) -> PngTarget {
        PngTarget {
            filename: filename.to_string(),
            size,
        }
    }
}

/// Everything one generation run produces.
#[derive(Clone, Debug, PartialEq)]
pub struct IconConfig {
    /// Standalone PNG files, written in this order.
    pub png_targets: Vec<PngTarget>,
    /// Sizes stored in the ICO file, in directory order.
    pub ico_sizes: Vec<u32>,
    /// File name of the ICO file, relative to the output directory.
    pub ico_filename: String,
    /// Sizes strictly below this use the simplified glyph.
    pub variant_threshold: u32,
    /// Colors to draw with.  `generate` draws with whatever renderer it is
    /// given; use [`IconConfig::renderer`](#method.renderer) to get one that
    /// draws with these colors.
    pub palette: Palette,
}

impl Default for IconConfig {
    /// The icon set expected by a Tauri application bundle.
    fn default() -> IconConfig {
        IconConfig {
            png_targets: vec![
                PngTarget::new("32x32.png", 32),
                PngTarget::new("128x128.png", 128),
                PngTarget::new("128x128@2x.png", 256),
                PngTarget::new("icon.png", 512),
                PngTarget::new("Square30x30Logo.png", 30),
                PngTarget::new("Square44x44Logo.png", 44),
                PngTarget::new("Square71x71Logo.png", 71),
                PngTarget::new("Square89x89Logo.png", 89),
                PngTarget::new("Square107x107Logo.png", 107),
                PngTarget::new("Square142x142Logo.png", 142),
                PngTarget::new("Square150x150Logo.png", 150),
                PngTarget::new("Square284x284Logo.png", 284),
                PngTarget::new("Square310x310Logo.png", 310),
                PngTarget::new("StoreLogo.png", 50),
            ],
            ico_sizes: vec![16, 24, 32, 48, 64, 128, 256],
            ico_filename: "icon.ico".to_string(),
            variant_threshold: DEFAULT_VARIANT_THRESHOLD,
            palette: Palette::default(),
        }
    }
}

impl IconConfig {
    /// Creates the glyph renderer that draws with this config's palette.
    pub fn renderer(&self) -> GlyphRenderer {
        GlyphRenderer::new(self.palette)
    }

    /// Checks that every size is positive and every file name non-empty.
    pub fn validate(&self) -> io::Result<()> {
        if self.variant_threshold == 0 {
            return Err(invalid_input("variant threshold must be at least 1"
                .to_string()));
        }
        for target in &self.png_targets {
            if target.filename.is_empty() {
                return Err(invalid_input(format!("PNG target of size {} has \
                                                  no file name",
                                                 target.size)));
            }
            if target.size == 0 {
                return Err(invalid_input(format!("PNG target {} has size 0",
                                                 target.filename)));
            }
        }
        if self.ico_filename.is_empty() {
            return Err(invalid_input("ICO file name is empty".to_string()));
        }
        validate_sizes(&self.ico_sizes)
    }
}

/// Checks that every size in an ICO size list is positive.
pub fn validate_sizes(sizes: &[u32]) -> io::Result<()> {
    if let Some(index) = sizes.iter().position(|&size| size == 0) {
        return Err(invalid_input(format!("ICO size #{} is 0; sizes must be \
                                          at least 1 pixel",
                                         index)));
    }
    Ok(())
}

fn invalid_input(msg: String) -> Error {
    Error::new(ErrorKind::InvalidInput, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    #[test]
    fn default_config_is_valid() {
        let config = IconConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.png_targets.len(), 14);
        assert_eq!(config.ico_sizes, vec![16, 24, 32, 48, 64, 128, 256]);
        assert_eq!(config.variant_threshold, 64);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let mut config = IconConfig::default();
        config.ico_sizes.push(0);
        let error = config.validate().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);

        let mut config = IconConfig::default();
        config.png_targets[3].size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut config = IconConfig::default();
        config.ico_filename.clear();
        assert!(config.validate().is_err());

        let mut config = IconConfig::default();
        config.png_targets.push(PngTarget::new("", 16));
        assert!(config.validate().is_err());
    }

    #[test]
    fn renderer_uses_config_palette() {
        let mut config = IconConfig::default();
        assert_eq!(config.renderer().palette(), Palette::default());
        config.palette.accent = Rgb(255, 0, 0);
        assert_eq!(config.renderer().palette(), config.palette);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut config = IconConfig::default();
        config.variant_threshold = 0;
        assert!(config.validate().is_err());
    }
}

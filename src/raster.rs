use tiny_skia::{Color, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap,
                Stroke, Transform};

use super::image::Image;

/// The default size (in pixels) below which the simplified glyph is drawn.
pub const DEFAULT_VARIANT_THRESHOLD: u32 = 64;

// Control-point distance for approximating a quarter ellipse with one cubic
// Bezier curve, as a fraction of the radius.
const KAPPA: f32 = 0.552_284_8;

/// Which version of the glyph to draw.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Variant {
    /// Curly braces with a center bar, for larger icons.
    Detailed,
    /// A pair of chevrons, legible at small sizes.
    Simplified,
}

impl Variant {
    /// Chooses the variant for an icon of the given size: `Simplified` for
    /// sizes strictly below `threshold`, `Detailed` otherwise.
    ///
    /// # Examples
    /// ```
    /// use appicon::Variant;
    /// assert_eq!(Variant::for_size(32, 64), Variant::Simplified);
    /// assert_eq!(Variant::for_size(64, 64), Variant::Detailed);
    /// ```
    pub fn for_size(size: u32, threshold: u32) -> Variant {
        if size < threshold {
            Variant::Simplified
        } else {
            Variant::Detailed
        }
    }
}

/// Something that can draw a square icon at any positive pixel size.
pub trait Rasterizer {
    /// Renders a `size` by `size` RGBA image of the icon.  Must succeed for
    /// every positive size.
    fn render(&self, size: u32, variant: Variant) -> Image;
}

/// An RGB color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The colors used to draw the icon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    /// Fill color of the rounded-rectangle background.
    pub background: Rgb,
    /// Stroke color of the glyph.
    pub accent: Rgb,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            background: Rgb(0x2d, 0x2d, 0x2d),
            accent: Rgb(0x10, 0xb9, 0x81),
        }
    }
}

/// Draws a rounded-rectangle background with a code glyph on top: curly
/// braces for the detailed variant, chevrons for the simplified one.
#[derive(Clone, Debug, Default)]
pub struct GlyphRenderer {
    palette: Palette,
}

impl GlyphRenderer {
    /// Creates a renderer that draws with the given colors.
    pub fn new(palette: Palette) -> GlyphRenderer {
        GlyphRenderer { palette }
    }

    /// Returns the colors this renderer draws with.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    fn draw_detailed(&self, pixmap: &mut Pixmap, size: f32) {
        let padding = (size / 8.0).floor();
        let radius = (size / 5.0).floor();
        self.fill_background(pixmap, size, padding, radius);

        let stroke_width = (size / 20.0).floor().max(2.0);
        let center_y = (size / 2.0).floor();
        let brace_height = size * 0.4;
        let arc_width = size * 0.12;

        let mut pb = PathBuilder::new();
        for &(x, top_start, bottom_start) in &[(size * 0.28, 270.0, 0.0),
                                               (size * 0.72, 180.0, 90.0)] {
            quarter_arc(&mut pb,
                        x,
                        center_y - brace_height / 2.0,
                        arc_width,
                        brace_height / 2.0,
                        top_start);
            quarter_arc(&mut pb,
                        x,
                        center_y + brace_height / 2.0,
                        arc_width,
                        brace_height / 2.0,
                        bottom_start);
        }
        let bar = size * 0.15;
        let center_x = (size / 2.0).floor();
        pb.move_to(center_x - bar, center_y);
        pb.line_to(center_x + bar, center_y);
        if let Some(path) = pb.finish() {
            self.stroke_glyph(pixmap, &path, stroke_width);
        }
    }

    fn draw_simplified(&self, pixmap: &mut Pixmap, size: f32) {
        let padding = (size / 10.0).floor().max(1.0);
        let radius = (size / 6.0).floor().max(2.0);
        self.fill_background(pixmap, size, padding, radius);

        let stroke_width = (size / 12.0).floor().max(1.0);
        let center_x = (size / 2.0).floor();
        let center_y = (size / 2.0).floor();
        let symbol = size * 0.25;

        let mut pb = PathBuilder::new();
        for &direction in &[-1.0f32, 1.0] {
            let tip = center_x + direction * symbol * 0.3;
            let end = center_x + direction * symbol;
            pb.move_to(end, center_y - symbol * 0.5);
            pb.line_to(tip, center_y);
            pb.line_to(end, center_y + symbol * 0.5);
        }
        if let Some(path) = pb.finish() {
            self.stroke_glyph(pixmap, &path, stroke_width);
        }
    }

    fn fill_background(&self,
                       pixmap: &mut Pixmap,
                       size: f32,
                       padding: f32,
                       radius: f32) {
        let extent = size - 2.0 * padding;
        if extent <= 0.0 {
            return;
        }
        let radius = radius.min(extent / 2.0);
        if let Some(path) = rounded_rect(padding, padding, extent, radius) {
            let paint = solid_paint(self.palette.background);
            pixmap.fill_path(&path,
                             &paint,
                             FillRule::Winding,
                             Transform::identity(),
                             None);
        }
    }

    fn stroke_glyph(&self, pixmap: &mut Pixmap, path: &Path, width: f32) {
        let paint = solid_paint(self.palette.accent);
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

impl Rasterizer for GlyphRenderer {
    fn render(&self, size: u32, variant: Variant) -> Image {
        let mut pixmap = match Pixmap::new(size, size) {
            Some(pixmap) => pixmap,
            None => return Image::new(size, size),
        };
        pixmap.fill(Color::TRANSPARENT);
        match variant {
            Variant::Detailed => self.draw_detailed(&mut pixmap, size as f32),
            Variant::Simplified => {
                self.draw_simplified(&mut pixmap, size as f32)
            }
        }
        log::debug!("rendered {:?} glyph at {}x{}", variant, size, size);
        pixmap_to_image(&pixmap)
    }
}

/// Copies a premultiplied pixmap into a straight-alpha image.
fn pixmap_to_image(pixmap: &Pixmap) -> Image {
    let mut image = Image::new(pixmap.width(), pixmap.height());
    for (pixel, out) in pixmap.pixels()
        .iter()
        .zip(image.data_mut().chunks_mut(4)) {
        let color = pixel.demultiply();
        out.copy_from_slice(&[color.red(),
                              color.green(),
                              color.blue(),
                              color.alpha()]);
    }
    image
}

fn solid_paint(color: Rgb) -> Paint<'static> {
    let Rgb(red, green, blue) = color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(red, green, blue, 255);
    paint.anti_alias = true;
    paint
}

/// Builds a square with rounded corners, with top-left corner at (x, y).
fn rounded_rect(x: f32, y: f32, extent: f32, radius: f32) -> Option<Path> {
    let (left, top) = (x, y);
    let (right, bottom) = (x + extent, y + extent);
    let k = radius * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(left + radius, top);
    pb.line_to(right - radius, top);
    pb.cubic_to(right - radius + k, top, right, top + radius - k, right,
                top + radius);
    pb.line_to(right, bottom - radius);
    pb.cubic_to(right, bottom - radius + k, right - radius + k, bottom,
                right - radius, bottom);
    pb.line_to(left + radius, bottom);
    pb.cubic_to(left + radius - k, bottom, left, bottom - radius + k, left,
                bottom - radius);
    pb.line_to(left, top + radius);
    pb.cubic_to(left, top + radius - k, left + radius - k, top,
                left + radius, top);
    pb.close();
    pb.finish()
}

/// Appends a quarter of the ellipse centered at (cx, cy) as a new subpath,
/// running clockwise (in screen coordinates) from `start_degrees`, where 0
/// points along the positive x axis.
fn quarter_arc(pb: &mut PathBuilder,
               cx: f32,
               cy: f32,
               rx: f32,
               ry: f32,
               start_degrees: f32) {
    let start = start_degrees.to_radians();
    let end = (start_degrees + 90.0).to_radians();
    let (sin0, cos0) = start.sin_cos();
    let (sin1, cos1) = end.sin_cos();
    let (x0, y0) = (cx + rx * cos0, cy + ry * sin0);
    let (x1, y1) = (cx + rx * cos1, cy + ry * sin1);
    pb.move_to(x0, y0);
    pb.cubic_to(x0 - KAPPA * rx * sin0,
                y0 + KAPPA * ry * cos0,
                x1 + KAPPA * rx * sin1,
                y1 - KAPPA * ry * cos1,
                x1,
                y1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_opaque_color(image: &Image, x: u32, y: u32, color: Rgb) -> bool {
        let Rgb(red, green, blue) = color;
        image.pixel(x, y) == Some([red, green, blue, 255])
    }

    #[test]
    fn variant_threshold() {
        assert_eq!(Variant::for_size(16, DEFAULT_VARIANT_THRESHOLD),
                   Variant::Simplified);
        assert_eq!(Variant::for_size(63, DEFAULT_VARIANT_THRESHOLD),
                   Variant::Simplified);
        assert_eq!(Variant::for_size(64, DEFAULT_VARIANT_THRESHOLD),
                   Variant::Detailed);
        assert_eq!(Variant::for_size(512, DEFAULT_VARIANT_THRESHOLD),
                   Variant::Detailed);
    }

    #[test]
    fn render_has_requested_dimensions() {
        let renderer = GlyphRenderer::default();
        for &size in &[1, 2, 3, 16, 48, 64, 256] {
            let variant = Variant::for_size(size, DEFAULT_VARIANT_THRESHOLD);
            let image = renderer.render(size, variant);
            assert_eq!(image.width(), size);
            assert_eq!(image.height(), size);
            assert_eq!(image.data().len(), (size * size * 4) as usize);
        }
    }

    #[test]
    fn corners_are_transparent() {
        let renderer = GlyphRenderer::default();
        let image = renderer.render(128, Variant::Detailed);
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(127, 127), Some([0, 0, 0, 0]));
    }

    #[test]
    fn detailed_glyph_colors() {
        let palette = Palette::default();
        let image = GlyphRenderer::new(palette).render(128, Variant::Detailed);
        // Center of the bar through the middle of the icon.
        assert!(is_opaque_color(&image, 64, 64, palette.accent));
        // Inside the background, away from the glyph.
        assert!(is_opaque_color(&image, 64, 24, palette.background));
    }

    #[test]
    fn simplified_glyph_leaves_center_clear() {
        let palette = Palette::default();
        let image = GlyphRenderer::new(palette).render(32, Variant::Simplified);
        assert!(is_opaque_color(&image, 16, 16, palette.background));
    }

    #[test]
    fn zero_size_renders_empty_image() {
        let image = GlyphRenderer::default().render(0, Variant::Simplified);
        assert_eq!(image.width(), 0);
        assert!(image.data().is_empty());
    }
}

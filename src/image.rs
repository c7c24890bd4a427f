use std::io::{self, Error, ErrorKind};

/// The number of bytes used to store one RGBA pixel.
const BYTES_PER_PIXEL: u32 = 4;

/// A rasterized icon image, stored as 8-bit RGBA with straight (not
/// premultiplied) alpha, in row-major order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Box<[u8]>,
}

impl Image {
    /// Creates a new image with all pixel data set to zero (that is, fully
    /// transparent black).
    pub fn new(width: u32, height: u32) -> Image {
        let data_bytes = BYTES_PER_PIXEL as usize * width as usize *
                         height as usize;
        Image {
            width,
            height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        }
    }

    /// Creates an image from existing RGBA pixel data.  Returns an error if
    /// the length of the data does not match the dimensions.
    pub fn from_data(width: u32,
                     height: u32,
                     data: Vec<u8>)
                     -> io::Result<Image> {
        let expected = BYTES_PER_PIXEL as usize * width as usize *
                       height as usize;
        if data.len() != expected {
            let msg = format!("RGBA data for a {}x{} image must be {} bytes \
                               (was {})",
                              width,
                              height,
                              expected,
                              data.len());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        Ok(Image {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the image's RGBA pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the image's RGBA pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the RGBA value of the pixel at the given coordinates, or
    /// `None` if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = BYTES_PER_PIXEL as usize *
                    (y as usize * self.width as usize + x as usize);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[start..(start + 4)]);
        Some(rgba)
    }
}

/// Converts RGB image data into RGBA.
pub(crate) fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    assert_eq!(rgb.len() % 3, 0);
    let num_pixels = rgb.len() / 3;
    let mut rgba = Vec::with_capacity(num_pixels * 4);
    for pixel in rgb.chunks(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Converts grayscale-with-alpha image data into RGBA.
pub(crate) fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    assert_eq!(gray_alpha.len() % 2, 0);
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks(2) {
        rgba.push(pixel[0]);
        rgba.push(pixel[0]);
        rgba.push(pixel[0]);
        rgba.push(pixel[1]);
    }
    rgba
}

/// Converts grayscale image data into RGBA.
pub(crate) fn grayscale_to_rgba(gray: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.push(value);
        rgba.push(value);
        rgba.push(value);
        rgba.push(u8::MAX);
    }
    rgba
}

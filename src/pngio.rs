use std::io::{self, BufRead, Error, ErrorKind, Seek, Write};

use super::image::{self, Image};

impl Image {
    /// Reads an image from a PNG file, converting it to RGBA.
    pub fn read_png<R: BufRead + Seek>(input: R) -> io::Result<Image> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let mut reader = decoder.read_info()?;
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };
        let buffer_size = reader.output_buffer_size().ok_or_else(|| {
            Error::new(ErrorKind::InvalidData, "PNG image is too large")
        })?;
        let mut buffer = vec![0u8; buffer_size];
        let frame = reader.next_frame(&mut buffer)?;
        buffer.truncate(frame.buffer_size());

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported PNG bit depth: {:?}", bit_depth);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let rgba = match color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => image::rgb_to_rgba(&buffer),
            png::ColorType::GrayscaleAlpha => {
                image::gray_alpha_to_rgba(&buffer)
            }
            png::ColorType::Grayscale => image::grayscale_to_rgba(&buffer),
            _ => unreachable!(), // EXPAND prevents paletted output
        };
        Image::from_data(width, height, rgba)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))
    }

    /// Writes the image to a PNG file.
    pub fn write_png<W: Write>(&self, output: W) -> io::Result<()> {
        let mut encoder = png::Encoder::new(output, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)?;
        writer.finish()?;
        Ok(())
    }

    /// Encodes the image as an in-memory PNG file.
    pub fn encode_png(&self) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        self.write_png(&mut data)?;
        Ok(data)
    }
}

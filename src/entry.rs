use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Error, ErrorKind, Read, Write};

use super::image::Image;

/// The length of a directory entry within an ICO file, in bytes:
pub const ICON_DIR_ENTRY_LENGTH: u32 = 16;

/// The largest dimension that an ICO directory entry can describe exactly.
/// It is stored as a zero byte; so is anything larger.
const MAX_EXACT_DIMENSION: u32 = 256;

/// Number of color planes recorded for every entry we write.
const COLOR_PLANES: u16 = 1;

/// Bit depth recorded for every entry we write (PNG payloads are RGBA).
const BITS_PER_PIXEL: u16 = 32;

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

/// One image stored in an ICO file: its dimensions and its encoded payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconDirEntry {
    width: u32,
    height: u32,
    /// The encoded image data (for entries created by this library, a
    /// complete PNG file).
    pub data: Vec<u8>,
}

/// The fixed-size directory record for one entry, as stored in an ICO file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DirRecord {
    /// Width byte (0 means 256 or more).
    pub width: u8,
    /// Height byte (0 means 256 or more).
    pub height: u8,
    /// Number of palette colors (0 for truecolor images).
    pub num_colors: u8,
    /// Number of color planes.
    pub color_planes: u16,
    /// Bits per pixel.
    pub bits_per_pixel: u16,
    /// Length of the payload, in bytes.
    pub data_length: u32,
    /// Absolute file offset of the payload.
    pub data_offset: u32,
}

impl IconDirEntry {
    /// Creates an entry with the given pixel dimensions and payload.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> IconDirEntry {
        IconDirEntry {
            width,
            height,
            data,
        }
    }

    /// Encodes an image as a PNG-payload entry.  Returns an error if the image
    /// has a zero dimension, since a zero width or height byte would be read
    /// back as 256.
    pub fn encode_image(image: &Image) -> io::Result<IconDirEntry> {
        if image.width() == 0 || image.height() == 0 {
            let msg = format!("cannot store a {}x{} image in an ICO file",
                              image.width(),
                              image.height());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        let data = image.encode_png()?;
        log::debug!("encoded {}x{} entry ({} byte PNG payload)",
                    image.width(),
                    image.height(),
                    data.len());
        Ok(IconDirEntry::new(image.width(), image.height(), data))
    }

    /// Decodes the entry's PNG payload into an image.  Returns an error if
    /// the payload is not a PNG file, or if its dimensions disagree with the
    /// directory entry.
    pub fn decode_image(&self) -> io::Result<Image> {
        if !self.is_png() {
            let msg = "unsupported ICO payload (only PNG payloads can be \
                       decoded)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let image = Image::read_png(Cursor::new(&self.data))?;
        if !dimension_matches(self.width, image.width()) ||
           !dimension_matches(self.height, image.height()) {
            let msg = format!("decoded PNG has wrong dimensions ({}x{} \
                               instead of {}x{})",
                              image.width(),
                              image.height(),
                              self.width,
                              self.height);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(image)
    }

    /// Returns the width of the image, in pixels.  For entries read from a
    /// file, widths of 256 and above are all reported as 256.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.  For entries read from a
    /// file, heights of 256 and above are all reported as 256.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the payload is a PNG file.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the length of the payload, in bytes.
    pub fn data_length(&self) -> u32 {
        self.data.len() as u32
    }

    /// Builds the directory record for this entry, given the absolute offset
    /// at which its payload will be stored.
    pub fn record(&self, data_offset: u32) -> DirRecord {
        DirRecord {
            width: dimension_byte(self.width),
            height: dimension_byte(self.height),
            num_colors: 0,
            color_planes: COLOR_PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            data_length: self.data_length(),
            data_offset,
        }
    }
}

impl DirRecord {
    /// Reads a directory record from within an ICO file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<DirRecord> {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let num_colors = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let color_planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let data_length = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()?;
        Ok(DirRecord {
            width,
            height,
            num_colors,
            color_planes,
            bits_per_pixel,
            data_length,
            data_offset,
        })
    }

    /// Writes the 16-byte directory record.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_length)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }

    /// Returns the pixel width described by this record.
    pub fn pixel_width(&self) -> u32 {
        dimension_from_byte(self.width)
    }

    /// Returns the pixel height described by this record.
    pub fn pixel_height(&self) -> u32 {
        dimension_from_byte(self.height)
    }
}

/// Returns the byte used to store a dimension in a directory entry.
///
/// # Examples
/// ```
/// use appicon::dimension_byte;
/// assert_eq!(dimension_byte(48), 48);
/// assert_eq!(dimension_byte(256), 0);
/// assert_eq!(dimension_byte(512), 0);
/// ```
pub fn dimension_byte(dimension: u32) -> u8 {
    if dimension < MAX_EXACT_DIMENSION {
        dimension as u8
    } else {
        0
    }
}

fn dimension_from_byte(byte: u8) -> u32 {
    if byte == 0 {
        MAX_EXACT_DIMENSION
    } else {
        u32::from(byte)
    }
}

/// Checks a decoded image dimension against the one from the directory.
fn dimension_matches(declared: u32, actual: u32) -> bool {
    if declared >= MAX_EXACT_DIMENSION {
        actual >= MAX_EXACT_DIMENSION
    } else {
        declared == actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_record() {
        let entry = IconDirEntry::new(48, 48, vec![0u8; 300]);
        let mut output = Vec::new();
        entry.record(0x1234).write(&mut output).expect("write failed");
        assert_eq!(output.len(), ICON_DIR_ENTRY_LENGTH as usize);
        assert_eq!(&output as &[u8],
                   b"\x30\x30\x00\x00\x01\x00\x20\x00\
                     \x2c\x01\x00\x00\x34\x12\x00\x00");
    }

    #[test]
    fn large_dimensions_are_stored_as_zero() {
        let entry = IconDirEntry::new(256, 512, vec![]);
        let record = entry.record(22);
        assert_eq!(record.width, 0);
        assert_eq!(record.height, 0);
        assert_eq!(record.pixel_width(), 256);
        assert_eq!(record.pixel_height(), 256);
    }

    #[test]
    fn read_record() {
        let input: &[u8] = b"\x10\x20\x00\x00\x01\x00\x20\x00\
                             \x64\x00\x00\x00\x26\x00\x00\x00";
        let record = DirRecord::read(input).expect("read failed");
        assert_eq!(record.pixel_width(), 16);
        assert_eq!(record.pixel_height(), 32);
        assert_eq!(record.color_planes, 1);
        assert_eq!(record.bits_per_pixel, 32);
        assert_eq!(record.data_length, 100);
        assert_eq!(record.data_offset, 38);
    }

    #[test]
    fn encode_rejects_empty_image() {
        let error = IconDirEntry::encode_image(&Image::new(0, 0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn encode_and_decode_image() {
        let mut image = Image::new(16, 16);
        image.data_mut()[0..4].copy_from_slice(&[1, 2, 3, 4]);
        let entry = IconDirEntry::encode_image(&image).expect("encode failed");
        assert!(entry.is_png());
        assert_eq!(entry.width(), 16);
        assert_eq!(entry.decode_image().expect("decode failed"), image);
    }

    #[test]
    fn decode_checks_dimensions() {
        let data = Image::new(16, 16).encode_png().unwrap();
        let entry = IconDirEntry::new(32, 32, data);
        let error = entry.decode_image().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn decode_rejects_bmp_payload() {
        let entry = IconDirEntry::new(16, 16, vec![40, 0, 0, 0]);
        assert!(!entry.is_png());
        let error = entry.decode_image().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }
}

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error, ErrorKind, Read, Seek, SeekFrom, Write};

use super::entry::{DirRecord, ICON_DIR_ENTRY_LENGTH, IconDirEntry};
use super::image::Image;

/// The length of an ICO file header, in bytes:
pub const ICON_DIR_HEADER_LENGTH: u32 = 6;

/// The type of resource stored in an ICO file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResourceType {
    /// Plain icons (`.ico`).
    Icon,
    /// Cursors with hotspots (`.cur`); only ever read, never written.
    Cursor,
}

impl ResourceType {
    fn from_number(number: u16) -> Option<ResourceType> {
        match number {
            1 => Some(ResourceType::Icon),
            2 => Some(ResourceType::Cursor),
            _ => None,
        }
    }

    fn number(self) -> u16 {
        match self {
            ResourceType::Icon => 1,
            ResourceType::Cursor => 2,
        }
    }
}

/// A set of differently-sized images stored in a single ICO file.
pub struct IconDir {
    resource_type: ResourceType,
    /// The entries stored in the ICO file, in directory order.
    pub entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir {
            resource_type: ResourceType::Icon,
            entries: Vec::new(),
        }
    }

    /// Returns the type of resource stored in this file.
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Returns true if the directory contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// PNG-encodes the image and appends it as the last entry.
    pub fn add_image(&mut self, image: &Image) -> io::Result<()> {
        self.entries.push(IconDirEntry::encode_image(image)?);
        Ok(())
    }

    /// Computes the directory records for all entries, in order, with each
    /// payload placed directly after the previous one.  Returns an error if
    /// there are too many entries for the header, if any entry has a zero
    /// dimension (a zero byte would read back as 256), or if the file would be
    /// too large for 32-bit offsets.
    pub fn records(&self) -> io::Result<Vec<DirRecord>> {
        if self.entries.len() > u16::MAX as usize {
            let msg = format!("too many images for one ICO file ({}, max {})",
                              self.entries.len(),
                              u16::MAX);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        let mut offset = u64::from(ICON_DIR_HEADER_LENGTH) +
                         u64::from(ICON_DIR_ENTRY_LENGTH) *
                         self.entries.len() as u64;
        let mut records = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.width() == 0 || entry.height() == 0 {
                let msg = format!("entry {} has invalid dimensions {}x{}",
                                  index,
                                  entry.width(),
                                  entry.height());
                return Err(Error::new(ErrorKind::InvalidInput, msg));
            }
            let length = entry.data.len() as u64;
            if offset + length > u64::from(u32::MAX) {
                let msg = "ICO file would exceed 4 GiB";
                return Err(Error::new(ErrorKind::InvalidInput, msg));
            }
            records.push(entry.record(offset as u32));
            offset += length;
        }
        Ok(records)
    }

    /// Reads an icon directory from an ICO (or CUR) file.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            let msg = format!("not an ico file (reserved field is {})",
                              reserved);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let type_number = reader.read_u16::<LittleEndian>()?;
        let resource_type = ResourceType::from_number(type_number)
            .ok_or_else(|| {
                let msg = format!("not an ico file (resource type is {})",
                                  type_number);
                Error::new(ErrorKind::InvalidData, msg)
            })?;
        let num_entries = reader.read_u16::<LittleEndian>()?;
        let mut records = Vec::with_capacity(num_entries as usize);
        for _ in 0..num_entries {
            records.push(DirRecord::read(reader.by_ref())?);
        }
        let file_length = reader.seek(SeekFrom::End(0))?;
        let mut entries = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let end = u64::from(record.data_offset) +
                      u64::from(record.data_length);
            if end > file_length {
                let msg = format!("entry {} extends past the end of the file \
                                   ({} > {})",
                                  index,
                                  end,
                                  file_length);
                return Err(Error::new(ErrorKind::InvalidData, msg));
            }
            reader.seek(SeekFrom::Start(u64::from(record.data_offset)))?;
            let mut data = vec![0u8; record.data_length as usize];
            reader.read_exact(&mut data)?;
            entries.push(IconDirEntry::new(record.pixel_width(),
                                           record.pixel_height(),
                                           data));
        }
        Ok(IconDir {
            resource_type,
            entries,
        })
    }

    /// Writes the icon directory to an ICO file: header, directory records,
    /// then every payload in entry order.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let records = self.records()?;
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.resource_type.number())?;
        writer.write_u16::<LittleEndian>(records.len() as u16)?;
        for record in &records {
            record.write(writer.by_ref())?;
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// header and directory.
    pub fn total_length(&self) -> u64 {
        let mut length = u64::from(ICON_DIR_HEADER_LENGTH);
        for entry in &self.entries {
            length += u64::from(ICON_DIR_ENTRY_LENGTH);
            length += entry.data.len() as u64;
        }
        length
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

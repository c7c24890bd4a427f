use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Error, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::config::{self, IconConfig};
use super::icondir::IconDir;
use super::raster::{Rasterizer, Variant};

/// Renders one image per size, in order, and collects them into an icon
/// directory.  Returns an error (before rendering anything) if any size is
/// zero.
pub fn build_icon_dir<R>(sizes: &[u32],
                         renderer: &R,
                         variant_threshold: u32)
                         -> io::Result<IconDir>
    where R: Rasterizer + ?Sized
{
    config::validate_sizes(sizes)?;
    let mut seen = HashSet::new();
    for &size in sizes {
        if !seen.insert(size) {
            log::warn!("ICO size {} is listed more than once", size);
        }
    }
    let mut icon_dir = IconDir::new();
    for &size in sizes {
        let variant = Variant::for_size(size, variant_threshold);
        let image = renderer.render(size, variant);
        icon_dir.add_image(&image)?;
    }
    Ok(icon_dir)
}

/// Renders the icon at each of the given sizes and writes them, in order, to
/// a single ICO file at `path`.  The file is either written completely or
/// left untouched.
pub fn write_ico<R>(sizes: &[u32],
                    renderer: &R,
                    variant_threshold: u32,
                    path: &Path)
                    -> io::Result<()>
    where R: Rasterizer + ?Sized
{
    let icon_dir = build_icon_dir(sizes, renderer, variant_threshold)?;
    write_atomically(path, |writer| icon_dir.write(writer))?;
    log::info!("wrote {} ({} images, {} bytes)",
               path.display(),
               icon_dir.entries.len(),
               icon_dir.total_length());
    Ok(())
}

/// Renders the icon at one size and writes it to a PNG file at `path`.
pub fn write_png<R>(size: u32,
                    renderer: &R,
                    variant_threshold: u32,
                    path: &Path)
                    -> io::Result<()>
    where R: Rasterizer + ?Sized
{
    if size == 0 {
        let msg = format!("cannot write {}: size must be at least 1 pixel",
                          path.display());
        return Err(Error::new(ErrorKind::InvalidInput, msg));
    }
    let image = renderer.render(size, Variant::for_size(size, variant_threshold));
    write_atomically(path, |writer| image.write_png(writer))?;
    log::info!("wrote {} ({}x{})", path.display(), size, size);
    Ok(())
}

/// Writes every PNG target and then the ICO file described by `config` into
/// `out_dir`, creating the directory if needed.  Stops at the first failure.
/// Returns the paths written, in order.
pub fn generate<R>(config: &IconConfig,
                   renderer: &R,
                   out_dir: &Path)
                   -> io::Result<Vec<PathBuf>>
    where R: Rasterizer + ?Sized
{
    config.validate()?;
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(config.png_targets.len() + 1);
    for target in &config.png_targets {
        let path = out_dir.join(&target.filename);
        write_png(target.size, renderer, config.variant_threshold, &path)?;
        written.push(path);
    }
    let ico_path = out_dir.join(&config.ico_filename);
    write_ico(&config.ico_sizes,
              renderer,
              config.variant_threshold,
              &ico_path)?;
    written.push(ico_path);
    Ok(written)
}

/// Writes a file by way of a temporary sibling, which is renamed over `path`
/// only once it has been completely written and synced.
fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
    where F: FnOnce(&mut BufWriter<File>) -> io::Result<()>
{
    let temp_path = temp_path_for(path)?;
    let result = File::create(&temp_path)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()?;
            let file = writer.into_inner().map_err(|err| err.into_error())?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        let msg = format!("{} does not name a file", path.display());
        Error::new(ErrorKind::InvalidInput, msg)
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;
    use std::cell::RefCell;

    /// Records every render request and returns blank images.
    struct RecordingRenderer {
        calls: RefCell<Vec<(u32, Variant)>>,
    }

    impl Rasterizer for RecordingRenderer {
        fn render(&self, size: u32, variant: Variant) -> Image {
            self.calls.borrow_mut().push((size, variant));
            Image::new(size, size)
        }
    }

    fn recorder() -> RecordingRenderer {
        RecordingRenderer { calls: RefCell::new(Vec::new()) }
    }

    #[test]
    fn renders_in_order_with_threshold() {
        let renderer = recorder();
        let icon_dir = build_icon_dir(&[64, 16, 63], &renderer, 64).unwrap();
        assert_eq!(*renderer.calls.borrow(),
                   vec![(64, Variant::Detailed),
                        (16, Variant::Simplified),
                        (63, Variant::Simplified)]);
        let widths: Vec<u32> =
            icon_dir.entries.iter().map(|entry| entry.width()).collect();
        assert_eq!(widths, vec![64, 16, 63]);
    }

    #[test]
    fn zero_size_fails_before_rendering() {
        let renderer = recorder();
        let error = build_icon_dir(&[16, 0], &renderer, 64)
            .err()
            .expect("zero size should be rejected");
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(renderer.calls.borrow().is_empty());
    }

    #[test]
    fn duplicate_sizes_are_kept() {
        let icon_dir = build_icon_dir(&[32, 32], &recorder(), 64).unwrap();
        assert_eq!(icon_dir.entries.len(), 2);
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let dir = std::env::temp_dir()
            .join(format!("appicon-atomic-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("icon.ico");
        fs::write(&path, b"previous").unwrap();

        let result = write_atomically(&path, |writer| {
            writer.write_all(b"partial data")?;
            writer.flush()?;
            assert!(dir.join(".icon.ico.tmp").exists());
            Err(Error::new(ErrorKind::Other, "disk full"))
        });
        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "disk full");
        assert_eq!(fs::read(&path).unwrap(), b"previous".to_vec());
        assert!(!dir.join(".icon.ico.tmp").exists());

        write_atomically(&path, |writer| writer.write_all(b"replaced"))
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"replaced".to_vec());
        assert!(!dir.join(".icon.ico.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("out/icon.ico")).unwrap();
        assert_eq!(temp, Path::new("out/.icon.ico.tmp"));
        assert!(temp_path_for(Path::new("/")).is_err());
    }
}

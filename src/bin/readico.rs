//! Lists the entries of an ICO file.

extern crate appicon;

use appicon::IconDir;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    if env::args().count() != 2 {
        println!("Usage: readico <path>");
        process::exit(2);
    }
    let path = env::args().nth(1).unwrap_or_default();
    if let Err(error) = list_entries(&path) {
        eprintln!("error: {}: {}", path, error);
        process::exit(1);
    }
}

fn list_entries(path: &str) -> io::Result<()> {
    let file = BufReader::new(File::open(path)?);
    let icon_dir = IconDir::read(file)?;
    println!("{:?} file contains {} entry(s).",
             icon_dir.resource_type(),
             icon_dir.entries.len());
    for (index, entry) in icon_dir.entries.iter().enumerate() {
        let format = if entry.is_png() { "PNG" } else { "BMP" };
        println!("Entry {}: {}x{} {} ({} byte payload)",
                 index,
                 entry.width(),
                 entry.height(),
                 format,
                 entry.data.len());
    }
    Ok(())
}

//! Renders the default application icon set.
//!
//! ```shell
//! cargo run --bin appicon [<output-dir>]
//! # PNG files and icon.ico are written to <output-dir> (default: icons)
//! ```

extern crate appicon;

use appicon::{IconConfig, generate};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let num_args = env::args().count();
    if num_args > 2 {
        println!("Usage: appicon [<output-dir>]");
        process::exit(2);
    }
    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("icons"));
    let config = IconConfig::default();
    let renderer = config.renderer();
    println!("Generating icons in {}...", out_dir.display());
    match generate(&config, &renderer, &out_dir) {
        Ok(paths) => {
            for path in &paths {
                let name = path.file_name().unwrap_or_default();
                println!("  [OK] {}", name.to_string_lossy());
            }
            println!("Done.");
        }
        Err(error) => {
            eprintln!("error: {}", error);
            process::exit(1);
        }
    }
}

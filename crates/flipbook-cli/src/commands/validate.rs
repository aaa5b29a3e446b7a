//! Sprite set validation command

use anyhow::Result;
use flipbook_anim::load_sprite_set_from_file;
use std::path::Path;

pub fn run(file: &str) -> Result<()> {
    match load_sprite_set_from_file(Path::new(file)) {
        Ok(set) => {
            println!("{}: OK ({} animation(s))", file, set.animations.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {}", file, e);
            std::process::exit(1);
        }
    }
}

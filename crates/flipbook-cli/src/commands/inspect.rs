//! Sprite set inspection command

use anyhow::{Context, Result};
use flipbook_anim::{load_sprite_set_from_file, prepare};
use std::path::Path;

pub fn run(file: &str) -> Result<()> {
    let set = load_sprite_set_from_file(Path::new(file))
        .with_context(|| format!("Failed to load sprite set {}", file))?;

    println!("Sprite set: {}", file);
    if let Some(autoplay) = &set.autoplay {
        println!("Autoplay: {}", autoplay);
    }
    println!();

    for def in &set.animations {
        let timing = prepare(def)?;
        let mut modes = Vec::new();
        if def.looping {
            modes.push("loop");
        }
        if def.ping_pong {
            modes.push("ping-pong");
        }
        let modes = if modes.is_empty() {
            "once".to_string()
        } else {
            modes.join(", ")
        };

        println!("{} ({})", def.name, modes);
        println!(
            "  {} frame(s) @ {} fps, {:.3}s per frame",
            timing.frame_count, def.fps, timing.seconds_per_frame
        );
        if timing.total_duration.is_finite() {
            println!(
                "  iteration {:.3}s, total {:.3}s",
                timing.iteration_duration, timing.total_duration
            );
        } else {
            println!("  iteration {:.3}s, repeats forever", timing.iteration_duration);
        }
        if timing.start_delay > 0.0 {
            println!("  start delay {:.3}s", timing.start_delay);
        }
        for trigger in &def.triggers {
            println!("  trigger '{}' on frame {}", trigger.name, trigger.frame);
        }
    }

    Ok(())
}

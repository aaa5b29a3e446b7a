//! Offline playback: drive a clock with a fixed step and report what it shows

use anyhow::{Context, Result};
use flipbook_anim::{load_sprite_set_from_file, AnimationClock, FrameEvent, FrameLog, SpriteSet};
use serde::Serialize;
use std::path::Path;

pub struct SimulateArgs {
    pub file: String,
    pub animation: Option<String>,
    pub start_frame: usize,
    pub dt: f64,
    pub duration: f64,
    pub reverse_at: Option<f64>,
    pub format: String,
}

/// One observer notification, stamped with simulation time
#[derive(Debug, Serialize)]
struct TimelineEntry {
    time: f64,
    frame: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<String>,
}

#[derive(Debug, Serialize)]
struct Timeline {
    animation: String,
    entries: Vec<TimelineEntry>,
    final_frame: usize,
    playing: bool,
    simulated: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.dt.is_nan() || args.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let set = load_sprite_set_from_file(Path::new(&args.file))
        .with_context(|| format!("Failed to load sprite set {}", args.file))?;
    let timeline = simulate(set, &args)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
    } else {
        print_timeline_text(&timeline);
    }
    Ok(())
}

fn simulate(set: SpriteSet, args: &SimulateArgs) -> Result<Timeline> {
    let name = args
        .animation
        .clone()
        .or_else(|| set.autoplay.clone())
        .or_else(|| set.animations.first().map(|a| a.name.clone()))
        .context("Sprite set has no animations")?;

    log::info!(
        "Simulating '{}' for {}s at {}s per tick",
        name,
        args.duration,
        args.dt
    );

    let mut clock = AnimationClock::from_sprite_set(set, FrameLog::new());
    clock.play_from(&name, args.start_frame)?;

    let mut entries = Vec::new();
    collect(&mut clock, 0.0, &mut entries);

    let steps = (args.duration / args.dt).ceil() as usize;
    let mut time = 0.0;
    let mut reversed = false;
    for step in 1..=steps {
        if !clock.is_playing() {
            break;
        }
        if let Some(at) = args.reverse_at {
            if !reversed && time >= at {
                clock.reverse();
                reversed = true;
            }
        }
        clock.tick(args.dt);
        time = step as f64 * args.dt;
        collect(&mut clock, time, &mut entries);
    }

    Ok(Timeline {
        animation: name,
        entries,
        final_frame: clock.current_frame(),
        playing: clock.is_playing(),
        simulated: time,
    })
}

fn collect(clock: &mut AnimationClock<FrameLog>, time: f64, entries: &mut Vec<TimelineEntry>) {
    let frame = clock.current_frame();
    for event in clock.observer_mut().drain() {
        let entry = match event {
            FrameEvent::Displayed(sprite) => TimelineEntry {
                time,
                frame,
                texture: sprite.map(|s| match s.region {
                    Some(r) => format!("{} [{},{} {}x{}]", s.texture, r.x, r.y, r.width, r.height),
                    None => s.texture,
                }),
                trigger: None,
            },
            FrameEvent::Trigger { name, frame } => TimelineEntry {
                time,
                frame,
                texture: None,
                trigger: Some(name),
            },
        };
        entries.push(entry);
    }
}

fn print_timeline_text(timeline: &Timeline) {
    println!("Animation: {}", timeline.animation);
    for entry in &timeline.entries {
        match (&entry.trigger, &entry.texture) {
            (Some(trigger), _) => println!(
                "  {:>8.3}s  frame {:>3}  trigger '{}'",
                entry.time, entry.frame, trigger
            ),
            (None, Some(texture)) => println!(
                "  {:>8.3}s  frame {:>3}  {}",
                entry.time, entry.frame, texture
            ),
            (None, None) => println!("  {:>8.3}s  (cleared)", entry.time),
        }
    }
    println!();
    println!(
        "Stopped simulating at {:.3}s on frame {} ({})",
        timeline.simulated,
        timeline.final_frame,
        if timeline.playing { "still playing" } else { "finished" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_anim::{AnimationDef, FrameTrigger, SpriteFrame};

    fn args(animation: Option<&str>) -> SimulateArgs {
        SimulateArgs {
            file: "test.sprite.toml".into(),
            animation: animation.map(str::to_string),
            start_frame: 0,
            dt: 0.05,
            duration: 2.0,
            reverse_at: None,
            format: "text".into(),
        }
    }

    fn set() -> SpriteSet {
        let frames = ["a", "b", "c"].iter().map(|t| SpriteFrame::new(*t)).collect();
        SpriteSet {
            autoplay: None,
            animations: vec![AnimationDef::new("blink", 10.0, frames)
                .with_trigger(FrameTrigger::new(2, "shut"))],
        }
    }

    #[test]
    fn defaults_to_first_animation_and_stops_early() {
        let timeline = simulate(set(), &args(None)).unwrap();
        assert_eq!(timeline.animation, "blink");
        assert!(!timeline.playing);
        assert_eq!(timeline.final_frame, 2);
        assert!(timeline.simulated < 1.0);

        let textures: Vec<&str> = timeline
            .entries
            .iter()
            .filter_map(|e| e.texture.as_deref())
            .collect();
        assert_eq!(textures, vec!["a", "b", "c"]);
        assert!(timeline
            .entries
            .iter()
            .any(|e| e.trigger.as_deref() == Some("shut") && e.frame == 2));
    }

    #[test]
    fn unknown_animation_fails() {
        assert!(simulate(set(), &args(Some("wink"))).is_err());
    }
}

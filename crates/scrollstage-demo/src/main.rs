#![forbid(unsafe_code)]

//! Headless demo driver.
//!
//! Simulates a visitor wheel-scrolling through a deck: each gesture injects
//! a velocity impulse that decays with friction, the decaying offsets feed
//! the director as scroll events, and once the gesture dies out the quiet
//! period elapses and the corrective glide takes over. Everything the host
//! page would render is logged instead.
//!
//! Run with `RUST_LOG=debug` to watch the director's internal decisions.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scrollstage_core::SectionRegistry;
use scrollstage_deck::Deck;
use scrollstage_runtime::{Director, DirectorConfig, IntroPlayer, MemoryViewport, ScrollViewport};

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Simulate scrolling through a scrollstage deck")]
struct Cli {
    /// TOML deck file to load instead of the built-in deck.
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport: f64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Velocity each wheel gesture injects, in pixels per frame.
    #[arg(long, default_value_t = 120.0)]
    impulse: f64,

    /// Per-frame velocity retention while a gesture coasts.
    #[arg(long, default_value_t = 0.93)]
    friction: f64,
}

fn load_deck(cli: &Cli) -> Result<Deck> {
    match &cli.deck {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading deck file {}", path.display()))?;
            Deck::from_toml(&text).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Deck::builtin()),
    }
}

/// One coasting wheel gesture: velocity decays until it drops below half a
/// pixel per frame.
fn run_gesture(
    director: &mut Director<MemoryViewport>,
    frame: Duration,
    impulse: f64,
    friction: f64,
) {
    let mut velocity = impulse;
    let mut offset = director.offset();
    while velocity.abs() >= 0.5 {
        offset = (offset + velocity).clamp(0.0, director.viewport().extent());
        director.on_scroll(offset);
        director.frame(frame);
        velocity *= friction;
    }
}

/// Idle frames until the quiet period elapses and any corrective glide
/// finishes, capped so a bad resolver can't hang the demo.
fn run_settle(director: &mut Director<MemoryViewport>, frame: Duration, fps: u32) {
    let mut corrected = false;
    for _ in 0..fps {
        director.frame(frame);
        corrected |= director.is_correcting();
        if corrected && !director.is_correcting() {
            break;
        }
    }
}

fn log_snapshot(director: &Director<MemoryViewport>) {
    let offset = director.offset();
    for (name, progress) in director.section_progresses() {
        if progress > 0.0 && progress < 1.0 {
            tracing::info!(section = name, progress, offset, "on stage");
            for target in ["headline", "wordmark", "card_0"] {
                if let Some(state) = director.style_of(name, target) {
                    tracing::info!(
                        target,
                        opacity = state.opacity,
                        y = state.y,
                        scale = state.scale,
                        "resolved style"
                    );
                }
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let deck = load_deck(&cli)?;
    anyhow::ensure!(cli.fps > 0, "fps must be positive");
    let frame = Duration::from_secs_f64(1.0 / f64::from(cli.fps));

    let mut registry = SectionRegistry::with_expected(deck.pinned_count());
    let bindings = deck.register_into(&mut registry, cli.viewport);
    let extent = deck.scroll_extent(cli.viewport);
    tracing::info!(
        sections = deck.sections.len(),
        pinned = deck.pinned_count(),
        extent,
        "deck loaded"
    );

    let mut director = Director::new(MemoryViewport::new(extent), registry, bindings)
        .with_config(DirectorConfig::default());
    if let Some(intro) = deck.intro.clone() {
        director = director.with_intro(IntroPlayer::new(intro.timeline, intro.duration));
    }

    // Let the load-time intro play out before the first gesture.
    while director.intro_playing() {
        director.frame(frame);
    }
    tracing::info!("intro complete, starting gestures");

    // Wheel down through the whole page, then one gesture back up.
    let mut gesture = 0u32;
    while director.offset() < extent - 1.0 {
        gesture += 1;
        run_gesture(&mut director, frame, cli.impulse, cli.friction);
        run_settle(&mut director, frame, cli.fps);
        tracing::info!(gesture, offset = director.offset(), "gesture settled");
        log_snapshot(&director);
        if gesture > 200 {
            anyhow::bail!("scroll simulation failed to reach the end of the page");
        }
    }

    run_gesture(&mut director, frame, -cli.impulse, cli.friction);
    run_settle(&mut director, frame, cli.fps);
    tracing::info!(offset = director.offset(), "scrolled back up and settled");
    log_snapshot(&director);

    Ok(())
}

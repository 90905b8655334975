use anyhow::Context;
use glam::Vec2;
use hero_core::{HeroConfig, HeroOptions, KineticHero, RemovalCause, Viewport};

const TICK_HZ: f64 = 60.0;
const VIEWPORT: (f32, f32) = (1280.0, 800.0);
const CLICK_EVERY_SEC: f64 = 3.0;
// simulated hidden tab, as [start, end) seconds
const HIDDEN_WINDOW: (f64, f64) = (20.0, 25.0);

const KEYWORDS: [&str; 8] = [
    "対話", "データ", "行動変容", "組織", "共創", "SOSIKIO", "心理的安全性", "学習",
];

#[derive(Default)]
struct Summary {
    blasts: usize,
    spawned: usize,
    expired: usize,
    offscreen: usize,
    gusts: usize,
    peak_particles: usize,
}

fn parse_args() -> anyhow::Result<(f64, Option<u64>)> {
    let mut args = std::env::args().skip(1);
    let seconds = match args.next() {
        Some(s) => s
            .parse::<f64>()
            .with_context(|| format!("seconds must be a number, got {:?}", s))?,
        None => 30.0,
    };
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("seconds must be positive, got {}", seconds);
    }
    let seed = args
        .next()
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("seed must be an unsigned integer, got {:?}", s))
        })
        .transpose()?;
    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument {:?}; usage: hero-native [seconds] [seed]", extra);
    }
    Ok((seconds, seed))
}

/// Pointer sweeping a slow ellipse around the viewport centre.
fn pointer_at(t: f64) -> Vec2 {
    let (w, h) = VIEWPORT;
    let a = t as f32 * 0.6;
    Vec2::new(w * 0.5 + w * 0.3 * a.cos(), h * 0.5 + h * 0.25 * (a * 1.3).sin())
}

fn run(seconds: f64, seed: Option<u64>) -> anyhow::Result<Summary> {
    let viewport = Viewport::new(VIEWPORT.0, VIEWPORT.1).with_document_height(VIEWPORT.1 * 3.0);
    let options = HeroOptions {
        seed,
        ..HeroOptions::with_keywords(KEYWORDS)
    };
    let mut hero = KineticHero::mount(options, HeroConfig::default(), viewport, 0.0)
        .context("mounting hero")?;

    let mut summary = Summary::default();
    let ticks = (seconds * TICK_HZ).ceil() as u64;
    let mut next_click = 1.0;
    let mut hidden = false;

    for tick in 1..=ticks {
        let now = tick as f64 / TICK_HZ;

        let should_hide = (HIDDEN_WINDOW.0..HIDDEN_WINDOW.1).contains(&now);
        if should_hide != hidden {
            hidden = should_hide;
            log::info!("[native] t={:.2}s tab {}", now, if hidden { "hidden" } else { "visible" });
            hero.visibility_changed(hidden, now);
        }

        if tick % 4 == 0 {
            hero.pointer_move(pointer_at(now));
        }
        if now >= next_click {
            next_click += CLICK_EVERY_SEC;
            if hero.click(now) {
                summary.blasts += 1;
            }
        }

        let out = hero.frame(now, viewport);
        if !out.spawned.is_empty() {
            log::debug!("[native] t={:.2}s spawned {}", now, out.spawned.len());
        }
        summary.spawned += out.spawned.len();
        for r in &out.removed {
            match r.cause {
                RemovalCause::Expired => summary.expired += 1,
                RemovalCause::OffScreen => summary.offscreen += 1,
            }
        }
        if out.gust_started {
            summary.gusts += 1;
            log::info!("[native] t={:.2}s gust", now);
        }
        if let Some(phase) = out.phase_changed {
            log::info!("[native] t={:.2}s phase {}", now, phase.as_str());
        }
        summary.peak_particles = summary.peak_particles.max(hero.particle_count());
    }

    log::info!(
        "[native] {} particles alive at end, {} timers pending",
        hero.particle_count(),
        hero.pending_timers()
    );
    hero.dispose();
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let (seconds, seed) = parse_args()?;
    log::info!(
        "[native] simulating {:.1}s at {} Hz on {}x{} (seed {:?})",
        seconds,
        TICK_HZ,
        VIEWPORT.0,
        VIEWPORT.1,
        seed
    );
    let s = run(seconds, seed)?;
    println!(
        "clicks blasted: {}  spawned: {}  expired: {}  off-screen: {}  gusts: {}  peak: {}",
        s.blasts, s.spawned, s.expired, s.offscreen, s.gusts, s.peak_particles
    );
    Ok(())
}

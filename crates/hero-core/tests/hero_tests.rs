// End-to-end behaviour of the mounted hero on a virtual clock.

use glam::Vec2;
use hero_core::*;

const FRAME: f64 = 1.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 800.0).with_document_height(2400.0)
}

fn options(keywords: &[&str]) -> HeroOptions {
    HeroOptions {
        seed: Some(42),
        ..HeroOptions::with_keywords(keywords.iter().copied())
    }
}

/// Tuning with ambient timers pushed far into the future.
fn quiet_config() -> HeroConfig {
    HeroConfig {
        auto_blast_min_sec: 1000.0,
        auto_blast_max_sec: 1000.0,
        gust_min_sec: 1000.0,
        gust_max_sec: 1000.0,
        ..HeroConfig::default()
    }
}

fn mount(keywords: &[&str], cfg: HeroConfig) -> KineticHero {
    KineticHero::mount(options(keywords), cfg, viewport(), 0.0).expect("valid config")
}

/// Run frames over `(from, to]`, returning every output.
fn run(hero: &mut KineticHero, from: f64, to: f64) -> Vec<FrameOutput> {
    let mut out = Vec::new();
    let mut i = 1u32;
    loop {
        let now = from + i as f64 * FRAME;
        if now > to + 1e-9 {
            break;
        }
        out.push(hero.frame(now, viewport()));
        i += 1;
    }
    out
}

#[test]
fn lens_converges_geometrically_without_overshoot() {
    let mut hero = mount(&["a"], quiet_config());
    hero.frame(0.0, viewport());
    let start = hero.lens().current;
    let target = Vec2::new(start.x + 500.0, start.y - 200.0);
    hero.pointer_move(target);
    let d0 = start.distance(target);

    let mut prev = hero.lens().current;
    for n in 1..=30 {
        hero.frame(n as f64 * FRAME, viewport());
        let cur = hero.lens().current;
        let expected = d0 * 0.8f32.powi(n);
        let actual = cur.distance(target);
        assert!(
            (actual - expected).abs() <= expected * 1e-3 + 1e-3,
            "frame {n}: expected {expected}, got {actual}"
        );
        // monotone approach on both axes
        assert!(cur.x >= prev.x && cur.x <= target.x);
        assert!(cur.y <= prev.y && cur.y >= target.y);
        prev = cur;
    }
}

#[test]
fn clicks_inside_gap_blast_once() {
    let cfg = HeroConfig {
        min_trigger_gap_sec: 0.8,
        ..quiet_config()
    };
    let mut hero = mount(&["alpha", "beta"], cfg);
    assert!(hero.click(0.0));
    assert!(!hero.click(0.5));
    let out = hero.frame(0.51, viewport());
    assert!((2..=4).contains(&out.spawned.len()));
    assert_eq!(hero.particle_count(), out.spawned.len());
}

#[test]
fn empty_keywords_is_static_background() {
    let mut hero = mount(&[], HeroConfig::default());
    assert_eq!(hero.pending_timers(), 0);
    assert!(!hero.click(0.0));
    let outs = run(&mut hero, 0.0, 30.0);
    assert!(outs.iter().all(|o| o.spawned.is_empty() && !o.gust_started));
    assert_eq!(hero.particle_count(), 0);
    assert_eq!(hero.phase(), Phase::Idle);
}

#[test]
fn blank_keywords_are_dropped() {
    let mut hero = mount(&["", "  "], HeroConfig::default());
    assert!(!hero.click(0.0));
    assert_eq!(hero.pending_timers(), 0);
}

#[test]
fn spawn_origin_is_lens_centre_in_document_space() {
    let vp = Viewport::new(1280.0, 800.0)
        .with_scroll(Vec2::new(0.0, 300.0))
        .with_hero(Some(Rect::new(0.0, -300.0, 1280.0, 800.0)))
        .with_document_height(3000.0);
    let mut hero = KineticHero::mount(options(&["word"]), quiet_config(), vp, 0.0).unwrap();
    // desktop default: hero centre (640, 100) shifted left by 300
    assert_eq!(hero.lens().current, Vec2::new(340.0, 100.0));
    assert!(hero.click(0.0));
    let ids: Vec<_> = hero.engine().views().iter().map(|v| v.id).collect();
    for id in ids {
        let pose = hero.engine().pose(id).unwrap();
        assert!((pose.position - Vec2::new(340.0, 400.0)).length() < 1e-3);
    }
}

#[test]
fn phase_walks_burst_after_idle() {
    let mut hero = mount(&["a", "b"], quiet_config());
    assert_eq!(hero.frame(0.0, viewport()).phase_changed, None);
    assert!(hero.click(0.0));

    let mut changes = Vec::new();
    let outs = run(&mut hero, 0.0, 6.0);
    for (i, o) in outs.iter().enumerate() {
        if let Some(p) = o.phase_changed {
            changes.push((i, p));
        }
    }
    let phases: Vec<Phase> = changes.iter().map(|(_, p)| *p).collect();
    assert_eq!(phases, vec![Phase::Burst, Phase::After, Phase::Idle]);
    assert_eq!(hero.phase(), Phase::Idle);
}

#[test]
fn pulse_rings_out_after_click() {
    let mut hero = mount(&["a"], quiet_config());
    hero.click(0.0);
    let outs = run(&mut hero, 0.0, 1.2);
    assert!(outs.iter().any(|o| o.lens.scale > 1.1));
    assert_eq!(outs.last().unwrap().lens.scale, 1.0);
}

#[test]
fn sprites_follow_bodies_in_viewport_space() {
    let mut hero = mount(&["sprite"], quiet_config());
    hero.click(0.0);
    let out = hero.frame(FRAME, viewport());
    assert_eq!(out.sprites.len(), hero.particle_count());
    for s in &out.sprites {
        let pose = hero.engine().pose(s.id).unwrap();
        assert_eq!(s.center, pose.position);
        assert_eq!(s.angle, pose.angle);
        let t = s.translate(Vec2::new(30.0, 10.0));
        assert_eq!(t, pose.position - Vec2::new(30.0, 10.0));
    }
}

#[test]
fn ttl_removes_resting_particles_through_frames() {
    let mut hero = mount(&["rest"], quiet_config());
    hero.click(0.0);
    let first = hero.frame(0.0, viewport());
    let ids: Vec<ParticleId> = first.spawned.iter().map(|s| s.id).collect();

    let outs = run(&mut hero, 0.0, 15.0 + 2.0 * FRAME);
    // every particle left exactly once, by TTL or earlier by drifting away
    let mut gone: Vec<ParticleId> = outs
        .iter()
        .flat_map(|o| o.removed.iter().map(|r| r.id))
        .collect();
    gone.sort_unstable();
    assert_eq!(gone, ids);
    for (i, o) in outs.iter().enumerate() {
        let now = (i + 1) as f64 * FRAME;
        if o.removed.iter().any(|r| r.cause == RemovalCause::Expired) {
            assert!(now >= 15.0 - 1e-9, "expired early at {now}");
        }
    }
    assert_eq!(hero.particle_count(), 0);
}

#[test]
fn offscreen_particle_removed_on_next_frame() {
    let mut hero = mount(&["far"], quiet_config());
    hero.click(0.0);
    let spawned = hero.frame(0.0, viewport()).spawned;
    let id = spawned[0].id;
    hero.engine_mut()
        .set_position(id, Vec2::new(1280.0 + 300.0 + 60.0, 200.0));
    let out = hero.frame(FRAME, viewport());
    assert!(out
        .removed
        .iter()
        .any(|r| r.id == id && r.cause == RemovalCause::OffScreen));
    assert!(!hero.engine().contains(id));
    assert_eq!(hero.particle_count(), spawned.len() - 1);
}

#[test]
fn removed_particle_has_no_sprite_in_same_frame() {
    let mut hero = mount(&["gone"], quiet_config());
    hero.click(0.0);
    let spawned = hero.frame(0.0, viewport()).spawned;
    let id = spawned[0].id;
    hero.engine_mut().set_position(id, Vec2::new(-2000.0, 200.0));

    let out = hero.frame(FRAME, viewport());
    assert!(out.removed.iter().any(|r| r.id == id));
    assert!(out.sprites.iter().all(|s| s.id != id));
    assert_eq!(out.sprites.len(), hero.particle_count());
}

#[test]
fn gust_timer_cannot_overlap_running_gust() {
    let cfg = HeroConfig {
        gust_min_sec: 0.5,
        gust_max_sec: 0.5,
        ..quiet_config()
    };
    let mut hero = mount(&["g"], cfg);
    let outs = run(&mut hero, 0.0, 0.55);
    assert_eq!(outs.iter().filter(|o| o.gust_started).count(), 1);
    assert!(hero.engine().is_gusting());
    assert_eq!(hero.scheduler().deadline(TimerKind::Gust), None);

    // nothing else starts while the 1.5s gust runs
    let during = run(&mut hero, 0.55, 1.9);
    assert!(during.iter().all(|o| !o.gust_started));

    // the gust ends, the timer re-arms and fires again half a second later
    let after = run(&mut hero, 1.9, 3.0);
    assert!(after.iter().any(|o| o.gust_started));
}

#[test]
fn hidden_document_cancels_and_visible_rearms() {
    let mut hero = mount(&["vis"], HeroConfig::default());
    assert_eq!(hero.pending_timers(), 2);

    hero.visibility_changed(true, 1.0);
    assert_eq!(hero.pending_timers(), 0);
    let hidden = run(&mut hero, 1.0, 60.0);
    assert!(hidden.iter().all(|o| o.spawned.is_empty() && !o.gust_started));

    hero.visibility_changed(false, 60.0);
    assert_eq!(hero.pending_timers(), 2);
    let blast_at = hero.scheduler().deadline(TimerKind::AutoBlast).unwrap();
    assert!(blast_at >= 60.0 + AUTO_BLAST_MIN && blast_at <= 60.0 + AUTO_BLAST_MAX);

    let visible = run(&mut hero, 60.0, 60.0 + AUTO_BLAST_MAX + 2.0 * FRAME);
    assert!(visible.iter().any(|o| !o.spawned.is_empty()));

    let later = run(&mut hero, 60.0 + AUTO_BLAST_MAX + 2.0 * FRAME, 60.0 + 16.0 + 2.0 * FRAME);
    assert!(visible.iter().chain(later.iter()).any(|o| o.gust_started));
}

const AUTO_BLAST_MIN: f64 = hero_core::constants::AUTO_BLAST_MIN_SEC;
const AUTO_BLAST_MAX: f64 = hero_core::constants::AUTO_BLAST_MAX_SEC;

#[test]
fn auto_blast_keeps_rescheduling() {
    let mut hero = mount(&["auto"], HeroConfig::default());
    let outs = run(&mut hero, 0.0, 30.0);
    let blasts = outs.iter().filter(|o| !o.spawned.is_empty()).count();
    // one blast at least every 4.8s
    assert!(blasts >= 6, "only {blasts} blasts in 30s");
    assert!(hero.scheduler().deadline(TimerKind::AutoBlast).is_some());
}

#[test]
fn dispose_leaves_nothing_behind() {
    let mut hero = mount(&["one", "two", "three"], HeroConfig::default());
    assert!(hero.click(0.0));
    run(&mut hero, 0.0, 1.0);
    assert!(hero.click(1.5));
    run(&mut hero, 1.0, 2.0);
    assert!(hero.particle_count() >= 4);
    assert!(hero.pending_timers() > 0);

    hero.dispose();
    assert!(hero.is_disposed());
    assert_eq!(hero.pending_timers(), 0);
    assert_eq!(hero.particle_count(), 0);
    assert_eq!(hero.engine().body_count(), 0);

    // later events are inert
    assert!(!hero.click(10.0));
    hero.visibility_changed(false, 10.0);
    assert_eq!(hero.pending_timers(), 0);
    let outs = run(&mut hero, 10.0, 40.0);
    assert!(outs
        .iter()
        .all(|o| o.spawned.is_empty() && o.sprites.is_empty() && !o.gust_started));

    hero.dispose();
    assert_eq!(hero.pending_timers(), 0);
}

#[test]
fn invalid_config_is_rejected_at_mount() {
    let cfg = HeroConfig {
        spawn_count_min: 5,
        spawn_count_max: 2,
        ..HeroConfig::default()
    };
    assert!(matches!(
        KineticHero::mount(options(&["x"]), cfg, viewport(), 0.0),
        Err(ConfigError::InvalidRange { .. })
    ));
}

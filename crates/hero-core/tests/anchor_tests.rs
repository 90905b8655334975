// Lens anchor: default placement, pointer following and the follow policy.

use glam::Vec2;
use hero_core::*;

fn desktop() -> Viewport {
    Viewport::new(1280.0, 800.0)
}

fn mobile() -> Viewport {
    Viewport::new(500.0, 900.0)
}

#[test]
fn default_anchor_is_offset_from_hero_centre() {
    let cfg = HeroConfig::default();

    let t = AnchorTracker::new(FollowPolicy::Always, &cfg, &desktop());
    assert_eq!(t.device(), DeviceClass::Desktop);
    assert_eq!(t.target(), Vec2::new(340.0, 400.0));

    let t = AnchorTracker::new(FollowPolicy::Always, &cfg, &mobile());
    assert_eq!(t.device(), DeviceClass::Mobile);
    assert_eq!(t.target(), Vec2::new(250.0, 390.0));
}

#[test]
fn radius_scales_with_vmin() {
    let cfg = HeroConfig::default();
    let t = AnchorTracker::new(FollowPolicy::Always, &cfg, &desktop());
    assert_eq!(t.radius_px(), 200.0);
    let t = AnchorTracker::new(FollowPolicy::Always, &cfg, &mobile());
    assert_eq!(t.radius_px(), 162.5);
}

#[test]
fn pointer_retargets_when_following() {
    let cfg = HeroConfig::default();
    let mut t = AnchorTracker::new(FollowPolicy::Always, &cfg, &desktop());
    t.pointer_moved(Vec2::new(900.0, 120.0));
    assert!(t.tracks_pointer());
    assert_eq!(t.target(), Vec2::new(900.0, 120.0));
    t.pointer_moved(Vec2::new(10.0, 20.0));
    assert_eq!(t.target(), Vec2::new(10.0, 20.0));
}

#[test]
fn resize_without_pointer_recomputes_default() {
    let cfg = HeroConfig::default();
    let mut t = AnchorTracker::new(FollowPolicy::Always, &cfg, &desktop());
    t.resized(&cfg, &mobile());
    assert_eq!(t.device(), DeviceClass::Mobile);
    assert_eq!(t.target(), Vec2::new(250.0, 390.0));
    assert_eq!(t.radius_px(), 162.5);
}

#[test]
fn resize_keeps_pointer_target() {
    let cfg = HeroConfig::default();
    let mut t = AnchorTracker::new(FollowPolicy::Always, &cfg, &desktop());
    t.pointer_moved(Vec2::new(700.0, 300.0));
    t.resized(&cfg, &Viewport::new(1600.0, 900.0));
    assert_eq!(t.target(), Vec2::new(700.0, 300.0));
    assert_eq!(t.radius_px(), 225.0);
}

#[test]
fn after_scroll_policy_waits_for_threshold() {
    let cfg = HeroConfig::default();
    let policy = FollowPolicy::AfterScroll { threshold_px: 200.0 };
    let mut t = AnchorTracker::new(policy, &cfg, &desktop());
    assert!(!t.is_following());

    t.pointer_moved(Vec2::new(1000.0, 100.0));
    assert!(t.has_pointer());
    assert_eq!(t.target(), Vec2::new(340.0, 400.0));

    let deep = desktop()
        .with_scroll(Vec2::new(0.0, 250.0))
        .with_hero(Some(Rect::new(0.0, -250.0, 1280.0, 800.0)));
    t.scrolled(&cfg, &deep);
    assert!(t.is_following());
    assert_eq!(t.target(), Vec2::new(1000.0, 100.0));

    let shallow = desktop()
        .with_scroll(Vec2::new(0.0, 100.0))
        .with_hero(Some(Rect::new(0.0, -100.0, 1280.0, 800.0)));
    t.scrolled(&cfg, &shallow);
    assert!(!t.is_following());
    assert_eq!(t.target(), Vec2::new(340.0, 300.0));
}

#[test]
fn after_scroll_without_pointer_starts_at_viewport_centre() {
    let cfg = HeroConfig::default();
    let policy = FollowPolicy::AfterScroll { threshold_px: 200.0 };
    let mut t = AnchorTracker::new(policy, &cfg, &desktop());
    t.scrolled(&cfg, &desktop().with_scroll(Vec2::new(0.0, 400.0)));
    assert_eq!(t.target(), Vec2::new(640.0, 400.0));
}

#[test]
fn touch_always_retargets() {
    let cfg = HeroConfig::default();
    let policy = FollowPolicy::AfterScroll { threshold_px: 10_000.0 };
    let mut t = AnchorTracker::new(policy, &cfg, &desktop());
    t.touch_moved(Vec2::new(50.0, 60.0));
    assert_eq!(t.target(), Vec2::new(50.0, 60.0));
}

#[test]
fn detached_hero_uses_viewport_centre() {
    let cfg = HeroConfig::default();
    let vp = desktop().with_hero(None);
    let t = AnchorTracker::new(FollowPolicy::Always, &cfg, &vp);
    assert_eq!(t.target(), Vec2::new(340.0, 400.0));
}

//! Viewport anchor tracking: where the lens should be heading.
//!
//! Until a pointer or touch has been seen the lens rests at the hero centre
//! plus a device-specific offset. Afterwards it chases the last pointer
//! position whenever following is enabled by the [`FollowPolicy`].

use crate::config::{DeviceClass, FollowPolicy, HeroConfig};
use crate::viewport::Viewport;
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct AnchorTracker {
    policy: FollowPolicy,
    device: DeviceClass,
    pointer: Option<Vec2>,
    following: bool,
    target: Vec2,
    radius_px: f32,
}

impl AnchorTracker {
    pub fn new(policy: FollowPolicy, cfg: &HeroConfig, vp: &Viewport) -> Self {
        let device = cfg.device_class(vp.width);
        let mut tracker = Self {
            policy,
            device,
            pointer: None,
            following: follow_enabled(policy, vp),
            target: Vec2::ZERO,
            radius_px: lens_radius_px(cfg, vp, device),
        };
        tracker.target = tracker.default_target(cfg, vp);
        tracker
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn radius_px(&self) -> f32 {
        self.radius_px
    }

    #[inline]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    #[inline]
    pub fn is_following(&self) -> bool {
        self.following
    }

    #[inline]
    pub fn has_pointer(&self) -> bool {
        self.pointer.is_some()
    }

    /// True while the target is the pointer rather than the default anchor.
    #[inline]
    pub fn tracks_pointer(&self) -> bool {
        self.following && self.pointer.is_some()
    }

    /// Hero centre plus the device offset, in viewport coordinates.
    pub fn default_target(&self, cfg: &HeroConfig, vp: &Viewport) -> Vec2 {
        let [ox, oy] = cfg.default_offset(self.device);
        vp.hero_center() + Vec2::new(ox, oy)
    }

    pub fn pointer_moved(&mut self, p: Vec2) {
        if !p.is_finite() {
            return;
        }
        self.pointer = Some(p);
        if self.following {
            self.target = p;
        }
    }

    /// Touch drags retarget the lens regardless of the follow policy.
    pub fn touch_moved(&mut self, p: Vec2) {
        if !p.is_finite() {
            return;
        }
        self.pointer = Some(p);
        self.target = p;
    }

    pub fn resized(&mut self, cfg: &HeroConfig, vp: &Viewport) {
        self.device = cfg.device_class(vp.width);
        self.radius_px = lens_radius_px(cfg, vp, self.device);
        self.refresh(cfg, vp);
    }

    pub fn scrolled(&mut self, cfg: &HeroConfig, vp: &Viewport) {
        self.refresh(cfg, vp);
    }

    fn refresh(&mut self, cfg: &HeroConfig, vp: &Viewport) {
        let was_following = self.following;
        self.following = follow_enabled(self.policy, vp);

        if self.following && !was_following {
            self.target = self.pointer.unwrap_or_else(|| vp.center());
            log::debug!("[lens] following pointer from ({:.0},{:.0})", self.target.x, self.target.y);
            return;
        }
        if !self.tracks_pointer() {
            self.target = self.default_target(cfg, vp);
        }
    }
}

fn follow_enabled(policy: FollowPolicy, vp: &Viewport) -> bool {
    match policy {
        FollowPolicy::Always => true,
        FollowPolicy::AfterScroll { threshold_px } => vp.scroll.y > threshold_px,
    }
}

/// Radius from a vmin percentage; always strictly positive.
pub fn lens_radius_px(cfg: &HeroConfig, vp: &Viewport, device: DeviceClass) -> f32 {
    let r = cfg.lens_diameter_vmin(device) * vp.vmin() / 100.0 / 2.0;
    if r.is_finite() {
        r.max(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_never_collapses() {
        let cfg = HeroConfig::default();
        let vp = Viewport::new(0.0, 0.0);
        assert!(lens_radius_px(&cfg, &vp, DeviceClass::Mobile) > 0.0);
    }

    #[test]
    fn non_finite_pointer_is_ignored() {
        let cfg = HeroConfig::default();
        let vp = Viewport::new(1200.0, 800.0);
        let mut t = AnchorTracker::new(FollowPolicy::Always, &cfg, &vp);
        let before = t.target();
        t.pointer_moved(Vec2::new(f32::NAN, 3.0));
        assert_eq!(t.target(), before);
        assert!(!t.has_pointer());
    }
}

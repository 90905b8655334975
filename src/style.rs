// CSS value formatting for the hero layers. Pure string building so the
// host-side tests can include it directly.

use glam::Vec2;
use hero_core::Glow;

pub const LENS_DROP_SHADOW: &str = "10px 10px 20px rgba(0,0,0,0.3)";

/// Compact CSS number: at most three decimals, no trailing zeros, never `-0`.
pub fn num(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[inline]
pub fn px(v: f32) -> String {
    format!("{}px", num(v))
}

pub fn rgba(c: [f32; 4]) -> String {
    format!(
        "rgba({},{},{},{})",
        num(c[0].round()),
        num(c[1].round()),
        num(c[2].round()),
        num(c[3])
    )
}

/// Ring shadow: the inset border, a soft drop shadow, then one layer per light.
pub fn box_shadow(glow: &Glow) -> String {
    let mut parts = Vec::with_capacity(2 + glow.lights.len());
    parts.push(format!("inset 0 0 0 {} #000", px(glow.border_px)));
    parts.push(LENS_DROP_SHADOW.to_string());
    for light in &glow.lights {
        parts.push(format!(
            "{} {} {} {}",
            px(light.offset[0]),
            px(light.offset[1]),
            px(glow.blur_px),
            rgba(light.rgba)
        ));
    }
    parts.join(", ")
}

/// Circular cutout for the scope background, in layer-local pixels.
pub fn clip_circle(center: Vec2, radius: f32) -> String {
    format!(
        "circle({} at {} {})",
        px(radius.max(0.0)),
        px(center.x),
        px(center.y)
    )
}

pub fn translate(p: Vec2) -> String {
    format!("translate({}, {})", px(p.x), px(p.y))
}

pub fn sprite_transform(top_left: Vec2, angle: f32) -> String {
    format!("{} rotate({}rad)", translate(top_left), num(angle))
}

pub fn ring_transform(scale: f32) -> String {
    format!("translate(-50%, -50%) scale({})", num(scale))
}

#[inline]
pub fn vmin(v: f32) -> String {
    format!("{}vmin", num(v))
}

#[inline]
pub fn ring_border(border_px: f32) -> String {
    format!("{} solid #000", px(border_px))
}

#[inline]
pub fn fade_transition(property: &str, sec: f32) -> String {
    format!("{} {}s ease", property, num(sec))
}

pub fn background_url(url: &str) -> String {
    format!("url(\"{}\")", url.replace('"', "%22"))
}

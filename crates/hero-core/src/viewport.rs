//! Snapshot of the host page geometry taken once per event or frame.

use glam::Vec2;

/// Axis-aligned rectangle in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Viewport size, scroll offset, document extent and the hero box.
///
/// `hero` is `None` when the root element is detached; every derived point
/// then falls back to the viewport itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll: Vec2,
    pub document_height: f32,
    pub hero: Option<Rect>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll: Vec2::ZERO,
            document_height: height,
            hero: Some(Rect::new(0.0, 0.0, width, height)),
        }
    }

    pub fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_hero(mut self, hero: Option<Rect>) -> Self {
        self.hero = hero;
        self
    }

    pub fn with_document_height(mut self, document_height: f32) -> Self {
        self.document_height = document_height;
        self
    }

    #[inline]
    pub fn vmin(&self) -> f32 {
        self.width.min(self.height).max(0.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    fn live_hero(&self) -> Option<Rect> {
        self.hero.filter(Rect::is_finite)
    }

    /// Hero centre in viewport coordinates, or the viewport centre when detached.
    #[inline]
    pub fn hero_center(&self) -> Vec2 {
        self.live_hero()
            .map(|r| r.center())
            .unwrap_or_else(|| self.center())
    }

    /// Hero bottom edge in document coordinates, or the viewport bottom when detached.
    #[inline]
    pub fn hero_bottom_page_y(&self) -> f32 {
        match self.live_hero() {
            Some(r) => r.bottom() + self.scroll.y,
            None => self.scroll.y + self.height,
        }
    }

    #[inline]
    pub fn to_document(&self, p: Vec2) -> Vec2 {
        p + self.scroll
    }

    #[inline]
    pub fn to_viewport(&self, p: Vec2) -> Vec2 {
        p - self.scroll
    }

    /// Document height never smaller than what is currently on screen.
    #[inline]
    pub fn document_extent(&self) -> f32 {
        self.document_height.max(self.scroll.y + self.height)
    }
}

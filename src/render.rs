//! DOM side of the hero: the scope background with its circular cutout, the
//! lens ring and one absolutely positioned span per flying word.

use crate::constants::*;
use crate::dom;
use crate::style;
use fnv::FnvHashMap;
use glam::Vec2;
use hero_core::{FrameOutput, HeroOptions, ParticleId, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct HeroView {
    document: web::Document,
    root: web::HtmlElement,
    scope: web::HtmlElement,
    lens: web::HtmlElement,
    ring: web::HtmlElement,
    word_layer: web::HtmlElement,
    // authored children lifted above the ring, and whether we set their position
    titles: Vec<(web::HtmlElement, bool)>,
    words: FnvHashMap<ParticleId, web::HtmlElement>,
    word_font_weight: String,
    scope_revealed: bool,
    // last written values, to skip redundant style writes
    last_shadow: String,
    last_ring_size: String,
}

impl HeroView {
    /// Create the generated layers inside `root`. Authored children (the
    /// page title) stay where they are but are lifted to `Z_TEXT`.
    pub fn build(
        document: &web::Document,
        root: &web::HtmlElement,
        options: &HeroOptions,
    ) -> Result<Self, JsValue> {
        dom::set_styles(
            root,
            &[
                ("position", "relative"),
                ("height", &options.container_height),
                ("overflow", "hidden"),
            ],
        );

        let scope = dom::create_div(document, CLASS_SCOPE)?;
        dom::set_styles(
            &scope,
            &[
                ("position", "absolute"),
                ("inset", "0"),
                ("background-image", &style::background_url(SCOPE_BG_URL)),
                ("background-size", "cover"),
                ("background-position", "center"),
                ("pointer-events", "none"),
                ("z-index", &Z_SCOPE_BG.to_string()),
                ("clip-path", "circle(0px at 0px 0px)"),
                ("opacity", "0"),
                ("transition", &style::fade_transition("opacity", SCOPE_FADE_SEC)),
            ],
        );

        let lens = dom::create_div(document, CLASS_LENS)?;
        dom::set_styles(
            &lens,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("width", "0"),
                ("height", "0"),
                ("pointer-events", "none"),
                ("will-change", "transform"),
                ("z-index", &Z_RING.to_string()),
            ],
        );
        let ring = dom::create_div(document, CLASS_RING)?;
        dom::set_styles(
            &ring,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("border-radius", "50%"),
                ("background", "transparent"),
                ("pointer-events", "none"),
                ("will-change", "transform, box-shadow"),
                ("transform", &style::ring_transform(1.0)),
            ],
        );
        lens.append_child(&ring)?;

        let word_layer = dom::create_div(document, CLASS_WORDS)?;
        dom::set_styles(
            &word_layer,
            &[
                ("position", "absolute"),
                ("inset", "0"),
                ("pointer-events", "none"),
                ("z-index", &Z_WORDS.to_string()),
            ],
        );

        let titles = lift_authored_children(root);

        // scope and ring go underneath the authored title
        root.insert_before(&lens, root.first_child().as_ref())?;
        let lens_node: &web::Node = &lens;
        root.insert_before(&scope, Some(lens_node))?;
        root.append_child(&word_layer)?;

        Ok(Self {
            document: document.clone(),
            root: root.clone(),
            scope,
            lens,
            ring,
            word_layer,
            titles,
            words: FnvHashMap::default(),
            word_font_weight: options.word_font_weight.clone(),
            scope_revealed: false,
            last_shadow: String::new(),
            last_ring_size: String::new(),
        })
    }

    /// Push one frame of core output into the DOM.
    pub fn apply(&mut self, out: &FrameOutput, vp: &Viewport) {
        let origin = vp.hero.map(|r| Vec2::new(r.left, r.top)).unwrap_or(Vec2::ZERO);
        self.apply_lens(out, origin);

        for s in &out.spawned {
            self.add_word(s.id, &s.text);
        }
        for r in &out.removed {
            self.remove_word(r.id);
        }
        for sprite in &out.sprites {
            let Some(el) = self.words.get(&sprite.id) else {
                continue;
            };
            let half = Vec2::new(el.client_width() as f32, el.client_height() as f32) * 0.5;
            let local = sprite.translate(half) - origin;
            dom::set_style(el, "transform", &style::sprite_transform(local, sprite.angle));
        }
    }

    fn apply_lens(&mut self, out: &FrameOutput, origin: Vec2) {
        let lens = out.lens;
        let local = lens.center - origin;
        dom::set_style(&self.lens, "transform", &style::translate(local));

        let size = style::vmin(lens.diameter_vmin);
        if size != self.last_ring_size {
            dom::set_styles(
                &self.ring,
                &[
                    ("width", &size),
                    ("height", &size),
                    ("border", &style::ring_border(lens.border_px)),
                ],
            );
            self.last_ring_size = size;
        }
        dom::set_style(&self.ring, "transform", &style::ring_transform(lens.scale));

        let shadow = style::box_shadow(&out.glow);
        if shadow != self.last_shadow {
            dom::set_style(&self.ring, "box-shadow", &shadow);
            self.last_shadow = shadow;
        }

        let clip = style::clip_circle(local, lens.radius_px);
        dom::set_style(&self.scope, "clip-path", &clip);
        dom::set_style(&self.scope, "-webkit-clip-path", &clip);
        if !self.scope_revealed {
            dom::set_style(&self.scope, "opacity", &style::num(SCOPE_OPACITY));
            self.scope_revealed = true;
        }
    }

    fn add_word(&mut self, id: ParticleId, text: &str) {
        let el = match dom::create_span(&self.document, CLASS_WORD, text) {
            Ok(el) => el,
            Err(e) => {
                log::warn!("[hero] word element not created: {:?}", e);
                return;
            }
        };
        let parked = style::translate(Vec2::splat(OFFSCREEN_PARK_PX));
        dom::set_styles(
            &el,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("white-space", "nowrap"),
                ("pointer-events", "none"),
                ("user-select", "none"),
                ("will-change", "transform"),
                ("font-weight", &self.word_font_weight),
                ("transform", &parked),
            ],
        );
        if self.word_layer.append_child(&el).is_ok() {
            self.words.insert(id, el);
        }
    }

    fn remove_word(&mut self, id: ParticleId) {
        if let Some(el) = self.words.remove(&id) {
            el.remove();
        }
    }

    /// Remove every generated element. Idempotent.
    pub fn teardown(&mut self) {
        for (_, el) in self.words.drain() {
            el.remove();
        }
        self.word_layer.remove();
        self.lens.remove();
        self.scope.remove();
        for (el, set_position) in self.titles.drain(..) {
            let style = el.style();
            if set_position {
                _ = style.remove_property("position");
            }
            _ = style.remove_property("z-index");
        }
        _ = self.root.style().remove_property("overflow");
    }
}

/// Put every element already inside `root` on the title layer. z-index needs
/// a positioned box, so statically placed children become `relative`.
fn lift_authored_children(root: &web::HtmlElement) -> Vec<(web::HtmlElement, bool)> {
    let children = root.child_nodes();
    let z = Z_TEXT.to_string();
    let mut lifted = Vec::new();
    for i in 0..children.length() {
        let Some(el) = children.get(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        let set_position = el
            .style()
            .get_property_value("position")
            .map(|p| p.is_empty() || p == "static")
            .unwrap_or(true);
        if set_position {
            dom::set_style(&el, "position", "relative");
        }
        dom::set_style(&el, "z-index", &z);
        lifted.push((el, set_position));
    }
    lifted
}

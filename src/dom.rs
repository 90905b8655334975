use crate::constants::ATTR_OPTIONS;
use glam::Vec2;
use hero_core::{HeroOptions, Rect, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document.visibility_state() == web::VisibilityState::Hidden
}

/// Geometry snapshot for the hero rooted at `root`. A detached root yields
/// `hero: None` so the core falls back to the viewport.
pub fn viewport_snapshot(root: &web::HtmlElement) -> Viewport {
    let Some(window) = web::window() else {
        return Viewport::new(0.0, 0.0).with_hero(None);
    };
    let width = js_f32(window.inner_width());
    let height = js_f32(window.inner_height());
    let scroll = Vec2::new(
        window.scroll_x().unwrap_or(0.0) as f32,
        window.scroll_y().unwrap_or(0.0) as f32,
    );
    let hero = root.is_connected().then(|| {
        let r = root.get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    });
    Viewport::new(width, height)
        .with_scroll(scroll)
        .with_hero(hero)
        .with_document_height(document_height(window.document().as_ref()))
}

fn document_height(document: Option<&web::Document>) -> f32 {
    let Some(doc) = document else {
        return 0.0;
    };
    let root_h = doc.document_element().map(|e| e.scroll_height()).unwrap_or(0);
    let body_h = doc.body().map(|b| b.scroll_height()).unwrap_or(0);
    root_h.max(body_h) as f32
}

fn js_f32(v: Result<JsValue, JsValue>) -> f32 {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

/// Options from the root's JSON attribute. Malformed JSON is logged and the
/// hero falls back to defaults (no keywords, static background).
pub fn read_options(root: &web::Element) -> HeroOptions {
    match root.get_attribute(ATTR_OPTIONS) {
        Some(json) => HeroOptions::from_json(&json).unwrap_or_else(|e| {
            log::warn!("[hero] ignoring {}: {}", ATTR_OPTIONS, e);
            HeroOptions::default()
        }),
        None => HeroOptions::default(),
    }
}

pub fn create_div(document: &web::Document, class: &str) -> Result<web::HtmlElement, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(class);
    el.dyn_into::<web::HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not an HtmlElement"))
}

pub fn create_span(
    document: &web::Document,
    class: &str,
    text: &str,
) -> Result<web::HtmlElement, JsValue> {
    let el = document.create_element("span")?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    el.dyn_into::<web::HtmlElement>()
        .map_err(|_| JsValue::from_str("span is not an HtmlElement"))
}

/// Apply several style properties, logging (not failing) on rejection.
pub fn set_styles(el: &web::HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        if style.set_property(name, value).is_err() {
            log::warn!("[hero] style {}={} rejected", name, value);
        }
    }
}

#[inline]
pub fn set_style(el: &web::HtmlElement, name: &str, value: &str) {
    _ = el.style().set_property(name, value);
}

use crate::dom;
use crate::frame::Clock;
use glam::Vec2;
use gloo_events::EventListener;
use hero_core::KineticHero;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct EventWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub root: web::HtmlElement,
    pub hero: Rc<RefCell<KineticHero>>,
    pub clock: Clock,
}

/// Subscribe every platform event the hero reacts to. Dropping the returned
/// listeners unsubscribes them.
pub fn wire_hero_events(w: EventWiring) -> Vec<EventListener> {
    vec![
        wire_mousemove(&w),
        wire_touchmove(&w),
        wire_click(&w),
        wire_resize(&w),
        wire_scroll(&w),
        wire_visibility(&w),
    ]
}

fn wire_mousemove(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    EventListener::new(&w.window, "mousemove", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            hero.borrow_mut().pointer_move(p);
        }
    })
}

fn wire_touchmove(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    EventListener::new(&w.window, "touchmove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        if let Some(t) = ev.touches().get(0) {
            let p = Vec2::new(t.client_x() as f32, t.client_y() as f32);
            hero.borrow_mut().touch_move(p);
        }
    })
}

fn wire_click(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    let clock = w.clock;
    EventListener::new(&w.root, "click", move |_| {
        if !hero.borrow_mut().click(clock.now()) {
            log::debug!("[hero] click ignored");
        }
    })
}

fn wire_resize(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    let root = w.root.clone();
    EventListener::new(&w.window, "resize", move |_| {
        hero.borrow_mut().resize(dom::viewport_snapshot(&root));
    })
}

fn wire_scroll(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    let root = w.root.clone();
    EventListener::new(&w.window, "scroll", move |_| {
        hero.borrow_mut().scroll(dom::viewport_snapshot(&root));
    })
}

fn wire_visibility(w: &EventWiring) -> EventListener {
    let hero = w.hero.clone();
    let document = w.document.clone();
    let clock = w.clock;
    EventListener::new(&w.document, "visibilitychange", move |_| {
        let hidden = dom::is_hidden(&document);
        log::info!("[timer] document {}", if hidden { "hidden" } else { "visible" });
        hero.borrow_mut().visibility_changed(hidden, clock.now());
    })
}

#![cfg(target_arch = "wasm32")]
use crate::constants::{ATTR_MOUNT, ATTR_MOUNTED, ATTR_PHASE};
use crate::frame::{Clock, FrameContext, FrameLoop};
use crate::render::HeroView;
use fnv::FnvHashMap;
use gloo_events::EventListener;
use hero_core::{HeroConfig, KineticHero};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod style;

/// Everything owned by one mounted hero. Tearing it down stops the frame
/// loop, drops the listeners, disposes the core and removes generated DOM.
struct Mounted {
    root: web::HtmlElement,
    hero: Rc<RefCell<KineticHero>>,
    view: Rc<RefCell<HeroView>>,
    frame: FrameLoop,
    listeners: Vec<EventListener>,
}

impl Mounted {
    fn teardown(self) {
        self.frame.stop();
        drop(self.listeners);
        self.hero.borrow_mut().dispose();
        self.view.borrow_mut().teardown();
        _ = self.root.remove_attribute(ATTR_MOUNTED);
        _ = self.root.remove_attribute(ATTR_PHASE);
    }
}

thread_local! {
    static MOUNTED: RefCell<FnvHashMap<u32, Mounted>> = RefCell::new(FnvHashMap::default());
    static NEXT_ID: Cell<u32> = const { Cell::new(1) };
}

/// JS-side handle to a mounted hero.
#[wasm_bindgen]
pub struct HeroHandle {
    id: u32,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Tear the hero down. Safe to call more than once.
    pub fn unmount(&self) {
        let removed = MOUNTED.with(|m| m.borrow_mut().remove(&self.id));
        if let Some(mounted) = removed {
            mounted.teardown();
            log::info!("[hero] #{} unmounted", self.id);
        }
    }

    /// Current animation phase: `idle`, `burst` or `after`.
    pub fn phase(&self) -> String {
        MOUNTED.with(|m| {
            m.borrow()
                .get(&self.id)
                .map(|h| h.hero.borrow().phase().as_str().to_string())
                .unwrap_or_else(|| "idle".to_string())
        })
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        MOUNTED.with(|m| {
            m.borrow()
                .get(&self.id)
                .map(|h| h.hero.borrow().particle_count())
                .unwrap_or(0)
        })
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        MOUNTED.with(|m| m.borrow().contains_key(&self.id))
    }
}

#[wasm_bindgen(js_name = mountHero)]
pub fn mount_hero(element: web::HtmlElement) -> Result<HeroHandle, JsValue> {
    mount(element).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

/// Unmount every hero on the page; returns how many were torn down.
#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount_all() -> usize {
    let all: Vec<Mounted> = MOUNTED.with(|m| m.borrow_mut().drain().map(|(_, v)| v).collect());
    let n = all.len();
    for mounted in all {
        mounted.teardown();
    }
    if n > 0 {
        log::info!("[hero] unmounted {} hero(es)", n);
    }
    n
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kinetic-hero starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let selector = format!("[{}]", ATTR_MOUNT);
    let nodes = document
        .query_selector_all(&selector)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut mounted = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        match mount(el) {
            // auto-mounted heroes live until unmount_all
            Ok(_handle) => mounted += 1,
            Err(e) => log::warn!("[hero] mount skipped: {:#}", e),
        }
    }
    log::info!("[hero] auto-mounted {} hero(es)", mounted);
    Ok(())
}

fn mount(root: web::HtmlElement) -> anyhow::Result<HeroHandle> {
    if root.has_attribute(ATTR_MOUNTED) {
        anyhow::bail!("element is already mounted");
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let options = dom::read_options(&root);
    let clock = Clock::start();
    let viewport = dom::viewport_snapshot(&root);
    let mut hero = KineticHero::mount(options.clone(), HeroConfig::default(), viewport, clock.now())?;
    if dom::is_hidden(&document) {
        hero.visibility_changed(true, clock.now());
    }
    let hero = Rc::new(RefCell::new(hero));

    let view = HeroView::build(&document, &root, &options)
        .map_err(|e| anyhow::anyhow!("building hero layers: {:?}", e))?;
    let view = Rc::new(RefCell::new(view));

    let listeners = events::wire_hero_events(events::EventWiring {
        window,
        document,
        root: root.clone(),
        hero: hero.clone(),
        clock,
    });
    let frame = FrameLoop::start(FrameContext {
        hero: hero.clone(),
        view: view.clone(),
        root: root.clone(),
        clock,
    });

    _ = root.set_attribute(ATTR_MOUNTED, "");
    let id = NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id.wrapping_add(1));
        id
    });
    MOUNTED.with(|m| {
        m.borrow_mut().insert(
            id,
            Mounted {
                root,
                hero,
                view,
                frame,
                listeners,
            },
        )
    });
    log::info!("[hero] #{} mounted", id);
    Ok(HeroHandle { id })
}

use crate::constants::ATTR_PHASE;
use crate::dom;
use crate::render::HeroView;
use hero_core::KineticHero;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Monotonic seconds since mount; the only clock the core sees.
#[derive(Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

pub struct FrameContext {
    pub hero: Rc<RefCell<KineticHero>>,
    pub view: Rc<RefCell<HeroView>>,
    pub root: web::HtmlElement,
    pub clock: Clock,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let vp = dom::viewport_snapshot(&self.root);
        let out = self.hero.borrow_mut().frame(self.clock.now(), vp);
        if let Some(phase) = out.phase_changed {
            _ = self.root.set_attribute(ATTR_PHASE, phase.as_str());
        }
        if out.gust_started {
            log::debug!("[gust] started");
        }
        self.view.borrow_mut().apply(&out, &vp);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that can be stopped. Stopping cancels the
/// pending frame and drops the tick closure.
pub struct FrameLoop {
    tick: Tick,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(ctx: FrameContext) -> Self {
        let ctx = Rc::new(RefCell::new(ctx));
        let tick: Tick = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_clone.set(None);
            ctx.borrow_mut().frame();
            raf_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        raf_id.set(request_frame(&tick));

        Self { tick, raf_id }
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

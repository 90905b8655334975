//! Ambient force scheduler: autonomous blasts and gusts.
//!
//! Timers are deadlines on the injected clock, polled once per frame. Each
//! kind holds at most one pending deadline; arming a kind replaces whatever
//! was pending. Hiding the document cancels both outright, so hidden time
//! never counts toward the next fire.

use crate::config::HeroConfig;
use crate::particles::GustDirection;
use rand::rngs::StdRng;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    AutoBlast,
    Gust,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientEvent {
    Blast,
    Gust(GustDirection),
}

pub struct AmbientScheduler {
    auto_blast: Option<f64>,
    gust: Option<f64>,
    hidden: bool,
    auto_range: (f64, f64),
    gust_range: (f64, f64),
    rng: StdRng,
}

impl AmbientScheduler {
    pub fn new(cfg: &HeroConfig, rng: StdRng) -> Self {
        Self {
            auto_blast: None,
            gust: None,
            hidden: false,
            auto_range: (cfg.auto_blast_min_sec, cfg.auto_blast_max_sec),
            gust_range: (cfg.gust_min_sec, cfg.gust_max_sec),
            rng,
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn deadline(&self, kind: TimerKind) -> Option<f64> {
        *self.slot(kind)
    }

    pub fn pending_count(&self) -> usize {
        usize::from(self.auto_blast.is_some()) + usize::from(self.gust.is_some())
    }

    /// Schedule the next fire of `kind` after a random delay, replacing any
    /// pending one. Does nothing while hidden.
    pub fn arm(&mut self, kind: TimerKind, now: f64) -> Option<f64> {
        self.cancel(kind);
        if self.hidden {
            return None;
        }
        let (lo, hi) = match kind {
            TimerKind::AutoBlast => self.auto_range,
            TimerKind::Gust => self.gust_range,
        };
        let delay = if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        };
        let at = now + delay;
        *self.slot_mut(kind) = Some(at);
        log::debug!("[timer] {:?} armed in {:.2}s", kind, delay);
        Some(at)
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slot_mut(kind).take();
    }

    pub fn cancel_all(&mut self) {
        self.cancel(TimerKind::AutoBlast);
        self.cancel(TimerKind::Gust);
    }

    /// Record document visibility. Hiding cancels every pending timer; the
    /// caller re-arms on return.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.cancel_all();
            log::debug!("[timer] document hidden, timers cancelled");
        }
    }

    /// Fire every timer whose deadline has passed. A fired timer is no longer
    /// pending until re-armed.
    pub fn poll(&mut self, now: f64) -> SmallVec<[AmbientEvent; 2]> {
        let mut out = SmallVec::new();
        if self.hidden {
            return out;
        }
        if self.auto_blast.is_some_and(|at| now >= at) {
            self.auto_blast = None;
            out.push(AmbientEvent::Blast);
        }
        if self.gust.is_some_and(|at| now >= at) {
            self.gust = None;
            out.push(AmbientEvent::Gust(GustDirection::random(&mut self.rng)));
        }
        out
    }

    fn slot(&self, kind: TimerKind) -> &Option<f64> {
        match kind {
            TimerKind::AutoBlast => &self.auto_blast,
            TimerKind::Gust => &self.gust,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<f64> {
        match kind {
            TimerKind::AutoBlast => &mut self.auto_blast,
            TimerKind::Gust => &mut self.gust,
        }
    }
}

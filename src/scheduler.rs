use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};

use crate::engine::Engine;

pub(crate) const RESIZE_DEBOUNCE_MS: u32 = 250;
pub(crate) const POLL_INTERVAL_MS: u32 = 2_000;

pub(crate) struct RepositionScheduler {
    _resize: EventListener,
    _tick: Interval,
    _debounce: Rc<RefCell<Option<Timeout>>>,
}

impl RepositionScheduler {
    pub(crate) fn install(engine: &Rc<Engine>) -> Self {
        let debounce = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(engine);
        let pending = debounce.clone();
        let resize = EventListener::new(&engine.window, "resize", move |_| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            if engine.pin_count() == 0 {
                return;
            }
            let weak = Rc::downgrade(&engine);
            let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                if let Some(engine) = weak.upgrade() {
                    engine.restack_timed();
                }
            });
            *pending.borrow_mut() = Some(timeout);
        });

        let weak = Rc::downgrade(engine);
        let tick = Interval::new(POLL_INTERVAL_MS, move || {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            if engine.pin_count() == 0 {
                return;
            }
            engine.restack_timed();
        });

        Self {
            _resize: resize,
            _tick: tick,
            _debounce: debounce,
        }
    }
}

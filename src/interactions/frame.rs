//! Cancellable per-frame repeating tasks.
//!
//! Widgets hold a [`RepeatingTask`] instead of calling `requestAnimationFrame`
//! directly, so the drag sync loop and scroll animations can be driven by hand
//! in tests.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};

pub trait RepeatingTask {
    /// Schedules the task for the next frame, replacing any pending one.
    fn start(&mut self);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Returns `true` to be called again on the next frame.
type Tick = Rc<dyn Fn(f64) -> bool>;

#[derive(Default)]
struct FrameLoopInner {
    tick: RefCell<Option<Tick>>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// [`RepeatingTask`] backed by the browser's animation frames.
///
/// Clones share the same loop. The tick is bound after construction because it
/// usually needs a handle to the widget that owns the loop.
#[derive(Clone, Default)]
pub struct AnimationFrameLoop {
    inner: Rc<FrameLoopInner>,
}

impl AnimationFrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tick(&self, tick: impl Fn(f64) -> bool + 'static) {
        *self.inner.tick.borrow_mut() = Some(Rc::new(tick));
    }

    fn schedule(inner: &Rc<FrameLoopInner>) {
        let weak = Rc::downgrade(inner);
        let handle = request_animation_frame(move |timestamp| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.frame.borrow_mut().take();
            let tick = inner.tick.borrow().clone();
            let again = tick.map(|tick| tick(timestamp)).unwrap_or(false);
            if again {
                Self::schedule(&inner);
            }
        });
        *inner.frame.borrow_mut() = Some(handle);
    }
}

impl RepeatingTask for AnimationFrameLoop {
    fn start(&mut self) {
        self.cancel();
        Self::schedule(&self.inner);
    }

    fn cancel(&mut self) {
        // Dropping the handle cancels the pending frame.
        self.inner.frame.borrow_mut().take();
    }

    fn is_active(&self) -> bool {
        self.inner.frame.borrow().is_some()
    }
}

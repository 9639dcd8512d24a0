//! Eased window scrolling for in-page anchor links.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use web_sys::{Document, Event, Window};

use super::dom;
use super::frame::{AnimationFrameLoop, RepeatingTask};
use crate::config::SmoothScrollConfig;
use crate::error::Result;

const ANCHORS: &str = "a[href^=\"#\"]";

/// Exponential ease-out that lands exactly on 1.
pub fn ease_out_expo(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

/// Element id an anchor points at, or `None` for a bare `#`.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that puts an element's top edge `offset` pixels below the viewport top.
pub fn target_offset(element_top: f64, scroll_y: f64, offset: f64) -> f64 {
    (element_top + scroll_y + offset).max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    duration: f64,
    started_at: Option<f64>,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            started_at: None,
        }
    }

    /// Position for the frame at `now` (ms) and whether the tween is finished.
    /// The first frame stamps the start time.
    pub fn step(&mut self, now: f64) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now);
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let t = ((now - start) / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from + (self.to - self.from) * ease_out_expo(t), false)
    }
}

/// Drives one window scroll animation at a time.
pub struct SmoothScroller<F> {
    frames: F,
    duration: f64,
    tween: Option<ScrollTween>,
}

impl<F: RepeatingTask> SmoothScroller<F> {
    pub fn new(frames: F, duration: f64) -> Self {
        Self {
            frames,
            duration,
            tween: None,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts scrolling from `from` to `to`, replacing any animation in flight.
    pub fn scroll_to(&mut self, from: f64, to: f64) {
        self.tween = Some(ScrollTween::new(from, to, self.duration));
        self.frames.start();
    }

    /// Position to apply on this frame; `None` once idle.
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        let (position, done) = self.tween.as_mut()?.step(now);
        if done {
            self.tween = None;
        }
        Some(position)
    }

    pub fn stop(&mut self) {
        self.tween = None;
        self.frames.cancel();
    }
}

pub struct SmoothScrollHandle {
    scroller: Rc<RefCell<SmoothScroller<AnimationFrameLoop>>>,
    _listeners: Vec<EventListener>,
}

impl Drop for SmoothScrollHandle {
    fn drop(&mut self) {
        if let Ok(mut scroller) = self.scroller.try_borrow_mut() {
            scroller.stop();
        }
    }
}

fn scroll_window(window: &Window, y: f64) {
    window.scroll_to_with_x_and_y(window.scroll_x().unwrap_or(0.0), y);
}

pub fn mount(document: &Document, config: &SmoothScrollConfig) -> Result<SmoothScrollHandle> {
    let window = dom::window()?;
    let anchors = dom::query_all(document, ANCHORS)?;

    let frames = AnimationFrameLoop::new();
    let scroller = Rc::new(RefCell::new(SmoothScroller::new(
        frames.clone(),
        config.duration_ms,
    )));
    {
        let weak = Rc::downgrade(&scroller);
        let window = window.clone();
        frames.set_tick(move |now| {
            let Some(scroller) = weak.upgrade() else {
                return false;
            };
            let mut scroller = scroller.borrow_mut();
            if let Some(y) = scroller.frame(now) {
                scroll_window(&window, y);
            }
            scroller.is_scrolling()
        });
    }

    let offset = config.offset;
    let listeners = anchors
        .iter()
        .map(|anchor| {
            let scroller = scroller.clone();
            let window = window.clone();
            let document = document.clone();
            let anchor_el = anchor.clone();
            EventListener::new_with_options(
                anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    let Some(href) = anchor_el.get_attribute("href") else {
                        return;
                    };
                    let Some(id) = anchor_id(&href) else {
                        return;
                    };
                    let Some(target) = document.get_element_by_id(id) else {
                        debug!("Anchor target #{} not found", id);
                        return;
                    };
                    let scroll_y = window.scroll_y().unwrap_or(0.0);
                    let top = target.get_bounding_client_rect().top();
                    scroller
                        .borrow_mut()
                        .scroll_to(scroll_y, target_offset(top, scroll_y, offset));
                },
            )
        })
        .collect::<Vec<_>>();

    debug!("Smooth scrolling wired to {} anchors", listeners.len());

    Ok(SmoothScrollHandle {
        scroller,
        _listeners: listeners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::frame::testing::FakeFrames;

    #[test]
    fn test_easing_endpoints() {
        assert!((ease_out_expo(0.0) - 0.001).abs() < 1e-12);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert_eq!(ease_out_expo(2.0), 1.0);
        assert!(ease_out_expo(0.5) > 0.5);
    }

    #[test]
    fn test_easing_is_monotonic() {
        let mut last = ease_out_expo(0.0);
        for step in 1..=100 {
            let value = ease_out_expo(step as f64 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("#features"), Some("features"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("/pricing"), None);
    }

    #[test]
    fn test_target_offset_accounts_for_header() {
        assert_eq!(target_offset(400.0, 1000.0, -80.0), 1320.0);
        assert_eq!(target_offset(20.0, 0.0, -80.0), 0.0);
    }

    #[test]
    fn test_tween_runs_from_first_frame() {
        let mut tween = ScrollTween::new(0.0, 1000.0, 1200.0);
        let (first, done) = tween.step(5000.0);
        assert!(!done);
        assert!((first - 1.0).abs() < 1e-9);

        let (middle, done) = tween.step(5600.0);
        assert!(!done);
        assert!(middle > 900.0 && middle < 1000.0);

        assert_eq!(tween.step(6200.0), (1000.0, true));
    }

    #[test]
    fn test_tween_scrolls_upwards() {
        let mut tween = ScrollTween::new(800.0, 200.0, 100.0);
        tween.step(0.0);
        let (position, _) = tween.step(50.0);
        assert!(position < 800.0 && position > 200.0);
        assert_eq!(tween.step(100.0), (200.0, true));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut tween = ScrollTween::new(0.0, 300.0, 0.0);
        assert_eq!(tween.step(10.0), (300.0, true));
    }

    #[test]
    fn test_scroller_replaces_animation_in_flight() {
        let frames = FakeFrames::default();
        let mut scroller = SmoothScroller::new(frames.clone(), 1000.0);
        scroller.scroll_to(0.0, 500.0);
        scroller.frame(0.0);
        scroller.frame(300.0);

        scroller.scroll_to(400.0, 100.0);
        assert_eq!(frames.starts.get(), 2);
        scroller.frame(400.0);
        assert_eq!(scroller.frame(1400.0), Some(100.0));
        assert!(!scroller.is_scrolling());
        assert_eq!(scroller.frame(1500.0), None);
    }

    #[test]
    fn test_stop_cancels_frames() {
        let frames = FakeFrames::default();
        let mut scroller = SmoothScroller::new(frames.clone(), 1000.0);
        scroller.scroll_to(0.0, 500.0);
        assert!(frames.is_active());
        scroller.stop();
        assert!(!frames.is_active());
        assert!(!scroller.is_scrolling());
    }
}

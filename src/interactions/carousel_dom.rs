use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, MouseEvent,
    ScrollBehavior, ScrollToOptions, TouchEvent, Window,
};

use super::carousel::{CarouselController, CarouselView};
use super::dom;
use super::frame::AnimationFrameLoop;
use crate::config::CarouselConfig;
use crate::error::{MountError, Result};

const TRACK: &str = ".carousel-track";
const CARD: &str = ".fundamental-card";
const PREV: &str = ".carousel-prev";
const NEXT: &str = ".carousel-next";
const DOTS: &str = ".carousel-dots";
const DOT: &str = ".dot";

pub struct DomCarouselView {
    window: Window,
    document: Document,
    track: HtmlElement,
    cards: Rc<Vec<Element>>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
    dots: Option<Element>,
}

impl CarouselView for DomCarouselView {
    fn viewport_width(&self) -> f64 {
        dom::inner_width(&self.window)
    }

    fn container_width(&self) -> f64 {
        self.track.client_width() as f64
    }

    fn gap(&self) -> f64 {
        dom::computed_px(&self.window, &self.track, "column-gap")
    }

    fn card_extent(&self) -> f64 {
        let Some(card) = self.cards.first() else {
            return 0.0;
        };
        let width = card
            .dyn_ref::<HtmlElement>()
            .map(|card| card.offset_width() as f64)
            .unwrap_or_else(|| card.client_width() as f64);
        width + dom::computed_px(&self.window, card, "margin-right")
    }

    fn scroll_to(&self, offset: f64) {
        let options = ScrollToOptions::new();
        options.set_left(offset);
        options.set_behavior(ScrollBehavior::Smooth);
        self.track.scroll_to_with_scroll_to_options(&options);
    }

    fn set_scroll_left(&self, offset: f64) {
        self.track.set_scroll_left(offset.round() as i32);
    }

    fn set_shrink(&self, card: usize, shrink: bool) {
        if let Some(card) = self.cards.get(card) {
            dom::set_class(card, "shrink", shrink);
        }
    }

    fn set_buttons(&self, prev_disabled: bool, next_disabled: bool) {
        if let Some(prev) = &self.prev {
            prev.set_disabled(prev_disabled);
        }
        if let Some(next) = &self.next {
            next.set_disabled(next_disabled);
        }
    }

    fn render_dots(&self, count: usize, active: usize) {
        let Some(container) = &self.dots else {
            return;
        };
        container.set_inner_html("");
        for i in 0..count {
            let Ok(dot) = self.document.create_element("span") else {
                continue;
            };
            dot.set_class_name(if i == active { "dot active" } else { "dot" });
            let _ = dot.set_attribute("data-index", &i.to_string());
            let _ = container.append_child(&dot);
        }
    }
}

pub type DomCarousel = CarouselController<DomCarouselView, AnimationFrameLoop>;

/// Keeps the carousel's listeners attached for as long as it lives.
pub struct CarouselHandle {
    controller: Rc<RefCell<DomCarousel>>,
    _listeners: Vec<EventListener>,
}

impl CarouselHandle {
    pub fn current_index(&self) -> usize {
        self.controller.borrow().current_index()
    }
}

fn card_index(cards: &[Element], target: Option<EventTarget>) -> Option<usize> {
    let card = target?.dyn_into::<Element>().ok()?.closest(CARD).ok()??;
    cards.iter().position(|c| *c == card)
}

fn touch_x(event: &TouchEvent) -> Option<f64> {
    event.touches().item(0).map(|touch| touch.client_x() as f64)
}

pub fn mount(document: &Document, config: &CarouselConfig) -> Result<CarouselHandle> {
    let window = dom::window()?;
    let track = dom::query(document, TRACK)?;
    let cards = dom::query_all_in(&track, CARD)?;
    if cards.is_empty() {
        return Err(MountError::MissingElement(CARD));
    }
    let track: HtmlElement = track
        .dyn_into()
        .map_err(|_| MountError::MissingElement(TRACK))?;
    let button = |selector: &str| {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    };
    let prev = button(PREV);
    let next = button(NEXT);
    let dots = document.query_selector(DOTS)?;

    let cards = Rc::new(cards);
    let view = DomCarouselView {
        window: window.clone(),
        document: document.clone(),
        track: track.clone(),
        cards: cards.clone(),
        prev: prev.clone(),
        next: next.clone(),
        dots: dots.clone(),
    };
    let frames = AnimationFrameLoop::new();
    let controller = CarouselController::new(view, frames.clone(), cards.len(), config.clone())
        .ok_or(MountError::MissingElement(CARD))?;
    let controller = Rc::new(RefCell::new(controller));

    {
        let weak = Rc::downgrade(&controller);
        frames.set_tick(move |_| {
            let Some(controller) = weak.upgrade() else {
                return false;
            };
            let again = controller.borrow().sync_frame();
            again
        });
    }

    let mut listeners = Vec::new();

    if let Some(prev) = &prev {
        let controller = controller.clone();
        listeners.push(EventListener::new(prev, "click", move |_| {
            controller.borrow_mut().prev();
        }));
    }
    if let Some(next) = &next {
        let controller = controller.clone();
        listeners.push(EventListener::new(next, "click", move |_| {
            controller.borrow_mut().next();
        }));
    }

    // Dots are rebuilt on every navigation, so clicks are delegated to the container.
    if let Some(dots) = &dots {
        let controller = controller.clone();
        listeners.push(EventListener::new(dots, "click", move |event: &Event| {
            let index = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(DOT).ok().flatten())
                .and_then(|dot| dot.get_attribute("data-index"))
                .and_then(|index| index.parse::<usize>().ok());
            if let Some(index) = index {
                controller.borrow_mut().go_to(index);
            }
        }));
    }

    {
        let controller = controller.clone();
        let cards = cards.clone();
        listeners.push(EventListener::new_with_options(
            &track,
            "mousedown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                // Keeps the drag from selecting text.
                event.prevent_default();
                let card = card_index(&cards, event.target());
                controller
                    .borrow_mut()
                    .drag_start(mouse.client_x() as f64, event.time_stamp(), card);
            },
        ));
    }
    {
        let controller = controller.clone();
        let cards = cards.clone();
        listeners.push(EventListener::new_with_options(
            &track,
            "touchstart",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(x) = event.dyn_ref::<TouchEvent>().and_then(touch_x) else {
                    return;
                };
                let card = card_index(&cards, event.target());
                controller.borrow_mut().drag_start(x, event.time_stamp(), card);
            },
        ));
    }
    {
        let controller = controller.clone();
        listeners.push(EventListener::new(&window, "mousemove", move |event: &Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut controller = controller.borrow_mut();
            if controller.is_dragging() {
                controller.drag_move(mouse.client_x() as f64, event.time_stamp());
            }
        }));
    }
    {
        let controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let mut controller = controller.borrow_mut();
                if !controller.is_dragging() {
                    return;
                }
                let Some(x) = event.dyn_ref::<TouchEvent>().and_then(touch_x) else {
                    return;
                };
                // Horizontal drags shouldn't scroll the page.
                event.prevent_default();
                controller.drag_move(x, event.time_stamp());
            },
        ));
    }
    for release in ["mouseup", "touchend"] {
        let controller = controller.clone();
        listeners.push(EventListener::new(&window, release, move |_| {
            controller.borrow_mut().drag_end();
        }));
    }
    listeners.push(EventListener::new_with_options(
        &track,
        "contextmenu",
        EventListenerOptions::enable_prevent_default(),
        |event: &Event| {
            event.prevent_default();
            event.stop_propagation();
        },
    ));
    {
        let controller = controller.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            controller.borrow_mut().resize();
        }));
    }

    debug!(
        "Carousel mounted with {} cards, {} per view",
        cards.len(),
        controller.borrow().cards_per_view()
    );

    Ok(CarouselHandle {
        controller,
        _listeners: listeners,
    })
}

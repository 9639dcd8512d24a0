//! FAQ accordion: at most one answer open at a time.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::{Document, Element};

use super::dom;
use crate::error::{MountError, Result};

const ITEM: &str = ".faq-item";
const QUESTION: &str = ".faq-question";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    /// The first item starts open.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            open: (len > 0).then_some(0),
        }
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, item: usize) -> bool {
        self.open == Some(item)
    }

    /// Opens `item` and closes the rest, or closes it if it was already open.
    pub fn toggle(&mut self, item: usize) {
        if item >= self.len {
            return;
        }
        self.open = if self.is_open(item) { None } else { Some(item) };
    }
}

pub struct AccordionHandle {
    _listeners: Vec<EventListener>,
}

fn apply(items: &[Element], accordion: &Accordion) {
    for (i, item) in items.iter().enumerate() {
        dom::set_class(item, "active", accordion.is_open(i));
    }
}

pub fn mount(document: &Document) -> Result<AccordionHandle> {
    let items = dom::query_all(document, ITEM)?;
    if items.is_empty() {
        return Err(MountError::MissingElement(ITEM));
    }
    let items = Rc::new(items);
    let accordion = Rc::new(RefCell::new(Accordion::new(items.len())));
    apply(&items, &accordion.borrow());

    let mut listeners = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let Some(question) = item.query_selector(QUESTION).ok().flatten() else {
            debug!("FAQ item {} has no question button", i);
            continue;
        };
        let items = items.clone();
        let accordion = accordion.clone();
        listeners.push(EventListener::new(&question, "click", move |_| {
            let mut accordion = accordion.borrow_mut();
            accordion.toggle(i);
            apply(&items, &accordion);
        }));
    }

    debug!("FAQ accordion mounted with {} items", items.len());
    Ok(AccordionHandle {
        _listeners: listeners,
    })
}

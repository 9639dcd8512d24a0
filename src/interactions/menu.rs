//! Collapsible navigation menu behind the hamburger button.

use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::{Document, Element, HtmlElement};

use super::dom;
use crate::error::Result;

const HAMBURGER: &str = ".hamburger-menu";
const NAV: &str = ".main-nav";
const NAV_LINKS: &str = ".main-nav a";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

struct MenuElements {
    hamburger: Element,
    nav: Element,
    body: Option<HtmlElement>,
}

impl MenuElements {
    fn apply(&self, state: MenuState) {
        let open = state.is_open();
        dom::set_class(&self.hamburger, "active", open);
        dom::set_class(&self.nav, "active", open);
        if let Some(body) = &self.body {
            // Locks page scrolling behind the open menu.
            dom::set_class(body, "menu-open", open);
        }
    }
}

pub struct MenuHandle {
    _listeners: Vec<EventListener>,
}

pub fn mount(document: &Document) -> Result<MenuHandle> {
    let elements = Rc::new(MenuElements {
        hamburger: dom::query(document, HAMBURGER)?,
        nav: dom::query(document, NAV)?,
        body: document.body(),
    });
    let links = dom::query_all(document, NAV_LINKS)?;
    let state = Rc::new(Cell::new(MenuState::default()));

    let mut listeners = Vec::with_capacity(links.len() + 1);
    {
        let hamburger = elements.hamburger.clone();
        let elements = elements.clone();
        let state = state.clone();
        listeners.push(EventListener::new(&hamburger, "click", move |_| {
            let mut menu = state.get();
            menu.toggle();
            state.set(menu);
            elements.apply(menu);
        }));
    }
    for link in &links {
        let elements = elements.clone();
        let state = state.clone();
        listeners.push(EventListener::new(link, "click", move |_| {
            let mut menu = state.get();
            menu.close();
            state.set(menu);
            elements.apply(menu);
        }));
    }

    debug!("Menu mounted with {} links", links.len());
    Ok(MenuHandle {
        _listeners: listeners,
    })
}

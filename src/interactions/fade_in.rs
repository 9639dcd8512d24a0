//! Reveals `.fade-in` elements the first time they scroll into view.

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom;
use crate::config::FadeInConfig;
use crate::error::{MountError, Result};

const FADE_IN: &str = ".fade-in";
const VISIBLE: &str = "is-visible";

/// Disconnects the observer when dropped.
pub struct FadeInHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for FadeInHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn mount(document: &Document, config: &FadeInConfig) -> Result<FadeInHandle> {
    let elements = dom::query_all(document, FADE_IN)?;
    if elements.is_empty() {
        return Err(MountError::MissingElement(FADE_IN));
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    dom::set_class(&target, VISIBLE, true);
                    // Each element only animates in once.
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.root_margin);
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }

    debug!("Observing {} fade-in elements", elements.len());
    Ok(FadeInHandle {
        observer,
        _callback: callback,
    })
}

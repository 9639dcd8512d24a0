//! Mouse-driven tilt of the hero background.
//!
//! The background is a pseudo-element, so the rotation is handed to CSS through
//! the `--x-rotation` and `--y-rotation` custom properties.

use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent};

use super::dom;
use crate::config::ParallaxConfig;
use crate::error::{MountError, Result};

const HERO: &str = ".hero";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub x_rotation: f64,
    pub y_rotation: f64,
}

impl Tilt {
    pub const FLAT: Tilt = Tilt {
        x_rotation: 0.0,
        y_rotation: 0.0,
    };

    /// Pointer position relative to the hero's top-left corner; `None` for an empty rect.
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64, intensity: f64) -> Option<Tilt> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Tilt {
            x_rotation: (y / height - 0.5) * intensity,
            y_rotation: (x / width - 0.5) * -intensity,
        })
    }

    pub fn css_values(self) -> (String, String) {
        (
            format!("{}deg", self.x_rotation),
            format!("{}deg", self.y_rotation),
        )
    }
}

fn apply(hero: &HtmlElement, tilt: Tilt) {
    let (x, y) = tilt.css_values();
    let style = hero.style();
    let _ = style.set_property("--x-rotation", &x);
    let _ = style.set_property("--y-rotation", &y);
}

pub struct ParallaxHandle {
    _listeners: [EventListener; 2],
}

pub fn mount(document: &Document, config: &ParallaxConfig) -> Result<ParallaxHandle> {
    let hero: HtmlElement = dom::query(document, HERO)?
        .dyn_into()
        .map_err(|_| MountError::MissingElement(HERO))?;
    let intensity = config.intensity;

    let on_move = {
        let hero = hero.clone();
        EventListener::new(&hero.clone(), "mousemove", move |event: &Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = hero.get_bounding_client_rect();
            let tilt = Tilt::from_pointer(
                mouse.client_x() as f64 - rect.left(),
                mouse.client_y() as f64 - rect.top(),
                rect.width(),
                rect.height(),
                intensity,
            );
            if let Some(tilt) = tilt {
                apply(&hero, tilt);
            }
        })
    };
    let on_leave = {
        let hero = hero.clone();
        EventListener::new(&hero.clone(), "mouseleave", move |_| apply(&hero, Tilt::FLAT))
    };

    debug!("Hero parallax mounted");
    Ok(ParallaxHandle {
        _listeners: [on_move, on_leave],
    })
}

//! Page interactivity attached to already-rendered marketing markup.
//!
//! Every widget is optional: markup that isn't on the page simply leaves the
//! widget unmounted.

pub mod accordion;
pub mod carousel;
pub mod carousel_dom;
pub mod dom;
pub mod fade_in;
pub mod frame;
pub mod menu;
pub mod parallax;
pub mod smooth_scroll;
pub mod viewport;

use log::{debug, info, warn};

use crate::config::SiteConfig;
use crate::error::Result;

/// Owns every mounted widget; dropping it detaches them all.
#[derive(Default)]
pub struct Interactions {
    pub smooth_scroll: Option<smooth_scroll::SmoothScrollHandle>,
    pub fade_in: Option<fade_in::FadeInHandle>,
    pub menu: Option<menu::MenuHandle>,
    pub carousel: Option<carousel_dom::CarouselHandle>,
    pub accordion: Option<accordion::AccordionHandle>,
    pub parallax: Option<parallax::ParallaxHandle>,
}

fn settle<T>(widget: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(handle) => Some(handle),
        Err(e) if e.is_missing_markup() => {
            debug!("Skipping {}: {}", widget, e);
            None
        }
        Err(e) => {
            warn!("Failed to set up {}: {}", widget, e);
            None
        }
    }
}

impl Interactions {
    pub fn mount() -> Result<Self> {
        let document = dom::document()?;
        let config = SiteConfig::from_document(&document);

        let interactions = Self {
            smooth_scroll: settle(
                "smooth scroll",
                smooth_scroll::mount(&document, &config.smooth_scroll),
            ),
            fade_in: settle("fade-in", fade_in::mount(&document, &config.fade_in)),
            menu: settle("menu", menu::mount(&document)),
            carousel: settle("carousel", carousel_dom::mount(&document, &config.carousel)),
            accordion: settle("FAQ accordion", accordion::mount(&document)),
            parallax: settle("hero parallax", parallax::mount(&document, &config.parallax)),
        };

        if let Some(carousel) = &interactions.carousel {
            debug!("Carousel starting at card {}", carousel.current_index());
        }
        info!("Interactions ready ({} widgets)", interactions.mounted());
        Ok(interactions)
    }

    pub fn mounted(&self) -> usize {
        [
            self.smooth_scroll.is_some(),
            self.fade_in.is_some(),
            self.menu.is_some(),
            self.carousel.is_some(),
            self.accordion.is_some(),
            self.parallax.is_some(),
        ]
        .into_iter()
        .filter(|mounted| *mounted)
        .count()
    }
}

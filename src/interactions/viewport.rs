//! Responsive viewport classes shared by the carousel's paging and width math.

use crate::config::CarouselConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl Viewport {
    pub fn from_width(width: f64, config: &CarouselConfig) -> Self {
        if width < config.tablet_min_width {
            Viewport::Mobile
        } else if width < config.desktop_min_width {
            Viewport::Tablet
        } else {
            Viewport::Desktop
        }
    }

    pub fn cards_per_view(self) -> usize {
        match self {
            Viewport::Mobile => 1,
            Viewport::Tablet => 2,
            Viewport::Desktop => 3,
        }
    }

    /// Width of one card when `cards_per_view` cards and their gaps fill the container.
    pub fn card_width(self, container_width: f64, gap: f64) -> f64 {
        let per_view = self.cards_per_view() as f64;
        (container_width - gap * (per_view - 1.0)) / per_view
    }
}

use log::Level;
use serde::Deserialize;
use web_sys::Document;

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub fade_in: FadeInConfig,
    pub parallax: ParallaxConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    /// Widths below this are mobile (one card per view).
    pub tablet_min_width: f64,
    /// Widths at or above this are desktop (three cards per view).
    pub desktop_min_width: f64,
    /// Upper bound of the distance threshold; the card extent / 5 may lower it.
    pub snap_distance: f64,
    /// px/ms
    pub momentum_velocity: f64,
    /// Displacements below this pick the direction from velocity instead.
    pub direction_distance: f64,
    pub edge_resistance: f64,
    pub edge_resistance_min: f64,
    /// Displacement (px) over which the edge resistance drops by 1.0.
    pub edge_resistance_falloff: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            tablet_min_width: 768.0,
            desktop_min_width: 1024.0,
            snap_distance: 50.0,
            momentum_velocity: 0.5,
            direction_distance: 10.0,
            edge_resistance: 0.3,
            edge_resistance_min: 0.1,
            edge_resistance_falloff: 1000.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub duration_ms: f64,
    /// Added to the target's page offset; negative keeps it clear of the fixed header.
    pub offset: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            offset: -80.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FadeInConfig {
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            root_margin: "0px 0px -10% 0px".to_string(),
            threshold: 0.1,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Degrees of rotation between opposite edges of the hero.
    pub intensity: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { intensity: 10.0 }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides embedded in the page, falling back to defaults.
    pub fn from_document(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => {
                    log::debug!("Loaded site config overrides");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring invalid site config: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = SiteConfig::default();
        assert_eq!(config.carousel.tablet_min_width, 768.0);
        assert_eq!(config.carousel.desktop_min_width, 1024.0);
        assert_eq!(config.carousel.momentum_velocity, 0.5);
        assert_eq!(config.smooth_scroll.offset, -80.0);
        assert_eq!(config.fade_in.root_margin, "0px 0px -10% 0px");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "carousel": { "snap_distance": 30 }, "smooth_scroll": { "offset": -120 } }"#,
        )
        .unwrap();

        assert_eq!(config.carousel.snap_distance, 30.0);
        assert_eq!(config.carousel.edge_resistance, 0.3);
        assert_eq!(config.smooth_scroll.offset, -120.0);
        assert_eq!(config.smooth_scroll.duration_ms, 1200.0);
        assert_eq!(config.parallax, ParallaxConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(SiteConfig::from_json("{ carousel: ").is_err());
        assert!(SiteConfig::from_json(r#"{ "fade_in": { "threshold": "high" } }"#).is_err());
    }
}

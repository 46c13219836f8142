//! Tunables for the spider web animation.
//!
//! Defaults reproduce the shipped page. With the `serde` feature the struct can
//! be deserialized (missing fields fall back to defaults); `serde_json` adds
//! [`SpiderConfig::from_json`].

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SpiderConfig {
    /// Pointer influence radius for brightening and glow.
    pub cursor_radius: f64,
    pub background_count: usize,
    pub background_radius: f64,
    pub background_glow_blur: f64,
    pub connector_count: usize,
    pub connector_radius: f64,
    pub connector_glow_blur: f64,
    /// Minimum rendered brightness of both particle kinds.
    pub base_opacity: f64,
    pub max_connections: usize,
    pub max_connection_distance: f64,
    pub attraction_gain: f64,
    pub friction: f64,
    pub trail_alpha: f64,
    pub line_alpha: f64,
    pub line_width: f64,
    pub line_glow_alpha: f64,
    pub line_glow_width: f64,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            cursor_radius: 150.0,
            background_count: 800,
            background_radius: 2.0,
            background_glow_blur: 5.0,
            connector_count: 5,
            connector_radius: 4.5,
            connector_glow_blur: 10.0,
            base_opacity: 0.15,
            max_connections: 5,
            max_connection_distance: 120.0,
            attraction_gain: 0.005,
            friction: 0.95,
            trail_alpha: 0.3,
            line_alpha: 0.4,
            line_width: 1.5,
            line_glow_alpha: 0.1,
            line_glow_width: 3.0,
        }
    }
}

impl SpiderConfig {
    /// Largest attraction gain (exclusive) for which the damped pull still
    /// settles: `2 (1 + friction) / friction`.
    pub fn max_attraction_gain(&self) -> f64 {
        2.0 * (1.0 + self.friction) / self.friction
    }

    /// Reject values that would divide by zero, let connectors diverge, or
    /// hand the canvas a negative size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cursorRadius", self.cursor_radius),
            ("maxConnectionDistance", self.max_connection_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(ConfigError::Friction(self.friction));
        }
        let max = self.max_attraction_gain();
        let gain = self.attraction_gain;
        if !gain.is_finite() || gain < 0.0 || gain >= max {
            return Err(ConfigError::Gain { value: self.attraction_gain, max });
        }
        for (field, value) in [
            ("backgroundRadius", self.background_radius),
            ("backgroundGlowBlur", self.background_glow_blur),
            ("connectorRadius", self.connector_radius),
            ("connectorGlowBlur", self.connector_glow_blur),
            ("lineWidth", self.line_width),
            ("lineGlowWidth", self.line_glow_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("baseOpacity", self.base_opacity),
            ("trailAlpha", self.trail_alpha),
            ("lineAlpha", self.line_alpha),
            ("lineGlowAlpha", self.line_glow_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Alpha { field, value });
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: SpiderConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SpiderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_radius_and_unit_friction() {
        let cfg = SpiderConfig { cursor_radius: 0.0, ..SpiderConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { field: "cursorRadius", .. })));
        let cfg = SpiderConfig { friction: 1.0, ..SpiderConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::Friction(1.0)));
        let cfg = SpiderConfig { trail_alpha: 1.5, ..SpiderConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Alpha { .. })));
    }

    #[test]
    fn test_rejects_unstable_gain() {
        let cfg = SpiderConfig { attraction_gain: 1e308, ..SpiderConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Gain { value, .. }) if value == 1e308));
        for bad in [-0.001, f64::NAN, f64::INFINITY] {
            let cfg = SpiderConfig { attraction_gain: bad, ..SpiderConfig::default() };
            assert!(matches!(cfg.validate(), Err(ConfigError::Gain { .. })), "gain {bad} accepted");
        }
        // 2 * 1.95 / 0.95
        let cfg = SpiderConfig::default();
        assert!((cfg.max_attraction_gain() - 3.9 / 0.95).abs() < 1e-12);
        let at_bound = SpiderConfig { attraction_gain: cfg.max_attraction_gain(), ..cfg.clone() };
        assert!(at_bound.validate().is_err());
        let below = SpiderConfig { attraction_gain: 4.0, ..cfg };
        assert_eq!(below.validate(), Ok(()));
        let no_pull = SpiderConfig { attraction_gain: 0.0, ..SpiderConfig::default() };
        assert_eq!(no_pull.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_negative_or_non_finite_sizes() {
        let base = SpiderConfig::default();
        let cases: [(&str, SpiderConfig); 6] = [
            ("backgroundRadius", SpiderConfig { background_radius: -2.0, ..base.clone() }),
            ("backgroundGlowBlur", SpiderConfig { background_glow_blur: f64::NAN, ..base.clone() }),
            ("connectorRadius", SpiderConfig { connector_radius: -0.5, ..base.clone() }),
            ("connectorGlowBlur", SpiderConfig { connector_glow_blur: f64::INFINITY, ..base.clone() }),
            ("lineWidth", SpiderConfig { line_width: -1.5, ..base.clone() }),
            ("lineGlowWidth", SpiderConfig { line_glow_width: f64::NEG_INFINITY, ..base.clone() }),
        ];
        for (name, cfg) in cases {
            assert!(
                matches!(cfg.validate(), Err(ConfigError::Negative { field, .. }) if field == name),
                "{name} accepted"
            );
        }
        let zero_glow = SpiderConfig { background_glow_blur: 0.0, ..base };
        assert_eq!(zero_glow.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_infinite_radius() {
        let cfg = SpiderConfig { cursor_radius: f64::INFINITY, ..SpiderConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { .. })));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_from_json_fills_defaults() {
        let cfg = SpiderConfig::from_json(r#"{ "connectorCount": 9, "friction": 0.9 }"#).unwrap();
        assert_eq!(cfg.connector_count, 9);
        assert_eq!(cfg.friction, 0.9);
        assert_eq!(cfg.background_count, 800);
        assert!(SpiderConfig::from_json(r#"{ "friction": 2.0 }"#).is_err());
        assert!(SpiderConfig::from_json("not json").is_err());
        assert!(SpiderConfig::from_json(r#"{ "attractionGain": 1e308 }"#).is_err());
    }
}

use std::path::Path;

use anyhow::{Context, Result, bail};
use inventory_layout::{RadialLayout, Size};
use mapview::ViewportConfig;
use serde::{Deserialize, Serialize};

/// Everything the viewer can be told through `--config`. Missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub layout: RadialLayout,
    pub viewport: ViewportConfig,
    pub canvas: Size,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: RadialLayout::default(),
            viewport: ViewportConfig::default(),
            canvas: Size::new(800.0, 600.0),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            bail!("config must be a JSON object");
        }
        let config: Self = serde_json::from_value(value)?;
        config.layout.validate()?;
        config.viewport.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ViewerConfig::from_json(
            r#"{ "viewport": { "max_scale": 5.0 }, "canvas": { "width": 1200, "height": 900 } }"#,
        )
        .unwrap();
        assert_eq!(config.viewport.max_scale, 5.0);
        assert_eq!(config.viewport.zoom_step, 1.2);
        assert_eq!(config.canvas, Size::new(1200.0, 900.0));
        assert_eq!(config.layout, RadialLayout::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ViewerConfig::from_json(r#"{ "viewport": { "zoom_step": 0.5 } }"#).is_err());
        assert!(ViewerConfig::from_json(r#"{ "layout": { "site_radius": -1 } }"#).is_err());
        assert!(ViewerConfig::from_json("[]").is_err());
    }

    #[test]
    fn test_positional_config_is_rejected() {
        for content in ["[]", "[{}, {}, {}]", "42", "\"layout\""] {
            let err = ViewerConfig::from_json(content).unwrap_err();
            assert!(err.to_string().contains("JSON object"), "{content}: {err}");
        }
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = ViewerConfig::load(Path::new("/nonexistent/viewer.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}

use crate::errors::SidebarError;
use garde::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Construction options of a [`SidebarController`](crate::SidebarController).
///
/// Field names serialize in camelCase (`mainContainerId`, `defaultWidth`, ...)
/// and every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarOptions {
    #[garde(length(min = 1))]
    pub main_container_id: String,
    #[garde(length(min = 1))]
    pub content_container_id: String,
    #[garde(length(min = 1))]
    pub side_container_id: String,
    #[garde(length(min = 1))]
    pub toggle_container_id: String,
    #[garde(range(min = 1.0), custom(within(self.min_width, self.max_width)))]
    pub default_width: f32,
    #[garde(range(min = 1.0))]
    pub min_width: f32,
    #[garde(range(min = 1.0), custom(at_least(self.min_width)))]
    pub max_width: f32,
    #[garde(length(min = 1))]
    pub storage_key: String,
    /// Run `init()` from the constructor.
    #[garde(skip)]
    pub auto_create: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            main_container_id: SidebarOptions::DEFAULT_MAIN_CONTAINER.to_owned(),
            content_container_id: SidebarOptions::DEFAULT_CONTENT_CONTAINER.to_owned(),
            side_container_id: SidebarOptions::DEFAULT_SIDE_CONTAINER.to_owned(),
            toggle_container_id: SidebarOptions::DEFAULT_TOGGLE_CONTAINER.to_owned(),
            default_width: SidebarOptions::DEFAULT_WIDTH,
            min_width: SidebarOptions::MIN_WIDTH,
            max_width: SidebarOptions::MAX_WIDTH,
            storage_key: SidebarOptions::STORAGE_KEY.to_owned(),
            auto_create: true,
        }
    }
}

impl SidebarOptions {
    pub const DEFAULT_MAIN_CONTAINER: &'static str = "mainContainer";
    pub const DEFAULT_CONTENT_CONTAINER: &'static str = "contentContainer";
    pub const DEFAULT_SIDE_CONTAINER: &'static str = "sideContainer";
    pub const DEFAULT_TOGGLE_CONTAINER: &'static str = "toggleContainer";
    pub const DEFAULT_WIDTH: f32 = 300.0;
    pub const MIN_WIDTH: f32 = 200.0;
    pub const MAX_WIDTH: f32 = 600.0;
    pub const STORAGE_KEY: &'static str = "sidebarToggleYn";
}

impl SidebarOptions {
    pub fn from_json(json: &str) -> Result<Self, SidebarError> {
        let options: SidebarOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from `path`, or returns the defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SidebarError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("{} not found, using default sidebar options", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn clamp_width(&self, width: f32) -> f32 {
        width.max(self.min_width).min(self.max_width)
    }
}

fn within(min: f32, max: f32) -> impl FnOnce(&f32, &()) -> garde::Result {
    move |value, _| {
        if *value < min || *value > max {
            return Err(garde::Error::new(format!(
                "{value} is outside of the width bounds {min}..={max}"
            )));
        }
        Ok(())
    }
}

fn at_least(min: f32) -> impl FnOnce(&f32, &()) -> garde::Result {
    move |value, _| {
        if *value < min {
            return Err(garde::Error::new(format!(
                "{value} is smaller than the minimum width {min}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = SidebarOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.default_width, 300.0);
        assert_eq!(options.min_width, 200.0);
        assert_eq!(options.max_width, 600.0);
        assert_eq!(options.storage_key, "sidebarToggleYn");
        assert!(options.auto_create);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = SidebarOptions::from_json(
            r#"{ "sideContainerId": "aside", "maxWidth": 800, "autoCreate": false }"#,
        )
        .unwrap();
        assert_eq!(options.side_container_id, "aside");
        assert_eq!(options.max_width, 800.0);
        assert!(!options.auto_create);
        assert_eq!(options.main_container_id, "mainContainer");
        assert_eq!(options.default_width, 300.0);
    }

    #[test]
    fn test_default_width_outside_bounds_is_rejected() {
        let err = SidebarOptions::from_json(r#"{ "defaultWidth": 700 }"#).unwrap_err();
        assert!(matches!(err, SidebarError::Validation(_)));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let options = SidebarOptions {
            min_width: 500.0,
            max_width: 400.0,
            default_width: 450.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_empty_container_id_is_rejected() {
        let err = SidebarOptions::from_json(r#"{ "toggleContainerId": "" }"#).unwrap_err();
        assert!(matches!(err, SidebarError::Validation(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = SidebarOptions::from_json("{ defaultWidth: ").unwrap_err();
        assert!(matches!(err, SidebarError::Json(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let options = SidebarOptions::load("definitely/not/here/swsidebar.json").unwrap();
        assert_eq!(options, SidebarOptions::default());
    }

    #[test]
    fn test_clamp_width() {
        let options = SidebarOptions::default();
        assert_eq!(options.clamp_width(100.0), 200.0);
        assert_eq!(options.clamp_width(350.0), 350.0);
        assert_eq!(options.clamp_width(900.0), 600.0);
    }
}

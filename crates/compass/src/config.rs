use crate::gui::scene::{COMPASS_CONTAINER, COMPASS_TARGET, EXPLANATION_PANEL};
use azimuth::{Side, Tour, TourError, TourStep};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_azimuth")]
    pub initial_azimuth: f64,
    #[serde(default = "default_show_tour")]
    pub show_tour: bool,
    /// Replaces the built-in tour when non-empty.
    #[serde(default)]
    pub steps: Vec<TourStep>,
}

fn default_azimuth() -> f64 {
    45.0
}

fn default_show_tour() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_azimuth: default_azimuth(),
            show_tour: default_show_tour(),
            steps: Vec::new(),
        }
    }
}

impl Config {
    pub fn tour(&self) -> Result<Tour, TourError> {
        if self.steps.is_empty() {
            Tour::new(default_steps())
        } else {
            Tour::new(self.steps.clone())
        }
    }
}

pub fn default_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "Welcome!",
            "This guide shows you how to use the interactive compass. Press Next to begin.",
        ),
        TourStep::new(
            "The compass",
            "This is the compass. North (N), marked in red, is the reference at 0°. \
             Every angle is measured from here.",
        )
        .anchored(COMPASS_CONTAINER, Side::Right),
        TourStep::new(
            "The target",
            "This red dot is your target. Click and drag it around the center of the compass.",
        )
        .anchored(COMPASS_TARGET, Side::Right),
        TourStep::new(
            "Reading the azimuth",
            "This panel shows the current azimuth in degrees and the matching cardinal \
             direction. Watch it update as you move the target.",
        )
        .anchored(EXPLANATION_PANEL, Side::Left),
        TourStep::new(
            "All set!",
            "You are ready to explore. Drag the target and get a feel for azimuth. Happy navigating!",
        ),
    ]
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "azimuth", "compass").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads `path` (or the default location) layered under `COMPASS_*`
/// environment variables. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("COMPASS"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use azimuth::AnchorId;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.initial_azimuth, 45.0);
        assert!(config.show_tour);
        assert!(config.steps.is_empty());
        assert_eq!(config.tour().unwrap().len(), default_steps().len());
    }

    #[test]
    fn test_custom_steps_replace_builtin_tour() {
        let config = parse_config(
            r#"
            initial_azimuth = 270
            show_tour = false

            [[steps]]
            title = "Only step"
            body = "Look here"
            anchor = "compass-target"
            side = "Bottom"
            "#,
        )
        .unwrap();

        assert_eq!(config.initial_azimuth, 270.0);
        assert!(!config.show_tour);

        let tour = config.tour().unwrap();
        assert_eq!(tour.len(), 1);
        let step = tour.get(0).unwrap();
        assert_eq!(step.anchor, Some(AnchorId::from(COMPASS_TARGET)));
        assert_eq!(step.side, Side::Bottom);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.initial_azimuth, 45.0);
        assert!(config.show_tour);
    }

    #[test]
    fn test_invalid_side_is_rejected() {
        let result = parse_config(
            r#"
            [[steps]]
            title = "Bad"
            body = "Side"
            side = "diagonal"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = load_config(Some(Path::new("/nonexistent/compass/config.toml"))).unwrap();
        assert!(config.show_tour);
    }

    #[test]
    fn test_default_tour_anchors() {
        let anchors: Vec<_> = default_steps()
            .into_iter()
            .filter_map(|s| s.anchor)
            .map(String::from)
            .collect();
        assert_eq!(
            anchors,
            vec![COMPASS_CONTAINER, COMPASS_TARGET, EXPLANATION_PANEL]
        );
    }
}

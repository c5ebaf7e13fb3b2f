//! Shell configuration

use serde::{Deserialize, Serialize};
use url::Url;

use vitrine_surface::SurfaceConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default home URL; also seeds the tab synthesized when the last
    /// tab closes
    pub home_url: String,
    /// Tabs opened at start; empty means exactly one home tab
    pub initial_tabs: Vec<String>,
    /// Suppress the close affordance on the first tab
    pub pin_first_tab: bool,
    /// Password required to exit the shell; `None` disables the gate
    pub exit_password: Option<String>,
    /// Settings applied to every browsing surface
    pub surface: SurfaceConfig,
}

impl Config {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            home_url: home_url.into(),
            ..Self::default()
        }
    }

    /// Every configured URL must parse.
    pub fn validate(&self) -> Result<()> {
        Self::check_url("home_url", &self.home_url)?;
        for url in &self.initial_tabs {
            Self::check_url("initial_tabs", url)?;
        }
        Ok(())
    }

    fn check_url(field: &str, url: &str) -> Result<()> {
        Url::parse(url)
            .map(|_| ())
            .map_err(|error| CoreError::Config(format!("{field}: invalid URL {url:?}: {error}")))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_url: "about:blank".to_string(),
            initial_tabs: Vec::new(),
            pin_first_tab: true,
            exit_password: None,
            surface: SurfaceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn invalid_home_url_rejected() {
        let config = Config::new("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_initial_tab_rejected() {
        let mut config = Config::new("https://home.test/");
        config.initial_tabs = vec!["://broken".to_string()];
        assert!(config.validate().is_err());
    }
}

//! Config module.
//! Holds the menu API base address, the retrieval wait bound and the viewport
//! constants the filter behavior uses.
//! The base address comes from `--api-base`, then `MENU_API_BASE`, then the
//! optional JSON config file; only the winning value is parsed.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const API_BASE_ENV: &str = "MENU_API_BASE";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
pub const MOBILE_BREAKPOINT: u32 = 768;
pub const MOBILE_SCROLL_OFFSET: f64 = 20.0;
pub const DESKTOP_SCROLL_OFFSET: f64 = 100.0;

/// Menu API base address. Always a hierarchical URL, so menu paths can be
/// appended to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(value).map_err(|source| ConfigError::InvalidBase {
            value: value.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::OpaqueBase(value.to_string()));
        }
        Ok(Self(url))
    }

    /// `{base}/api/user/{hash}/menu.json`, with the hash as one encoded segment.
    pub fn menu_url(&self, hash: &str) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "user", hash, "menu.json"]);
        }
        url
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mobile/desktop split used for the sidebar and scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLayout {
    /// Widths at or below this are treated as mobile.
    pub mobile_breakpoint: u32,
    pub mobile_offset: f64,
    pub desktop_offset: f64,
}

impl Default for ScrollLayout {
    fn default() -> Self {
        Self {
            mobile_breakpoint: MOBILE_BREAKPOINT,
            mobile_offset: MOBILE_SCROLL_OFFSET,
            desktop_offset: DESKTOP_SCROLL_OFFSET,
        }
    }
}

impl ScrollLayout {
    pub fn is_mobile(&self, width: u32) -> bool {
        width <= self.mobile_breakpoint
    }

    /// Space left above a scroll target for the fixed header.
    pub fn scroll_offset(&self, width: u32) -> f64 {
        if self.is_mobile(width) {
            self.mobile_offset
        } else {
            self.desktop_offset
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where personalized menus are served from. `None` means retrieval is
    /// skipped and the user sees the configuration message.
    pub api_base: Option<ApiBase>,
    pub timeout: Duration,
    pub layout: ScrollLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout: DEFAULT_TIMEOUT,
            layout: ScrollLayout::default(),
        }
    }
}

/// On-disk shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_base: Option<String>,
    timeout_ms: Option<u64>,
    mobile_breakpoint: Option<u32>,
    mobile_offset: Option<f64>,
    desktop_offset: Option<f64>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config {
    /// Builds the config from an optional file, an environment lookup and the
    /// `--api-base` flag. For the base address the flag beats the
    /// environment, which beats the file; blank values count as absent.
    pub fn resolve<F>(
        file: Option<&Path>,
        lookup: F,
        api_base_flag: Option<&str>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match file {
            Some(path) => ConfigFile::read(path)?,
            None => ConfigFile::default(),
        };

        let flag = api_base_flag.map(str::to_string);
        let winner = [flag, lookup(API_BASE_ENV), file.api_base]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        let api_base = winner.as_deref().map(ApiBase::parse).transpose()?;

        let defaults = ScrollLayout::default();
        Ok(Config {
            api_base,
            timeout: file
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT),
            layout: ScrollLayout {
                mobile_breakpoint: file.mobile_breakpoint.unwrap_or(defaults.mobile_breakpoint),
                mobile_offset: file.mobile_offset.unwrap_or(defaults.mobile_offset),
                desktop_offset: file.desktop_offset.unwrap_or(defaults.desktop_offset),
            },
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

//! # Link Configuration
//!
//! How big a frame may be and how fast frames may follow each other depend
//! on the link, not on the printer. This module holds the built-in link
//! profiles and the optional JSON settings layered over them.
//!
//! ## Built-in Profiles
//!
//! | Key | Chunk | Frame delay | Notes |
//! |-----|-------|-------------|-------|
//! | `bluetooth` | 512 B | 20 ms | SPP/RFCOMM, small receive buffer |
//! | `serial` | 256 B | 10 ms | RS-232 at 9600–115200 baud |
//! | `usb` | 4096 B | 0 ms | USB printer class / CDC |
//!
//! ## Settings File
//!
//! ```json
//! {
//!   "profile": "bluetooth",
//!   "device": "/dev/rfcomm1",
//!   "chunk_len": 256
//! }
//! ```
//!
//! Every field is optional. Resolution order, later wins:
//! profile preset → settings file → command-line flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::LineaError;

/// Default device path when nothing else names one
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// # Link Profile
///
/// Write-size and pacing limits for one kind of link.
///
/// - **chunk_len**: largest write the link is known to deliver intact;
///   used as the sub-packaging size
/// - **frame_delay_ms**: pause after each frame so the device can drain
/// - **poll_interval_ms**: consumer sleep while the queue is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkProfile {
    /// Short name used on the command line and in settings files
    pub key: &'static str,

    /// Human-readable name
    pub name: &'static str,

    pub chunk_len: usize,

    pub frame_delay_ms: u64,

    pub poll_interval_ms: u64,
}

impl LinkProfile {
    /// Bluetooth Serial Port Profile over RFCOMM.
    pub const BLUETOOTH_SPP: Self = Self {
        key: "bluetooth",
        name: "Bluetooth SPP",
        chunk_len: 512,
        frame_delay_ms: 20,
        poll_interval_ms: 50,
    };

    /// Plain serial line.
    pub const SERIAL: Self = Self {
        key: "serial",
        name: "Serial",
        chunk_len: 256,
        frame_delay_ms: 10,
        poll_interval_ms: 50,
    };

    /// USB printer class or CDC-ACM.
    pub const USB: Self = Self {
        key: "usb",
        name: "USB",
        chunk_len: 4096,
        frame_delay_ms: 0,
        poll_interval_ms: 10,
    };

    const ALL: &'static [LinkProfile] = &[Self::BLUETOOTH_SPP, Self::SERIAL, Self::USB];

    /// All built-in profiles.
    pub fn all() -> &'static [LinkProfile] {
        Self::ALL
    }

    /// Find a built-in profile by key (case-insensitive).
    ///
    /// ## Example
    ///
    /// ```
    /// use linea::link::LinkProfile;
    ///
    /// assert_eq!(LinkProfile::by_name("USB"), Some(LinkProfile::USB));
    /// assert_eq!(LinkProfile::by_name("carrier-pigeon"), None);
    /// ```
    pub fn by_name(key: &str) -> Option<LinkProfile> {
        Self::all()
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .copied()
    }

    #[inline]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for LinkProfile {
    fn default() -> Self {
        Self::BLUETOOTH_SPP
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Optional overrides, as read from a settings file or built from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkSettings {
    /// Key of the base [`LinkProfile`]
    pub profile: Option<String>,

    pub device: Option<String>,

    pub chunk_len: Option<usize>,

    /// `false` sends every command buffer as one frame
    pub sub_package: Option<bool>,

    pub frame_delay_ms: Option<u64>,

    pub poll_interval_ms: Option<u64>,
}

impl LinkSettings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LineaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LineaError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LineaError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: LinkSettings) -> LinkSettings {
        LinkSettings {
            profile: overrides.profile.or(self.profile),
            device: overrides.device.or(self.device),
            chunk_len: overrides.chunk_len.or(self.chunk_len),
            sub_package: overrides.sub_package.or(self.sub_package),
            frame_delay_ms: overrides.frame_delay_ms.or(self.frame_delay_ms),
            poll_interval_ms: overrides.poll_interval_ms.or(self.poll_interval_ms),
        }
    }

    /// Fill unset fields from the named profile and validate.
    ///
    /// ## Errors
    ///
    /// [`LineaError::Config`] for an unknown profile key or a chunk length
    /// of zero while sub-packaging.
    pub fn resolve(&self) -> Result<ResolvedLink, LineaError> {
        let profile = match &self.profile {
            Some(key) => LinkProfile::by_name(key).ok_or_else(|| {
                LineaError::Config(format!(
                    "Unknown link profile '{}'. Available: {}",
                    key,
                    LinkProfile::all()
                        .iter()
                        .map(|p| p.key)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?,
            None => LinkProfile::default(),
        };

        let resolved = ResolvedLink {
            profile,
            device: self
                .device
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
            chunk_len: self.chunk_len.unwrap_or(profile.chunk_len),
            sub_package: self.sub_package.unwrap_or(true),
            frame_delay: Duration::from_millis(
                self.frame_delay_ms.unwrap_or(profile.frame_delay_ms),
            ),
            poll_interval: Duration::from_millis(
                self.poll_interval_ms.unwrap_or(profile.poll_interval_ms),
            ),
        };

        if resolved.sub_package && resolved.chunk_len == 0 {
            return Err(LineaError::Config(
                "chunk_len must be greater than zero".to_string(),
            ));
        }

        Ok(resolved)
    }
}

/// Fully resolved link settings, ready to drive a queue and a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub profile: LinkProfile,
    pub device: String,
    pub chunk_len: usize,
    pub sub_package: bool,
    pub frame_delay: Duration,
    pub poll_interval: Duration,
}

// ============================================================================
// TESTS
// ============================================================================

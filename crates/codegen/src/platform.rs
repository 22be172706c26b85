//! Target platform configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Microcontroller family the code is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPlatform {
    Arduino,
    Esp32,
    Stm32,
    RaspberryPiPico,
    #[default]
    Generic,
}

impl TargetPlatform {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Arduino => "arduino",
            TargetPlatform::Esp32 => "esp32",
            TargetPlatform::Stm32 => "stm32",
            TargetPlatform::RaspberryPiPico => "rp2040",
            TargetPlatform::Generic => "generic",
        }
    }

    /// Macro defined in the config header for `#if` checks
    pub fn macro_name(&self) -> &'static str {
        match self {
            TargetPlatform::Arduino => "EDGE_PLATFORM_ARDUINO",
            TargetPlatform::Esp32 => "EDGE_PLATFORM_ESP32",
            TargetPlatform::Stm32 => "EDGE_PLATFORM_STM32",
            TargetPlatform::RaspberryPiPico => "EDGE_PLATFORM_RP2040",
            TargetPlatform::Generic => "EDGE_PLATFORM_GENERIC",
        }
    }

    /// Typical SRAM of the reference board, `None` when unknown
    pub fn ram_bytes(&self) -> Option<usize> {
        match self {
            TargetPlatform::Arduino => Some(2 * 1024),
            TargetPlatform::Esp32 => Some(320 * 1024),
            TargetPlatform::Stm32 => Some(128 * 1024),
            TargetPlatform::RaspberryPiPico => Some(264 * 1024),
            TargetPlatform::Generic => None,
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform and window parameters for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Target family
    pub platform: TargetPlatform,
    /// Samples per window (sizes the input buffer)
    pub window_size: usize,
    /// Sampling rate (Hz)
    pub sampling_rate_hz: f64,
    /// Channel order of the interleaved input window
    pub channel_names: Vec<String>,
}

impl PlatformConfig {
    /// Create a config for the generic target
    pub fn new(window_size: usize, sampling_rate_hz: f64, channel_names: Vec<String>) -> Self {
        Self {
            platform: TargetPlatform::Generic,
            window_size,
            sampling_rate_hz,
            channel_names,
        }
    }

    /// Set the target platform
    pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Column index of a channel in the interleaved window
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.channel_names.iter().position(|c| c == name)
    }
}

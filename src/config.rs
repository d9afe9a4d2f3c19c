use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What happens when a drag starts while another one is still active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrentStart {
    /// Refuse the new drag; the running one continues
    #[default]
    Reject,
    /// Cancel the running drag and start the new one
    Preempt,
}

/// Drag engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub proxy_opacity: f64,
    pub proxy_z_index: i32,
    pub concurrent_start: ConcurrentStart,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            proxy_opacity: 0.85,
            proxy_z_index: 9999,
            concurrent_start: ConcurrentStart::Reject,
        }
    }
}

/// Dimensions used by [`crate::layout::FlowLayout`], in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub board_padding: f64,
    pub column_gap: f64,
    pub column_width: f64,
    pub header_height: f64,
    pub zone_padding: f64,
    pub zone_min_height: f64,
    pub card_gap: f64,
    pub card_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            board_padding: 16.0,
            column_gap: 16.0,
            column_width: 250.0,
            header_height: 44.0,
            zone_padding: 8.0,
            zone_min_height: 80.0,
            card_gap: 8.0,
            card_height: 40.0,
        }
    }
}

/// Document-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub drag: DragConfig,
    pub layout: LayoutConfig,
}

impl DocumentConfig {
    /// Parses a configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

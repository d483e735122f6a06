//! Page wiring: selectors, timing, the relocation table, camera constraints.
//!
//! The defaults describe the profile page as shipped. A page can override any
//! field by embedding a JSON island:
//!
//! ```html
//! <script type="application/json" id="page-config">
//!   { "resize_throttle_ms": 250, "relocations": [] }
//! </script>
//! ```
//!
//! Missing fields keep their defaults. An island that fails to parse or
//! validate is reported and ignored as a whole.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::consts::{
    COUNTER_ATTRIBUTE, COUNTER_SELECTOR, INPUT_ROW_SELECTOR, MODAL_STEP_MS, RESIZE_THROTTLE_MS, TICK_MS,
};
use crate::error::PageError;
use crate::relocate::Insertion;
use crate::viewport::MediaQuery;

/// One responsive relocation, as written in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationSpec {
    /// Id of the element that moves.
    pub element_id: String,
    /// Id of the container it moves relative to.
    pub target_id: String,
    /// Breakpoint, e.g. `max-width: 991px`.
    pub media_query: String,
    #[serde(default)]
    pub insertion: Insertion,
}

impl RelocationSpec {
    pub fn new(element_id: &str, target_id: &str, media_query: &str, insertion: Insertion) -> Self {
        Self {
            element_id: element_id.to_owned(),
            target_id: target_id.to_owned(),
            media_query: media_query.to_owned(),
            insertion,
        }
    }
}

/// The relocation table of the profile page.
#[must_use]
pub fn default_relocations() -> Vec<RelocationSpec> {
    vec![
        RelocationSpec::new("user-title", "profile-video", "max-width: 991px", Insertion::Prepend),
        RelocationSpec::new("user-description", "user-position", "max-width: 767px", Insertion::After),
        RelocationSpec::new("timer", "profile-video", "max-width: 991px", Insertion::Prepend),
        RelocationSpec::new("profile-view-primary", "profile-view-grid", "max-width: 991px", Insertion::Prepend),
        RelocationSpec::new("take-video-balloon", "profile-video", "max-width: 991px", Insertion::Prepend),
        RelocationSpec::new("user-info", "profile-video", "max-width: 991px", Insertion::Prepend),
    ]
}

/// Everything the page needs to wire its widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub counter_selector: String,
    pub counter_attribute: String,
    pub input_row_selector: String,
    pub tick_ms: u32,
    pub resize_throttle_ms: u32,
    pub modal_step_ms: u32,
    pub relocations: Vec<RelocationSpec>,
    pub camera: CameraConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            counter_selector: COUNTER_SELECTOR.to_owned(),
            counter_attribute: COUNTER_ATTRIBUTE.to_owned(),
            input_row_selector: INPUT_ROW_SELECTOR.to_owned(),
            tick_ms: TICK_MS,
            resize_throttle_ms: RESIZE_THROTTLE_MS,
            modal_step_ms: MODAL_STEP_MS,
            relocations: default_relocations(),
            camera: CameraConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config island.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] when the JSON is malformed or a value is
    /// out of range.
    pub fn from_json(text: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(text).map_err(|e| PageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config from an optional island.
    ///
    /// Falls back to the defaults, with a warning, when the island is invalid.
    #[must_use]
    pub fn load(island: Option<&str>) -> Self {
        let Some(text) = island.map(str::trim).filter(|text| !text.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring page config: {e}");
                Self::default()
            }
        }
    }

    /// Check ranges and references.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.tick_ms == 0 {
            return Err(PageError::Config("tick_ms must be positive".to_owned()));
        }
        if self.resize_throttle_ms == 0 {
            return Err(PageError::Config("resize_throttle_ms must be positive".to_owned()));
        }
        if self.modal_step_ms == 0 {
            return Err(PageError::Config("modal_step_ms must be positive".to_owned()));
        }
        if self.counter_attribute.trim().is_empty() {
            return Err(PageError::Config("counter_attribute must not be empty".to_owned()));
        }
        for spec in &self.relocations {
            if spec.element_id.is_empty() || spec.target_id.is_empty() {
                return Err(PageError::Config(format!(
                    "relocation {:?} -> {:?} needs both ids",
                    spec.element_id, spec.target_id
                )));
            }
            if spec.element_id == spec.target_id {
                return Err(PageError::Config(format!("relocation {:?} targets itself", spec.element_id)));
            }
            MediaQuery::parse(&spec.media_query)
                .map_err(|e| PageError::Config(format!("relocation {:?}: {e}", spec.element_id)))?;
        }
        self.camera.validate()
    }
}

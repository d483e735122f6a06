//! Camera preview: capture constraints and input-device selection.
//!
//! The browser side (see `web::camera`) enumerates devices, converts them to
//! [`DeviceInfo`], and asks for a stream using [`stream_constraints`]. The
//! preview is portrait: the default constraints prefer 400×800.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::consts::PREVIEW_ELEMENT_ID;
use crate::error::PageError;

/// A `{min, ideal, max}` constrainable range, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRange {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

impl ConstraintRange {
    #[must_use]
    pub const fn new(min: u32, ideal: u32, max: u32) -> Self {
        Self { min, ideal, max }
    }

    #[must_use]
    pub fn is_ordered(self) -> bool {
        self.min <= self.ideal && self.ideal <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Set to `false` to skip the preview entirely.
    pub enabled: bool,
    /// Id of the `<video>` element showing the stream.
    pub preview_id: String,
    pub width: ConstraintRange,
    pub height: ConstraintRange,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preview_id: PREVIEW_ELEMENT_ID.to_owned(),
            width: ConstraintRange::new(390, 400, 720),
            height: ConstraintRange::new(680, 800, 1280),
        }
    }
}

impl CameraConfig {
    /// # Errors
    ///
    /// Returns [`PageError::Config`] when a range is not `min <= ideal <= max`
    /// or the preview id is empty.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.preview_id.is_empty() {
            return Err(PageError::Config("camera.preview_id must not be empty".to_owned()));
        }
        for (name, range) in [("width", self.width), ("height", self.height)] {
            if !range.is_ordered() {
                return Err(PageError::Config(format!(
                    "camera.{name} must satisfy min <= ideal <= max, got {}/{}/{}",
                    range.min, range.ideal, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Kind of a media device as reported by `enumerateDevices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
    AudioOutput,
}

impl DeviceKind {
    /// Map the browser's `kind` string.
    #[must_use]
    pub fn from_web(kind: &str) -> Option<Self> {
        match kind {
            "videoinput" => Some(Self::VideoInput),
            "audioinput" => Some(Self::AudioInput),
            "audiooutput" => Some(Self::AudioOutput),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_id: String,
    pub kind: DeviceKind,
    pub label: String,
}

/// The first video input in enumeration order.
///
/// # Errors
///
/// Returns [`PageError::Camera`] when no video input is present.
pub fn select_video_input(devices: &[DeviceInfo]) -> Result<&DeviceInfo, PageError> {
    devices
        .iter()
        .find(|device| device.kind == DeviceKind::VideoInput)
        .ok_or_else(|| PageError::Camera("no video input device".to_owned()))
}

/// `getUserMedia` constraints for the preview, pinned to `device` when given.
#[must_use]
pub fn stream_constraints(config: &CameraConfig, device: Option<&DeviceInfo>) -> serde_json::Value {
    let mut video = json!({
        "width": config.width,
        "height": config.height,
    });
    if let Some(device) = device {
        video["deviceId"] = json!({ "exact": device.device_id });
    }
    json!({ "video": video })
}

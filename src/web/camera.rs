//! Live camera preview through `navigator.mediaDevices`.

use js_sys::{Array, JSON, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlVideoElement, MediaDeviceInfo, MediaStream, MediaStreamConstraints, Window};

use crate::camera::{CameraConfig, DeviceInfo, DeviceKind, select_video_input, stream_constraints};
use crate::error::PageError;

use super::js_error;

/// Start the preview in the background. Failures are logged, never retried.
pub fn spawn_preview(window: Window, document: Document, config: CameraConfig) {
    spawn_local(async move {
        if let Err(e) = preview(&window, &document, &config).await {
            log::warn!("camera preview unavailable: {e}");
        }
    });
}

fn camera_error(e: &JsValue) -> PageError {
    PageError::Camera(js_error(e))
}

async fn preview(window: &Window, document: &Document, config: &CameraConfig) -> Result<(), PageError> {
    let video = document
        .get_element_by_id(&config.preview_id)
        .ok_or_else(|| PageError::MissingElement(config.preview_id.clone()))?
        .dyn_into::<HtmlVideoElement>()
        .map_err(|_| PageError::Camera(format!("#{} is not a <video>", config.preview_id)))?;

    let media = window.navigator().media_devices().map_err(|e| camera_error(&e))?;
    let listed = JsFuture::from(media.enumerate_devices().map_err(|e| camera_error(&e))?)
        .await
        .map_err(|e| camera_error(&e))?;
    let devices: Vec<DeviceInfo> = Array::from(&listed)
        .iter()
        .filter_map(|value| value.dyn_ref::<MediaDeviceInfo>().and_then(device_info))
        .collect();
    let device = select_video_input(&devices)?;
    log::debug!("camera: {}", device.label);

    let constraints = JSON::parse(&stream_constraints(config, Some(device)).to_string())
        .map_err(|e| camera_error(&e))?
        .unchecked_into::<MediaStreamConstraints>();
    let stream = JsFuture::from(
        media
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| camera_error(&e))?,
    )
    .await
    .map_err(|e| camera_error(&e))?
    .dyn_into::<MediaStream>()
    .map_err(|e| camera_error(&e))?;

    video.set_src_object(Some(&stream));
    JsFuture::from(video.play().map_err(|e| camera_error(&e))?)
        .await
        .map_err(|e| camera_error(&e))?;
    Ok(())
}

fn device_info(info: &MediaDeviceInfo) -> Option<DeviceInfo> {
    let kind = match Reflect::get(info, &JsValue::from_str("kind")) {
        Ok(kind) => kind.as_string()?,
        Err(_) => return None,
    };
    Some(DeviceInfo {
        device_id: info.device_id(),
        kind: DeviceKind::from_web(&kind)?,
        label: info.label(),
    })
}

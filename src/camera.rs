use crate::constants::*;
use crate::dom::js_err;
use anyhow::Context;
use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn ideal(value: u32) -> Result<Object, JsValue> {
    let o = Object::new();
    Reflect::set(&o, &"ideal".into(), &JsValue::from(value))?;
    Ok(o)
}

fn video_constraints() -> Result<Object, JsValue> {
    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &CAMERA_FACING_MODE.into())?;
    Reflect::set(&video, &"width".into(), &ideal(CAMERA_IDEAL_WIDTH)?)?;
    Reflect::set(&video, &"height".into(), &ideal(CAMERA_IDEAL_HEIGHT)?)?;
    Ok(video)
}

/// Ask for the user-facing camera (video only) and start playing it into
/// `video`.
pub async fn attach_user_camera(video: &web::HtmlVideoElement) -> anyhow::Result<web::MediaStream> {
    let window = web::window().context("no window")?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(js_err)
        .context("camera access is not available in this browser")?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(&video_constraints().map_err(js_err)?);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(js_err)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(js_err)
        .context("camera permission denied or no camera found")?
        .dyn_into()
        .map_err(js_err)?;

    video.set_muted(true);
    _ = video.set_attribute("playsinline", "");
    video.set_src_object(Some(&stream));
    let play = video.play().map_err(js_err)?;
    JsFuture::from(play)
        .await
        .map_err(js_err)
        .context("camera stream would not play")?;

    log::info!(
        "[camera] streaming {}x{}",
        video.video_width(),
        video.video_height()
    );
    Ok(stream)
}

/// The element has a decoded frame that can be drawn and analysed.
#[inline]
pub fn has_frame(video: &web::HtmlVideoElement) -> bool {
    video.ready_state() >= VIDEO_HAVE_CURRENT_DATA && video.video_width() > 0
}

/// Frame timestamp for the cache, in milliseconds.
#[inline]
pub fn frame_time_ms(video: &web::HtmlVideoElement) -> f64 {
    video.current_time() * VIDEO_TIME_TO_MS
}

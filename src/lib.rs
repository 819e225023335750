#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use glam::Vec2;
use handseal_core::{
    AnchorSmoother, Config, DebugOverlay, DwellMachine, EffectEngine, FrameCache, FrameResult,
    InstantClock,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod dom;
mod estimator;
mod events;
mod frame;
mod keys;
mod overlay;
mod status;
mod surface;

use constants::{CANVAS_ID, VIDEO_ID};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("handseal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            if let Some(doc) = dom::window_document() {
                overlay::set_fatal(&doc, &format!("Could not start: {:#}", e));
            } else {
                log::error!("init error: {:?}", e);
            }
        }
    });
    Ok(())
}

/// Called by the page once its hand-landmark model has loaded.
#[wasm_bindgen]
pub fn set_hand_landmarker(landmarker: JsValue) -> Result<(), JsValue> {
    estimator::install(landmarker).map_err(|e| {
        report_estimator_error(&format!("{:#}", e));
        JsValue::from_str(&e.to_string())
    })
}

/// Called by the page when the model could not be loaded.
#[wasm_bindgen]
pub fn report_estimator_error(message: &str) {
    log::error!("[estimator] {}", message);
    if let Some(doc) = dom::window_document() {
        overlay::set_fatal(&doc, &format!("Hand tracking unavailable: {}", message));
    }
}

fn read_config(window: &web::Window) -> anyhow::Result<Config> {
    let query = window.location().search().map_err(dom::js_err)?;
    let config = Config::from_query(&query).context("invalid URL options")?;
    log::info!(
        "[config] policy={:?} hold={}ms threshold={} hands={} mirror={} debug={}",
        config.trigger_policy,
        config.hold_duration_ms,
        config.proximity_threshold,
        config.required_hand_count,
        config.mirror,
        config.show_debug_overlay
    );
    Ok(config)
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = read_config(&window)?;

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;
    let ctx = canvas
        .get_context("2d")
        .map_err(dom::js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d canvas context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(dom::js_err)?;
    dom::sync_canvas_backing_size(&canvas);

    overlay::set_status(&document, "Waiting for camera permission…");
    camera::attach_user_camera(&video)
        .await
        .context("camera unavailable")?;
    overlay::set_status(&document, status::WAITING_FOR_MODEL);

    let viewport = Vec2::new(canvas.width() as f32, canvas.height() as f32);
    let seed = config.seed.unwrap_or_else(rand::random);
    let engine = EffectEngine::new(InstantClock::new(), config.effect(), viewport, seed);
    let mut surface = surface::CanvasSurface::new(ctx);
    surface.resize(viewport.x, viewport.y);

    let controls = Rc::new(events::Controls::new(config.show_debug_overlay, config.mirror));
    events::wire_global_keydown(controls.clone(), canvas.clone());

    let pose = config.pose();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document,
        canvas,
        video,
        surface,
        controls,
        engine,
        dwell: DwellMachine::new(config.policy()),
        cache: FrameCache::new(),
        debug: DebugOverlay::new(&pose, config.mirror),
        pose,
        smoother: AnchorSmoother::new(config.smoothing_factor),
        mirror_applied: config.mirror,
        last: FrameResult::default(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

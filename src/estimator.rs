//! Bridge to the page's JS hand-landmark estimator.
//!
//! The page loads the model and hands the ready object to
//! [`crate::set_hand_landmarker`]. Until then, and whenever a call fails, the
//! driver simply sees no hands.

use crate::constants::ESTIMATOR_ERROR_LOG_EVERY;
use handseal_core::{Hand, HandSide, Handedness, Hands};
use js_sys::{Array, Function, Reflect};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    /// Anything with a MediaPipe-style `detectForVideo(video, timestampMs)`.
    #[derive(Clone, Debug)]
    pub type HandLandmarker;

    #[wasm_bindgen(method, catch, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;
}

thread_local! {
    static LANDMARKER: RefCell<Option<HandLandmarker>> = const { RefCell::new(None) };
    static FAILURES: Cell<u32> = const { Cell::new(0) };
}

pub fn install(obj: JsValue) -> anyhow::Result<()> {
    let detect = Reflect::get(&obj, &"detectForVideo".into())
        .map_err(crate::dom::js_err)?;
    if !detect.is_instance_of::<Function>() {
        anyhow::bail!("hand landmarker has no detectForVideo method");
    }
    LANDMARKER.with(|l| *l.borrow_mut() = Some(obj.unchecked_into()));
    log::info!("[estimator] hand landmarker installed");
    Ok(())
}

#[inline]
pub fn is_ready() -> bool {
    LANDMARKER.with(|l| l.borrow().is_some())
}

/// Run the estimator on the current video frame. Errors and malformed output
/// degrade to fewer (or no) hands.
pub fn detect(video: &web::HtmlVideoElement, timestamp_ms: f64) -> Hands {
    let Some(landmarker) = LANDMARKER.with(|l| l.borrow().clone()) else {
        return Hands::new();
    };
    match landmarker.detect_for_video(video, timestamp_ms) {
        Ok(result) => parse_result(&result),
        Err(e) => {
            let n = FAILURES.with(|f| {
                f.set(f.get().wrapping_add(1));
                f.get()
            });
            if n % ESTIMATOR_ERROR_LOG_EVERY == 1 {
                log::warn!("[estimator] detectForVideo failed ({} so far): {:?}", n, e);
            }
            Hands::new()
        }
    }
}

fn array_field(obj: &JsValue, key: &str) -> Option<Array> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.dyn_into::<Array>().ok())
}

fn number_field(obj: &JsValue, key: &str) -> f32 {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(f32::NAN, |v| v as f32)
}

fn parse_handedness(categories: &JsValue) -> Option<Handedness> {
    let top = categories.dyn_ref::<Array>()?.get(0);
    let label = Reflect::get(&top, &"categoryName".into()).ok()?.as_string()?;
    Some(Handedness {
        side: HandSide::parse(&label)?,
        score: number_field(&top, "score"),
    })
}

/// `{ landmarks: [[{x,y,z}; 21]], handedness: [[{categoryName, score}]] }`
pub fn parse_result(result: &JsValue) -> Hands {
    let mut hands = Hands::new();
    let Some(all) = array_field(result, "landmarks") else {
        return hands;
    };
    let labels = array_field(result, "handedness").or_else(|| array_field(result, "handednesses"));
    for (i, points) in all.iter().enumerate() {
        let Ok(points) = points.dyn_into::<Array>() else {
            continue;
        };
        let raw: Vec<[f32; 3]> = points
            .iter()
            .map(|p| {
                [
                    number_field(&p, "x"),
                    number_field(&p, "y"),
                    number_field(&p, "z"),
                ]
            })
            .collect();
        let handedness = labels
            .as_ref()
            .and_then(|l| parse_handedness(&l.get(i as u32)));
        match Hand::from_points(&raw, handedness) {
            Ok(hand) => hands.push(hand),
            Err(e) => log::debug!("[estimator] skipping hand {}: {}", i, e),
        }
    }
    hands
}

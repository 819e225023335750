use crate::camera;
use crate::dom;
use crate::estimator;
use crate::events::Controls;
use crate::overlay;
use crate::status::{is_notable, status_text, WAITING_FOR_MODEL};
use crate::surface::CanvasSurface;
use glam::Vec2;
use handseal_core::{
    classify, AnchorSmoother, Clock, DebugOverlay, DwellEvent, DwellMachine, EffectEngine,
    FrameCache, FrameResult, PoseConfig, Surface,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub video: web::HtmlVideoElement,
    pub surface: CanvasSurface,
    pub controls: Rc<Controls>,

    pub engine: EffectEngine,
    pub dwell: DwellMachine,
    pub cache: FrameCache,
    pub pose: PoseConfig,
    pub smoother: AnchorSmoother,
    pub debug: DebugOverlay,

    pub mirror_applied: bool,
    pub last: FrameResult,
}

impl FrameContext {
    pub fn frame(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        let size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        if size != Vec2::new(self.surface.width(), self.surface.height()) {
            self.surface.resize(size.x, size.y);
            self.engine.resize(size.x, size.y);
        }

        let mirror = self.controls.mirror.get();
        if mirror != self.mirror_applied {
            self.engine.set_mirror(mirror);
            self.debug.mirror = mirror;
            self.mirror_applied = mirror;
        }

        self.surface.clear();
        if camera::has_frame(&self.video) {
            self.surface.draw_video(&self.video, mirror);
            self.detect();
        }

        if self.controls.force_trigger.replace(false) {
            if !self.engine.trigger(Vec2::splat(0.5)) {
                log::info!("[keys] forced trigger ignored, effect still playing");
            }
        }

        self.engine.update();
        if self.controls.debug.get() {
            let now = self.engine.clock().now_ms();
            self.debug.render(
                &mut self.surface,
                &self.last.hands,
                &self.last.detection,
                self.smoother.value(),
                self.dwell.progress(now),
            );
        }
        self.engine.render(&mut self.surface);
    }

    /// Classify the current video frame (once per new frame) and feed the
    /// dwell machine.
    fn detect(&mut self) {
        let frame_ms = camera::frame_time_ms(&self.video);
        let video = &self.video;
        let pose = &self.pose;
        let result = self.cache.process(frame_ms, || {
            let ts = web::window()
                .and_then(|w| w.performance())
                .map_or(frame_ms, |p| p.now());
            let hands = estimator::detect(video, ts);
            let detection = classify(&hands, pose);
            (hands, detection)
        });
        if !result.is_new_frame {
            return;
        }

        let now = self.engine.clock().now_ms();
        let event = self.dwell.on_frame(&result.detection, now, &mut self.engine);
        if is_notable(&event) {
            log::info!("[dwell] {:?}", event);
        }
        if let DwellEvent::Fired { anchor } = event {
            log::info!(
                "[dwell] fired at ({:.3}, {:.3}) confidence {:.2}",
                anchor.x,
                anchor.y,
                result.detection.confidence
            );
        }
        self.smoother.update(result.detection.anchor);

        let text = if estimator::is_ready() {
            status_text(
                &result.detection,
                self.dwell.progress(now),
                self.engine.is_active(),
            )
        } else {
            WAITING_FOR_MODEL.to_string()
        };
        overlay::set_status(&self.document, &text);
        self.last = result;
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

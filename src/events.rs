use crate::dom;
use crate::keys::{action_for_key, prevents_default, KeyAction};
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Toggles flipped by the keyboard and read by the frame loop.
#[derive(Debug, Default)]
pub struct Controls {
    pub debug: Cell<bool>,
    pub mirror: Cell<bool>,
    pub force_trigger: Cell<bool>,
}

impl Controls {
    pub fn new(debug: bool, mirror: bool) -> Self {
        Self {
            debug: Cell::new(debug),
            mirror: Cell::new(mirror),
            force_trigger: Cell::new(false),
        }
    }
}

pub fn handle_keydown(ev: &web::KeyboardEvent, controls: &Controls, canvas: &web::HtmlCanvasElement) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleDebug => {
            controls.debug.set(!controls.debug.get());
            log::info!("[keys] debug overlay={}", controls.debug.get());
        }
        KeyAction::ToggleMirror => {
            controls.mirror.set(!controls.mirror.get());
            log::info!("[keys] mirror={}", controls.mirror.get());
        }
        KeyAction::ForceTrigger => controls.force_trigger.set(true),
        KeyAction::ToggleFullscreen => dom::toggle_fullscreen(canvas),
        KeyAction::ExitFullscreen => dom::exit_fullscreen(),
    }
    if prevents_default(action) {
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(controls: Rc<Controls>, canvas: web::HtmlCanvasElement) {
    dom::add_keydown_listener(move |ev| handle_keydown(&ev, &controls, &canvas));
}

//! Browser host wiring: keyboard listeners, the deferred-effect clock, and animation-frame
//! batching of hover updates.

use std::time::Duration;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{
    presentation::HoverTarget,
    runtime_context::DesktopRuntimeContext,
    shortcuts::{KeyChord, KeyPhase},
};

const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Current wall-clock time in milliseconds.
pub(crate) fn now_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Today's date as the browser's `Date.toDateString` renders it.
pub(crate) fn today_label() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::Date::new_0().to_date_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

fn focus_in_text_input(ev: &web_sys::KeyboardEvent) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        ev.target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .map(|element| element.matches("input, textarea").unwrap_or(false))
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = ev;
        false
    }
}

pub(crate) fn key_chord(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        code: ev.code(),
        ctrl: ev.ctrl_key(),
        shift: ev.shift_key(),
        in_text_input: focus_in_text_input(ev),
    }
}

/// Installs global keyboard listeners and the scheduler clock for `runtime`.
pub(crate) fn install(runtime: DesktopRuntimeContext) {
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }
        if runtime.handle_key(&key_chord(&ev), KeyPhase::Down) {
            ev.prevent_default();
        }
    });
    on_cleanup(move || keydown.remove());

    let keyup = window_event_listener(ev::keyup, move |ev| {
        runtime.handle_key(&key_chord(&ev), KeyPhase::Up);
    });
    on_cleanup(move || keyup.remove());

    match set_interval_with_handle(move || runtime.tick(now_ms()), TICK_INTERVAL) {
        Ok(interval) => on_cleanup(move || interval.clear()),
        Err(err) => logging::warn!("desktop clock unavailable: {err:?}"),
    }
}

/// Coalesces hover changes so each target is applied at most once per frame.
pub(crate) fn schedule_hover(runtime: DesktopRuntimeContext, target: HoverTarget, hovered: bool) {
    let needs_frame = runtime
        .hover
        .try_update_value(|batch| batch.schedule(target, hovered))
        .unwrap_or(false);
    if !needs_frame {
        return;
    }
    request_animation_frame(move || {
        let frame = runtime
            .hover
            .try_update_value(|batch| batch.take_frame())
            .unwrap_or_default();
        if frame.is_empty() {
            return;
        }
        runtime.with_controller(|controller| {
            let view = controller.presentation_mut();
            for (target, hovered) in frame {
                view.apply_hover(target, hovered);
            }
        });
    });
}

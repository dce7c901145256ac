pub mod audio;
pub mod runner;

pub use audio::WebAudioBackend;
pub use runner::WheelRunner;

use std::cell::RefCell;
use std::rc::Rc;

use prize_reel::{EngineConfig, Prize, PrizeTable, PrizeWheel, SeededSource};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WheelRunner>> = RefCell::new(None);
    static ON_EVENT: RefCell<Option<js_sys::Function>> = RefCell::new(None);
}

/// Run `f` against the mounted runner. Logs and returns None before
/// `wheel_init` or after `wheel_unmount`.
fn with_runner<R>(f: impl FnOnce(&mut WheelRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("wheel not initialized; call wheel_init() first");
                None
            }
        }
    })
}

fn parse_prizes(json: &str) -> Result<PrizeTable, JsValue> {
    let prizes: Vec<Prize> = serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    PrizeTable::new(prizes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Deliver queued events to the page callback, outside the runner borrow so
/// the callback may call back into the wheel.
fn dispatch(events: Vec<String>) {
    if events.is_empty() {
        return;
    }
    let Some(callback) = ON_EVENT.with(|cell| cell.borrow().clone()) else { return };
    for event in events {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&event)) {
            log::warn!("event callback threw: {:?}", err);
        }
    }
}

#[wasm_bindgen]
pub fn wheel_init(prizes_json: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let prizes = parse_prizes(prizes_json)?;
    let config = match config_json {
        Some(json) => EngineConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => EngineConfig::default(),
    };

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64
        | ((js_sys::Math::random() * u32::MAX as f64) as u64) << 32;
    let wheel = PrizeWheel::new(config, prizes)
        .with_audio(Rc::new(WebAudioBackend))
        .with_random(Box::new(SeededSource::new(seed)));

    // A re-init replaces the previous wheel; tear it down first.
    let previous = RUNNER.with(|cell| cell.borrow_mut().replace(WheelRunner::new(wheel)));
    if let Some(mut previous) = previous {
        previous.unmount();
    }
    log::info!("prize wheel: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn wheel_tick(now_ms: f64) {
    let events = with_runner(|r| {
        r.tick(now_ms);
        r.drain_events()
    });
    dispatch(events.unwrap_or_default());
}

#[wasm_bindgen]
pub fn wheel_spin() {
    with_runner(|r| r.spin());
}

#[wasm_bindgen]
pub fn wheel_reset() {
    with_runner(|r| r.reset());
}

#[wasm_bindgen]
pub fn wheel_set_ticket_count(count: u32) {
    with_runner(|r| r.wheel_mut().set_ticket_count(count as usize));
}

#[wasm_bindgen]
pub fn wheel_set_viewport_width(width: f32) {
    with_runner(|r| r.wheel_mut().set_viewport_width(width));
}

#[wasm_bindgen]
pub fn wheel_set_prizes(prizes_json: &str) -> Result<(), JsValue> {
    let prizes = parse_prizes(prizes_json)?;
    with_runner(|r| r.wheel_mut().set_prizes(prizes));
    Ok(())
}

#[wasm_bindgen]
pub fn wheel_load_manifest(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.wheel_mut().load_manifest(json))
        .unwrap_or(Ok(()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Register the page callback. It receives each event as a JSON string.
#[wasm_bindgen]
pub fn wheel_on_event(callback: Option<js_sys::Function>) {
    ON_EVENT.with(|cell| *cell.borrow_mut() = callback);
}

/// Stop ticking, close audio, release the surface. Final events are
/// delivered before the runner is dropped.
#[wasm_bindgen]
pub fn wheel_unmount() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = runner {
        runner.unmount();
        dispatch(runner.drain_events());
    }
    ON_EVENT.with(|cell| *cell.borrow_mut() = None);
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_surface_width() -> f32 {
    with_runner(|r| r.surface_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_surface_height() -> f32 {
    with_runner(|r| r.surface_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_has_results() -> bool {
    with_runner(|r| r.wheel().has_results()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_is_spinning() -> bool {
    with_runner(|r| r.wheel().is_spinning()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_is_ready() -> bool {
    with_runner(|r| r.wheel().is_ready()).unwrap_or(false)
}

/// Grouped bulk results, rarest first, as JSON.
#[wasm_bindgen]
pub fn get_bulk_summary_json() -> String {
    with_runner(|r| r.bulk_summary_json()).unwrap_or_else(|| "[]".to_string())
}

//! wasm-bindgen bridge for browser hosts
//!
//! Inbound messages and outbound events cross the boundary as JSON text in
//! the shapes defined by `crate::protocol`.

use wasm_bindgen::prelude::*;

use crate::config::{ControllerOptions, SimulationConfig};
use crate::protocol::HostMessage;
use crate::session::SessionController;

/// Install panic hook and console logger once per page
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JS handle owning one minigame instance
#[wasm_bindgen]
pub struct ReelBridge {
    controller: SessionController,
}

#[wasm_bindgen]
impl ReelBridge {
    /// `config_json` may be empty to use the default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, local_motion: bool) -> Result<ReelBridge, JsValue> {
        let config = if config_json.trim().is_empty() {
            SimulationConfig::default()
        } else {
            SimulationConfig::from_json(config_json).map_err(js_error)?
        };
        log::info!("Reel bridge ready (local_motion={})", local_motion);
        Ok(Self {
            controller: SessionController::new(config, ControllerOptions { local_motion }),
        })
    }

    /// Apply one inbound message (`sessionStart`, `sessionStop`, ...)
    pub fn handle(&mut self, message_json: &str) -> Result<(), JsValue> {
        let message = HostMessage::from_json(message_json).map_err(js_error)?;
        self.controller.handle_message(message).map_err(js_error)
    }

    /// Feed frame time in seconds; returns ticks run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.controller.advance(frame_dt)
    }

    /// Queued snapshots and outcomes as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.controller.drain_events()).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.controller.is_active()
    }
}

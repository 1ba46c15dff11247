//! Browser bindings
//!
//! Exposes the engine to the JavaScript presentation layer. State is kept in
//! LocalStorage and landings play the Web Audio chime. The page animates each
//! ball's path and calls `resolve_ball` with its id when the animation ends.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::{BallId, BoardLayout, BoardSize, GameEngine, StakeInput};

fn to_js_error(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Plinko starting...");
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct PlinkoGame {
    engine: GameEngine<LocalStorageStore>,
    stake_input: StakeInput,
    settings: Settings,
    audio: Rc<RefCell<AudioManager>>,
}

#[wasm_bindgen]
impl PlinkoGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PlinkoGame {
        let seed = js_sys::Date::now() as u64;
        let store = LocalStorageStore::new();
        let settings = Settings::load(&store);

        let audio = Rc::new(RefCell::new(AudioManager::from_settings(&settings)));
        let mut engine = GameEngine::new(store, seed);
        engine.set_landing_hook(audio.clone());
        log::info!("Game initialized with seed: {}", seed);

        let stake_input = StakeInput::new(engine.stake());
        PlinkoGame {
            engine,
            stake_input,
            settings,
            audio,
        }
    }

    pub fn balance(&self) -> f64 {
        self.engine.balance()
    }

    pub fn stake(&self) -> u32 {
        self.engine.stake()
    }

    pub fn rows(&self) -> u32 {
        self.engine.rows()
    }

    pub fn columns(&self) -> u32 {
        self.engine.columns()
    }

    pub fn multipliers(&self) -> Vec<f64> {
        self.engine.multipliers().to_vec()
    }

    /// Current text of the stake field
    #[wasm_bindgen(js_name = stakeText)]
    pub fn stake_text(&self) -> String {
        self.stake_input.text().to_string()
    }

    #[wasm_bindgen(js_name = setBalance)]
    pub fn set_balance(&mut self, amount: f64) {
        self.engine.set_balance(amount);
    }

    #[wasm_bindgen(js_name = topUp)]
    pub fn top_up(&mut self) {
        self.engine.top_up();
    }

    /// Returns false (and changes nothing) for unsupported row counts
    #[wasm_bindgen(js_name = setRows)]
    pub fn set_rows(&mut self, rows: u32) -> bool {
        match BoardSize::from_rows(rows) {
            Some(size) => {
                self.engine.set_rows(size);
                true
            }
            None => {
                log::warn!("Unsupported row count {}", rows);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = stakeChanged)]
    pub fn stake_changed(&mut self, text: &str) {
        self.stake_input.on_change(text, &mut self.engine);
    }

    /// Normalize the stake field; returns the corrected text
    #[wasm_bindgen(js_name = stakeBlurred)]
    pub fn stake_blurred(&mut self) -> String {
        self.stake_input.on_blur(&mut self.engine);
        self.stake_input.text().to_string()
    }

    /// Returns the new ball's id, or `undefined` when funds are short
    #[wasm_bindgen(js_name = dropBall)]
    pub fn drop_ball(&mut self) -> Option<BallId> {
        self.engine.try_drop_ball().ok()
    }

    /// Settle a ball whose animation finished; returns the winnings
    #[wasm_bindgen(js_name = resolveBall)]
    pub fn resolve_ball(&mut self, id: BallId) -> Option<f64> {
        self.engine.resolve_ball(id).map(|landing| landing.winnings)
    }

    /// Unlock audio; call from the first user gesture
    #[wasm_bindgen(js_name = resumeAudio)]
    pub fn resume_audio(&self) {
        self.audio.borrow().resume();
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings.save(self.engine.store_mut());
        self.audio.borrow_mut().apply_settings(&self.settings);
    }

    /// Balance, stake, board and balls in flight as JSON
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(to_js_error)
    }

    /// Peg and bucket positions for the current board as JSON
    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsValue> {
        let layout: BoardLayout = self.engine.layout();
        serde_json::to_string(&layout).map_err(to_js_error)
    }
}

impl Default for PlinkoGame {
    fn default() -> Self {
        Self::new()
    }
}

//! Plinko - A peg board betting game engine
//!
//! Core modules:
//! - `sim`: Board geometry, ball paths, wallet state and the game engine
//! - `persistence`: Key/value store capability with parse-with-default loading
//! - `settings`: Audio preferences persisted alongside the wallet
//! - `audio`: Landing sound effect (Web Audio on wasm, silent on native)
//! - `web`: JavaScript facade for the browser presentation layer

pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::AudioManager;
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use sim::{BallPath, BoardLayout, BoardSize, DropError, GameEngine, Landing};

/// Game configuration constants
pub mod consts {
    /// Storage key for the wallet balance
    pub const WALLET_KEY: &str = "wallet";
    /// Storage key for the per-ball stake
    pub const STAKE_KEY: &str = "ballValue";
    /// Storage key for the selected row count
    pub const ROWS_KEY: &str = "rows";

    /// Starting balance when nothing (valid) is persisted
    pub const DEFAULT_BALANCE: f64 = 100.0;
    /// Starting stake when nothing (valid) is persisted
    pub const DEFAULT_STAKE: u32 = 1;
    /// Minimum accepted stake
    pub const MIN_STAKE: u32 = 1;

    /// Points credited by a single top-up
    pub const TOP_UP_AMOUNT: f64 = 100.0;

    /// Divisor (per row) for the centering bias of the path walk.
    /// Larger values make the walk closer to a fair coin.
    pub const PATH_BIAS_DIVISOR: f64 = 15.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected random source only (seeded in tests)
//! - Injected key/value store only
//! - Stable in-flight order (by ball ID)
//! - No rendering or platform dependencies

pub mod board;
pub mod engine;
pub mod path;
pub mod state;
pub mod table;

pub use board::{BoardLayout, columns_for, derive_coordinates, midpoint};
pub use engine::{DropError, EngineSnapshot, GameEngine, Landing, LandingHook, StakeInput};
pub use path::{BallId, BallPath, ScriptedSource, UniformSource, generate_path, landing_bucket};
pub use state::WalletState;
pub use table::{BoardConfig, BoardSize};

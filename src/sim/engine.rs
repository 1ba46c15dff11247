//! Game engine: wallet, board configuration and balls in flight
//!
//! The engine is driven by the presentation layer:
//! 1. `drop_ball` debits the stake and returns a path to animate
//! 2. when the animation finishes, `resolve_ball` credits the winnings
//!
//! Every wallet or board change is written straight back to the store.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::BoardLayout;
use super::path::{BallId, BallPath, UniformSource, generate_path, landing_bucket};
use super::state::{self, WalletState};
use super::table::{BoardConfig, BoardSize};
use crate::consts::*;
use crate::persistence::KeyValueStore;

/// Reasons a ball could not be dropped
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropError {
    #[error("insufficient funds: balance {balance} is below stake {stake}")]
    InsufficientFunds { balance: f64, stake: u32 },
}

/// Outcome of a resolved ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub id: BallId,
    pub bucket: usize,
    pub multiplier: f64,
    pub stake: u32,
    pub winnings: f64,
}

/// Notified after a ball lands and the wallet has been credited
pub trait LandingHook {
    fn on_landing(&mut self, landing: &Landing);
}

/// Shared hooks stay reachable by their owner after installation
impl<H: LandingHook + ?Sized> LandingHook for Rc<RefCell<H>> {
    fn on_landing(&mut self, landing: &Landing) {
        self.borrow_mut().on_landing(landing);
    }
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub balance: f64,
    pub stake: u32,
    pub rows: u32,
    pub columns: u32,
    pub multipliers: Vec<f64>,
    pub balls: Vec<BallPath>,
}

/// Plinko game engine
pub struct GameEngine<S: KeyValueStore, R: UniformSource = Pcg32> {
    store: S,
    rng: R,
    wallet: WalletState,
    board: BoardConfig,
    /// Balls in flight (sorted by id)
    balls: Vec<BallPath>,
    next_id: BallId,
    landing_hook: Option<Box<dyn LandingHook>>,
}

impl<S: KeyValueStore> GameEngine<S, Pcg32> {
    /// Create an engine from persisted state with a seeded RNG
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_rng(store, Pcg32::seed_from_u64(seed))
    }
}

impl<S: KeyValueStore, R: UniformSource> GameEngine<S, R> {
    /// Create an engine from persisted state with the given random source
    pub fn with_rng(store: S, rng: R) -> Self {
        let wallet = WalletState::load(&store);
        let size = state::load_board_size(&store);
        log::info!(
            "Loaded wallet: balance {:.2}, stake {}, {} rows",
            wallet.balance,
            wallet.stake,
            size.rows()
        );

        Self {
            store,
            rng,
            wallet,
            board: BoardConfig::new(size),
            balls: Vec::new(),
            next_id: 1,
            landing_hook: None,
        }
    }

    /// Install the hook fired after each landing
    pub fn set_landing_hook(&mut self, hook: impl LandingHook + 'static) {
        self.landing_hook = Some(Box::new(hook));
    }

    // === Accessors ===

    pub fn balance(&self) -> f64 {
        self.wallet.balance
    }

    pub fn stake(&self) -> u32 {
        self.wallet.stake
    }

    pub fn rows(&self) -> u32 {
        self.board.rows()
    }

    pub fn columns(&self) -> u32 {
        self.board.columns()
    }

    pub fn multipliers(&self) -> &[f64] {
        self.board.multipliers()
    }

    /// Balls currently in flight
    pub fn balls(&self) -> &[BallPath] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&BallPath> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Peg and bucket layout for the current board
    pub fn layout(&self) -> BoardLayout {
        BoardLayout::new(self.rows())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access for data the engine does not own (e.g. settings)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            balance: self.wallet.balance,
            stake: self.wallet.stake,
            rows: self.rows(),
            columns: self.columns(),
            multipliers: self.board.multipliers().to_vec(),
            balls: self.balls.clone(),
        }
    }

    // === Configuration ===

    /// Replace the balance
    pub fn set_balance(&mut self, amount: f64) {
        self.wallet.balance = amount;
        state::save_balance(&mut self.store, amount);
    }

    /// Add the fixed top-up amount to the balance
    pub fn top_up(&mut self) {
        let balance = self.wallet.balance + TOP_UP_AMOUNT;
        self.set_balance(balance);
        log::info!("Topped up to {:.2}", balance);
    }

    /// Replace the stake; values below the minimum are raised to it
    pub fn set_stake(&mut self, value: u32) {
        let stake = value.max(MIN_STAKE);
        self.wallet.stake = stake;
        state::save_stake(&mut self.store, stake);
    }

    /// Switch board size. Balls in flight are discarded without refund.
    pub fn set_rows(&mut self, size: BoardSize) {
        let discarded = self.balls.len();
        self.board = BoardConfig::new(size);
        self.balls.clear();
        state::save_board_size(&mut self.store, size);

        if discarded > 0 {
            log::info!(
                "Board set to {} rows ({} balls in flight discarded)",
                size.rows(),
                discarded
            );
        } else {
            log::info!("Board set to {} rows", size.rows());
        }
    }

    // === Play ===

    /// Generate a path for the current board without dropping a ball
    pub fn generate_path(&mut self) -> Vec<i32> {
        generate_path(self.board.rows(), &mut self.rng)
    }

    /// Pay the stake and put a new ball in flight
    pub fn try_drop_ball(&mut self) -> Result<BallId, DropError> {
        if !self.wallet.can_afford() {
            log::debug!(
                "Drop refused: balance {:.2} < stake {}",
                self.wallet.balance,
                self.wallet.stake
            );
            return Err(DropError::InsufficientFunds {
                balance: self.wallet.balance,
                stake: self.wallet.stake,
            });
        }

        self.set_balance(self.wallet.balance - f64::from(self.wallet.stake));

        let id = self.next_id;
        self.next_id += 1;
        let path = self.generate_path();
        log::debug!("Ball {} dropped, lands at {:?}", id, path.last());
        self.balls.push(BallPath { id, path });

        Ok(id)
    }

    /// Drop a ball; `false` when the balance cannot cover the stake
    pub fn drop_ball(&mut self) -> bool {
        self.try_drop_ball().is_ok()
    }

    /// Settle a ball whose animation has finished.
    ///
    /// Unknown ids (already resolved, or discarded by a board change) are
    /// ignored and return `None`.
    pub fn resolve_ball(&mut self, id: BallId) -> Option<Landing> {
        let Some(index) = self.balls.iter().position(|b| b.id == id) else {
            log::debug!("Ignoring resolve for unknown ball {}", id);
            return None;
        };
        let ball = self.balls.remove(index);

        let bucket = landing_bucket(ball.last_position().unwrap_or_default());
        let multiplier = self.board.multiplier(bucket);
        let stake = self.wallet.stake;
        let winnings = f64::from(stake) * multiplier;

        self.set_balance(self.wallet.balance + winnings);

        let landing = Landing {
            id,
            bucket,
            multiplier,
            stake,
            winnings,
        };
        log::debug!(
            "Ball {} landed in bucket {} ({}x), won {:.2}",
            id,
            bucket,
            multiplier,
            winnings
        );

        if let Some(hook) = self.landing_hook.as_mut() {
            hook.on_landing(&landing);
        }

        Some(landing)
    }
}

/// Text-field model for the stake input.
///
/// Typing applies any whole number of at least 1 immediately; anything else
/// stays provisional until the field loses focus, when it is reset to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeInput {
    text: String,
}

impl StakeInput {
    pub fn new(stake: u32) -> Self {
        Self {
            text: stake.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn parsed(&self) -> Option<u32> {
        self.text.trim().parse::<u32>().ok().filter(|v| *v >= MIN_STAKE)
    }

    pub fn on_change<S: KeyValueStore, R: UniformSource>(
        &mut self,
        text: &str,
        engine: &mut GameEngine<S, R>,
    ) {
        self.text = text.to_string();
        if let Some(stake) = self.parsed() {
            engine.set_stake(stake);
        }
    }

    pub fn on_blur<S: KeyValueStore, R: UniformSource>(&mut self, engine: &mut GameEngine<S, R>) {
        if self.parsed().is_none() {
            engine.set_stake(MIN_STAKE);
            self.text = MIN_STAKE.to_string();
        }
    }
}

//! Persisted player state
//!
//! Everything that survives between sessions lives here: the wallet balance,
//! the stake per ball and the chosen board size. Each field is stored under
//! its own key as a plain string.

use serde::{Deserialize, Serialize};

use super::table::BoardSize;
use crate::consts::*;
use crate::persistence::{KeyValueStore, load_or, load_with};

/// Wallet balance and per-ball stake
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    pub balance: f64,
    pub stake: u32,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            stake: DEFAULT_STAKE,
        }
    }
}

impl WalletState {
    /// Hydrate from the store; invalid or missing fields use defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            balance: load_with(store, WALLET_KEY, DEFAULT_BALANCE, |b: &f64| b.is_finite()),
            stake: load_with(store, STAKE_KEY, DEFAULT_STAKE, |s: &u32| *s >= MIN_STAKE),
        }
    }

    /// Whether a ball can be paid for
    pub fn can_afford(&self) -> bool {
        self.balance >= f64::from(self.stake)
    }
}

pub fn save_balance<S: KeyValueStore + ?Sized>(store: &mut S, balance: f64) {
    store.set(WALLET_KEY, &balance.to_string());
}

pub fn save_stake<S: KeyValueStore + ?Sized>(store: &mut S, stake: u32) {
    store.set(STAKE_KEY, &stake.to_string());
}

pub fn load_board_size<S: KeyValueStore + ?Sized>(store: &S) -> BoardSize {
    load_or(store, ROWS_KEY, BoardSize::default())
}

pub fn save_board_size<S: KeyValueStore + ?Sized>(store: &mut S, size: BoardSize) {
    store.set(ROWS_KEY, size.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let wallet = WalletState::load(&store);
        assert_eq!(wallet, WalletState::default());
        assert_eq!(wallet.balance, 100.0);
        assert_eq!(wallet.stake, 1);
        assert_eq!(load_board_size(&store), BoardSize::Ten);
    }

    #[test]
    fn test_unparseable_wallet_defaults() {
        let store = MemoryStore::with_entries([("wallet", "abc"), ("ballValue", "5")]);
        let wallet = WalletState::load(&store);
        assert_eq!(wallet.balance, 100.0);
        assert_eq!(wallet.stake, 5);
    }

    #[test]
    fn test_out_of_range_values_default() {
        let store = MemoryStore::with_entries([
            ("wallet", "NaN"),
            ("ballValue", "0"),
            ("rows", "11"),
        ]);
        let wallet = WalletState::load(&store);
        assert_eq!(wallet.balance, 100.0);
        assert_eq!(wallet.stake, 1);
        assert_eq!(load_board_size(&store), BoardSize::Ten);

        let store = MemoryStore::with_entries([("ballValue", "-3"), ("wallet", "inf")]);
        let wallet = WalletState::load(&store);
        assert_eq!(wallet.balance, 100.0);
        assert_eq!(wallet.stake, 1);
    }

    #[test]
    fn test_fractional_stake_is_rejected() {
        let store = MemoryStore::with_entries([("ballValue", "3.5"), ("wallet", "1e2")]);
        let wallet = WalletState::load(&store);
        assert_eq!(wallet.stake, 1);
        assert_eq!(wallet.balance, 100.0);
    }

    #[test]
    fn test_saved_values_reload() {
        let mut store = MemoryStore::new();
        save_balance(&mut store, 87.6);
        save_stake(&mut store, 3);
        save_board_size(&mut store, BoardSize::Fourteen);

        let wallet = WalletState::load(&store);
        assert_eq!(wallet.balance, 87.6);
        assert_eq!(wallet.stake, 3);
        assert_eq!(load_board_size(&store), BoardSize::Fourteen);
    }

    #[test]
    fn test_can_afford() {
        let wallet = WalletState {
            balance: 0.5,
            stake: 1,
        };
        assert!(!wallet.can_afford());
        let wallet = WalletState {
            balance: 1.0,
            stake: 1,
        };
        assert!(wallet.can_afford());
    }
}

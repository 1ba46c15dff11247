//! Key/value persistence
//!
//! The engine never touches browser storage directly. It is handed a
//! [`KeyValueStore`] and reads every persisted field through [`load_or`],
//! which falls back to a documented default whenever the stored string is
//! missing or fails to parse.
//!
//! Stores:
//! - [`MemoryStore`]: in-process map (native runs and tests)
//! - `LocalStorageStore`: browser LocalStorage (wasm only)

use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// String key/value storage capability
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(key, value)` pairs
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Load and parse `key`, keeping only values `accept` approves of.
///
/// Missing keys, parse failures and rejected values all yield `default`.
pub fn load_with<S, T, F>(store: &S, key: &str, default: T, accept: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: FromStr + Debug,
    F: Fn(&T) -> bool,
{
    let Some(raw) = store.get(key) else {
        log::debug!("No stored value for '{}', using {:?}", key, default);
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => value,
        Ok(value) => {
            log::warn!(
                "Stored value {:?} for '{}' out of range, using {:?}",
                value,
                key,
                default
            );
            default
        }
        Err(_) => {
            log::warn!(
                "Stored value {:?} for '{}' is not valid, using {:?}",
                raw,
                key,
                default
            );
            default
        }
    }
}

/// Load and parse `key`, falling back to `default`
pub fn load_or<S, T>(store: &S, key: &str, default: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: FromStr + Debug,
{
    load_with(store, key, default, |_| true)
}

/// Load a JSON document stored under `key`, falling back to `T::default()`
pub fn load_json<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    if let Some(json) = store.get(key) {
        match serde_json::from_str(&json) {
            Ok(value) => return value,
            Err(e) => log::warn!("Stored '{}' is corrupt ({}), using defaults", key, e),
        }
    }
    T::default()
}

/// Store `value` as JSON under `key`
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::warn!("Failed to serialize '{}': {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_uses_default() {
        let store = MemoryStore::new();
        assert_eq!(load_or(&store, "wallet", 100.0), 100.0);
    }

    #[test]
    fn test_garbage_uses_default() {
        let store = MemoryStore::with_entries([("wallet", "abc")]);
        assert_eq!(load_or(&store, "wallet", 100.0), 100.0);
    }

    #[test]
    fn test_valid_value_is_parsed() {
        let store = MemoryStore::with_entries([("wallet", " 42.5 "), ("ballValue", "7")]);
        assert_eq!(load_or(&store, "wallet", 100.0), 42.5);
        assert_eq!(load_or(&store, "ballValue", 1u32), 7);
    }

    #[test]
    fn test_rejected_value_uses_default() {
        let store = MemoryStore::with_entries([("ballValue", "0")]);
        assert_eq!(load_with(&store, "ballValue", 1u32, |v| *v >= 1), 1);
    }

    #[test]
    fn test_json_round_trip_and_corruption() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "list", &vec![1, 2, 3]);
        assert_eq!(load_json::<_, Vec<i32>>(&store, "list"), vec![1, 2, 3]);

        store.set("list", "{not json");
        assert!(load_json::<_, Vec<i32>>(&store, "list").is_empty());
    }
}

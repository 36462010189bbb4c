use crate::error::Result;

/// Abstract interface for raw key/value storage.
///
/// This trait handles the "how" of durability (files, memory), while
/// [`CountdownStore`](super::countdowns::CountdownStore) handles the "what":
/// the collection, its invariants, and recovery from failed writes.
///
/// Values are whole serialized documents. A write replaces the previous value
/// for the key in one step.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`.
    /// Returns `CountdownError::QuotaExceeded` when the backend is full.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Missing keys are not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

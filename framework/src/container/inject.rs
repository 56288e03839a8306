//! Write-once injection cell
//!
//! Components declare injectable fields as `Inject<T>` cells. The injector
//! fills them exactly once after every instance exists; an unresolved slot
//! simply stays empty.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// A field slot filled by the dependency injector.
///
/// The first write wins and later writes are ignored, which makes a repeated
/// injection pass reach the same end state. An unfilled cell reads as `None`,
/// the zero value of the slot.
pub struct Inject<T: ?Sized>(OnceLock<Arc<T>>);

impl<T: ?Sized> Inject<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// The injected instance, shared with the container entry.
    pub fn get(&self) -> Option<Arc<T>> {
        self.0.get().cloned()
    }

    /// Fill the slot. Ignored when already filled.
    pub fn set(&self, value: Arc<T>) {
        let _ = self.0.set(value);
    }

    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Inject")
            .field(&if self.is_set() { "set" } else { "empty" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_reads_as_none() {
        let cell: Inject<u32> = Inject::new();
        assert!(cell.get().is_none());
        assert!(!cell.is_set());
    }

    #[test]
    fn first_write_wins() {
        let cell: Inject<u32> = Inject::new();
        cell.set(Arc::new(1));
        cell.set(Arc::new(2));
        assert_eq!(*cell.get().unwrap(), 1);
    }

    #[test]
    fn get_shares_the_injected_instance() {
        let value = Arc::new(String::from("shared"));
        let cell: Inject<String> = Inject::new();
        cell.set(value.clone());
        assert!(Arc::ptr_eq(&cell.get().unwrap(), &value));
    }
}

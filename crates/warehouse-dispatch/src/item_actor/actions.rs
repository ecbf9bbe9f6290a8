//! Custom actions for the Item actor.

use crate::model::Item;

#[derive(Debug, Clone)]
pub enum ItemAction {
    /// Records the scanner's measurements. A re-scan overwrites the previous reading.
    ///
    /// # Errors
    /// Fails unless both values are finite and greater than zero.
    Scan { weight: f64, volume: f64 },
}

/// Results from ItemActions - variants match 1:1 with ItemAction
#[derive(Debug, Clone)]
pub enum ItemActionResult {
    /// The item as stored after the scan
    Scan(Item),
}

//! Simulated work.
//!
//! # Responsibilities
//! - Decide order outcomes, delays and stock levels for the handlers
//!
//! # Design Decisions
//! - Handlers depend on the `WorkSimulator` trait, never on an RNG directly
//! - `RandomWorkSimulator` drives the running service
//! - `ScriptedSimulator` gives tests fixed outcomes with no delays

pub mod random;
pub mod scripted;

use std::time::Duration;

pub use random::RandomWorkSimulator;
pub use scripted::ScriptedSimulator;

/// Smallest and largest order number; order ids are always five digits.
pub const ORDER_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

/// Upper bound on reported stock; `availableItems` never exceeds it.
pub const MAX_STOCK: u32 = 1000;

/// Source of every non-deterministic decision made while serving a request.
pub trait WorkSimulator: Send + Sync {
    /// Number embedded in the order id.
    fn order_number(&self) -> u32;

    /// Monetary value attached to the order span.
    fn order_value(&self) -> u32;

    /// Time spent "processing" an order.
    fn order_delay(&self) -> Duration;

    /// Whether the current order succeeds.
    fn order_succeeds(&self) -> bool;

    /// Time spent "looking up" inventory.
    fn inventory_delay(&self) -> Duration;

    /// Reported number of available items.
    fn stock_level(&self) -> u32;
}

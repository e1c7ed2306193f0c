//! Deterministic work simulator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::simulation::WorkSimulator;

/// Returns fixed values; the order outcome can be flipped at runtime.
#[derive(Debug)]
pub struct ScriptedSimulator {
    pub order_number: u32,
    pub order_value: u32,
    pub stock_level: u32,
    pub delay: Duration,
    succeeds: AtomicBool,
}

impl ScriptedSimulator {
    /// Orders succeed, no delays.
    pub fn succeeding() -> Self {
        Self {
            order_number: 12_345,
            order_value: 250,
            stock_level: 42,
            delay: Duration::ZERO,
            succeeds: AtomicBool::new(true),
        }
    }

    /// Orders fail, no delays.
    pub fn failing() -> Self {
        let sim = Self::succeeding();
        sim.set_succeeds(false);
        sim
    }

    pub fn set_succeeds(&self, succeeds: bool) {
        self.succeeds.store(succeeds, Ordering::SeqCst);
    }
}

impl WorkSimulator for ScriptedSimulator {
    fn order_number(&self) -> u32 {
        self.order_number
    }

    fn order_value(&self) -> u32 {
        self.order_value
    }

    fn order_delay(&self) -> Duration {
        self.delay
    }

    fn order_succeeds(&self) -> bool {
        self.succeeds.load(Ordering::SeqCst)
    }

    fn inventory_delay(&self) -> Duration {
        self.delay
    }

    fn stock_level(&self) -> u32 {
        self.stock_level
    }
}

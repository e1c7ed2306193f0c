//! Random work simulator.

use std::time::Duration;

use rand::Rng;

use crate::config::SimulationConfig;
use crate::simulation::{WorkSimulator, MAX_STOCK, ORDER_NUMBER_RANGE};

/// Draws outcomes from the thread-local RNG using the configured ranges.
#[derive(Debug, Clone)]
pub struct RandomWorkSimulator {
    config: SimulationConfig,
}

impl RandomWorkSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Default for RandomWorkSimulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

fn delay_between(range: [u64; 2]) -> Duration {
    let [min, max] = range;
    if min >= max {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}

impl WorkSimulator for RandomWorkSimulator {
    fn order_number(&self) -> u32 {
        rand::thread_rng().gen_range(ORDER_NUMBER_RANGE)
    }

    fn order_value(&self) -> u32 {
        rand::thread_rng().gen_range(50..=500)
    }

    fn order_delay(&self) -> Duration {
        delay_between(self.config.order_delay_ms)
    }

    fn order_succeeds(&self) -> bool {
        rand::thread_rng().gen_bool(self.config.success_rate.clamp(0.0, 1.0))
    }

    fn inventory_delay(&self) -> Duration {
        delay_between(self.config.inventory_delay_ms)
    }

    fn stock_level(&self) -> u32 {
        rand::thread_rng().gen_range(0..=self.config.max_stock.min(MAX_STOCK))
    }
}

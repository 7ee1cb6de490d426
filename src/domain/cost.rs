use super::entities::Dimensions;

/// Rate applied to the box volume.
const VOLUME_RATE: f64 = 0.001;
/// Rate applied per weight unit.
const WEIGHT_RATE: f64 = 2.0;

/// Where a cost estimate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostSource {
    Remote,
    LocalFormula,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CostEstimate {
    pub amount: f64,
    pub source: CostSource,
}

impl CostEstimate {
    pub fn display(&self) -> String {
        format!("Estimated shipping cost: ${:.2}", self.amount)
    }
}

/// Offline estimate used when the pricing endpoint is unavailable.
pub fn local_estimate(dimensions: &Dimensions) -> f64 {
    let volume = dimensions.length * dimensions.width * dimensions.height;
    round_cents(volume * VOLUME_RATE + dimensions.weight * WEIGHT_RATE)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

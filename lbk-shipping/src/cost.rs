use lbk_catalog::Cart;
use std::sync::Arc;
use crate::mode::{resolve_mode, TransportMode};
use crate::rates::{AirRate, RateTable};

/// Float noise below this is not billed as an extra dollar
const ROUNDING_TOLERANCE_USD: f64 = 1e-9;

/// Round a raw USD amount up to whole dollars.
///
/// Any real fraction of a cent rounds up; negative or non-finite input is 0.
pub fn ceil_usd(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    (raw - ROUNDING_TOLERANCE_USD).ceil().max(0.0) as u64
}

/// Freight price for a cart under the mode it will actually travel by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub mode: TransportMode,
    pub forced: bool,
    pub cost_usd: u64,
}

/// The two sea freight prices; the larger one is billed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatCandidates {
    pub volume_m3: f64,
    pub weight_tons: f64,
    pub volume_usd: f64,
    pub weight_usd: f64,
}

impl BoatCandidates {
    pub fn billed_usd(&self) -> f64 {
        self.volume_usd.max(self.weight_usd)
    }
}

/// Pure freight calculator over a shared rate table
#[derive(Debug, Clone)]
pub struct CostCalculator {
    rates: Arc<RateTable>,
}

impl CostCalculator {
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Whole USD shipping cost; hazardous carts are always priced by sea
    pub fn compute_cost(&self, cart: &Cart, mode: TransportMode) -> u64 {
        self.quote(cart, mode).cost_usd
    }

    pub fn quote(&self, cart: &Cart, requested: TransportMode) -> Quote {
        let decision = resolve_mode(cart, requested);

        let cost_usd = match self.rates.air_rate(decision.mode) {
            Some(rate) => self.air_cost(cart, rate),
            None => ceil_usd(self.boat_candidates(cart).billed_usd()),
        };

        Quote {
            mode: decision.mode,
            forced: decision.forced,
            cost_usd,
        }
    }

    fn air_cost(&self, cart: &Cart, rate: &AirRate) -> u64 {
        let mut total = rate.base_fee_usd();

        for line in cart.lines() {
            let quantity = f64::from(line.quantity);
            total += match rate.unit_override(line.category) {
                Some(flat) => flat * quantity,
                None => self.rates.profile(line.category).weight_kg * rate.per_kg_usd * quantity,
            };
        }

        ceil_usd(total)
    }

    pub fn boat_candidates(&self, cart: &Cart) -> BoatCandidates {
        let mut volume_m3 = 0.0;
        let mut weight_kg = 0.0;

        for line in cart.lines() {
            let profile = self.rates.profile(line.category);
            let quantity = f64::from(line.quantity);
            volume_m3 += profile.volume_m3 * quantity;
            weight_kg += profile.weight_kg * quantity;
        }

        let weight_tons = weight_kg / 1000.0;
        BoatCandidates {
            volume_m3,
            weight_tons,
            volume_usd: volume_m3 * self.rates.boat.per_cubic_meter_usd,
            weight_usd: weight_tons * self.rates.boat.per_ton_usd,
        }
    }
}

//! The market-impact feedback model (spec.md §4.7).
//!
//! Tracks a signed, unbounded-magnitude `market_impact` value: positive for
//! accumulated buy pressure, negative for sell pressure. Participant
//! aggression pushes it; opposing historical aggression partially erodes
//! it. Historical (non-participant) inbound order prices are nudged by a
//! tick shift derived from this value before they reach the book.

/// Outcome of a single sweep, summarized for the impact update.
#[derive(Debug, Clone, Copy)]
pub struct SweepImpactInputs {
    /// Total quantity where the participant was the aggressor.
    pub my_agg_vol: u64,
    /// Total quantity where neither side of the trade was the participant.
    pub ob_agg_vol: u64,
    /// `leavesqty` of the opposite side's best-level head order before the
    /// sweep began.
    pub init_best_vol: u64,
    /// +1 if the aggressor was a buy, -1 if a sell.
    pub agg_effect_side: i8,
    /// Participant cumulative volume after this sweep's trades are
    /// counted (used for the `pov_f` decay factor).
    pub my_cumvol_after: u64,
    /// Total cumulative volume after this sweep's trades are counted.
    pub cumvol_after: u64,
}

/// The accumulated market-impact state for one order book.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketImpact {
    value: f64,
}

impl MarketImpact {
    /// Fresh, zeroed impact state.
    pub fn new() -> Self {
        MarketImpact { value: 0.0 }
    }

    /// The current signed impact value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Reset to zero (used by `reset_ob`).
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Apply one sweep's contribution to the accumulated impact.
    pub fn apply_sweep(&mut self, inputs: SweepImpactInputs) {
        let side = inputs.agg_effect_side as f64;

        if inputs.my_agg_vol > 0 {
            let agg_effect = (inputs.my_agg_vol as f64 / inputs.init_best_vol as f64).min(1.0);
            self.value += agg_effect * side;
        }

        if inputs.ob_agg_vol > 0 {
            let opposes_accumulated_impact =
                (self.value > 0.0 && side < 0.0) || (self.value < 0.0 && side > 0.0);
            if opposes_accumulated_impact {
                let agg_effect = (inputs.ob_agg_vol as f64 / inputs.init_best_vol as f64).min(1.0);
                let pov_f = if inputs.cumvol_after > 0 {
                    1.0 - (inputs.my_cumvol_after as f64 / inputs.cumvol_after as f64)
                } else {
                    1.0
                };
                self.value += agg_effect * side * pov_f;
            }
        }
    }

    /// The tick shift to apply to an inbound historical order's price,
    /// per spec.md §4.7: a ±1 deadband, then truncation toward zero,
    /// clamped to `[-max_impact, max_impact]`.
    ///
    /// Returns `None` when `|market_impact| < 1` (no shift).
    pub fn tick_shift(&self, resilience: f64, max_impact: i64) -> Option<i64> {
        if self.value >= 1.0 {
            let raw = (resilience * self.value).floor() as i64;
            Some(raw.clamp(0, max_impact))
        } else if self.value <= -1.0 {
            let raw = (resilience * self.value).ceil() as i64;
            Some(raw.clamp(-max_impact, 0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_aggressor_pushes_impact_in_trade_direction() {
        let mut impact = MarketImpact::new();
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 50,
            ob_agg_vol: 0,
            init_best_vol: 100,
            agg_effect_side: -1,
            my_cumvol_after: 50,
            cumvol_after: 50,
        });
        assert!((impact.value() - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn impact_caps_participant_contribution_at_one() {
        let mut impact = MarketImpact::new();
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 500,
            ob_agg_vol: 0,
            init_best_vol: 100,
            agg_effect_side: 1,
            my_cumvol_after: 500,
            cumvol_after: 500,
        });
        assert!((impact.value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn historical_sweep_erodes_opposing_impact() {
        let mut impact = MarketImpact::new();
        impact.value = -1.5;
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 0,
            ob_agg_vol: 40,
            init_best_vol: 40,
            agg_effect_side: 1, // a buy-side historical sweep opposes negative impact
            my_cumvol_after: 50,
            cumvol_after: 200,
        });
        // pov_f = 1 - 50/200 = 0.75; agg_effect = 1.0
        let expected = -1.5 + 1.0 * 1.0 * 0.75;
        assert!((impact.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn historical_sweep_same_direction_as_impact_does_not_erode() {
        let mut impact = MarketImpact::new();
        impact.value = -1.5;
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 0,
            ob_agg_vol: 40,
            init_best_vol: 40,
            agg_effect_side: -1, // same sign as accumulated impact: no correction
            my_cumvol_after: 50,
            cumvol_after: 200,
        });
        assert!((impact.value() - (-1.5)).abs() < 1e-9);
    }

    #[test]
    fn deadband_suppresses_shift_below_one() {
        let mut impact = MarketImpact::new();
        impact.value = 0.9;
        assert_eq!(impact.tick_shift(1.0, 20), None);
        impact.value = -0.9;
        assert_eq!(impact.tick_shift(1.0, 20), None);
    }

    #[test]
    fn shift_truncates_toward_zero_and_clamps() {
        let mut impact = MarketImpact::new();
        impact.value = 1.9;
        assert_eq!(impact.tick_shift(1.0, 20), Some(1));
        impact.value = -1.9;
        assert_eq!(impact.tick_shift(1.0, 20), Some(-1));
        impact.value = 500.0;
        assert_eq!(impact.tick_shift(1.0, 20), Some(20));
        impact.value = -500.0;
        assert_eq!(impact.tick_shift(1.0, 20), Some(-20));
    }

    #[test]
    fn scenario_impact_threshold_crossed() {
        // spec.md §8 scenario 4: two sweeps accumulate impact to -1.5.
        let mut impact = MarketImpact::new();
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 50,
            ob_agg_vol: 0,
            init_best_vol: 100,
            agg_effect_side: -1,
            my_cumvol_after: 50,
            cumvol_after: 50,
        });
        impact.apply_sweep(SweepImpactInputs {
            my_agg_vol: 40,
            ob_agg_vol: 0,
            init_best_vol: 40,
            agg_effect_side: -1,
            my_cumvol_after: 90,
            cumvol_after: 90,
        });
        assert!((impact.value() - (-1.5)).abs() < 1e-9);
        assert_eq!(impact.tick_shift(1.0, 20), Some(-1));
    }
}

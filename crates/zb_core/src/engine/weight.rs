//! Token weight composition.
//!
//! Multiplicative factors (skill, fatigue, pressure, qualitative staff
//! percentages) combine as a log-space sum on the base weight:
//! `ln(W) = ln(W_base) + Σ ln(factor_i)`. Quantitative (flat) staff deltas
//! are applied after exponentiation, then the result is clamped.

/// Weights never drop to zero for a token the catalogue listed; the floor
/// keeps every listed action drawable and the draw well-defined.
pub const WEIGHT_FLOOR: f32 = 0.05;
pub const WEIGHT_CEIL: f32 = 200.0;

#[derive(Debug, Clone)]
pub struct WeightComposer {
    base: f32,
    ln_sum: f32,
    flat: f32,
}

impl WeightComposer {
    pub fn new(base: f32) -> Self {
        Self { base: base.max(0.01), ln_sum: 0.0, flat: 0.0 }
    }

    /// Add a multiplicative factor (log-space).
    pub fn scale(&mut self, factor: f32) -> &mut Self {
        self.ln_sum += factor.clamp(0.01, 100.0).ln();
        self
    }

    /// Add a flat adjustment, applied after all multiplicative factors.
    pub fn add_flat(&mut self, delta: f32) -> &mut Self {
        self.flat += delta;
        self
    }

    pub fn compose(&self) -> f32 {
        let scaled = (self.base.ln() + self.ln_sum).exp();
        (scaled + self.flat).clamp(WEIGHT_FLOOR, WEIGHT_CEIL)
    }
}

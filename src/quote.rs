//! Price helpers used by the pool and trading workflows.

/// Fraction of the input returned by simulated swaps (fixed 2% spread).
pub const SIMULATED_OUTPUT_RATE: f64 = 0.98;

/// Spot price of the token in SOL for a freshly seeded pool.
///
/// Returns `None` until both sides of the pool are positive.
pub fn pool_price(sol_amount: f64, token_amount: f64) -> Option<f64> {
    if sol_amount > 0.0 && token_amount > 0.0 {
        Some(sol_amount / token_amount)
    } else {
        None
    }
}

/// Output shown to the trader before submitting a swap.
pub fn estimate_swap_output(from_amount: f64) -> f64 {
    from_amount * SIMULATED_OUTPUT_RATE
}

/// Lowest acceptable output for a given slippage tolerance in percent.
pub fn minimum_received(estimated_output: f64, slippage_percent: f64) -> f64 {
    let tolerance = slippage_percent.clamp(0.0, 100.0) / 100.0;
    estimated_output * (1.0 - tolerance)
}

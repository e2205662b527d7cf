//! The escape-time evaluator at the heart of the renderer.

use num::Complex;

/// Counts the iterations of `z <- z*z + c` (starting from `z = 0`)
/// needed before `|z|` reaches 2, the radius past which the orbit is
/// guaranteed to diverge.
///
/// Returns `i + 1` when the escape is detected on iteration `i`, so the
/// smallest possible escape report is 1.  Returns 0 when the orbit is
/// still bounded after `limit` iterations; 0 is the "in the set"
/// sentinel, not a count.  The escape test runs on every iteration, so
/// the report for a given `c` never changes when the cap is raised.
///
/// Pure and reentrant.  Every call owns its own `z`, so any number of
/// workers may evaluate samples at once with no coordination.
pub fn escape_time(c: Complex<f64>, limit: u32) -> u32 {
    let mut z = Complex::new(0.0, 0.0);
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() >= 4.0 {
            return i + 1;
        }
    }
    0
}

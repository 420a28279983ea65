//! Binomial coefficients and the saturating binomial law.
//!
//! Both DP engines describe a refresh the same way: `slots` independent draws,
//! each hitting the target item with probability `p`, but never yielding more
//! copies than the pool still holds. The tail of the binomial beyond that cap
//! is folded into the cap itself.

/// Binomial coefficient C(n, k) as a float.
///
/// Running product of `(n - i) / (i + 1)`; no factorials.
///
/// # Example
/// ```
/// use shop_odds::odds::binom;
///
/// assert_eq!(binom(5, 2), 10.0);
/// assert_eq!(binom(5, 6), 0.0);
/// ```
pub fn binom(n: i64, k: i64) -> f64 {
    if k < 0 || k > n {
        return 0.0;
    }
    let mut r = 1.0;
    for i in 0..k {
        r *= (n - i) as f64 / (i + 1) as f64;
    }
    r
}

/// Probability of exactly `hits` successes in `slots` Bernoulli(p) trials.
#[inline]
pub fn binomial_pmf(slots: u32, hits: u32, p: f64) -> f64 {
    binom(slots as i64, hits as i64) * p.powi(hits as i32) * (1.0 - p).powi((slots - hits) as i32)
}

/// Distribution of copies actually drawn in one refresh.
///
/// Returns a vector over `0..=min(slots, cap)`. Entries below `cap` are the
/// plain binomial pmf; when `cap <= slots` the last entry absorbs every
/// outcome with `cap` or more hits, so the vector always sums to 1.
///
/// `p` is clamped to `[0, 1]`. A non-positive `cap` yields `[1.0]`.
///
/// # Arguments
/// * `slots` - Draw slots per refresh
/// * `p` - Per-slot probability of hitting the target item
/// * `cap` - Copies left in the pool
pub fn saturating_binomial(slots: u32, p: f64, cap: i64) -> Vec<f64> {
    if cap <= 0 {
        return vec![1.0];
    }
    let p = p.clamp(0.0, 1.0);
    let top = (slots as i64).min(cap) as u32;

    let mut dist = Vec::with_capacity(top as usize + 1);
    for hits in 0..=top {
        if (hits as i64) < cap {
            dist.push(binomial_pmf(slots, hits, p));
        } else {
            // Tail: every outcome that would overdraw the pool lands here
            let tail: f64 = (hits..=slots).map(|i| binomial_pmf(slots, i, p)).sum();
            dist.push(tail);
        }
    }
    dist
}

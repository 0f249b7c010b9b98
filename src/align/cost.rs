//! Gale–Church length-ratio cost model.
//!
//! The cost of aligning two text segments is `-100 * ln(p)` where `p` is the
//! probability that segments with these character lengths are translations of
//! each other, plus a fixed penalty depending on how many units each side of
//! the alignment consumes.

use serde::Deserialize;

use super::AlignOp;

/// Tunable parameters of the cost model. The defaults are the values from
/// Gale & Church's article and are what the paper's own evaluation used.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostParams {
    /// Expected number of characters in the translation per character in the
    /// source (the constant `c`).
    pub chars_per_char: f64,
    /// Variance of that ratio (the constant `s²`).
    pub variance: f64,
    /// Penalty added to 1-0 and 0-1 alignments.
    pub penalty_insert_delete: i32,
    /// Penalty added to 2-1 and 1-2 alignments.
    pub penalty_expand_contract: i32,
    /// Penalty added to 2-2 alignments.
    pub penalty_merge: i32,
    /// Returned in place of the match term when the probability underflows
    /// to zero, so the DP never sees a NaN or an overflow.
    pub big_distance: i32,
}

impl Default for CostParams {
    fn default() -> CostParams {
        CostParams {
            chars_per_char: 1.0,
            variance: 6.8,
            penalty_insert_delete: 450,
            penalty_expand_contract: 230,
            penalty_merge: 440,
            big_distance: 2500,
        }
    }
}

/// Area under the standard normal distribution from -infinity to `x`, by the
/// Abramowitz & Stegun rational approximation.
fn pnorm(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x);
    1.0 - 0.3989423
        * (-x * x / 2.0).exp()
        * (((((1.330274429 * t - 1.821255978) * t + 1.781477937) * t - 0.356563782) * t
            + 0.319381530)
            * t)
}

fn delta(params: &CostParams, len1: usize, len2: usize) -> f64 {
    let c = params.chars_per_char;
    let mean = (len1 as f64 + len2 as f64 / c) / 2.0;
    (len2 as f64 - len1 as f64 * c) / (mean * params.variance).sqrt()
}

/// `-100 * ln` of the probability that segments of `len1` and `len2`
/// characters are mutual translations, truncated toward zero.
fn match_cost(params: &CostParams, len1: usize, len2: usize) -> i32 {
    if len1 == 0 && len2 == 0 {
        return 0;
    }
    let delta = delta(params, len1, len2).abs();
    let p = 2.0 * (1.0 - pnorm(delta));
    if p > 0.0 {
        (-100.0 * p.ln()) as i32
    } else {
        params.big_distance
    }
}

/// The distance measure ("two_side_distance" in the C program attached to the
/// article). `len1`/`len2` are single-unit lengths or sums of two neighboring
/// units, according to `op`.
pub fn cost(params: &CostParams, len1: usize, len2: usize, op: AlignOp) -> i32 {
    match_cost(params, len1, len2) + penalty(params, op)
}

fn penalty(params: &CostParams, op: AlignOp) -> i32 {
    match op {
        AlignOp::Substitution => 0,
        AlignOp::Deletion | AlignOp::Insertion => params.penalty_insert_delete,
        AlignOp::Contraction | AlignOp::Expansion => params.penalty_expand_contract,
        AlignOp::Merger => params.penalty_merge,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PARAMS: CostParams = CostParams {
        chars_per_char: 1.0,
        variance: 6.8,
        penalty_insert_delete: 450,
        penalty_expand_contract: 230,
        penalty_merge: 440,
        big_distance: 2500,
    };

    #[test]
    fn zero_lengths_substitution_is_free() {
        assert_eq!(cost(&PARAMS, 0, 0, AlignOp::Substitution), 0);
    }

    #[test]
    fn zero_lengths_other_ops_cost_only_the_penalty() {
        assert_eq!(cost(&PARAMS, 0, 0, AlignOp::Deletion), 450);
        assert_eq!(cost(&PARAMS, 0, 0, AlignOp::Merger), 440);
    }

    #[test]
    fn equal_lengths_substitution_is_free() {
        // delta = 0 gives p = 1, so the match term vanishes.
        assert_eq!(cost(&PARAMS, 50, 50, AlignOp::Substitution), 0);
        assert_eq!(cost(&PARAMS, 1000, 1000, AlignOp::Substitution), 0);
    }

    #[test]
    fn penalty_ordering_is_fixed() {
        // Same lengths, so the match term cancels out in every comparison.
        let of = |op| cost(&PARAMS, 70, 70, op);
        assert_eq!(of(AlignOp::Substitution), 0);
        assert_eq!(of(AlignOp::Contraction), of(AlignOp::Expansion));
        assert_eq!(of(AlignOp::Deletion), of(AlignOp::Insertion));
        assert!(of(AlignOp::Substitution) < of(AlignOp::Contraction));
        assert!(of(AlignOp::Contraction) < of(AlignOp::Merger));
        assert!(of(AlignOp::Merger) < of(AlignOp::Deletion));
    }

    #[test]
    fn diverging_lengths_cost_more() {
        let near = cost(&PARAMS, 100, 105, AlignOp::Substitution);
        let far = cost(&PARAMS, 100, 180, AlignOp::Substitution);
        assert!(near < far);
    }

    #[test]
    fn underflow_hits_the_sentinel() {
        // A wildly mismatched pair drives p to zero.
        assert_eq!(
            cost(&PARAMS, 100000, 0, AlignOp::Deletion),
            2500 + 450
        );
    }

    #[test]
    fn cost_is_deterministic() {
        assert_eq!(
            cost(&PARAMS, 123, 95, AlignOp::Substitution),
            cost(&PARAMS, 123, 95, AlignOp::Substitution)
        );
    }

    #[test]
    fn default_params_match_the_article() {
        assert_eq!(CostParams::default(), PARAMS);
    }
}

//! Shannon entropy of a histogram, for diagnostic reporting only.
//!
//! Floating point never reaches the coding path; the entropy is a
//! lower bound the caller may print next to the achieved bit count.

use crate::frequency_model::Histogram;

/// Computes `-sum(p * log2(p))` over symbols with nonzero count, in
/// bits per symbol. Returns 0.0 for an empty histogram.
pub fn shannon_entropy(histogram: &Histogram) -> f64 {
    let total = histogram.total();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let mut entropy = 0.0;
    for (_, count) in histogram.entries() {
        let p = count as f64 / total;
        entropy -= p * p.log2();
    }
    entropy
}

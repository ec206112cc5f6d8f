pub type NodeId = usize;
pub type Cost = f64;

/// Sentinel id meaning "no predecessor".
pub const INVALID_NODE: NodeId = usize::MAX;

pub const INFINITE_COST: Cost = f64::INFINITY;

// Parameters from arXiv:2504.17033: k ~ log^(1/3) n and t ~ log^(2/3) n,
// approximated in powers of two so the recursion geometry stays integral.

pub fn compute_k(n: usize) -> usize {
    let log2n = n.max(1).ilog2() as usize;
    1usize << (log2n / 3)
}

pub fn compute_t(n: usize) -> usize {
    let log2n = n.max(1).ilog2() as usize;
    1usize << ((2 * log2n) / 3)
}

/// Top recursion level for a graph with n vertices.
pub fn compute_top_level(n: usize, t: usize) -> usize {
    ((n.max(1) as f64).ln() / t.max(1) as f64).floor() as usize + 1
}

/// 2^exp, saturating instead of overflowing for deep levels.
pub fn pow2_saturating(exp: usize) -> usize {
    if exp >= usize::BITS as usize {
        usize::MAX
    } else {
        1usize << exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_for_small_n() {
        assert_eq!(compute_k(0), 1);
        assert_eq!(compute_k(1), 1);
        assert_eq!(compute_t(1), 1);
        assert_eq!(compute_k(5), 1); // log2 = 2
        assert_eq!(compute_t(5), 2);
    }

    #[test]
    fn parameters_for_1024() {
        // log2 = 10 -> k = 2^3, t = 2^6
        assert_eq!(compute_k(1024), 8);
        assert_eq!(compute_t(1024), 64);
        assert_eq!(compute_top_level(1024, 64), 1);
    }

    #[test]
    fn top_level_is_at_least_one() {
        for n in [0, 1, 2, 100, 1_000_000] {
            let t = compute_t(n);
            assert!(compute_top_level(n, t) >= 1, "n={n}");
        }
    }

    #[test]
    fn pow2_saturates() {
        assert_eq!(pow2_saturating(0), 1);
        assert_eq!(pow2_saturating(10), 1024);
        assert_eq!(pow2_saturating(usize::BITS as usize), usize::MAX);
        assert_eq!(pow2_saturating(10_000), usize::MAX);
    }
}

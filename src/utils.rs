//! Assorted defaults for engine configuration.

/// Worker threads per process when none are configured: the machine's
/// available parallelism, or 1 if it cannot be queried.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Minimum block length handed to the thread pool for lines of up to
/// `max_line_len` cells.
///
/// Square-root heuristic: long lines get coarser tasks, short lines stay on
/// the calling thread.
#[inline]
pub fn default_grain(max_line_len: usize) -> usize {
    if max_line_len <= 1 {
        1
    } else {
        ((max_line_len as f64).sqrt().ceil() as usize).max(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grain_has_floor() {
        assert_eq!(default_grain(0), 1);
        assert_eq!(default_grain(1), 1);
        assert_eq!(default_grain(2), 16);
        assert_eq!(default_grain(256), 16);
    }

    #[test]
    fn grain_grows_as_sqrt() {
        assert_eq!(default_grain(10_000), 100);
        assert_eq!(default_grain(10_001), 101);
        assert_eq!(default_grain(1_000_000), 1_000);
    }

    #[test]
    fn grain_monotonic_non_decreasing() {
        let mut prev = 0;
        for len in 0..5_000 {
            let g = default_grain(len);
            assert!(g >= prev, "grain decreased at len={len}: {g} < {prev}");
            prev = g;
        }
    }

    #[test]
    fn at_least_one_thread() {
        assert!(default_threads() >= 1);
    }
}

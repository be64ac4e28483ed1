//! Compression statistics for minifier output
//!
//! Sizes are UTF-8 byte counts, not character counts.

/// Size comparison between an original and its reformatted result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Byte length of the original text
    pub original_size: usize,
    /// Byte length of the result text
    pub result_size: usize,
    /// Size reduction as a percentage, formatted to two decimals
    pub ratio_percent: String,
}

/// Compute size statistics for a reformatting run.
///
/// `ratio_percent` is `(original - result) / original * 100`; it is
/// `"0.00"` when either input is empty, so there is no division by zero.
/// Pure function, no side effects.
#[must_use]
pub fn compute_stats(original: &str, result: &str) -> CompressionStats {
    let original_size = original.len();
    let result_size = result.len();

    let ratio = if original.is_empty() || result.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let saved = (original_size as f64 - result_size as f64) / original_size as f64;
        saved * 100.0
    };

    CompressionStats {
        original_size,
        result_size,
        ratio_percent: format!("{ratio:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_compression() {
        let stats = compute_stats("aaaa", "aa");
        assert_eq!(stats.original_size, 4);
        assert_eq!(stats.result_size, 2);
        assert_eq!(stats.ratio_percent, "50.00");
    }

    #[test]
    fn test_no_compression() {
        let stats = compute_stats("abc", "abc");
        assert_eq!(stats.ratio_percent, "0.00");
    }

    #[test]
    fn test_empty_original() {
        let stats = compute_stats("", "aa");
        assert_eq!(stats.original_size, 0);
        assert_eq!(stats.ratio_percent, "0.00");
    }

    #[test]
    fn test_empty_result() {
        let stats = compute_stats("aaaa", "");
        assert_eq!(stats.result_size, 0);
        assert_eq!(stats.ratio_percent, "0.00");
    }

    #[test]
    fn test_growth_is_negative() {
        let stats = compute_stats("ab", "abcd");
        assert_eq!(stats.ratio_percent, "-100.00");
    }

    #[test]
    fn test_sizes_are_bytes_not_chars() {
        // "é" is two bytes in UTF-8
        let stats = compute_stats("éé", "é");
        assert_eq!(stats.original_size, 4);
        assert_eq!(stats.result_size, 2);
        assert_eq!(stats.ratio_percent, "50.00");
    }

    #[test]
    fn test_fractional_ratio() {
        let stats = compute_stats("abc", "ab");
        assert_eq!(stats.ratio_percent, "33.33");
    }
}

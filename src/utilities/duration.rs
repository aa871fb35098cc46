//! Spoken-narration duration estimates.

/// Default narration rate.
pub const WORDS_PER_MINUTE: u32 = 150;

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated spoken duration of `text` in whole seconds at 150 wpm.
pub fn estimate_duration(text: &str) -> u32 {
    estimate_duration_at(text, WORDS_PER_MINUTE)
}

/// Estimated spoken duration of `text` in whole seconds at the given rate.
///
/// Rounds half up, using integer arithmetic so the result is exact:
/// `round(words * 60 / wpm) == (words * 120 + wpm) / (2 * wpm)`.
/// A rate of zero falls back to [`WORDS_PER_MINUTE`].
pub fn estimate_duration_at(text: &str, words_per_minute: u32) -> u32 {
    let wpm = u64::from(if words_per_minute == 0 {
        WORDS_PER_MINUTE
    } else {
        words_per_minute
    });
    let words = word_count(text) as u64;
    let seconds = (words * 120 + wpm) / (2 * wpm);
    u32::try_from(seconds).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("  Close   your\teyes\nand breathe.  "), 5);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
    }

    #[test]
    fn test_estimate_duration_examples() {
        assert_eq!(estimate_duration("Close your eyes and breathe."), 2);
        assert_eq!(estimate_duration(""), 0);
        // 1 word = 0.4s
        assert_eq!(estimate_duration("Breathe."), 0);
        // 2 words = 0.8s
        assert_eq!(estimate_duration("Breathe in."), 1);
        // 150 words = 60s
        assert_eq!(estimate_duration(&"word ".repeat(150)), 60);
    }

    #[test]
    fn test_round_half_up() {
        // 1 word at 120 wpm = 0.5s
        assert_eq!(estimate_duration_at("one", 120), 1);
        // 3 words at 120 wpm = 1.5s
        assert_eq!(estimate_duration_at("one two three", 120), 2);
        // 1 word at 40 wpm = 1.5s
        assert_eq!(estimate_duration_at("one", 40), 2);
    }

    #[test]
    fn test_zero_rate_uses_default() {
        assert_eq!(
            estimate_duration_at("Close your eyes and breathe.", 0),
            estimate_duration("Close your eyes and breathe.")
        );
    }

    #[test]
    fn test_duration_monotonic_in_word_count() {
        let mut previous = 0;
        for words in 0..400 {
            let text = "word ".repeat(words);
            let duration = estimate_duration(&text);
            assert!(duration >= previous, "dropped at {} words", words);
            previous = duration;
        }
    }
}

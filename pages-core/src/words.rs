//! Word counting.
//!
//! Every component that reports or gates on a word count goes through
//! [`count_words`]; divergent counting between the editor, the store and the
//! streak would make completion undecidable.

/// Words required to complete a day.
pub const DAILY_GOAL: usize = 750;

/// Word-count thresholds that fire a one-time notification per session,
/// ascending. The last one is the daily goal.
pub const MILESTONES: [usize; 3] = [250, 500, 750];

/// Counts non-empty whitespace-separated tokens.
///
/// Leading/trailing whitespace is ignored and runs of whitespace (including
/// newlines) count as a single separator.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_zero() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("\n\t\n"), 0);
    }

    #[test]
    fn whitespace_runs_are_one_separator() {
        assert_eq!(count_words("a  b\n\nc"), 3);
        assert_eq!(count_words("  leading and trailing  "), 3);
    }

    #[test]
    fn single_word() {
        assert_eq!(count_words("hello"), 1);
    }

    #[test]
    fn goal_is_last_milestone() {
        assert_eq!(MILESTONES.last(), Some(&DAILY_GOAL));
    }
}

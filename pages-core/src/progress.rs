use chrono::NaiveDate;

/// Position in the writing program, 1-indexed over 7-day weeks.
/// Purely informational; plays no part in streak or completion logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramProgress {
    pub week: u32,
    pub day: u32,
}

/// Computes the week/day from the gap between the first-ever entry and today.
/// A `today` before `first_entry` clamps to week 1, day 1.
pub fn program_progress(first_entry: NaiveDate, today: NaiveDate) -> ProgramProgress {
    let gap = (today - first_entry).num_days().max(0) as u32;
    ProgramProgress {
        week: gap / 7 + 1,
        day: gap % 7 + 1,
    }
}

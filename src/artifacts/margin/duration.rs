//! Relative durations
//!
//! A duration is rendered in the coarsest unit it fills at least once,
//! walking a table ordered from the longest unit down to seconds.

use derive_new::new;

pub const SECONDS_PER_YEAR: u64 = 31_556_952;
pub const SECONDS_PER_MONTH: u64 = 2_629_746;
pub const SECONDS_PER_WEEK: u64 = 604_800;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Width of the right-aligned count column
pub const COUNT_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DurationUnit {
    pub abbreviation: char,
    pub singular: String,
    pub plural: String,
    pub seconds: u64,
}

impl DurationUnit {
    pub fn label(&self, count: u64) -> &str {
        if count == 1 {
            &self.singular
        } else {
            &self.plural
        }
    }

    pub fn label_width(&self) -> usize {
        self.singular
            .chars()
            .count()
            .max(self.plural.chars().count())
    }
}

pub fn default_duration_table() -> Vec<DurationUnit> {
    [
        ('Y', "year", "years", SECONDS_PER_YEAR),
        ('M', "month", "months", SECONDS_PER_MONTH),
        ('w', "week", "weeks", SECONDS_PER_WEEK),
        ('d', "day", "days", SECONDS_PER_DAY),
        ('h', "hour", "hours", SECONDS_PER_HOUR),
        ('m', "minute", "minutes", SECONDS_PER_MINUTE),
        ('s', "second", "seconds", 1),
    ]
    .into_iter()
    .map(|(abbreviation, singular, plural, seconds)| {
        DurationUnit::new(abbreviation, singular.into(), plural.into(), seconds)
    })
    .collect()
}

/// Longest singular or plural label in the table
pub fn longest_label(table: &[DurationUnit]) -> usize {
    table
        .iter()
        .map(DurationUnit::label_width)
        .max()
        .unwrap_or(0)
}

/// Pick the unit `seconds` is rendered in and the rounded count
///
/// Returns the index of the unit in `table`; `None` only for an empty table.
pub fn resolve_duration(seconds: u64, table: &[DurationUnit]) -> Option<(usize, u64)> {
    fn select(seconds: u64, table: &[DurationUnit], index: usize) -> Option<(usize, u64)> {
        match table {
            [] => None,
            [unit, rest @ ..] => {
                let weight = unit.seconds.max(1);
                if rest.is_empty() || seconds >= weight {
                    Some((index, (seconds + weight / 2) / weight))
                } else {
                    select(seconds, rest, index + 1)
                }
            }
        }
    }

    select(seconds, table, 0)
}

/// Render `seconds` as a short human duration
///
/// With `unit_width == 1` the count is followed by the unit abbreviation
/// (`"  3d"`); otherwise by the pluralized label padded to `unit_width`
/// (`"  3 days   "`).
pub fn format_duration(seconds: u64, table: &[DurationUnit], unit_width: usize) -> String {
    let Some((index, count)) = resolve_duration(seconds, table) else {
        return String::new();
    };
    let unit = &table[index];

    if unit_width == 1 {
        format!("{count:>COUNT_WIDTH$}{}", unit.abbreviation)
    } else {
        format!("{count:>COUNT_WIDTH$} {:<unit_width$}", unit.label(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> Vec<DurationUnit> {
        default_duration_table()
    }

    #[rstest]
    #[case(0, "  0s")]
    #[case(1, "  1s")]
    #[case(59, " 59s")]
    #[case(60, "  1m")]
    #[case(89, "  1m")]
    #[case(90, "  2m")]
    #[case(3 * SECONDS_PER_DAY, "  3d")]
    #[case(2 * SECONDS_PER_WEEK, "  2w")]
    #[case(5 * SECONDS_PER_YEAR, "  5Y")]
    fn abbreviated_durations(table: Vec<DurationUnit>, #[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_duration(seconds, &table, 1), expected);
    }

    #[rstest]
    #[case(1, "  1 second ")]
    #[case(2, "  2 seconds")]
    #[case(SECONDS_PER_HOUR, "  1 hour   ")]
    #[case(7 * SECONDS_PER_HOUR, "  7 hours  ")]
    #[case(3 * SECONDS_PER_MONTH, "  3 months ")]
    fn full_durations(table: Vec<DurationUnit>, #[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_duration(seconds, &table, 7), expected);
    }

    #[rstest]
    fn zero_uses_the_finest_unit(table: Vec<DurationUnit>) {
        assert_eq!(resolve_duration(0, &table), Some((table.len() - 1, 0)));
    }

    #[rstest]
    fn longest_default_label_is_seven(table: Vec<DurationUnit>) {
        assert_eq!(longest_label(&table), 7);
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(format_duration(42, &[], 1), "");
    }

    proptest! {
        #[test]
        fn prop_rendering_grows_with_age(a in 0u64..400_000_000, b in 0u64..400_000_000) {
            let table = default_duration_table();
            let (younger, older) = if a <= b { (a, b) } else { (b, a) };
            let (younger_unit, younger_count) = resolve_duration(younger, &table).unwrap();
            let (older_unit, older_count) = resolve_duration(older, &table).unwrap();

            // lower index means a coarser unit
            prop_assert!(
                older_unit < younger_unit
                    || (older_unit == younger_unit && older_count >= younger_count)
            );
        }

        #[test]
        fn prop_abbreviated_width_is_fixed(seconds in 0u64..30 * SECONDS_PER_YEAR) {
            let rendered = format_duration(seconds, &default_duration_table(), 1);
            prop_assert_eq!(rendered.chars().count(), 4);
        }
    }
}

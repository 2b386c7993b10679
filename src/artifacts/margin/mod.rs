//! Side-margin annotations
//!
//! - `duration`: relative-age rendering over a unit table
//! - `annotator`: fixed-width author + age strings
//!
//! A margin is a side channel keyed by line position. Lines declare what
//! they want in it through [`MarginSource`]; the annotator turns that into
//! text once the wash pass is done.

pub mod annotator;
pub mod duration;

use crate::artifacts::margin::duration::{DurationUnit, default_duration_table, longest_label};
use crate::errors::MarginConfigError;
use anyhow::Context;

pub const DEFAULT_MARGIN_WIDTH: usize = 28;
pub const ELLIPSIS: char = '…';

const MARGIN_WIDTH_ENV: &str = "LOGWASH_MARGIN_WIDTH";
const UNIT_WIDTH_ENV: &str = "LOGWASH_UNIT_WIDTH";

/// What a rendered line wants displayed in its margin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarginSource {
    /// No margin at all
    #[default]
    None,
    /// Blank filler, for lines without an author or date of their own
    Filler,
    Author {
        author: Option<String>,
        timestamp: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginSpec {
    total_width: usize,
    unit_width: usize,
    duration_table: Vec<DurationUnit>,
}

impl MarginSpec {
    pub fn try_new(
        total_width: usize,
        unit_width: usize,
        duration_table: Vec<DurationUnit>,
    ) -> Result<Self, MarginConfigError> {
        validate_table(&duration_table)?;

        let expected = longest_label(&duration_table);
        if unit_width != 1 && unit_width != expected {
            return Err(MarginConfigError::UnitWidth {
                given: unit_width,
                expected,
            });
        }

        Ok(MarginSpec {
            total_width,
            unit_width,
            duration_table,
        })
    }

    /// Default table with single-character units
    pub fn abbreviated(total_width: usize) -> Self {
        MarginSpec {
            total_width,
            unit_width: 1,
            duration_table: default_duration_table(),
        }
    }

    /// Default table with full unit labels
    pub fn full(total_width: usize) -> Self {
        let duration_table = default_duration_table();
        MarginSpec {
            total_width,
            unit_width: longest_label(&duration_table),
            duration_table,
        }
    }

    /// Read width overrides from the environment on top of the defaults
    ///
    /// `LOGWASH_MARGIN_WIDTH` sets the total width, `LOGWASH_UNIT_WIDTH`
    /// selects `abbreviated` (or `1`) or `full` unit labels.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let mut spec = MarginSpec::default();

        if let Ok(width) = std::env::var(MARGIN_WIDTH_ENV) {
            spec.total_width = width
                .trim()
                .parse()
                .with_context(|| format!("{MARGIN_WIDTH_ENV} is not a width: {width:?}"))?;
        }
        if let Ok(unit) = std::env::var(UNIT_WIDTH_ENV) {
            spec = match unit.trim() {
                "1" | "abbreviated" => MarginSpec::abbreviated(spec.total_width),
                "full" => MarginSpec::full(spec.total_width),
                other => anyhow::bail!("{UNIT_WIDTH_ENV} must be 'abbreviated' or 'full', got {other:?}"),
            };
        }

        Ok(spec)
    }

    pub fn with_total_width(self, total_width: usize) -> Self {
        MarginSpec {
            total_width,
            ..self
        }
    }

    pub fn total_width(&self) -> usize {
        self.total_width
    }

    pub fn unit_width(&self) -> usize {
        self.unit_width
    }

    pub fn duration_table(&self) -> &[DurationUnit] {
        &self.duration_table
    }

    /// Width of a rendered duration: three count digits plus the unit
    pub fn duration_width(&self) -> usize {
        if self.unit_width == 1 {
            duration::COUNT_WIDTH + 1
        } else {
            duration::COUNT_WIDTH + 1 + self.unit_width
        }
    }

    /// Narrowest margin that still shows a whole duration and its glyph column
    pub fn minimum_width(&self) -> usize {
        self.duration_width() + 1
    }

    pub fn check_width(&self) -> Result<(), MarginConfigError> {
        if self.total_width < self.minimum_width() {
            return Err(MarginConfigError::TruncationOverflow {
                given: self.total_width,
                minimum: self.minimum_width(),
            });
        }
        Ok(())
    }
}

impl Default for MarginSpec {
    fn default() -> Self {
        MarginSpec::full(DEFAULT_MARGIN_WIDTH)
    }
}

fn validate_table(table: &[DurationUnit]) -> Result<(), MarginConfigError> {
    let finest = table.last().ok_or(MarginConfigError::EmptyTable)?;

    if let Some(pair) = table
        .windows(2)
        .find(|pair| pair[0].seconds <= pair[1].seconds)
    {
        return Err(MarginConfigError::NotDescending {
            previous: pair[0].seconds,
            next: pair[1].seconds,
        });
    }
    if finest.seconds != 1 {
        return Err(MarginConfigError::FinestUnitNotSecond(finest.seconds));
    }

    Ok(())
}

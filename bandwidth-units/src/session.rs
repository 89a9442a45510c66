//! Front-end session: the state behind a screen of twelve linked fields
//!
//! A session owns the precision setting and the text of every field. Editing
//! one field recomputes the other eleven; the edited field keeps what the
//! user typed.

use bandwidth_core::{InputError, Precision};
use chrono::NaiveDateTime;
use tracing::debug;
use crate::{Conversions, SpeedUnit, parse, convert_formatted};

const REPORT_TITLE: &str = "=== Bandwidth Calculator Results ===";

/// Result of an edit or precision change
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All fields were recomputed
    Updated(Conversions<String>),
    /// Input was blank, every field was emptied
    Cleared,
    /// Input was rejected; other fields keep their previous text
    Rejected(InputError),
}

#[derive(Debug, Clone)]
pub struct Session {
    precision: Precision,
    active: SpeedUnit,
    fields: Conversions<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_precision(Precision::default())
    }

    pub fn with_precision(precision: Precision) -> Self {
        Session {
            precision,
            active: SpeedUnit::MegabitPerSecond,
            fields: Conversions::default(),
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The unit the user last focused or edited
    pub fn active_unit(&self) -> SpeedUnit {
        self.active
    }

    pub fn fields(&self) -> &Conversions<String> {
        &self.fields
    }

    pub fn focus(&mut self, unit: SpeedUnit) {
        self.active = unit;
    }

    /// Replace the text of `unit`'s field and recompute the others
    pub fn edit(&mut self, unit: SpeedUnit, raw: &str) -> Outcome {
        self.active = unit;
        self.fields[unit] = raw.to_string();

        if raw.trim().is_empty() {
            self.reset();
            return Outcome::Cleared;
        }

        match parse(raw, unit) {
            Ok(value) => self.refresh(value),
            Err(e) => {
                debug!(%unit, kind = %e.kind, "input rejected");
                Outcome::Rejected(e)
            }
        }
    }

    /// Change precision (clamped to 1..=10) and recompute if the active
    /// field holds a valid value
    pub fn set_precision(&mut self, digits: i64) -> Option<Outcome> {
        self.precision = Precision::clamped(digits);
        debug!(precision = %self.precision, "precision changed");

        parse(&self.fields[self.active], self.active)
            .ok()
            .map(|value| self.refresh(value))
    }

    /// Empty every field
    pub fn reset(&mut self) {
        self.fields = Conversions::default();
    }

    /// Plain-text summary of every non-empty field
    pub fn report(&self, generated: NaiveDateTime) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", REPORT_TITLE));
        out.push_str(&format!("Generated: {}\n", generated.format("%Y-%m-%d %H:%M:%S")));
        out.push_str(&format!("Precision: {} decimal places\n", self.precision));
        out.push('\n');

        for (unit, text) in self.fields.iter() {
            if !text.trim().is_empty() {
                out.push_str(&format!("{}: {}\n", unit.identifier(), text));
            }
        }

        out
    }

    fn refresh(&mut self, value: f64) -> Outcome {
        let formatted = convert_formatted(value, self.active, self.precision);
        for (unit, text) in formatted.iter() {
            if unit != self.active {
                self.fields[unit] = text.clone();
            }
        }
        Outcome::Updated(self.fields.clone())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

//! Line cursor and extraction rules.
//!
//! Receipt fields are found in two ways. Positional fields sit a fixed number
//! of lines away from a label line ([`LineRule`]). Inline fields are printed
//! with their label glued on and are captured by regex ([`InlineRule`]). Both
//! kinds carry [`Guard`]s: the same rule that reads real data also fires on
//! header or disclaimer text on some receipts, and the guards reject those
//! readings.

use regex::Regex;
use tracing::trace;

use super::rules::patterns::{ALL_DIGITS, LINE_ITEM_PREFIX};

/// Ordered view over the lines of a receipt.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n').collect(),
        }
    }

    /// The full text the cursor walks.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Index of the first line whose trimmed content equals `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.trim() == label)
    }

    /// Trimmed line at `index`, if it exists and is not blank.
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines
            .get(index)
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
    }

    /// Read the value a rule points at.
    pub fn read(&self, rule: &LineRule) -> Option<&'a str> {
        let anchor = self.position(rule.label)?;
        let index = match rule.offset {
            Offset::Before => anchor.checked_sub(1)?,
            Offset::After(n) => anchor + n,
        };

        let value = self.line(index)?;
        if !accepted(rule.guards, value) {
            trace!("{}: guard rejected {:?}", rule.field, value);
            return None;
        }
        Some(value)
    }

    /// Capture the value of an inline rule.
    pub fn capture(&self, rule: &InlineRule) -> Option<&'a str> {
        rule.capture(self.text)
    }
}

/// Where a value sits relative to its label line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// The line directly above the label.
    Before,
    /// `n` lines below the label.
    After(usize),
}

/// Condition a candidate value must satisfy to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Reject a value equal to this literal.
    NotEqual(&'static str),
    /// Reject a value starting with this literal.
    NotPrefixed(&'static str),
    /// Reject a value containing this literal.
    NotContaining(&'static str),
    /// Accept only a purely numeric value.
    AllDigits,
    /// Reject a value that looks like a fust line.
    NotLineItem,
}

impl Guard {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::NotEqual(literal) => value != *literal,
            Self::NotPrefixed(literal) => !value.starts_with(literal),
            Self::NotContaining(literal) => !value.contains(literal),
            Self::AllDigits => ALL_DIGITS.is_match(value),
            Self::NotLineItem => !LINE_ITEM_PREFIX.is_match(value),
        }
    }
}

/// A value read at a fixed offset from a label line.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    /// Field the rule fills, for diagnostics.
    pub field: &'static str,
    pub label: &'static str,
    pub offset: Offset,
    pub guards: &'static [Guard],
}

impl LineRule {
    pub const fn new(field: &'static str, label: &'static str, offset: Offset) -> Self {
        Self {
            field,
            label,
            offset,
            guards: &[],
        }
    }

    pub const fn guarded(mut self, guards: &'static [Guard]) -> Self {
        self.guards = guards;
        self
    }
}

/// A value captured by the first match of a pattern whose group 1 holds it.
#[derive(Debug, Clone, Copy)]
pub struct InlineRule {
    /// Field the rule fills, for diagnostics.
    pub field: &'static str,
    pub pattern: &'static Regex,
    pub guards: &'static [Guard],
}

impl InlineRule {
    pub fn new(field: &'static str, pattern: &'static Regex) -> Self {
        Self {
            field,
            pattern,
            guards: &[],
        }
    }

    pub fn guarded(mut self, guards: &'static [Guard]) -> Self {
        self.guards = guards;
        self
    }

    /// Only the first match counts; a guarded first match means no value.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(1)?.as_str().trim();

        if value.is_empty() {
            return None;
        }
        if !accepted(self.guards, value) {
            trace!("{}: guard rejected {:?}", self.field, value);
            return None;
        }
        Some(value)
    }
}

fn accepted(guards: &[Guard], value: &str) -> bool {
    guards.iter().all(|guard| guard.accepts(value))
}

//! Section cursor for the three-panel form

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of sections in the form
pub const TOTAL_SECTIONS: u8 = 3;

/// One of the form's sequential panels, always within `1..=TOTAL_SECTIONS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Section(u8);

impl Section {
    pub const FIRST: Section = Section(1);
    pub const LAST: Section = Section(TOTAL_SECTIONS);

    /// Create a section, clamping into the valid range
    pub fn new(number: u8) -> Self {
        Section(number.clamp(1, TOTAL_SECTIONS))
    }

    /// 1-based section number
    pub fn number(self) -> u8 {
        self.0
    }

    /// Following section, clamped at the last one
    pub fn next(self) -> Self {
        Section::new(self.0.saturating_add(1))
    }

    /// Preceding section, clamped at the first one
    pub fn prev(self) -> Self {
        Section::new(self.0.saturating_sub(1))
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Progress bar width: `current / total * 100`
    pub fn progress_percent(self) -> f64 {
        f64::from(self.0) / f64::from(TOTAL_SECTIONS) * 100.0
    }

    /// All sections in order
    pub fn all() -> impl Iterator<Item = Section> {
        (1..=TOTAL_SECTIONS).map(Section)
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u8> for Section {
    fn from(number: u8) -> Self {
        Section::new(number)
    }
}

impl From<Section> for u8 {
    fn from(section: Section) -> Self {
        section.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, TOTAL_SECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_clamps_at_last() {
        assert_eq!(Section::FIRST.next(), Section::new(2));
        assert_eq!(Section::new(2).next(), Section::LAST);
        assert_eq!(Section::LAST.next(), Section::LAST);
    }

    #[test]
    fn test_prev_clamps_at_first() {
        assert_eq!(Section::LAST.prev(), Section::new(2));
        assert_eq!(Section::FIRST.prev(), Section::FIRST);
    }

    #[test]
    fn test_new_clamps_out_of_range() {
        assert_eq!(Section::new(0), Section::FIRST);
        assert_eq!(Section::new(9), Section::LAST);
    }

    #[test]
    fn test_progress_percent() {
        assert!((Section::FIRST.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
        assert!((Section::new(2).progress_percent() - 200.0 / 3.0).abs() < 1e-9);
        assert!((Section::LAST.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Section::new(2)).unwrap();
        assert_eq!(json, "2");
        let back: Section = serde_json::from_str("7").unwrap();
        assert_eq!(back, Section::LAST);
    }
}

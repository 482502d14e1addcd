//! Star rating groups

use super::schema::{FieldKind, DEFAULT_RATING_MAX};

/// Parse a star value as stored in FormState ("1".."5")
pub fn parse_rating(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok()
}

/// Filled state for stars `1..=stars`: star `p` is filled iff `p <= rating`.
///
/// The comparison is numeric, so "10" sorts after "9".
pub fn highlight(rating: Option<u8>, stars: u8) -> Vec<bool> {
    (1..=stars)
        .map(|position| rating.is_some_and(|r| position <= r))
        .collect()
}

/// Hover and commit state of one star group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingControl {
    stars: u8,
    committed: Option<u8>,
    hovered: Option<u8>,
}

impl RatingControl {
    pub fn new(stars: u8) -> Self {
        Self {
            stars,
            committed: None,
            hovered: None,
        }
    }

    /// Control sized for a rating field kind
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Rating { max, .. } => Self::new(*max),
            _ => Self::new(DEFAULT_RATING_MAX),
        }
    }

    pub fn stars(&self) -> u8 {
        self.stars
    }

    pub fn committed(&self) -> Option<u8> {
        self.committed
    }

    pub fn hovered(&self) -> Option<u8> {
        self.hovered
    }

    /// Preview a value under the pointer
    pub fn hover(&mut self, value: u8) -> Vec<bool> {
        self.hovered = Some(value);
        highlight(Some(value), self.stars)
    }

    /// Pointer left the group: show the committed value, or nothing
    pub fn leave(&mut self) -> Vec<bool> {
        self.hovered = None;
        highlight(self.committed, self.stars)
    }

    /// Check a star
    pub fn commit(&mut self, value: u8) -> Vec<bool> {
        self.committed = Some(value);
        highlight(self.committed, self.stars)
    }

    /// Stars currently shown
    pub fn display(&self) -> Vec<bool> {
        highlight(self.hovered.or(self.committed), self.stars)
    }
}

//! Fixed delays used by the controller

use std::time::Duration;

/// Delays the controller attaches to effects and timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTimings {
    /// Wait between a successful submit and following its redirect
    pub redirect_delay: Duration,
    /// Toast lifetime before auto-dismiss
    pub toast_duration: Duration,
    /// Shake animation length on invalid fields
    pub shake_duration: Duration,
    /// Outgoing section fade before it is hidden
    pub section_hide: Duration,
    /// Delay before the incoming section fades in
    pub section_fade_in: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            redirect_delay: Duration::from_millis(3000),
            toast_duration: Duration::from_millis(5000),
            shake_duration: Duration::from_millis(500),
            section_hide: Duration::from_millis(300),
            section_fade_in: Duration::from_millis(50),
        }
    }
}

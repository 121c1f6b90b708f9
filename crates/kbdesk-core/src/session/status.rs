use std::time::{Duration, Instant};

/// Lifecycle of the status banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    Idle,
    /// Persists until the triggering request settles
    Loading(String),
    /// Reverts to idle after the timeout
    Success(String),
    /// Reverts to idle after the timeout
    Error(String),
}

/// Transient banner reporting request progress: idle → loading → success/error → idle
#[derive(Debug, Clone)]
pub struct StatusBanner {
    state: StatusState,
    shown_at: Option<Instant>,
    timeout: Duration,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl StatusBanner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: StatusState::Idle,
            shown_at: None,
            timeout,
        }
    }

    pub fn state(&self) -> &StatusState {
        &self.state
    }

    /// Message currently on display
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            StatusState::Idle => None,
            StatusState::Loading(m) | StatusState::Success(m) | StatusState::Error(m) => Some(m),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state != StatusState::Idle
    }

    pub fn loading(&mut self, message: impl Into<String>) {
        self.show(StatusState::Loading(message.into()), Instant::now());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(StatusState::Success(message.into()), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(StatusState::Error(message.into()), Instant::now());
    }

    /// Set a state as of `now`
    pub fn show(&mut self, state: StatusState, now: Instant) {
        self.shown_at = match state {
            StatusState::Idle => None,
            _ => Some(now),
        };
        self.state = state;
    }

    pub fn hide(&mut self) {
        self.state = StatusState::Idle;
        self.shown_at = None;
    }

    /// Expire a success/error message whose timeout has elapsed.
    /// Returns true if the banner changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = match (&self.state, self.shown_at) {
            (StatusState::Success(_) | StatusState::Error(_), Some(shown_at)) => {
                now.saturating_duration_since(shown_at) >= self.timeout
            }
            _ => false,
        };
        if expired {
            self.hide();
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_persists_past_timeout() {
        let start = Instant::now();
        let mut banner = StatusBanner::new(Duration::from_secs(5));
        banner.show(StatusState::Loading("Loading articles...".into()), start);

        assert!(!banner.tick(start + Duration::from_secs(60)));
        assert_eq!(banner.message(), Some("Loading articles..."));
    }

    #[test]
    fn test_success_and_error_expire() {
        let start = Instant::now();
        let mut banner = StatusBanner::new(Duration::from_secs(5));

        banner.show(StatusState::Success("done".into()), start);
        assert!(!banner.tick(start + Duration::from_secs(4)));
        assert!(banner.is_visible());
        assert!(banner.tick(start + Duration::from_secs(5)));
        assert_eq!(banner.state(), &StatusState::Idle);

        banner.show(StatusState::Error("Error: nope".into()), start);
        assert!(banner.tick(start + Duration::from_secs(6)));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_new_message_restarts_timer() {
        let start = Instant::now();
        let mut banner = StatusBanner::new(Duration::from_secs(5));
        banner.show(StatusState::Success("first".into()), start);
        banner.show(StatusState::Error("second".into()), start + Duration::from_secs(4));

        assert!(!banner.tick(start + Duration::from_secs(6)));
        assert_eq!(banner.message(), Some("second"));
    }
}

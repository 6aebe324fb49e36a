//! Transient submission banner
//!
//! The banner has its own clock: each `show` hands out a ticket, and the host
//! expires that ticket after [`NOTIFICATION_TIMEOUT_MS`]. Showing a newer
//! outcome supersedes older tickets, so a stale timer never clears a newer
//! banner.

use super::submission::SubmissionOutcome;

/// Lifetime of a shown outcome
pub const NOTIFICATION_TIMEOUT_MS: u32 = 4000;

/// Handle of one `show` call, redeemed by `expire`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Banner text for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationMessage {
    pub severity: Severity,
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    current: Option<SubmissionOutcome>,
    generation: u64,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, outcome: SubmissionOutcome) -> NotificationTicket {
        self.generation += 1;
        self.current = Some(outcome);
        NotificationTicket(self.generation)
    }

    /// Clear the banner if `ticket` belongs to the latest `show`.
    /// Returns whether the banner was cleared.
    pub fn expire(&mut self, ticket: NotificationTicket) -> bool {
        if ticket.0 != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    /// Whether `ticket` belongs to the banner on screen
    pub fn is_current(&self, ticket: NotificationTicket) -> bool {
        ticket.0 == self.generation && self.current.is_some()
    }

    pub fn current(&self) -> Option<SubmissionOutcome> {
        self.current
    }

    pub fn message(&self) -> Option<NotificationMessage> {
        self.current.map(|outcome| match outcome {
            SubmissionOutcome::Pending => NotificationMessage {
                severity: Severity::Info,
                title: "Sending",
                text: "Your registration is being sent",
            },
            SubmissionOutcome::Success => NotificationMessage {
                severity: Severity::Success,
                title: "Success",
                text: "You registered successfully",
            },
            SubmissionOutcome::Failure => NotificationMessage {
                severity: Severity::Error,
                title: "Error",
                text: "Your registration failed",
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_clears_current_banner() {
        let mut banner = Notification::new();
        let ticket = banner.show(SubmissionOutcome::Failure);
        assert_eq!(banner.message().map(|m| m.severity), Some(Severity::Error));

        assert!(banner.expire(ticket));
        assert_eq!(banner.current(), None);
        assert!(!banner.expire(ticket));
    }

    #[test]
    fn test_stale_ticket_does_not_clear_newer_banner() {
        let mut banner = Notification::new();
        let first = banner.show(SubmissionOutcome::Failure);
        let second = banner.show(SubmissionOutcome::Success);

        assert!(!banner.expire(first));
        assert_eq!(banner.current(), Some(SubmissionOutcome::Success));
        assert!(banner.expire(second));
    }

    #[test]
    fn test_is_current_tracks_latest_show() {
        let mut banner = Notification::new();
        let pending = banner.show(SubmissionOutcome::Pending);
        assert!(banner.is_current(pending));

        let outcome = banner.show(SubmissionOutcome::Success);
        assert!(!banner.is_current(pending));
        assert!(banner.is_current(outcome));

        banner.expire(outcome);
        assert!(!banner.is_current(outcome));
    }
}

/// Transient user-visible status messages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Status {
        Status {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Status {
        Status {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Status {
        Status {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// The status on screen and the ticket of the timer allowed to clear it
///
/// Every `show` issues a new ticket, so an expiry scheduled for an older
/// status is ignored once a newer one has replaced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSlot {
    current: Option<Status>,
    ticket: u64,
}

impl StatusSlot {
    pub fn current(&self) -> Option<&Status> {
        self.current.as_ref()
    }

    /// Replace the visible status and return the ticket for its expiry
    pub fn show(&mut self, status: Status) -> u64 {
        self.ticket = self.ticket.wrapping_add(1);
        self.current = Some(status);
        self.ticket
    }

    /// Clear the status if `ticket` belongs to the one still showing
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }
}

use std::time::Duration;

use crate::Ticket;

/// Re-enable delay used when the server reply carries no usable timeout.
pub const DEFAULT_REENABLE_DELAY: Duration = Duration::from_millis(500);

/// Server-side maintenance commands, each behind its own UI control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlChannel {
    Reset,
    Flush,
}

impl ControlChannel {
    pub const ALL: [ControlChannel; 2] = [ControlChannel::Reset, ControlChannel::Flush];

    pub const fn path(self) -> &'static str {
        match self {
            ControlChannel::Reset => "reset",
            ControlChannel::Flush => "flush",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPhase {
    #[default]
    Enabled,
    InFlight {
        ticket: Ticket,
    },
    /// Request answered; waiting for the server-specified delay to pass.
    CoolingDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ControlSwitch {
    phase: ControlPhase,
    last_ticket: Ticket,
}

impl ControlSwitch {
    pub(crate) fn phase(&self) -> ControlPhase {
        self.phase
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.phase == ControlPhase::Enabled
    }

    pub(crate) fn begin(&mut self) -> Option<Ticket> {
        if !self.is_enabled() {
            return None;
        }
        self.last_ticket += 1;
        self.phase = ControlPhase::InFlight {
            ticket: self.last_ticket,
        };
        Some(self.last_ticket)
    }

    pub(crate) fn complete(&mut self, ticket: Ticket) -> bool {
        match self.phase {
            ControlPhase::InFlight { ticket: current } if current == ticket => {
                self.phase = ControlPhase::CoolingDown;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn reenable(&mut self) -> bool {
        if self.phase == ControlPhase::CoolingDown {
            self.phase = ControlPhase::Enabled;
            true
        } else {
            false
        }
    }
}

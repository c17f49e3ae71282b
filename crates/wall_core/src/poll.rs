/// How the next content poll gets scheduled. Both behaviours exist in deployed clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReschedulePolicy {
    /// One-shot timer armed after a successful fetch, when polling becomes
    /// active, on interval change and on a manual fetch. Errors do not re-arm.
    #[default]
    AfterSuccess,
    /// Every completion, success or error, schedules the next poll while active.
    Always,
}

/// Identifies one issued request so a completion that outlived an abort can be told apart.
pub type Ticket = u64;

/// Identifies one arming of the poll timer; firings of replaced timers are ignored.
pub type TimerGeneration = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    InFlight {
        ticket: Ticket,
    },
}

/// Single-flight bookkeeping for the content channel plus its timer slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PollController {
    phase: PollPhase,
    last_ticket: Ticket,
    timer: Option<TimerGeneration>,
    last_generation: TimerGeneration,
}

impl PollController {
    pub(crate) fn phase(&self) -> PollPhase {
        self.phase
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        matches!(self.phase, PollPhase::InFlight { .. })
    }

    /// Returns `None` when a request is already outstanding.
    pub(crate) fn begin(&mut self) -> Option<Ticket> {
        if self.is_in_flight() {
            return None;
        }
        self.last_ticket += 1;
        self.phase = PollPhase::InFlight {
            ticket: self.last_ticket,
        };
        Some(self.last_ticket)
    }

    /// Returns `false` for a completion that does not match the outstanding request.
    pub(crate) fn complete(&mut self, ticket: Ticket) -> bool {
        match self.phase {
            PollPhase::InFlight { ticket: current } if current == ticket => {
                self.phase = PollPhase::Idle;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn abort(&mut self) -> Option<Ticket> {
        match std::mem::take(&mut self.phase) {
            PollPhase::InFlight { ticket } => Some(ticket),
            PollPhase::Idle => None,
        }
    }

    /// Replaces any armed timer.
    pub(crate) fn arm_timer(&mut self) -> TimerGeneration {
        self.last_generation += 1;
        self.timer = Some(self.last_generation);
        self.last_generation
    }

    pub(crate) fn disarm_timer(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Consumes the timer if `generation` is the armed one.
    pub(crate) fn take_timer(&mut self, generation: TimerGeneration) -> bool {
        if self.timer == Some(generation) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }
}

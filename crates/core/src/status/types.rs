/// Sentinel for "ticket is not in the queue".
pub const NOT_IN_QUEUE: i64 = -1;

/// Status of the tracked ticket, recomputed on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketStatus {
    /// The ticket has been called.
    Alerted,
    /// The ticket has been served. Terminal.
    Served,
    /// The ticket was called but the holder did not show up.
    Missed,
    /// The last poll failed.
    Error,
    /// Waiting in the queue.
    Pending,
    /// No poll has completed yet.
    #[default]
    Loading,
}

impl TicketStatus {
    /// Returns the string representation used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Alerted => "alerted",
            TicketStatus::Served => "served",
            TicketStatus::Missed => "missed",
            TicketStatus::Error => "error",
            TicketStatus::Pending => "pending",
            TicketStatus::Loading => "loading",
        }
    }
}

/// Something the user can do from a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Leave,
    Rejoin,
}

/// The single view shown for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketView {
    Alerted,
    Served,
    Skipped,
    NotFound,
    NextInQueue,
    InQueue { tickets_ahead: u32 },
    #[default]
    Loading,
}

impl TicketView {
    /// Resolve the view for a status and tickets-ahead count.
    ///
    /// First match wins:
    /// 1. alerted
    /// 2. served
    /// 3. missed, or the ticket is not in the queue (-1)
    /// 4. error
    /// 5. nobody ahead
    /// 6. someone ahead
    /// 7. otherwise still loading
    pub fn resolve(status: TicketStatus, tickets_ahead: Option<i64>) -> Self {
        match (status, tickets_ahead) {
            (TicketStatus::Alerted, _) => TicketView::Alerted,
            (TicketStatus::Served, _) => TicketView::Served,
            (TicketStatus::Missed, _) | (_, Some(NOT_IN_QUEUE)) => TicketView::Skipped,
            (TicketStatus::Error, _) => TicketView::NotFound,
            (_, Some(0)) => TicketView::NextInQueue,
            (_, Some(n)) if n > 0 => TicketView::InQueue {
                tickets_ahead: u32::try_from(n).unwrap_or(u32::MAX),
            },
            _ => TicketView::Loading,
        }
    }

    /// Actions offered by this view.
    pub fn actions(&self) -> &'static [UserAction] {
        match self {
            TicketView::Alerted | TicketView::NextInQueue | TicketView::InQueue { .. } => {
                &[UserAction::Leave]
            }
            TicketView::Skipped => &[UserAction::Rejoin],
            TicketView::Served | TicketView::NotFound | TicketView::Loading => &[],
        }
    }

    pub fn allows(&self, action: UserAction) -> bool {
        self.actions().contains(&action)
    }

    /// Whether the ticket is waiting in line.
    pub fn is_in_queue(&self) -> bool {
        matches!(self, TicketView::NextInQueue | TicketView::InQueue { .. })
    }

    /// Returns the string representation used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketView::Alerted => "alerted",
            TicketView::Served => "served",
            TicketView::Skipped => "skipped",
            TicketView::NotFound => "not_found",
            TicketView::NextInQueue => "next_in_queue",
            TicketView::InQueue { .. } => "in_queue",
            TicketView::Loading => "loading",
        }
    }
}

//! Plain-text rendering of the ticket page.

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::client::TicketSnapshot;
use crate::status::{TicketView, UserAction};

/// The ticket page for one snapshot.
pub struct TicketPage<'a> {
    snapshot: &'a TicketSnapshot,
    wait_time_per_ticket_mins: u32,
}

impl<'a> TicketPage<'a> {
    pub fn new(snapshot: &'a TicketSnapshot, wait_time_per_ticket_mins: u32) -> Self {
        Self {
            snapshot,
            wait_time_per_ticket_mins,
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.snapshot.view == TicketView::NotFound {
            return Ok(());
        }
        if let Some(number) = &self.snapshot.ticket_number {
            writeln!(f, "#{}", number)?;
        }
        if self.snapshot.view.is_in_queue() {
            if let Some(info) = &self.snapshot.display_info {
                writeln!(f, "{}", info)?;
            }
        }
        writeln!(f)
    }

    fn write_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wait = self.wait_time_per_ticket_mins;
        match self.snapshot.view {
            TicketView::Alerted => {
                writeln!(f, "It's your turn!")?;
                writeln!(
                    f,
                    "Please make your way to the counter within {}.",
                    minutes(wait)
                )
            }
            TicketView::Served => {
                writeln!(f, "You have been served.")?;
                writeln!(f, "Thank you for waiting with us.")
            }
            TicketView::Skipped => {
                writeln!(f, "You missed your turn.")?;
                writeln!(f, "Your ticket is no longer in the queue.")
            }
            TicketView::NotFound => {
                writeln!(f, "Ticket not found.")?;
                writeln!(f, "Please join the queue again.")
            }
            TicketView::NextInQueue => {
                writeln!(f, "You're next in line.")?;
                writeln!(f, "Estimated wait: about {}.", minutes(wait))
            }
            TicketView::InQueue { tickets_ahead } => {
                writeln!(f, "{} ahead of you.", tickets_ahead)?;
                writeln!(
                    f,
                    "Estimated wait: about {}.",
                    minutes(tickets_ahead.saturating_mul(wait))
                )
            }
            TicketView::Loading => Ok(()),
        }
    }

    fn write_actions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in self.snapshot.view.actions() {
            match action {
                UserAction::Leave => writeln!(f, "  [leave]   Leave the queue")?,
                UserAction::Rejoin => writeln!(f, "  [rejoin]  Rejoin the queue")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for TicketPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        self.write_body(f)?;
        if !self.snapshot.view.actions().is_empty() {
            writeln!(f)?;
            self.write_actions(f)?;
        }
        writeln!(f)?;
        write!(
            f,
            "Last updated automatically at {}",
            self.snapshot
                .last_updated
                .map(format_last_updated)
                .unwrap_or_default()
        )
    }
}

/// Local wall-clock time in 12-hour form, e.g. "3:07 pm".
pub fn format_last_updated(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M %P").to_string()
}

fn minutes(n: u32) -> String {
    if n == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::TicketStatus;

    fn snapshot(status: TicketStatus, ahead: Option<i64>) -> TicketSnapshot {
        TicketSnapshot {
            ticket_id: Some("t-1".to_string()),
            queue_id: Some("q-1".to_string()),
            ticket_number: Some("42".to_string()),
            status,
            tickets_ahead: ahead,
            display_info: Some("Tan Ah Kow, 91234567".to_string()),
            last_updated: None,
            view: TicketView::resolve(status, ahead),
        }
    }

    fn render(snapshot: &TicketSnapshot) -> String {
        TicketPage::new(snapshot, 3).to_string()
    }

    #[test]
    fn test_in_queue_shows_count_and_estimate() {
        let page = render(&snapshot(TicketStatus::Pending, Some(3)));
        assert!(page.starts_with("#42\n"));
        assert!(page.contains("Tan Ah Kow, 91234567"));
        assert!(page.contains("3 ahead of you."));
        assert!(page.contains("about 9 minutes"));
        assert!(page.contains("[leave]"));
    }

    #[test]
    fn test_next_in_queue_uses_single_ticket_wait() {
        let page = render(&snapshot(TicketStatus::Pending, Some(0)));
        assert!(page.contains("You're next in line."));
        assert!(page.contains("about 3 minutes"));
    }

    #[test]
    fn test_skipped_offers_rejoin_only() {
        let page = render(&snapshot(TicketStatus::Pending, Some(-1)));
        assert!(page.contains("You missed your turn."));
        assert!(page.contains("[rejoin]"));
        assert!(!page.contains("[leave]"));
        assert!(!page.contains("Tan Ah Kow"));
    }

    #[test]
    fn test_not_found_hides_header() {
        let page = render(&snapshot(TicketStatus::Error, None));
        assert!(!page.contains("#42"));
        assert!(page.starts_with("Ticket not found."));
    }

    #[test]
    fn test_alerted_shows_wait_time() {
        let page = render(&snapshot(TicketStatus::Alerted, Some(0)));
        assert!(page.contains("It's your turn!"));
        assert!(page.contains("within 3 minutes"));
    }

    #[test]
    fn test_loading_renders_header_and_footer_only() {
        let mut loading = snapshot(TicketStatus::Loading, None);
        loading.display_info = None;
        let page = render(&loading);
        assert_eq!(page, "#42\n\n\nLast updated automatically at ");
    }

    #[test]
    fn test_footer_carries_timestamp() {
        let mut served = snapshot(TicketStatus::Served, Some(0));
        let at = Utc::now();
        served.last_updated = Some(at);
        let page = render(&served);
        assert!(page.ends_with(&format!(
            "Last updated automatically at {}",
            format_last_updated(at)
        )));
    }

    #[test]
    fn test_format_last_updated_shape() {
        let formatted = format_last_updated(Utc::now());
        assert!(formatted.ends_with(" am") || formatted.ends_with(" pm"));
        assert!(formatted.contains(':'));
    }

    #[test]
    fn test_minutes_singular() {
        assert_eq!(minutes(1), "1 minute");
        assert_eq!(minutes(0), "0 minutes");
    }
}

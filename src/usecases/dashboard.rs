//! Chart data for the dashboard.
//!
//! Pure aggregation over records that were already fetched for one
//! organization.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{EquipmentRequest, RequestStatus, Ticket, TicketStatus};

pub const DEFAULT_MONTHS: u32 = 12;
pub const MAX_MONTHS: u32 = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: i64,
}

pub trait StatusSet: Copy + PartialEq + 'static {
    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;
}

impl StatusSet for TicketStatus {
    fn all() -> &'static [Self] {
        TicketStatus::ALL
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl StatusSet for RequestStatus {
    fn all() -> &'static [Self] {
        RequestStatus::ALL
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

/// A record that can be charted by creation month and status.
pub trait Chartable {
    type Status: StatusSet;

    fn created_at(&self) -> DateTime<Utc>;
    fn status(&self) -> Self::Status;
}

impl Chartable for Ticket {
    type Status = TicketStatus;

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn status(&self) -> TicketStatus {
        self.status
    }
}

impl Chartable for EquipmentRequest {
    type Status = RequestStatus;

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn status(&self) -> RequestStatus {
        self.status
    }
}

fn month_index(at: DateTime<Utc>) -> i64 {
    i64::from(at.year()) * 12 + i64::from(at.month0())
}

fn month_label(index: i64) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

/// Counts records per creation month over the `months` months ending with
/// the month of `now`, oldest first. Empty months are reported as zero and
/// records outside the window are ignored.
pub fn count_by_month<T: Chartable>(
    records: &[T],
    now: DateTime<Utc>,
    months: u32,
) -> Vec<MonthlyCount> {
    if months == 0 {
        return Vec::new();
    }
    let end = month_index(now);
    let start = end - i64::from(months) + 1;

    let mut counts = vec![0i64; months as usize];
    for record in records {
        let idx = month_index(record.created_at());
        if (start..=end).contains(&idx) {
            counts[(idx - start) as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(offset, count)| MonthlyCount {
            month: month_label(start + offset as i64),
            count,
        })
        .collect()
}

/// Counts records per status, one entry per status in declaration order.
pub fn count_by_status<T: Chartable>(records: &[T]) -> Vec<StatusCount> {
    T::Status::all()
        .iter()
        .map(|status| StatusCount {
            status: status.label(),
            count: records.iter().filter(|r| r.status() == *status).count() as i64,
        })
        .collect()
}

/// Clamps a requested window to `1..=MAX_MONTHS`, defaulting when unset.
pub fn window_months(requested: Option<i32>) -> u32 {
    match requested {
        Some(m) if m > 0 => (m as u32).min(MAX_MONTHS),
        _ => DEFAULT_MONTHS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketPriority;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn ticket(year: i32, month: u32, status: TicketStatus) -> Ticket {
        let at = Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap();
        Ticket {
            id: Uuid::new_v4(),
            title: "Monitor flickers".to_string(),
            description: "Second screen flickers after docking".to_string(),
            status,
            priority: TicketPriority::Medium,
            owner_id: "user_2abcdefghijklmnopqrstuvwxyz".to_string(),
            organization_id: "org_2abcdefghijklmnopqrstuvwxyz".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_count_by_month_spans_year_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        let tickets = vec![
            ticket(2025, 12, TicketStatus::Open),
            ticket(2026, 2, TicketStatus::Open),
            ticket(2026, 2, TicketStatus::Closed),
            // outside the window
            ticket(2025, 11, TicketStatus::Open),
        ];
        let counts = count_by_month(&tickets, now, 3);
        assert_eq!(
            counts,
            vec![
                MonthlyCount { month: "2025-12".to_string(), count: 1 },
                MonthlyCount { month: "2026-01".to_string(), count: 0 },
                MonthlyCount { month: "2026-02".to_string(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_count_by_month_zero_window() {
        let now = Utc::now();
        assert!(count_by_month::<Ticket>(&[], now, 0).is_empty());
    }

    #[test]
    fn test_count_by_status_includes_empty_statuses() {
        let tickets = vec![
            ticket(2026, 1, TicketStatus::Open),
            ticket(2026, 1, TicketStatus::Open),
            ticket(2026, 1, TicketStatus::Closed),
        ];
        assert_eq!(
            count_by_status(&tickets),
            vec![
                StatusCount { status: "Open", count: 2 },
                StatusCount { status: "InProgress", count: 0 },
                StatusCount { status: "Closed", count: 1 },
            ]
        );
    }

    #[test]
    fn test_window_months() {
        assert_eq!(window_months(None), DEFAULT_MONTHS);
        assert_eq!(window_months(Some(0)), DEFAULT_MONTHS);
        assert_eq!(window_months(Some(-3)), DEFAULT_MONTHS);
        assert_eq!(window_months(Some(6)), 6);
        assert_eq!(window_months(Some(120)), MAX_MONTHS);
    }
}

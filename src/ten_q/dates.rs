//! Statutory payment dates for 10Q claims.
//!
//! A claim falls due on the first of the month three months after the month
//! following its reference date. The last payment date is the 20th of the
//! due month, moved forward to Monday when it falls on a weekend.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Day of the due month on which payment is last accepted.
const LAST_PAYMENT_DAY: u32 = 20;

/// Derives the last payment date from a due date.
///
/// Implemented for any `Fn(NaiveDate) -> NaiveDate`, so a closure can stand
/// in for a full business calendar.
pub trait DateRule {
    fn last_payment_date(&self, due_date: NaiveDate) -> NaiveDate;
}

impl<F> DateRule for F
where
    F: Fn(NaiveDate) -> NaiveDate,
{
    fn last_payment_date(&self, due_date: NaiveDate) -> NaiveDate {
        self(due_date)
    }
}

/// The first weekday on or after the 20th of the due month.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastPaymentDay;

impl DateRule for LastPaymentDay {
    fn last_payment_date(&self, due_date: NaiveDate) -> NaiveDate {
        let twentieth = due_date.with_day(LAST_PAYMENT_DAY).unwrap_or(due_date);
        let skip = match twentieth.weekday() {
            Weekday::Sat => 2,
            Weekday::Sun => 1,
            _ => 0,
        };
        twentieth
            .checked_add_days(Days::new(skip))
            .unwrap_or(twentieth)
    }
}

/// Due date for a claim raised on `reference`: the first of the month four
/// months on. `None` only past the end of the calendar.
pub fn due_date_after(reference: NaiveDate) -> Option<NaiveDate> {
    reference.with_day(1)?.checked_add_months(Months::new(4))
}

/// [`LastPaymentDay`] applied to [`due_date_after`].
pub fn last_payment_date_after(reference: NaiveDate) -> Option<NaiveDate> {
    due_date_after(reference).map(|due| LastPaymentDay.last_payment_date(due))
}

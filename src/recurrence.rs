// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;

use crate::models::{Recurrence, Transaction};
use crate::utils::date_in_month;

/// Expands the stored transactions into the occurrences that materialize in
/// the target month, without persisting anything.
///
/// A `once` transaction occurs iff its stored date falls in the month. A
/// `monthly` transaction occurs in every month whose resolved date (anchor
/// day-of-month, clamped to the month's last day) lies between the anchor
/// date and the optional end date, inclusive. A `yearly` transaction does
/// the same but only in the anchor's month. Occurrences carry the resolved
/// date; the anchor itself is never mutated.
///
/// The result is sorted by resolved date; same-day occurrences keep their
/// stored order.
pub fn occurrences_in_month(transactions: &[Transaction], year: i32, month: u32) -> Vec<Transaction> {
    let mut result: Vec<Transaction> = Vec::new();

    for t in transactions {
        match t.recurrence {
            Recurrence::Once => {
                if t.date.year() == year && t.date.month() == month {
                    result.push(t.clone());
                }
            }
            Recurrence::Monthly => {
                if let Some(resolved) = resolve_occurrence(t, year, month) {
                    let mut occurrence = t.clone();
                    occurrence.date = resolved;
                    result.push(occurrence);
                }
            }
            Recurrence::Yearly => {
                if t.date.month() != month {
                    continue;
                }
                if let Some(resolved) = resolve_occurrence(t, year, month) {
                    let mut occurrence = t.clone();
                    occurrence.date = resolved;
                    result.push(occurrence);
                }
            }
        }
    }

    result.sort_by_key(|t| t.date);
    result
}

/// The resolved date for a recurring transaction in the target month, or
/// None when the month falls outside the anchor..end window. The window
/// check compares full dates, so a recurrence never fires before its
/// anchor's actual calendar day.
fn resolve_occurrence(t: &Transaction, year: i32, month: u32) -> Option<chrono::NaiveDate> {
    let resolved = date_in_month(year, month, t.date.day())?;
    if resolved < t.date {
        return None;
    }
    if let Some(end) = t.recurrence_end_date {
        if resolved > end {
            return None;
        }
    }
    Some(resolved)
}

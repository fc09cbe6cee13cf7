//! Financial aggregation engine.
//!
//! Pure functions deriving read-only summaries from snapshots of the record
//! collections. Every function here is deterministic in its inputs, holds
//! no state, performs no I/O, and never fails: edge cases (empty input,
//! zero totals) resolve to zeros rather than NaN or infinity.

use chrono::NaiveDate;
use shared::{BalanceLabel, CategoryRow, MonthlyTrendRow};
use std::fmt::Display;

/// Sum an amount field over a collection. Empty input sums to 0.0.
pub fn total<T>(records: &[T], amount: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(amount).sum()
}

/// Donations minus expenses. The sign picks the display label.
pub fn net_balance(donation_total: f64, expense_total: f64) -> f64 {
    donation_total - expense_total
}

/// A non-negative net balance is a surplus, a negative one a deficit.
pub fn balance_label(net: f64) -> BalanceLabel {
    if net >= 0.0 {
        BalanceLabel::Surplus
    } else {
        BalanceLabel::Deficit
    }
}

/// Mean amount per record; 0.0 for an empty collection.
pub fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// `amount` as a percentage of `grand_total`, guarded so a zero total
/// yields 0.0 instead of NaN or infinity.
pub fn percent_of(amount: f64, grand_total: f64) -> f64 {
    if grand_total == 0.0 {
        0.0
    } else {
        amount / grand_total * 100.0
    }
}

/// The `n` most recent records by date, most recent first.
///
/// The sort is stable, so records sharing a date keep their original
/// insertion order relative to each other.
pub fn most_recent<T: Clone>(records: &[T], n: usize, date: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| date(b).cmp(&date(a)));
    sorted.truncate(n);
    sorted
}

/// Group records by a key and sum their amounts.
///
/// Keys appear in insertion order of their first occurrence, mirroring how
/// the records were entered; nothing is dropped and nothing is counted
/// twice, so the group sums always add up to the grand total exactly.
pub fn sum_by_key<T, K: PartialEq>(
    records: &[T],
    key: impl Fn(&T) -> K,
    amount: impl Fn(&T) -> f64,
) -> Vec<(K, f64)> {
    let mut groups: Vec<(K, f64)> = Vec::new();

    for record in records {
        let k = key(record);
        let value = amount(record);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, sum)) => *sum += value,
            None => groups.push((k, value)),
        }
    }

    groups
}

/// Turn per-category sums into display rows with a percent-of-total share.
pub fn category_rows<K: Display>(sums: &[(K, f64)]) -> Vec<CategoryRow> {
    let grand_total: f64 = sums.iter().map(|(_, amount)| amount).sum();

    sums.iter()
        .map(|(category, amount)| CategoryRow {
            category: category.to_string(),
            amount: *amount,
            percent_of_total: percent_of(*amount, grand_total),
        })
        .collect()
}

/// Group records into "Jan 2024"-style month buckets and sum their amounts.
/// Buckets appear in insertion order of their first occurrence.
pub fn sum_by_month<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
    amount: impl Fn(&T) -> f64,
) -> Vec<(String, f64)> {
    sum_by_key(records, |r| date(r).format("%b %Y").to_string(), amount)
}

/// Merge monthly income and expense sums into one trend table.
///
/// The row order is the union of both key sets: income months first (in
/// their own order), then months that only saw expenses. A month missing
/// from either side contributes 0 to that side, so `net` is always
/// `income - expenses` for every row.
pub fn monthly_trend(income: &[(String, f64)], expenses: &[(String, f64)]) -> Vec<MonthlyTrendRow> {
    let mut rows: Vec<MonthlyTrendRow> = income
        .iter()
        .map(|(month, amount)| MonthlyTrendRow {
            month: month.clone(),
            income: *amount,
            expenses: 0.0,
            net: *amount,
        })
        .collect();

    for (month, amount) in expenses {
        match rows.iter_mut().find(|row| row.month == *month) {
            Some(row) => {
                row.expenses = *amount;
                row.net = row.income - *amount;
            }
            None => rows.push(MonthlyTrendRow {
                month: month.clone(),
                income: 0.0,
                expenses: *amount,
                net: -*amount,
            }),
        }
    }

    rows
}

/// Sum the amounts of records matching a predicate (e.g. paid expenses).
pub fn total_where<T>(
    records: &[T],
    predicate: impl Fn(&T) -> bool,
    amount: impl Fn(&T) -> f64,
) -> f64 {
    records.iter().filter(|r| predicate(r)).map(amount).sum()
}

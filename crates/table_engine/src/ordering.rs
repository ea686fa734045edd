use std::{borrow::Cow, cmp::Ordering};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use shared::protocol::SortDirection;

/// A column value projected into the comparison policy for its field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    /// Record identifiers, compared with [`natural_cmp`].
    Id(&'a str),
    Number(f64),
    Date(NaiveDateTime),
    Text(Cow<'a, str>),
}

impl<'a> SortValue<'a> {
    pub fn text(value: &'a str) -> Self {
        SortValue::Text(Cow::Borrowed(value))
    }

    pub fn optional_text(value: Option<&'a str>) -> Self {
        SortValue::Text(Cow::Borrowed(value.unwrap_or_default()))
    }

    pub fn day(value: NaiveDate) -> Self {
        SortValue::Date(value.and_time(NaiveTime::MIN))
    }

    pub fn instant(value: DateTime<Utc>) -> Self {
        SortValue::Date(value.naive_utc())
    }
}

/// Compares two projected values. Values of different kinds compare equal,
/// which leaves their relative order to the stable sort.
pub fn compare_values(left: &SortValue<'_>, right: &SortValue<'_>) -> Ordering {
    match (left, right) {
        (SortValue::Id(a), SortValue::Id(b)) => natural_cmp(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
        (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
        (SortValue::Text(a), SortValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
        _ => Ordering::Equal,
    }
}

pub fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Natural ordering used for every record id: digit runs compare by numeric
/// value, everything else compares byte-wise, so `"2" < "10"`,
/// `"A9" < "A31"` and `"ORD-009" < "ORD-031"`.
pub fn natural_cmp(left: &str, right: &str) -> Ordering {
    let mut left_chunks = Chunks { rest: left };
    let mut right_chunks = Chunks { rest: right };

    loop {
        match (left_chunks.next(), right_chunks.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let ordering = match (a, b) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => compare_digit_runs(x, y),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left_trimmed = left.trim_start_matches('0');
    let right_trimmed = right.trim_start_matches('0');
    left_trimmed
        .len()
        .cmp(&right_trimmed.len())
        .then_with(|| left_trimmed.cmp(right_trimmed))
        // "007" and "7" are the same number; keep the order total anyway.
        .then_with(|| left.len().cmp(&right.len()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(index, _)| index)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    }
}

#[cfg(test)]
#[path = "tests/ordering_tests.rs"]
mod tests;

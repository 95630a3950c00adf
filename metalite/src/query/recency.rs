// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Natural-language recency phrases
//!
//! Recognizes phrases such as "updated last week" or "updated in the last 3
//! days" anywhere in a search string and turns them into a cutoff timestamp.
//!
//! Grammar (matched case-insensitively, leftmost occurrence wins, trailing
//! text ignored):
//!
//! ```text
//! phrase := "updated " [ "in the " ] "last " [ amount ] [ " " ] unit [ "s" ]
//! amount := digit+            (fits in u32; defaults to 1)
//! unit   := "day" | "week"
//! ```

use crate::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, value},
    sequence::tuple,
    IResult,
};
use std::fmt;

const PHRASE_PREFIX: &str = "updated ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecencyUnit {
    Day,
    Week,
}

impl RecencyUnit {
    pub fn days(self) -> i64 {
        match self {
            RecencyUnit::Day => 1,
            RecencyUnit::Week => 7,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RecencyUnit::Day => "day",
            RecencyUnit::Week => "week",
        }
    }
}

/// A recognized phrase, before it is anchored to a clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecencyPhrase {
    pub amount: u32,
    pub unit: RecencyUnit,
}

impl RecencyPhrase {
    /// Length of the window in days
    pub fn span_days(&self) -> i64 {
        i64::from(self.amount) * self.unit.days()
    }

    /// `now` minus the window, or `None` if that falls outside the
    /// representable timestamp range
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        // u32::MAX weeks is well inside Duration's range; only the
        // subtraction itself can leave the calendar
        now.checked_sub_signed(Duration::days(self.span_days()))
    }
}

impl fmt::Display for RecencyPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.amount == 1 { "" } else { "s" };
        write!(f, "last {} {}{}", self.amount, self.unit.as_str(), plural)
    }
}

/// A phrase resolved against a clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyMatch {
    pub phrase: RecencyPhrase,
    pub cutoff: DateTime<Utc>,
}

/// Find the first recency phrase in `input`
pub fn find_phrase(input: &str) -> Option<RecencyPhrase> {
    let lowered = input.to_lowercase();
    lowered
        .match_indices(PHRASE_PREFIX)
        .find_map(|(start, _)| recency_phrase(&lowered[start..]).ok().map(|(_, phrase)| phrase))
}

/// Parse `input` for a recency phrase and anchor it to `clock`
///
/// # Returns
/// * `Some(RecencyMatch)` with `cutoff = now - amount * unit`
/// * `None` when there is no phrase (the caller falls back to literal search)
pub fn parse_recency(input: &str, clock: &dyn Clock) -> Option<RecencyMatch> {
    let phrase = find_phrase(input)?;
    let cutoff = phrase.cutoff(clock.now())?;
    Some(RecencyMatch { phrase, cutoff })
}

fn recency_phrase(input: &str) -> IResult<&str, RecencyPhrase> {
    map(
        tuple((
            tag(PHRASE_PREFIX),
            opt(tag("in the ")),
            tag("last "),
            opt(amount),
            opt(char(' ')),
            unit,
            opt(char('s')),
        )),
        |(_, _, _, amount, _, unit, _)| RecencyPhrase {
            amount: amount.unwrap_or(1),
            unit,
        },
    )(input)
}

fn amount(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn unit(input: &str) -> IResult<&str, RecencyUnit> {
    alt((
        value(RecencyUnit::Day, tag("day")),
        value(RecencyUnit::Week, tag("week")),
    ))(input)
}

//! Moment-style date format tokens.
//!
//! Widget URLs carry format strings such as `ddd DD MMM yyyy hh:mm:ss A`.
//! A pattern is lexed once into [`DateFormat`] and then rendered against any
//! chrono `DateTime`. Text in `[brackets]` is literal, `\x` escapes a single
//! character, and anything that is not a token passes through unchanged.
//! Localized shorthands (`LT`, `LL`, `l`, ...) expand to their English-locale
//! patterns while lexing.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Offset, TimeZone, Timelike};
use logos::Logos;

/// Format tokens. Longest match wins, so `MMMM` beats `MMM` beats `MM`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // ── Year ───────────────────────────────────────────────────────────
    #[token("YYYY")]
    #[token("yyyy")]
    Year4,
    #[token("YY")]
    #[token("yy")]
    Year2,
    #[token("Y")]
    #[token("y")]
    Year,
    #[token("gg")]
    WeekYear2,
    #[token("gggg")]
    WeekYear4,
    #[token("ggggg")]
    WeekYear5,
    #[token("GG")]
    IsoWeekYear2,
    #[token("GGGG")]
    IsoWeekYear4,
    #[token("GGGGG")]
    IsoWeekYear5,

    // ── Quarter / month ────────────────────────────────────────────────
    #[token("Q")]
    Quarter,
    #[token("Qo")]
    QuarterOrdinal,
    #[token("M")]
    Month,
    #[token("Mo")]
    MonthOrdinal,
    #[token("MM")]
    Month2,
    #[token("MMM")]
    MonthShort,
    #[token("MMMM")]
    MonthLong,

    // ── Day of month / year ────────────────────────────────────────────
    #[token("D")]
    Day,
    #[token("Do")]
    DayOrdinal,
    #[token("DD")]
    Day2,
    #[token("DDD")]
    DayOfYear,
    #[token("DDDo")]
    DayOfYearOrdinal,
    #[token("DDDD")]
    DayOfYear3,

    // ── Day of week ────────────────────────────────────────────────────
    #[token("d")]
    Weekday,
    #[token("do")]
    WeekdayOrdinal,
    #[token("dd")]
    WeekdayMin,
    #[token("ddd")]
    WeekdayShort,
    #[token("dddd")]
    WeekdayLong,
    #[token("e")]
    LocaleWeekday,
    #[token("E")]
    IsoWeekday,

    // ── Week of year ───────────────────────────────────────────────────
    #[token("w")]
    Week,
    #[token("wo")]
    WeekOrdinal,
    #[token("ww")]
    Week2,
    #[token("W")]
    IsoWeek,
    #[token("Wo")]
    IsoWeekOrdinal,
    #[token("WW")]
    IsoWeek2,

    // ── Time ───────────────────────────────────────────────────────────
    #[token("H")]
    Hour24,
    #[token("HH")]
    Hour24Pad,
    #[token("h")]
    Hour12,
    #[token("hh")]
    Hour12Pad,
    #[token("k")]
    Hour1To24,
    #[token("kk")]
    Hour1To24Pad,
    #[token("m")]
    Minute,
    #[token("mm")]
    MinutePad,
    #[token("s")]
    Second,
    #[token("ss")]
    SecondPad,
    #[token("S")]
    Tenths,
    #[token("SS")]
    Hundredths,
    #[token("SSS")]
    Millis,
    #[token("A")]
    MeridiemUpper,
    #[token("a")]
    MeridiemLower,

    // ── Offset / epoch ─────────────────────────────────────────────────
    #[token("Z")]
    Offset,
    #[token("ZZ")]
    OffsetCompact,
    #[token("X")]
    UnixSeconds,
    #[token("x")]
    UnixMillis,

    // ── Localized shorthands ───────────────────────────────────────────
    #[token("LT")]
    Time,
    #[token("LTS")]
    TimeSeconds,
    #[token("L")]
    DateNumeric,
    #[token("l")]
    DateNumericShort,
    #[token("LL")]
    DateLong,
    #[token("ll")]
    DateMedium,
    #[token("LLL")]
    DateTimeLong,
    #[token("lll")]
    DateTimeMedium,
    #[token("LLLL")]
    DateTimeFull,
    #[token("llll")]
    DateTimeFullShort,

    // ── Literal text ───────────────────────────────────────────────────
    #[regex(r"\[[^\[]*\]")]
    Bracketed,
    #[regex(r"\\.")]
    Escaped,
}

impl Token {
    /// English-locale pattern behind a localized shorthand.
    fn expansion(self) -> Option<&'static str> {
        let pattern = match self {
            Token::Time => "h:mm A",
            Token::TimeSeconds => "h:mm:ss A",
            Token::DateNumeric => "MM/DD/YYYY",
            Token::DateNumericShort => "M/D/YYYY",
            Token::DateLong => "MMMM D, YYYY",
            Token::DateMedium => "MMM D, YYYY",
            Token::DateTimeLong => "MMMM D, YYYY h:mm A",
            Token::DateTimeMedium => "MMM D, YYYY h:mm A",
            Token::DateTimeFull => "dddd, MMMM D, YYYY h:mm A",
            Token::DateTimeFullShort => "ddd, MMM D, YYYY h:mm A",
            _ => return None,
        };
        Some(pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Token(Token),
    Literal(String),
}

/// A lexed format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    items: Vec<Item>,
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

impl DateFormat {
    /// Lex `pattern`. Never fails: unknown characters become literal text.
    pub fn parse(pattern: &str) -> Self {
        let mut items: Vec<Item> = Vec::new();
        let mut rest = pattern;

        // One token per lexer run so a failed match only ever consumes a
        // single character, e.g. the `[` of an unclosed bracket.
        while let Some(first) = rest.chars().next() {
            let mut lexer = Token::lexer(rest);
            let (item, used) = match lexer.next() {
                Some(Ok(token)) => {
                    let slice = lexer.slice();
                    let item = match token {
                        Token::Bracketed => Item::Literal(slice[1..slice.len() - 1].to_string()),
                        Token::Escaped => Item::Literal(slice[1..].to_string()),
                        token => match token.expansion() {
                            Some(expanded) => {
                                for item in Self::parse(expanded).items {
                                    push_item(&mut items, item);
                                }
                                rest = &rest[slice.len()..];
                                continue;
                            }
                            None => Item::Token(token),
                        },
                    };
                    (item, slice.len())
                }
                _ => (Item::Literal(first.to_string()), first.len_utf8()),
            };
            push_item(&mut items, item);
            rest = &rest[used..];
        }

        Self { items }
    }

    /// Render `dt` with this pattern.
    pub fn format<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::Literal(text) => out.push_str(text),
                Item::Token(token) => render_token(&mut out, *token, dt),
            }
        }
        out
    }
}

/// Adjacent literals merge so rendering is a single push per run.
fn push_item(items: &mut Vec<Item>, item: Item) {
    match (items.last_mut(), item) {
        (Some(Item::Literal(prev)), Item::Literal(next)) => prev.push_str(&next),
        (_, item) => items.push(item),
    }
}

/// One-shot convenience: lex `pattern` and render `dt`.
pub fn format<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String {
    DateFormat::parse(pattern).format(dt)
}

fn render_token<Tz: TimeZone>(out: &mut String, token: Token, dt: &DateTime<Tz>) {
    let year = dt.year();
    let month = dt.month();
    let day = dt.day();
    let hour = dt.hour();
    let weekday = dt.weekday().num_days_from_sunday();
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    // `write!` into a String cannot fail.
    let _ = match token {
        Token::Year4 => write!(out, "{year:04}"),
        Token::Year2 => write!(out, "{:02}", year.rem_euclid(100)),
        Token::Year => write!(out, "{year}"),
        Token::WeekYear2 => write!(out, "{:02}", locale_week_year(dt).rem_euclid(100)),
        Token::WeekYear4 => write!(out, "{:04}", locale_week_year(dt)),
        Token::WeekYear5 => write!(out, "{:05}", locale_week_year(dt)),
        Token::IsoWeekYear2 => write!(out, "{:02}", dt.iso_week().year().rem_euclid(100)),
        Token::IsoWeekYear4 => write!(out, "{:04}", dt.iso_week().year()),
        Token::IsoWeekYear5 => write!(out, "{:05}", dt.iso_week().year()),

        Token::Quarter => write!(out, "{}", (month - 1) / 3 + 1),
        Token::QuarterOrdinal => write!(out, "{}", ordinal((month - 1) / 3 + 1)),
        Token::Month => write!(out, "{month}"),
        Token::MonthOrdinal => write!(out, "{}", ordinal(month)),
        Token::Month2 => write!(out, "{month:02}"),
        Token::MonthShort => write!(out, "{}", &MONTHS[month as usize - 1][..3]),
        Token::MonthLong => write!(out, "{}", MONTHS[month as usize - 1]),

        Token::Day => write!(out, "{day}"),
        Token::DayOrdinal => write!(out, "{}", ordinal(day)),
        Token::Day2 => write!(out, "{day:02}"),
        Token::DayOfYear => write!(out, "{}", dt.ordinal()),
        Token::DayOfYearOrdinal => write!(out, "{}", ordinal(dt.ordinal())),
        Token::DayOfYear3 => write!(out, "{:03}", dt.ordinal()),

        Token::Weekday | Token::LocaleWeekday => write!(out, "{weekday}"),
        Token::WeekdayOrdinal => write!(out, "{}", ordinal(weekday)),
        Token::WeekdayMin => write!(out, "{}", &WEEKDAYS[weekday as usize][..2]),
        Token::WeekdayShort => write!(out, "{}", &WEEKDAYS[weekday as usize][..3]),
        Token::WeekdayLong => write!(out, "{}", WEEKDAYS[weekday as usize]),
        Token::IsoWeekday => write!(out, "{}", dt.weekday().number_from_monday()),

        Token::Week => write!(out, "{}", locale_week(dt)),
        Token::WeekOrdinal => write!(out, "{}", ordinal(locale_week(dt))),
        Token::Week2 => write!(out, "{:02}", locale_week(dt)),
        Token::IsoWeek => write!(out, "{}", dt.iso_week().week()),
        Token::IsoWeekOrdinal => write!(out, "{}", ordinal(dt.iso_week().week())),
        Token::IsoWeek2 => write!(out, "{:02}", dt.iso_week().week()),

        Token::Hour24 => write!(out, "{hour}"),
        Token::Hour24Pad => write!(out, "{hour:02}"),
        Token::Hour12 => write!(out, "{hour12}"),
        Token::Hour12Pad => write!(out, "{hour12:02}"),
        Token::Hour1To24 => write!(out, "{}", if hour == 0 { 24 } else { hour }),
        Token::Hour1To24Pad => write!(out, "{:02}", if hour == 0 { 24 } else { hour }),
        Token::Minute => write!(out, "{}", dt.minute()),
        Token::MinutePad => write!(out, "{:02}", dt.minute()),
        Token::Second => write!(out, "{}", dt.second()),
        Token::SecondPad => write!(out, "{:02}", dt.second()),
        Token::Tenths => write!(out, "{}", millis(dt) / 100),
        Token::Hundredths => write!(out, "{:02}", millis(dt) / 10),
        Token::Millis => write!(out, "{:03}", millis(dt)),
        Token::MeridiemUpper => out.write_str(if hour < 12 { "AM" } else { "PM" }),
        Token::MeridiemLower => out.write_str(if hour < 12 { "am" } else { "pm" }),

        Token::Offset => out.write_str(&utc_offset(dt, ":")),
        Token::OffsetCompact => out.write_str(&utc_offset(dt, "")),
        Token::UnixSeconds => write!(out, "{}", dt.timestamp()),
        Token::UnixMillis => write!(out, "{}", dt.timestamp_millis()),

        // Expanded or consumed while lexing.
        Token::Time
        | Token::TimeSeconds
        | Token::DateNumeric
        | Token::DateNumericShort
        | Token::DateLong
        | Token::DateMedium
        | Token::DateTimeLong
        | Token::DateTimeMedium
        | Token::DateTimeFull
        | Token::DateTimeFullShort
        | Token::Bracketed
        | Token::Escaped => Ok(()),
    };
}

fn millis<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    // Leap seconds report nanos >= 1e9.
    (dt.nanosecond() % 1_000_000_000) / 1_000_000
}

fn utc_offset<Tz: TimeZone>(dt: &DateTime<Tz>, sep: &str) -> String {
    let secs = dt.offset().fix().local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let mins = secs.abs() / 60;
    format!("{sign}{:02}{sep}{:02}", mins / 60, mins % 60)
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
fn ordinal(n: u32) -> String {
    let suffix = if (n % 100) / 10 == 1 {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

/// Saturday closing the Sunday-start week that contains `dt`.
fn week_end<Tz: TimeZone>(dt: &DateTime<Tz>) -> NaiveDate {
    let date = dt.date_naive();
    let from_sunday = date.weekday().num_days_from_sunday();
    date + Duration::days(i64::from(6 - from_sunday))
}

/// Year a Sunday-start week belongs to: the year of its Saturday.
fn locale_week_year<Tz: TimeZone>(dt: &DateTime<Tz>) -> i32 {
    week_end(dt).year()
}

/// Week of year with Sunday-start weeks, where week 1 contains January 1st.
fn locale_week<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    let date = dt.date_naive();
    if week_end(dt).year() > date.year() {
        return 1;
    }
    let jan1 = date.with_ordinal(1).unwrap_or(date);
    (date.ordinal0() + jan1.weekday().num_days_from_sunday()) / 7 + 1
}

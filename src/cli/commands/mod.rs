//! Handlers behind the menu entries and the one-shot commands.

pub mod cash_delivery;
pub mod product;
pub mod report;
pub mod sale;
pub mod system;

use chrono::NaiveDateTime;

use crate::domain::{format_display_date, parse_display_date, RecordId};

use super::{
    core::{CommandError, ShellContext},
    output,
};

/// Reads a `DD/MM/YYYY` date; anything else falls back to the current
/// instant with a warning.
pub(crate) fn prompt_date(ctx: &mut ShellContext, prompt: &str) -> Result<NaiveDateTime, CommandError> {
    let raw = ctx.prompter.text(prompt)?;
    match parse_display_date(&raw) {
        Some(date) => Ok(date),
        None => {
            output::warning("Invalid date format. Using the current date.");
            Ok(ctx.now())
        }
    }
}

/// Reads a record id; `None` after warning when the input is not a number.
pub(crate) fn prompt_id(ctx: &mut ShellContext, prompt: &str) -> Result<Option<RecordId>, CommandError> {
    let raw = ctx.prompter.text(prompt)?;
    let parsed = parse_int(&raw);
    if parsed.is_none() {
        output::warning("Invalid ID.");
    }
    Ok(parsed)
}

/// Edit prompt showing the current value. Blank or unparsable input keeps it.
pub(crate) fn prompt_change<T>(
    ctx: &mut ShellContext,
    label: &str,
    current: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, CommandError> {
    let raw = ctx.prompter.text(&format!("{label} (current: {current})"))?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse(&raw);
    if parsed.is_none() {
        output::warning(format!("Could not read `{}`; keeping {current}.", raw.trim()));
    }
    Ok(parsed)
}

pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Finite decimal; accepts a comma as the decimal separator.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    parse_display_date(raw)
}

pub(crate) fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub(crate) fn date_cell(date: NaiveDateTime) -> String {
    format_display_date(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_comma_and_reject_garbage() {
        assert_eq!(parse_amount(" 2,50 "), Some(2.5));
        assert_eq!(parse_amount("3"), Some(3.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn ints_trim_whitespace() {
        assert_eq!(parse_int(" 12 "), Some(12));
        assert_eq!(parse_int("1.5"), None);
    }
}

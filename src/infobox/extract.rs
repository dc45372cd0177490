//! Heuristic field extraction from infobox rows.
//!
//! Headers are matched by substring against an ordered dispatch table; the
//! first matching rule wins and at most one rule fires per row. Three rules
//! (population, country, area) read their value from the row *below* the
//! label row, so the scan carries a one-row lookahead. A missing sibling
//! row, data cell or parenthetical only skips that one field — extraction
//! itself fails solely on an empty row sequence.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{CityRecord, InfoboxError, Row};

/// First parenthesized group holding a 4-digit year, e.g. "Population (2020 census)".
static SURVEY_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?(\d{4}).*?\)").unwrap());
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

type Handler = fn(&mut CityRecord, &Row, Option<&Row>);

/// Ordered (label substrings, handler) dispatch table. Order is the audit
/// trail: a header is tested against these top to bottom.
const RULES: &[(&[&str], Handler)] = &[
    (&["Elevation"], elevation),
    (&["Population"], population),
    (&["Country"], country),
    (&["Website"], website),
    (&["Settled", "Founded"], founded),
    (&["Area"], area),
];

fn rule_for(header: &str) -> Option<Handler> {
    RULES
        .iter()
        .find(|(labels, _)| labels.iter().any(|label| header.contains(label)))
        .map(|(_, handler)| *handler)
}

/// Scan the rows top to bottom and build the record.
///
/// Pure: the same row sequence always yields the same record.
pub fn extract(rows: &[Row]) -> Result<CityRecord, InfoboxError> {
    if rows.is_empty() {
        return Err(InfoboxError::MissingInfobox);
    }

    let mut record = CityRecord::new();
    let mut iter = rows.iter().peekable();
    while let Some(row) = iter.next() {
        let header = match row.header.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => continue,
        };
        if let Some(handler) = rule_for(header) {
            handler(&mut record, row, iter.peek().copied());
        }
    }

    tracing::debug!(rows = rows.len(), "infobox scan complete");
    Ok(record)
}

fn elevation(record: &mut CityRecord, row: &Row, _next: Option<&Row>) {
    if let Some(text) = row.data.as_deref() {
        record.set("elevation", text);
    }
}

fn population(record: &mut CityRecord, row: &Row, next: Option<&Row>) {
    if let Some(header) = row.header.as_deref() {
        if let Some(caps) = SURVEY_YEAR.captures(header) {
            record.set("year_of_survey", &caps[1]);
        }
    }

    let text = match next.and_then(|r| r.data.as_deref()) {
        Some(t) => t.replace(',', ""),
        None => return,
    };
    // The cell below may hold several numbers (the count plus a density
    // footnote); the longest digit run is taken as the population count.
    if let Some(run) = longest_digit_run(&text) {
        if let Ok(count) = run.parse::<u64>() {
            record.set("population", count);
        }
    }
}

fn country(record: &mut CityRecord, _row: &Row, next: Option<&Row>) {
    let next = match next {
        Some(r) => r,
        None => return,
    };
    if let (Some(label), Some(value)) = (next.header.as_deref(), next.data.as_deref()) {
        record.promote_region(label, value);
    }
}

fn website(record: &mut CityRecord, row: &Row, _next: Option<&Row>) {
    if let Some(text) = row.data.as_deref() {
        record.set("city_url", text.to_lowercase());
    }
}

fn founded(record: &mut CityRecord, row: &Row, _next: Option<&Row>) {
    if let Some(text) = row.data.as_deref() {
        record.set("year_of_city_founding", text);
    }
}

fn area(record: &mut CityRecord, _row: &Row, next: Option<&Row>) {
    let text = match next.and_then(|r| r.data.as_deref()) {
        Some(t) => t,
        None => return,
    };
    // Guard against misaligned rows: only overwrite with area-looking text.
    if text.contains("km") || text.contains("mi") {
        record.replace("area", text);
    }
}

fn longest_digit_run(text: &str) -> Option<&str> {
    let mut best: Option<&str> = None;
    for m in DIGIT_RUN.find_iter(text) {
        if best.map_or(true, |b| m.as_str().len() > b.len()) {
            best = Some(m.as_str());
        }
    }
    best
}

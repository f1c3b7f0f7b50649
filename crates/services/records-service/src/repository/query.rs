//! Query construction for record reads and partial updates.
//!
//! Filter and update keys are resolved against the entity's column set, so
//! only known column names ever reach SQL. Values are always bound
//! parameters, converted to the column's type first.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, ColumnType, Condition, Value};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{MAX_WILDCARD_LENGTH, RECENT_WINDOW_DAYS, WILDCARD_FILTER_KEY};

use super::record_repository::RecordEntity;

/// Caller-supplied field name to value mapping, used for filters and updates
pub type FieldMap = serde_json::Map<String, JsonValue>;

static WILDCARD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 '\-]+$").expect("wildcard pattern is valid"));

/// Build the AND-combined condition for a filter mapping.
///
/// Returns `None` for an empty mapping (unconditional read).
pub fn build_filter<E: RecordEntity>(filter: &FieldMap) -> AppResult<Option<Condition>> {
    if filter.is_empty() {
        return Ok(None);
    }

    let mut condition = Condition::all();
    for (key, raw) in filter {
        if key == WILDCARD_FILTER_KEY && !E::SEARCH_FIELDS.is_empty() {
            condition = condition.add(wildcard_condition::<E>(raw)?);
            continue;
        }

        let column = resolve_column::<E>(key)?;
        let expr = if raw.is_null() {
            column.is_null()
        } else {
            column.eq(column_value(&column, raw)?)
        };
        condition = condition.add(expr);
    }

    Ok(Some(condition))
}

/// Validate an update mapping against the entity allow-list and convert it to
/// column assignments. `updated_date` is added by the caller.
pub fn build_changes<E: RecordEntity>(changes: &FieldMap) -> AppResult<Vec<(E::Column, Value)>> {
    if changes.is_empty() {
        return Err(AppError::EmptyUpdate);
    }

    changes
        .iter()
        .map(|(key, raw)| {
            if !E::MUTABLE_FIELDS.contains(&key.as_str()) {
                return Err(AppError::invalid_field(key));
            }
            let column = resolve_column::<E>(key)?;
            if raw.is_null() {
                return Err(AppError::validation(format!("{} cannot be null", key)));
            }
            Ok((column, column_value(&column, raw)?))
        })
        .collect()
}

/// Start of the recent-records window: midnight UTC of the calendar day
/// [`RECENT_WINDOW_DAYS`] days before `now`.
pub fn recent_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let day = now.date_naive() - Duration::days(RECENT_WINDOW_DAYS);
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Text form of a JSON scalar. Numbers and booleans are accepted as their
/// literal text since query strings carry no type information.
pub fn text_value(raw: &JsonValue) -> AppResult<String> {
    match raw {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        _ => Err(AppError::validation("Expected a scalar value")),
    }
}

fn resolve_column<E: RecordEntity>(key: &str) -> AppResult<E::Column> {
    E::Column::from_str(key).map_err(|_| AppError::invalid_field(key))
}

fn wildcard_condition<E: RecordEntity>(raw: &JsonValue) -> AppResult<Condition> {
    let term = text_value(raw)?;
    let term = term.trim();
    if term.is_empty() || term.len() > MAX_WILDCARD_LENGTH || !WILDCARD_PATTERN.is_match(term) {
        return Err(AppError::validation("Invalid wildcard search term"));
    }

    // Case-insensitive on every backend
    let pattern = format!("%{}%", term.to_lowercase());
    let mut condition = Condition::any();
    for field in E::SEARCH_FIELDS {
        let column = resolve_column::<E>(field)?;
        let lowered = Func::lower(Expr::col((E::default(), column)));
        condition = condition.add(Expr::expr(lowered).like(pattern.as_str()));
    }
    Ok(condition)
}

fn column_value<C: ColumnTrait>(column: &C, raw: &JsonValue) -> AppResult<Value> {
    let field = column.as_str();
    let invalid = || AppError::validation(format!("Invalid value for {}", field));

    match column.def().get_column_type() {
        ColumnType::Uuid => {
            let text = raw.as_str().ok_or_else(invalid)?;
            Uuid::parse_str(text).map(Value::from).map_err(|_| invalid())
        }
        ColumnType::TimestampWithTimeZone | ColumnType::Timestamp | ColumnType::DateTime => {
            let text = raw.as_str().ok_or_else(invalid)?;
            parse_timestamp(text).map(Value::from).ok_or_else(invalid)
        }
        _ => text_value(raw).map(Value::from),
    }
}

/// Accept RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|day| Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)))
}

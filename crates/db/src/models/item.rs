//! Timeslot item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timeslot_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

use crate::patch::{Assignment, BindValue, Patch};

/// A row from `timeslots_items`.
///
/// The interval columns are `beginning` / `finish` in the schema and
/// `start` / `end` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TimeslotItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "beginning")]
    pub start: Timestamp,
    #[sqlx(rename = "finish")]
    pub end: Timestamp,
    pub done: bool,
}

/// An item joined to the username of the list owner (range report rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TimeslotItemWithUsername {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: TimeslotItem,
    pub username: String,
}

/// DTO for creating a new item. New items are never `done`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_interval"))]
pub struct CreateTimeslotItem {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

fn validate_interval(input: &CreateTimeslotItem) -> Result<(), ValidationError> {
    if input.end < input.start {
        return Err(interval_error());
    }
    Ok(())
}

fn interval_error() -> ValidationError {
    let mut err = ValidationError::new("interval");
    err.message = Some("end must not precede start".into());
    err
}

fn validate_update_interval(input: &UpdateTimeslotItem) -> Result<(), ValidationError> {
    match (input.start, input.end) {
        (Some(start), Some(end)) if end < start => Err(interval_error()),
        _ => Ok(()),
    }
}

/// DTO for updating an item. All fields are optional; at least one must be set.
///
/// The interval is checked here only when both ends are supplied; a single
/// moved end is checked against the stored one by `ck_timeslots_items_interval`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_interval"))]
pub struct UpdateTimeslotItem {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub done: Option<bool>,
}

impl Patch for UpdateTimeslotItem {
    fn assignments(&self) -> Vec<Assignment> {
        let UpdateTimeslotItem {
            title,
            description,
            start,
            end,
            done,
        } = self;

        let mut out = Vec::with_capacity(5);
        if let Some(title) = title {
            out.push(Assignment::new("title", BindValue::Text(title.clone())));
        }
        if let Some(description) = description {
            out.push(Assignment::new(
                "description",
                BindValue::Text(description.clone()),
            ));
        }
        if let Some(start) = start {
            out.push(Assignment::new("beginning", BindValue::Timestamp(*start)));
        }
        if let Some(end) = end {
            out.push(Assignment::new("finish", BindValue::Timestamp(*end)));
        }
        if let Some(done) = done {
            out.push(Assignment::new("done", BindValue::Bool(*done)));
        }
        out
    }
}

/// Bounds of an unscoped range report. Both ends are inclusive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItemsByRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

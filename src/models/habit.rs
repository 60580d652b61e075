// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit records embedded in a user document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied habit fields (name, schedule, color, ...).
///
/// Only `_id` and `markedAsDone` have meaning to the backend; everything
/// else is stored and returned as given.
pub type HabitFields = Map<String, Value>;

const ID_KEYS: [&str; 2] = ["_id", "id"];
const MARKED_AS_DONE: &str = "markedAsDone";

/// A habit, either active or in the trash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable identifier, kept across edits, deletes and restores
    #[serde(rename = "_id")]
    pub id: String,
    /// Date markers in the order they were recorded
    #[serde(rename = "markedAsDone", default)]
    pub marked_as_done: Vec<String>,
    #[serde(flatten)]
    pub fields: HabitFields,
}

impl Habit {
    /// Build a fresh habit from a payload, with a new id and no markers.
    pub fn new(mut payload: HabitFields) -> Self {
        strip_reserved(&mut payload);
        payload.remove(MARKED_AS_DONE);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            marked_as_done: Vec::new(),
            fields: payload,
        }
    }

    /// Build the replacement record for an edit.
    ///
    /// The id is always `id`. Markers come from the payload when present,
    /// otherwise they reset to empty like every other omitted field.
    pub fn replacement(id: &str, mut payload: HabitFields) -> Result<Self, serde_json::Error> {
        strip_reserved(&mut payload);
        let marked_as_done = match payload.remove(MARKED_AS_DONE) {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };
        Ok(Self {
            id: id.to_string(),
            marked_as_done,
            fields: payload,
        })
    }
}

fn strip_reserved(payload: &mut HabitFields) {
    for key in ID_KEYS {
        payload.remove(key);
    }
}

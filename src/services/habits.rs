// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Label and habit mutations on a user document.
//!
//! Every mutation loads the user fresh, applies one [`Mutation`] in memory,
//! and writes the whole document back before returning it. A failed
//! mutation writes nothing.
//!
//! Two requests mutating the same user at once both read the same
//! document; the later write wins and the earlier change is lost.

use crate::error::{AppError, Result};
use crate::models::{Habit, HabitFields, User};
use crate::services::directory::UserDirectory;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("habit {0} not found")]
    HabitNotFound(String),
}

/// One change to a user's labels or habits.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddLabel(String),
    /// Removes every occurrence of the label.
    RemoveLabel(String),
    AddHabit(HabitFields),
    MarkDone { habit_id: String, date: String },
    /// Replace the active habit whose id matches `habit.id`.
    EditHabit(Habit),
    /// Move an active habit to the trash.
    SoftDelete(String),
    /// Move a habit from the trash back to the active list.
    Restore(String),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddLabel(_) => "add_label",
            Mutation::RemoveLabel(_) => "remove_label",
            Mutation::AddHabit(_) => "add_habit",
            Mutation::MarkDone { .. } => "mark_done",
            Mutation::EditHabit(_) => "edit_habit",
            Mutation::SoftDelete(_) => "soft_delete",
            Mutation::Restore(_) => "restore",
        }
    }
}

/// Apply a mutation to an in-memory user document.
///
/// Unknown habit ids fail with `HabitNotFound` and leave `user` untouched.
pub fn apply(user: &mut User, mutation: Mutation) -> std::result::Result<(), HabitError> {
    match mutation {
        Mutation::AddLabel(label) => user.labels.push(label),
        Mutation::RemoveLabel(label) => user.labels.retain(|l| *l != label),
        Mutation::AddHabit(payload) => user.habits.push(Habit::new(payload)),
        Mutation::MarkDone { habit_id, date } => {
            let habit = user
                .habits
                .iter_mut()
                .find(|h| h.id == habit_id)
                .ok_or(HabitError::HabitNotFound(habit_id))?;
            habit.marked_as_done.push(date);
        }
        Mutation::EditHabit(replacement) => {
            let slot = user
                .habits
                .iter_mut()
                .find(|h| h.id == replacement.id)
                .ok_or_else(|| HabitError::HabitNotFound(replacement.id.clone()))?;
            *slot = replacement;
        }
        Mutation::SoftDelete(habit_id) => {
            let habit = take_habit(&mut user.habits, habit_id)?;
            user.deleted.push(habit);
        }
        Mutation::Restore(habit_id) => {
            let habit = take_habit(&mut user.deleted, habit_id)?;
            user.habits.push(habit);
        }
    }
    Ok(())
}

fn take_habit(list: &mut Vec<Habit>, habit_id: String) -> std::result::Result<Habit, HabitError> {
    let index = list
        .iter()
        .position(|h| h.id == habit_id)
        .ok_or(HabitError::HabitNotFound(habit_id))?;
    Ok(list.remove(index))
}

/// Load-apply-save over the user directory.
#[derive(Clone)]
pub struct HabitStore {
    directory: UserDirectory,
}

impl HabitStore {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory }
    }

    /// Apply `mutation` to the user's current document and persist it.
    ///
    /// A token whose user no longer exists is reported as `InvalidToken`.
    pub async fn mutate(&self, user_id: &str, mutation: Mutation) -> Result<User> {
        let mut user = self
            .directory
            .lookup_by_id(user_id)
            .await
            .map_err(|err| match err {
                AppError::UserNotFound => {
                    tracing::warn!(user_id, "Token refers to a missing user");
                    AppError::InvalidToken
                }
                other => other,
            })?;

        let op = mutation.name();
        if let Err(err) = apply(&mut user, mutation) {
            tracing::debug!(user_id, op, error = %err, "Mutation rejected");
            return Err(err.into());
        }

        self.directory.save(&user).await?;
        tracing::debug!(user_id, op, "Mutation applied");
        Ok(user)
    }
}

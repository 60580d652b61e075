// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod habit;
pub mod user;

pub use habit::{Habit, HabitFields};
pub use user::{EmailClaim, NewUser, User, UserView};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod directory;
pub mod habits;
pub mod password;
pub mod token;

pub use directory::UserDirectory;
pub use habits::{HabitError, HabitStore, Mutation};
pub use token::{TokenError, TokenService};

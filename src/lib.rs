// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Rehabits: a multi-user habit tracker backend.
//!
//! Users register or log in to get a session token, then manage their own
//! labels and habits. Each user is a single document that every mutation
//! reads, changes and writes back whole.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::UserStore;
use services::{HabitStore, TokenService, UserDirectory};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
    pub directory: UserDirectory,
    pub habits: HabitStore,
}

impl AppState {
    /// Wire the services around a store.
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> Self {
        let tokens = TokenService::new(&config.jwt_signing_key);
        let directory = UserDirectory::new(store);
        let habits = HabitStore::new(directory.clone());
        Self {
            config,
            tokens,
            directory,
            habits,
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Data models for the application.

pub mod session;
pub mod tokens;
pub mod vitals;

pub use session::{Game, NewSession, SessionRecord};
pub use tokens::{IdentitySubject, TokenResponse, TokenSet, UserInfo};
pub use vitals::{AggregateResponse, DataSourceKind, FitnessWindow, VitalsSummary};

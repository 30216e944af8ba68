// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Services module - business logic layer.

pub mod google;
pub mod vitals;

pub use google::{CallbackOutcome, GoogleClient, GoogleService};

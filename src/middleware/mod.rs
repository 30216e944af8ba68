// SPDX-License-Identifier: MIT
// Copyright 2026 The pulse-games Authors

//! Middleware modules.

pub mod security;

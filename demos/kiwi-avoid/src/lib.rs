// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Standalone obstacle avoidance demo
//!
//! Emulated sensors feed a shared store, the behavior runs at a fixed cycle and an
//! emulated actuator reports the requests it picks up.

pub mod activities {
    pub mod components;
}
pub mod config;

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Activity and related structs and traits

use crate::error::Error;
use std::fmt::Display;

/// Identifies an Activity
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActivityId(usize);

impl ActivityId {
    pub const fn new(id: usize) -> Self {
        Self(id)
    }
}

impl From<usize> for ActivityId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<ActivityId> for usize {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Activity trait, to be implemented by anything stepped by a [CycleRunner](crate::runner::CycleRunner)
pub trait Activity: Send {
    /// Get the ID of the activity
    fn id(&self) -> ActivityId;

    /// Called once before the first step
    fn startup(&mut self) -> Result<(), Error>;

    /// Called once per cycle
    fn step(&mut self) -> Result<(), Error>;

    /// Called once after the last step
    fn shutdown(&mut self) -> Result<(), Error>;
}

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Kiwi Error implementation
//!
//! The decision cycle itself is total and [BehaviorActivity](crate::behavior::BehaviorActivity)
//! never fails. [Error::Activity] is for other activities stepped by a
//! [CycleRunner](crate::runner::CycleRunner) next to it, which abort the run with it.

use crate::activity::ActivityId;

/// Kiwi Error type
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    Activity(ActivityId, &'static str),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Activity(id, description) => {
                write!(f, "Activity {} error, {}", id, description)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display() {
        let error = Error::Activity(5.into(), "step failed");
        assert_eq!(error.to_string(), "Activity A5 error, step failed");
    }
}

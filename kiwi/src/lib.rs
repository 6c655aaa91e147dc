// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Kiwi is a reactive obstacle avoidance controller for a small autonomous vehicle.
//!
//! # Readings and Requests
//!
//! Sensor readings are delivered asynchronously by a transport layer into a shared
//! [SensorStore](crate::store::SensorStore). Each reading is held in its own lock so that
//! producers of different sensors never block each other.
//!
//! # Decision Cycle
//!
//! A [Behavior](crate::behavior::Behavior) owns the carried history of the controller. Each
//! call to [step](crate::behavior::Behavior::step) takes a consistent snapshot of the four
//! readings, evaluates a fixed decision table and writes a steering and pedal request back
//! into the store, where the actuation side picks it up.
//!
//! # Driving the Cycle
//!
//! The core has no scheduling of its own. [CycleRunner](crate::runner::CycleRunner) is a small
//! fixed cadence driver for [activities](crate::activity::Activity) that can be used to run the
//! behavior standalone.

pub mod activity;
pub mod behavior;
pub mod error;
pub mod ir;
pub mod messages;
pub mod runner;
pub mod store;

/// Re-export the public API
pub mod prelude {
    pub use crate::activity::{Activity, ActivityId};
    pub use crate::behavior::{Behavior, BehaviorActivity, Branch, Decision};
    pub use crate::ir::{convert_to_distance, IrCalibration};
    pub use crate::messages::{
        DistanceReading, GroundSteeringRequest, PedalPositionRequest, VoltageReading,
    };
    pub use crate::runner::CycleRunner;
    pub use crate::store::{SensorSnapshot, SensorStore};
}

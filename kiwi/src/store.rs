// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Sensor state store
//!
//! Holds the latest reading of each sensor and the latest actuation requests.
//! Every field sits behind its own mutex. Only [SensorStore::snapshot] and
//! [SensorStore::set_requests] hold more than one lock at a time, and both
//! acquire them in declaration order: front, rear, left, right, then steering, pedal.

use crate::messages::{
    DistanceReading, GroundSteeringRequest, PedalPositionRequest, VoltageReading,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Consistent copy of all four sensor readings taken at one instant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    pub front_ultrasonic: DistanceReading,
    pub rear_ultrasonic: DistanceReading,
    pub left_ir: VoltageReading,
    pub right_ir: VoltageReading,
}

/// Latest readings and requests, shared between producers, the behavior and consumers.
#[derive(Debug, Default)]
pub struct SensorStore {
    front_ultrasonic: Mutex<DistanceReading>,
    rear_ultrasonic: Mutex<DistanceReading>,
    left_ir: Mutex<VoltageReading>,
    right_ir: Mutex<VoltageReading>,
    ground_steering: Mutex<GroundSteeringRequest>,
    pedal_position: Mutex<PedalPositionRequest>,
}

impl SensorStore {
    /// Create a store with all readings and requests zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_front_ultrasonic(&self, reading: DistanceReading) {
        *lock(&self.front_ultrasonic) = reading;
    }

    pub fn set_rear_ultrasonic(&self, reading: DistanceReading) {
        *lock(&self.rear_ultrasonic) = reading;
    }

    pub fn set_left_ir(&self, reading: VoltageReading) {
        *lock(&self.left_ir) = reading;
    }

    pub fn set_right_ir(&self, reading: VoltageReading) {
        *lock(&self.right_ir) = reading;
    }

    /// Latest steering request. Zero until the first decision cycle has run.
    pub fn ground_steering_request(&self) -> GroundSteeringRequest {
        *lock(&self.ground_steering)
    }

    /// Latest pedal position request. Zero until the first decision cycle has run.
    pub fn pedal_position_request(&self) -> PedalPositionRequest {
        *lock(&self.pedal_position)
    }

    /// Copy all four readings while holding all four locks.
    pub fn snapshot(&self) -> SensorSnapshot {
        let front_ultrasonic = lock(&self.front_ultrasonic);
        let rear_ultrasonic = lock(&self.rear_ultrasonic);
        let left_ir = lock(&self.left_ir);
        let right_ir = lock(&self.right_ir);

        SensorSnapshot {
            front_ultrasonic: *front_ultrasonic,
            rear_ultrasonic: *rear_ultrasonic,
            left_ir: *left_ir,
            right_ir: *right_ir,
        }
    }

    /// Store a new pair of requests while holding both request locks.
    pub fn set_requests(&self, steering: GroundSteeringRequest, pedal: PedalPositionRequest) {
        let mut ground_steering = lock(&self.ground_steering);
        let mut pedal_position = lock(&self.pedal_position);
        *ground_steering = steering;
        *pedal_position = pedal;
    }
}

/// Every field holds a plain copyable scalar, so a value left behind by a panicking
/// writer is still a complete value and the poison flag can be ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

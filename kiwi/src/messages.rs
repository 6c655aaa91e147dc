// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Messages
//!
//! Readings received from the sensors and requests handed to the actuators.
//! Every message wraps a single scalar and is replaced wholesale on update.

/// Distance reading
///
/// Measured directly by an ultrasonic time of flight sensor, in meters.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct DistanceReading {
    pub distance: f32,
}

impl DistanceReading {
    pub const fn new(distance: f32) -> Self {
        Self { distance }
    }
}

/// Voltage reading
///
/// Raw output of an infrared proximity sensor behind a voltage divider.
/// See [crate::ir] for the conversion into a distance.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct VoltageReading {
    pub voltage: f32,
}

impl VoltageReading {
    pub const fn new(voltage: f32) -> Self {
        Self { voltage }
    }
}

/// Ground steering request
///
/// Signed steering angle. Positive values steer away from the right side.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct GroundSteeringRequest {
    pub ground_steering: f32,
}

impl GroundSteeringRequest {
    pub const fn new(ground_steering: f32) -> Self {
        Self { ground_steering }
    }
}

/// Pedal position request
///
/// Throttle fraction.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PedalPositionRequest {
    pub position: f32,
}

impl PedalPositionRequest {
    pub const fn new(position: f32) -> Self {
        Self { position }
    }
}

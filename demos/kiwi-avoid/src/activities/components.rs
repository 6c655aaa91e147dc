// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use kiwi::prelude::*;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::instrument;

/// Range of emulated ultrasonic distances in meters
pub const ULTRASONIC_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Range of emulated infrared voltages
pub const INFRARED_RANGE: RangeInclusive<f32> = 0.0..=1.5;

/// Something that delivers readings into the store on its own schedule
pub trait Producer: Send {
    fn name(&self) -> String;

    /// Deliver one reading
    fn publish(&mut self, store: &SensorStore);
}

/// Mounting position of an ultrasonic sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    Front,
    Rear,
}

/// Side of an infrared sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Ultrasonic sensor
///
/// Emulates a time of flight sensor generating [DistanceReading]s.
#[derive(Debug)]
pub struct Ultrasonic {
    mount: Mount,
    rng: StdRng,
    distance: f32,
}

impl Ultrasonic {
    pub fn build(mount: Mount, seed: u64) -> Ultrasonic {
        Self {
            mount,
            rng: StdRng::seed_from_u64(seed),
            distance: 1.0,
        }
    }

    fn get_reading(&mut self) -> DistanceReading {
        const CHANGE_PROP: f64 = 0.8;
        const MAX_DELTA: f32 = 0.15;

        self.distance = random_walk(
            &mut self.rng,
            self.distance,
            CHANGE_PROP,
            MAX_DELTA,
            ULTRASONIC_RANGE,
        );
        DistanceReading::new(self.distance)
    }
}

impl Producer for Ultrasonic {
    fn name(&self) -> String {
        format!("{:?}Ultrasonic", self.mount)
    }

    #[instrument(name = "Ultrasonic", skip_all)]
    fn publish(&mut self, store: &SensorStore) {
        let reading = self.get_reading();
        debug!("Sending {:?} ultrasonic reading: {reading:?}", self.mount);
        match self.mount {
            Mount::Front => store.set_front_ultrasonic(reading),
            Mount::Rear => store.set_rear_ultrasonic(reading),
        }
    }
}

/// Infrared sensor
///
/// Emulates an infrared proximity sensor behind a voltage divider generating [VoltageReading]s.
#[derive(Debug)]
pub struct Infrared {
    side: Side,
    rng: StdRng,
    voltage: f32,
}

impl Infrared {
    pub fn build(side: Side, seed: u64) -> Infrared {
        Self {
            side,
            rng: StdRng::seed_from_u64(seed),
            voltage: 0.4,
        }
    }

    fn get_reading(&mut self) -> VoltageReading {
        const CHANGE_PROP: f64 = 0.6;
        const MAX_DELTA: f32 = 0.05;

        self.voltage = random_walk(
            &mut self.rng,
            self.voltage,
            CHANGE_PROP,
            MAX_DELTA,
            INFRARED_RANGE,
        );
        VoltageReading::new(self.voltage)
    }
}

impl Producer for Infrared {
    fn name(&self) -> String {
        format!("{:?}Infrared", self.side)
    }

    #[instrument(name = "Infrared", skip_all)]
    fn publish(&mut self, store: &SensorStore) {
        let reading = self.get_reading();
        debug!("Sending {:?} infrared reading: {reading:?}", self.side);
        match self.side {
            Side::Left => store.set_left_ir(reading),
            Side::Right => store.set_right_ir(reading),
        }
    }
}

/// Actuator
///
/// Emulates the actuation side which fetches the latest requests
/// and reports whenever they change.
#[derive(Debug)]
pub struct Actuator {
    store: Arc<SensorStore>,
    applied: Option<(GroundSteeringRequest, PedalPositionRequest)>,
}

impl Actuator {
    pub fn build(store: Arc<SensorStore>) -> Actuator {
        Self {
            store,
            applied: None,
        }
    }

    /// Fetch the latest requests. Returns them if they differ from the ones applied last.
    #[instrument(name = "Actuator", skip_all)]
    pub fn poll(&mut self) -> Option<(GroundSteeringRequest, PedalPositionRequest)> {
        let requests = (
            self.store.ground_steering_request(),
            self.store.pedal_position_request(),
        );
        if self.applied == Some(requests) {
            return None;
        }

        self.applied = Some(requests);
        info!(
            "Actuator applying steering {:.2} and pedal position {:.2}",
            requests.0.ground_steering, requests.1.position
        );
        Some(requests)
    }
}

/// Run `task` every `period` on a named thread until `running` is cleared.
pub fn spawn_periodic<F>(
    name: String,
    period: Duration,
    running: Arc<AtomicBool>,
    mut task: F,
) -> io::Result<JoinHandle<()>>
where
    F: FnMut() + Send + 'static,
{
    thread::Builder::new().name(name.clone()).spawn(move || {
        debug!("{name} started with period {period:?}");
        while running.load(Ordering::Relaxed) {
            task();
            thread::sleep(period);
        }
        debug!("{name} stopped");
    })
}

/// Spawn a thread delivering readings of `producer` into `store` every `period`.
pub fn spawn_producer<P>(
    mut producer: P,
    store: Arc<SensorStore>,
    period: Duration,
    running: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>>
where
    P: Producer + 'static,
{
    spawn_periodic(producer.name(), period, running, move || {
        producer.publish(&store)
    })
}

/// Random walk from `previous` with a probability of `change_prop` in a range of +/-`max_delta`,
/// clamped to `range`
fn random_walk<R: Rng>(
    rng: &mut R,
    previous: f32,
    change_prop: f64,
    max_delta: f32,
    range: RangeInclusive<f32>,
) -> f32 {
    if rng.gen_bool(change_prop) {
        let delta = rng.gen_range(-max_delta..=max_delta);
        return (previous + delta).clamp(*range.start(), *range.end());
    }

    previous
}

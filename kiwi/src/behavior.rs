// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Decision engine
//!
//! A bang-bang controller that keeps the vehicle following an obstacle on its right.
//! The front ultrasonic distance and the trend of the right infrared distance select one
//! of three fixed steering and pedal settings.

use crate::activity::{Activity, ActivityId};
use crate::error::Error;
use crate::ir::IrCalibration;
use crate::messages::{GroundSteeringRequest, PedalPositionRequest};
use crate::store::SensorStore;
use log::{debug, trace};
use std::sync::Arc;
use tracing::instrument;

/// Front distance at or below which the vehicle always steers away
pub const FRONT_DISTANCE_LIMIT: f32 = 0.3;
/// Right distance above which an opening gap is steered into
pub const RIGHT_DISTANCE_LIMIT: f64 = 0.2_f32 as f64;

/// Branch of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Obstacle ahead or the right side is closing in: moderate speed, steer away.
    Avoid,
    /// The right side is opening up and not too close: slow down, steer hard towards it.
    Open,
    /// Cruise straight.
    Cruise,
}

impl Branch {
    /// Steering angle and pedal position requested by this branch
    pub fn requests(self) -> (GroundSteeringRequest, PedalPositionRequest) {
        let (ground_steering, position) = match self {
            Branch::Avoid => (0.6, 0.03),
            Branch::Open => (-1.0, 0.01),
            Branch::Cruise => (0.0, 0.04),
        };
        (
            GroundSteeringRequest::new(ground_steering),
            PedalPositionRequest::new(position),
        )
    }
}

/// Outcome of one evaluation of the decision table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub branch: Branch,
    pub ground_steering: GroundSteeringRequest,
    pub pedal_position: PedalPositionRequest,
    /// Positive when the right side got closer since the previous cycle
    pub right_distance_diff: f64,
    /// Right distance to carry into the next cycle
    pub previous_right_distance: f64,
}

/// Evaluate the decision table. First matching branch wins.
pub fn decide(front_distance: f32, right_distance: f64, previous_right_distance: f64) -> Decision {
    let right_distance_diff = previous_right_distance - right_distance;

    let branch = if front_distance <= FRONT_DISTANCE_LIMIT || right_distance_diff > 0.0 {
        Branch::Avoid
    } else if right_distance_diff < 0.0 && right_distance > RIGHT_DISTANCE_LIMIT {
        Branch::Open
    } else {
        Branch::Cruise
    };

    // Pulling away rebases the trend, so the next cycle compares against zero.
    let previous_right_distance = match branch {
        Branch::Open => 0.0,
        Branch::Avoid | Branch::Cruise => right_distance,
    };

    let (ground_steering, pedal_position) = branch.requests();
    Decision {
        branch,
        ground_steering,
        pedal_position,
        right_distance_diff,
        previous_right_distance,
    }
}

/// The decision engine
///
/// Owns the carried right distance and a handle to the store it reads from and writes to.
#[derive(Debug)]
pub struct Behavior {
    store: Arc<SensorStore>,
    calibration: IrCalibration,
    previous_right_distance: f64,
}

impl Behavior {
    pub fn new(store: Arc<SensorStore>) -> Self {
        Self::with_calibration(store, IrCalibration::default())
    }

    pub fn with_calibration(store: Arc<SensorStore>, calibration: IrCalibration) -> Self {
        Self {
            store,
            calibration,
            previous_right_distance: 0.0,
        }
    }

    /// Handle to the store for producers and consumers
    pub fn store(&self) -> Arc<SensorStore> {
        self.store.clone()
    }

    pub fn calibration(&self) -> &IrCalibration {
        &self.calibration
    }

    /// Right distance of the previous cycle, or zero after a rebase
    pub fn previous_right_distance(&self) -> f64 {
        self.previous_right_distance
    }

    /// Run one decision cycle and publish the resulting requests.
    pub fn step(&mut self) -> Decision {
        let snapshot = self.store.snapshot();

        let front_distance = snapshot.front_ultrasonic.distance;
        let right_distance = self
            .calibration
            .convert_to_distance(snapshot.right_ir.voltage);

        let decision = decide(front_distance, right_distance, self.previous_right_distance);
        debug!(
            "Right distance {right_distance:.4}, diff {:.4}, front distance {front_distance:.4}",
            decision.right_distance_diff
        );
        trace!("Decided {decision:?}");

        self.previous_right_distance = decision.previous_right_distance;
        self.store
            .set_requests(decision.ground_steering, decision.pedal_position);
        decision
    }
}

/// Behavior activity
///
/// Runs one decision cycle per step.
#[derive(Debug)]
pub struct BehaviorActivity {
    /// ID of the activity
    activity_id: ActivityId,
    behavior: Behavior,
}

impl BehaviorActivity {
    pub fn build(activity_id: ActivityId, behavior: Behavior) -> BehaviorActivity {
        Self {
            activity_id,
            behavior,
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Activity for BehaviorActivity {
    fn id(&self) -> ActivityId {
        self.activity_id
    }

    #[instrument(name = "Behavior startup")]
    fn startup(&mut self) -> Result<(), Error> {
        debug!(
            "Behavior startup completed, IR divider ratio {}",
            self.behavior.calibration().divider_ratio()
        );
        Ok(())
    }

    #[instrument(name = "Behavior")]
    fn step(&mut self) -> Result<(), Error> {
        debug!("Stepping Behavior");
        let decision = self.behavior.step();
        debug!(
            "Requesting steering {:.2} and pedal position {:.2} ({:?})",
            decision.ground_steering.ground_steering,
            decision.pedal_position.position,
            decision.branch
        );
        Ok(())
    }

    #[instrument(name = "Behavior shutdown")]
    fn shutdown(&mut self) -> Result<(), Error> {
        debug!("Behavior shutdown completed");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ir::convert_to_distance;
    use crate::messages::{DistanceReading, VoltageReading};

    fn behavior() -> (Behavior, Arc<SensorStore>) {
        let store = Arc::new(SensorStore::new());
        (Behavior::new(store.clone()), store)
    }

    fn requests(store: &SensorStore) -> (f32, f32) {
        (
            store.ground_steering_request().ground_steering,
            store.pedal_position_request().position,
        )
    }

    #[test]
    fn close_front_always_avoids() {
        for previous in [0.0, 0.25, 0.3, 1.0] {
            for right in [0.0, 0.3, 0.5, 2.0] {
                let decision = decide(0.25, right, previous);
                assert_eq!(decision.branch, Branch::Avoid);
                assert_eq!(decision.ground_steering.ground_steering, 0.6);
                assert_eq!(decision.pedal_position.position, 0.03);
            }
        }
    }

    #[test]
    fn front_limit_is_inclusive() {
        assert_eq!(decide(0.3, 0.5, 0.5).branch, Branch::Avoid);
    }

    #[test]
    fn closing_right_avoids() {
        let decision = decide(0.5, 0.3, 0.5);
        assert_eq!(decision.branch, Branch::Avoid);
        assert_eq!(decision.ground_steering.ground_steering, 0.6);
        assert_eq!(decision.pedal_position.position, 0.03);
        assert_eq!(decision.previous_right_distance, 0.3);
    }

    #[test]
    fn opening_right_steers_into_gap_and_rebases() {
        let decision = decide(0.5, 0.5, 0.3);
        assert_eq!(decision.branch, Branch::Open);
        assert_eq!(decision.ground_steering.ground_steering, -1.0);
        assert_eq!(decision.pedal_position.position, 0.01);
        assert_eq!(decision.previous_right_distance, 0.0);
    }

    #[test]
    fn steady_right_cruises() {
        let decision = decide(0.5, 0.4, 0.4);
        assert_eq!(decision.branch, Branch::Cruise);
        assert_eq!(decision.ground_steering.ground_steering, 0.0);
        assert_eq!(decision.pedal_position.position, 0.04);
        assert_eq!(decision.previous_right_distance, 0.4);
    }

    #[test]
    fn opening_but_close_right_cruises() {
        let decision = decide(0.5, 0.15, 0.1);
        assert_eq!(decision.branch, Branch::Cruise);
        assert_eq!(decision.previous_right_distance, 0.15);
    }

    #[test]
    fn nan_right_distance_cruises() {
        assert_eq!(decide(0.5, f64::NAN, 0.2).branch, Branch::Cruise);
    }

    #[test]
    fn deterministic() {
        for (front, right, previous) in [(0.25, 0.1, 0.0), (0.5, 0.5, 0.3), (1.0, 0.2, 0.2)] {
            assert_eq!(
                decide(front, right, previous),
                decide(front, right, previous)
            );
        }
    }

    #[test]
    fn no_cycle_leaves_zero_requests() {
        let (behavior, store) = behavior();
        assert_eq!(requests(&store), (0.0, 0.0));
        assert_eq!(behavior.previous_right_distance(), 0.0);
    }

    #[test]
    fn step_publishes_requests() {
        let (mut behavior, store) = behavior();
        store.set_front_ultrasonic(DistanceReading::new(0.25));

        let decision = behavior.step();
        assert_eq!(decision.branch, Branch::Avoid);
        assert_eq!(requests(&store), (0.6, 0.03));
        assert_eq!(behavior.previous_right_distance(), convert_to_distance(0.0));
    }

    #[test]
    fn step_carries_right_distance() {
        let (mut behavior, store) = behavior();
        store.set_front_ultrasonic(DistanceReading::new(1.0));
        // 0.5 V converts to a right distance close to 0.125, below the opening limit.
        store.set_right_ir(VoltageReading::new(0.5));
        let near = convert_to_distance(0.5);

        assert_eq!(behavior.step().branch, Branch::Cruise);
        assert_eq!(behavior.previous_right_distance(), near);
        assert_eq!(requests(&store), (0.0, 0.04));

        // Same reading, no trend.
        let decision = behavior.step();
        assert_eq!(decision.branch, Branch::Cruise);
        assert_eq!(decision.right_distance_diff, 0.0);

        // 0.6 V converts to a shorter distance, so the right side is closing in.
        store.set_right_ir(VoltageReading::new(0.6));
        let decision = behavior.step();
        assert_eq!(decision.branch, Branch::Avoid);
        assert!(decision.right_distance_diff > 0.0);
        assert_eq!(requests(&store), (0.6, 0.03));
    }

    #[test]
    fn rebase_survives_into_next_cycle() {
        let (mut behavior, store) = behavior();
        store.set_front_ultrasonic(DistanceReading::new(1.0));
        store.set_right_ir(VoltageReading::new(0.5));
        behavior.step();

        // 0 V converts to the far distance 0.6436: the right side opens up.
        store.set_right_ir(VoltageReading::new(0.0));
        let decision = behavior.step();
        assert_eq!(decision.branch, Branch::Open);
        assert_eq!(behavior.previous_right_distance(), 0.0);
        assert_eq!(requests(&store), (-1.0, 0.01));

        // The next diff is taken against zero, not against 0.6436.
        let decision = behavior.step();
        assert_eq!(decision.right_distance_diff, -convert_to_distance(0.0));
        assert_eq!(decision.branch, Branch::Open);
    }

    #[test]
    fn rear_and_left_do_not_affect_decision() {
        let (mut first, first_store) = behavior();
        let (mut second, second_store) = behavior();
        for store in [&first_store, &second_store] {
            store.set_front_ultrasonic(DistanceReading::new(0.8));
            store.set_right_ir(VoltageReading::new(0.3));
        }
        second_store.set_rear_ultrasonic(DistanceReading::new(0.01));
        second_store.set_left_ir(VoltageReading::new(2.5));

        for _ in 0..3 {
            assert_eq!(first.step(), second.step());
        }
    }

    #[test]
    fn activity_steps_behavior() {
        let (behavior, store) = behavior();
        store.set_front_ultrasonic(DistanceReading::new(0.1));

        let mut activity = BehaviorActivity::build(3.into(), behavior);
        assert_eq!(activity.id(), ActivityId::from(3));
        activity.startup().unwrap();
        activity.step().unwrap();
        activity.shutdown().unwrap();

        assert_eq!(requests(&store), (0.6, 0.03));
        assert_eq!(
            activity.behavior().previous_right_distance(),
            convert_to_distance(0.0)
        );
    }
}

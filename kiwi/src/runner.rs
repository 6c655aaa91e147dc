// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed cadence driver for activities

use crate::activity::Activity;
use crate::error::Error;
use log::{debug, error, info};
use std::thread;
use std::time::{Duration, Instant};

/// Steps a set of activities once per cycle.
pub struct CycleRunner {
    /// The target duration of a cycle
    cycle_time: Duration,
    /// Activities sorted by their ids
    activities: Vec<Box<dyn Activity>>,
    /// Number of cycles that took longer than `cycle_time`
    overruns: u64,
}

impl CycleRunner {
    pub fn new(cycle_time: Duration, mut activities: Vec<Box<dyn Activity>>) -> Self {
        activities.sort_by_key(|activity| activity.id());
        Self {
            cycle_time,
            activities,
            overruns: 0,
        }
    }

    pub fn cycle_time(&self) -> Duration {
        self.cycle_time
    }

    /// Number of cycles so far that did not finish within the cycle time
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Run the activity lifecycle, i.e. startup, stepping, shutdown.
    ///
    /// Steps `cycles` times, or forever if `None`. Activities are started up and stepped
    /// in order of their ids and shut down in reverse order. A failing activity aborts
    /// the run. Shutdown is still attempted for every activity that was started.
    pub fn run(&mut self, cycles: Option<u64>) -> Result<(), Error> {
        let mut started = 0;
        let result = self.startup_all(&mut started).and_then(|_| {
            info!("Started {started} activities");
            self.step_all(cycles)
        });

        // Shut down in reverse order, keeping the first error.
        let shutdown = self.activities[..started]
            .iter_mut()
            .rev()
            .map(|activity| activity.shutdown())
            .fold(Ok(()), |result, next| result.and(next));

        result.and(shutdown)
    }

    fn startup_all(&mut self, started: &mut usize) -> Result<(), Error> {
        for activity in self.activities.iter_mut() {
            debug!("Starting up activity {}", activity.id());
            activity.startup()?;
            *started += 1;
        }
        Ok(())
    }

    fn step_all(&mut self, cycles: Option<u64>) -> Result<(), Error> {
        let mut cycle = 0u64;
        while cycles.map_or(true, |cycles| cycle < cycles) {
            let cycle_start = Instant::now();
            debug!("Starting cycle {cycle}");

            for activity in self.activities.iter_mut() {
                activity.step()?;
            }
            cycle += 1;

            let cycle_duration = cycle_start.elapsed();
            let time_left = self.cycle_time.saturating_sub(cycle_duration);
            if time_left.is_zero() {
                self.overruns += 1;
                error!(
                    "Finished cycle after {cycle_duration:?}. Expected to be less than {:?}",
                    self.cycle_time
                );
            } else {
                debug!("Finished cycle after {cycle_duration:?}. Sleeping for {time_left:?}");
                thread::sleep(time_left);
            }
        }
        info!("Completed {cycle} cycles, {} overran", self.overruns);
        Ok(())
    }
}

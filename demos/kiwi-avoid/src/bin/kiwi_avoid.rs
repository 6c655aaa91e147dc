// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{anyhow, Context, Error};
use kiwi::prelude::*;
use kiwi_avoid::activities::components::{
    spawn_periodic, spawn_producer, Actuator, Infrared, Mount, Side, Ultrasonic,
};
use kiwi_avoid::config::*;
use log::{info, LevelFilter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();
    kiwi_logger::init(args.log_level.unwrap_or(LevelFilter::Debug), true);

    info!("Starting kiwi-avoid with cycle time {:?}", args.cycle_time());

    let store = Arc::new(SensorStore::new());
    let running = Arc::new(AtomicBool::new(true));

    // Sensors and actuator run on their own threads, decoupled from the behavior cycle.
    let threads = {
        let seed = args.seed;
        let mut actuator = Actuator::build(store.clone());
        vec![
            spawn_producer(
                Ultrasonic::build(Mount::Front, seed),
                store.clone(),
                ULTRASONIC_PERIOD,
                running.clone(),
            ),
            spawn_producer(
                Ultrasonic::build(Mount::Rear, seed.wrapping_add(1)),
                store.clone(),
                ULTRASONIC_PERIOD,
                running.clone(),
            ),
            spawn_producer(
                Infrared::build(Side::Left, seed.wrapping_add(2)),
                store.clone(),
                INFRARED_PERIOD,
                running.clone(),
            ),
            spawn_producer(
                Infrared::build(Side::Right, seed.wrapping_add(3)),
                store.clone(),
                INFRARED_PERIOD,
                running.clone(),
            ),
            spawn_periodic(
                "Actuator".to_string(),
                ACTUATOR_PERIOD,
                running.clone(),
                move || {
                    actuator.poll();
                },
            ),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to spawn emulation threads")?
    };

    let behavior: Box<dyn Activity> = Box::new(BehaviorActivity::build(
        BEHAVIOR_ACTIVITY_ID,
        Behavior::new(store),
    ));
    let mut runner = CycleRunner::new(args.cycle_time(), vec![behavior]);
    let result = runner.run(args.cycles).context("behavior cycle failed");

    running.store(false, Ordering::Relaxed);
    for thread in threads {
        thread
            .join()
            .map_err(|_| anyhow!("emulation thread panicked"))?;
    }

    info!("Shut down kiwi-avoid");
    result
}

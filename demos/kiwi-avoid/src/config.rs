// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use argh::FromArgs;
use kiwi::activity::ActivityId;
use log::LevelFilter;
use std::time::Duration;

pub const BEHAVIOR_ACTIVITY_ID: ActivityId = ActivityId::new(1);

/// Periods of the emulated sensors, independent of the behavior cycle
pub const ULTRASONIC_PERIOD: Duration = Duration::from_millis(40);
pub const INFRARED_PERIOD: Duration = Duration::from_millis(25);
/// Period at which the emulated actuator fetches requests
pub const ACTUATOR_PERIOD: Duration = Duration::from_millis(50);

#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help", "help"))]
/// Reactive obstacle avoidance with emulated sensors
pub struct Args {
    #[argh(description = "cycle time of the behavior in milliseconds")]
    #[argh(option, short = 'c', default = "100")]
    pub cycle_time: u64,

    #[argh(description = "number of cycles to run, forever if omitted")]
    #[argh(option, short = 'n')]
    pub cycles: Option<u64>,

    #[argh(description = "log level")]
    #[argh(option, short = 'l')]
    pub log_level: Option<LevelFilter>,

    #[argh(description = "seed of the sensor emulation")]
    #[argh(option, short = 's', default = "0")]
    pub seed: u64,
}

impl Args {
    pub fn cycle_time(&self) -> Duration {
        Duration::from_millis(self.cycle_time)
    }
}

#[cfg(test)]
mod test {
    use super::Args;
    use argh::FromArgs;
    use log::LevelFilter;
    use std::time::Duration;

    #[test]
    fn defaults() {
        let args = Args::from_args(&["kiwi-avoid"], &[]).unwrap();
        assert_eq!(args.cycle_time(), Duration::from_millis(100));
        assert_eq!(args.cycles, None);
        assert_eq!(args.log_level, None);
        assert_eq!(args.seed, 0);
    }

    #[test]
    fn parses_options() {
        let args = Args::from_args(
            &["kiwi-avoid"],
            &["-c", "20", "--cycles", "5", "-l", "trace", "--seed", "9"],
        )
        .unwrap();
        assert_eq!(args.cycle_time(), Duration::from_millis(20));
        assert_eq!(args.cycles, Some(5));
        assert_eq!(args.log_level, Some(LevelFilter::Trace));
        assert_eq!(args.seed, 9);
    }
}

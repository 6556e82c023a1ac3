#![allow(dead_code)]

use embassy_time::Instant;
use myrtio_touch_dimmer::{Dimmer, DimmerConfig, OutputDriver, SettledListener};

#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub writes: Vec<u8>,
}

impl OutputDriver for RecordingOutput {
    fn write(&mut self, level: u8) {
        self.writes.push(level);
    }
}

#[derive(Debug, Default)]
pub struct RecordingListener {
    pub settled: Vec<(u8, bool)>,
}

impl SettledListener for RecordingListener {
    fn on_settled(&mut self, level: u8, is_on: bool) {
        self.settled.push((level, is_on));
    }
}

pub type TestDimmer = Dimmer<RecordingOutput, RecordingListener>;

pub const TICK: u64 = 20;

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

pub fn dimmer(initial_level: u8) -> TestDimmer {
    dimmer_with(DimmerConfig::DEFAULT, initial_level)
}

pub fn dimmer_with(config: DimmerConfig, initial_level: u8) -> TestDimmer {
    Dimmer::new(
        config,
        initial_level,
        RecordingOutput::default(),
        RecordingListener::default(),
        at(0),
    )
}

/// Advance once per fade tick starting one tick after `start`, returns the time of the last call
pub fn run_ticks(dimmer: &mut TestDimmer, start: u64, ticks: u64) -> u64 {
    let mut now = start;
    for _ in 0..ticks {
        now += TICK;
        dimmer.advance(at(now));
    }
    now
}

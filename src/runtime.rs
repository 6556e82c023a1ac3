//! Host loop driver.
//!
//! The caller samples the clock and calls [`DimmerRuntime::tick`] once per
//! loop iteration; nothing in here sleeps or waits.
//!
//! ```ignore
//! static COMMANDS: CommandChannel = CommandChannel::new();
//!
//! let mut store = LevelStore::new(eeprom);
//! let level = store.load_or_default();
//! let dimmer = Dimmer::new(DimmerConfig::DEFAULT, level, PwmOutput::linear(pwm), (reporter, store), Instant::now());
//! let mut runtime = DimmerRuntime::new(sensor, COMMANDS.receiver(), dimmer);
//!
//! loop {
//!     runtime.tick(Instant::now());
//! }
//! ```

use embassy_time::Instant;

use crate::dimmer::Dimmer;
use crate::touch::{TouchEdge, TouchEdges, TouchSensor};
use crate::transport::{CommandReceiver, RemoteCommand};
use crate::{OutputDriver, SettledListener};

/// Cooperative driver wiring the touch sensor and command queue to a [`Dimmer`]
pub struct DimmerRuntime<'a, T: TouchSensor, O: OutputDriver, L: SettledListener> {
    sensor: T,
    edges: TouchEdges,
    commands: CommandReceiver<'a>,
    dimmer: Dimmer<O, L>,
}

impl<'a, T: TouchSensor, O: OutputDriver, L: SettledListener> DimmerRuntime<'a, T, O, L> {
    pub const fn new(sensor: T, commands: CommandReceiver<'a>, dimmer: Dimmer<O, L>) -> Self {
        Self {
            sensor,
            edges: TouchEdges::new(),
            commands,
            dimmer,
        }
    }

    /// Run one host loop iteration
    ///
    /// Order is fixed: touch edge first, then queued remote commands, then the
    /// per-tick action of the dimmer.
    pub fn tick(&mut self, now: Instant) {
        match self.edges.push(self.sensor.is_touched()) {
            Some(TouchEdge::Pressed) => self.dimmer.on_touch_started(now),
            Some(TouchEdge::Released) => self.dimmer.on_touch_ended(now),
            None => {}
        }

        for command in self.commands.drain() {
            dispatch(&mut self.dimmer, command, now);
        }

        self.dimmer.advance(now);
    }

    /// Get a reference to the dimmer.
    pub const fn dimmer(&self) -> &Dimmer<O, L> {
        &self.dimmer
    }

    /// Get a mutable reference to the dimmer.
    pub const fn dimmer_mut(&mut self) -> &mut Dimmer<O, L> {
        &mut self.dimmer
    }

    /// Get a mutable reference to the touch sensor.
    pub const fn sensor_mut(&mut self) -> &mut T {
        &mut self.sensor
    }
}

/// Forward a decoded remote command to the dimmer
pub fn dispatch<O: OutputDriver, L: SettledListener>(
    dimmer: &mut Dimmer<O, L>,
    command: RemoteCommand,
    now: Instant,
) {
    match command {
        RemoteCommand::Level(percent) => dimmer.set_remote_level(percent, now),
        RemoteCommand::Power(on) => dimmer.set_remote_on_off(on, now),
    }
}

#![no_std]

pub mod channel;
pub mod config;
pub mod dimmer;
pub mod fade;
pub mod level;
pub mod output;
pub mod persistence;
pub mod runtime;
pub mod state;
pub mod touch;
pub mod transport;

pub use channel::{Channel, Receiver, Sender};
pub use config::DimmerConfig;
pub use dimmer::Dimmer;
pub use level::{DimDirection, MAX_LEVEL};
pub use output::{PwmCurve, PwmOutput};
pub use persistence::{LevelStore, StorageDriver, StorageError};
pub use runtime::DimmerRuntime;
pub use state::{LightState, StateId};
pub use touch::{PinTouchSensor, TouchEdge, TouchEdges, TouchSensor};
pub use transport::{
    CommandChannel, CommandError, CommandReceiver, CommandSender, MessageKind, MessageSink,
    RemoteCommand, TransportReporter,
};

pub use embassy_time::{Duration, Instant};

/// Abstract brightness output trait
///
/// Implement this trait to support different hardware platforms.
/// The dimmer is generic over this trait.
pub trait OutputDriver {
    /// Apply a brightness level in `0..=100`
    fn write(&mut self, level: u8);
}

/// Receiver of settled light states
///
/// Called once every time the dimmer comes to rest, never during a fade.
pub trait SettledListener {
    fn on_settled(&mut self, level: u8, is_on: bool);
}

impl<T: SettledListener + ?Sized> SettledListener for &mut T {
    fn on_settled(&mut self, level: u8, is_on: bool) {
        (**self).on_settled(level, is_on);
    }
}

impl<A: SettledListener, B: SettledListener> SettledListener for (A, B) {
    fn on_settled(&mut self, level: u8, is_on: bool) {
        self.0.on_settled(level, is_on);
        self.1.on_settled(level, is_on);
    }
}

//! Remote command decoding and settled state encoding.
//!
//! Messages follow the MySensors dimmer convention: a numeric value type and
//! an ASCII payload. Anything that does not decode is rejected here and never
//! reaches the dimmer.

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::SettledListener;
use crate::channel::{Channel, Receiver, Sender};

const KIND_LIGHT: u8 = 2;
const KIND_PERCENTAGE: u8 = 3;

/// Capacity of the remote command queue
pub const COMMAND_CHANNEL_SIZE: usize = 4;

/// Value types understood by the dimmer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageKind {
    /// On/off status (`V_LIGHT`, `V_STATUS`)
    Light = KIND_LIGHT,
    /// Brightness percentage (`V_PERCENTAGE`, `V_DIMMER`)
    Percentage = KIND_PERCENTAGE,
}

impl MessageKind {
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            KIND_LIGHT => Some(Self::Light),
            KIND_PERCENTAGE => Some(Self::Percentage),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Reasons a remote message is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The value type is not handled by the dimmer
    UnknownKind(u8),
    /// The payload is empty or not an integer
    InvalidPayload,
    /// On/off payload other than `0` or `1`
    InvalidState(i32),
}

/// Command delivered to the dimmer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Set brightness percentage, clamped by the dimmer
    Level(i32),
    /// Turn the light on or off
    Power(bool),
}

impl RemoteCommand {
    /// Decode a raw message
    pub fn decode(kind: u8, payload: &str) -> Result<Self, CommandError> {
        let result = MessageKind::from_raw(kind)
            .ok_or(CommandError::UnknownKind(kind))
            .and_then(|kind| Self::decode_kind(kind, payload));

        #[cfg(feature = "esp32-log")]
        if let Err(error) = result {
            println!("[RemoteCommand.decode] rejected {:?} ({})", error, payload);
        }

        result
    }

    fn decode_kind(kind: MessageKind, payload: &str) -> Result<Self, CommandError> {
        let value = parse_int(payload)?;
        match kind {
            MessageKind::Light => match value {
                0 => Ok(Self::Power(false)),
                1 => Ok(Self::Power(true)),
                other => Err(CommandError::InvalidState(other)),
            },
            MessageKind::Percentage => Ok(Self::Level(value)),
        }
    }
}

fn parse_int(payload: &str) -> Result<i32, CommandError> {
    payload
        .trim()
        .parse::<i32>()
        .map_err(|_| CommandError::InvalidPayload)
}

/// Message reported to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub kind: MessageKind,
    pub value: u8,
}

impl OutgoingMessage {
    /// ASCII payload of the message
    pub fn payload(&self) -> String<4> {
        let mut payload = String::new();
        // Values are at most 3 digits, so this never overflows
        let _ = write!(payload, "{}", self.value);
        payload
    }
}

/// Encode a settled state into the brightness and status reports
pub const fn encode_settled(level: u8, is_on: bool) -> [OutgoingMessage; 2] {
    [
        OutgoingMessage {
            kind: MessageKind::Percentage,
            value: if is_on { level } else { 0 },
        },
        OutgoingMessage {
            kind: MessageKind::Light,
            value: is_on as u8,
        },
    ]
}

/// Outgoing side of the transport
pub trait MessageSink {
    fn send(&mut self, message: OutgoingMessage);
}

/// Reports settled states to the controller, skipping repeats
pub struct TransportReporter<S: MessageSink> {
    sink: S,
    last: Option<(u8, bool)>,
}

impl<S: MessageSink> TransportReporter<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink, last: None }
    }

    /// Get a reference to the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: MessageSink> SettledListener for TransportReporter<S> {
    fn on_settled(&mut self, level: u8, is_on: bool) {
        let reported = (if is_on { level } else { 0 }, is_on);
        if self.last == Some(reported) {
            return;
        }
        self.last = Some(reported);
        for message in encode_settled(level, is_on) {
            self.sink.send(message);
        }
    }
}

/// Type alias for command sender
pub type CommandSender<'a> = Sender<'a, RemoteCommand, COMMAND_CHANNEL_SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a> = Receiver<'a, RemoteCommand, COMMAND_CHANNEL_SIZE>;

/// Type alias for the command channel
pub type CommandChannel = Channel<RemoteCommand, COMMAND_CHANNEL_SIZE>;

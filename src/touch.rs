use embedded_hal::digital::InputPin;

/// Source of the debounced "currently touched" signal
pub trait TouchSensor {
    fn is_touched(&mut self) -> bool;
}

/// Transition of the touch signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEdge {
    Pressed,
    Released,
}

/// Turns the polled touch level into edge events
#[derive(Debug, Default)]
pub struct TouchEdges {
    touched: bool,
}

impl TouchEdges {
    pub const fn new() -> Self {
        Self { touched: false }
    }

    /// Feed the latest sample, returns an edge if the level changed
    pub const fn push(&mut self, touched: bool) -> Option<TouchEdge> {
        if touched == self.touched {
            return None;
        }
        self.touched = touched;
        if touched {
            Some(TouchEdge::Pressed)
        } else {
            Some(TouchEdge::Released)
        }
    }

    pub const fn is_touched(&self) -> bool {
        self.touched
    }
}

/// Touch sensor read from a digital pin, e.g. the output of a touch controller IC
///
/// Read errors are reported as "not touched".
pub struct PinTouchSensor<P: InputPin> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> PinTouchSensor<P> {
    /// Sensor that reads touched when the pin is high
    pub const fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// Sensor that reads touched when the pin is low
    pub const fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> TouchSensor for PinTouchSensor<P> {
    fn is_touched(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        level.unwrap_or(false)
    }
}

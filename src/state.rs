use embassy_time::{Duration, Instant};

use crate::level::DimDirection;

/// States of the gesture and fade machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    /// Brightness reached its target, nothing pending
    Idle,
    /// A touch started and has not yet turned into a hold
    TouchBegin,
    /// The touch is held, brightness follows the dimming direction
    Dimming,
    /// The touch was released
    TouchEnd,
    /// Brightness fades toward the effective target
    ApplyTarget,
}

impl StateId {
    /// Human readable state name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TouchBegin => "touch_begin",
            Self::Dimming => "dimming",
            Self::TouchEnd => "touch_end",
            Self::ApplyTarget => "apply_target",
        }
    }

    /// Check if a touch is currently in progress
    pub const fn is_touching(self) -> bool {
        matches!(self, Self::TouchBegin | Self::Dimming)
    }
}

/// Brightness state of the light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    /// Level currently applied to the output
    pub current_level: u8,
    /// Level to restore when the light is turned on, kept while off
    pub desired_level: u8,
    /// Power flag, when off the effective target is 0
    pub is_on: bool,
    /// Sticky direction used by touch-and-hold dimming
    pub dim_direction: DimDirection,
}

impl LightState {
    /// Create the state seeded from a persisted level
    pub const fn from_level(level: u8) -> Self {
        Self {
            current_level: level,
            desired_level: level,
            is_on: level != 0,
            dim_direction: DimDirection::Up,
        }
    }

    /// Level the light converges to
    pub const fn effective_target(&self) -> u8 {
        if self.is_on { self.desired_level } else { 0 }
    }
}

/// Active state and the moment it was entered
#[derive(Debug, Clone, Copy)]
pub(crate) struct StateContext {
    pub(crate) state: StateId,
    pub(crate) entered_at: Instant,
}

impl StateContext {
    pub(crate) const fn new(state: StateId, now: Instant) -> Self {
        Self {
            state,
            entered_at: now,
        }
    }

    pub(crate) fn time_in_state(&self, now: Instant) -> Duration {
        Duration::from_millis(now.as_millis().saturating_sub(self.entered_at.as_millis()))
    }
}

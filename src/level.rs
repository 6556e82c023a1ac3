//! Brightness level arithmetic.
//!
//! Levels are percentages in `0..=MAX_LEVEL`. Everything entering the dimmer
//! is clamped into that range, nothing is rejected.

/// Highest brightness level (fully on)
pub const MAX_LEVEL: u8 = 100;

/// Direction of a touch-and-hold dimming run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimDirection {
    #[default]
    Up,
    Down,
}

impl DimDirection {
    /// Get the opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    const fn delta(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Clamp an arbitrary integer into the valid level range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_level(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > MAX_LEVEL as i32 {
        MAX_LEVEL
    } else {
        value as u8
    }
}

/// Result of a single level step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The level moved to the contained value
    Moved(u8),
    /// The level is already at the bound in the requested direction
    Blocked,
}

/// Move `level` one unit in `direction`, refusing to leave the valid range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn step(level: u8, direction: DimDirection) -> Step {
    let next = level as i16 + direction.delta();
    if next < 0 || next > MAX_LEVEL as i16 {
        return Step::Blocked;
    }
    Step::Moved(next as u8)
}

/// Move `level` one unit toward `target`
///
/// Returns `None` if the level already equals the target.
pub const fn step_toward(level: u8, target: u8) -> Option<u8> {
    let direction = if level < target {
        DimDirection::Up
    } else if level > target {
        DimDirection::Down
    } else {
        return None;
    };
    match step(level, direction) {
        Step::Moved(next) => Some(next),
        Step::Blocked => None,
    }
}

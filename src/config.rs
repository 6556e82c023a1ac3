use embassy_time::Duration;

use crate::level::MAX_LEVEL;

/// Timing and behaviour configuration of the dimmer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimmerConfig {
    /// Duration of a full 0 to 100 fade, used for both remote and touch changes
    pub fade_span: Duration,
    /// Minimum tap duration that toggles the power
    pub toggle_power: Duration,
    /// Touch duration after which the hold starts dimming
    pub dimming_hold: Duration,
    /// Minimum quiet time between two accepted touches
    pub between_actions: Duration,
    /// Level used when the light is turned on with nothing to restore
    pub default_level: u8,
    /// Start dark and fade in to the stored level instead of applying it at once
    pub boot_fade: bool,
}

impl DimmerConfig {
    pub const DEFAULT: Self = Self {
        fade_span: Duration::from_millis(2000),
        toggle_power: Duration::from_millis(100),
        dimming_hold: Duration::from_millis(500),
        between_actions: Duration::from_millis(200),
        default_level: 50,
        boot_fade: false,
    };

    /// Time between two single-step level changes
    pub const fn fade_tick(&self) -> Duration {
        let tick = self.fade_span.as_millis() / MAX_LEVEL as u64;
        if tick == 0 {
            return Duration::from_millis(1);
        }
        Duration::from_millis(tick)
    }
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

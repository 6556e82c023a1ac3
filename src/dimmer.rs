//! Gesture and fade state machine
//!
//! Reconciles touch edges and remote commands into one brightness level that
//! converges toward its target at a constant rate. All timing is elapsed time
//! against the `now` instant passed into each entry point, nothing here blocks.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::DimmerConfig;
use crate::fade::FadeTicker;
use crate::level::{MAX_LEVEL, Step, clamp_level, step, step_toward};
use crate::state::{LightState, StateContext, StateId};
use crate::{OutputDriver, SettledListener};

/// Touch and remote controlled dimmer
pub struct Dimmer<O: OutputDriver, L: SettledListener> {
    // External dependencies and configuration
    output: O,
    listener: L,
    config: DimmerConfig,

    // Internal state
    light: LightState,
    context: StateContext,
    fade: FadeTicker,
}

impl<O: OutputDriver, L: SettledListener> Dimmer<O, L> {
    /// Create a new dimmer seeded with a persisted level
    ///
    /// The initial level is pushed to the output right away. With
    /// [`DimmerConfig::boot_fade`] the output starts dark and fades in instead.
    pub fn new(
        config: DimmerConfig,
        initial_level: u8,
        mut output: O,
        listener: L,
        now: Instant,
    ) -> Self {
        let initial_level = initial_level.min(MAX_LEVEL);
        let fade_in = config.boot_fade && initial_level > 0;

        let mut light = LightState::from_level(initial_level);
        if fade_in {
            light.current_level = 0;
        }
        output.write(light.current_level);

        let mut dimmer = Self {
            output,
            listener,
            config,
            light,
            context: StateContext::new(StateId::Idle, now),
            fade: FadeTicker::new(config.fade_tick(), now),
        };
        if fade_in {
            dimmer.switch_to(StateId::ApplyTarget, now);
        }
        dimmer
    }

    /// Rising edge of the touch signal
    ///
    /// Ignored while a touch is already in progress.
    pub fn on_touch_started(&mut self, now: Instant) {
        if self.context.state.is_touching() {
            return;
        }
        self.switch_to(StateId::TouchBegin, now);
    }

    /// Falling edge of the touch signal
    ///
    /// Ignored unless a touch is in progress, which also drops the release of a
    /// touch that was debounced.
    pub fn on_touch_ended(&mut self, now: Instant) {
        if !self.context.state.is_touching() {
            return;
        }
        self.switch_to(StateId::TouchEnd, now);
    }

    /// Remote brightness command
    ///
    /// `percent` is clamped into `0..=100`. A value of 0 turns the light off,
    /// anything else turns it on at that level. Nothing happens if the clamped
    /// value equals the current level.
    pub fn set_remote_level(&mut self, percent: i32, now: Instant) {
        let level = clamp_level(percent);
        if level == self.light.current_level {
            return;
        }
        if level > 0 {
            self.light.is_on = true;
            self.light.desired_level = level;
        } else {
            self.light.is_on = false;
        }
        self.switch_to(StateId::ApplyTarget, now);
    }

    /// Remote power command
    pub fn set_remote_on_off(&mut self, on: bool, now: Instant) {
        if on == self.light.is_on {
            return;
        }
        if on && self.light.current_level == 0 && self.light.desired_level == 0 {
            // Never turn on at zero brightness
            self.light.desired_level = self.default_level();
        }
        self.light.is_on = on;
        self.switch_to(StateId::ApplyTarget, now);
    }

    /// Run the per-tick action of the active state
    ///
    /// Call this once per host loop iteration.
    pub fn advance(&mut self, now: Instant) {
        match self.context.state {
            StateId::TouchBegin => {
                if self.context.time_in_state(now) > self.config.dimming_hold {
                    self.switch_to(StateId::Dimming, now);
                }
            }
            StateId::Dimming => {
                if self.fade.poll(now) {
                    self.dim_step();
                }
            }
            StateId::ApplyTarget => {
                let target = self.light.effective_target();
                if self.light.current_level == target {
                    self.switch_to(StateId::Idle, now);
                } else if self.fade.poll(now) {
                    if let Some(level) = step_toward(self.light.current_level, target) {
                        self.apply_level(level);
                    }
                }
            }
            StateId::Idle | StateId::TouchEnd => {}
        }
    }

    /// Active state
    pub const fn state(&self) -> StateId {
        self.context.state
    }

    /// Current light state
    pub const fn light(&self) -> &LightState {
        &self.light
    }

    /// Active configuration
    pub const fn config(&self) -> &DimmerConfig {
        &self.config
    }

    /// Time spent in the active state
    pub fn time_in_state(&self, now: Instant) -> Duration {
        self.context.time_in_state(now)
    }

    /// Get a reference to the output driver.
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Get a reference to the settled listener.
    pub const fn listener(&self) -> &L {
        &self.listener
    }

    /// Get a mutable reference to the settled listener.
    pub const fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Change state, firing the entry action if the state actually changes
    ///
    /// Entry actions may request a follow-up state, which is applied in the
    /// same call.
    fn switch_to(&mut self, state: StateId, now: Instant) {
        let mut next = Some(state);
        while let Some(state) = next.take() {
            let previous = self.context;
            self.context = StateContext::new(state, now);
            self.fade.restart(now);

            #[cfg(feature = "esp32-log")]
            println!(
                "[Dimmer.switch_to] {} -> {} after {} ms",
                previous.state.as_str(),
                state.as_str(),
                previous.time_in_state(now).as_millis()
            );

            if previous.state != state {
                next = self.enter(state, previous, now);
            }
        }
    }

    /// Entry action of `state`, returns the state to switch to next
    fn enter(&mut self, state: StateId, previous: StateContext, now: Instant) -> Option<StateId> {
        match state {
            StateId::Idle => {
                self.settle();
                None
            }
            StateId::TouchBegin => {
                self.light.dim_direction = self.light.dim_direction.reversed();
                if previous.time_in_state(now) < self.config.between_actions {
                    return Some(StateId::Idle);
                }
                None
            }
            StateId::TouchEnd => {
                if previous.state == StateId::Dimming {
                    return Some(StateId::Idle);
                }
                let touch_duration = previous.time_in_state(now);
                if touch_duration >= self.config.dimming_hold
                    || touch_duration < self.config.toggle_power
                {
                    return Some(StateId::Idle);
                }
                self.light.is_on = !self.light.is_on;
                if self.light.is_on && self.light.desired_level == 0 {
                    self.light.desired_level = self.default_level();
                }
                Some(StateId::ApplyTarget)
            }
            StateId::Dimming | StateId::ApplyTarget => None,
        }
    }

    /// Idle entry action: report the settled state outward
    fn settle(&mut self) {
        if self.light.is_on && self.light.current_level == 0 {
            // Dimmed all the way down
            self.light.is_on = false;
        }
        self.listener.on_settled(self.light.current_level, self.light.is_on);
        if self.light.is_on {
            self.light.desired_level = self.light.current_level;
        }
    }

    /// Single dimming step in the sticky direction, reversing at the bounds
    fn dim_step(&mut self) {
        let direction = self.light.dim_direction;
        let level = match step(self.light.current_level, direction) {
            Step::Moved(level) => level,
            Step::Blocked => {
                self.reverse_dimming();
                match step(self.light.current_level, self.light.dim_direction) {
                    Step::Moved(level) => level,
                    Step::Blocked => return,
                }
            }
        };
        self.apply_level(level);
        if level > 0 {
            self.light.is_on = true;
            self.light.desired_level = level;
        }
        if level == 0 || level == MAX_LEVEL {
            self.reverse_dimming();
        }
    }

    fn reverse_dimming(&mut self) {
        self.light.dim_direction = self.light.dim_direction.reversed();
        #[cfg(feature = "esp32-log")]
        println!(
            "[Dimmer.dim_step] reversed to {:?} at {}",
            self.light.dim_direction, self.light.current_level
        );
    }

    /// Update the current level and push it to the output if it changed
    fn apply_level(&mut self, level: u8) {
        if level == self.light.current_level {
            return;
        }
        self.light.current_level = level;
        self.output.write(level);
    }

    fn default_level(&self) -> u8 {
        self.config.default_level.clamp(1, MAX_LEVEL)
    }
}

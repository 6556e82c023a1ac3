use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::level::MAX_LEVEL;

/// Mapping from brightness level to PWM duty cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PwmCurve {
    /// Duty proportional to the level
    Linear,
    /// Perceptual curve, `duty = max * (level / 100) ^ gamma`
    Gamma(f32),
}

impl PwmCurve {
    /// Duty cycle for `level` out of `max_duty`
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn duty(self, level: u8, max_duty: u16) -> u16 {
        let level = level.min(MAX_LEVEL);
        match self {
            Self::Linear => {
                let scaled = (u32::from(max_duty) * u32::from(level) + u32::from(MAX_LEVEL) / 2)
                    / u32::from(MAX_LEVEL);
                scaled as u16
            }
            Self::Gamma(gamma) => {
                let ratio = f32::from(level) / f32::from(MAX_LEVEL);
                let duty = libm::roundf(libm::powf(ratio, gamma) * f32::from(max_duty));
                duty.clamp(0.0, f32::from(max_duty)) as u16
            }
        }
    }
}

/// Brightness output on a PWM channel
pub struct PwmOutput<P: SetDutyCycle> {
    pwm: P,
    curve: PwmCurve,
}

impl<P: SetDutyCycle> PwmOutput<P> {
    pub const fn new(pwm: P, curve: PwmCurve) -> Self {
        Self { pwm, curve }
    }

    pub const fn linear(pwm: P) -> Self {
        Self::new(pwm, PwmCurve::Linear)
    }

    /// Get a reference to the PWM channel.
    pub const fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: SetDutyCycle> OutputDriver for PwmOutput<P> {
    fn write(&mut self, level: u8) {
        let duty = self.curve.duty(level, self.pwm.max_duty_cycle());
        if let Err(_error) = self.pwm.set_duty_cycle(duty) {
            #[cfg(feature = "esp32-log")]
            println!("[PwmOutput.write] failed to set duty {}: {:?}", duty, _error);
        }
    }
}

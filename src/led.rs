use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::constants::BRIGHTNESS_MAX;

/// LED brightness, 0 is off and 255 is full.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Brightness(pub u8);

impl Brightness {
    pub const OFF: Brightness = Brightness(0);
    pub const FULL: Brightness = Brightness(BRIGHTNESS_MAX);
}

/// Map a brightness to the 8-bit duty written to the driver.
///
/// With `invert` set the driver sinks current, so 255 is off and 0 is full.
pub const fn duty_for(brightness: Brightness, invert: bool) -> u8 {
    if invert {
        BRIGHTNESS_MAX - brightness.0
    } else {
        brightness.0
    }
}

/// One PWM colour channel of the light.
pub struct LedChannel<P> {
    pwm: P,
    max_duty: u16,
    invert: bool,
}

impl<P: SetDutyCycle> LedChannel<P> {
    pub fn new(pwm: P, invert: bool) -> Self {
        let max_duty = pwm.max_duty_cycle();
        Self {
            pwm,
            max_duty,
            invert,
        }
    }

    pub fn set(&mut self, brightness: Brightness) -> Result<(), P::Error> {
        let duty = duty_for(brightness, self.invert) as u32;
        // Scale the 8-bit value to the timer resolution
        let scaled = duty * self.max_duty as u32 / BRIGHTNESS_MAX as u32;
        self.pwm.set_duty_cycle(scaled as u16)
    }

    pub fn off(&mut self) -> Result<(), P::Error> {
        self.set(Brightness::OFF)
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

/// What to do with the board's built-in LED at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinLedMode {
    /// Leave the pin in its default state
    Untouched,
    Low,
    /// Off on a Wemos D1 Mini
    High,
}

impl BuiltinLedMode {
    pub const fn pin_state(self) -> Option<PinState> {
        match self {
            BuiltinLedMode::Untouched => None,
            BuiltinLedMode::Low => Some(PinState::Low),
            BuiltinLedMode::High => Some(PinState::High),
        }
    }

    pub fn apply<P: OutputPin>(self, pin: &mut P) -> Result<(), P::Error> {
        match self.pin_state() {
            Some(state) => {
                log::debug!("Setting built-in LED {:?}", self);
                pin.set_state(state)
            }
            None => Ok(()),
        }
    }
}

impl TryFrom<i8> for BuiltinLedMode {
    type Error = crate::rules::RuleError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match crate::rules::check_builtin_led_mode(value.into())? {
            0 => Ok(BuiltinLedMode::Low),
            1 => Ok(BuiltinLedMode::High),
            _ => Ok(BuiltinLedMode::Untouched),
        }
    }
}

impl From<BuiltinLedMode> for i8 {
    fn from(mode: BuiltinLedMode) -> Self {
        match mode {
            BuiltinLedMode::Untouched => -1,
            BuiltinLedMode::Low => 0,
            BuiltinLedMode::High => 1,
        }
    }
}

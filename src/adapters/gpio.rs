use crate::domain::model::{PinBinding, Pull};
use crate::domain::ports::GpioBackend;
use crate::utils::error::{ButtonError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[cfg(feature = "rpi")]
pub use self::rpi::RppalGpio;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(feature = "rpi")]
mod rpi {
    use super::lock;
    use crate::domain::model::{PinBinding, Pull};
    use crate::domain::ports::GpioBackend;
    use crate::utils::error::{ButtonError, Result};
    use rppal::gpio::{Gpio, InputPin};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Raspberry Pi GPIO through `/dev/gpiomem`, BCM numbering.
    pub struct RppalGpio {
        gpio: Gpio,
        inputs: Mutex<HashMap<u8, InputPin>>,
    }

    impl RppalGpio {
        /// Opens the GPIO peripheral and sets every bound pin up as a
        /// pull-up input. Call once from the process entry point.
        pub fn init(bindings: &[PinBinding]) -> Result<Self> {
            let backend = Self {
                gpio: Gpio::new()?,
                inputs: Mutex::new(HashMap::new()),
            };
            for binding in bindings {
                backend.configure(binding.pin, Pull::Up)?;
                tracing::debug!("Configured pin {} for {}", binding.pin, binding.target);
            }
            Ok(backend)
        }
    }

    impl GpioBackend for RppalGpio {
        fn configure(&self, pin: u8, pull: Pull) -> Result<()> {
            let mut inputs = lock(&self.inputs);
            // rppal refuses to hand out a pin that is still held
            inputs.remove(&pin);
            let raw = self.gpio.get(pin)?;
            let input = match pull {
                Pull::Up => raw.into_input_pullup(),
                Pull::Down => raw.into_input_pulldown(),
                Pull::Off => raw.into_input(),
            };
            inputs.insert(pin, input);
            Ok(())
        }

        fn read(&self, pin: u8) -> Result<bool> {
            let inputs = lock(&self.inputs);
            let input = inputs
                .get(&pin)
                .ok_or(ButtonError::PinNotConfigured { pin })?;
            Ok(input.is_high())
        }
    }
}

#[derive(Debug)]
struct SimulatedPin {
    configured: bool,
    level: bool,
    script: VecDeque<bool>,
    reads: usize,
}

impl SimulatedPin {
    fn idle(high: bool) -> Self {
        Self {
            configured: false,
            level: high,
            script: VecDeque::new(),
            reads: 0,
        }
    }
}

/// In-memory GPIO for tests and dry runs.
///
/// Each pin replays its scripted raw levels one per read, then keeps
/// returning its resting level.
#[derive(Debug, Default)]
pub struct SimulatedGpio {
    pins: Mutex<HashMap<u8, SimulatedPin>>,
}

impl SimulatedGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(bindings: &[PinBinding]) -> Result<Self> {
        let backend = Self::new();
        for binding in bindings {
            backend.configure(binding.pin, Pull::Up)?;
        }
        Ok(backend)
    }

    pub fn script(&self, pin: u8, levels: impl IntoIterator<Item = bool>) {
        let mut pins = lock(&self.pins);
        pins.entry(pin)
            .or_insert_with(|| SimulatedPin::idle(true))
            .script
            .extend(levels);
    }

    /// Sets the resting level returned once the script is exhausted.
    pub fn set_level(&self, pin: u8, high: bool) {
        let mut pins = lock(&self.pins);
        pins.entry(pin)
            .or_insert_with(|| SimulatedPin::idle(high))
            .level = high;
    }

    pub fn press(&self, pin: u8) {
        self.set_level(pin, false);
    }

    pub fn release(&self, pin: u8) {
        self.set_level(pin, true);
    }

    pub fn reads(&self, pin: u8) -> usize {
        lock(&self.pins).get(&pin).map_or(0, |p| p.reads)
    }
}

impl GpioBackend for SimulatedGpio {
    fn configure(&self, pin: u8, pull: Pull) -> Result<()> {
        let mut pins = lock(&self.pins);
        let resting = matches!(pull, Pull::Up);
        let entry = pins
            .entry(pin)
            .or_insert_with(|| SimulatedPin::idle(resting));
        entry.configured = true;
        Ok(())
    }

    fn read(&self, pin: u8) -> Result<bool> {
        let mut pins = lock(&self.pins);
        match pins.get_mut(&pin) {
            Some(state) if state.configured => {
                state.reads += 1;
                Ok(state.script.pop_front().unwrap_or(state.level))
            }
            _ => Err(ButtonError::PinNotConfigured { pin }),
        }
    }
}

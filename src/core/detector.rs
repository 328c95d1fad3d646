use crate::domain::model::TriggerMode;

/// Turns a stream of pin samples into "notify now" decisions.
///
/// Buttons are wired pull-up, so a press pulls the line low and
/// `pressed = !raw_level`.
#[derive(Debug, Clone)]
pub struct PressDetector {
    mode: TriggerMode,
    previously_pressed: bool,
}

impl PressDetector {
    pub fn new(mode: TriggerMode) -> Self {
        Self {
            mode,
            previously_pressed: false,
        }
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn previously_pressed(&self) -> bool {
        self.previously_pressed
    }

    /// Feeds one logical sample. Returns whether a notification should fire.
    pub fn update(&mut self, pressed: bool) -> bool {
        let fire = match self.mode {
            TriggerMode::Edge => pressed && !self.previously_pressed,
            TriggerMode::Level => pressed,
        };
        self.previously_pressed = pressed;
        fire
    }

    /// Feeds one raw electrical level. Returns `(pressed, fire)`.
    pub fn sample_raw(&mut self, raw_high: bool) -> (bool, bool) {
        let pressed = !raw_high;
        (pressed, self.update(pressed))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const NINJA_PIN: u8 = 23;
pub const COWBOY_PIN: u8 = 18;

/// Which side a button press counts for. Used verbatim as the last path
/// segment of the outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Cowboy,
    Ninja,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Cowboy => "cowboy",
            Target::Ninja => "ninja",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cowboy" => Ok(Target::Cowboy),
            "ninja" => Ok(Target::Ninja),
            other => Err(format!("unknown target: {}", other)),
        }
    }
}

/// A BCM pin number tied to the target it reports. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinBinding {
    pub pin: u8,
    pub target: Target,
}

impl PinBinding {
    pub const fn new(pin: u8, target: Target) -> Self {
        Self { pin, target }
    }
}

pub fn default_bindings() -> [PinBinding; 2] {
    [
        PinBinding::new(COWBOY_PIN, Target::Cowboy),
        PinBinding::new(NINJA_PIN, Target::Ninja),
    ]
}

/// How a held button turns into notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Fire once on the released -> pressed transition; requests run in the background.
    #[default]
    Edge,
    /// Fire on every sample that reads pressed; each request is awaited before the next sample.
    Level,
}

impl TriggerMode {
    pub fn default_interval(&self) -> Duration {
        match self {
            TriggerMode::Edge => Duration::from_millis(50),
            TriggerMode::Level => Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
    Off,
}

/// What to do with outstanding background requests when the process is asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownPolicy {
    #[default]
    Abandon,
    Drain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyResponse {
    pub status: u16,
    pub body: String,
}

/// Running totals the game server echoes back after each add.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tally {
    #[serde(default)]
    pub success: bool,
    pub ninjas: i64,
    pub cowboys: i64,
}

impl NotifyResponse {
    pub fn tally(&self) -> Option<Tally> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_map_pins_to_targets() {
        let bindings = default_bindings();
        let ninja = bindings.iter().find(|b| b.pin == 23).unwrap();
        let cowboy = bindings.iter().find(|b| b.pin == 18).unwrap();
        assert_eq!(ninja.target, Target::Ninja);
        assert_eq!(cowboy.target, Target::Cowboy);
    }

    #[test]
    fn test_target_path_segment() {
        assert_eq!(Target::Cowboy.to_string(), "cowboy");
        assert_eq!(Target::Ninja.as_str(), "ninja");
        assert_eq!("ninja".parse::<Target>().unwrap(), Target::Ninja);
        assert!("samurai".parse::<Target>().is_err());
    }

    #[test]
    fn test_mode_intervals() {
        assert_eq!(TriggerMode::Edge.default_interval(), Duration::from_millis(50));
        assert_eq!(TriggerMode::Level.default_interval(), Duration::from_millis(100));
        assert_eq!(TriggerMode::default(), TriggerMode::Edge);
    }

    #[test]
    fn test_tally_parsing() {
        let resp = NotifyResponse {
            status: 200,
            body: r#"{"success":true,"ninjas":11,"cowboys":10}"#.to_string(),
        };
        assert_eq!(
            resp.tally(),
            Some(Tally {
                success: true,
                ninjas: 11,
                cowboys: 10
            })
        );

        let plain = NotifyResponse {
            status: 404,
            body: "Cannot GET /cvn/add/samurai".to_string(),
        };
        assert_eq!(plain.tally(), None);
    }
}

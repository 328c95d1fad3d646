use thiserror::Error;

#[derive(Error, Debug)]
pub enum ButtonError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("GPIO error: {message}")]
    GpioError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("GPIO pin {pin} was read before being configured")]
    PinNotConfigured { pin: u8 },

    #[error("Watcher failed: {message}")]
    WatcherError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Hardware,
    Network,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ButtonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ButtonError::ApiError(_) => ErrorCategory::Network,
            ButtonError::GpioError { .. } | ButtonError::PinNotConfigured { .. } => {
                ErrorCategory::Hardware
            }
            ButtonError::ConfigError { .. }
            | ButtonError::MissingConfigError { .. }
            | ButtonError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ButtonError::WatcherError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Hardware | ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ButtonError::ApiError(e) if e.is_connect() => {
                "Could not reach the button server".to_string()
            }
            ButtonError::ApiError(e) if e.is_timeout() => {
                "The button server did not answer in time".to_string()
            }
            ButtonError::ApiError(_) => "Request to the button server failed".to_string(),
            ButtonError::GpioError { .. } => "Could not access the GPIO hardware".to_string(),
            ButtonError::PinNotConfigured { pin } => {
                format!("GPIO pin {} is not set up as an input", pin)
            }
            ButtonError::MissingConfigError { field } => {
                format!("{} is not set", field)
            }
            ButtonError::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            ButtonError::ConfigError { message } => message.clone(),
            ButtonError::WatcherError { message } => {
                format!("A button watcher stopped unexpectedly: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ButtonError::ApiError(_) => {
                "Check that CVN_SERVER_URL points at a running server and the network is up"
            }
            ButtonError::GpioError { .. } => {
                "Run on a Raspberry Pi and make sure the user can open /dev/gpiomem"
            }
            ButtonError::PinNotConfigured { .. } => {
                "Initialize the GPIO backend with every pin binding before starting the watchers"
            }
            ButtonError::MissingConfigError { .. } => {
                "Export CVN_SERVER_URL, e.g. CVN_SERVER_URL=http://192.168.1.10:3000/cvn/add"
            }
            ButtonError::InvalidConfigValueError { .. } | ButtonError::ConfigError { .. } => {
                "Fix the configuration value and restart"
            }
            ButtonError::WatcherError { .. } => "Restart the process; check the logs above",
        }
    }
}

#[cfg(feature = "rpi")]
impl From<rppal::gpio::Error> for ButtonError {
    fn from(e: rppal::gpio::Error) -> Self {
        ButtonError::GpioError {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ButtonError>;

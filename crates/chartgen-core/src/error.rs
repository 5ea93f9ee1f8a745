use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid {field} in [{section}]: {value:?}")]
    InvalidNumber {
        section: String,
        field: &'static str,
        value: String,
    },

    #[error("Malformed note in [{section}] at tick {tick}: {value:?}")]
    MalformedNote {
        section: String,
        tick: u64,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_number(section: &str, field: &'static str, value: &str) -> Self {
        Error::InvalidNumber {
            section: section.to_string(),
            field,
            value: value.to_string(),
        }
    }
}

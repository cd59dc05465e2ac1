use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    #[default]
    Local,
    Testnet,
    Mainnet,
}

pub const ENVIRONMENT_VAR_NAME: &str = "REPUTATION_ENVIRONMENT";
pub const PRETTY_PRINT_LOGS_VAR_NAME: &str = "REPUTATION_PRETTY_PRINT_LOGS";

pub fn get_environment() -> Environment {
    std::env::var(ENVIRONMENT_VAR_NAME)
        .unwrap_or(Environment::default().to_string())
        .parse()
        .unwrap_or_default()
}

pub fn get_pretty_print_logs() -> bool {
    std::env::var(PRETTY_PRINT_LOGS_VAR_NAME)
        .unwrap_or("false".to_string())
        .parse()
        .unwrap_or(false)
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Testnet => write!(f, "testnet"),
            Environment::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Environment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" | "dev" => Ok(Environment::Local),
            "testnet" | "test" | "stg" => Ok(Environment::Testnet),
            "mainnet" | "main" | "prod" => Ok(Environment::Mainnet),
            _ => Err(crate::Error::InvalidEnvironment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

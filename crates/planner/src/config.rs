use log::debug;
use models::term::Year;
use std::{
    env,
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Invalid planner configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    EmptyYearRange { first: Year, last: Year },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidValue { key, value } => write!(f, "Invalid value for {key}: {value:?}"),
            Self::EmptyYearRange { first, last } => {
                write!(f, "First plannable year {first} is after last year {last}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Tunables for plan editing
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Credits a term may hold before an add needs explicit confirmation
    pub credit_limit: u32,
    /// First calendar year a term may be placed in
    pub first_year: Year,
    /// Last calendar year a term may be placed in
    pub last_year: Year,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            credit_limit: Self::DEFAULT_CREDIT_LIMIT,
            first_year: Self::DEFAULT_FIRST_YEAR,
            last_year: Self::DEFAULT_LAST_YEAR,
        }
    }
}

impl PlannerConfig {
    pub const DEFAULT_CREDIT_LIMIT: u32 = 21;
    pub const DEFAULT_FIRST_YEAR: Year = Year(2018);
    pub const DEFAULT_LAST_YEAR: Year = Year(2032);

    const CREDIT_LIMIT_VAR: &'static str = "PLANNER_CREDIT_LIMIT";
    const FIRST_YEAR_VAR: &'static str = "PLANNER_FIRST_YEAR";
    const LAST_YEAR_VAR: &'static str = "PLANNER_LAST_YEAR";

    /// Loads the configuration from the environment, reading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup, defaulting missing keys
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            credit_limit: Self::read(&get, Self::CREDIT_LIMIT_VAR)?
                .unwrap_or(Self::DEFAULT_CREDIT_LIMIT),
            first_year: Self::read(&get, Self::FIRST_YEAR_VAR)?
                .unwrap_or(Self::DEFAULT_FIRST_YEAR),
            last_year: Self::read(&get, Self::LAST_YEAR_VAR)?.unwrap_or(Self::DEFAULT_LAST_YEAR),
        };

        if config.first_year > config.last_year {
            return Err(ConfigError::EmptyYearRange {
                first: config.first_year,
                last: config.last_year,
            });
        }

        debug!("Loaded planner config: {config:?}");
        Ok(config)
    }

    fn read<F, T>(get: &F, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        T: FromStr,
    {
        get(key)
            .map(|value| {
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key,
                    value: value.clone(),
                })
            })
            .transpose()
    }

    /// Whether a term may be placed in `year`
    pub fn allows_year(&self, year: Year) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }
}

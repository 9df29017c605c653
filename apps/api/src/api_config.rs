use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use shiftdesk_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// One-shot command selected by the first CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    Seed,
}

impl ApiCommand {
    fn from_arg(arg: Option<&str>) -> Result<Self, AppError> {
        match arg {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("seed") => Ok(Self::Seed),
            Some(other) => Err(AppError::Validation(format!(
                "unknown command '{other}', expected 'serve', 'migrate' or 'seed'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = ApiCommand::from_arg(env::args().nth(1).as_deref())?;

        let database_url = optional_non_empty_env("DATABASE_URL");
        if command != ApiCommand::Serve && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required for 'migrate' and 'seed'".to_owned(),
            ));
        }

        let db_max_connections = match optional_non_empty_env("DB_MAX_CONNECTIONS") {
            Some(value) => value.parse::<u32>().map_err(|error| {
                AppError::Validation(format!("invalid DB_MAX_CONNECTIONS '{value}': {error}"))
            })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        Ok(Self {
            command,
            database_url,
            db_max_connections,
            frontend_url,
            api_host,
            api_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

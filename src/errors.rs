use thiserror::Error;

/// Errors produced by the scheduling core itself: request admission and the energy-accounting
/// model that both schedulers and the hub share.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("InvalidRequest: {0}")]
    InvalidRequest(String),
}

/// Errors produced by a `Scheduler::schedule` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("InfeasibleSchedule: {0}")]
    InfeasibleSchedule(String),
    #[error("SolverFailure: {0}")]
    SolverFailure(String),
}

/// Errors produced by hub operations (`add_request`, `update_source_profile`, `schedule`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HubError {
    #[error("{0}")]
    InvalidRequest(#[from] CoreError),
    #[error("{0}")]
    Scheduling(#[from] SchedulerError),
    #[error("InvalidRequest: request id {0} already present")]
    DuplicateRequestId(u64),
}

/// Errors produced while loading the TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("LogConfigError: {0}")]
    LogConfigError(String),
}
impl From<log4rs::config::runtime::ConfigErrors> for ConfigError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        ConfigError::LogConfigError(e.to_string())
    }
}
impl From<log::SetLoggerError> for ConfigError {
    fn from(e: log::SetLoggerError) -> Self {
        ConfigError::LogConfigError(e.to_string())
    }
}

/// Error depicting errors that occur during initialization of the main program, before logging
/// is even available.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("InitError: {0}")]
    Message(String),
}
impl From<&str> for InitError {
    fn from(e: &str) -> Self {
        InitError::Message(e.to_string())
    }
}

/// Error depicting errors that occur while running the worker loop: wraps whatever caused a
/// single tick's processing of an incoming event to fail, without taking down the process.
#[derive(Error, Debug)]
#[error("WorkerError: {0}")]
pub struct WorkerError(pub String);
impl From<HubError> for WorkerError {
    fn from(e: HubError) -> Self {
        WorkerError(e.to_string())
    }
}

//! UptimeRobot API Client Library
//!
//! This library maps typed monitor definitions to the form-encoded, integer-coded
//! requests of the UptimeRobot v2 API and decodes its responses back into
//! [`Monitor`] values.

pub mod client;
pub mod codes;
pub mod config;
pub mod errors;
pub mod form;
pub mod mapper;
pub mod monitor;
pub mod transport;

pub use client::UptimeRobotClient;
pub use codes::EnumCodec;
pub use config::Config;
pub use errors::{ApiError, Result};
pub use monitor::{
    Monitor, MonitorAlertContact, MonitorCreateRequest, MonitorRequestAlertContact,
    MonitorUpdateRequest,
};
pub use transport::{ApiCaller, ApiResponse, HttpTransport};

//! Monitor data structures and request types

use crate::codes::{
    MONITOR_HTTP_AUTH_TYPE, MONITOR_HTTP_METHOD, MONITOR_KEYWORD_TYPE, MONITOR_POST_CONTENT_TYPE,
    MONITOR_POST_TYPE, MONITOR_SUB_TYPE, MONITOR_TYPE,
};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alert contact bound to a monitor
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorAlertContact {
    pub id: String,
    pub recurrence: u32,
    pub threshold: u32,
}

/// An uptime check as reported by the API.
///
/// Enumerated fields hold the names registered in [`crate::codes`]. Fields that
/// do not apply to the monitor's type are left empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Monitor {
    pub id: i64,
    pub friendly_name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub status: String,
    pub interval: u32,

    pub sub_type: String,
    pub port: u16,

    pub keyword_type: String,
    pub keyword_value: String,

    pub http_username: String,
    pub http_password: String,
    pub http_auth_type: String,

    pub ignore_ssl_errors: bool,

    pub custom_http_headers: BTreeMap<String, String>,

    /// Sorted by contact id
    pub alert_contacts: Vec<MonitorAlertContact>,

    pub http_method: String,
    /// Never populated on reads; the API does not return it
    pub post_type: String,
    /// Never populated on reads; the API does not return it
    pub post_content_type: String,
    pub post_value: BTreeMap<String, String>,
}

/// Alert contact binding in a create/update request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonitorRequestAlertContact {
    pub id: String,
    pub threshold: u32,
    pub recurrence: u32,
}

impl MonitorRequestAlertContact {
    pub fn new(id: impl Into<String>, threshold: u32, recurrence: u32) -> Self {
        Self {
            id: id.into(),
            threshold,
            recurrence,
        }
    }
}

/// Fields sent when creating a monitor. Nothing is defaulted on the way out:
/// empty enumeration names are sent as code 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonitorCreateRequest {
    pub friendly_name: String,
    pub url: String,
    pub monitor_type: String,
    pub interval: u32,

    pub sub_type: String,
    pub port: u16,

    pub keyword_type: String,
    pub keyword_value: String,

    pub http_username: String,
    pub http_password: String,
    pub http_auth_type: String,

    pub ignore_ssl_errors: bool,

    pub alert_contacts: Vec<MonitorRequestAlertContact>,

    pub custom_http_headers: BTreeMap<String, String>,

    pub http_method: String,
    pub post_type: String,
    pub post_content_type: String,
    pub post_value: BTreeMap<String, String>,
}

impl MonitorCreateRequest {
    /// Check every enumeration name that would be encoded against its table.
    pub fn validate(&self) -> Result<()> {
        MONITOR_TYPE.require_code(&self.monitor_type)?;

        for (codec, name) in [
            (&MONITOR_HTTP_METHOD, &self.http_method),
            (&MONITOR_HTTP_AUTH_TYPE, &self.http_auth_type),
        ] {
            if !name.is_empty() {
                codec.require_code(name)?;
            }
        }

        match self.monitor_type.as_str() {
            "port" => {
                MONITOR_SUB_TYPE.require_code(&self.sub_type)?;
            }
            "keyword" => {
                MONITOR_KEYWORD_TYPE.require_code(&self.keyword_type)?;
            }
            _ => {}
        }

        if self.http_method == "POST" {
            for (codec, name) in [
                (&MONITOR_POST_TYPE, &self.post_type),
                (&MONITOR_POST_CONTENT_TYPE, &self.post_content_type),
            ] {
                if !name.is_empty() {
                    codec.require_code(name)?;
                }
            }
        }

        Ok(())
    }

    /// Turn this into an edit of an existing monitor
    pub fn into_update(self, id: i64) -> MonitorUpdateRequest {
        MonitorUpdateRequest { id, monitor: self }
    }
}

/// Fields sent when editing an existing monitor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonitorUpdateRequest {
    pub id: i64,
    pub monitor: MonitorCreateRequest,
}

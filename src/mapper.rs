//! Translation between monitor types and the API's form-encoded requests and
//! JSON responses.

use crate::codes::{
    MONITOR_HTTP_AUTH_TYPE, MONITOR_HTTP_METHOD, MONITOR_KEYWORD_TYPE, MONITOR_POST_CONTENT_TYPE,
    MONITOR_POST_TYPE, MONITOR_STATUS, MONITOR_SUB_TYPE, MONITOR_TYPE,
};
use crate::errors::{ApiError, Result};
use crate::form::FormBody;
use crate::monitor::{
    Monitor, MonitorAlertContact, MonitorCreateRequest, MonitorRequestAlertContact,
    MonitorUpdateRequest,
};
use crate::transport::ApiResponse;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Shape of a single entry in the `getMonitors` response
#[derive(Debug, Deserialize)]
struct WireMonitor {
    friendly_name: String,
    url: String,
    #[serde(rename = "type")]
    monitor_type: i64,
    status: i64,
    interval: u32,
    http_method: i64,

    #[serde(default, deserialize_with = "optional_code")]
    sub_type: Option<i64>,
    #[serde(default, deserialize_with = "optional_code")]
    port: Option<i64>,

    #[serde(default, deserialize_with = "optional_code")]
    keyword_type: Option<i64>,
    #[serde(default, deserialize_with = "optional_string")]
    keyword_value: String,

    #[serde(default, deserialize_with = "optional_code")]
    http_auth_type: Option<i64>,
    #[serde(default, deserialize_with = "optional_string")]
    http_username: String,
    #[serde(default, deserialize_with = "optional_string")]
    http_password: String,

    #[serde(default)]
    post_value: Value,

    ssl: WireSsl,

    #[serde(default)]
    custom_http_headers: BTreeMap<String, String>,

    #[serde(default)]
    alert_contacts: Vec<WireAlertContact>,
}

#[derive(Debug, Deserialize)]
struct WireSsl {
    ignore_errors: i64,
}

#[derive(Debug, Deserialize)]
struct WireAlertContact {
    id: String,
    recurrence: u32,
    threshold: u32,
}

/// Integer-coded field that may be sent as a number, a numeric string, `""` or `null`
fn optional_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid code: {}", n))),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid code: {:?}", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid code: {}",
            other
        ))),
    }
}

fn optional_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn alert_contacts_field(contacts: &[MonitorRequestAlertContact]) -> String {
    contacts
        .iter()
        .map(|c| format!("{}_{}_{}", c.id, c.threshold, c.recurrence))
        .collect::<Vec<_>>()
        .join("-")
}

/// Form for a `getMonitors` call restricted to one monitor
pub fn get_monitor_form(id: i64) -> FormBody {
    let mut form = FormBody::new();
    form.add("monitors", id.to_string());
    form.add("ssl", "1");
    form.add("custom_http_headers", "1");
    form.add("alert_contacts", "1");
    form.add("http_request_details", "true");
    form.add("auth_type", "true");
    form
}

fn encode_monitor_fields(req: &MonitorCreateRequest, form: &mut FormBody) -> Result<()> {
    form.add("friendly_name", req.friendly_name.as_str());
    form.add("url", req.url.as_str());
    form.add("type", MONITOR_TYPE.name_to_code(&req.monitor_type).to_string());
    form.add("interval", req.interval.to_string());
    form.add(
        "http_method",
        MONITOR_HTTP_METHOD.name_to_code(&req.http_method).to_string(),
    );

    match req.monitor_type.as_str() {
        "port" => {
            form.add("sub_type", MONITOR_SUB_TYPE.name_to_code(&req.sub_type).to_string());
            form.add("port", req.port.to_string());
        }
        "keyword" => {
            form.add(
                "keyword_type",
                MONITOR_KEYWORD_TYPE.name_to_code(&req.keyword_type).to_string(),
            );
            form.add("keyword_value", req.keyword_value.as_str());
            encode_http_auth(req, form);
        }
        "http" => encode_http_auth(req, form),
        _ => {}
    }

    if req.http_method == "POST" {
        form.add("post_type", MONITOR_POST_TYPE.name_to_code(&req.post_type).to_string());
        form.add(
            "post_content_type",
            MONITOR_POST_CONTENT_TYPE
                .name_to_code(&req.post_content_type)
                .to_string(),
        );
        form.add("post_value", serde_json::to_string(&req.post_value)?);
    }

    form.add("ignore_ssl_errors", if req.ignore_ssl_errors { "1" } else { "0" });
    form.add("alert_contacts", alert_contacts_field(&req.alert_contacts));

    Ok(())
}

fn encode_http_auth(req: &MonitorCreateRequest, form: &mut FormBody) {
    form.add(
        "http_auth_type",
        MONITOR_HTTP_AUTH_TYPE.name_to_code(&req.http_auth_type).to_string(),
    );
    form.add("http_username", req.http_username.as_str());
    form.add("http_password", req.http_password.as_str());
}

/// Form for a `newMonitor` call. Empty custom headers are left out entirely.
pub fn create_monitor_form(req: &MonitorCreateRequest) -> Result<FormBody> {
    let mut form = FormBody::new();
    encode_monitor_fields(req, &mut form)?;

    if !req.custom_http_headers.is_empty() {
        form.add(
            "custom_http_headers",
            serde_json::to_string(&req.custom_http_headers)?,
        );
    }

    Ok(form)
}

/// Form for an `editMonitor` call.
///
/// Empty custom headers are sent as `{}`: the API reads a missing field as
/// "unchanged" and an empty object as "clear".
pub fn update_monitor_form(req: &MonitorUpdateRequest) -> Result<FormBody> {
    let mut form = FormBody::new();
    form.add("id", req.id.to_string());
    encode_monitor_fields(&req.monitor, &mut form)?;

    if req.monitor.custom_http_headers.is_empty() {
        form.add("custom_http_headers", "{}");
    } else {
        form.add(
            "custom_http_headers",
            serde_json::to_string(&req.monitor.custom_http_headers)?,
        );
    }

    Ok(form)
}

pub fn delete_monitor_form(id: i64) -> FormBody {
    let mut form = FormBody::new();
    form.add("id", id.to_string());
    form
}

/// Decode the single monitor of a `getMonitors` response
pub fn decode_monitor(id: i64, body: &ApiResponse) -> Result<Monitor> {
    let monitors = body
        .get("monitors")
        .and_then(Value::as_array)
        .filter(|monitors| monitors.iter().all(Value::is_object))
        .ok_or_else(|| ApiError::malformed("expected a list of monitors", body))?;

    let first = monitors.first().ok_or(ApiError::NotFound(id))?;

    let wire: WireMonitor = serde_json::from_value(first.clone())
        .map_err(|e| ApiError::malformed(e.to_string(), body))?;

    let mut m = Monitor {
        id,
        friendly_name: wire.friendly_name,
        url: wire.url,
        monitor_type: MONITOR_TYPE.code_to_name(wire.monitor_type)?.to_string(),
        status: MONITOR_STATUS.code_to_name(wire.status)?.to_string(),
        interval: wire.interval,
        http_method: MONITOR_HTTP_METHOD.code_to_name(wire.http_method)?.to_string(),
        ..Default::default()
    };

    match m.monitor_type.as_str() {
        "port" => {
            let sub_type = wire
                .sub_type
                .ok_or_else(|| ApiError::malformed("port monitor without sub_type", body))?;
            m.sub_type = MONITOR_SUB_TYPE.code_to_name(sub_type)?.to_string();

            if m.sub_type == "custom" {
                let port = wire
                    .port
                    .ok_or_else(|| ApiError::malformed("custom port monitor without port", body))?;
                m.port = u16::try_from(port)
                    .map_err(|_| ApiError::malformed(format!("port out of range: {}", port), body))?;
            }
        }
        "keyword" => {
            let keyword_type = wire
                .keyword_type
                .ok_or_else(|| ApiError::malformed("keyword monitor without keyword_type", body))?;
            m.keyword_type = MONITOR_KEYWORD_TYPE.code_to_name(keyword_type)?.to_string();
            m.keyword_value = wire.keyword_value;
            decode_http_auth(&mut m, wire.http_auth_type, wire.http_username, wire.http_password)?;
        }
        "http" => {
            decode_http_auth(&mut m, wire.http_auth_type, wire.http_username, wire.http_password)?;
        }
        _ => {}
    }

    // post_type and post_content_type are not echoed back by the API
    if m.http_method == "POST" {
        m.post_value = serde_json::from_value(wire.post_value)
            .map_err(|e| ApiError::malformed(format!("post_value: {}", e), body))?;
    }

    m.ignore_ssl_errors = wire.ssl.ignore_errors == 1;
    m.custom_http_headers = wire.custom_http_headers;

    m.alert_contacts = wire
        .alert_contacts
        .into_iter()
        .map(|c| MonitorAlertContact {
            id: c.id,
            recurrence: c.recurrence,
            threshold: c.threshold,
        })
        .collect();
    m.alert_contacts.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(m)
}

fn decode_http_auth(
    m: &mut Monitor,
    auth_type: Option<i64>,
    username: String,
    password: String,
) -> Result<()> {
    // Often absent from responses even when auth is configured
    if let Some(code) = auth_type {
        m.http_auth_type = MONITOR_HTTP_AUTH_TYPE.code_to_name(code)?.to_string();
    }
    m.http_username = username;
    m.http_password = password;
    Ok(())
}

/// Identifier assigned by a `newMonitor` call
pub fn decode_created_id(body: &ApiResponse) -> Result<i64> {
    body.get("monitor")
        .and_then(|monitor| monitor.get("id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::malformed("expected monitor.id", body))
}

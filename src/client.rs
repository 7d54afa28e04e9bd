//! Monitor operations against the UptimeRobot API

use crate::config::Config;
use crate::errors::Result;
use crate::mapper;
use crate::monitor::{Monitor, MonitorCreateRequest, MonitorUpdateRequest};
use crate::transport::{ApiCaller, HttpTransport};
use tracing::{debug, instrument};

/// Client for reading and managing monitors.
///
/// Create and update calls re-read the monitor afterwards so every operation
/// returns a fully populated [`Monitor`].
pub struct UptimeRobotClient<C: ApiCaller> {
    caller: C,
    strict_validation: bool,
}

impl UptimeRobotClient<HttpTransport> {
    /// Create a client talking HTTP to the configured endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(transport).with_strict_validation(config.strict_validation))
    }
}

impl<C: ApiCaller> UptimeRobotClient<C> {
    pub fn new(caller: C) -> Self {
        Self {
            caller,
            strict_validation: false,
        }
    }

    /// Validate enumeration names before create/update instead of sending code 0
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    #[instrument(skip(self))]
    pub async fn get_monitor(&self, id: i64) -> Result<Monitor> {
        let form = mapper::get_monitor_form(id);
        let body = self.caller.make_call("getMonitors", &form.encode()).await?;
        mapper::decode_monitor(id, &body)
    }

    #[instrument(skip(self, req), fields(friendly_name = %req.friendly_name))]
    pub async fn create_monitor(&self, req: &MonitorCreateRequest) -> Result<Monitor> {
        if self.strict_validation {
            req.validate()?;
        }

        let form = mapper::create_monitor_form(req)?;
        let body = self.caller.make_call("newMonitor", &form.encode()).await?;
        let id = mapper::decode_created_id(&body)?;

        debug!("Created monitor {}, fetching full representation", id);
        self.get_monitor(id).await
    }

    #[instrument(skip(self, req), fields(id = req.id))]
    pub async fn update_monitor(&self, req: &MonitorUpdateRequest) -> Result<Monitor> {
        if self.strict_validation {
            req.monitor.validate()?;
        }

        let form = mapper::update_monitor_form(req)?;
        self.caller.make_call("editMonitor", &form.encode()).await?;

        self.get_monitor(req.id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_monitor(&self, id: i64) -> Result<()> {
        let form = mapper::delete_monitor_form(id);
        self.caller.make_call("deleteMonitor", &form.encode()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::form::FormBody;
    use crate::monitor::MonitorRequestAlertContact;
    use crate::transport::{ApiResponse, MockApiCaller};
    use serde_json::{Value, json};
    use tokio_test::{assert_err, assert_ok};

    fn object(value: Value) -> ApiResponse {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn monitors_response() -> ApiResponse {
        object(json!({
            "stat": "ok",
            "monitors": [{
                "id": 777,
                "friendly_name": "Homepage",
                "url": "https://example.com",
                "type": 1,
                "interval": 300,
                "status": 2,
                "http_method": 2,
                "http_username": "",
                "http_password": "",
                "ssl": { "ignore_errors": 0 },
                "custom_http_headers": {},
                "alert_contacts": [
                    { "id": "7", "recurrence": 0, "threshold": 0 },
                    { "id": "5", "recurrence": 1, "threshold": 2 }
                ]
            }]
        }))
    }

    fn create_request() -> MonitorCreateRequest {
        MonitorCreateRequest {
            friendly_name: "Homepage".to_string(),
            url: "https://example.com".to_string(),
            monitor_type: "http".to_string(),
            interval: 300,
            http_method: "GET".to_string(),
            alert_contacts: vec![
                MonitorRequestAlertContact::new("5", 2, 1),
                MonitorRequestAlertContact::new("7", 0, 0),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_monitor() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, body| {
                let form = FormBody::decode(body);
                method == "getMonitors"
                    && form.get("monitors") == Some("777")
                    && form.get("alert_contacts") == Some("1")
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(monitors_response()) }));

        let client = UptimeRobotClient::new(mock);
        let monitor = assert_ok!(client.get_monitor(777).await);

        assert_eq!(monitor.id, 777);
        assert_eq!(monitor.monitor_type, "http");
        assert_eq!(monitor.status, "up");
        let ids: Vec<_> = monitor.alert_contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "7"]);
    }

    #[tokio::test]
    async fn test_get_monitor_not_found() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call().returning(|_, _| {
            Box::pin(async { Ok(object(json!({ "stat": "ok", "monitors": [] }))) })
        });

        let client = UptimeRobotClient::new(mock);
        let err = assert_err!(client.get_monitor(404).await);
        assert!(matches!(err, ApiError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_create_monitor_refetches() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, body| {
                let form = FormBody::decode(body);
                method == "newMonitor"
                    && form.get("alert_contacts") == Some("5_2_1-7_0_0")
                    && form.get("type") == Some("1")
                    && !form.contains_key("custom_http_headers")
            })
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(object(json!({ "stat": "ok", "monitor": { "id": 777, "status": 1 } })))
                })
            });
        mock.expect_make_call()
            .withf(|method, body| {
                method == "getMonitors" && FormBody::decode(body).get("monitors") == Some("777")
            })
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(monitors_response()) }));

        let client = UptimeRobotClient::new(mock);
        let monitor = assert_ok!(client.create_monitor(&create_request()).await);

        assert_eq!(monitor.id, 777);
        assert_eq!(monitor.friendly_name, "Homepage");
    }

    #[tokio::test]
    async fn test_update_monitor_clears_headers_and_refetches() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, body| {
                let form = FormBody::decode(body);
                method == "editMonitor"
                    && form.get("id") == Some("777")
                    && form.get("custom_http_headers") == Some("{}")
            })
            .times(1)
            .returning(|_, _| {
                Box::pin(async { Ok(object(json!({ "stat": "ok", "monitor": { "id": 777 } }))) })
            });
        mock.expect_make_call()
            .withf(|method, _| method == "getMonitors")
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(monitors_response()) }));

        let client = UptimeRobotClient::new(mock);
        let monitor = assert_ok!(client.update_monitor(&create_request().into_update(777)).await);
        assert_eq!(monitor.id, 777);
    }

    #[tokio::test]
    async fn test_delete_monitor_ignores_body() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, body| method == "deleteMonitor" && body == "id=777")
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(object(json!({ "stat": "ok", "unexpected": [1, 2] }))) }));

        let client = UptimeRobotClient::new(mock);
        assert_ok!(client.delete_monitor(777).await);
    }

    #[tokio::test]
    async fn test_create_propagates_transport_error() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, _| method == "newMonitor")
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Err(ApiError::Api(
                        r#"{"stat":"fail","error":{"type":"invalid_parameter"}}"#.to_string(),
                    ))
                })
            });
        mock.expect_make_call()
            .withf(|method, _| method == "getMonitors")
            .times(0);

        let client = UptimeRobotClient::new(mock);
        let err = assert_err!(client.create_monitor(&create_request()).await);
        assert!(err.to_string().contains("invalid_parameter"));
    }

    #[tokio::test]
    async fn test_create_with_malformed_response() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, _| method == "newMonitor")
            .returning(|_, _| Box::pin(async { Ok(object(json!({ "stat": "ok" }))) }));

        let client = UptimeRobotClient::new(mock);
        let err = assert_err!(client.create_monitor(&create_request()).await);
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_permissive_by_default() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call()
            .withf(|method, body| method == "newMonitor" && FormBody::decode(body).get("type") == Some("0"))
            .times(1)
            .returning(|_, _| {
                Box::pin(async { Ok(object(json!({ "stat": "ok", "monitor": { "id": 777 } }))) })
            });
        mock.expect_make_call()
            .withf(|method, _| method == "getMonitors")
            .returning(|_, _| Box::pin(async { Ok(monitors_response()) }));

        let req = MonitorCreateRequest {
            monitor_type: "htpp".to_string(),
            ..create_request()
        };
        let client = UptimeRobotClient::new(mock);
        assert_ok!(client.create_monitor(&req).await);
    }

    #[tokio::test]
    async fn test_strict_validation_rejects_before_calling() {
        let mut mock = MockApiCaller::new();
        mock.expect_make_call().times(0);

        let req = MonitorCreateRequest {
            monitor_type: "htpp".to_string(),
            ..create_request()
        };
        let client = UptimeRobotClient::new(mock).with_strict_validation(true);

        let err = assert_err!(client.create_monitor(&req).await);
        assert!(matches!(err, ApiError::UnknownName { kind: "monitor type", .. }));

        let err = assert_err!(client.update_monitor(&req.into_update(777)).await);
        assert!(matches!(err, ApiError::UnknownName { .. }));
    }
}

//! Name/code tables for the integer-coded enumerations of the UptimeRobot API

use crate::errors::{ApiError, Result};

/// Bidirectional lookup between an enumeration name and its wire code
#[derive(Debug)]
pub struct EnumCodec {
    kind: &'static str,
    entries: &'static [(&'static str, i64)],
}

impl EnumCodec {
    pub const fn new(kind: &'static str, entries: &'static [(&'static str, i64)]) -> Self {
        Self { kind, entries }
    }

    /// Human readable name of the enumeration, used in error messages
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Look up the code for a name. Unregistered names map to 0.
    pub fn name_to_code(&self, name: &str) -> i64 {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
            .unwrap_or(0)
    }

    /// Look up the name for a code received from the server
    pub fn code_to_name(&self, code: i64) -> Result<&'static str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(name, _)| *name)
            .ok_or(ApiError::UnknownCode {
                kind: self.kind,
                code,
            })
    }

    /// Strict counterpart of [`EnumCodec::name_to_code`]
    pub fn require_code(&self, name: &str) -> Result<i64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, code)| *code)
            .ok_or_else(|| ApiError::UnknownName {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }
}

pub static MONITOR_TYPE: EnumCodec = EnumCodec::new(
    "monitor type",
    &[("http", 1), ("keyword", 2), ("ping", 3), ("port", 4)],
);

pub static MONITOR_STATUS: EnumCodec = EnumCodec::new(
    "monitor status",
    &[
        ("paused", 0),
        ("not checked yet", 1),
        ("up", 2),
        ("seems down", 8),
        ("down", 9),
    ],
);

pub static MONITOR_SUB_TYPE: EnumCodec = EnumCodec::new(
    "monitor sub type",
    &[
        ("http", 1),
        ("https", 2),
        ("ftp", 3),
        ("smtp", 4),
        ("pop3", 5),
        ("imap", 6),
        ("custom", 99),
    ],
);

pub static MONITOR_KEYWORD_TYPE: EnumCodec = EnumCodec::new(
    "keyword type",
    &[("exists", 1), ("not exists", 2)],
);

pub static MONITOR_HTTP_METHOD: EnumCodec = EnumCodec::new(
    "HTTP method",
    &[
        ("HEAD", 1),
        ("GET", 2),
        ("POST", 3),
        ("PUT", 4),
        ("PATCH", 5),
        ("DELETE", 6),
        ("OPTIONS", 7),
    ],
);

pub static MONITOR_HTTP_AUTH_TYPE: EnumCodec = EnumCodec::new(
    "HTTP auth type",
    &[("basic", 1), ("digest", 2)],
);

pub static MONITOR_POST_TYPE: EnumCodec = EnumCodec::new(
    "POST type",
    &[("key-value", 1), ("raw data", 2)],
);

pub static MONITOR_POST_CONTENT_TYPE: EnumCodec = EnumCodec::new(
    "POST content type",
    &[("text/html", 0), ("application/json", 1)],
);

/// Every codec, for listing and exhaustive checks
pub static ALL_CODECS: [&EnumCodec; 8] = [
    &MONITOR_TYPE,
    &MONITOR_STATUS,
    &MONITOR_SUB_TYPE,
    &MONITOR_KEYWORD_TYPE,
    &MONITOR_HTTP_METHOD,
    &MONITOR_HTTP_AUTH_TYPE,
    &MONITOR_POST_TYPE,
    &MONITOR_POST_CONTENT_TYPE,
];

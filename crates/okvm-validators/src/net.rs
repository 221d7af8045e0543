//! Network address validators.

use std::net::IpAddr;

use regex_lite::Regex;
use serde_json::Value;

use crate::basic::valid_number;
use crate::{check_any, check_not_none_string, check_re_match, ValidatorError};

/// IPv4 or IPv6 address, normalized to its canonical text form.
pub fn valid_ip(arg: &Value) -> Result<Value, ValidatorError> {
    let name = "IP address";
    let text = check_not_none_string(arg, name, true)?;
    text.parse::<IpAddr>()
        .map(|ip| Value::String(ip.to_string()))
        .map_err(|_| ValidatorError::new(arg, name))
}

/// RFC-1123 hostname.
pub fn valid_rfc_host(arg: &Value) -> Result<Value, ValidatorError> {
    let pattern = Regex::new(
        r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$",
    )
    .unwrap();
    check_re_match(arg, "RFC-1123 hostname", &pattern, true, false).map(Value::String)
}

/// IP address or RFC-1123 hostname.
pub fn valid_ip_or_host(arg: &Value) -> Result<Value, ValidatorError> {
    check_any(arg, "IP address or RFC-1123 hostname", &[valid_ip, valid_rfc_host])
}

/// TCP/UDP port, 0 meaning unbound.
pub fn valid_port(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(0), Some(65535), "port").map(Value::from)
}

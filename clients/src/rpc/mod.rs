pub mod wallet;

use crate::api::RequestMode;
use dg_bitgo_core::config::WalletClientConfig;
use log::{debug, trace, warn};
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::{Error, ErrorKind};
use std::time::Duration;

fn _version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
fn _pkg_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

pub fn version() -> String {
    format!("{}: {}", _pkg_name(), _version())
}

#[test]
fn test_version() {
    println!("{}", version());
}

pub fn get_client(config: &WalletClientConfig) -> Result<Client, Error> {
    let mut builder = ClientBuilder::new().timeout(Duration::from_secs(config.timeout));
    if config.insecure_skip_verify {
        warn!(
            "TLS certificate and hostname verification is DISABLED for {}, never use this against a production endpoint",
            config.base_url
        );
        builder = builder.danger_accept_invalid_certs(true);
    }
    builder
        .build()
        .map_err(|e| Error::new(ErrorKind::Other, format!("{:?}", e)))
}

fn transport_error(method: &str, err: &reqwest::Error) -> Error {
    warn!("Failed to {method}: {:?}", err);
    let kind = if err.is_timeout() {
        ErrorKind::TimedOut
    } else if err.is_connect() {
        ErrorKind::NotConnected
    } else {
        ErrorKind::Other
    };
    Error::new(kind, format!("Failed to {method}: {err}"))
}

fn decode_error(method: &str, body: &str, err: &serde_json::Error) -> Error {
    warn!("Failed to parse {method} response, Invalid Json: {:?}, {}", err, body);
    Error::new(
        ErrorKind::InvalidData,
        format!("Failed to Parse Json {},\r\n {}", body, err),
    )
}

fn status_error(method: &str, status: StatusCode, body: &str) -> Error {
    warn!("Failed to {method}, Bad Status Code: {:?}, {}", &status, body);
    let kind = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ErrorKind::PermissionDenied
    } else {
        ErrorKind::Other
    };
    Error::new(
        kind,
        format!("Failed to {method}, Bad Status Code: {status:?}, {body}"),
    )
}

/// Sends one request and decodes the JSON body.
///
/// With `decode_error_body` a non-success status whose body is a JSON object
/// is decoded like a success, the service reports sendmany failures as
/// `{"error": ...}` with a 4xx status. Otherwise any non-success status is an
/// error.
pub(crate) async fn send_request<T: Serialize, R: DeserializeOwned>(
    request_builder: RequestBuilder,
    method: &str,
    mode: RequestMode<T>,
    decode_error_body: bool,
) -> Result<R, Error> {
    let request_builder = match mode {
        RequestMode::Json(t) => request_builder.json(&t),
        RequestMode::Send => request_builder,
    };
    let (client, request) = request_builder.build_split();
    let request = request.map_err(|e| transport_error(method, &e))?;
    debug!("Sending {method} request to {}", request.url());
    let resp = client
        .execute(request)
        .await
        .map_err(|e| transport_error(method, &e))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(method, &e))?;
    trace!("{method} response ({status}): {body}");
    if status.is_success() {
        serde_json::from_str(&body).map_err(|e| decode_error(method, &body, &e))
    } else if decode_error_body {
        match serde_json::from_str::<Map<String, Value>>(&body) {
            Ok(map) => {
                warn!("{method} returned status {status}, decoding error body");
                serde_json::from_value(Value::Object(map))
                    .map_err(|e| decode_error(method, &body, &e))
            }
            Err(_) => Err(status_error(method, status, &body)),
        }
    } else {
        Err(status_error(method, status, &body))
    }
}

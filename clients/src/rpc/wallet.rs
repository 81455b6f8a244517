use crate::api::responses::{SendManyResp, WalletListResp, WalletResp};
use crate::api::wallet::WalletAPI;
use crate::api::RequestMode;
use crate::rpc::{get_client, send_request};
use async_trait::async_trait;
use dg_bitgo_core::config::WalletClientConfig;
use dg_bitgo_core::send_many::{SendCoinsResponse, SendManyRequest};
use dg_bitgo_core::units::{decimal_to_json, to_minor_units};
use dg_bitgo_core::wallet::Wallet;
use log::{debug, trace, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};
use std::io::{Error, ErrorKind};

pub struct WalletClient {
    client: Client,
    config: WalletClientConfig,
}
impl WalletClient {
    pub fn new(config: WalletClientConfig) -> Result<Self, Error> {
        Ok(WalletClient {
            client: get_client(&config)?,
            config,
        })
    }
    #[must_use]
    pub fn config(&self) -> &WalletClientConfig {
        &self.config
    }
    /// Replaces the bearer token used by subsequent calls.
    pub fn set_access_token(&mut self, access_token: SecretString) {
        self.config.access_token = Some(access_token);
    }
    fn authorized(&self, request_builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        match &self.config.access_token {
            Some(token) => Ok(request_builder.bearer_auth(token.expose_secret())),
            None => Err(Error::new(
                ErrorKind::PermissionDenied,
                "No access token configured for the wallet API",
            )),
        }
    }
}

/// Builds the sendmany body without the wallet passphrase so it can be logged.
pub fn send_many_payload(request: &SendManyRequest) -> Result<Map<String, Value>, Error> {
    let mut recipients = Vec::with_capacity(request.recipients.len());
    for (address, amount) in &request.recipients {
        recipients.push(json!({
            "address": address,
            "amount": to_minor_units(*amount)?,
        }));
    }
    let mut request_body = Map::new();
    request_body.insert("recipients".to_string(), Value::Array(recipients));
    if let Some(message) = &request.message {
        request_body.insert("message".to_string(), json!(message));
    }
    if let Some(sequence_id) = &request.sequence_id {
        request_body.insert("sequenceId".to_string(), json!(sequence_id));
    }
    if let Some(fee) = request.fee {
        request_body.insert("fee".to_string(), json!(to_minor_units(fee)?));
    }
    if let Some(target) = request.fee_tx_confirm_target {
        request_body.insert("feeTxConfirmTarget".to_string(), decimal_to_json(target));
    }
    if request.min_confirms > 0 {
        request_body.insert("minConfirms".to_string(), json!(request.min_confirms));
    }
    request_body.insert(
        "enforceMinConfirmsForChange".to_string(),
        json!(request.enforce_min_confirms_for_change),
    );
    Ok(request_body)
}

#[async_trait]
impl WalletAPI for WalletClient {
    async fn login(
        &self,
        email: &str,
        _password: &str,
        _otp: &str,
        _extensible: bool,
    ) -> Result<Option<String>, Error> {
        debug!("Rejecting login for {email}, only access tokens are supported");
        Err(Error::new(
            ErrorKind::Unsupported,
            "Login with email and password is not supported, configure an access token",
        ))
    }
    async fn list_wallets(&self) -> Result<Vec<Wallet>, Error> {
        let request = self
            .authorized(self.client.get(self.config.list_wallets_url()))?
            .header(CONTENT_TYPE, "application/json");
        let resp: WalletListResp =
            send_request(request, "list_wallets", RequestMode::<()>::Send, false).await?;
        Ok(resp
            .wallets
            .unwrap_or_default()
            .into_iter()
            .map(Wallet::from)
            .collect())
    }
    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, Error> {
        let request = self
            .authorized(self.client.get(self.config.get_wallet_url(wallet_id)))?
            .header(CONTENT_TYPE, "application/json");
        let resp: WalletResp =
            send_request(request, "get_wallet", RequestMode::<()>::Send, false).await?;
        if resp.is_complete() {
            Ok(Some(resp.into()))
        } else {
            debug!("Wallet {wallet_id} response is missing id or balances");
            Ok(None)
        }
    }
    async fn send_many(
        &self,
        request: &SendManyRequest,
    ) -> Result<Option<SendCoinsResponse>, Error> {
        let url = self.config.send_many_url(&request.wallet_id);
        let builder = self
            .authorized(self.client.post(url))?
            .header(CONTENT_TYPE, "application/json");
        let mut request_body = send_many_payload(request)?;
        trace!("sendMany {}", Value::Object(request_body.clone()));
        request_body.insert(
            "walletPassphrase".to_string(),
            json!(request.wallet_passphrase.expose_secret()),
        );
        let resp: SendManyResp =
            send_request(builder, "send_many", RequestMode::Json(request_body), true).await?;
        if resp.is_recognized() {
            Ok(Some(resp.into()))
        } else {
            if let Some(pending) = &resp.pending_approval {
                warn!("Dropping send_many response with only pending approval {pending}");
            }
            Ok(None)
        }
    }
}

#[test]
fn test_send_many_payload() {
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use std::str::FromStr;
    let mut recipients = BTreeMap::new();
    recipients.insert("addr2".to_string(), Decimal::from_str("1.123456789").unwrap());
    recipients.insert("addr1".to_string(), Decimal::from_str("0.5").unwrap());
    let request = SendManyRequest::new("w1", SecretString::new("hunter2".into()), recipients)
        .with_fee(Decimal::from_str("0.0001").unwrap())
        .with_fee_tx_confirm_target(Decimal::from(6))
        .with_message("payout")
        .with_sequence_id("seq-1")
        .with_min_confirms(2)
        .with_enforce_min_confirms_for_change(true);
    let body = send_many_payload(&request).unwrap();
    assert_eq!(
        body["recipients"],
        json!([
            {"address": "addr1", "amount": 50_000_000},
            {"address": "addr2", "amount": 112_345_678},
        ])
    );
    assert_eq!(body["fee"], json!(10_000));
    assert_eq!(body["feeTxConfirmTarget"], json!(6));
    assert_eq!(body["message"], json!("payout"));
    assert_eq!(body["sequenceId"], json!("seq-1"));
    assert_eq!(body["minConfirms"], json!(2));
    assert_eq!(body["enforceMinConfirmsForChange"], json!(true));
    assert!(!body.contains_key("walletPassphrase"));
}

#[test]
fn test_send_many_payload_optional_fields() {
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    let mut recipients = BTreeMap::new();
    recipients.insert("addr1".to_string(), Decimal::ONE);
    let request = SendManyRequest::new("w1", SecretString::new("pass".into()), recipients);
    let body = send_many_payload(&request).unwrap();
    for key in [
        "message",
        "sequenceId",
        "fee",
        "feeTxConfirmTarget",
        "minConfirms",
        "walletPassphrase",
    ] {
        assert!(!body.contains_key(key), "{key} should be omitted");
    }
    assert_eq!(body["enforceMinConfirmsForChange"], json!(false));
    assert_eq!(body["recipients"][0]["amount"], json!(100_000_000));
}

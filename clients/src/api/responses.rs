use dg_bitgo_core::send_many::SendCoinsResponse;
use dg_bitgo_core::units::{deserialize_optional_minor_units, from_minor_units};
use dg_bitgo_core::wallet::Wallet;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResp {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub balance: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub confirmed_balance: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub spendable_balance: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub spendable_confirmed_balance: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub instant_balance: Option<i64>,
}
impl WalletResp {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.balance.is_some() && self.confirmed_balance.is_some()
    }
}
impl From<WalletResp> for Wallet {
    fn from(resp: WalletResp) -> Self {
        Wallet {
            id: resp.id,
            balance: resp.balance.map(from_minor_units),
            confirmed_balance: resp.confirmed_balance.map(from_minor_units),
            spendable_balance: resp.spendable_balance.map(from_minor_units),
            spendable_confirmed_balance: resp.spendable_confirmed_balance.map(from_minor_units),
            instant_balance: resp.instant_balance.map(from_minor_units),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletListResp {
    #[serde(default)]
    pub wallets: Option<Vec<WalletResp>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendManyResp {
    #[serde(default)]
    pub tx: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub pending_approval: Option<String>,
    #[serde(default)]
    pub otp: Option<bool>,
    #[serde(default)]
    pub triggered_policy: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub fee: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub fee_rate: Option<i64>,
}
impl SendManyResp {
    /// Only responses reporting a transaction or an error are understood.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.error.is_some() || self.tx.is_some()
    }
}
impl From<SendManyResp> for SendCoinsResponse {
    fn from(resp: SendManyResp) -> Self {
        SendCoinsResponse {
            tx: resp.tx,
            hash: resp.hash,
            error: resp.error,
            pending_approval: resp.pending_approval,
            otp: resp.otp.unwrap_or_default(),
            triggered_policy: resp.triggered_policy,
            status: resp.status,
            fee: from_minor_units(resp.fee.unwrap_or_default()),
            fee_rate: from_minor_units(resp.fee_rate.unwrap_or_default()),
        }
    }
}

#[test]
fn test_wallet_resp_decoding() {
    use rust_decimal::Decimal;
    use std::str::FromStr;
    let resp: WalletResp = serde_json::from_str(
        r#"{"id":"w1","balance":100000000,"confirmedBalance":50000000,"spendableBalance":12.9,"label":"hot"}"#,
    )
    .unwrap();
    assert!(resp.is_complete());
    let wallet = Wallet::from(resp);
    assert_eq!(wallet.id.as_deref(), Some("w1"));
    assert_eq!(wallet.balance, Some(Decimal::ONE));
    assert_eq!(wallet.confirmed_balance, Some(Decimal::from_str("0.5").unwrap()));
    assert_eq!(wallet.spendable_balance, Some(Decimal::from_str("0.00000012").unwrap()));
    assert_eq!(wallet.spendable_confirmed_balance, None);
    assert_eq!(wallet.instant_balance, None);
}

#[test]
fn test_wallet_resp_incomplete() {
    let resp: WalletResp = serde_json::from_str(r#"{"id":"w1","balance":0}"#).unwrap();
    assert!(!resp.is_complete());
    let resp: WalletResp =
        serde_json::from_str(r#"{"id":"w1","balance":0,"confirmedBalance":null}"#).unwrap();
    assert!(!resp.is_complete());
    assert!(serde_json::from_str::<WalletResp>(r#"{"id":"w1","balance":"lots"}"#).is_err());
}

#[test]
fn test_send_many_resp_decoding() {
    use rust_decimal::Decimal;
    use std::str::FromStr;
    let resp: SendManyResp = serde_json::from_str(r#"{"tx":"abc","fee":10000}"#).unwrap();
    assert!(resp.is_recognized());
    let response = SendCoinsResponse::from(resp);
    assert_eq!(response.tx.as_deref(), Some("abc"));
    assert_eq!(response.fee, Decimal::from_str("0.0001").unwrap());
    assert_eq!(response.fee_rate, Decimal::ZERO);
    assert!(!response.otp);

    let resp: SendManyResp = serde_json::from_str("{}").unwrap();
    assert!(!resp.is_recognized());
    let resp: SendManyResp = serde_json::from_str(r#"{"pendingApproval":"p1"}"#).unwrap();
    assert!(!resp.is_recognized());
    let resp: SendManyResp = serde_json::from_str(
        r#"{"error":"needs unlock","otp":true,"triggeredPolicy":"limit","status":"rejected"}"#,
    )
    .unwrap();
    assert!(resp.is_recognized());
    let response = SendCoinsResponse::from(resp);
    assert!(response.otp);
    assert_eq!(response.error.as_deref(), Some("needs unlock"));
    assert_eq!(response.triggered_policy.as_deref(), Some("limit"));
    assert_eq!(response.status.as_deref(), Some("rejected"));
}

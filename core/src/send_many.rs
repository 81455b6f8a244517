use rust_decimal::Decimal;
use secrecy::SecretString;
use std::collections::BTreeMap;

/// Parameters for a single transaction paying several recipients.
///
/// Recipients are keyed by address, so every address appears at most once and
/// the wire order is always sorted by address.
#[derive(Debug)]
pub struct SendManyRequest {
    pub wallet_id: String,
    pub wallet_passphrase: SecretString,
    pub recipients: BTreeMap<String, Decimal>,
    pub sequence_id: Option<String>,
    pub message: Option<String>,
    pub fee: Option<Decimal>,
    /// Confirmation target in blocks, sent as is.
    pub fee_tx_confirm_target: Option<Decimal>,
    /// Only sent when greater than zero.
    pub min_confirms: u32,
    pub enforce_min_confirms_for_change: bool,
}
impl SendManyRequest {
    #[must_use]
    pub fn new(
        wallet_id: &str,
        wallet_passphrase: SecretString,
        recipients: BTreeMap<String, Decimal>,
    ) -> Self {
        Self {
            wallet_id: wallet_id.to_string(),
            wallet_passphrase,
            recipients,
            sequence_id: None,
            message: None,
            fee: None,
            fee_tx_confirm_target: None,
            min_confirms: 0,
            enforce_min_confirms_for_change: false,
        }
    }
    #[must_use]
    pub fn with_sequence_id(mut self, sequence_id: &str) -> Self {
        self.sequence_id = Some(sequence_id.to_string());
        self
    }
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
    #[must_use]
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }
    #[must_use]
    pub fn with_fee_tx_confirm_target(mut self, target: Decimal) -> Self {
        self.fee_tx_confirm_target = Some(target);
        self
    }
    #[must_use]
    pub fn with_min_confirms(mut self, min_confirms: u32) -> Self {
        self.min_confirms = min_confirms;
        self
    }
    #[must_use]
    pub fn with_enforce_min_confirms_for_change(mut self, enforce: bool) -> Self {
        self.enforce_min_confirms_for_change = enforce;
        self
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SendCoinsResponse {
    pub tx: Option<String>,
    pub hash: Option<String>,
    pub error: Option<String>,
    pub pending_approval: Option<String>,
    pub otp: bool,
    pub triggered_policy: Option<String>,
    pub status: Option<String>,
    pub fee: Decimal,
    pub fee_rate: Decimal,
}

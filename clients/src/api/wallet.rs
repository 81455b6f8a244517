use async_trait::async_trait;
use dg_bitgo_core::send_many::{SendCoinsResponse, SendManyRequest};
use dg_bitgo_core::wallet::Wallet;
use std::io::Error;

#[async_trait]
pub trait WalletAPI {
    /// Credential exchange is not supported, callers must configure a
    /// long-lived access token instead.
    async fn login(
        &self,
        email: &str,
        password: &str,
        otp: &str,
        extensible: bool,
    ) -> Result<Option<String>, Error>;
    async fn list_wallets(&self) -> Result<Vec<Wallet>, Error>;
    /// `None` unless the service reported an id, a balance and a confirmed balance.
    async fn get_wallet(&self, wallet_id: &str) -> Result<Option<Wallet>, Error>;
    /// `None` when the response carries neither `tx` nor `error`.
    async fn send_many(&self, request: &SendManyRequest)
        -> Result<Option<SendCoinsResponse>, Error>;
}

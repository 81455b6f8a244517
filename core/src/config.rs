use log::warn;
use secrecy::SecretString;
use std::env;
use std::io::{Error, ErrorKind};

pub const WALLET_PLACEHOLDER: &str = "$WALLET";

fn base_url() -> String {
    "http://localhost:3080/api/v1".to_string()
}
fn send_many_path() -> String {
    format!("/wallet/{WALLET_PLACEHOLDER}/sendmany")
}
fn list_wallets_path() -> String {
    "/wallet".to_string()
}
fn get_wallet_path() -> String {
    "/wallet/".to_string()
}
const fn timeout() -> u64 {
    60
}

/// Connection settings for the wallet API. Paths are appended to `base_url`
/// verbatim; `send_many_path` must contain the `$WALLET` placeholder.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct WalletClientConfig {
    #[serde(default = "base_url")]
    pub base_url: String,
    #[serde(default = "send_many_path")]
    pub send_many_path: String,
    #[serde(default = "list_wallets_path")]
    pub list_wallets_path: String,
    #[serde(default = "get_wallet_path")]
    pub get_wallet_path: String,
    #[serde(skip)]
    pub access_token: Option<SecretString>,
    /// Disables certificate and hostname checks. Sandbox endpoints only.
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Request timeout in seconds.
    #[serde(default = "timeout")]
    pub timeout: u64,
}
impl Default for WalletClientConfig {
    fn default() -> Self {
        WalletClientConfig {
            base_url: base_url(),
            send_many_path: send_many_path(),
            list_wallets_path: list_wallets_path(),
            get_wallet_path: get_wallet_path(),
            access_token: None,
            insecure_skip_verify: false,
            timeout: timeout(),
        }
    }
}
impl WalletClientConfig {
    #[must_use]
    pub fn new(base_url: &str, access_token: SecretString) -> Self {
        Self {
            base_url: base_url.to_string(),
            access_token: Some(access_token),
            ..Default::default()
        }
    }
    /// Defaults overlaid with `BITGO_BASE_URL`, `BITGO_ACCESS_TOKEN`,
    /// `BITGO_INSECURE_SKIP_VERIFY` and `BITGO_TIMEOUT`.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(url) = env::var("BITGO_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(token) = env::var("BITGO_ACCESS_TOKEN") {
            config.access_token = Some(SecretString::new(token.into_boxed_str()));
        }
        if let Ok(insecure) = env::var("BITGO_INSECURE_SKIP_VERIFY") {
            config.insecure_skip_verify = insecure.parse().map_err(|e| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("Invalid BITGO_INSECURE_SKIP_VERIFY {insecure}: {e}"),
                )
            })?;
            if config.insecure_skip_verify {
                warn!("BITGO_INSECURE_SKIP_VERIFY is set, TLS verification will be disabled");
            }
        }
        if let Ok(timeout) = env::var("BITGO_TIMEOUT") {
            config.timeout = timeout.parse().map_err(|e| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("Invalid BITGO_TIMEOUT {timeout}: {e}"),
                )
            })?;
        }
        Ok(config)
    }
    #[must_use]
    pub fn with_send_many_path(mut self, path: &str) -> Self {
        self.send_many_path = path.to_string();
        self
    }
    #[must_use]
    pub fn with_list_wallets_path(mut self, path: &str) -> Self {
        self.list_wallets_path = path.to_string();
        self
    }
    #[must_use]
    pub fn with_get_wallet_path(mut self, path: &str) -> Self {
        self.get_wallet_path = path.to_string();
        self
    }
    #[must_use]
    pub fn with_access_token(mut self, access_token: SecretString) -> Self {
        self.access_token = Some(access_token);
        self
    }
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, insecure_skip_verify: bool) -> Self {
        self.insecure_skip_verify = insecure_skip_verify;
        self
    }
    #[must_use]
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
    #[must_use]
    pub fn list_wallets_url(&self) -> String {
        format!("{}{}", self.base_url, self.list_wallets_path)
    }
    #[must_use]
    pub fn get_wallet_url(&self, wallet_id: &str) -> String {
        format!("{}{}{}", self.base_url, self.get_wallet_path, wallet_id)
    }
    #[must_use]
    pub fn send_many_url(&self, wallet_id: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.send_many_path.replace(WALLET_PLACEHOLDER, wallet_id)
        )
    }
}

#[test]
fn test_config_defaults() {
    let config: WalletClientConfig = serde_json::from_str(r#"{"timeout": 5}"#).unwrap();
    assert_eq!(config.base_url, "http://localhost:3080/api/v1");
    assert_eq!(config.send_many_path, "/wallet/$WALLET/sendmany");
    assert_eq!(config.list_wallets_path, "/wallet");
    assert_eq!(config.get_wallet_path, "/wallet/");
    assert!(!config.insecure_skip_verify);
    assert!(config.access_token.is_none());
    assert_eq!(config.timeout, 5);
}

#[test]
fn test_config_urls() {
    let config = WalletClientConfig::new("https://test.bitgo.com/api/v1", SecretString::new("t".into()));
    assert_eq!(config.list_wallets_url(), "https://test.bitgo.com/api/v1/wallet");
    assert_eq!(
        config.get_wallet_url("2MzZ"),
        "https://test.bitgo.com/api/v1/wallet/2MzZ"
    );
    assert_eq!(
        config.send_many_url("2MzZ"),
        "https://test.bitgo.com/api/v1/wallet/2MzZ/sendmany"
    );
    let config = config.with_send_many_path("/v2/$WALLET/pay");
    assert_eq!(
        config.send_many_url("abc"),
        "https://test.bitgo.com/api/v1/v2/abc/pay"
    );
}

#[test]
fn test_config_from_env() {
    use secrecy::ExposeSecret;
    let vars = [
        "BITGO_BASE_URL",
        "BITGO_ACCESS_TOKEN",
        "BITGO_INSECURE_SKIP_VERIFY",
        "BITGO_TIMEOUT",
    ];
    for var in vars {
        env::remove_var(var);
    }
    let config = WalletClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "http://localhost:3080/api/v1");
    assert!(config.access_token.is_none());
    assert!(!config.insecure_skip_verify);
    assert_eq!(config.timeout, 60);

    env::set_var("BITGO_BASE_URL", "https://test.bitgo.com/api/v1");
    env::set_var("BITGO_ACCESS_TOKEN", "v2xabc");
    env::set_var("BITGO_INSECURE_SKIP_VERIFY", "true");
    env::set_var("BITGO_TIMEOUT", "15");
    let config = WalletClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://test.bitgo.com/api/v1");
    assert_eq!(
        config.access_token.as_ref().map(|t| t.expose_secret().to_string()),
        Some("v2xabc".to_string())
    );
    assert!(config.insecure_skip_verify);
    assert_eq!(config.timeout, 15);
    assert_eq!(config.send_many_path, "/wallet/$WALLET/sendmany");

    env::set_var("BITGO_TIMEOUT", "soon");
    let err = WalletClientConfig::from_env().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    env::set_var("BITGO_TIMEOUT", "15");

    env::set_var("BITGO_INSECURE_SKIP_VERIFY", "yes");
    let err = WalletClientConfig::from_env().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    for var in vars {
        env::remove_var(var);
    }
}

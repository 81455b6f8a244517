use rust_decimal::Decimal;

/// A custodial wallet. Balances are in whole coin units; a balance the service
/// did not report stays `None` rather than defaulting to zero.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub id: Option<String>,
    pub balance: Option<Decimal>,
    pub confirmed_balance: Option<Decimal>,
    pub spendable_balance: Option<Decimal>,
    pub spendable_confirmed_balance: Option<Decimal>,
    pub instant_balance: Option<Decimal>,
}

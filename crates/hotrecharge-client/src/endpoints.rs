//! Endpoint paths, relative to the versioned API root.

/// Versioned API root appended to the base URL.
pub const API_ROOT: &str = "/api/v1/";

/// Agent wallet balance.
pub const WALLET_BALANCE: &str = "agents/wallet-balance";
/// End-user airtime balance (`targetmobile` query parameter).
pub const END_USER_BALANCE: &str = "agents/enduser-balance";
/// Pinless airtime recharge in ZWL.
pub const RECHARGE_PINLESS: &str = "agents/recharge-pinless";
/// Pinless airtime recharge in USD.
pub const RECHARGE_PINLESS_USD: &str = "agents/recharge-pinless-usd";
/// Data bundle recharge.
pub const RECHARGE_DATA: &str = "agents/recharge-data";
/// Available data bundles.
pub const DATA_BUNDLES: &str = "agents/get-data-bundles";
/// Transaction query (`agentReference` query parameter).
pub const TRANSACTION_QUERY: &str = "agents/query-transaction";
/// Agent ZESA wallet balance.
pub const ZESA_BALANCE: &str = "agents/wallet-balance-zesa";
/// ZESA customer enquiry.
pub const ZESA_CUSTOMER: &str = "agents/check-customer-zesa";
/// ZESA token recharge.
pub const RECHARGE_ZESA: &str = "agents/recharge-zesa";
/// ZESA transaction query.
pub const QUERY_ZESA: &str = "agents/query-zesa-transaction";

//! Request and response types for the Hot Recharge client.
//!
//! Wire names follow the service's PascalCase convention. Response fields the
//! service does not always send are optional.

use hotrecharge_core::ReplyCode;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst};

/// Longest customer SMS the service accepts.
pub const MAX_CUSTOMER_SMS_LEN: usize = 135;

/// Smallest ZESA recharge amount.
pub const MIN_ZESA_AMOUNT: f64 = 21.0;

/// Largest ZESA recharge amount.
pub const MAX_ZESA_AMOUNT: f64 = 50_000.0;

/// Currency of a pinless airtime recharge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Zimbabwe dollar.
    #[default]
    Zwl,
    /// US dollar.
    Usd,
}

/// Pinless airtime recharge request.
#[derive(Debug, Clone, Serialize)]
pub struct PinlessRecharge {
    /// Amount to recharge.
    pub amount: f64,
    /// Mobile number to recharge.
    #[serde(rename = "targetMobile")]
    pub target_mobile: String,
    /// Brand identifier (optional).
    #[serde(rename = "BrandID", skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    /// SMS sent to the customer on success (optional, at most 135 characters).
    #[serde(rename = "CustomerSMS", skip_serializing_if = "Option::is_none")]
    pub customer_sms: Option<String>,
}

impl PinlessRecharge {
    /// Create a request with no brand or customer SMS.
    #[must_use]
    pub fn new(amount: f64, target_mobile: impl Into<String>) -> Self {
        Self {
            amount,
            target_mobile: target_mobile.into(),
            brand_id: None,
            customer_sms: None,
        }
    }
}

/// Data bundle recharge request.
#[derive(Debug, Clone, Serialize)]
pub struct DataBundleRecharge {
    /// Bundle product code, e.g. `DWB15` for an Econet weekly bundle.
    #[serde(rename = "productcode")]
    pub product_code: String,
    /// Mobile number to recharge.
    #[serde(rename = "targetMobile")]
    pub target_mobile: String,
    /// SMS sent to the customer on success (optional).
    #[serde(rename = "CustomerSMS", skip_serializing_if = "Option::is_none")]
    pub customer_sms: Option<String>,
}

impl DataBundleRecharge {
    /// Create a request with no customer SMS.
    #[must_use]
    pub fn new(product_code: impl Into<String>, target_mobile: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            target_mobile: target_mobile.into(),
            customer_sms: None,
        }
    }
}

/// ZESA electricity token recharge request.
#[derive(Debug, Clone, Serialize)]
pub struct ZesaRecharge {
    /// Amount to recharge, between 21 and 50000.
    #[serde(rename = "Amount")]
    pub amount: f64,
    /// Mobile number that receives the token.
    #[serde(rename = "TargetNumber")]
    pub notify_mobile: String,
    /// Meter number to recharge.
    #[serde(rename = "meterNumber")]
    pub meter_number: String,
    /// SMS sent to the customer on success (optional).
    #[serde(rename = "CustomerSMS", skip_serializing_if = "Option::is_none")]
    pub customer_sms: Option<String>,
}

impl ZesaRecharge {
    /// Create a request with no customer SMS.
    #[must_use]
    pub fn new(
        amount: f64,
        notify_mobile: impl Into<String>,
        meter_number: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            notify_mobile: notify_mobile.into(),
            meter_number: meter_number.into(),
            customer_sms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ZesaCustomerQuery<'a> {
    #[serde(rename = "MeterNumber")]
    pub meter_number: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ZesaTransactionQuery<'a> {
    #[serde(rename = "RechargeId")]
    pub recharge_id: &'a str,
}

/// Deserializers for text fields the service sends as either strings or
/// numbers.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub(super) fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Value::deserialize(deserializer).map(text)
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

/// Agent or end-user wallet balance.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WalletBalance {
    /// Reply code (always success when decoded by the client).
    pub reply_code: ReplyCode,
    /// Reply message.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reply_msg: Option<String>,
    /// Wallet balance.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub wallet_balance: f64,
    /// Reference of the request.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
}

/// Airtime or data recharge result.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RechargeResponse {
    /// Reply code.
    pub reply_code: ReplyCode,
    /// Reply message.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reply_msg: Option<String>,
    /// Reference of the request.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
    /// Amount recharged.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: f64,
    /// Agent discount.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub discount: f64,
    /// Wallet balance before the recharge.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub initial_balance: f64,
    /// Wallet balance after the recharge.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub final_balance: f64,
    /// Current wallet balance.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub wallet_balance: f64,
    /// Recharge identifier.
    #[serde(rename = "RechargeID", default, deserialize_with = "lenient::opt_string")]
    pub recharge_id: Option<String>,
    /// Data bundle details, for data recharges.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// SMS sent to the customer.
    #[serde(rename = "SMS", default, deserialize_with = "lenient::opt_string")]
    pub sms: Option<String>,
    /// Bundle validity window.
    #[serde(default)]
    pub window: Option<serde_json::Value>,
}

/// A purchasable data bundle.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataBundle {
    /// Bundle identifier.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub bundle_id: i64,
    /// Brand identifier.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub brand_id: Option<i64>,
    /// Network name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub network: String,
    /// Product code to pass to a data bundle recharge.
    #[serde(deserialize_with = "lenient::string")]
    pub product_code: String,
    /// Price in cents.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: i64,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Description.
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Validity in days.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub validity_period: Option<i64>,
}

/// Available data bundles.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataBundles {
    /// Reply code.
    pub reply_code: ReplyCode,
    /// Bundles on offer.
    #[serde(default)]
    pub bundles: Vec<DataBundle>,
    /// Reference of the request.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
}

/// Result of a transaction query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionQuery {
    /// Reply code.
    pub reply_code: ReplyCode,
    /// Reply message.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reply_msg: Option<String>,
    /// Reference of the queried transaction.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub original_agent_reference: Option<String>,
    /// The original transaction's reply, as the service stored it.
    #[serde(default)]
    pub raw_reply: Option<serde_json::Value>,
    /// Reference of this query.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
}

/// A ZESA electricity token.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZesaToken {
    /// Token to enter on the meter.
    #[serde(deserialize_with = "lenient::string")]
    pub token: String,
    /// Units purchased.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub units: f64,
    /// Net amount.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub net_amount: f64,
    /// Levy charged.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub levy: f64,
    /// Arrears recovered.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub arrears: f64,
    /// Tax charged.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub tax_amount: f64,
    /// ZESA's own reference.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub zesa_reference: Option<String>,
}

/// ZESA customer details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZesaCustomerInfo {
    /// Account holder name.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub customer_name: Option<String>,
    /// Account address.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    /// Meter number.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub meter_number: Option<String>,
    /// ZESA reference.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reference: Option<String>,
}

/// Result of a ZESA customer enquiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZesaCustomer {
    /// Reply code.
    pub reply_code: ReplyCode,
    /// Reply message.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reply_msg: Option<String>,
    /// Meter number.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub meter: Option<String>,
    /// Reference of the request.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
    /// Customer details.
    #[serde(default)]
    pub customer_info: Option<ZesaCustomerInfo>,
}

/// Result of a ZESA recharge, or of a ZESA transaction query.
#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZesaTransaction {
    /// Reply code.
    pub reply_code: ReplyCode,
    /// Reply message.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub reply_msg: Option<String>,
    /// ZESA wallet balance after the recharge.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub wallet_balance: f64,
    /// Amount recharged.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: f64,
    /// Agent discount.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub discount: f64,
    /// Meter number.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub meter: Option<String>,
    /// Account holder name.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub account_name: Option<String>,
    /// Account address.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    /// Issued tokens.
    #[serde(default)]
    pub tokens: Vec<ZesaToken>,
    /// Reference of the request.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub agent_reference: Option<String>,
    /// Recharge identifier, used to query the transaction later.
    #[serde(rename = "RechargeID", default, deserialize_with = "lenient::opt_string")]
    pub recharge_id: Option<String>,
    /// Customer details (transaction queries only).
    #[serde(default)]
    pub customer_info: Option<ZesaCustomerInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pinless_recharge_omits_unset_fields() {
        let body = serde_json::to_value(PinlessRecharge::new(1.5, "0777000000")).unwrap();
        assert_eq!(body, json!({ "amount": 1.5, "targetMobile": "0777000000" }));
    }

    #[test]
    fn zesa_recharge_wire_names() {
        let mut request = ZesaRecharge::new(100.0, "0777000000", "14108062218");
        request.customer_sms = Some("thanks".into());
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "Amount": 100.0,
                "TargetNumber": "0777000000",
                "meterNumber": "14108062218",
                "CustomerSMS": "thanks",
            })
        );
    }

    #[test]
    fn data_bundles_decode() {
        let body = json!({
            "ReplyCode": 2,
            "Bundles": [{
                "BundleId": 59,
                "BrandId": 20,
                "Network": "Econet WhatsApp",
                "ProductCode": "WPD1",
                "Amount": 2515,
                "Name": "WhatsApp (4MB)",
                "Description": "WhatsApp (4MB)",
                "ValidityPeriod": 1
            }],
            "AgentReference": "44d76e1d608444df93e9a1a3bfc8d8d3"
        });
        let bundles: DataBundles = serde_json::from_value(body).unwrap();
        assert!(bundles.reply_code.is_success());
        assert_eq!(bundles.bundles.len(), 1);
        assert_eq!(bundles.bundles[0].product_code, "WPD1");
    }

    #[test]
    fn wallet_balance_accepts_string_reply_code() {
        let body = json!({ "ReplyCode": "2", "ReplyMsg": "ok", "WalletBalance": 12.5 });
        let balance: WalletBalance = serde_json::from_value(body).unwrap();
        assert!(balance.reply_code.is_success());
        assert!((balance.wallet_balance - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn recharge_response_accepts_numeric_identifiers() {
        let body = json!({ "ReplyCode": 2, "RechargeID": 123_456, "SMS": 0 });
        let recharge: RechargeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(recharge.recharge_id.as_deref(), Some("123456"));
        assert_eq!(recharge.sms.as_deref(), Some("0"));
    }

    #[test]
    fn wallet_balance_accepts_string_amount() {
        let body = json!({ "ReplyCode": 2, "WalletBalance": "12.50" });
        let balance: WalletBalance = serde_json::from_value(body).unwrap();
        assert!((balance.wallet_balance - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zesa_transaction_accepts_mixed_number_formats() {
        let body = json!({
            "ReplyCode": 2,
            "Amount": "100",
            "Discount": 0,
            "Meter": 14_108_062_218_i64,
            "RechargeID": 998,
            "Tokens": [{ "Token": 1234, "Units": "12.3", "ZesaReference": null }]
        });
        let recharge: ZesaTransaction = serde_json::from_value(body).unwrap();
        assert!((recharge.amount - 100.0).abs() < f64::EPSILON);
        assert_eq!(recharge.meter.as_deref(), Some("14108062218"));
        assert_eq!(recharge.recharge_id.as_deref(), Some("998"));
        assert_eq!(recharge.tokens[0].token, "1234");
        assert!((recharge.tokens[0].units - 12.3).abs() < f64::EPSILON);
        assert_eq!(recharge.tokens[0].zesa_reference, None);
    }

    #[test]
    fn data_bundle_accepts_string_numbers() {
        let body = json!({ "BundleId": "59", "BrandId": "20", "ProductCode": "WPD1", "Amount": "2515" });
        let bundle: DataBundle = serde_json::from_value(body).unwrap();
        assert_eq!(bundle.bundle_id, 59);
        assert_eq!(bundle.brand_id, Some(20));
        assert_eq!(bundle.amount, 2515);
        assert_eq!(bundle.validity_period, None);
    }
}

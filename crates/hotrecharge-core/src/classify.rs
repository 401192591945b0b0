//! Response classification.
//!
//! Maps a failed response onto a [`HotRechargeError`]. The input is an
//! envelope holding the reply code at the top level and the response body
//! under `data`:
//!
//! ```json
//! { "ReplyCode": 208, "data": { "ReplyMsg": "Insufficient balance", "...": "..." } }
//! ```

use serde_json::Value;

use crate::error::{ErrorKind, HotRechargeError};
use crate::reply::ReplyCode;

/// Message used when the response carries none of the known message fields.
pub const FALLBACK_MESSAGE: &str = "Unknown error, possibly network related";

/// Message fields, in precedence order.
const MESSAGE_KEYS: [&str; 3] = ["Message", "ReplyMessage", "ReplyMsg"];

/// Classify a response.
///
/// Returns `Ok(())` only when the response carries the success reply code and
/// no transport status was supplied. Everything else is classified as by
/// [`classify_failure`].
///
/// # Errors
///
/// Returns the classified error for any response that is not a plain success.
pub fn classify(response: &Value, status: Option<u16>) -> crate::Result<()> {
    if status.is_none() && ReplyCode::from_response(response).is_some_and(ReplyCode::is_success) {
        return Ok(());
    }
    Err(classify_failure(response, status))
}

/// Classify a response that is already known to have failed.
///
/// Resolution order:
///
/// 1. a usable `ReplyCode` other than `2` decides the kind;
/// 2. otherwise the transport `status`, looked up in the same table;
/// 3. otherwise [`ErrorKind::Generic`].
///
/// Codes absent from the table are always `Generic`. Never panics, whatever
/// shape `response` has.
#[must_use]
pub fn classify_failure(response: &Value, status: Option<u16>) -> HotRechargeError {
    let message = extract_message(response);
    let reply_code = ReplyCode::from_response(response).filter(|code| !code.is_success());

    let kind = match (reply_code, status) {
        (Some(code), _) => ErrorKind::from_code(code.value()),
        (None, Some(status)) => ErrorKind::from_code(i64::from(status)),
        (None, None) => None,
    }
    .unwrap_or(ErrorKind::Generic);

    tracing::trace!(
        kind = %kind,
        reply_code = reply_code.map(ReplyCode::value),
        status,
        "Classified response"
    );

    HotRechargeError::new(kind, message, response.clone())
}

/// Wrap a raw response body into the envelope the classifier reads.
///
/// The body is kept untouched under `data`; its `ReplyCode`, if any, is
/// copied to the top level.
#[must_use]
pub fn envelope(body: Value) -> Value {
    let mut envelope = serde_json::Map::new();
    if let Some(code) = body.get("ReplyCode") {
        envelope.insert("ReplyCode".to_string(), code.clone());
    }
    envelope.insert("data".to_string(), body);
    Value::Object(envelope)
}

/// Pull the human-readable message out of `response.data`.
///
/// Checks `Message`, then `ReplyMessage`, then `ReplyMsg`, and falls back to
/// [`FALLBACK_MESSAGE`]. A `null` field counts as absent; non-string values
/// are rendered as JSON text.
#[must_use]
pub fn extract_message(response: &Value) -> String {
    let Some(data) = response.get("data").and_then(Value::as_object) else {
        return FALLBACK_MESSAGE.to_string();
    };

    MESSAGE_KEYS
        .iter()
        .filter_map(|key| data.get(*key))
        .find(|value| !value.is_null())
        .map_or_else(
            || FALLBACK_MESSAGE.to_string(),
            |value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: [(i64, ErrorKind); 15] = [
        (4, ErrorKind::PendingVerification),
        (206, ErrorKind::PlatformFailure),
        (208, ErrorKind::InsufficientBalance),
        (209, ErrorKind::OutOfStock),
        (210, ErrorKind::PlatformFailure),
        (216, ErrorKind::DuplicateRequest),
        (217, ErrorKind::InvalidContact),
        (218, ErrorKind::Unauthorized),
        (219, ErrorKind::WebServiceFailure),
        (220, ErrorKind::Unauthorized),
        (221, ErrorKind::BalanceRequestFailure),
        (222, ErrorKind::RechargeAmountLimit),
        (401, ErrorKind::Unauthorized),
        (429, ErrorKind::DuplicateReference),
        (800, ErrorKind::TransactionNotFound),
    ];

    fn with_code(code: impl Into<Value>) -> Value {
        json!({ "ReplyCode": code.into(), "data": { "ReplyMsg": "failed" } })
    }

    #[test]
    fn every_table_code_maps_to_its_kind() {
        for (code, kind) in TABLE {
            let err = classify_failure(&with_code(code), None);
            assert_eq!(err.kind(), kind, "code {code}");
            assert_eq!(err.message(), "failed");
        }
    }

    #[test]
    fn unknown_codes_are_generic() {
        for code in [0, 1, 3, 5, 200, 207, 211, 223, 500, 799, 801, -1] {
            let err = classify_failure(&with_code(code), None);
            assert_eq!(err.kind(), ErrorKind::Generic, "code {code}");
        }
    }

    #[test]
    fn string_codes_match_numeric_codes() {
        let a = classify_failure(&with_code("208"), None);
        let b = classify_failure(&with_code(208), None);
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.kind(), ErrorKind::InsufficientBalance);
    }

    #[test]
    fn message_precedence() {
        let cases = [
            (json!({ "data": { "Message": "A", "ReplyMessage": "B" } }), "A"),
            (json!({ "data": { "ReplyMessage": "B", "ReplyMsg": "C" } }), "B"),
            (json!({ "data": { "ReplyMsg": "C" } }), "C"),
            (json!({ "data": {} }), FALLBACK_MESSAGE),
        ];
        for (response, expected) in cases {
            assert_eq!(extract_message(&response), expected);
        }
    }

    #[test]
    fn message_fallback_on_odd_shapes() {
        assert_eq!(extract_message(&json!({})), FALLBACK_MESSAGE);
        assert_eq!(extract_message(&json!(null)), FALLBACK_MESSAGE);
        assert_eq!(extract_message(&json!({ "data": null })), FALLBACK_MESSAGE);
        assert_eq!(extract_message(&json!({ "data": "text" })), FALLBACK_MESSAGE);
        assert_eq!(extract_message(&json!([1, 2])), FALLBACK_MESSAGE);
    }

    #[test]
    fn null_message_is_skipped_and_non_strings_are_rendered() {
        let response = json!({ "data": { "Message": null, "ReplyMessage": 42 } });
        assert_eq!(extract_message(&response), "42");
    }

    #[test]
    fn status_fallback_when_no_reply_code() {
        let response = json!({ "data": { "Message": "denied" } });
        assert_eq!(
            classify_failure(&response, Some(401)).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            classify_failure(&response, Some(429)).kind(),
            ErrorKind::DuplicateReference
        );
        assert_eq!(
            classify_failure(&response, Some(500)).kind(),
            ErrorKind::Generic
        );
    }

    #[test]
    fn reply_code_wins_over_status() {
        let err = classify_failure(&with_code(209), Some(401));
        assert_eq!(err.kind(), ErrorKind::OutOfStock);
    }

    #[test]
    fn unusable_reply_code_falls_through_to_status() {
        let response = json!({ "ReplyCode": "n/a", "data": {} });
        assert_eq!(
            classify_failure(&response, Some(401)).kind(),
            ErrorKind::Unauthorized
        );
        let response = json!({ "ReplyCode": 2, "data": {} });
        assert_eq!(
            classify_failure(&response, Some(429)).kind(),
            ErrorKind::DuplicateReference
        );
    }

    #[test]
    fn nothing_actionable_is_generic_with_raw_response() {
        let response = json!({ "data": { "Message": "socket hang up" } });
        let err = classify_failure(&response, None);
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "socket hang up");
        assert_eq!(err.raw_response(), &response);
    }

    #[test]
    fn success_passes_through() {
        assert!(classify(&with_code(2), None).is_ok());
        assert!(classify(&with_code("2"), None).is_ok());
    }

    #[test]
    fn classify_reports_failures() {
        let err = classify(&with_code(222), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RechargeAmountLimit);

        let err = classify(&json!({ "data": {} }), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), FALLBACK_MESSAGE);

        let err = classify(&with_code(2), Some(401)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn envelope_lifts_reply_code_and_keeps_body() {
        let body = json!({ "ReplyCode": "217", "ReplyMsg": "Invalid number", "AgentReference": "abc" });
        let wrapped = envelope(body.clone());
        assert_eq!(wrapped["ReplyCode"], json!("217"));
        assert_eq!(wrapped["data"], body);

        let err = classify_failure(&wrapped, None);
        assert_eq!(err.kind(), ErrorKind::InvalidContact);
        assert_eq!(err.message(), "Invalid number");
    }

    #[test]
    fn envelope_of_missing_body() {
        let wrapped = envelope(Value::Null);
        assert_eq!(wrapped, json!({ "data": null }));
        assert_eq!(classify_failure(&wrapped, None).message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn classification_is_idempotent() {
        let response = json!({ "ReplyCode": "800", "data": { "Message": "not found" } });
        assert_eq!(
            classify_failure(&response, Some(429)),
            classify_failure(&response, Some(429))
        );
    }
}

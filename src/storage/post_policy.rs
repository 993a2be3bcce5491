//! Browser `POST` policy documents signed with AWS Signature Version 4.
//!
//! The SDK presigns single requests only, so the policy is assembled here
//! and signed with the `aws-sigv4` key derivation.

use std::collections::BTreeMap;
use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::sign::v4::{calculate_signature, generate_signing_key};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};

use super::StorageError;

/// Signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name in the credential scope.
pub const SERVICE: &str = "s3";

/// Formats `now` as an `x-amz-date` timestamp (`20130524T000000Z`).
#[must_use]
pub fn amz_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds `<yyyymmdd>/<region>/s3/aws4_request`.
#[must_use]
pub fn credential_scope(now: DateTime<Utc>, region: &str) -> String {
    format!("{}/{region}/{SERVICE}/aws4_request", now.format("%Y%m%d"))
}

/// Signs a browser `POST` policy.
///
/// `conditions` holds the caller's constraints (bucket, key, content type,
/// length range). The credential conditions are appended here. The
/// returned map holds only the signing fields (`policy` and `x-amz-*`),
/// which the caller merges with its own form fields.
///
/// # Errors
///
/// Returns [`StorageError::Signing`] if the policy cannot be serialized.
pub fn sign_post_policy(
    credentials: &Credentials,
    region: &str,
    mut conditions: Vec<serde_json::Value>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<BTreeMap<String, String>, StorageError> {
    let mut fields = BTreeMap::new();
    fields.insert("x-amz-algorithm".to_string(), ALGORITHM.to_string());
    fields.insert(
        "x-amz-credential".to_string(),
        format!(
            "{}/{}",
            credentials.access_key_id(),
            credential_scope(now, region)
        ),
    );
    fields.insert("x-amz-date".to_string(), amz_date(now));
    if let Some(token) = credentials.session_token() {
        fields.insert("x-amz-security-token".to_string(), token.to_string());
    }
    for (name, value) in &fields {
        conditions.push(serde_json::json!({ name: value }));
    }

    let policy = serde_json::json!({
        "expiration": expires_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "conditions": conditions,
    });
    let policy_bytes =
        serde_json::to_vec(&policy).map_err(|e| StorageError::Signing(e.to_string()))?;
    let encoded = BASE64.encode(policy_bytes);

    let signing_key = generate_signing_key(
        credentials.secret_access_key(),
        SystemTime::from(now),
        region,
        SERVICE,
    );
    let signature = calculate_signature(signing_key, encoded.as_bytes());

    fields.insert("policy".to_string(), encoded);
    fields.insert("x-amz-signature".to_string(), signature);
    Ok(fields)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        let Some(t) = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single() else {
            panic!("valid timestamp");
        };
        t
    }

    fn decode_policy(fields: &BTreeMap<String, String>) -> serde_json::Value {
        let Some(policy) = fields.get("policy") else {
            panic!("policy field");
        };
        let Ok(decoded) = BASE64.decode(policy) else {
            panic!("policy base64");
        };
        let Ok(doc) = serde_json::from_slice(&decoded) else {
            panic!("policy json");
        };
        doc
    }

    #[test]
    fn signing_key_for_timestamp_matches_published_example() {
        let key = generate_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            SystemTime::from(at(2012, 2, 15)),
            "us-east-1",
            "iam",
        );
        assert_eq!(
            hex::encode(key.as_ref()),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn policy_embeds_conditions_and_credential_scope() {
        let creds = Credentials::new("AKID", "secret", None, None, "static");
        let now = at(2024, 3, 1);
        let expires = now + chrono::Duration::seconds(60);
        let conditions = vec![
            serde_json::json!({ "key": "uploads/x_cat.png" }),
            serde_json::json!(["content-length-range", 1, 100]),
        ];
        let Ok(fields) = sign_post_policy(&creds, "us-east-1", conditions, expires, now) else {
            panic!("policy signing");
        };

        let doc = decode_policy(&fields);
        assert_eq!(doc["expiration"], "2024-03-01T00:01:00Z");
        let text = doc["conditions"].to_string();
        assert!(text.contains("uploads/x_cat.png"));
        assert!(text.contains("content-length-range"));
        assert!(text.contains("AKID/20240301/us-east-1/s3/aws4_request"));
        assert!(!text.contains("x-amz-security-token"));
        assert_eq!(
            fields.get("x-amz-date").map(String::as_str),
            Some("20240301T000000Z")
        );
    }

    #[test]
    fn signature_covers_encoded_policy() {
        let creds = Credentials::new("AKID", "secret", None, None, "static");
        let now = at(2024, 3, 1);
        let Ok(fields) = sign_post_policy(&creds, "us-east-1", Vec::new(), now, now) else {
            panic!("policy signing");
        };
        let (Some(policy), Some(signature)) = (fields.get("policy"), fields.get("x-amz-signature"))
        else {
            panic!("signing fields");
        };

        let key = generate_signing_key("secret", SystemTime::from(now), "us-east-1", SERVICE);
        assert_eq!(signature, &calculate_signature(key, policy.as_bytes()));
        assert_eq!(signature.len(), 64);

        let other = Credentials::new("AKID", "other", None, None, "static");
        let Ok(resigned) = sign_post_policy(&other, "us-east-1", Vec::new(), now, now) else {
            panic!("policy signing");
        };
        assert_ne!(resigned.get("x-amz-signature"), Some(signature));
    }

    #[test]
    fn session_token_is_a_signed_condition() {
        let creds = Credentials::new("AKID", "secret", Some("tok".to_string()), None, "sts");
        let now = at(2024, 1, 2);
        let Ok(fields) = sign_post_policy(&creds, "eu-west-1", Vec::new(), now, now) else {
            panic!("policy signing");
        };
        assert_eq!(
            fields.get("x-amz-security-token").map(String::as_str),
            Some("tok")
        );
        let doc = decode_policy(&fields);
        assert!(doc["conditions"].to_string().contains("\"x-amz-security-token\":\"tok\""));
    }
}

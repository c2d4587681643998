//! Request parsing helpers for the users endpoints.
//!
//! Parsing failures map to the same fixed step errors as storage failures;
//! nothing here rejects a request with a 4xx status.

use std::fmt;

use actix_web::web;
use futures_util::StreamExt;
use serde::Deserialize;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use tracing::debug;

use crate::domain::{Error, UserDetails, UserId};

/// Largest request body accepted, matching actix's default payload limit.
pub const MAX_BODY_BYTES: usize = 262_144;

/// JSON body accepted by create and update.
///
/// The body must be a JSON object or `null`. `null` and missing members
/// give empty strings, as does a member whose value is `null`. Member names
/// match case-insensitively, and a later duplicate overrides an earlier one.
/// An `id` member and any other unknown members are ignored. Strings may not
/// contain NUL, which PostgreSQL text columns cannot store.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl From<UserPayload> for UserDetails {
    fn from(value: UserPayload) -> Self {
        Self::new(value.name, value.email)
    }
}

impl<'de> Deserialize<'de> for UserPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = UserPayload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UserPayload::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UserPayload::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut payload = UserPayload::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("name") {
                &mut payload.name
            } else if key.eq_ignore_ascii_case("email") {
                &mut payload.email
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                if value.contains('\0') {
                    return Err(de::Error::custom(format!("{key} contains NUL")));
                }
                *field = value;
            }
        }
        Ok(payload)
    }
}

/// Parse the `{id}` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|err| {
        debug!(raw, %err, "rejecting user id path segment");
        Error::parameter_parse()
    })
}

/// Read the whole request body.
pub(crate) async fn read_body(mut payload: web::Payload) -> Result<web::Bytes, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            debug!(%err, "request body stream failed");
            Error::body_read()
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            debug!(limit = MAX_BODY_BYTES, "request body too large");
            return Err(Error::body_read());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Decode a user JSON object from raw body bytes.
pub(crate) fn decode_user_details(body: &[u8]) -> Result<UserDetails, Error> {
    serde_json::from_slice::<UserPayload>(body)
        .map(UserDetails::from)
        .map_err(|err| {
            debug!(%err, "request body is not a user object");
            Error::json_decode()
        })
}

/// Serialise `value` as a JSON response body.
pub(crate) fn encode_json<T>(value: &T, failure_message: &str) -> Result<Vec<u8>, Error>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_vec(value).map_err(|err| {
        debug!(%err, "response serialisation failed");
        Error::json_encode(failure_message)
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for request parsing.
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::FromRequest;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("4294967295", u32::MAX)]
    fn parse_user_id_accepts_u32(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_user_id(raw), Ok(UserId::new(expected)));
    }

    #[rstest]
    #[case("abc")]
    #[case("-3")]
    #[case("4294967296")]
    #[case("")]
    fn parse_user_id_rejects_non_u32(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("id should be rejected");
        assert_eq!(err.code(), ErrorCode::ParameterParse);
    }

    #[rstest]
    #[case(r#"{"name":"Ana","email":"ana@x.com"}"#, "Ana", "ana@x.com")]
    #[case(r#"{"id":99,"name":"Ana","email":"ana@x.com"}"#, "Ana", "ana@x.com")]
    #[case(r#"{"name":"Ana"}"#, "Ana", "")]
    #[case(r#"{"nickname":"A"}"#, "", "")]
    #[case("{}", "", "")]
    #[case("null", "", "")]
    #[case(r#"{"Name":"Ana","EMAIL":"ana@x.com"}"#, "Ana", "ana@x.com")]
    #[case(r#"{"name":"Ana","Name":"Bo"}"#, "Bo", "")]
    #[case(r#"{"name":null,"email":"a@x"}"#, "", "a@x")]
    fn decode_user_details_is_lenient(
        #[case] body: &str,
        #[case] name: &str,
        #[case] email: &str,
    ) {
        let details = decode_user_details(body.as_bytes()).expect("body should decode");
        assert_eq!(details, UserDetails::new(name, email));
    }

    #[rstest]
    #[case("")]
    #[case("{not json")]
    #[case("[]")]
    #[case(r#"{"name":7}"#)]
    #[case(r#"["Ana","ana@x.com"]"#)]
    #[case(r#""Ana""#)]
    #[case(r#"{"name":"a\u0000b"}"#)]
    #[case(r#"{"name":"Ana"} trailing"#)]
    fn decode_user_details_rejects_malformed_bodies(#[case] body: &str) {
        let err = decode_user_details(body.as_bytes()).expect_err("body should be rejected");
        assert_eq!(err.code(), ErrorCode::JsonDecode);
        assert_eq!(err.message(), "Failed to unmarshal request body!");
    }

    #[rstest]
    #[actix_web::test]
    async fn read_body_rejects_bodies_over_the_limit() {
        let (req, mut payload) = actix_web::test::TestRequest::post()
            .set_payload(vec![b'x'; MAX_BODY_BYTES + 1])
            .to_http_parts();
        let payload = web::Payload::from_request(&req, &mut payload)
            .await
            .expect("payload extractor is infallible");

        let err = read_body(payload).await.expect_err("oversized body");

        assert_eq!(err.code(), ErrorCode::BodyRead);
        assert_eq!(err.message(), "Failed to read request body!");
    }

    #[rstest]
    #[actix_web::test]
    async fn read_body_accepts_bodies_at_the_limit() {
        let (req, mut payload) = actix_web::test::TestRequest::post()
            .set_payload(vec![b'x'; MAX_BODY_BYTES])
            .to_http_parts();
        let payload = web::Payload::from_request(&req, &mut payload)
            .await
            .expect("payload extractor is infallible");

        let body = read_body(payload).await.expect("body within limit");

        assert_eq!(body.len(), MAX_BODY_BYTES);
    }

    #[rstest]
    fn encode_json_serialises_sequences() {
        let encoded = encode_json(&[1, 2, 3], "unused").expect("encodes");
        assert_eq!(encoded, b"[1,2,3]");
    }
}

//! Review payloads
//!
//! Unknown fields are rejected, and `Rating` enforces the 1..=5 range while
//! decoding, so an invalid payload never reaches the workflow. `product_id`
//! and `rating` also accept numeric strings such as `"42"`.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use reviews::{NewReview, Rating, ReviewPatch, RpcError};

use crate::application::INVALID_ID;

/// Decode a payload, reporting shape errors as bad input
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, RpcError> {
    serde_json::from_value(data).map_err(|e| RpcError::bad_input(e.to_string()))
}

/// Review id payload of `findOneReview` / `removeReview`
pub fn decode_id(data: &Value) -> Result<&str, RpcError> {
    data.as_str().ok_or_else(|| RpcError::bad_input(INVALID_ID))
}

fn integer<E: de::Error>(value: Value) -> Result<i64, E> {
    let parsed = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| E::custom(format!("expected an integer, found {value}")))
}

fn deserialize_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    integer(Value::deserialize(deserializer)?)
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Rating, D::Error>
where
    D: Deserializer<'de>,
{
    Rating::new(deserialize_integer(deserializer)?).map_err(de::Error::custom)
}

fn deserialize_optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?
        .map(integer::<D::Error>)
        .transpose()
}

fn deserialize_optional_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_integer(deserializer)?
        .map(|value| Rating::new(value).map_err(de::Error::custom))
        .transpose()
}

/// Present key: `Some(value)`, where `null` becomes `Some(None)`.
/// Absent keys fall back to `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `createReview` payload
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateReviewRequest {
    pub user_id: String,
    #[serde(deserialize_with = "deserialize_integer")]
    pub product_id: i64,
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: Rating,
    #[serde(default)]
    pub comment: Option<String>,
}

impl CreateReviewRequest {
    pub fn validate(self) -> Result<NewReview, RpcError> {
        if self.user_id.is_empty() {
            return Err(RpcError::bad_input("user_id should not be empty"));
        }

        Ok(NewReview::new(
            self.user_id,
            self.product_id,
            self.rating,
            self.comment,
        ))
    }
}

/// `updateReview` payload: the id plus any mutable fields.
///
/// `"comment": null` clears the comment; an absent key keeps it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateReviewRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "deserialize_optional_integer")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_rating")]
    pub rating: Option<Rating>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub comment: Option<Option<String>>,
}

impl UpdateReviewRequest {
    pub fn into_parts(self) -> Result<(String, ReviewPatch), RpcError> {
        let id = match self.id {
            Value::String(id) => id,
            _ => return Err(RpcError::bad_input(INVALID_ID)),
        };

        let patch = ReviewPatch {
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
        };

        Ok((id, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_decodes() {
        let request: CreateReviewRequest =
            decode(json!({"user_id": "u1", "product_id": 42, "rating": 5})).unwrap();
        let review = request.validate().unwrap();

        assert_eq!(review.user_id, "u1");
        assert_eq!(review.product_id, 42);
        assert_eq!(review.rating.value(), 5);
        assert_eq!(review.comment, None);
    }

    #[test]
    fn test_create_request_rejects_bad_shapes() {
        let cases = [
            json!({"user_id": "u1", "product_id": 42, "rating": 6}),
            json!({"user_id": "u1", "product_id": 42, "rating": 0}),
            json!({"user_id": "u1", "product_id": 42, "rating": 4.5}),
            json!({"user_id": "u1", "product_id": "abc", "rating": 3}),
            json!({"user_id": 7, "product_id": 42, "rating": 3}),
            json!({"product_id": 42, "rating": 3}),
            json!({"user_id": "u1", "product_id": 42, "rating": 3, "comment": 5}),
            json!({"user_id": "u1", "product_id": 42, "rating": 3, "admin": true}),
            json!(null),
        ];

        for case in cases {
            let err = decode::<CreateReviewRequest>(case.clone()).unwrap_err();
            assert_eq!(err.status, 400, "case: {case}");
        }
    }

    #[test]
    fn test_rating_error_message() {
        let err = decode::<CreateReviewRequest>(json!({"user_id": "u1", "product_id": 42, "rating": 9}))
            .unwrap_err();
        assert!(err.message.contains("rating must not be greater than 5"));
    }

    #[test]
    fn test_create_request_rejects_empty_user() {
        let request: CreateReviewRequest =
            decode(json!({"user_id": "", "product_id": 42, "rating": 3})).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            RpcError::bad_input("user_id should not be empty")
        );
    }

    #[test]
    fn test_update_request_parts() {
        let request: UpdateReviewRequest =
            decode(json!({"id": "r1", "rating": 2, "comment": "meh"})).unwrap();
        let (id, patch) = request.into_parts().unwrap();

        assert_eq!(id, "r1");
        assert_eq!(patch.rating, Some(Rating::new(2).unwrap()));
        assert_eq!(patch.comment, Some(Some("meh".to_string())));
        assert_eq!(patch.product_id, None);
    }

    #[test]
    fn test_update_request_tells_null_comment_from_absent() {
        let request: UpdateReviewRequest = decode(json!({"id": "r1", "comment": null})).unwrap();
        assert_eq!(request.into_parts().unwrap().1.comment, Some(None));

        let request: UpdateReviewRequest = decode(json!({"id": "r1", "rating": 4})).unwrap();
        assert_eq!(request.into_parts().unwrap().1.comment, None);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let request: CreateReviewRequest =
            decode(json!({"user_id": "u1", "product_id": "42", "rating": " 5"})).unwrap();
        assert_eq!(request.product_id, 42);
        assert_eq!(request.rating.value(), 5);

        let request: UpdateReviewRequest =
            decode(json!({"id": "r1", "product_id": "7", "rating": "2"})).unwrap();
        let (_, patch) = request.into_parts().unwrap();
        assert_eq!(patch.product_id, Some(7));
        assert_eq!(patch.rating, Some(Rating::new(2).unwrap()));
    }

    #[test]
    fn test_update_request_rejects_bad_rating() {
        for payload in [
            json!({"id": "r1", "rating": 9}),
            json!({"id": "r1", "rating": 0}),
            json!({"id": "r1", "rating": "six"}),
        ] {
            let err = decode::<UpdateReviewRequest>(payload.clone()).unwrap_err();
            assert_eq!(err.status, 400, "payload: {payload}");
        }
    }

    #[test]
    fn test_update_request_requires_string_id() {
        for payload in [json!({"rating": 2}), json!({"id": 17, "rating": 2})] {
            let request: UpdateReviewRequest = decode(payload).unwrap();
            assert_eq!(
                request.into_parts().unwrap_err(),
                RpcError::bad_input("Invalid Review ID format")
            );
        }
    }

    #[test]
    fn test_update_request_rejects_immutable_fields() {
        let err = decode::<UpdateReviewRequest>(json!({"id": "r1", "user_id": "u2"})).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_decode_id() {
        assert_eq!(decode_id(&json!("r1")).unwrap(), "r1");
        assert_eq!(decode_id(&json!("")).unwrap(), "");
        assert_eq!(
            decode_id(&json!(12)).unwrap_err(),
            RpcError::bad_input("Invalid Review ID format")
        );
    }
}

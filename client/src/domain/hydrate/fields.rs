//! Field extraction from API JSON items.
//!
//! Each extractor reads only fields that are present and carry the expected
//! JSON type. Anything else is reported as `None` so the merge step leaves the
//! target's current value untouched.

use serde_json::{Map, Value};

/// Keys checked, in order, for a post identifier.
const POST_ID_KEYS: [&str; 3] = ["post_id", "answer_id", "question_id"];

/// User fields carried by an `owner` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    /// `reputation`.
    pub reputation: Option<i32>,
    /// `user_id`.
    pub user_id: Option<u64>,
    /// `display_name`.
    pub display_name: Option<String>,
}

/// Post fields shared by question and answer items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    /// `body_markdown`.
    pub body: Option<String>,
    /// Nested `owner` object.
    pub owner: Option<UserFields>,
    /// First integer of `post_id`, `answer_id`, `question_id`.
    pub post_id: Option<u64>,
    /// `score`.
    pub score: Option<i32>,
}

/// Fields of one answer item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerFields {
    /// Post fields read from the same object.
    pub post: PostFields,
    /// `is_accepted`.
    pub is_accepted: Option<bool>,
}

/// Fields of one question item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFields {
    /// Post fields read from the same object.
    pub post: PostFields,
    /// `title`.
    pub title: Option<String>,
    /// `link`.
    pub link: Option<String>,
    /// `answers`; a non-object element yields an empty slot.
    pub answers: Option<Vec<Option<AnswerFields>>>,
    /// `is_answered`.
    pub is_answered: Option<bool>,
    /// `view_count`.
    pub view_count: Option<u32>,
    /// `tags`; non-string elements are dropped.
    pub tags: Option<Vec<String>>,
}

impl UserFields {
    /// Extract user fields from an `owner` object.
    #[must_use]
    pub fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            reputation: int_field(object, "reputation"),
            user_id: int_field(object, "user_id"),
            display_name: string_field(object, "display_name"),
        }
    }
}

impl PostFields {
    /// Extract post fields from a question or answer object.
    #[must_use]
    pub fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            body: string_field(object, "body_markdown"),
            owner: object
                .get("owner")
                .and_then(Value::as_object)
                .map(UserFields::from_json),
            post_id: POST_ID_KEYS
                .iter()
                .find_map(|key| object.get(*key).filter(|value| is_integer(value)))
                .and_then(integer_value),
            score: int_field(object, "score"),
        }
    }
}

impl AnswerFields {
    /// Extract answer fields from an answer object.
    #[must_use]
    pub fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            post: PostFields::from_json(object),
            is_accepted: bool_field(object, "is_accepted"),
        }
    }
}

impl QuestionFields {
    /// Extract question fields from one element of `items`.
    ///
    /// A value that is not a JSON object yields empty fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stackexchange_client::domain::QuestionFields;
    ///
    /// let fields = QuestionFields::from_json(&json!({ "title": "Foo", "view_count": "many" }));
    /// assert_eq!(fields.title.as_deref(), Some("Foo"));
    /// assert_eq!(fields.view_count, None);
    /// ```
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            post: PostFields::from_json(object),
            title: string_field(object, "title"),
            link: string_field(object, "link"),
            answers: object.get("answers").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .map(|item| item.as_object().map(AnswerFields::from_json))
                    .collect()
            }),
            is_answered: bool_field(object, "is_answered"),
            view_count: int_field(object, "view_count"),
            tags: object.get("tags").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            }),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn bool_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    object.get(key).and_then(Value::as_bool)
}

/// Read an integer field, treating values outside `T`'s range as mistyped.
fn int_field<T>(object: &Map<String, Value>, key: &str) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    object.get(key).and_then(integer_value)
}

fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(number) if number.is_i64() || number.is_u64())
}

fn integer_value<T>(value: &Value) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if let Some(unsigned) = value.as_u64() {
        return <T as TryFrom<u64>>::try_from(unsigned).ok();
    }
    value
        .as_i64()
        .and_then(|signed| <T as TryFrom<i64>>::try_from(signed).ok())
}

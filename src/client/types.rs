use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payload sent when creating a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub job: String,
}

/// The part of the create response the form consumes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewUserResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// A user as returned by the list endpoint. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// `"{last_name} {first_name}"`, untrimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UsersPage {
    pub data: Vec<UserRecord>,
}

// Some backends hand out numeric ids, others strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

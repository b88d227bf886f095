//! JSON wire format.
//!
//! Records use camelCase keys. Content items carry a `"$type"`
//! discriminator: `"text"`, `"usage"`, or the pass-through content's own
//! type with its data fields flattened alongside. Pass-through content
//! that would be read back as something else fails to encode: a `"text"`
//! or `"usage"` type, or data keys named `"$type"` or
//! `"additionalProperties"`. Timestamps are signed milliseconds since the
//! Unix epoch. Raw payloads never serialize.
//!
//! ```rust
//! use fresponse::{Content, ResponseUpdate};
//!
//! let update = ResponseUpdate::from_text("hi")
//!     .with_message_id("m1")
//!     .with_content(Content::other("image", serde_json::json!({ "uri": "a.png" })));
//!
//! let json = update.to_json().expect("update should encode");
//! assert!(json.contains(r#""$type":"image""#));
//!
//! let decoded = ResponseUpdate::from_json(&json).expect("update should decode");
//! assert_eq!(decoded, update);
//! ```

use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Content, ContentKind, OtherContent, Response, ResponseError, ResponseUpdate, TextContent,
    UsageContent, UsageDetails,
};

const TYPE_KEY: &str = "$type";
const PROPERTIES_KEY: &str = "additionalProperties";
const TEXT_TYPE: &str = "text";
const USAGE_TYPE: &str = "usage";

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut object = Map::new();
        object.insert(TYPE_KEY.to_string(), self.discriminator().into());

        match &self.kind {
            ContentKind::Text(text) => {
                object.insert("text".to_string(), text.text.clone().into());
            }
            ContentKind::Usage(usage) => {
                let details = serde_json::to_value(&usage.details).map_err(ser::Error::custom)?;
                object.insert("details".to_string(), details);
            }
            ContentKind::Other(other) => {
                if matches!(other.content_type.as_str(), TEXT_TYPE | USAGE_TYPE) {
                    return Err(ser::Error::custom(format!(
                        "pass-through content cannot use reserved type '{}'",
                        other.content_type
                    )));
                }
                let Value::Object(fields) = &other.data else {
                    return Err(ser::Error::custom(format!(
                        "content '{}' data must be a JSON object",
                        other.content_type
                    )));
                };
                for (key, value) in fields {
                    if key == TYPE_KEY || key == PROPERTIES_KEY {
                        return Err(ser::Error::custom(format!(
                            "content '{}' data cannot use reserved key '{key}'",
                            other.content_type
                        )));
                    }
                    object.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(properties) = &self.properties {
            object.insert(PROPERTIES_KEY.to_string(), Value::Object(properties.clone()));
        }

        object.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = Map::<String, Value>::deserialize(deserializer)?;

        let content_type = match object.remove(TYPE_KEY) {
            Some(Value::String(content_type)) => content_type,
            Some(_) => return Err(de::Error::custom("content '$type' must be a string")),
            None => return Err(de::Error::missing_field(TYPE_KEY)),
        };

        let properties = match object.remove(PROPERTIES_KEY) {
            Some(Value::Object(properties)) => Some(properties),
            Some(Value::Null) | None => None,
            Some(_) => {
                return Err(de::Error::custom(
                    "content 'additionalProperties' must be an object",
                ));
            }
        };

        let kind = match content_type.as_str() {
            TEXT_TYPE => {
                let text = match object.remove("text") {
                    Some(Value::String(text)) => text,
                    Some(_) => {
                        return Err(de::Error::custom("text content 'text' must be a string"));
                    }
                    None => return Err(de::Error::missing_field("text")),
                };
                ContentKind::Text(TextContent { text })
            }
            USAGE_TYPE => {
                let details = match object.remove("details") {
                    Some(details) => {
                        UsageDetails::deserialize(details).map_err(de::Error::custom)?
                    }
                    None => UsageDetails::new(),
                };
                ContentKind::Usage(UsageContent { details })
            }
            _ => ContentKind::Other(OtherContent {
                content_type,
                data: Value::Object(object),
            }),
        };

        Ok(Content {
            kind,
            raw: None,
            properties,
        })
    }
}

impl ResponseUpdate {
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ResponseError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Response {
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ResponseError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// `Option<SystemTime>` as signed milliseconds since the Unix epoch.
///
/// Sub-millisecond precision is truncated toward the epoch.
pub(crate) mod epoch_millis {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use serde::ser::{self, Serializer};

    pub fn serialize<S>(value: &Option<SystemTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => match to_millis(*time) {
                Some(millis) => serializer.serialize_i64(millis),
                None => Err(ser::Error::custom("timestamp out of range")),
            },
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SystemTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            Some(millis) => from_millis(millis)
                .map(Some)
                .ok_or_else(|| de::Error::custom("timestamp out of range")),
            None => Ok(None),
        }
    }

    fn to_millis(time: SystemTime) -> Option<i64> {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).ok(),
            Err(before) => i64::try_from(before.duration().as_millis())
                .ok()
                .map(|millis| -millis),
        }
    }

    fn from_millis(millis: i64) -> Option<SystemTime> {
        let offset = Duration::from_millis(millis.unsigned_abs());
        if millis < 0 {
            UNIX_EPOCH.checked_sub(offset)
        } else {
            UNIX_EPOCH.checked_add(offset)
        }
    }
}

/*
 *  face/message.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Inbound app-message dictionary and weather payload parsing
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::state::WeatherIcon;

/// Longest icon code kept; the phone never sends more
pub const MAX_ICON_CODE_LEN: usize = 31;

/// One value in an app message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TupleValue {
    Int(i32),
    Text(String),
    Bytes(Vec<u8>),
}

impl TupleValue {
    fn type_name(&self) -> &'static str {
        match self {
            TupleValue::Int(_) => "int",
            TupleValue::Text(_) => "text",
            TupleValue::Bytes(_) => "bytes",
        }
    }
}

/// Key-value payload received from the phone
///
/// Serialized as a map with decimal string keys so it survives being nested
/// in tagged event enums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, TupleValue>",
    into = "BTreeMap<String, TupleValue>"
)]
pub struct AppMessage {
    tuples: BTreeMap<u32, TupleValue>,
}

impl TryFrom<BTreeMap<String, TupleValue>> for AppMessage {
    type Error = String;

    fn try_from(raw: BTreeMap<String, TupleValue>) -> Result<Self, Self::Error> {
        let tuples = raw
            .into_iter()
            .map(|(k, v)| {
                k.parse::<u32>()
                    .map(|key| (key, v))
                    .map_err(|_| format!("message key {k:?} is not a number"))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { tuples })
    }
}

impl From<AppMessage> for BTreeMap<String, TupleValue> {
    fn from(msg: AppMessage) -> Self {
        msg.tuples.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl AppMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: u32, value: TupleValue) -> Self {
        self.tuples.insert(key, value);
        self
    }

    pub fn get(&self, key: u32) -> Option<&TupleValue> {
        self.tuples.get(&key)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// Which message keys carry the weather fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageKeys {
    pub temperature: u32,
    pub icon: u32,
}

impl Default for MessageKeys {
    fn default() -> Self {
        Self { temperature: 0, icon: 1 }
    }
}

/// Why an inbound message was not applied
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("message has no tuple for key {0}")]
    MissingKey(u32),
    #[error("tuple {key} should be {expected}, got {found}")]
    WrongType {
        key: u32,
        expected: &'static str,
        found: &'static str,
    },
}

/// A complete weather payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherUpdate {
    pub temperature: i32,
    pub icon: WeatherIcon,
    /// Code as received (truncated), kept for logging
    pub icon_code: String,
}

impl WeatherUpdate {
    /// Extract both weather fields or nothing.
    ///
    /// A payload missing either key is rejected as a whole. An unknown icon
    /// code is not an error: it parses to [`WeatherIcon::None`].
    pub fn parse(message: &AppMessage, keys: MessageKeys) -> Result<Self, MessageError> {
        let temp = message
            .get(keys.temperature)
            .ok_or(MessageError::MissingKey(keys.temperature))?;
        let icon = message
            .get(keys.icon)
            .ok_or(MessageError::MissingKey(keys.icon))?;

        let temperature = match temp {
            TupleValue::Int(v) => *v,
            other => {
                return Err(MessageError::WrongType {
                    key: keys.temperature,
                    expected: "int",
                    found: other.type_name(),
                });
            }
        };
        let icon_code = match icon {
            TupleValue::Text(s) => truncate(s, MAX_ICON_CODE_LEN).to_string(),
            other => {
                return Err(MessageError::WrongType {
                    key: keys.icon,
                    expected: "text",
                    found: other.type_name(),
                });
            }
        };

        Ok(Self {
            temperature,
            icon: WeatherIcon::from_code(&icon_code),
            icon_code,
        })
    }
}

/// Cut `s` to at most `max` bytes on a char boundary
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(temp: i32, icon: &str) -> AppMessage {
        AppMessage::new()
            .with(0, TupleValue::Int(temp))
            .with(1, TupleValue::Text(icon.to_string()))
    }

    #[test]
    fn full_message_parses() {
        let update = WeatherUpdate::parse(&full(72, "clear-day"), MessageKeys::default()).unwrap();
        assert_eq!(update.temperature, 72);
        assert_eq!(update.icon, WeatherIcon::ClearDay);
    }

    #[test]
    fn partial_messages_are_rejected() {
        let keys = MessageKeys::default();
        let only_temp = AppMessage::new().with(0, TupleValue::Int(10));
        assert_eq!(WeatherUpdate::parse(&only_temp, keys), Err(MessageError::MissingKey(1)));

        let only_icon = AppMessage::new().with(1, TupleValue::Text("rain".into()));
        assert_eq!(WeatherUpdate::parse(&only_icon, keys), Err(MessageError::MissingKey(0)));

        assert!(WeatherUpdate::parse(&AppMessage::new(), keys).is_err());
    }

    #[test]
    fn wrong_tuple_types_are_rejected() {
        let msg = AppMessage::new()
            .with(0, TupleValue::Text("72".into()))
            .with(1, TupleValue::Text("rain".into()));
        let err = WeatherUpdate::parse(&msg, MessageKeys::default()).unwrap_err();
        assert_eq!(err.to_string(), "tuple 0 should be int, got text");
    }

    #[test]
    fn unknown_icon_is_not_an_error() {
        let update = WeatherUpdate::parse(&full(-3, "hail"), MessageKeys::default()).unwrap();
        assert_eq!(update.icon, WeatherIcon::None);
        assert_eq!(update.temperature, -3);
    }

    #[test]
    fn custom_keys() {
        let keys = MessageKeys { temperature: 7, icon: 9 };
        let msg = AppMessage::new()
            .with(7, TupleValue::Int(20))
            .with(9, TupleValue::Text("fog".into()));
        assert_eq!(WeatherUpdate::parse(&msg, keys).unwrap().icon, WeatherIcon::Fog);
    }

    #[test]
    fn long_codes_are_truncated() {
        let long = "x".repeat(64);
        let update = WeatherUpdate::parse(&full(1, &long), MessageKeys::default()).unwrap();
        assert_eq!(update.icon_code.len(), MAX_ICON_CODE_LEN);
    }

    #[test]
    fn json_keys_are_numeric() {
        let msg: AppMessage = serde_json::from_str(r#"{"0":72,"1":"snow"}"#).unwrap();
        assert_eq!(msg.get(0), Some(&TupleValue::Int(72)));
        assert_eq!(msg.get(1), Some(&TupleValue::Text("snow".into())));

        assert!(serde_json::from_str::<AppMessage>(r#"{"temp":72}"#).is_err());
    }
}

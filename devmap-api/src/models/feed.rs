use serde_json::Value;

/// Upstream response reduced to what the refresh cycle acts upon.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceFeed {
    /// `success` was `true` and `rows` was an array, possibly empty
    Rows(Vec<Value>),
    /// Any other shape, including `success: false` and a missing `rows`
    NoData,
}

impl DeviceFeed {
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut body) = value else {
            return DeviceFeed::NoData;
        };

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            return DeviceFeed::NoData;
        }

        match body.remove("rows") {
            Some(Value::Array(rows)) => DeviceFeed::Rows(rows),
            _ => DeviceFeed::NoData,
        }
    }
}

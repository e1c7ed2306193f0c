//! Attribute model shared by spans, events and counter labels.

use std::borrow::Cow;
use std::fmt;

/// Value attached to a span attribute, an event, or a counter label.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(Cow<'static, str>),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::I64(v) => write!(f, "{}", v),
            AttributeValue::F64(v) => write!(f, "{}", v),
            AttributeValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<&'static str> for AttributeValue {
    fn from(value: &'static str) -> Self {
        AttributeValue::String(Cow::Borrowed(value))
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(Cow::Owned(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::I64(value)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        AttributeValue::I64(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::F64(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// A key/value pair, e.g. `KeyValue::new("order.status", "success")`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: Cow<'static, str>,
    pub value: AttributeValue,
}

impl KeyValue {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Renders a slice of attributes as `k1=v1 k2=v2` for log output.
pub struct DisplayAttributes<'a>(pub &'a [KeyValue]);

impl fmt::Display for DisplayAttributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", kv)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(AttributeValue::from("x"), AttributeValue::String("x".into()));
        assert_eq!(AttributeValue::from(42u32), AttributeValue::I64(42));
        assert_eq!(AttributeValue::from(true), AttributeValue::Bool(true));
    }

    #[test]
    fn test_display_attributes() {
        let attrs = [
            KeyValue::new("order.status", "failed"),
            KeyValue::new("order.value", 120i64),
        ];
        assert_eq!(
            DisplayAttributes(&attrs).to_string(),
            "order.status=failed order.value=120"
        );
        assert_eq!(DisplayAttributes(&[]).to_string(), "");
    }
}

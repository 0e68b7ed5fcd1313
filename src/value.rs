use std::fmt;

use zbus::zvariant;

/*
* Subset of D-Bus data types that MPRIS players expose as properties. Everything else is kept as
* `Unsupported` so that it can still be compared (and never be equal to anything).
*
* See https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html
*/
/// A dynamically-typed property value read from a player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Value is a boolean.
    Boolean(bool),
    /// Value is a 64-bit float.
    Float(f64),
    /// Value is any signed integer.
    SignedInt(i64),
    /// Value is any unsigned integer.
    UnsignedInt(u64),
    /// Value is a string, object path or signature.
    String(String),
    /// Value is an array of strings.
    Strings(Vec<String>),
    /// Unsupported value type. The D-Bus signature is kept for diagnostics.
    Unsupported(String),
}

/// The kind of value a `Value` holds, without the data.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[allow(missing_docs)]
pub enum ValueKind {
    Boolean,
    Float,
    SignedInt,
    UnsignedInt,
    String,
    Strings,
    Unsupported,
}

impl Value {
    /// Returns a simple enum representing the type of value that this value holds.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Float(_) => ValueKind::Float,
            Value::SignedInt(_) => ValueKind::SignedInt,
            Value::UnsignedInt(_) => ValueKind::UnsignedInt,
            Value::String(_) => ValueKind::String,
            Value::Strings(_) => ValueKind::Strings,
            Value::Unsupported(_) => ValueKind::Unsupported,
        }
    }

    /// Returns the boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Borrows the string, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Returns the string, if this is a string.
    pub fn into_string(self) -> Option<String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Like `into_string`, but treats an empty string as missing.
    pub fn into_nonempty_string(self) -> Option<String> {
        self.into_string()
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Boolean => "a boolean",
            ValueKind::Float => "a float",
            ValueKind::SignedInt => "a signed integer",
            ValueKind::UnsignedInt => "an unsigned integer",
            ValueKind::String => "a string",
            ValueKind::Strings => "a list of strings",
            ValueKind::Unsupported => "an unsupported value",
        })
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Value {
        Value::String(string.to_owned())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Value {
        Value::String(string)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

impl<'a> From<zvariant::Value<'a>> for Value {
    fn from(value: zvariant::Value) -> Self {
        use zvariant::Value as V;

        match value {
            V::Bool(v) => Value::Boolean(v),
            V::I16(v) => Value::SignedInt(v as i64),
            V::I32(v) => Value::SignedInt(v as i64),
            V::I64(v) => Value::SignedInt(v),
            V::U8(v) => Value::UnsignedInt(v as u64),
            V::U16(v) => Value::UnsignedInt(v as u64),
            V::U32(v) => Value::UnsignedInt(v as u64),
            V::U64(v) => Value::UnsignedInt(v),

            V::F64(v) => Value::Float(v),

            V::Str(v) => Value::String(v.to_string()),
            V::Signature(v) => Value::String(v.to_string()),
            V::ObjectPath(v) => Value::String(v.to_string()),

            V::Array(a) if a.full_signature() == "as" => {
                let mut strings = Vec::with_capacity(a.len());
                for v in a.into_iter() {
                    if let V::Str(s) = v {
                        strings.push(s.to_string());
                    }
                }
                Value::Strings(strings)
            }

            V::Value(v) => Value::from(*v),

            other => Value::Unsupported(other.value_signature().to_string()),
        }
    }
}

impl From<zvariant::OwnedValue> for Value {
    fn from(value: zvariant::OwnedValue) -> Self {
        Value::from(zvariant::Value::from(value))
    }
}

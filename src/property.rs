use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::value::Value;

/// A fully qualified property name, like `org.mpris.MediaPlayer2.Player.PlaybackStatus`.
///
/// The part before the last dot is the interface and the part after it is the property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    interface: String,
    name: String,
}

impl PropertyPath {
    /// Create a path from an interface and a property name.
    pub fn new<I, N>(interface: I, name: N) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        PropertyPath {
            interface: interface.into(),
            name: name.into(),
        }
    }

    /// Splits a dotted path on its last dot.
    ///
    /// Returns `None` when there is no interface part or no name part.
    pub fn parse(path: &str) -> Option<Self> {
        match path.rsplit_once('.') {
            Some((interface, name)) if !interface.is_empty() && !name.is_empty() => {
                Some(PropertyPath::new(interface, name))
            }
            _ => None,
        }
    }

    /// The D-Bus interface that owns the property.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The property name within the interface.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.interface, self.name)
    }
}

/// Types that can be read out of a property `Value`.
pub trait FromValue: Sized {
    /// Returns `None` when the value has a different type.
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        value.into_string()
    }
}

/// One property on one object of one bus endpoint, read as a `T`.
///
/// Every `read` is a blocking round-trip; nothing is cached here.
pub struct RemoteProperty<'a, T> {
    transport: &'a dyn Transport,
    bus_id: &'a str,
    object_path: &'a str,
    property: &'a PropertyPath,
    kind: PhantomData<fn() -> T>,
}

impl<'a, T: FromValue> RemoteProperty<'a, T> {
    /// Create an accessor; nothing is read until `read` is called.
    pub fn new(
        transport: &'a dyn Transport,
        bus_id: &'a str,
        object_path: &'a str,
        property: &'a PropertyPath,
    ) -> Self {
        RemoteProperty {
            transport,
            bus_id,
            object_path,
            property,
            kind: PhantomData,
        }
    }

    /// Reads the property.
    ///
    /// Fails with `Error::PropertyRead` if the call fails or if the value is not a `T`.
    pub fn read(&self) -> Result<T> {
        let value = self
            .transport
            .get_property(
                self.bus_id,
                self.object_path,
                self.property.interface(),
                self.property.name(),
            )
            .map_err(|error| self.read_error(error.to_string()))?;

        let kind = value.kind();
        T::from_value(value).ok_or_else(|| self.read_error(format!("unexpected type: {}", kind)))
    }

    fn read_error(&self, reason: String) -> Error {
        Error::PropertyRead {
            bus_id: self.bus_id.to_owned(),
            property: self.property.to_string(),
            reason,
        }
    }
}

impl<'a, T> fmt::Debug for RemoteProperty<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProperty")
            .field("bus_id", &self.bus_id)
            .field("object_path", &self.object_path)
            .field("property", &self.property)
            .finish()
    }
}

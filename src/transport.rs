use zbus::blocking::fdo::PropertiesProxy;
use zbus::blocking::Connection;
use zbus::names::InterfaceName;
use zbus::zvariant::Structure;
use zbus::{CacheProperties, Message};

use crate::error::{Error, Result};
use crate::value::Value;

const DBUS_NAME: &str = "org.freedesktop.DBus";
const DBUS_PATH: &str = "/";

/// The remote calls the command engine needs from a message bus.
///
/// Every call is a blocking round-trip on the calling thread. `SessionBus` implements this on top
/// of a real D-Bus connection; tests use a scripted fake.
pub trait Transport {
    /// Calls `org.freedesktop.DBus.ListNames` and returns the raw reply arguments.
    ///
    /// The reply shape is not validated here, so that callers can classify a malformed reply
    /// themselves.
    fn list_names(&self) -> Result<Vec<Value>>;

    /// Reads one property through `org.freedesktop.DBus.Properties.Get`.
    fn get_property(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        property: &str,
    ) -> Result<Value>;

    /// Invokes a method that takes no arguments.
    fn call_method(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        method: &str,
    ) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn list_names(&self) -> Result<Vec<Value>> {
        (**self).list_names()
    }

    fn get_property(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        property: &str,
    ) -> Result<Value> {
        (**self).get_property(bus_id, object_path, interface, property)
    }

    fn call_method(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        method: &str,
    ) -> Result<()> {
        (**self).call_method(bus_id, object_path, interface, method)
    }
}

/// A `Transport` on the D-Bus session bus.
///
/// If the session bus could not be reached when this was created, every call fails with
/// `Error::TransportUnavailable`.
#[derive(Debug)]
pub struct SessionBus {
    connection: Option<Connection>,
}

impl SessionBus {
    /// Connects to the session bus.
    ///
    /// Use `for_connection` if you want to provide the D-Bus connection yourself.
    pub fn new() -> Self {
        match Connection::session() {
            Ok(connection) => SessionBus::for_connection(connection),
            Err(error) => {
                tracing::warn!(%error, "Could not connect to the D-Bus session bus");
                SessionBus { connection: None }
            }
        }
    }

    /// Create a new `SessionBus` with the given connection.
    pub fn for_connection(connection: Connection) -> Self {
        SessionBus {
            connection: Some(connection),
        }
    }

    /// Returns `true` if a connection to the bus exists.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&self) -> Result<&Connection> {
        self.connection.as_ref().ok_or(Error::TransportUnavailable)
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        SessionBus::new()
    }
}

impl Transport for SessionBus {
    fn list_names(&self) -> Result<Vec<Value>> {
        let reply = self.connection()?.call_method(
            Some(DBUS_NAME),
            DBUS_PATH,
            Some(DBUS_NAME),
            "ListNames",
            &(),
        )?;

        reply_arguments(&reply)
    }

    fn get_property(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        property: &str,
    ) -> Result<Value> {
        let proxy = PropertiesProxy::builder(self.connection()?)
            .destination(bus_id)?
            .path(object_path)?
            .cache_properties(CacheProperties::No)
            .build()?;
        let interface = InterfaceName::try_from(interface).map_err(zbus::Error::from)?;

        Ok(Value::from(proxy.get(interface, property)?))
    }

    fn call_method(
        &self,
        bus_id: &str,
        object_path: &str,
        interface: &str,
        method: &str,
    ) -> Result<()> {
        self.connection()?
            .call_method(Some(bus_id), object_path, Some(interface), method, &())?;
        Ok(())
    }
}

/// Returns every argument of a reply body, without checking their types.
fn reply_arguments(reply: &Message) -> Result<Vec<Value>> {
    match reply.body_signature() {
        Ok(signature) if !signature.as_str().is_empty() => {}
        Ok(_) | Err(zbus::Error::NoBodySignature) => return Ok(Vec::new()),
        Err(error) => return Err(error.into()),
    }

    let body: Structure<'_> = reply.body()?;
    Ok(body.fields().iter().cloned().map(Value::from).collect())
}

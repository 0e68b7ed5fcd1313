use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Something went wrong when talking to the bus or when building the command set.
///
/// Nothing in here is fatal for a host application. Discovery failures degrade to "no players"
/// and property read failures degrade to "command not applicable".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// There is no connection to the D-Bus session bus.
    #[error("D-Bus session bus is not connected")]
    TransportUnavailable,

    /// The remote side answered with a D-Bus error message.
    #[error("D-Bus error reply {name}: {message}")]
    ErrorReply {
        /// The D-Bus error name, like `org.freedesktop.DBus.Error.ServiceUnknown`.
        name: String,
        /// The human readable message attached to the error, if any.
        message: String,
    },

    /// The reply did not have the shape that was asked for.
    #[error("Malformed D-Bus reply: {0}")]
    MalformedReply(MalformedReply),

    /// A property could not be read from a player.
    #[error("Could not read {property} from {bus_id}: {reason}")]
    PropertyRead {
        /// Bus name of the player.
        bus_id: String,
        /// Fully qualified property path.
        property: String,
        /// What went wrong.
        reason: String,
    },

    /// Any other failure reported by the D-Bus library.
    #[error("D-Bus call failed: {0}")]
    Bus(String),

    /// A command id was empty or not a lowercase token.
    #[error("Command id {0:?} must be a non-empty lowercase token")]
    InvalidCommandId(String),

    /// Two commands were registered with the same id.
    #[error("Command id {0:?} is registered more than once")]
    DuplicateCommand(String),
}

/// The ways a `ListNames` reply can fail to be a usable list of names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReply {
    /// The reply carried the wrong number of arguments.
    #[error("expected 1 argument, got {0}")]
    ArgumentCount(usize),

    /// The reply argument was not a list of strings.
    #[error("argument is {0}, not a list of strings")]
    NotAStringList(String),

    /// The reply was a list of strings, but it was empty.
    #[error("list of names is empty")]
    EmptyNameList,
}

impl From<MalformedReply> for Error {
    fn from(error: MalformedReply) -> Self {
        Error::MalformedReply(error)
    }
}

impl From<zbus::Error> for Error {
    fn from(error: zbus::Error) -> Self {
        match error {
            zbus::Error::MethodError(name, message, _) => Error::ErrorReply {
                name: name.to_string(),
                message: message.unwrap_or_else(|| String::from("No error message present")),
            },
            zbus::Error::InputOutput(_) => Error::TransportUnavailable,
            other => Error::Bus(other.to_string()),
        }
    }
}

impl From<zbus::fdo::Error> for Error {
    fn from(error: zbus::fdo::Error) -> Self {
        use zbus::DBusError;

        match error {
            zbus::fdo::Error::ZBus(error) => Error::from(error),
            other => Error::ErrorReply {
                name: other.name().to_string(),
                message: other
                    .description()
                    .unwrap_or("No error message present")
                    .to_owned(),
            },
        }
    }
}

#![warn(missing_docs)]
#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//!
//! # mpris-commander
//!
//! `mpris-commander` turns short text commands like `pa` or `next` into actions on the
//! MPRIS2-compatible media players currently running on the D-Bus session bus.
//!
//! This would mostly apply to the Linux-ecosystem which is a heavy user of D-Bus.
//!
//! ## Getting started
//!
//! Some hints on how to use this library:
//!
//! 1. Look at the demos under `demos/`.
//! 2. Look at the `Controller` struct, or use `PlayerDirectory` and `find_matches` directly.
//!
//! ```no_run
//! use mpris_commander::Controller;
//!
//! let mut controller = Controller::new();
//! controller.setup_session();
//!
//! for item in controller.query("pa") {
//!     println!("{} ({}%): {}", item.title, item.score, item.subtext);
//! }
//! ```

mod command;
mod controller;
mod directory;
mod error;
mod player;
mod property;
mod query;
mod registry;
mod transport;
mod value;

pub use command::{Command, Icon, Predicate, Test};
pub use controller::Controller;
pub use directory::PlayerDirectory;
pub use error::{Error, MalformedReply, Result};
pub use player::{Player, PlayerProperties};
pub use property::{FromValue, PropertyPath, RemoteProperty};
pub use query::{find_matches, score, Context, Item, Match};
pub use registry::CommandRegistry;
pub use transport::{SessionBus, Transport};
pub use value::{Value, ValueKind};

/// Every MPRIS player's bus name starts with this.
pub const MPRIS2_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// The object path MPRIS players expose their interfaces on.
pub const MPRIS2_PATH: &str = "/org/mpris/MediaPlayer2";

/// The root MPRIS interface (`Identity`, `CanQuit`, ...).
pub const MEDIA_PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2";

/// The playback interface (`PlaybackStatus`, `CanGoNext`, `Play`, ...).
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::property::{PropertyPath, RemoteProperty};
use crate::transport::Transport;
use crate::value::Value;
use crate::{MEDIA_PLAYER_INTERFACE, MPRIS2_PATH, MPRIS2_PREFIX, PLAYER_INTERFACE};

/// A MPRIS-compatible player found on the bus.
///
/// This is only a handle: the bus name is all it holds. Current state is read through
/// `PlayerProperties` while a query is being evaluated.
///
/// **See:** [MPRIS2 MediaPlayer2.Player Specification][spec]
/// [spec]: <https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    bus_id: String,
}

impl Player {
    /// Create a handle for the player on the given bus name.
    pub fn new<S: Into<String>>(bus_id: S) -> Self {
        Player {
            bus_id: bus_id.into(),
        }
    }

    /// Returns the player's D-Bus bus name, like `org.mpris.MediaPlayer2.vlc`.
    pub fn bus_id(&self) -> &str {
        &self.bus_id
    }

    /// The bus name without the MPRIS prefix (`vlc`, `spotify`, `firefox.instance_1_42`).
    pub fn short_name(&self) -> &str {
        self.bus_id
            .strip_prefix(MPRIS2_PREFIX)
            .unwrap_or(&self.bus_id)
    }

    /// Returns an uncached accessor for one property on the MPRIS object.
    pub fn property<'a, T>(
        &'a self,
        transport: &'a dyn Transport,
        path: &'a PropertyPath,
    ) -> RemoteProperty<'a, T>
    where
        T: crate::property::FromValue,
    {
        RemoteProperty::new(transport, &self.bus_id, MPRIS2_PATH, path)
    }

    /// Invoke an argument-less method on `org.mpris.MediaPlayer2.Player`, like `Play` or `Next`.
    ///
    /// See: [MPRIS2 Player methods](https://specifications.freedesktop.org/mpris-spec/latest/Player_Interface.html#methods)
    pub fn invoke(&self, transport: &dyn Transport, method: &str) -> Result<()> {
        transport.call_method(&self.bus_id, MPRIS2_PATH, PLAYER_INTERFACE, method)
    }
}

/// Property lookups for one player, cached for the lifetime of this value.
///
/// Create one per player per query. Failed reads are cached too, as `None`, so a player that
/// does not answer is asked only once.
pub struct PlayerProperties<'a> {
    player: &'a Player,
    transport: &'a dyn Transport,
    cache: RefCell<HashMap<PropertyPath, Option<Value>>>,
}

impl<'a> PlayerProperties<'a> {
    /// Start an empty cache for `player`.
    pub fn new(player: &'a Player, transport: &'a dyn Transport) -> Self {
        PlayerProperties {
            player,
            transport,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The player these properties belong to.
    pub fn player(&self) -> &'a Player {
        self.player
    }

    /// Returns the value of a property, or `None` if it could not be read.
    pub fn get(&self, path: &PropertyPath) -> Option<Value> {
        if let Some(cached) = self.cache.borrow().get(path) {
            return cached.clone();
        }

        let value = self.player.property::<Value>(self.transport, path).read().ok();
        self.cache.borrow_mut().insert(path.clone(), value.clone());
        value
    }

    /// Returns the player's MPRIS `Identity`, falling back to the bus name suffix.
    ///
    /// This is usually the application's name, like `Spotify`.
    pub fn display_name(&self) -> String {
        let identity = PropertyPath::new(MEDIA_PLAYER_INTERFACE, "Identity");
        self.get(&identity)
            .and_then(Value::into_nonempty_string)
            .unwrap_or_else(|| self.player.short_name().to_owned())
    }
}

impl<'a> std::fmt::Debug for PlayerProperties<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerProperties")
            .field("player", &self.player)
            .field("cache", &self.cache)
            .finish()
    }
}

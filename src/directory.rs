use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{MalformedReply, Result};
use crate::player::Player;
use crate::transport::Transport;
use crate::value::Value;
use crate::MPRIS2_PREFIX;

/// Keeps track of the `Player`s running on a bus.
///
/// The set of players is rebuilt from scratch on every `refresh`; players that appeared or
/// disappeared since the last refresh are simply part of, or missing from, the new set.
#[derive(Debug)]
pub struct PlayerDirectory<T> {
    transport: T,
    players: Arc<[Player]>,
}

impl<T: Transport> PlayerDirectory<T> {
    /// Create an empty directory on the given transport. Call `refresh` to populate it.
    pub fn new(transport: T) -> Self {
        PlayerDirectory {
            transport,
            players: Arc::from(Vec::new()),
        }
    }

    /// The transport players are discovered on.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A snapshot of the current players, in discovery order.
    ///
    /// The snapshot stays valid, and unchanged, across later refreshes.
    pub fn players(&self) -> Arc<[Player]> {
        Arc::clone(&self.players)
    }

    /// Rediscovers all players and replaces the current set with them.
    ///
    /// Failures are logged and leave the directory empty. Returns the number of players found.
    pub fn refresh(&mut self) -> usize {
        let players = match self.discover() {
            Ok(players) => players,
            Err(error) => {
                error!(%error, "Could not discover MPRIS players");
                Vec::new()
            }
        };

        self.players = Arc::from(players);
        self.players.len()
    }

    /// Lists the names on the bus and returns a `Player` for every MPRIS name, without touching
    /// the current set.
    pub fn discover(&self) -> Result<Vec<Player>> {
        let names = player_names(self.transport.list_names()?)?;

        let players: Vec<Player> = names
            .into_iter()
            .filter(|name| name.starts_with(MPRIS2_PREFIX))
            .map(Player::new)
            .collect();

        debug!(
            "Discovered {} MPRIS players: {:?}",
            players.len(),
            players.iter().map(Player::bus_id).collect::<Vec<_>>()
        );
        Ok(players)
    }
}

fn player_names(mut arguments: Vec<Value>) -> Result<Vec<String>> {
    if arguments.len() != 1 {
        return Err(MalformedReply::ArgumentCount(arguments.len()).into());
    }

    match arguments.remove(0) {
        Value::Strings(names) if names.is_empty() => Err(MalformedReply::EmptyNameList.into()),
        Value::Strings(names) => Ok(names),
        other => Err(MalformedReply::NotAStringList(other.kind().to_string()).into()),
    }
}

use tracing::{debug, warn};

use crate::directory::PlayerDirectory;
use crate::error::Result;
use crate::player::Player;
use crate::query::{find_matches, Context, Item};
use crate::registry::CommandRegistry;
use crate::transport::{SessionBus, Transport};

/// Ties a command registry to the players on a bus.
///
/// Call `setup_session` whenever the host starts a new session (for example when a launcher
/// window opens), then `query` on every keystroke and `execute` when an item is picked.
#[derive(Debug)]
pub struct Controller<T> {
    registry: CommandRegistry,
    directory: PlayerDirectory<T>,
}

impl Controller<SessionBus> {
    /// Creates a controller for the MPRIS commands on the D-Bus session bus.
    ///
    /// Use `with_registry` if you want to provide the transport or the commands yourself.
    pub fn new() -> Self {
        Controller::with_registry(SessionBus::new(), CommandRegistry::mpris())
    }
}

impl Default for Controller<SessionBus> {
    fn default() -> Self {
        Controller::new()
    }
}

impl<T: Transport> Controller<T> {
    /// Create a controller for the given transport and commands. No players are known until
    /// `setup_session` is called.
    pub fn with_registry(transport: T, registry: CommandRegistry) -> Self {
        Controller {
            registry,
            directory: PlayerDirectory::new(transport),
        }
    }

    /// The commands this controller matches against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The players of the current session.
    pub fn directory(&self) -> &PlayerDirectory<T> {
        &self.directory
    }

    /// Forgets all known players and discovers them again.
    pub fn setup_session(&mut self) -> usize {
        let found = self.directory.refresh();
        debug!(players = found, "MPRIS session set up");
        found
    }

    /// Returns the items for the given input, in match order.
    pub fn query(&self, input: &str) -> Vec<Item> {
        let players = self.directory.players();
        let context = Context::new(&self.registry, &players, self.directory.transport());

        find_matches(input, &context)
            .iter()
            .map(|m| m.to_item())
            .collect()
    }

    /// Calls the item's method on its player.
    pub fn execute(&self, item: &Item) -> Result<()> {
        let player = Player::new(item.bus_id.as_str());
        let result = player.invoke(self.directory.transport(), &item.method);

        if let Err(ref error) = result {
            warn!(%error, bus_id = %item.bus_id, method = %item.method, "Could not execute command");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MalformedReply};
    use crate::transport::fake::FakeBus;
    use crate::value::Value;
    use crate::PLAYER_INTERFACE;

    const VLC: &str = "org.mpris.MediaPlayer2.vlc";

    fn playing_vlc() -> FakeBus {
        let mut bus = FakeBus::with_names(&["org.freedesktop.DBus", VLC]);
        bus.set_property(VLC, PLAYER_INTERFACE, "PlaybackStatus", "Playing");
        bus
    }

    #[test]
    fn it_knows_no_players_before_the_session_starts() {
        let controller = Controller::with_registry(playing_vlc(), CommandRegistry::mpris());
        assert!(controller.query("").is_empty());
    }

    #[test]
    fn it_queries_discovered_players() {
        let mut controller = Controller::with_registry(playing_vlc(), CommandRegistry::mpris());
        assert_eq!(controller.setup_session(), 1);

        let ids: Vec<String> = controller.query("").into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![String::from("pause"), String::from("stop")]);
    }

    #[test]
    fn it_executes_picked_items() {
        let mut controller = Controller::with_registry(playing_vlc(), CommandRegistry::mpris());
        controller.setup_session();

        let items = controller.query("st");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtext, "Stop vlc");
        controller.execute(&items[0]).unwrap();

        assert_eq!(
            *controller.directory().transport().method_calls.borrow(),
            vec![(VLC.to_owned(), PLAYER_INTERFACE.to_owned(), String::from("Stop"))]
        );
    }

    #[test]
    fn it_degrades_to_no_matches_on_malformed_discovery() {
        let mut bus = FakeBus::with_reply(Ok(vec![
            Value::Strings(vec![VLC.to_owned()]),
            Value::Strings(vec![]),
        ]));
        bus.set_property(VLC, PLAYER_INTERFACE, "PlaybackStatus", "Playing");
        let mut controller = Controller::with_registry(bus, CommandRegistry::mpris());

        assert_eq!(
            controller.directory().discover(),
            Err(Error::MalformedReply(MalformedReply::ArgumentCount(2)))
        );
        assert_eq!(controller.setup_session(), 0);
        for query in &["", "p", "pause", "stop"] {
            assert!(controller.query(query).is_empty());
        }
    }
}

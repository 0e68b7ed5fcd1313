use crate::command::{Command, Icon};
use crate::error::Result;
use crate::player::{Player, PlayerProperties};
use crate::registry::CommandRegistry;
use crate::transport::Transport;

/// Everything a query is evaluated against.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Commands to match, in order.
    pub registry: &'a CommandRegistry,
    /// Players to offer commands for, in discovery order.
    pub players: &'a [Player],
    /// Used to read player properties.
    pub transport: &'a dyn Transport,
}

impl<'a> Context<'a> {
    /// Bundle the inputs of a query.
    pub fn new(
        registry: &'a CommandRegistry,
        players: &'a [Player],
        transport: &'a dyn Transport,
    ) -> Self {
        Context {
            registry,
            players,
            transport,
        }
    }
}

impl<'a> std::fmt::Debug for Context<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("registry", &self.registry)
            .field("players", &self.players)
            .finish_non_exhaustive()
    }
}

/// A command that can be performed on a player right now.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// The matched command.
    pub command: &'a Command,
    /// The player the command applies to.
    pub player: &'a Player,
    /// How much of the command id was typed, in percent.
    pub score: u8,
    /// The player's display name, resolved while matching.
    pub player_name: String,
}

impl<'a> Match<'a> {
    /// The host-facing description of this match.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.command.id().to_owned(),
            title: self.command.title().to_owned(),
            subtext: self.command.subtext(&self.player_name),
            icon: self.command.icon().clone(),
            score: self.score,
            bus_id: self.player.bus_id().to_owned(),
            method: self.command.method().to_owned(),
        }
    }

    /// Performs the command on the player.
    pub fn execute(&self, transport: &dyn Transport) -> Result<()> {
        self.player.invoke(transport, self.command.method())
    }
}

/// A match as handed to a result list: what to show, and what to call when picked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Command id, like `pause`.
    pub id: String,
    /// Display title, like `Pause`.
    pub title: String,
    /// Display subtext with the player's name filled in, like `Pause Spotify`.
    pub subtext: String,
    /// Icon of the command.
    pub icon: Icon,
    /// Relevance from 0 to 100.
    pub score: u8,
    /// Bus name of the player to call.
    pub bus_id: String,
    /// Method to call on the player.
    pub method: String,
}

/// Turns free-text input into the commands that can be performed on the current players.
///
/// Commands whose id starts with the lowercased input are kept. Each kept command is then paired
/// with every player it is applicable to. The result is ordered by command (registry order) and
/// then by player (discovery order); it is not sorted by score.
///
/// Player properties are read at most once per player for the whole call.
pub fn find_matches<'a>(input: &str, context: &Context<'a>) -> Vec<Match<'a>> {
    if context.players.is_empty() {
        return Vec::new();
    }

    let query = input.to_lowercase();
    let properties: Vec<PlayerProperties<'a>> = context
        .players
        .iter()
        .map(|player| PlayerProperties::new(player, context.transport))
        .collect();
    let mut names: Vec<Option<String>> = vec![None; properties.len()];

    let mut matches = Vec::new();
    for command in context.registry.iter().filter(|c| c.id().starts_with(&query)) {
        let score = score(&query, command.id());

        for (index, player_properties) in properties.iter().enumerate() {
            if !command.is_applicable(player_properties) {
                continue;
            }

            let player_name = names[index]
                .get_or_insert_with(|| player_properties.display_name())
                .clone();
            matches.push(Match {
                command,
                player: player_properties.player(),
                score,
                player_name,
            });
        }
    }

    matches
}

/// How much of `id` the query covers, as a rounded percentage capped at 100.
///
/// Lengths are counted in characters.
pub fn score(query: &str, id: &str) -> u8 {
    let typed = query.chars().count();
    let total = id.chars().count();
    if total == 0 || typed >= total {
        return 100;
    }

    // Round half up: (100 * typed / total) + 0.5
    ((200 * typed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Predicate;
    use crate::property::PropertyPath;
    use crate::transport::fake::FakeBus;
    use crate::value::Value;
    use crate::{MEDIA_PLAYER_INTERFACE, PLAYER_INTERFACE};

    const VLC: &str = "org.mpris.MediaPlayer2.vlc";
    const SPOTIFY: &str = "org.mpris.MediaPlayer2.spotify";

    fn always(id: &str) -> Command {
        Command::new(
            id,
            "Title",
            "On %1",
            "Play",
            Icon::new("media-playback-start", ":play"),
            Predicate::is_true(PropertyPath::new(PLAYER_INTERFACE, "CanControl")),
        )
    }

    fn controllable_bus(players: &[&str]) -> FakeBus {
        let mut bus = FakeBus::default();
        for player in players {
            bus.set_property(player, PLAYER_INTERFACE, "CanControl", true);
        }
        bus
    }

    fn players(bus_ids: &[&str]) -> Vec<Player> {
        bus_ids.iter().map(|id| Player::new(*id)).collect()
    }

    fn summary(matches: &[Match<'_>]) -> Vec<(String, String, u8)> {
        matches
            .iter()
            .map(|m| {
                (
                    m.command.id().to_owned(),
                    m.player.bus_id().to_owned(),
                    m.score,
                )
            })
            .collect()
    }

    #[test]
    fn it_scores_by_typed_fraction() {
        assert_eq!(score("p", "pause"), 20);
        assert_eq!(score("pa", "pause"), 40);
        assert_eq!(score("pause", "pause"), 100);
        assert_eq!(score("", "pause"), 0);
        assert_eq!(score("pl", "play"), 50);
        assert_eq!(score("p", "previous"), 13);
        assert_eq!(score("ne", "abc"), 67);
    }

    #[test]
    fn it_caps_scores_at_100() {
        assert_eq!(score("playing", "play"), 100);
    }

    #[test]
    fn scores_grow_with_query_length() {
        let id = "previous";
        let mut last = 0;
        for typed in 0..=12 {
            let query: String = std::iter::repeat('p').take(typed).collect();
            let current = score(&query, id);
            assert!(current >= last);
            assert!(current <= 100);
            last = current;
        }
    }

    #[test]
    fn it_returns_nothing_without_players() {
        let registry = CommandRegistry::mpris();
        let bus = FakeBus::default();
        let context = Context::new(&registry, &[], &bus);

        for query in &["", "p", "play", "zzz"] {
            assert!(find_matches(query, &context).is_empty());
        }
        assert!(bus.property_reads.borrow().is_empty());
    }

    #[test]
    fn it_offers_pause_but_not_play_to_a_playing_player() {
        let mut bus = FakeBus::default();
        bus.set_property(VLC, PLAYER_INTERFACE, "PlaybackStatus", "Playing");
        let registry = CommandRegistry::new(
            CommandRegistry::mpris()
                .iter()
                .filter(|c| c.id() == "play" || c.id() == "pause")
                .cloned(),
        )
        .unwrap();
        let players = players(&[VLC]);
        let context = Context::new(&registry, &players, &bus);

        let matches = find_matches("p", &context);
        assert_eq!(
            summary(&matches),
            vec![(String::from("pause"), VLC.to_owned(), 20)]
        );
    }

    #[test]
    fn it_matches_everything_on_empty_input() {
        let bus = controllable_bus(&[VLC, SPOTIFY]);
        let registry = CommandRegistry::new(
            ["play", "pause", "stop", "next", "previous"]
                .iter()
                .map(|id| always(id)),
        )
        .unwrap();
        let players = players(&[VLC, SPOTIFY]);
        let context = Context::new(&registry, &players, &bus);

        let matches = find_matches("", &context);
        assert_eq!(matches.len(), 10);
        assert!(matches.iter().all(|m| m.score == 0));

        let order: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.command.id(), m.player.bus_id()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("play", VLC),
                ("play", SPOTIFY),
                ("pause", VLC),
                ("pause", SPOTIFY),
                ("stop", VLC),
                ("stop", SPOTIFY),
                ("next", VLC),
                ("next", SPOTIFY),
                ("previous", VLC),
                ("previous", SPOTIFY),
            ]
        );
    }

    #[test]
    fn it_matches_prefixes_case_insensitively() {
        let bus = controllable_bus(&[VLC]);
        let registry = CommandRegistry::new(vec![always("next"), always("pause")]).unwrap();
        let players = players(&[VLC]);
        let context = Context::new(&registry, &players, &bus);

        assert_eq!(
            summary(&find_matches("NE", &context)),
            vec![(String::from("next"), VLC.to_owned(), 50)]
        );
        assert!(find_matches("xt", &context).is_empty());
        assert!(find_matches("nextt", &context).is_empty());
    }

    #[test]
    fn it_skips_players_whose_state_cannot_be_read() {
        let bus = controllable_bus(&[VLC]);
        let registry = CommandRegistry::new(vec![always("stop")]).unwrap();
        let players = players(&[SPOTIFY, VLC]);
        let context = Context::new(&registry, &players, &bus);

        assert_eq!(
            summary(&find_matches("s", &context)),
            vec![(String::from("stop"), VLC.to_owned(), 25)]
        );
    }

    #[test]
    fn it_is_deterministic() {
        let bus = controllable_bus(&[VLC, SPOTIFY]);
        let registry = CommandRegistry::new(vec![always("play"), always("pause")]).unwrap();
        let players = players(&[VLC, SPOTIFY]);
        let context = Context::new(&registry, &players, &bus);

        assert_eq!(
            summary(&find_matches("pa", &context)),
            summary(&find_matches("pa", &context))
        );
    }

    #[test]
    fn it_reads_each_property_once_per_query() {
        let mut bus = FakeBus::default();
        bus.set_property(VLC, PLAYER_INTERFACE, "PlaybackStatus", "Paused");
        let registry = CommandRegistry::mpris();
        let players = players(&[VLC]);
        let context = Context::new(&registry, &players, &bus);

        find_matches("", &context);
        assert_eq!(bus.reads_of(VLC, "PlaybackStatus"), 1);

        find_matches("", &context);
        assert_eq!(bus.reads_of(VLC, "PlaybackStatus"), 2);
    }

    #[test]
    fn it_builds_items_with_the_player_identity() {
        let mut bus = FakeBus::default();
        bus.set_property(SPOTIFY, PLAYER_INTERFACE, "PlaybackStatus", "Playing");
        bus.set_property(SPOTIFY, MEDIA_PLAYER_INTERFACE, "Identity", "Spotify");
        let registry = CommandRegistry::mpris();
        let players = players(&[SPOTIFY]);
        let context = Context::new(&registry, &players, &bus);

        let items: Vec<Item> = find_matches("pause", &context)
            .iter()
            .map(Match::to_item)
            .collect();
        assert_eq!(
            items,
            vec![Item {
                id: String::from("pause"),
                title: String::from("Pause"),
                subtext: String::from("Pause Spotify"),
                icon: Icon::new("media-playback-pause", ":pause"),
                score: 100,
                bus_id: SPOTIFY.to_owned(),
                method: String::from("Pause"),
            }]
        );
    }

    #[test]
    fn it_executes_matches_on_their_player() {
        let mut bus = FakeBus::default();
        bus.set_property(VLC, PLAYER_INTERFACE, "CanGoNext", Value::Boolean(true));
        let registry = CommandRegistry::mpris();
        let players = players(&[VLC]);
        let context = Context::new(&registry, &players, &bus);

        let matches = find_matches("next", &context);
        assert_eq!(matches.len(), 1);
        matches[0].execute(&bus).unwrap();

        assert_eq!(
            *bus.method_calls.borrow(),
            vec![(VLC.to_owned(), PLAYER_INTERFACE.to_owned(), String::from("Next"))]
        );
    }
}

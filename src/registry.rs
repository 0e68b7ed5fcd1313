use std::collections::HashSet;

use crate::command::{Command, Icon, Predicate};
use crate::error::{Error, Result};
use crate::property::PropertyPath;
use crate::PLAYER_INTERFACE;

/// The ordered set of known commands.
///
/// Order is insertion order, and is the order in which matches are produced.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Create a registry from commands, keeping their order.
    ///
    /// Ids must be non-empty, lowercase and unique.
    pub fn new<I>(commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = Command>,
    {
        let commands: Vec<Command> = commands.into_iter().collect();
        validate_ids(&commands)?;
        Ok(CommandRegistry { commands })
    }

    /// The MPRIS commands: `play`, `pause`, `stop`, `next` and `previous`.
    ///
    /// `play` is offered when the player is not playing; `pause` and `stop` when it is. `next`
    /// and `previous` follow the player's `CanGoNext` and `CanGoPrevious` flags.
    pub fn mpris() -> Self {
        let status = || PropertyPath::new(PLAYER_INTERFACE, "PlaybackStatus");

        CommandRegistry {
            commands: vec![
                Command::new(
                    "play",
                    "Start playing",
                    "Start playing on %1",
                    "Play",
                    Icon::new("media-playback-start", ":play"),
                    Predicate::not_equals(status(), "Playing"),
                ),
                Command::new(
                    "pause",
                    "Pause",
                    "Pause %1",
                    "Pause",
                    Icon::new("media-playback-pause", ":pause"),
                    Predicate::equals(status(), "Playing"),
                ),
                Command::new(
                    "stop",
                    "Stop playing",
                    "Stop %1",
                    "Stop",
                    Icon::new("media-playback-stop", ":stop"),
                    Predicate::equals(status(), "Playing"),
                ),
                Command::new(
                    "next",
                    "Next track",
                    "Play next track on %1",
                    "Next",
                    Icon::new("media-skip-forward", ":next"),
                    Predicate::is_true(PropertyPath::new(PLAYER_INTERFACE, "CanGoNext")),
                ),
                Command::new(
                    "previous",
                    "Previous track",
                    "Play previous track on %1",
                    "Previous",
                    Icon::new("media-skip-backward", ":prev"),
                    Predicate::is_true(PropertyPath::new(PLAYER_INTERFACE, "CanGoPrevious")),
                ),
            ],
        }
    }

    /// Look up a command by id.
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.id() == id)
    }

    /// Iterate the commands in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        CommandRegistry::mpris()
    }
}

fn validate_ids(commands: &[Command]) -> Result<()> {
    let mut seen = HashSet::with_capacity(commands.len());

    for command in commands {
        let id = command.id();
        if id.is_empty() || id.chars().any(char::is_whitespace) || id != id.to_lowercase() {
            return Err(Error::InvalidCommandId(id.to_owned()));
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateCommand(id.to_owned()));
        }
    }

    Ok(())
}

impl<'a> IntoIterator for &'a CommandRegistry {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

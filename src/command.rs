use crate::player::PlayerProperties;
use crate::property::PropertyPath;
use crate::value::Value;

/// How a property value is tested by a `Predicate`.
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    /// The property must be equal to the given value.
    Equals(Value),

    /// The property must be a boolean capability flag that is `true`.
    ///
    /// A value that is not a boolean counts as unreadable.
    IsTrue,
}

/// Decides whether a `Command` can currently be used on a player.
///
/// The property is read, tested, and the outcome is flipped when `invert` is set. If the property
/// cannot be read the predicate is `false`, whatever `invert` says.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    property: PropertyPath,
    test: Test,
    invert: bool,
}

impl Predicate {
    /// Create a predicate from its parts.
    pub fn new(property: PropertyPath, test: Test, invert: bool) -> Self {
        Predicate {
            property,
            test,
            invert,
        }
    }

    /// The property must equal `value`.
    pub fn equals<V: Into<Value>>(property: PropertyPath, value: V) -> Self {
        Predicate::new(property, Test::Equals(value.into()), false)
    }

    /// The property must not equal `value`.
    pub fn not_equals<V: Into<Value>>(property: PropertyPath, value: V) -> Self {
        Predicate::new(property, Test::Equals(value.into()), true)
    }

    /// The boolean property must be `true`.
    pub fn is_true(property: PropertyPath) -> Self {
        Predicate::new(property, Test::IsTrue, false)
    }

    /// The boolean property must be `false`.
    pub fn is_false(property: PropertyPath) -> Self {
        Predicate::new(property, Test::IsTrue, true)
    }

    /// The property that is read.
    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    /// How the read value is tested.
    pub fn test(&self) -> &Test {
        &self.test
    }

    /// Whether the outcome of the test is flipped.
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Evaluates the predicate against a player's (cached) properties.
    pub fn evaluate(&self, properties: &PlayerProperties<'_>) -> bool {
        let value = match properties.get(&self.property) {
            Some(value) => value,
            None => return false,
        };

        let outcome = match &self.test {
            Test::Equals(expected) => value == *expected,
            Test::IsTrue => match value.as_bool() {
                Some(flag) => flag,
                None => return false,
            },
        };

        outcome != self.invert
    }
}

/// An icon reference: a freedesktop icon theme name and a fallback resource.
///
/// Resolving these to files is up to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    /// Theme icon name, like `media-playback-start`.
    pub theme_name: String,
    /// Used when the theme has no such icon, like `:play`.
    pub fallback: String,
}

impl Icon {
    /// Create an icon reference.
    pub fn new<T: Into<String>, F: Into<String>>(theme_name: T, fallback: F) -> Self {
        Icon {
            theme_name: theme_name.into(),
            fallback: fallback.into(),
        }
    }
}

/// One action that can be performed on a player.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: String,
    title: String,
    subtext: String,
    method: String,
    icon: Icon,
    predicate: Predicate,
}

impl Command {
    /// Create a new command.
    ///
    /// `subtext` may contain `%1`, which is replaced by the player's name. `method` is the name of
    /// the method called on `org.mpris.MediaPlayer2.Player` when the command is executed.
    pub fn new<S: Into<String>>(
        id: S,
        title: S,
        subtext: S,
        method: S,
        icon: Icon,
        predicate: Predicate,
    ) -> Self {
        Command {
            id: id.into(),
            title: title.into(),
            subtext: subtext.into(),
            method: method.into(),
            icon,
            predicate,
        }
    }

    /// The token a query is matched against, like `play`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display label, like `Next track`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The unformatted subtext template.
    pub fn subtext_template(&self) -> &str {
        &self.subtext
    }

    /// The subtext with `%1` replaced by `player_name`.
    pub fn subtext(&self, player_name: &str) -> String {
        self.subtext.replace("%1", player_name)
    }

    /// The remote method invoked on a matched player.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The icon shown next to the command.
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Decides when the command is offered.
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Returns `true` if this command can currently be used on the player.
    pub fn is_applicable(&self, properties: &PlayerProperties<'_>) -> bool {
        self.predicate.evaluate(properties)
    }
}

//! Static command tree.
//!
//! Trees are plain data built once, usually as `static`s generated by `define_commands!`, and are
//! never modified while lines are parsed.

use core::fmt;

use crate::config::Config;
use crate::event::Event;
use crate::value::ArgValue;

/// Called with the bound arguments once a terminal command resolved without errors.
pub type CommandCallback<C> = fn(&Clip<C>, &Command<C>, &[ArgValue<'_>], &mut C);

/// Receives every [`Event`] raised while a line is parsed.
pub type EventCallback<C> = fn(&Clip<C>, &Event<'_, C>, &mut C);

/// Declared type of a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgType {
    String,
    Bool,
    Int,
    Uint,
    Float,
    HexArray,
}

impl ArgType {
    pub const fn name(self) -> &'static str {
        match self {
            ArgType::String => "STRING",
            ArgType::Bool => "BOOL",
            ArgType::Int => "INT",
            ArgType::Uint => "UINT",
            ArgType::Float => "FLOAT",
            ArgType::HexArray => "HEXARRAY",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One positional argument of a terminal command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arg {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ArgType,

    /// Optional arguments do not count towards the required minimum.
    pub optional: bool,
}

impl Arg {
    pub const fn required(name: &'static str, description: &'static str, kind: ArgType) -> Self {
        Self { name, description, kind, optional: false }
    }

    pub const fn optional(name: &'static str, description: &'static str, kind: ArgType) -> Self {
        Self { name, description, kind, optional: true }
    }
}

/// What a node does once it is reached.
pub enum CommandKind<C: 'static> {
    /// Selects one of its children by the next word of the line.
    Group { children: &'static [Command<C>] },

    /// Binds the rest of the line to `args` and calls `callback`.
    Terminal {
        args: &'static [Arg],
        callback: Option<CommandCallback<C>>,
    },
}

/// A node of the command tree. `C` is the caller context threaded through every callback.
pub struct Command<C: 'static> {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub kind: CommandKind<C>,
}

impl<C: 'static> Command<C> {
    pub const fn group(
        name: &'static str,
        description: Option<&'static str>,
        children: &'static [Command<C>],
    ) -> Self {
        Self { name, description, kind: CommandKind::Group { children } }
    }

    pub const fn terminal(
        name: &'static str,
        description: Option<&'static str>,
        args: &'static [Arg],
        callback: Option<CommandCallback<C>>,
    ) -> Self {
        Self { name, description, kind: CommandKind::Terminal { args, callback } }
    }

    /// Children of a group; empty for terminals.
    pub fn children(&self) -> &'static [Command<C>] {
        match self.kind {
            CommandKind::Group { children } => children,
            CommandKind::Terminal { .. } => &[],
        }
    }

    /// Declared arguments of a terminal; empty for groups.
    pub fn args(&self) -> &'static [Arg] {
        match self.kind {
            CommandKind::Group { .. } => &[],
            CommandKind::Terminal { args, .. } => args,
        }
    }

    pub fn callback(&self) -> Option<CommandCallback<C>> {
        match self.kind {
            CommandKind::Group { .. } => None,
            CommandKind::Terminal { callback, .. } => callback,
        }
    }

    /// A group without children behaves like a terminal with no arguments and no callback.
    pub fn is_terminal(&self) -> bool {
        self.children().is_empty()
    }

    pub fn required_args(&self) -> usize {
        self.args().iter().filter(|arg| !arg.optional).count()
    }

    pub fn find_child(&self, name: &[u8]) -> Option<&'static Command<C>> {
        find(self.children(), name)
    }
}

impl<C: 'static> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("children", &self.children().len())
            .field("args", &self.args())
            .field("callback", &self.callback().is_some())
            .finish()
    }
}

/// First command in `commands` whose name equals `name`.
pub fn find<C: 'static>(commands: &'static [Command<C>], name: &[u8]) -> Option<&'static Command<C>> {
    commands.iter().find(|cmd| cmd.name.as_bytes() == name)
}

/// Root of an interpreter: top level commands, event sink and configuration.
pub struct Clip<C: 'static> {
    pub commands: &'static [Command<C>],
    pub on_event: Option<EventCallback<C>>,
    pub config: Config,
}

impl<C: 'static> Clip<C> {
    pub const fn new(commands: &'static [Command<C>]) -> Self {
        Self { commands, on_event: None, config: Config::DEFAULT }
    }

    pub const fn with_event_callback(mut self, on_event: EventCallback<C>) -> Self {
        self.on_event = Some(on_event);
        self
    }

    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<C: 'static> fmt::Debug for Clip<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("commands", &self.commands.len())
            .field("on_event", &self.on_event.is_some())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tree_tests {
    use super::*;

    struct Ctx;

    fn noop(_: &Clip<Ctx>, _: &Command<Ctx>, _: &[ArgValue<'_>], _: &mut Ctx) {}

    static SET_ARGS: [Arg; 3] = [
        Arg::required("pin", "pin number", ArgType::Uint),
        Arg::required("state", "pin state", ArgType::Bool),
        Arg::optional("delay", "settle time", ArgType::Float),
    ];

    static GPIO: [Command<Ctx>; 3] = [
        Command::terminal("set", Some("set pin"), &SET_ARGS, Some(noop as CommandCallback<Ctx>)),
        Command::terminal("reset", None, &[], None),
        Command::group("empty", None, &[]),
    ];

    static ROOT: [Command<Ctx>; 1] = [Command::group("gpio", Some("gpio control"), &GPIO)];

    // ==================== ARG TYPES ====================

    #[test]
    fn test_arg_type_names() {
        assert_eq!(ArgType::String.name(), "STRING");
        assert_eq!(ArgType::Bool.name(), "BOOL");
        assert_eq!(ArgType::Int.name(), "INT");
        assert_eq!(ArgType::Uint.name(), "UINT");
        assert_eq!(ArgType::Float.name(), "FLOAT");
        assert_eq!(ArgType::HexArray.to_string(), "HEXARRAY");
    }

    // ==================== NODES ====================

    #[test]
    fn test_group_accessors() {
        let gpio = &ROOT[0];
        assert!(!gpio.is_terminal());
        assert_eq!(gpio.children().len(), 3);
        assert!(gpio.args().is_empty());
        assert!(gpio.callback().is_none());
    }

    #[test]
    fn test_terminal_accessors() {
        let set = &GPIO[0];
        assert!(set.is_terminal());
        assert_eq!(set.args().len(), 3);
        assert_eq!(set.required_args(), 2);
        assert!(set.callback().is_some());
        assert!(GPIO[1].callback().is_none());
    }

    #[test]
    fn test_empty_group_is_terminal() {
        let empty = &GPIO[2];
        assert!(empty.is_terminal());
        assert_eq!(empty.required_args(), 0);
        assert!(empty.callback().is_none());
    }

    #[test]
    fn test_find_child_exact_match() {
        let gpio = &ROOT[0];
        assert_eq!(gpio.find_child(b"reset").map(|c| c.name), Some("reset"));
        assert!(gpio.find_child(b"rese").is_none());
        assert!(gpio.find_child(b"SET").is_none());
        assert!(find(&ROOT, b"gpio").is_some());
    }

    #[test]
    fn test_clip_builder() {
        let clip = Clip::new(&ROOT).with_config(Config::new().with_help_command("help"));
        assert_eq!(clip.commands.len(), 1);
        assert!(clip.on_event.is_none());
        assert_eq!(clip.config.help_command, "help");
    }
}

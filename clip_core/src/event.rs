//! Notifications raised while a line is resolved and bound.

use core::fmt;

use crate::error::ArgError;
use crate::tree::{Clip, Command};

/// Payload-free discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Help,
    CommandNotFound,
    ArgumentsError,
    CallCommand,
}

/// Something the event callback should hear about. `'e` is the lifetime of the line buffer.
pub enum Event<'e, C: 'static> {
    /// The help word was given at some level. `command` is `None` at the top level and `commands`
    /// lists the choices available there.
    Help {
        command: Option<&'static Command<C>>,
        commands: &'static [Command<C>],
    },

    /// `name` matched none of the children of `command` (`None` at the top level).
    CommandNotFound {
        command: Option<&'static Command<C>>,
        name: &'e [u8],
    },

    /// Binding failed and the callback of `command` was skipped.
    ArgumentsError {
        command: &'static Command<C>,
        error: ArgError,
    },

    /// A terminal was reached. Raised before its arguments are bound.
    CallCommand {
        command: &'static Command<C>,
        line: &'e [u8],
    },
}

impl<C: 'static> Event<'_, C> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Help { .. } => EventKind::Help,
            Event::CommandNotFound { .. } => EventKind::CommandNotFound,
            Event::ArgumentsError { .. } => EventKind::ArgumentsError,
            Event::CallCommand { .. } => EventKind::CallCommand,
        }
    }

    /// The command the event refers to, if any.
    pub fn command(&self) -> Option<&'static Command<C>> {
        match *self {
            Event::Help { command, .. } | Event::CommandNotFound { command, .. } => command,
            Event::ArgumentsError { command, .. } | Event::CallCommand { command, .. } => {
                Some(command)
            }
        }
    }
}

impl<C: 'static> fmt::Debug for Event<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.command().map(|cmd| cmd.name);
        match self {
            Event::Help { commands, .. } => f
                .debug_struct("Help")
                .field("command", &name)
                .field("commands", &commands.len())
                .finish(),
            Event::CommandNotFound { name: missing, .. } => f
                .debug_struct("CommandNotFound")
                .field("command", &name)
                .field("name", missing)
                .finish(),
            Event::ArgumentsError { error, .. } => f
                .debug_struct("ArgumentsError")
                .field("command", &name)
                .field("error", error)
                .finish(),
            Event::CallCommand { line, .. } => f
                .debug_struct("CallCommand")
                .field("command", &name)
                .field("line", line)
                .finish(),
        }
    }
}

/// Hand `event` to the root's event callback, if one is installed.
pub fn notify<C: 'static>(clip: &Clip<C>, event: Event<'_, C>, ctx: &mut C) {
    if let Some(on_event) = clip.on_event {
        on_event(clip, &event, ctx);
    }
}

pub fn help<C: 'static>(
    clip: &Clip<C>,
    command: Option<&'static Command<C>>,
    commands: &'static [Command<C>],
    ctx: &mut C,
) {
    notify(clip, Event::Help { command, commands }, ctx);
}

pub fn command_not_found<C: 'static>(
    clip: &Clip<C>,
    command: Option<&'static Command<C>>,
    name: &[u8],
    ctx: &mut C,
) {
    notify(clip, Event::CommandNotFound { command, name }, ctx);
}

pub fn arguments_error<C: 'static>(
    clip: &Clip<C>,
    command: &'static Command<C>,
    error: ArgError,
    ctx: &mut C,
) {
    notify(clip, Event::ArgumentsError { command, error }, ctx);
}

pub fn call_command<C: 'static>(
    clip: &Clip<C>,
    command: &'static Command<C>,
    line: &[u8],
    ctx: &mut C,
) {
    notify(clip, Event::CallCommand { command, line }, ctx);
}

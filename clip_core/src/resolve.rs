//! Walks the command tree one word at a time.

use crate::dispatch;
use crate::event;
use crate::tokenizer;
use crate::tree::{self, Clip, Command};

impl<C: 'static> Clip<C> {
    /// Interpret one line. The buffer is rewritten in place while it is parsed.
    pub fn parse_line(&self, line: &mut [u8], ctx: &mut C) {
        parse_line(self, None, line, ctx);
    }
}

/// Resolve `line` below `command` (or from the top level when `None`).
///
/// A terminal command takes the rest of the line as its arguments. Otherwise the next word picks
/// a child: the help word raises [`Event::Help`](crate::Event::Help) with the choices of this
/// level, an exact name match descends into that child, and anything else raises
/// [`Event::CommandNotFound`](crate::Event::CommandNotFound).
pub fn parse_line<C: 'static>(
    clip: &Clip<C>,
    command: Option<&'static Command<C>>,
    line: &mut [u8],
    ctx: &mut C,
) {
    if let Some(cmd) = command {
        if cmd.is_terminal() {
            trace!("{} is terminal", cmd.name);
            dispatch::call_command(clip, cmd, line, ctx);
            return;
        }
    }

    let commands = command.map_or(clip.commands, Command::children);
    let (name, rest) = tokenizer::next_token(line);

    if name == clip.config.help_command.as_bytes() {
        trace!("help requested");
        event::help(clip, command, commands, ctx);
        return;
    }

    match tree::find(commands, name) {
        Some(child) => {
            trace!("descending into {}", child.name);
            parse_line(clip, Some(child), rest, ctx);
        }
        None => {
            debug!("no command matches {:?}", &*name);
            event::command_not_found(clip, command, name, ctx);
        }
    }
}

//! Console rendering of interpreter events.

use std::fmt::Write;

use clip_core::usage::{write_command_list, write_usage};
use clip_core::{Clip, Event};
use log::debug;

use crate::print::{COLOR_GREEN, COLOR_RED, COLOR_RESET, COLOR_YELLOW};
use crate::AppContext;

/// Event callback registered with the demo tree.
pub fn on_event(clip: &Clip<AppContext>, event: &Event<'_, AppContext>, _ctx: &mut AppContext) {
    debug!("event {:?}", event.kind());
    let color = match event {
        Event::Help { .. } => COLOR_YELLOW,
        Event::CallCommand { .. } => COLOR_GREEN,
        Event::CommandNotFound { .. } | Event::ArgumentsError { .. } => COLOR_RED,
    };
    print!("{color}{}{COLOR_RESET}", render_event(clip, event));
}

/// Text printed for `event`, newline terminated.
pub fn render_event<C: 'static>(clip: &Clip<C>, event: &Event<'_, C>) -> String {
    let mut out = String::new();
    let _ = match *event {
        Event::Help { command, commands } => {
            let _ = writeln!(
                out,
                "supported commands for {}:",
                command.map_or(".", |cmd| cmd.name)
            );
            write_command_list(&mut out, commands)
        }
        Event::CommandNotFound { command, name } if name.is_empty() => match command {
            Some(cmd) => writeln!(
                out,
                "missing subcommand, {} needs subcommand! (use \"{}\" for more details)",
                cmd.name, clip.config.help_command
            ),
            None => writeln!(out, "command required!"),
        },
        Event::CommandNotFound { name, .. } => {
            writeln!(out, "{} not found!", String::from_utf8_lossy(name))
        }
        Event::CallCommand { command, line } => writeln!(
            out,
            "call command callback for {} with args {}",
            command.name,
            String::from_utf8_lossy(line)
        ),
        Event::ArgumentsError { command, error } => {
            let _ = writeln!(out, "error: {error}");
            out.push_str("usage: ");
            let _ = write_usage(&mut out, command);
            writeln!(out)
        }
    };
    out
}

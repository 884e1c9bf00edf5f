//! Human readable summaries of commands, for event handlers that print help.

use core::fmt::{self, Write};

use heapless::String;

use crate::tree::Command;

/// `name <arg:TYPE> [optional:TYPE]`
pub fn write_usage<C: 'static, W: Write>(out: &mut W, command: &Command<C>) -> fmt::Result {
    out.write_str(command.name)?;
    for arg in command.args() {
        if arg.optional {
            write!(out, " [{}:{}]", arg.name, arg.kind)?;
        } else {
            write!(out, " <{}:{}>", arg.name, arg.kind)?;
        }
    }
    Ok(())
}

/// [`write_usage`] into a fixed-capacity string. Fails if it does not fit.
pub fn usage<C: 'static, const N: usize>(command: &Command<C>) -> Result<String<N>, fmt::Error> {
    let mut out = String::new();
    write_usage(&mut out, command)?;
    Ok(out)
}

/// One line per command: its name, then ` - description` when it has one.
pub fn write_command_list<C: 'static, W: Write>(out: &mut W, commands: &[Command<C>]) -> fmt::Result {
    for command in commands {
        out.write_str(command.name)?;
        if let Some(description) = command.description {
            write!(out, " - {description}")?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

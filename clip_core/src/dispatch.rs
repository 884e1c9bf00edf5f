//! Argument binding for terminal commands.

use heapless::Vec;

use crate::config::ARGS_CAPACITY;
use crate::error::ArgError;
use crate::event;
use crate::tokenizer;
use crate::tree::{Clip, Command};
use crate::value::{self, ArgValue};

/// Bind the rest of `line` to the arguments of `command` and call it.
///
/// [`Event::CallCommand`](crate::Event::CallCommand) is raised first, whatever happens next.
/// Words are then bound positionally until the line runs out or `config.max_args` words were
/// taken. Declared arguments are parsed by type and anything past them is bound as a string. The
/// first bad word aborts binding, as does a count below the required minimum. Either way an
/// [`Event::ArgumentsError`](crate::Event::ArgumentsError) replaces the call.
pub fn call_command<C: 'static>(
    clip: &Clip<C>,
    command: &'static Command<C>,
    line: &mut [u8],
    ctx: &mut C,
) {
    event::call_command(clip, command, tokenizer::line_text(line), ctx);

    match bind(clip, command, line) {
        Ok(argv) => {
            if let Some(callback) = command.callback() {
                debug!("calling {} with {} argument(s)", command.name, argv.len());
                callback(clip, command, &argv, ctx);
            } else {
                trace!("{} has no callback", command.name);
            }
        }
        Err(error) => {
            debug!("{}: {}", command.name, error);
            event::arguments_error(clip, command, error, ctx);
        }
    }
}

/// Tokenize and parse the arguments of `command` without calling anything.
pub fn bind<'a, C: 'static>(
    clip: &Clip<C>,
    command: &Command<C>,
    line: &'a mut [u8],
) -> Result<Vec<ArgValue<'a>, ARGS_CAPACITY>, ArgError> {
    let limit = clip.config.max_args.min(ARGS_CAPACITY);
    let declared = command.args();
    let mut argv: Vec<ArgValue<'a>, ARGS_CAPACITY> = Vec::new();
    let mut rest = line;

    while argv.len() < limit {
        let (token, next) = tokenizer::next_token(rest);
        rest = next;
        if token.is_empty() {
            break;
        }

        let value = match declared.get(argv.len()) {
            Some(arg) => value::parse(arg.kind, token)?,
            None => ArgValue::Str(token),
        };
        if argv.push(value).is_err() {
            break;
        }
    }

    if tokenizer::line_text(rest).iter().any(|&b| b != b' ') {
        warn!("{}: words past the first {} ignored", command.name, limit);
    }

    if argv.len() < command.required_args() {
        return Err(ArgError::NotEnoughArguments);
    }
    Ok(argv)
}

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use usercode::commands as uc;
use usercode::{AppContext, events};

clip_macros::define_commands! {
    mod commands;
    context = AppContext;
    event = events::on_event;
    path = "../usercode/src/commands.cfg";
}

/// Line buffer handed to the interpreter, terminator included.
const LINE_CAPACITY: usize = 128;

#[derive(Parser, Debug)]
#[command(name = "demo_app", version, about = "Interactive demo of the clip command interpreter")]
struct Args {
    /// Prompt printed before every line
    #[arg(long, default_value = "> ")]
    prompt: String,

    /// Run these lines in order and exit instead of reading stdin
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    info!(
        "{} commands, depth {}, arity {}",
        commands::NUM_COMMANDS,
        commands::MAX_DEPTH,
        commands::MAX_ARITY
    );

    let mut ctx = AppContext::default();
    let result = if args.commands.is_empty() {
        repl(&args.prompt, &mut ctx)
    } else {
        for line in &args.commands {
            run_line(line, &mut ctx);
            if ctx.exit_requested {
                break;
            }
        }
        Ok(())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("stdin: {e}");
            ExitCode::FAILURE
        }
    }
}

fn repl(prompt: &str, ctx: &mut AppContext) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();

    while !ctx.exit_requested {
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let line = input.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        run_line(line, ctx);
    }
    Ok(())
}

fn run_line(line: &str, ctx: &mut AppContext) {
    let mut buffer = [0u8; LINE_CAPACITY];
    let bytes = line.as_bytes();
    let len = bytes.len().min(LINE_CAPACITY - 1);
    if len < bytes.len() {
        warn!("line truncated to {len} bytes");
    }
    buffer[..len].copy_from_slice(&bytes[..len]);
    commands::CLIP.parse_line(&mut buffer, ctx);
}

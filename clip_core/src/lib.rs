//! # clip_core
//!
//! Allocation-free command line interpreter for small targets.
//!
//! A static tree of [`Command`]s is walked word by word: groups select a child by name, terminal
//! commands bind the remaining words to their declared [`Arg`]s and invoke a callback. Every step
//! happens in place on the caller's line buffer. Quotes and escapes are squeezed out of tokens,
//! and hex arrays are rewritten into a length-prefixed binary form over the text they came from.
//!
//! Outcomes other than a successful call are reported through [`Event`]s handed to the root's
//! event callback.
//!
//! ```ignore
//! let mut line = *b"gpio set pin 3 1\0";
//! CLIP.parse_line(&mut line, &mut ctx);
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod hex;
pub mod lv;
pub mod resolve;
pub mod tokenizer;
pub mod tree;
pub mod usage;
pub mod value;

pub use config::{ARGS_CAPACITY, Config, LV_INLINE_CAPACITY};
pub use error::{ArgError, HexError, LvError};
pub use event::{Event, EventKind};
pub use tree::{Arg, ArgType, Clip, Command, CommandCallback, CommandKind, EventCallback};
pub use value::{ArgValue, HexArray};

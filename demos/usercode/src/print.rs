//! Text rendering for arguments and memory contents.

use std::fmt::Write;

use clip_core::ArgValue;

pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_GREEN: &str = "\x1b[32m";
pub const COLOR_YELLOW: &str = "\x1b[33m";
pub const COLOR_RESET: &str = "\x1b[0m";

const DUMP_WIDTH: usize = 16;

/// `tag, argc=N, argv=<TYPE:value> ...`
pub fn describe_args(tag: &str, args: &[ArgValue<'_>]) -> String {
    let mut out = format!("{tag}, argc={}, argv=", args.len());
    for arg in args {
        let kind = arg.kind();
        let _ = match *arg {
            ArgValue::Str(s) => write!(out, "<{kind}:{}> ", String::from_utf8_lossy(s)),
            ArgValue::Bool(v) => write!(out, "<{kind}:{}> ", u8::from(v)),
            ArgValue::Int(v) => write!(out, "<{kind}:{v}> "),
            ArgValue::Uint(v) => write!(out, "<{kind}:{v}> "),
            ArgValue::Float(v) => write!(out, "<{kind}:{v:.6}> "),
            ArgValue::HexArray(array) => {
                let _ = write!(out, "<{kind}:");
                for byte in array.data() {
                    let _ = write!(out, "{byte:02X}");
                }
                write!(out, "> ")
            }
        };
    }
    out
}

/// Classic hexdump: address, 16 bytes per row, then the printable characters.
pub fn mem_dump(addr: u32, data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(DUMP_WIDTH).enumerate() {
        let _ = write!(out, "0x{:08X}  ", addr.wrapping_add((row * DUMP_WIDTH) as u32));
        for i in 0..DUMP_WIDTH {
            match chunk.get(i) {
                Some(byte) => {
                    let _ = write!(out, "{byte:02X} ");
                }
                None => out.push_str("   "),
            }
        }
        out.push(' ');
        out.extend(
            chunk
                .iter()
                .map(|&b| if b.is_ascii_alphanumeric() { b as char } else { '.' }),
        );
        out.push('\n');
    }
    out
}

//! Whole-line scenarios against a two-root command tree.

use clip_core::{
    Arg, ArgError, ArgType, ArgValue, Clip, Command, CommandCallback, Event,
};

#[derive(Debug, Clone, PartialEq)]
enum Bound {
    Str(String),
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
    Hex(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Help(Option<&'static str>, Vec<&'static str>),
    NotFound(Option<&'static str>, String),
    ArgsError(&'static str, ArgError),
    Invoke(&'static str, String),
    Call(&'static str, Vec<Bound>),
}

#[derive(Default)]
struct Recorder {
    seen: Vec<Seen>,
}

fn on_command(_: &Clip<Recorder>, cmd: &Command<Recorder>, args: &[ArgValue<'_>], rec: &mut Recorder) {
    let args = args
        .iter()
        .map(|arg| match *arg {
            ArgValue::Str(s) => Bound::Str(String::from_utf8_lossy(s).into_owned()),
            ArgValue::Bool(v) => Bound::Bool(v),
            ArgValue::Int(v) => Bound::Int(v),
            ArgValue::Uint(v) => Bound::Uint(v),
            ArgValue::Float(v) => Bound::Float(v),
            ArgValue::HexArray(a) => Bound::Hex(a.data().to_vec()),
        })
        .collect();
    rec.seen.push(Seen::Call(cmd.name, args));
}

fn on_event(_: &Clip<Recorder>, event: &Event<'_, Recorder>, rec: &mut Recorder) {
    let seen = match *event {
        Event::Help { command, commands } => {
            Seen::Help(command.map(|c| c.name), commands.iter().map(|c| c.name).collect())
        }
        Event::CommandNotFound { command, name } => Seen::NotFound(
            command.map(|c| c.name),
            String::from_utf8_lossy(name).into_owned(),
        ),
        Event::ArgumentsError { command, error } => Seen::ArgsError(command.name, error),
        Event::CallCommand { command, line } => {
            Seen::Invoke(command.name, String::from_utf8_lossy(line).into_owned())
        }
    };
    rec.seen.push(seen);
}

const CALL: Option<CommandCallback<Recorder>> = Some(on_command as CommandCallback<Recorder>);

static A1: [Command<Recorder>; 2] = [
    Command::terminal("a11", Some("a11 command"), &[], CALL),
    Command::terminal("a12", Some("a12 command"), &[], CALL),
];

static ABC: [Command<Recorder>; 3] = [
    Command::group("a1", Some("a1 command"), &A1),
    Command::terminal("a2", Some("a2 command"), &[], CALL),
    Command::terminal("a3", Some("a3 command"), &[], CALL),
];

static CMD1: [Command<Recorder>; 4] = [
    Command::group("abc", Some("abc command"), &ABC),
    Command::terminal("def", Some("def command"), &[], CALL),
    Command::terminal("xyz", Some("xyz command"), &[], CALL),
    Command::terminal("no", Some("no command"), &[], None),
];

static CMD2_ABC_ARGS: [Arg; 6] = [
    Arg::required("a", "a argument", ArgType::String),
    Arg::required("b", "b argument", ArgType::Bool),
    Arg::required("c", "c argument", ArgType::Int),
    Arg::required("d", "d argument", ArgType::Uint),
    Arg::required("e", "e argument", ArgType::Float),
    Arg::required("f", "f argument", ArgType::HexArray),
];

static CMD2_XYZ_ARGS: [Arg; 1] = [Arg::required("a", "a argument", ArgType::Int)];

static CMD2: [Command<Recorder>; 2] = [
    Command::terminal("abc", Some("abc command"), &CMD2_ABC_ARGS, CALL),
    Command::terminal("xyz", Some("xyz command"), &CMD2_XYZ_ARGS, CALL),
];

static ROOT: [Command<Recorder>; 2] = [
    Command::group("cmd1", Some("cmd1 description"), &CMD1),
    Command::group("cmd2", Some("cmd2 description"), &CMD2),
];

static CLIP: Clip<Recorder> = Clip::new(&ROOT).with_event_callback(on_event);

fn run(line: &str) -> Vec<Seen> {
    let mut rec = Recorder::default();
    let mut buf = [0u8; 128];
    buf[..line.len()].copy_from_slice(line.as_bytes());
    CLIP.parse_line(&mut buf, &mut rec);
    rec.seen
}

fn strs(items: &[&str]) -> Vec<Bound> {
    items.iter().map(|s| Bound::Str((*s).to_owned())).collect()
}

// ==================== CALLS ====================

#[test]
fn test_untyped_arguments_reach_callback() {
    assert_eq!(
        run("cmd1 abc a1 a11 arg1 arg2 \"hello world\" 3"),
        vec![
            Seen::Invoke("a11", "arg1 arg2 \"hello world\" 3".into()),
            Seen::Call("a11", strs(&["arg1", "arg2", "hello world", "3"])),
        ]
    );
}

#[test]
fn test_typed_arguments_reach_callback() {
    assert_eq!(
        run("cmd2 abc test 0 -1 2 1.23 DEADBEEF"),
        vec![
            Seen::Invoke("abc", "test 0 -1 2 1.23 DEADBEEF".into()),
            Seen::Call(
                "abc",
                vec![
                    Bound::Str("test".into()),
                    Bound::Bool(false),
                    Bound::Int(-1),
                    Bound::Uint(2),
                    Bound::Float(1.23),
                    Bound::Hex(vec![0xDE, 0xAD, 0xBE, 0xEF]),
                ]
            ),
        ]
    );
}

#[test]
fn test_words_past_declared_arguments_stay_strings() {
    assert_eq!(
        run("cmd2 xyz -1 2 1.23 DEADBEEF"),
        vec![
            Seen::Invoke("xyz", "-1 2 1.23 DEADBEEF".into()),
            Seen::Call(
                "xyz",
                vec![
                    Bound::Int(-1),
                    Bound::Str("2".into()),
                    Bound::Str("1.23".into()),
                    Bound::Str("DEADBEEF".into()),
                ]
            ),
        ]
    );
}

#[test]
fn test_help_word_below_terminal_is_an_argument() {
    assert_eq!(
        run("cmd1 abc a1 a11 ?"),
        vec![Seen::Invoke("a11", "?".into()), Seen::Call("a11", strs(&["?"]))]
    );
}

#[test]
fn test_command_without_callback() {
    assert_eq!(
        run("cmd1 no arg1 arg2"),
        vec![Seen::Invoke("no", "arg1 arg2".into())]
    );
}

#[test]
fn test_escaped_space_binds_one_argument() {
    assert_eq!(
        run("cmd1 def a\\ b c"),
        vec![
            Seen::Invoke("def", "a\\ b c".into()),
            Seen::Call("def", strs(&["a b", "c"])),
        ]
    );
}

// ==================== HELP ====================

#[test]
fn test_help_at_every_level() {
    let cases: &[(&str, Option<&'static str>, &[&'static str])] = &[
        ("?", None, &["cmd1", "cmd2"]),
        ("cmd1 ?", Some("cmd1"), &["abc", "def", "xyz", "no"]),
        ("cmd1 abc ?", Some("abc"), &["a1", "a2", "a3"]),
        ("cmd1 abc a1 ?", Some("a1"), &["a11", "a12"]),
        ("cmd2 ?", Some("cmd2"), &["abc", "xyz"]),
    ];
    for &(line, command, names) in cases {
        assert_eq!(run(line), vec![Seen::Help(command, names.to_vec())], "line {line:?}");
    }
}

// ==================== NOT FOUND ====================

#[test]
fn test_command_not_found() {
    let cases: &[(&str, Option<&'static str>, &str)] = &[
        ("cmd3", None, "cmd3"),
        ("cmd11", None, "cmd11"),
        ("cmd1 qwerty", Some("cmd1"), "qwerty"),
        ("cmd1 abc a1 a13", Some("a1"), "a13"),
        ("cmd2 abcd", Some("cmd2"), "abcd"),
    ];
    for &(line, command, name) in cases {
        assert_eq!(run(line), vec![Seen::NotFound(command, name.into())], "line {line:?}");
    }
}

// ==================== ARGUMENT ERRORS ====================

#[test]
fn test_argument_errors() {
    let cases: &[(&str, &'static str, &str, ArgError)] = &[
        ("cmd2 xyz test", "xyz", "test", ArgError::ParseInt),
        ("cmd2 xyz 1.0 test", "xyz", "1.0 test", ArgError::ParseInt),
        ("cmd2 abc test x -1 2 1.23 DEADBEEF", "abc", "test x -1 2 1.23 DEADBEEF", ArgError::ParseBool),
        ("cmd2 abc test 0 -1.0 2 1.23 DEADBEEF", "abc", "test 0 -1.0 2 1.23 DEADBEEF", ArgError::ParseInt),
        ("cmd2 abc test 1 -1 -2 1.23 DEADBEEF", "abc", "test 1 -1 -2 1.23 DEADBEEF", ArgError::ParseUint),
        ("cmd2 abc test 0 -1 2 1..23 DEADBEEF", "abc", "test 0 -1 2 1..23 DEADBEEF", ArgError::ParseFloat),
        ("cmd2 abc test 0 -1 2 1.23 DEADBEEF0", "abc", "test 0 -1 2 1.23 DEADBEEF0", ArgError::ParseHexArray),
        ("cmd2 abc test 0 -1 2 1.23", "abc", "test 0 -1 2 1.23", ArgError::NotEnoughArguments),
    ];
    for &(line, command, rest, error) in cases {
        assert_eq!(
            run(line),
            vec![Seen::Invoke(command, rest.into()), Seen::ArgsError(command, error)],
            "line {line:?}"
        );
    }
}

// ==================== CONTEXT ====================

#[test]
fn test_context_is_shared_across_lines() {
    let mut rec = Recorder::default();
    for line in ["cmd1 def", "cmd1 abc a2", "bogus"] {
        let mut buf = Vec::from(line.as_bytes());
        CLIP.parse_line(&mut buf, &mut rec);
    }
    assert_eq!(rec.seen.len(), 5);
    assert_eq!(rec.seen[4], Seen::NotFound(None, "bogus".into()));
}

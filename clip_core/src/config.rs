//! Interpreter configuration.

/// Number of argument slots reserved on the stack for one command invocation.
pub const ARGS_CAPACITY: usize = 32;

/// Bytes used for the little-endian length field of a long hex array (32-bit lengths).
pub const LV_INLINE_CAPACITY: usize = 4;

/// Immutable settings shared by the resolver and the argument binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Word that requests the command list of the current level instead of resolving a child.
    pub help_command: &'static str,

    /// Words bound per invocation. Anything past this is ignored.
    pub max_args: usize,
}

impl Config {
    pub const DEFAULT: Self = Self {
        help_command: "?",
        max_args: 10,
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    pub const fn with_help_command(mut self, help_command: &'static str) -> Self {
        self.help_command = help_command;
        self
    }

    /// Panics (at compile time when used in a `const`/`static`) above [`ARGS_CAPACITY`].
    pub const fn with_max_args(mut self, max_args: usize) -> Self {
        assert!(max_args <= ARGS_CAPACITY, "max_args exceeds ARGS_CAPACITY");
        self.max_args = max_args;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

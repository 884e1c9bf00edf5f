extern crate proc_macro;

mod commandsgen;

use commandsgen::define_commands_impl;
use proc_macro::TokenStream;

/// Declare a static command tree. See the `commandsgen` module docs for the syntax.
#[proc_macro]
pub fn define_commands(input: TokenStream) -> TokenStream {
    define_commands_impl(input)
}

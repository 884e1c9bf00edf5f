//! # Command Tree Macro
//!
//! Generates the static command tree consumed by `clip_core` from a compact declaration.
//!
//! ## Macro Input Format
//!
//! ```text
//! define_commands! {
//!     mod commands;
//!     context = crate::AppContext;       // required: type handed to every callback
//!     event = crate::on_event;           // optional event callback
//!     help = "?";                        // optional help word
//!     max_args = 10;                     // optional argument ceiling
//!
//!     "gpio" : "gpio control" {
//!         "set" : "set pin" => uc::gpio_set (pin: D "pin number", state: t "level"),
//!         "test" => uc::gpio_test (pin: D, mode?: D),
//!     },
//!     "exit" => uc::exit,
//! }
//! ```
//!
//! Instead of inline nodes, `path = "file.cfg";` loads them from a file relative to the crate
//! manifest.
//!
//! A node with braces is a group, anything else is a terminal with an optional callback and an
//! optional argument list. `?` after an argument name makes it optional.
//!
//! ## Descriptor Table
//!
//! +------+----------+----------+
//! | Char | Long     | Type     |
//! +------+----------+----------+
//! | s    | string   | STRING   |
//! | t    | bool     | BOOL     |
//! | d    | int      | INT      |
//! | D    | uint     | UINT     |
//! | f    | float    | FLOAT    |
//! | h    | hex      | HEXARRAY |
//! +------+----------+----------+
//!
//! ## Output
//!
//! `pub mod <name>` holding `COMMANDS` (top level nodes), `CLIP` (the root) and the `NUM_COMMANDS`,
//! `MAX_DEPTH` and `MAX_ARITY` constants. Callback paths are resolved from the invoking module.

use std::collections::HashSet;
use std::path::PathBuf;

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, LitStr, Path, Result, Token, Type, braced, parenthesized};

/// Declared argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    String,
    Bool,
    Int,
    Uint,
    Float,
    HexArray,
}

impl ArgKind {
    fn from_descriptor(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "s" | "string" => Ok(Self::String),
            "t" | "bool" => Ok(Self::Bool),
            "d" | "int" => Ok(Self::Int),
            "D" | "uint" => Ok(Self::Uint),
            "f" | "float" => Ok(Self::Float),
            "h" | "hex" => Ok(Self::HexArray),
            other => Err(syn::Error::new(
                ident.span(),
                format!("unknown argument type `{other}`, expected one of s t d D f h"),
            )),
        }
    }

    fn to_tokens(self) -> TokenStream2 {
        match self {
            Self::String => quote!(::clip_core::ArgType::String),
            Self::Bool => quote!(::clip_core::ArgType::Bool),
            Self::Int => quote!(::clip_core::ArgType::Int),
            Self::Uint => quote!(::clip_core::ArgType::Uint),
            Self::Float => quote!(::clip_core::ArgType::Float),
            Self::HexArray => quote!(::clip_core::ArgType::HexArray),
        }
    }
}

/// `name[?]: <type> ["description"]`
struct ArgDef {
    name: String,
    span: Span,
    optional: bool,
    kind: ArgKind,
    description: String,
}

impl Parse for ArgDef {
    fn parse(input: ParseStream) -> Result<Self> {
        let (name, span) = if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            (lit.value(), lit.span())
        } else {
            let ident = input.call(Ident::parse_any)?;
            (ident.unraw().to_string(), ident.span())
        };
        let optional = input.parse::<Option<Token![?]>>()?.is_some();
        input.parse::<Token![:]>()?;
        let kind = ArgKind::from_descriptor(&input.call(Ident::parse_any)?)?;
        let description = if input.peek(LitStr) {
            input.parse::<LitStr>()?.value()
        } else {
            String::new()
        };
        Ok(ArgDef { name, span, optional, kind, description })
    }
}

enum NodeBody {
    Group(Vec<NodeDef>),
    Terminal { callback: Option<Path>, args: Vec<ArgDef> },
}

/// `"name" [: "description"] ( { nodes } | [=> callback] [( args )] )`
struct NodeDef {
    name: LitStr,
    description: Option<LitStr>,
    body: NodeBody,
}

impl Parse for NodeDef {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: LitStr = input.parse()?;
        let description = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        let body = if input.peek(syn::token::Brace) {
            let content;
            braced!(content in input);
            NodeBody::Group(content.call(parse_nodes)?)
        } else {
            let callback = if input.peek(Token![=>]) {
                input.parse::<Token![=>]>()?;
                Some(input.call(Path::parse_mod_style)?)
            } else {
                None
            };
            let args = if input.peek(syn::token::Paren) {
                let content;
                parenthesized!(content in input);
                Punctuated::<ArgDef, Token![,]>::parse_terminated(&content)?
                    .into_iter()
                    .collect()
            } else {
                Vec::new()
            };
            NodeBody::Terminal { callback, args }
        };

        Ok(NodeDef { name, description, body })
    }
}

fn parse_nodes(input: ParseStream) -> Result<Vec<NodeDef>> {
    Ok(Punctuated::<NodeDef, Token![,]>::parse_terminated(input)?
        .into_iter()
        .collect())
}

/// Where the node declarations come from.
enum Source {
    Inline(Vec<NodeDef>),
    File(LitStr),
}

/// Parsed macro input: `mod <ident>;`, `key = value;` settings, then the nodes.
struct CommandMacroInput {
    mod_ident: Ident,
    context: Type,
    event: Option<Path>,
    help: Option<LitStr>,
    max_args: Option<Expr>,
    source: Source,
}

impl Parse for CommandMacroInput {
    fn parse(input: ParseStream) -> Result<Self> {
        // Expect: `mod <ident>;`
        input.parse::<Token![mod]>()?;
        let mod_ident: Ident = input.parse()?;
        input.parse::<Token![;]>()?;

        let mut context = None;
        let mut event = None;
        let mut help = None;
        let mut max_args = None;
        let mut path = None;

        while input.peek(Ident::peek_any) && input.peek2(Token![=]) {
            let key = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "context" => context = Some(input.parse::<Type>()?),
                "event" => event = Some(input.call(Path::parse_mod_style)?),
                "help" => help = Some(input.parse::<LitStr>()?),
                "max_args" => max_args = Some(input.parse::<Expr>()?),
                "path" => path = Some(input.parse::<LitStr>()?),
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!(
                            "unexpected key `{other}`, expected one of context, event, help, max_args, path"
                        ),
                    ));
                }
            }
            input.parse::<Token![;]>()?;
        }

        let context = context.ok_or_else(|| {
            syn::Error::new(mod_ident.span(), "You must provide `context = <type>;` in the macro input.")
        })?;

        let source = match path {
            Some(file) => Source::File(file),
            None => Source::Inline(parse_nodes(input)?),
        };

        Ok(CommandMacroInput { mod_ident, context, event, help, max_args, source })
    }
}

/// Generate the command tree module.
pub fn define_commands_impl(input: TokenStream) -> TokenStream {
    match syn::parse::<CommandMacroInput>(input).and_then(expand) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn load_nodes(file: &LitStr) -> Result<Vec<NodeDef>> {
    let root = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(file.span(), "CARGO_MANIFEST_DIR is not set"))?;
    let full_path = PathBuf::from(root).join(file.value());
    let raw = std::fs::read_to_string(&full_path).map_err(|err| {
        syn::Error::new(
            file.span(),
            format!("failed to read {}: {err}", full_path.display()),
        )
    })?;
    syn::parse::Parser::parse_str(parse_nodes, &raw)
        .map_err(|err| syn::Error::new(file.span(), format!("in {}: {err}", full_path.display())))
}

/// Tree-wide sizes exported by the generated module.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TreeStats {
    nodes: usize,
    depth: usize,
    arity: usize,
}

fn tree_stats(nodes: &[NodeDef]) -> TreeStats {
    let mut stats = TreeStats::default();
    for node in nodes {
        stats.nodes += 1;
        let below = match &node.body {
            NodeBody::Group(children) => {
                let inner = tree_stats(children);
                stats.nodes += inner.nodes;
                stats.arity = stats.arity.max(inner.arity);
                inner.depth
            }
            NodeBody::Terminal { args, .. } => {
                stats.arity = stats.arity.max(args.len());
                0
            }
        };
        stats.depth = stats.depth.max(1 + below);
    }
    stats
}

/// Reject trees the resolver could never reach into or would resolve ambiguously.
fn validate(nodes: &[NodeDef], help: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        let name = node.name.value();
        if name.is_empty() {
            return Err(syn::Error::new(node.name.span(), "command name must not be empty"));
        }
        if name.contains(' ') {
            return Err(syn::Error::new(node.name.span(), "command name must not contain spaces"));
        }
        if name == help {
            return Err(syn::Error::new(
                node.name.span(),
                format!("`{name}` is reserved for help"),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new(node.name.span(), format!("duplicate command `{name}`")));
        }

        match &node.body {
            NodeBody::Group(children) => validate(children, help)?,
            NodeBody::Terminal { args, .. } => {
                let mut arg_names = HashSet::new();
                for arg in args {
                    if !arg_names.insert(arg.name.as_str()) {
                        return Err(syn::Error::new(
                            arg.span,
                            format!("duplicate argument `{}`", arg.name),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

fn arg_tokens(arg: &ArgDef) -> TokenStream2 {
    let name = LitStr::new(&arg.name, arg.span);
    let description = LitStr::new(&arg.description, arg.span);
    let kind = arg.kind.to_tokens();
    let optional = arg.optional;
    quote! {
        ::clip_core::Arg { name: #name, description: #description, kind: #kind, optional: #optional }
    }
}

fn node_tokens(node: &NodeDef, context: &Type) -> TokenStream2 {
    let name = &node.name;
    let description = match &node.description {
        Some(text) => quote!(::core::option::Option::Some(#text)),
        None => quote!(::core::option::Option::None),
    };

    let kind = match &node.body {
        NodeBody::Group(children) => {
            let children: Vec<TokenStream2> =
                children.iter().map(|child| node_tokens(child, context)).collect();
            quote! {
                ::clip_core::CommandKind::Group { children: &[ #( #children ),* ] }
            }
        }
        NodeBody::Terminal { callback, args } => {
            // The cast checks the callback signature.
            let callback = match callback {
                Some(path) => quote! {
                    ::core::option::Option::Some(#path as ::clip_core::CommandCallback<#context>)
                },
                None => quote!(::core::option::Option::None),
            };
            let args: Vec<TokenStream2> = args.iter().map(arg_tokens).collect();
            quote! {
                ::clip_core::CommandKind::Terminal { args: &[ #( #args ),* ], callback: #callback }
            }
        }
    };

    quote! {
        ::clip_core::Command { name: #name, description: #description, kind: #kind }
    }
}

fn expand(input: CommandMacroInput) -> Result<TokenStream2> {
    let CommandMacroInput { mod_ident, context, event, help, max_args, source } = input;

    let nodes = match source {
        Source::Inline(nodes) => nodes,
        Source::File(file) => load_nodes(&file)?,
    };

    let help_word = help.as_ref().map_or_else(|| "?".to_string(), LitStr::value);
    if help_word.is_empty() || help_word.contains(' ') {
        let span = help.as_ref().map_or_else(Span::call_site, LitStr::span);
        return Err(syn::Error::new(span, "help word must be a single non-empty word"));
    }
    validate(&nodes, &help_word)?;

    let stats = tree_stats(&nodes);
    let num_commands = Literal::usize_unsuffixed(stats.nodes);
    let max_depth = Literal::usize_unsuffixed(stats.depth);
    let max_arity = Literal::usize_unsuffixed(stats.arity);

    let help_lit = LitStr::new(&help_word, Span::call_site());
    let max_args = match max_args {
        Some(expr) => quote!(#expr),
        None => quote!(::clip_core::Config::DEFAULT.max_args),
    };
    let on_event = match event {
        Some(path) => quote! {
            ::core::option::Option::Some(#path as ::clip_core::EventCallback<#context>)
        },
        None => quote!(::core::option::Option::None),
    };

    let commands: Vec<TokenStream2> = nodes.iter().map(|node| node_tokens(node, &context)).collect();

    Ok(quote! {
        #[allow(dead_code)]
        #[allow(unused_imports)]
        pub mod #mod_ident {

            //! Generated by `define_commands!`.

            use super::*;

            /// Top level commands.
            pub static COMMANDS: &[::clip_core::Command<#context>] = &[ #( #commands ),* ];

            /// Interpreter root.
            pub static CLIP: ::clip_core::Clip<#context> = ::clip_core::Clip {
                commands: COMMANDS,
                on_event: #on_event,
                config: ::clip_core::Config::DEFAULT
                    .with_help_command(#help_lit)
                    .with_max_args(#max_args),
            };

            /// Number of nodes in the tree.
            pub const NUM_COMMANDS: usize = #num_commands;

            /// Longest path from the top level to a terminal, in words.
            pub const MAX_DEPTH: usize = #max_depth;

            /// Largest declared argument list.
            pub const MAX_ARITY: usize = #max_arity;
        }
    })
}

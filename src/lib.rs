/*!
# Paisley

[![docs.rs](https://img.shields.io/docsrs/paisley.svg?style=flat-square&label=docs.rs)](https://docs.rs/paisley/)
[![crates.io](https://img.shields.io/crates/v/paisley.svg?style=flat-square&label=crates.io)](https://crates.io/crates/paisley)
[![license](https://img.shields.io/badge/license-mit-blue?style=flat-square)](https://en.wikipedia.org/wiki/MIT_License)

This crate provides a lightweight command-routing argument parser for CLI
applications: a minimist-style flag scanner underneath, and a declarative
command layer — patterns like `cp <src> [dest]`, option specs like
`-m, --message <message>` — on top.

The two halves work alone or together. [`parse`] takes raw arguments and a
[`ParserConfig`] and hands back positionals, a flag mapping, and (optionally)
a post-`--` bucket. [`Program`] adds registration, resolution, validation,
lifecycle events, plugins, and async dispatch.

Nothing here ever prints or exits; every outcome comes back as a value for
the embedding application to render.

## Example

```
use paisley::{CommandBuilder, OptionSpec, Program};

let mut program = Program::new("demo")
    .with_version("1.0.0");

program.register(
    CommandBuilder::new("add <...files>", "Stage one or more files.")
        .with_alias("a")
        .with_option(OptionSpec::new("--verbose", "Say more."))
        .with_action(|invocation| {
            if invocation.flags["verbose"] == true {
                println!("staging {:?}", invocation.args[0]);
            }
            Ok(())
        })
        .build()
)?;

let outcome = futures::executor::block_on(
    program.run(["add", "foo.txt", "bar.txt", "--verbose"])
)?;
assert_eq!(outcome, paisley::Outcome::Completed);
# Ok::<(), paisley::Error>(())
```

Flag parsing on its own is just as direct:

```
use paisley::ParserConfig;

let config = ParserConfig::default()
    .with_boolean("force")
    .with_alias("force", ["f"])
    .with_default("level", 3.into());

let parsed = paisley::parse(["build", "-f", "--out=dist"], &config);
assert_eq!(parsed.args[0], "build");
assert_eq!(parsed.flags["force"], true);
assert_eq!(parsed.flags["out"], "dist");
assert_eq!(parsed.flags["level"], 3);
```
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![cfg_attr(docsrs, feature(doc_cfg))]



mod command;
mod error;
mod event;
mod parser;
mod plugin;
mod program;
mod registry;
mod tools;

pub use command::{
	ArgSpec,
	Command,
	CommandBuilder,
	HandlerError,
	HandlerFuture,
	Invocation,
	OptionKind,
	OptionSpec,
};
pub use error::{
	BoxError,
	Error,
};
pub use event::{
	Event,
	Observer,
};
pub use parser::{
	parse,
	Parsed,
	ParserConfig,
	UnknownHandler,
};
pub use plugin::{
	BootstrapMode,
	CommandSource,
	Contribution,
	Plugin,
};
pub use program::{
	Outcome,
	Program,
};
pub use registry::Registry;
pub use tools::Tools;

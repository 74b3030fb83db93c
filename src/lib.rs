#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// The syntax tree the passes work on.
pub mod ast;

/// Configuration of the migration passes.
pub mod options;

/// Errors raised while migrating a file.
pub mod error;

/// Implements utility functions for transforming the ast used by [`swc_ecma_parser`] to the
/// [`ast::Ast`] the passes work on. Constructs the passes never look into are kept as source text.
pub mod parse;

/// Prints an [`ast::Ast`] back to TypeScript source.
pub mod print;

/// Generic traversal over the syntax tree.
pub mod walk;

/// The type-resolution capability and a purely syntactic implementation of it.
pub mod resolve;

/// Reads the members declared by dynamic prop type checks.
pub mod prop_types;

pub mod extract;

/// Maps resolved types to declared types.
pub mod synthesize;

/// Builds the synthesized type declarations.
pub mod compose;

pub mod splice;

pub mod transforms;

/// Private crate for testing utilities.
#[cfg(test)]
pub(crate) mod testing;

use error::MigrateResult;
use options::Options;
use resolve::{LocalResolver, TypeResolver};

/// Runs every pass over `module`, in order: props and state, removal of the static prop types,
/// then instance fields when `options` asks for them.
pub fn migrate_module(
    module: &ast::Module,
    options: &Options,
    resolver: &dyn TypeResolver,
) -> MigrateResult<ast::Module> {
    let module = transforms::make_props_and_state(module, options, resolver)?;
    let module = transforms::remove_static_prop_types(&module, options);

    if options.instance_fields {
        transforms::declare_instance_fields(&module, options, resolver)
    } else {
        Ok(module)
    }
}

/// Migrates the source of one file and returns the printed TypeScript.
///
/// Types are resolved with the [`LocalResolver`]. Any error aborts this file only.
pub fn migrate_source(file: &str, source: &str, options: &Options) -> MigrateResult<String> {
    let module = parse::parse_source(file, source)?;
    let module = migrate_module(&module, options, &LocalResolver)?;
    Ok(print::print_module(&module))
}

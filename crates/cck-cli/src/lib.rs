// NOTE: cck layering
//
// types  -> plain data shared by every crate
// index  -> SQLite history (append, query, trim, render)
// engine -> pure functions: snapshot diff, marker merge, markdown render
// scanner/runtime -> filesystem I/O, config, the polling loop
// cli    -> argument parsing, dispatch, console views
//
// Handlers own I/O sequencing; views only format. Nothing below the CLI
// prints to stdout.

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod types;
mod views;

pub use args::{Cli, Commands};
pub use commands::run;

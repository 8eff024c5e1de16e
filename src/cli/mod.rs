//! CLI subcommand implementations for the kagami binary.

pub mod compose_repl;
pub mod doctor;
pub mod keymap_cmd;
pub mod open_cmd;
pub mod output;
pub mod search_cmd;

//! Output helpers shared by the CLI commands.
//!
//! Global flags are mirrored into environment variables by `main` so any
//! module can check them without threading a flags struct around.

/// Whether `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("KAGAMI_JSON").is_ok()
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("KAGAMI_QUIET").is_ok()
}

/// Print a JSON value on its own line.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}

/// Print prose unless quiet or JSON mode is active.
pub fn say(message: &str) {
    if !is_quiet() && !is_json() {
        println!("{message}");
    }
}

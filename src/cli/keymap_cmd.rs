//! `kagami keymap` — inspect the composition table.

use crate::cli::output;
use crate::config::MirrorConfig;
use crate::keypad;
use crate::transport::http::HttpClient;
use anyhow::Result;

/// Show table stats, list one outer key's inner keys, or look up a pair.
pub async fn run(outer: Option<&str>, inner: Option<&str>) -> Result<()> {
    let cfg = MirrorConfig::load()?;
    let client = HttpClient::new(cfg.timeout_ms);

    let Some(table) = keypad::load(&cfg, &client).await else {
        output::say("key-map unavailable (both locations failed); composition is disabled");
        if output::is_json() {
            output::print_json(&serde_json::json!({ "loaded": false }));
        }
        return Ok(());
    };

    match (outer, inner) {
        (Some(o), Some(i)) => match table.lookup(o, i) {
            Some(unit) => {
                if output::is_json() {
                    output::print_json(
                        &serde_json::json!({ "outer": o, "inner": i, "unit": unit }),
                    );
                } else {
                    println!("{o} + {i} = {unit}");
                }
            }
            None => output::say(&format!("no composition for {o} + {i}")),
        },
        (Some(o), None) => {
            let inners: Vec<&str> = table.inner_keys(o).collect();
            if output::is_json() {
                output::print_json(&serde_json::json!({ "outer": o, "inner_keys": inners }));
            } else if inners.is_empty() {
                println!("unknown outer key: {o}");
            } else {
                println!("{o}: {}", inners.join(" "));
            }
        }
        _ => {
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "loaded": true,
                    "outer_keys": table.len(),
                    "triples": table.triple_count(),
                }));
            } else {
                println!(
                    "key-map loaded: {} outer keys, {} composable triples",
                    table.len(),
                    table.triple_count()
                );
            }
        }
    }
    Ok(())
}

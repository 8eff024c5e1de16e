//! Deployment readiness check.

use crate::config::MirrorConfig;
use crate::transport::{http::HttpClient, TransportMode};
use anyhow::Result;

/// Report resolved mode, mirror reachability, and companion reachability.
pub async fn run() -> Result<()> {
    let cfg = MirrorConfig::load()?;
    println!("Kagami Doctor");
    println!("=============");
    println!();

    let config_path = MirrorConfig::config_path();
    if config_path.exists() {
        println!("[OK] config file: {}", config_path.display());
    } else {
        println!("[--] no config file at {} (using defaults)", config_path.display());
    }

    let host = cfg.mirror_host().unwrap_or_default();
    let mode = TransportMode::resolve(&host);
    println!("[OK] mirror host: {host:?} resolves to {} mode", mode.label());

    let client = HttpClient::new(cfg.timeout_ms);

    match client.head(&cfg.mirror_base_url).await {
        Ok(status) if status < 400 => {
            println!("[OK] mirror reachable at {} ({status})", cfg.mirror_base_url)
        }
        Ok(status) => println!("[!!] mirror answered {status} at {}", cfg.mirror_base_url),
        Err(e) => println!("[!!] mirror unreachable at {}: {e}", cfg.mirror_base_url),
    }

    if mode == TransportMode::Direct {
        let probe = format!("{}/api/search?s=ping", cfg.companion_origin());
        match client.get(&probe, cfg.timeout_ms).await {
            Ok(resp) if resp.status < 500 => {
                println!("[OK] companion API answering at {}", cfg.companion_origin())
            }
            Ok(resp) => println!(
                "[!!] companion API answered {} at {}",
                resp.status,
                cfg.companion_origin()
            ),
            Err(e) => println!(
                "[!!] companion API unreachable at {}: {e}",
                cfg.companion_origin()
            ),
        }
    } else {
        println!("[--] relay mode: using {}", cfg.relay_base);
    }

    println!();
    println!("live origin:   {}", cfg.live_origin);
    println!("mirror prefix: {}", cfg.mirror_prefix);
    Ok(())
}

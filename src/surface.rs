//! Rendered surfaces — where search output and opened pages land.
//!
//! The orchestrator and the page resolver only talk to the [`Surface`]
//! trait, so they can be exercised against a recording mock and reused by
//! both the one-shot CLI commands and the compose REPL.

use crate::extract::ResultLink;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// What the single result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderState {
    /// Announcement shown while the fetch is in flight.
    Loading { query: String },
    /// Extracted fragment with its wired result links.
    Results {
        fragment: String,
        links: Vec<ResultLink>,
    },
    /// "No results" announcement for the query.
    Empty { query: String },
    /// Transport failure with the mode hint already appended.
    Error { message: String },
}

impl RenderState {
    /// Announcement markup for the Loading and Empty states, query escaped.
    ///
    /// Mirrors the live site's announce block so a surface that embeds
    /// HTML shows the same shape the dynamic site would.
    pub fn announcement_html(&self) -> Option<String> {
        let (query, suffix) = match self {
            RenderState::Loading { query } => (query, "searching..."),
            RenderState::Empty { query } => (query, "no results"),
            _ => return None,
        };
        Some(format!(
            "<div class=\"p-result\"><div class=\"p-result__announce\">\
             <p>\"{}\" {}</p></div></div>",
            escape_html(query),
            suffix
        ))
    }
}

/// Escape a string for interpolation into markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Side-effect sink for everything the user sees.
pub trait Surface {
    /// Display the result area's new state.
    fn render(&mut self, state: &RenderState);

    /// Open a page that exists in the mirror.
    fn open_local(&mut self, href: &str);

    /// Open a new view with live-fetched, already-deactivated markup.
    fn open_markup(&mut self, href: &str, markup: &str) -> Result<()>;

    /// Blocking, fatal-to-the-action failure notice.
    fn alert(&mut self, message: &str);
}

/// Terminal surface used by the CLI. Opened live pages are written to
/// files under `out_dir` so they can be viewed in a browser.
pub struct ConsoleSurface {
    /// Where fetched pages are materialized.
    pub out_dir: PathBuf,
    /// Print machine-readable JSON instead of prose.
    pub json: bool,
}

impl ConsoleSurface {
    pub fn new(json: bool) -> Self {
        Self {
            out_dir: std::env::temp_dir().join("kagami-pages"),
            json,
        }
    }
}

impl Surface for ConsoleSurface {
    fn render(&mut self, state: &RenderState) {
        if self.json {
            if let Ok(line) = serde_json::to_string(state) {
                println!("{line}");
            }
            return;
        }
        match state {
            RenderState::Loading { query } => println!("\"{query}\" searching..."),
            RenderState::Results { links, .. } => {
                println!("{} result(s):", links.len());
                for (i, link) in links.iter().enumerate() {
                    println!("  [{}] {}  {}", i + 1, link.text, link.href);
                }
            }
            RenderState::Empty { query } => println!("\"{query}\" - no results"),
            RenderState::Error { message } => eprintln!("Error: {message}"),
        }
    }

    fn open_local(&mut self, href: &str) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({ "opened": "local", "href": href })
            );
        } else {
            println!("page exists in the mirror: {href}");
        }
    }

    fn open_markup(&mut self, href: &str, markup: &str) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("cannot create {}", self.out_dir.display()))?;
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
        let slug: String = href
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let path = self.out_dir.join(format!("{stamp}-{}.html", slug.trim_matches('-')));
        std::fs::write(&path, markup)
            .with_context(|| format!("cannot write {}", path.display()))?;
        if self.json {
            println!(
                "{}",
                serde_json::json!({ "opened": "live", "href": href, "file": path })
            );
        } else {
            println!("live page fetched: {}", path.display());
        }
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        eprintln!("ALERT: {message}");
    }
}

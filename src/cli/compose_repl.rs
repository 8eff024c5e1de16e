//! `kagami compose` — interactive composition and search loop.
//!
//! Terminal counterpart of the mirror's keypad UI: pick an outer and an
//! inner key, a hit appends the composed unit to the pending query, then
//! submit and open result links by number.

use crate::cli::output;
use crate::config::MirrorConfig;
use crate::keypad::{self, composer::Composer};
use crate::resolver::PageResolver;
use crate::search::Searcher;
use crate::surface::ConsoleSurface;
use crate::transport::{self, http::HttpClient, TransportMode};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HELP: &str = "\
commands:
  outer <key>   select the outer key
  inner <key>   select the inner key (a hit composes immediately)
  type <text>   append raw text to the pending query
  del           delete the last character
  clear         reset the pending query
  keys [outer]  list outer keys, or one outer key's inner keys
  show          show pending query and selections
  search        submit the pending query
  open <n>      open result link n (local probe, then live fallback)
  help          this help
  quit          leave";

pub async fn run() -> Result<()> {
    let cfg = MirrorConfig::load()?;
    let host = cfg.mirror_host().unwrap_or_default();
    let mode = TransportMode::resolve(&host);
    let client = HttpClient::new(cfg.timeout_ms);

    // Table load is fire-and-forget relative to UI readiness on the live
    // site; here the prompt is cheap enough to just await it first.
    let table = keypad::load(&cfg, &client).await;
    match table {
        Some(t) => output::say(&format!(
            "key-map ready: {} outer keys ({} mode)",
            t.len(),
            mode.label()
        )),
        None => output::say("key-map unavailable; composition disabled, `type` still works"),
    }

    let search_transport = transport::build(mode, &cfg, &client);
    let open_transport = transport::build(mode, &cfg, &client);
    let mut searcher = Searcher::new(cfg.clone(), search_transport);
    let resolver = PageResolver::new(cfg, client.clone(), open_transport);
    let mut composer = Composer::new();
    let mut surface = ConsoleSurface::new(output::is_json());

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("kagami> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match cmd {
            "outer" if !arg.is_empty() => {
                composer.select_outer(arg);
                try_merge(&mut composer, table);
            }
            "inner" if !arg.is_empty() => {
                composer.select_inner(arg);
                try_merge(&mut composer, table);
            }
            "type" if !arg.is_empty() => {
                composer.append_text(arg);
                show(&composer);
            }
            "del" => composer.delete_last(),
            "clear" => composer.clear(),
            "keys" => list_keys(table, arg),
            "show" => show(&composer),
            "search" | "go" => {
                if composer.can_submit() {
                    searcher.submit(composer.pending(), &mut surface).await?;
                } else {
                    println!("pending query is empty");
                }
            }
            "open" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 && n <= searcher.links().len() => {
                    let href = searcher.links()[n - 1].href.clone();
                    resolver.open(&href, &mut surface).await?;
                }
                _ => println!("no such result link: {arg}"),
            },
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            _ => println!("unknown command (try `help`)"),
        }
    }
    Ok(())
}

fn try_merge(composer: &mut Composer, table: Option<&keypad::KeyMap>) {
    if let Some(unit) = composer.merge(table) {
        println!("composed: {unit}");
    }
    show(composer);
}

fn show(composer: &Composer) {
    let (outer, inner) = composer.selections();
    println!(
        "pending: {:?}  outer: {:?}  inner: {:?}  submit: {}",
        composer.pending(),
        outer,
        inner,
        if composer.can_submit() { "enabled" } else { "disabled" }
    );
}

fn list_keys(table: Option<&keypad::KeyMap>, outer: &str) {
    let Some(table) = table else {
        println!("key-map unavailable");
        return;
    };
    if outer.is_empty() {
        let mut keys: Vec<&str> = table.outer_keys().collect();
        keys.sort_unstable();
        println!("{}", keys.join(" "));
    } else {
        let mut keys: Vec<&str> = table.inner_keys(outer).collect();
        if keys.is_empty() {
            println!("unknown outer key: {outer}");
        } else {
            keys.sort_unstable();
            println!("{}", keys.join(" "));
        }
    }
}

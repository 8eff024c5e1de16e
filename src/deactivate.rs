//! Markup deactivation — rewrite live-site HTML for safe embedding in the mirror.
//!
//! An ordered sequence of four independent rewrites:
//! 1. absolute live-origin references become mirror-local paths;
//! 2. the live-only bundled script tag becomes an inert comment, attributes
//!    preserved verbatim for auditability;
//! 3. the cache-busting `?ver=` query is stripped from the local stylesheet;
//! 4. every result item gets an `is-loaded` class so mirror-side lazy
//!    loading never re-triggers.
//!
//! The function is total: markup matching none of the patterns passes
//! through unchanged, and applying it twice is the same as applying it once.

use crate::config::MirrorConfig;
use regex::Regex;

/// Compiled rewrite pipeline. Build once, apply to any number of pages.
pub struct Deactivator {
    live_origin_slash: String,
    mirror_prefix: String,
    script_re: Regex,
    css_ver_re: Regex,
    item_re: Regex,
    item_loaded: String,
}

impl Deactivator {
    /// Compile the pipeline from the deployment config.
    ///
    /// Config values are escaped before being spliced into patterns, so a
    /// dot in `app.bundle.js` matches literally.
    pub fn new(cfg: &MirrorConfig) -> Self {
        let script = regex::escape(&cfg.bundle_script);
        let css = regex::escape(&cfg.stylesheet);
        let item = regex::escape(&cfg.result_item_class);

        // The optional leading `<!-- ` group keeps the script rewrite
        // idempotent: an already-neutralized tag matches with the group
        // set and is left alone.
        let script_re = Regex::new(&format!(
            r"(<!--\s*)?<script([^>]*{script}[^>]*)></script>"
        ))
        .expect("script pattern");
        let css_ver_re =
            Regex::new(&format!(r#"({css})\?ver=[^"]*""#)).expect("stylesheet pattern");
        let item_re = Regex::new(&format!(r#"{item}">"#)).expect("result item pattern");

        Self {
            live_origin_slash: format!("{}/", cfg.live_origin),
            mirror_prefix: cfg.mirror_prefix.clone(),
            script_re,
            css_ver_re,
            item_re,
            item_loaded: format!("{} is-loaded\">", cfg.result_item_class),
        }
    }

    /// Apply the four rewrites in order and return the deactivated markup.
    pub fn transform(&self, raw: &str) -> String {
        // 1. Live origin -> mirror path prefix
        let html = raw.replace(&self.live_origin_slash, &self.mirror_prefix);

        // 2. Bundled script tag -> inert comment (skip if already inert)
        let html = self
            .script_re
            .replace_all(&html, |caps: &regex::Captures| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    format!("<!-- <script{}></script> -->", &caps[2])
                }
            })
            .into_owned();

        // 3. Strip ?ver= cache-buster from the stylesheet reference
        let html = self.css_ver_re.replace_all(&html, "${1}\"").into_owned();

        // 4. Mark result items as already loaded
        self.item_re
            .replace_all(&html, self.item_loaded.as_str())
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deactivator() -> Deactivator {
        let cfg = MirrorConfig {
            live_origin: "https://live.test".to_string(),
            mirror_prefix: "/snapshot/".to_string(),
            ..Default::default()
        };
        Deactivator::new(&cfg)
    }

    const SAMPLE: &str = concat!(
        r#"<html><head>"#,
        r#"<link rel="stylesheet" href="/assets/css/app.css?ver=1.2.3">"#,
        r#"<script src="https://live.test/assets/js/app.bundle.js" defer></script>"#,
        r#"</head><body>"#,
        r#"<a href="https://live.test/articles/42/">x</a>"#,
        r#"<li class="p-result__item"><a class="p-result__link" href="/a/">a</a></li>"#,
        r#"</body></html>"#,
    );

    #[test]
    fn rewrites_live_origin_to_mirror_prefix() {
        let out = deactivator().transform(SAMPLE);
        assert!(out.contains(r#"href="/snapshot/articles/42/""#));
        assert!(!out.contains("https://live.test/"));
    }

    #[test]
    fn neutralizes_bundle_script_preserving_attributes() {
        let out = deactivator().transform(SAMPLE);
        assert!(out.contains(r#"<!-- <script src="/snapshot/assets/js/app.bundle.js" defer></script> -->"#));
    }

    #[test]
    fn strips_stylesheet_cache_buster() {
        let out = deactivator().transform(SAMPLE);
        assert!(out.contains(r#"app.css""#));
        assert!(!out.contains("?ver="));
    }

    #[test]
    fn marks_result_items_loaded() {
        let out = deactivator().transform(SAMPLE);
        assert!(out.contains(r#"class="p-result__item is-loaded">"#));
    }

    #[test]
    fn transform_is_idempotent() {
        let d = deactivator();
        let once = d.transform(SAMPLE);
        let twice = d.transform(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn identity_on_unrelated_markup() {
        let d = deactivator();
        let plain = "<html><body><p>nothing to rewrite here</p></body></html>";
        assert_eq!(d.transform(plain), plain);
    }

    #[test]
    fn leaves_other_scripts_alone() {
        let d = deactivator();
        let html = r#"<script src="/assets/js/vendor.js"></script>"#;
        assert_eq!(d.transform(html), html);
    }
}

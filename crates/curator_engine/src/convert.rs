use std::sync::LazyLock;

use curator_core::NormalizedContent;
use ego_tree::NodeId;
use regex::{Captures, Regex};
use scraper::node::Node;
use scraper::Html;
use url::Url;

use crate::locate::ContentRegion;

/// Elements removed together with everything inside them before conversion.
const STRIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "iframe", "noscript", "template",
    "head",
];

/// Target of a Markdown link or image: `](target`.
static LINK_TARGET: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\]\(([^)\s]+)"));

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str, base_url: Option<&Url>) -> String;

    fn convert(&self, region: &ContentRegion<'_>, base_url: Option<&Url>) -> NormalizedContent {
        NormalizedContent::Markdown(self.to_markdown(region.html, base_url))
    }
}

/// `html2md` with page chrome removed up front, ATX headings and
/// link targets resolved against the page URL.
///
/// Malformed markup is parsed leniently; the result is best effort and
/// identical input always yields identical output.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn to_markdown(&self, html: &str, base_url: Option<&Url>) -> String {
        let cleaned = strip_chrome(html);
        let markdown = atx_headings(&html2md::parse_html(&cleaned));
        let markdown = match base_url {
            Some(base) => resolve_links(&markdown, base),
            None => markdown,
        };
        markdown.trim().to_string()
    }
}

fn strip_chrome(html: &str) -> String {
    let mut document = Html::parse_document(html);
    let doomed: Vec<NodeId> = document
        .tree
        .nodes()
        .filter(|node| match node.value() {
            Node::Element(element) => STRIPPED_ELEMENTS
                .iter()
                .any(|name| element.name().eq_ignore_ascii_case(name)),
            _ => false,
        })
        .map(|node| node.id())
        .collect();
    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    document.root_element().html()
}

/// Rewrites `Title\n=====` / `Title\n-----` underlines as `#` / `##`
/// headings. Fenced code is left alone.
fn atx_headings(markdown: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut lines = markdown.lines().peekable();
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }
        if !in_fence && !line.trim().is_empty() {
            if let Some(level) = lines.peek().and_then(|next| setext_level(next)) {
                out.push(format!("{} {}", "#".repeat(level), line.trim()));
                lines.next();
                continue;
            }
        }
        out.push(line.to_string());
    }
    out.join("\n")
}

fn setext_level(line: &str) -> Option<usize> {
    let underline = line.trim_end();
    if underline.len() < 3 {
        return None;
    }
    if underline.chars().all(|c| c == '=') {
        Some(1)
    } else if underline.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

fn resolve_links(markdown: &str, base: &Url) -> String {
    let Ok(link_re) = LINK_TARGET.as_ref() else {
        return markdown.to_string();
    };
    link_re
        .replace_all(markdown, |caps: &Captures<'_>| {
            let target = &caps[1];
            let resolved = resolve_url(target, base).unwrap_or_else(|| target.to_string());
            format!("]({resolved})")
        })
        .into_owned()
}

/// Absolute form of a relative reference. Absolute URLs, fragments and
/// `javascript:` targets give `None` and are kept as written.
fn resolve_url(reference: &str, base: &Url) -> Option<String> {
    let lower = reference.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || Url::parse(reference).is_ok()
    {
        return None;
    }
    base.join(reference).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setext_underlines_become_hashes_outside_fences() {
        let md = "Title\n==========\n\nSub\n----------\n\n```\nkey\n---\n```";
        assert_eq!(atx_headings(md), "# Title\n\n## Sub\n\n```\nkey\n---\n```");
    }

    #[test]
    fn resolve_url_handles_fragments_and_relative_paths() {
        let base = Url::parse("https://example.com/blog/post").unwrap();
        assert_eq!(resolve_url("#top", &base), None);
        assert_eq!(resolve_url("javascript:void(0)", &base), None);
        assert_eq!(resolve_url("https://other.example/x", &base), None);
        assert_eq!(
            resolve_url("../about", &base),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn link_targets_are_rewritten_in_place() {
        let base = Url::parse("https://example.com/blog/").unwrap();
        assert_eq!(
            resolve_links("[a](/docs) and ![i](pic.png) and [t](#top)", &base),
            "[a](https://example.com/docs) and ![i](https://example.com/blog/pic.png) and [t](#top)"
        );
    }

    #[test]
    fn stripped_elements_leave_the_tree() {
        let html =
            strip_chrome("<body><nav><p>menu</p></nav><p>kept</p><script>x()</script></body>");
        assert!(html.contains("kept"));
        assert!(!html.contains("menu"));
        assert!(!html.contains("x()"));
    }
}

use std::sync::LazyLock;

use regex::Regex;

/// Any opening or closing tag: `(/?)`, name, raw attribute text.
static TAG: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)\b([^>]*)>"));

static ATTRIBUTE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)(class|id)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
});

/// Class/id keywords that commonly mark an article body, most specific first.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        attribute: "class",
        keywords: &[
            "post-content",
            "article-content",
            "entry-content",
            "content-body",
            "story-body",
        ],
    },
    KeywordRule {
        attribute: "id",
        keywords: &["content", "article", "post", "main"],
    },
];

/// Elements eligible for the class/id keyword heuristic.
const KEYWORD_CONTAINERS: &[&str] = &["div", "section"];

struct KeywordRule {
    attribute: &'static str,
    keywords: &'static [&'static str],
}

/// Which heuristic produced a `ContentRegion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    Article,
    Main,
    Keyword {
        attribute: &'static str,
        keyword: &'static str,
    },
    Body,
    WholeDocument,
}

/// A slice of the input document holding its main content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRegion<'a> {
    pub html: &'a str,
    pub strategy: LocateStrategy,
}

pub trait Locator: Send + Sync {
    fn locate<'a>(&self, html: &'a str) -> ContentRegion<'a>;
}

/// Ordered, first-match-wins search for the main content of a page:
/// `<article>`, then `<main>`, then class/id keywords, then `<body>`, then the
/// whole input. Every step scans the entire document, so a later `<article>`
/// still beats an earlier `<main>`. Matching is case-insensitive and nested
/// elements of the same name are balanced.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicLocator;

impl Locator for HeuristicLocator {
    fn locate<'a>(&self, html: &'a str) -> ContentRegion<'a> {
        let whole = ContentRegion {
            html,
            strategy: LocateStrategy::WholeDocument,
        };
        let (Ok(tag_re), Ok(attr_re)) = (TAG.as_ref(), ATTRIBUTE.as_ref()) else {
            return whole;
        };
        let tokens = tokenize(html, tag_re);

        if let Some(region) = first_element(html, &tokens, |t| t.is_named("article")) {
            return ContentRegion {
                html: region,
                strategy: LocateStrategy::Article,
            };
        }
        if let Some(region) = first_element(html, &tokens, |t| t.is_named("main")) {
            return ContentRegion {
                html: region,
                strategy: LocateStrategy::Main,
            };
        }
        for rule in KEYWORD_RULES {
            let mut matched = None;
            let found = first_element(html, &tokens, |t| {
                if !KEYWORD_CONTAINERS.iter().any(|name| t.is_named(name)) {
                    return false;
                }
                matched = keyword_in(t.attrs, rule, attr_re);
                matched.is_some()
            });
            if let (Some(region), Some(keyword)) = (found, matched) {
                return ContentRegion {
                    html: region,
                    strategy: LocateStrategy::Keyword {
                        attribute: rule.attribute,
                        keyword,
                    },
                };
            }
        }
        if let Some(region) = first_element(html, &tokens, |t| t.is_named("body")) {
            return ContentRegion {
                html: region,
                strategy: LocateStrategy::Body,
            };
        }
        whole
    }
}

struct TagToken<'a> {
    start: usize,
    end: usize,
    closing: bool,
    self_closing: bool,
    name: &'a str,
    attrs: &'a str,
}

impl TagToken<'_> {
    fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    fn opens(&self) -> bool {
        !self.closing && !self.self_closing
    }
}

fn tokenize<'a>(html: &'a str, tag_re: &Regex) -> Vec<TagToken<'a>> {
    tag_re
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            Some(TagToken {
                start: whole.start(),
                end: whole.end(),
                closing: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
                self_closing: attrs.trim_end().ends_with('/'),
                name: caps.get(2)?.as_str(),
                attrs,
            })
        })
        .collect()
}

/// The first candidate element, opening tag through its balanced closing tag.
/// Candidates that never close are skipped.
fn first_element<'a>(
    html: &'a str,
    tokens: &[TagToken<'_>],
    mut is_candidate: impl FnMut(&TagToken<'_>) -> bool,
) -> Option<&'a str> {
    tokens.iter().enumerate().find_map(|(idx, open)| {
        if !open.opens() || !is_candidate(open) {
            return None;
        }
        let end = matching_close(&tokens[idx + 1..], open.name)?;
        html.get(open.start..end)
    })
}

fn matching_close(rest: &[TagToken<'_>], name: &str) -> Option<usize> {
    let mut depth = 1usize;
    for token in rest.iter().filter(|t| t.is_named(name) && !t.self_closing) {
        if token.closing {
            depth -= 1;
            if depth == 0 {
                return Some(token.end);
            }
        } else {
            depth += 1;
        }
    }
    None
}

fn keyword_in(attrs: &str, rule: &KeywordRule, attr_re: &Regex) -> Option<&'static str> {
    attr_re
        .captures_iter(attrs)
        .filter(|caps| {
            caps.get(1)
                .is_some_and(|name| name.as_str().eq_ignore_ascii_case(rule.attribute))
        })
        .find_map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))?
                .as_str()
                .to_ascii_lowercase();
            rule.keywords
                .iter()
                .copied()
                .find(|keyword| value.contains(keyword))
        })
}

//! Table of contents built from a page's markdown headings.
//!
//! Level 2 headings are the entries; level 3 headings nest under the level 2
//! heading before them. Level 1 is the page title and is left out.

use std::collections::HashMap;

use serde::Serialize;

/// Deepest heading level that appears in the table of contents.
pub const TOC_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocLink {
    /// Anchor id, unique within the page.
    pub id: String,
    pub depth: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocLink>,
}

/// Collects `##` and `###` headings outside fenced code blocks.
pub fn extract_toc(body: &str) -> Vec<TocLink> {
    let mut links: Vec<TocLink> = Vec::new();
    let mut ids = HashMap::new();
    let mut fence: Option<&str> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if trimmed.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }

        let Some((depth, text)) = heading(trimmed) else {
            continue;
        };
        if !(2..=TOC_DEPTH).contains(&depth) {
            continue;
        }
        let link = TocLink {
            id: unique_id(&mut ids, &anchor_id(text)),
            depth,
            text: text.to_string(),
            children: Vec::new(),
        };
        match links.last_mut() {
            Some(parent) if depth > parent.depth => parent.children.push(link),
            _ => links.push(link),
        }
    }

    links
}

/// ATX heading level and text; `#hashtag` without a space is not a heading.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(|c: char| c == ' ' || c == '\t') {
        return None;
    }
    // optional closing sequence: `## Title ##`
    let text = rest.trim().trim_end_matches('#').trim_end();
    (!text.is_empty()).then_some((level, text))
}

/// Lowercase, punctuation dropped, whitespace as `-`.
fn anchor_id(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

/// Repeated anchors get `-1`, `-2`, ... suffixes.
fn unique_id(seen: &mut HashMap<String, usize>, base: &str) -> String {
    let count = seen.entry(base.to_string()).or_insert(0);
    let id = if *count == 0 {
        base.to_string()
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    id
}

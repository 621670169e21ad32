//! # Font Resolver
//!
//! Makes sure every font the body asks for can actually be loaded. Body
//! nodes are scanned for `font-family`, web-safe families are skipped, and a
//! `mj-font` declaration is synthesized for anything the author has not
//! declared by hand.
//!
//! Font names are compared case-insensitively everywhere (manual, baseline
//! and discovered), while discovery itself deduplicates on the exact
//! extracted spelling.

use crate::compiler::effective_attributes;
use mailclip_document::{Attributes, ComponentType, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Weights requested for every hosted font
pub const FONT_WEIGHTS: [u16; 4] = [300, 400, 500, 700];

const GOOGLE_FONTS_BASE: &str = "https://fonts.googleapis.com/css2";

/// Web-safe families every mail client can render without a download.
/// Stored lower-cased.
const SYSTEM_FONTS: &[&str] = &[
    "arial",
    "helvetica",
    "helvetica neue",
    "verdana",
    "tahoma",
    "trebuchet ms",
    "times new roman",
    "georgia",
    "garamond",
    "courier new",
    "courier",
    "palatino",
    "book antiqua",
    "impact",
    "comic sans ms",
    "lucida sans",
    "lucida grande",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "fantasy",
];

/// A web-font declaration destined for the document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDeclaration {
    pub name: String,
    pub href: String,
}

impl FontDeclaration {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }

    /// Declaration pointing at the hosted stylesheet for `name`
    pub fn google(name: &str) -> Self {
        Self::new(name, google_fonts_url(name))
    }

    /// `mj-font` node carrying this declaration
    pub fn to_node(&self) -> Node {
        let attributes: Attributes = [("name", self.name.as_str()), ("href", self.href.as_str())]
            .into_iter()
            .collect();

        Node {
            attributes,
            ..Node::new(format!("font-{}", self.name), ComponentType::Font)
        }
    }
}

/// Fonts injected into every document unless declared by hand
pub fn baseline_fonts() -> Vec<FontDeclaration> {
    vec![FontDeclaration::google("Inter")]
}

/// Stylesheet URL for a hosted font. Spaces become `+`.
pub fn google_fonts_url(name: &str) -> String {
    let weights = FONT_WEIGHTS
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(";");

    format!(
        "{}?family={}:wght@{}&display=swap",
        GOOGLE_FONTS_BASE,
        name.replace(' ', "+"),
        weights
    )
}

pub fn is_system_font(name: &str) -> bool {
    SYSTEM_FONTS.contains(&name.to_lowercase().as_str())
}

/// First family in a `font-family` list, with surrounding whitespace and one
/// layer of matching quotes removed. `None` for blank values.
pub fn primary_font_name(font_family: &str) -> Option<String> {
    let first = font_family.split(',').next()?.trim();
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|quote| first.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(first);

    (!unquoted.is_empty()).then(|| unquoted.to_string())
}

/// Distinct primary font names used anywhere in `nodes`, in order of first
/// appearance during a depth-first walk.
///
/// Registry defaults count as usage, since they are emitted like any other
/// attribute.
pub fn collect_fonts(nodes: &[Node]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut fonts = Vec::new();

    for root in nodes {
        root.walk(&mut |node| {
            let attrs = effective_attributes(node);
            if let Some(name) = attrs.get("font-family").and_then(primary_font_name) {
                if seen.insert(name.clone()) {
                    fonts.push(name);
                }
            }
        });
    }

    fonts
}

/// Names declared by top-level `mj-font` nodes, lower-cased
fn declared_font_names(head: &[Node]) -> HashSet<String> {
    head.iter()
        .filter(|node| node.component_type == ComponentType::Font)
        .filter_map(|node| node.attributes.get("name"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Declarations to append after the manual head nodes: missing baseline
/// fonts first, then hosted fonts discovered in `body`.
pub fn resolve_font_declarations(
    head: &[Node],
    body: &[Node],
    baseline: &[FontDeclaration],
) -> Vec<FontDeclaration> {
    let mut declared = declared_font_names(head);
    let mut injected = Vec::new();

    for font in baseline {
        if declared.insert(font.name.to_lowercase()) {
            debug!(font = %font.name, "Injecting baseline font");
            injected.push(font.clone());
        }
    }

    for name in collect_fonts(body) {
        if is_system_font(&name) {
            continue;
        }
        if declared.insert(name.to_lowercase()) {
            debug!(font = %name, "Injecting discovered font");
            injected.push(FontDeclaration::google(&name));
        }
    }

    injected
}

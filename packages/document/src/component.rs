use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component kinds understood by the registry.
///
/// Serialized as the markup tag name (`"mj-section"`, `"mj-text"`, ...).
/// Tag names the registry does not know are kept verbatim in `Other` so a
/// tree coming from a newer editor still round-trips and renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    // Head
    Style,
    Font,
    Preview,
    Title,
    Breakpoint,
    Attributes,
    HtmlAttributes,

    // Layout
    Section,
    Column,
    Wrapper,
    Group,
    Hero,

    // Content
    Text,
    Button,
    Image,
    Divider,
    Spacer,
    Table,
    Raw,

    // Interactive
    Navbar,
    NavbarLink,
    Social,
    SocialElement,
    Accordion,
    AccordionElement,
    AccordionTitle,
    AccordionText,
    Carousel,
    CarouselImage,

    Other(String),
}

impl ComponentType {
    /// Every registered kind, in registry order
    pub const KNOWN: [ComponentType; 29] = [
        ComponentType::Style,
        ComponentType::Font,
        ComponentType::Preview,
        ComponentType::Title,
        ComponentType::Breakpoint,
        ComponentType::Attributes,
        ComponentType::HtmlAttributes,
        ComponentType::Section,
        ComponentType::Column,
        ComponentType::Wrapper,
        ComponentType::Group,
        ComponentType::Hero,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Divider,
        ComponentType::Spacer,
        ComponentType::Table,
        ComponentType::Raw,
        ComponentType::Navbar,
        ComponentType::NavbarLink,
        ComponentType::Social,
        ComponentType::SocialElement,
        ComponentType::Accordion,
        ComponentType::AccordionElement,
        ComponentType::AccordionTitle,
        ComponentType::AccordionText,
        ComponentType::Carousel,
        ComponentType::CarouselImage,
    ];

    /// Markup tag name
    pub fn tag(&self) -> &str {
        match self {
            ComponentType::Style => "mj-style",
            ComponentType::Font => "mj-font",
            ComponentType::Preview => "mj-preview",
            ComponentType::Title => "mj-title",
            ComponentType::Breakpoint => "mj-breakpoint",
            ComponentType::Attributes => "mj-attributes",
            ComponentType::HtmlAttributes => "mj-html-attributes",
            ComponentType::Section => "mj-section",
            ComponentType::Column => "mj-column",
            ComponentType::Wrapper => "mj-wrapper",
            ComponentType::Group => "mj-group",
            ComponentType::Hero => "mj-hero",
            ComponentType::Text => "mj-text",
            ComponentType::Button => "mj-button",
            ComponentType::Image => "mj-image",
            ComponentType::Divider => "mj-divider",
            ComponentType::Spacer => "mj-spacer",
            ComponentType::Table => "mj-table",
            ComponentType::Raw => "mj-raw",
            ComponentType::Navbar => "mj-navbar",
            ComponentType::NavbarLink => "mj-navbar-link",
            ComponentType::Social => "mj-social",
            ComponentType::SocialElement => "mj-social-element",
            ComponentType::Accordion => "mj-accordion",
            ComponentType::AccordionElement => "mj-accordion-element",
            ComponentType::AccordionTitle => "mj-accordion-title",
            ComponentType::AccordionText => "mj-accordion-text",
            ComponentType::Carousel => "mj-carousel",
            ComponentType::CarouselImage => "mj-carousel-image",
            ComponentType::Other(tag) => tag,
        }
    }

    /// Whether the tag is registered, including `Other` spelling a known tag
    pub fn is_known(&self) -> bool {
        match self {
            ComponentType::Other(tag) => ComponentType::KNOWN.iter().any(|known| known.tag() == tag),
            _ => true,
        }
    }
}

impl From<&str> for ComponentType {
    fn from(tag: &str) -> Self {
        ComponentType::KNOWN
            .iter()
            .find(|known| known.tag() == tag)
            .cloned()
            .unwrap_or_else(|| ComponentType::Other(tag.to_string()))
    }
}

impl From<String> for ComponentType {
    fn from(tag: String) -> Self {
        match ComponentType::from(tag.as_str()) {
            ComponentType::Other(_) => ComponentType::Other(tag),
            known => known,
        }
    }
}

impl From<ComponentType> for String {
    fn from(ty: ComponentType) -> Self {
        match ty {
            ComponentType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl FromStr for ComponentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ComponentType::from(s))
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

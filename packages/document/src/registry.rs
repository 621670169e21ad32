//! # Component Registry
//!
//! Static catalog of every component kind the editor can place. The table is
//! const-initialised and never mutated, so it can be read from any thread.
//!
//! The serializer only cares about `default_attrs`, `default_content`,
//! `is_container`, `is_self_closing` and `section`. `group` and `label` feed
//! the editor palette.

use crate::component::ComponentType;
use crate::node::Attributes;

/// Document section a component type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Body,
}

/// Palette grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentGroup {
    Head,
    Layout,
    Content,
    Interactive,
}

/// Registry entry for one component type
#[derive(Debug)]
pub struct ComponentDefinition {
    pub component_type: ComponentType,
    pub default_attrs: &'static [(&'static str, &'static str)],
    pub default_content: Option<&'static str>,
    pub is_container: bool,
    pub is_self_closing: bool,
    pub section: Section,
    pub group: ComponentGroup,
    pub label: &'static str,
}

impl ComponentDefinition {
    /// Owned copy of the default attributes, in declaration order
    pub fn default_attributes(&self) -> Attributes {
        self.default_attrs.iter().copied().collect()
    }
}

const fn head(
    component_type: ComponentType,
    label: &'static str,
    default_attrs: &'static [(&'static str, &'static str)],
    default_content: Option<&'static str>,
    is_self_closing: bool,
) -> ComponentDefinition {
    ComponentDefinition {
        component_type,
        default_attrs,
        default_content,
        is_container: false,
        is_self_closing,
        section: Section::Head,
        group: ComponentGroup::Head,
        label,
    }
}

const fn container(
    component_type: ComponentType,
    group: ComponentGroup,
    label: &'static str,
    default_attrs: &'static [(&'static str, &'static str)],
) -> ComponentDefinition {
    ComponentDefinition {
        component_type,
        default_attrs,
        default_content: None,
        is_container: true,
        is_self_closing: false,
        section: Section::Body,
        group,
        label,
    }
}

const fn leaf(
    component_type: ComponentType,
    group: ComponentGroup,
    label: &'static str,
    default_attrs: &'static [(&'static str, &'static str)],
    default_content: Option<&'static str>,
) -> ComponentDefinition {
    ComponentDefinition {
        component_type,
        default_attrs,
        default_content,
        is_container: false,
        is_self_closing: false,
        section: Section::Body,
        group,
        label,
    }
}

const fn void(
    component_type: ComponentType,
    group: ComponentGroup,
    label: &'static str,
    default_attrs: &'static [(&'static str, &'static str)],
) -> ComponentDefinition {
    ComponentDefinition {
        component_type,
        default_attrs,
        default_content: None,
        is_container: false,
        is_self_closing: true,
        section: Section::Body,
        group,
        label,
    }
}

use ComponentGroup::{Content, Interactive, Layout};

static REGISTRY: [ComponentDefinition; 29] = [
    // Head
    head(ComponentType::Style, "Style", &[("inline", "")], Some(""), false),
    head(ComponentType::Font, "Font", &[("name", ""), ("href", "")], None, true),
    head(ComponentType::Preview, "Preview Text", &[], Some(""), false),
    head(ComponentType::Title, "Title", &[], Some(""), false),
    head(ComponentType::Breakpoint, "Breakpoint", &[("width", "480px")], None, true),
    head(ComponentType::Attributes, "Attribute Defaults", &[], Some(""), false),
    head(ComponentType::HtmlAttributes, "HTML Attributes", &[], None, true),
    // Layout
    container(
        ComponentType::Section,
        Layout,
        "Section",
        &[
            ("background-color", ""),
            ("background-url", ""),
            ("padding", "20px 0"),
            ("text-align", "center"),
            ("full-width", ""),
        ],
    ),
    container(
        ComponentType::Column,
        Layout,
        "Column",
        &[
            ("width", ""),
            ("background-color", ""),
            ("padding", ""),
            ("vertical-align", "top"),
        ],
    ),
    container(
        ComponentType::Wrapper,
        Layout,
        "Wrapper",
        &[("background-color", ""), ("padding", "20px 0"), ("full-width", "")],
    ),
    container(
        ComponentType::Group,
        Layout,
        "Group",
        &[("width", "100%"), ("vertical-align", "top"), ("direction", "ltr")],
    ),
    container(
        ComponentType::Hero,
        Layout,
        "Hero",
        &[
            ("mode", "fixed-height"),
            ("height", "400px"),
            ("background-url", ""),
            ("background-color", "#ffffff"),
            ("background-position", "center center"),
            ("padding", "40px 0"),
            ("vertical-align", "middle"),
        ],
    ),
    // Content
    leaf(
        ComponentType::Text,
        Content,
        "Text",
        &[
            ("font-family", "Inter, Arial, sans-serif"),
            ("font-size", "14px"),
            ("line-height", "1.5"),
            ("color", "#000000"),
            ("align", "left"),
            ("padding", "10px 25px"),
        ],
        Some("Write something here"),
    ),
    leaf(
        ComponentType::Button,
        Content,
        "Button",
        &[
            ("href", "#"),
            ("font-family", "Inter, Arial, sans-serif"),
            ("font-size", "14px"),
            ("background-color", "#414141"),
            ("color", "#ffffff"),
            ("border-radius", "4px"),
            ("inner-padding", "10px 25px"),
            ("align", "center"),
        ],
        Some("Click me"),
    ),
    void(
        ComponentType::Image,
        Content,
        "Image",
        &[("src", ""), ("alt", ""), ("href", ""), ("width", ""), ("padding", "10px 25px")],
    ),
    void(
        ComponentType::Divider,
        Content,
        "Divider",
        &[
            ("border-color", "#000000"),
            ("border-style", "solid"),
            ("border-width", "4px"),
            ("padding", "10px 25px"),
        ],
    ),
    void(ComponentType::Spacer, Content, "Spacer", &[("height", "20px")]),
    leaf(
        ComponentType::Table,
        Content,
        "Table",
        &[
            ("font-family", "Inter, Arial, sans-serif"),
            ("font-size", "13px"),
            ("color", "#000000"),
            ("width", "100%"),
            ("padding", "10px 25px"),
        ],
        Some("<tr><td>Cell</td></tr>"),
    ),
    leaf(ComponentType::Raw, Content, "Raw HTML", &[], Some("")),
    // Interactive
    container(
        ComponentType::Navbar,
        Interactive,
        "Navbar",
        &[("align", "center"), ("hamburger", "")],
    ),
    leaf(
        ComponentType::NavbarLink,
        Interactive,
        "Navbar Link",
        &[
            ("href", "#"),
            ("font-family", "Inter, Arial, sans-serif"),
            ("color", "#000000"),
            ("padding", "15px 10px"),
        ],
        Some("Link"),
    ),
    container(
        ComponentType::Social,
        Interactive,
        "Social",
        &[("mode", "horizontal"), ("align", "center"), ("icon-size", "20px")],
    ),
    leaf(
        ComponentType::SocialElement,
        Interactive,
        "Social Link",
        &[("name", "facebook"), ("href", "#")],
        Some(""),
    ),
    container(
        ComponentType::Accordion,
        Interactive,
        "Accordion",
        &[("border", "2px solid black"), ("font-family", "Inter, Arial, sans-serif")],
    ),
    container(ComponentType::AccordionElement, Interactive, "Accordion Item", &[]),
    leaf(
        ComponentType::AccordionTitle,
        Interactive,
        "Accordion Title",
        &[("padding", "16px")],
        Some("Title"),
    ),
    leaf(
        ComponentType::AccordionText,
        Interactive,
        "Accordion Text",
        &[("padding", "16px")],
        Some("Details"),
    ),
    container(
        ComponentType::Carousel,
        Interactive,
        "Carousel",
        &[("align", "center"), ("thumbnails", "visible")],
    ),
    void(
        ComponentType::CarouselImage,
        Interactive,
        "Carousel Image",
        &[("src", ""), ("alt", ""), ("href", "")],
    ),
];

/// Find the definition for a type. Unregistered types return `None`.
///
/// Matching is by tag, so `Other("mj-image")` resolves like `Image`.
pub fn lookup(component_type: &ComponentType) -> Option<&'static ComponentDefinition> {
    let tag = component_type.tag();
    REGISTRY
        .iter()
        .find(|def| def.component_type.tag() == tag)
}

/// All registered definitions, in palette order
pub fn definitions() -> &'static [ComponentDefinition] {
    &REGISTRY
}

/// Whether the type belongs in the document head
pub fn is_head_type(component_type: &ComponentType) -> bool {
    lookup(component_type).is_some_and(|def| def.section == Section::Head)
}

/// Whether the type renders as a single empty-element tag
pub fn is_self_closing(component_type: &ComponentType) -> bool {
    lookup(component_type).is_some_and(|def| def.is_self_closing)
}

pub fn is_container(component_type: &ComponentType) -> bool {
    lookup(component_type).is_some_and(|def| def.is_container)
}

/// Registry defaults for a type; empty for unregistered types
pub fn default_attributes(component_type: &ComponentType) -> Attributes {
    lookup(component_type)
        .map(ComponentDefinition::default_attributes)
        .unwrap_or_default()
}

use crate::fonts::{baseline_fonts, resolve_font_declarations, FontDeclaration};
use mailclip_document::{registry, Attributes, Node};
use tracing::{debug, instrument};

const ROOT_TAG: &str = "mjml";
const HEAD_TAG: &str = "mj-head";
const BODY_TAG: &str = "mj-body";

/// Options for markup serialization
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Indentation added per nesting level
    pub indent: String,
    /// Fonts declared in every document unless the author declares them
    pub baseline_fonts: Vec<FontDeclaration>,
    /// Attributes placed on the `mj-body` wrapper
    pub body_attributes: Attributes,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            baseline_fonts: baseline_fonts(),
            body_attributes: Attributes::new(),
        }
    }
}

struct Context<'a> {
    options: &'a SerializeOptions,
}

impl<'a> Context<'a> {
    fn pad(&self, depth: usize) -> String {
        self.options.indent.repeat(depth)
    }

    fn render_node(&self, node: &Node, depth: usize) -> String {
        let pad = self.pad(depth);
        let tag = node.component_type.tag();
        let attrs = format_attributes(&emitted_attributes(node));

        if registry::is_self_closing(&node.component_type) {
            return format!("{}<{}{} />", pad, tag, attrs);
        }

        let content = node.content.as_deref().unwrap_or("");
        let children: Vec<String> = node
            .children()
            .iter()
            .map(|child| self.render_node(child, depth + 1))
            .collect();

        // A child block is always laid out over several lines
        if children.is_empty() && !content.contains('\n') {
            // Also covers the empty case: `<tag></tag>`
            return format!("{}<{}{}>{}</{}>", pad, tag, attrs, content, tag);
        }

        let mut inner = Vec::new();
        if !content.is_empty() {
            let child_pad = self.pad(depth + 1);
            // Only `\n` splits lines; every segment is kept byte-for-byte
            inner.extend(content.split('\n').map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", child_pad, line)
                }
            }));
        }
        inner.extend(children);

        format!("{}<{}{}>\n{}\n{}</{}>", pad, tag, attrs, inner.join("\n"), pad, tag)
    }

    fn render_wrapper(&self, tag: &str, attributes: &Attributes, lines: &[String], depth: usize) -> String {
        let pad = self.pad(depth);
        let attrs = format_attributes(&without_blank_values(attributes));

        if lines.is_empty() {
            format!("{}<{}{}></{}>", pad, tag, attrs, tag)
        } else {
            format!("{}<{}{}>\n{}\n{}</{}>", pad, tag, attrs, lines.join("\n"), pad, tag)
        }
    }
}

/// Serialize a layout tree to markup with default options
pub fn serialize(nodes: &[Node]) -> String {
    serialize_with_options(nodes, &SerializeOptions::default())
}

/// Serialize a layout tree to markup.
///
/// Hidden subtrees are dropped, head-type nodes are gathered into `mj-head`
/// followed by any font declarations the body needs, and everything else is
/// rendered inside `mj-body`. The input is never modified and the output is
/// byte-identical for identical input.
#[instrument(skip_all, fields(roots = nodes.len()))]
pub fn serialize_with_options(nodes: &[Node], options: &SerializeOptions) -> String {
    let ctx = Context { options };

    let (head, body) = partition(strip_hidden(nodes));
    let fonts = resolve_font_declarations(&head, &body, &options.baseline_fonts);

    let mut head_lines: Vec<String> = head.iter().map(|node| ctx.render_node(node, 2)).collect();
    head_lines.extend(fonts.iter().map(|font| ctx.render_node(&font.to_node(), 2)));

    let body_lines: Vec<String> = body.iter().map(|node| ctx.render_node(node, 2)).collect();

    let mut sections = Vec::with_capacity(2);
    if !head_lines.is_empty() {
        sections.push(ctx.render_wrapper(HEAD_TAG, &Attributes::new(), &head_lines, 1));
    }
    sections.push(ctx.render_wrapper(BODY_TAG, &options.body_attributes, &body_lines, 1));

    debug!(
        head_nodes = head.len(),
        injected_fonts = fonts.len(),
        body_nodes = body.len(),
        "Serialized document"
    );

    format!("<{}>\n{}\n</{}>\n", ROOT_TAG, sections.join("\n"), ROOT_TAG)
}

/// Copy of the tree without hidden nodes. A hidden node takes its whole
/// subtree with it.
pub fn strip_hidden(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .filter(|node| !node.is_hidden())
        .map(|node| Node {
            children: node.children.as_deref().map(strip_hidden),
            ..node.clone()
        })
        .collect()
}

/// Split nodes into head and body by type.
///
/// Head-type nodes found below the top level are lifted out of their parent
/// into the head, keeping document order.
pub fn partition(nodes: Vec<Node>) -> (Vec<Node>, Vec<Node>) {
    let mut head = Vec::new();
    let mut body = Vec::new();
    for node in nodes {
        split_node(node, &mut head, &mut body);
    }
    (head, body)
}

fn split_node(mut node: Node, head: &mut Vec<Node>, out: &mut Vec<Node>) {
    if registry::is_head_type(&node.component_type) {
        head.push(node);
        return;
    }

    if let Some(children) = node.children.take() {
        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            split_node(child, head, &mut kept);
        }
        node.children = Some(kept);
    }
    out.push(node);
}

/// Registry defaults overlaid with the node's own attributes
pub fn effective_attributes(node: &Node) -> Attributes {
    registry::default_attributes(&node.component_type).merged_with(&node.attributes)
}

/// Effective attributes minus blank values: what actually gets emitted
pub fn emitted_attributes(node: &Node) -> Attributes {
    without_blank_values(&effective_attributes(node))
}

fn without_blank_values(attributes: &Attributes) -> Attributes {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

fn format_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, value))
        .collect()
}

/// Render one node (and its subtree) at the given nesting depth
pub fn render_node(node: &Node, depth: usize, options: &SerializeOptions) -> String {
    Context { options }.render_node(node, depth)
}

//! # Mailclip MJML compiler
//!
//! Turns a layout tree into MJML markup. The output is handed to an external
//! MJML-to-HTML compiler, so this crate only guarantees well-formed,
//! deterministic markup; escaping is left to that compiler.

pub mod compiler;
pub mod fonts;


pub use compiler::{
    effective_attributes, emitted_attributes, partition, render_node, serialize,
    serialize_with_options, strip_hidden, SerializeOptions,
};
pub use fonts::{
    baseline_fonts, collect_fonts, google_fonts_url, is_system_font, primary_font_name,
    resolve_font_declarations, FontDeclaration,
};

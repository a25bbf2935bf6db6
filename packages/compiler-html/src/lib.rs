pub mod compiler;
pub mod html;
pub mod post;
pub mod theme;

#[cfg(test)]
mod tests;

pub use compiler::{compile_to_html, render_node, render_nodes, render_text, CompileOptions};
pub use html::{write_html, Element, Format, HtmlNode};
pub use post::compile_post;
pub use theme::Theme;

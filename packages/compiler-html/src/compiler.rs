use crate::html::{write_html, Element, Format, HtmlNode};
use crate::theme::Theme;
use folio_document::{Decoration, LinkNode, Node, TextNode};
use folio_math::{split_math, MathMode, Segment};
use tracing::{debug, info, instrument, trace};

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the document in the theme's root container
    pub wrap_root: bool,
    pub theme: Theme,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            wrap_root: true,
            theme: Theme::default(),
        }
    }
}

impl CompileOptions {
    pub(crate) fn format(&self) -> Format {
        Format {
            pretty: self.pretty,
            indent: self.indent.clone(),
        }
    }
}

/// Compile a rich-text document to HTML.
///
/// Never fails: unsupported nodes render as nothing and malformed math stays
/// literal text.
#[instrument(skip_all, fields(nodes = nodes.len()))]
pub fn compile_to_html(nodes: &[Node], options: &CompileOptions) -> String {
    let mut fragment = render_nodes(nodes, &options.theme);

    if options.wrap_root {
        fragment = vec![Element::new("div")
            .class(&options.theme.root)
            .children(fragment)
            .into()];
    }

    let html = write_html(&fragment, &options.format());
    info!(bytes = html.len(), "Document compiled");
    html
}

/// Render sibling nodes in document order.
pub fn render_nodes(nodes: &[Node], theme: &Theme) -> Vec<HtmlNode> {
    nodes
        .iter()
        .enumerate()
        .flat_map(|(index, node)| render_node(node, index, theme))
        .collect()
}

/// Render one node and its subtree.
///
/// `index` is the node's position among its siblings and only identifies it
/// in logs.
pub fn render_node(node: &Node, index: usize, theme: &Theme) -> Vec<HtmlNode> {
    trace!(index, kind = node.kind(), "Rendering node");

    let element = match node {
        Node::Paragraph { .. } => Element::new("p").class(&theme.paragraph),

        Node::Heading { level, .. } => Element::new(level.tag()).class(theme.heading(*level)),

        Node::List { ordered, .. } => Element::new(if *ordered { "ol" } else { "ul" }).class(theme.list(*ordered)),

        Node::ListItem { .. } => Element::new("li").class(&theme.list_item),

        Node::Quote { children } => {
            let body = Element::new("div")
                .class(&theme.quote_body)
                .children(render_nodes(children, theme));
            return vec![Element::new("blockquote").class(&theme.quote).child(body).into()];
        }

        Node::Code { children } => {
            let code = Element::new("code")
                .class(&theme.code_block_inner)
                .children(render_nodes(children, theme));
            return vec![Element::new("pre").class(&theme.code_block).child(code).into()];
        }

        Node::Link(link) => link_element(link, theme),

        Node::Text(text) => return render_text(text, theme),

        Node::Unsupported => {
            debug!(index, "Skipping unsupported node");
            return Vec::new();
        }
    };

    vec![element.children(render_nodes(node.children(), theme)).into()]
}

fn link_element(link: &LinkNode, theme: &Theme) -> Element {
    let anchor = Element::new("a").attr("href", link.url.as_str());

    let anchor = if link.open_in_new_tab {
        anchor
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
    } else {
        anchor
    };

    anchor.class(&theme.link)
}

/// Render a text run: math segments first, then decorations folded around
/// them, bold innermost and inline code outermost.
pub fn render_text(text: &TextNode, theme: &Theme) -> Vec<HtmlNode> {
    let segments: Vec<HtmlNode> = split_math(&text.content)
        .into_iter()
        .filter(|segment| *segment != Segment::Text(""))
        .map(|segment| render_segment(segment, theme))
        .collect();

    text.decorations().fold(segments, |inner, decoration| {
        vec![decoration_element(decoration, theme).children(inner).into()]
    })
}

fn render_segment(segment: Segment<'_>, theme: &Theme) -> HtmlNode {
    match segment {
        Segment::Text(text) => HtmlNode::text(text),
        Segment::Math { expression, mode } => {
            let (open, close) = mode.tex_delimiters();
            let tex = HtmlNode::text(format!("{}{}{}", open, expression, close));

            match mode {
                MathMode::Inline => Element::new("span")
                    .class(&theme.math_inline)
                    .child(tex)
                    .into(),
                MathMode::Block => Element::new("div")
                    .class(&theme.math_block)
                    .child(Element::new("div").class(&theme.math_block_inner).child(tex))
                    .into(),
            }
        }
    }
}

fn decoration_element(decoration: Decoration, theme: &Theme) -> Element {
    match decoration {
        Decoration::Bold => Element::new("strong"),
        Decoration::Italic => Element::new("em"),
        Decoration::Underline => Element::new("u"),
        Decoration::Strikethrough => Element::new("s"),
        Decoration::InlineCode => Element::new("code").class(&theme.inline_code),
    }
}

/// Rendered markup, before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(Element),
    Text(String),
}

impl HtmlNode {
    pub fn text(content: impl Into<String>) -> Self {
        HtmlNode::Text(content.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            HtmlNode::Element(element) => Some(element),
            HtmlNode::Text(_) => None,
        }
    }

    fn is_block(&self) -> bool {
        self.as_element().is_some_and(Element::is_block)
    }
}

impl From<Element> for HtmlNode {
    fn from(element: Element) -> Self {
        HtmlNode::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<HtmlNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Adds a `class` attribute unless `class` is empty.
    pub fn class(self, class: &str) -> Self {
        if class.is_empty() {
            self
        } else {
            self.attr("class", class)
        }
    }

    pub fn child(mut self, child: impl Into<HtmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = HtmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self.tag,
            "p" | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "ul"
                | "ol"
                | "li"
                | "blockquote"
                | "pre"
                | "div"
                | "header"
                | "article"
                | "section"
        )
    }

    /// Void elements have no children and no closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self.tag, "img" | "br" | "hr")
    }

    /// Whitespace inside is significant and must not be reformatted.
    fn is_preformatted(&self) -> bool {
        self.tag == "pre"
    }
}

/// Output formatting for [`write_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Put block elements on their own indented lines.
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    format: &'a Format,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(format: &'a Format) -> Self {
        Self {
            format,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.format.indent);
        }
    }

    fn newline(&mut self) {
        self.add("\n");
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a fragment to an HTML string.
///
/// In pretty mode each block element starts its own line; consecutive inline
/// nodes share one line, and `<pre>` content is written verbatim.
pub fn write_html(nodes: &[HtmlNode], format: &Format) -> String {
    let mut ctx = Context::new(format);

    if format.pretty {
        write_lines(nodes, &mut ctx);
    } else {
        for node in nodes {
            write_inline(node, &mut ctx);
        }
    }

    ctx.get_output()
}

fn write_lines(nodes: &[HtmlNode], ctx: &mut Context) {
    let mut run_open = false;

    for node in nodes {
        match node {
            HtmlNode::Element(element) if element.is_block() => {
                if run_open {
                    ctx.newline();
                    run_open = false;
                }
                write_block(element, ctx);
            }
            _ => {
                if !run_open {
                    ctx.add_indent();
                    run_open = true;
                }
                write_inline(node, ctx);
            }
        }
    }

    if run_open {
        ctx.newline();
    }
}

fn write_block(element: &Element, ctx: &mut Context) {
    ctx.add_indent();
    write_open_tag(element, ctx);

    if element.is_preformatted() || !element.children.iter().any(HtmlNode::is_block) {
        for child in &element.children {
            write_inline(child, ctx);
        }
    } else {
        ctx.newline();
        ctx.indent();
        write_lines(&element.children, ctx);
        ctx.dedent();
        ctx.add_indent();
    }

    write_close_tag(element, ctx);
    ctx.newline();
}

fn write_inline(node: &HtmlNode, ctx: &mut Context) {
    match node {
        HtmlNode::Text(text) => ctx.add(&escape_html(text)),
        HtmlNode::Element(element) => {
            write_open_tag(element, ctx);
            for child in &element.children {
                write_inline(child, ctx);
            }
            write_close_tag(element, ctx);
        }
    }
}

fn write_open_tag(element: &Element, ctx: &mut Context) {
    ctx.add("<");
    ctx.add(element.tag);
    for (name, value) in &element.attributes {
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    ctx.add(">");
}

fn write_close_tag(element: &Element, ctx: &mut Context) {
    if !element.is_void() {
        ctx.add(&format!("</{}>", element.tag));
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

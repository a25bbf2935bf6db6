use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A single node of a rich-text document.
///
/// Nodes decode from the content store's JSON, tagged by `"type"`. Decoding is
/// lenient at the child level: a child that is `null`, carries an unknown tag,
/// or fails to decode becomes [`Node::Unsupported`] instead of failing the
/// whole tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Paragraph {
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    Heading {
        #[serde(alias = "tag")]
        level: HeadingLevel,
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    List {
        #[serde(rename = "listType", default, deserialize_with = "list_type_is_ordered")]
        ordered: bool,
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    #[serde(alias = "listitem")]
    ListItem {
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    Quote {
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    Code {
        #[serde(default, deserialize_with = "lenient_children")]
        children: Vec<Node>,
    },
    Link(LinkNode),
    Text(TextNode),
    /// Unknown tag, malformed node, or a `null` slot.
    #[serde(other)]
    Unsupported,
}

impl Node {
    /// Decode a node, degrading to [`Node::Unsupported`] on any failure.
    pub fn from_value(mut value: Value) -> Node {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if kind.as_deref() == Some("heading") {
            prefer_level_over_tag(&mut value);
        }

        match serde_json::from_value(value) {
            Ok(node) => node,
            Err(err) => {
                tracing::debug!(
                    kind = kind.as_deref().unwrap_or("<none>"),
                    error = %err,
                    "Treating malformed node as unsupported"
                );
                Node::Unsupported
            }
        }
    }

    /// Tag name of the node, as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "listItem",
            Node::Quote { .. } => "quote",
            Node::Code { .. } => "code",
            Node::Link(_) => "link",
            Node::Text(_) => "text",
            Node::Unsupported => "unsupported",
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Quote { children }
            | Node::Code { children } => children,
            Node::Link(link) => &link.children,
            Node::Text(_) | Node::Unsupported => &[],
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Node::Unsupported)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    pub fn heading(level: HeadingLevel, children: Vec<Node>) -> Self {
        Node::Heading { level, children }
    }

    pub fn list(ordered: bool, items: Vec<Node>) -> Self {
        Node::List {
            ordered,
            children: items,
        }
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem { children }
    }

    pub fn quote(children: Vec<Node>) -> Self {
        Node::Quote { children }
    }

    pub fn code(children: Vec<Node>) -> Self {
        Node::Code { children }
    }

    pub fn link(url: impl Into<String>, open_in_new_tab: bool, children: Vec<Node>) -> Self {
        Node::Link(LinkNode {
            url: url.into(),
            open_in_new_tab,
            children,
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode::new(content))
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

/// Lexical headings may carry both `level` and `tag`. A non-null `level` wins;
/// a null one falls back to `tag`.
fn prefer_level_over_tag(value: &mut Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    match map.get("level") {
        Some(Value::Null) => {
            map.remove("level");
        }
        Some(_) => {
            map.remove("tag");
        }
        None => {}
    }
}

/// Heading rank, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "RawLevel")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, handy for indexing per-level tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }

    pub fn tag(self) -> &'static str {
        ["h1", "h2", "h3", "h4", "h5", "h6"][self.index()]
    }

    pub fn all() -> impl Iterator<Item = HeadingLevel> {
        (Self::MIN..=Self::MAX).map(HeadingLevel)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Levels arrive either as a number (`"level": 2`) or an element name
/// (`"tag": "h2"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(u64),
    Name(String),
}

impl TryFrom<RawLevel> for HeadingLevel {
    type Error = String;

    fn try_from(raw: RawLevel) -> Result<Self, Self::Error> {
        let level = match &raw {
            RawLevel::Number(n) => u8::try_from(*n).ok(),
            RawLevel::Name(name) => {
                let digits = name.strip_prefix(['h', 'H']).unwrap_or(name);
                digits.parse::<u8>().ok()
            }
        };

        level.and_then(HeadingLevel::new).ok_or_else(|| match raw {
            RawLevel::Number(n) => format!("heading level {} is outside 1..=6", n),
            RawLevel::Name(name) => format!("invalid heading tag {:?}", name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawLink")]
pub struct LinkNode {
    pub url: String,
    pub open_in_new_tab: bool,
    pub children: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "openInNewTab")]
    new_tab: Option<bool>,
    /// Lexical keeps link attributes under `fields`.
    #[serde(default)]
    fields: Option<RawLinkFields>,
    #[serde(default, deserialize_with = "lenient_children")]
    children: Vec<Node>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawLinkFields {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    new_tab: Option<bool>,
}

impl From<RawLink> for LinkNode {
    fn from(raw: RawLink) -> Self {
        let fields = raw.fields.unwrap_or_default();
        LinkNode {
            url: raw.url.or(fields.url).unwrap_or_default(),
            open_in_new_tab: raw.new_tab.or(fields.new_tab).unwrap_or(false),
            children: raw.children,
        }
    }
}

/// Leaf text run with its decoration flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawText")]
pub struct TextNode {
    pub content: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub inline_code: bool,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn inline_code(mut self) -> Self {
        self.inline_code = true;
        self
    }

    /// Active decorations, innermost first.
    pub fn decorations(&self) -> impl Iterator<Item = Decoration> + '_ {
        Decoration::ORDER
            .into_iter()
            .filter(move |decoration| self.has(*decoration))
    }

    pub fn has(&self, decoration: Decoration) -> bool {
        match decoration {
            Decoration::Bold => self.bold,
            Decoration::Italic => self.italic,
            Decoration::Underline => self.underline,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::InlineCode => self.inline_code,
        }
    }
}

/// Text decoration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    InlineCode,
}

impl Decoration {
    /// Wrapping order: each decoration wraps the ones before it.
    pub const ORDER: [Decoration; 5] = [
        Decoration::Bold,
        Decoration::Italic,
        Decoration::Underline,
        Decoration::Strikethrough,
        Decoration::InlineCode,
    ];

    /// Bit in the Lexical `format` field.
    fn format_bit(self) -> u64 {
        match self {
            Decoration::Bold => 1,
            Decoration::Italic => 1 << 1,
            Decoration::Strikethrough => 1 << 2,
            Decoration::Underline => 1 << 3,
            Decoration::InlineCode => 1 << 4,
        }
    }
}

#[derive(Deserialize)]
struct RawText {
    #[serde(default)]
    text: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    bold: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    italic: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    underline: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    strikethrough: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    code: bool,
    #[serde(default)]
    format: Value,
}

impl From<RawText> for TextNode {
    fn from(raw: RawText) -> Self {
        let format = raw.format.as_u64().unwrap_or(0);
        let flag = |set: bool, decoration: Decoration| set || (format & decoration.format_bit()) != 0;

        TextNode {
            content: match raw.text {
                Value::String(s) => s,
                _ => String::new(),
            },
            bold: flag(raw.bold, Decoration::Bold),
            italic: flag(raw.italic, Decoration::Italic),
            underline: flag(raw.underline, Decoration::Underline),
            strikethrough: flag(raw.strikethrough, Decoration::Strikethrough),
            inline_code: flag(raw.code, Decoration::InlineCode),
        }
    }
}

/// Decode a child list entry by entry. `null` or missing lists are empty.
pub(crate) fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Node::from_value)
        .collect())
}

/// Read `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_type_is_ordered<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let list_type: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(list_type.as_deref(), Some("ordered" | "number")))
}

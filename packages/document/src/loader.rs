use crate::ast::{lenient_children, Node};
use crate::error::{DocumentError, DocumentResult};
use crate::post::Post;
use serde_json::Value;
use std::path::Path;

/// A loaded content file: a bare rich-text document, a whole post, or a saved
/// collection response holding several posts.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Document(Vec<Node>),
    Post(Box<Post>),
    Posts(Vec<Post>),
}

impl Source {
    /// Root nodes of the rich-text body. A collection yields its first post's
    /// body, or nothing when it is empty.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Source::Document(nodes) => nodes,
            Source::Post(post) => &post.content,
            Source::Posts(posts) => match posts.first() {
                Some(post) => &post.content,
                None => &[],
            },
        }
    }
}

/// Load the root nodes of a rich-text document.
///
/// Accepts a bare node array, a Lexical editor state (`{"root": {...}}`), a
/// root node itself (`{"children": [...]}`), a single typed node, a post whose
/// `content` is one of those, or a collection response (`{"docs": [...]}`)
/// whose first post supplies the body.
pub fn load_document(source: &str) -> DocumentResult<Vec<Node>> {
    let value: Value = serde_json::from_str(source)?;
    content_from_value(value)
}

/// Load a content file, keeping post metadata when present.
pub fn load_source(source: &str) -> DocumentResult<Source> {
    let mut value: Value = serde_json::from_str(source)?;

    if let Some(docs) = take_docs(&mut value) {
        let posts = docs
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Post>, _>>()?;
        tracing::debug!(posts = posts.len(), "Loaded post collection");
        return Ok(Source::Posts(posts));
    }

    if is_post(&value) {
        let post: Post = serde_json::from_value(value)?;
        tracing::debug!(slug = %post.slug, nodes = post.content.len(), "Loaded post");
        return Ok(Source::Post(Box::new(post)));
    }

    let nodes = content_from_value(value)?;
    tracing::debug!(nodes = nodes.len(), "Loaded document");
    Ok(Source::Document(nodes))
}

pub fn load_file(path: &Path) -> DocumentResult<Source> {
    let source = std::fs::read_to_string(path)?;
    load_source(&source)
}

/// Extract root nodes from any of the accepted envelopes.
pub fn content_from_value(value: Value) -> DocumentResult<Vec<Node>> {
    match value {
        Value::Array(items) => children(Value::Array(items)),
        Value::Object(mut map) => {
            let typed_node = map
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| kind != "root");
            if typed_node {
                return Ok(vec![Node::from_value(Value::Object(map))]);
            }
            if let Some(root) = map.remove("root") {
                return content_from_value(root);
            }
            if let Some(content) = map.remove("content") {
                return content_from_value(content);
            }
            if let Some(Value::Array(docs)) = map.remove("docs") {
                return match docs.into_iter().next() {
                    Some(first) => content_from_value(first),
                    None => Ok(Vec::new()),
                };
            }
            match map.remove("children") {
                Some(children_value) => children(children_value),
                None => Err(DocumentError::unrecognized_shape(&Value::Object(map))),
            }
        }
        other => Err(DocumentError::unrecognized_shape(&other)),
    }
}

fn children(value: Value) -> DocumentResult<Vec<Node>> {
    Ok(lenient_children(value)?)
}

/// The `docs` array of a collection response, if `value` is one.
fn take_docs(value: &mut Value) -> Option<Vec<Value>> {
    let map = value.as_object_mut()?;
    if map.contains_key("content") || !map.get("docs").is_some_and(Value::is_array) {
        return None;
    }
    match map.remove("docs") {
        Some(Value::Array(docs)) => Some(docs),
        _ => None,
    }
}

fn is_post(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("content") && !map.contains_key("root"))
}

use crate::ast::{null_as_default, Node};
use crate::loader::content_from_value;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A blog post as returned by the `posts` collection.
///
/// Relations (`category`, `author`, `coverImage`) are only kept when the store
/// populated them; a bare id in their place is dropped. Scalar fields sent as
/// `null` take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(deserialize_with = "rich_text")]
    pub content: Vec<Node>,
    #[serde(deserialize_with = "populated")]
    pub cover_image: Option<CoverImage>,
    #[serde(deserialize_with = "populated")]
    pub category: Option<Category>,
    #[serde(deserialize_with = "populated")]
    pub author: Option<Author>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<PostTag>,
    #[serde(deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status: PostStatus,
    pub published_at: Option<String>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Populated `media` upload.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CoverImage {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// CSS colour used for the category badge.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PostTag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

fn rich_text<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    content_from_value(value).map_err(D::Error::custom)
}

fn populated<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

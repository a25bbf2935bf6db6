use crate::compiler::{render_nodes, CompileOptions};
use crate::html::{write_html, Element, HtmlNode};
use crate::theme::Theme;
use chrono::{DateTime, NaiveDate};
use folio_document::{CoverImage, Post};
use tracing::{info, instrument, warn};

/// Image shown when a cover is attached without a URL.
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Compile a blog post page: cover image, header, rendered body and tags.
#[instrument(skip_all, fields(slug = %post.slug))]
pub fn compile_post(post: &Post, options: &CompileOptions) -> String {
    let theme = &options.theme;
    let mut page: Vec<HtmlNode> = Vec::new();

    if let Some(cover) = &post.cover_image {
        page.push(cover_element(cover, theme).into());
    }
    page.push(post_header(post, theme).into());

    page.push(
        Element::new("article")
            .class(&theme.post_article)
            .children(render_nodes(&post.content, theme))
            .into(),
    );

    if !post.tags.is_empty() {
        let tags = post.tags.iter().map(|tag| {
            HtmlNode::from(
                Element::new("li")
                    .class(&theme.post_tag)
                    .child(HtmlNode::text(tag.tag.as_str())),
            )
        });
        page.push(Element::new("ul").class(&theme.post_tags).children(tags).into());
    }

    let html = write_html(&page, &options.format());
    info!(bytes = html.len(), "Post compiled");
    html
}

fn cover_element(cover: &CoverImage, theme: &Theme) -> Element {
    let src = if cover.url.is_empty() {
        PLACEHOLDER_IMAGE
    } else {
        cover.url.as_str()
    };

    let image = Element::new("img")
        .attr("src", src)
        .attr("alt", cover.alt.as_str())
        .class(&theme.post_cover_image);

    let wrapper = Element::new("div").class(&theme.post_cover).child(image);
    if theme.post_cover_overlay.is_empty() {
        wrapper
    } else {
        wrapper.child(Element::new("div").class(&theme.post_cover_overlay))
    }
}

fn post_header(post: &Post, theme: &Theme) -> Element {
    let mut meta: Vec<HtmlNode> = Vec::new();

    if let Some(category) = &post.category {
        let badge = Element::new("span").class(&theme.post_category);
        let badge = if category.color.is_empty() {
            badge
        } else {
            badge.attr(
                "style",
                format!(
                    "background-color: {}20; color: {}",
                    category.color, category.color
                ),
            )
        };
        meta.push(badge.child(HtmlNode::text(category.name.as_str())).into());
    }

    if let Some(raw) = &post.published_at {
        if let Some(date) = format_date(raw) {
            meta.push(
                Element::new("time")
                    .attr("datetime", raw.as_str())
                    .child(HtmlNode::text(date))
                    .into(),
            );
        }
    }

    if let Some(author) = &post.author {
        meta.push(
            Element::new("span")
                .child(HtmlNode::text(author.name.as_str()))
                .into(),
        );
    }

    let mut header = Element::new("header").class(&theme.post_header);
    if !meta.is_empty() {
        header = header.child(Element::new("div").class(&theme.post_meta).children(meta));
    }

    header = header.child(
        Element::new("h1")
            .class(&theme.post_title)
            .child(HtmlNode::text(post.title.as_str())),
    );

    if !post.excerpt.is_empty() {
        header = header.child(
            Element::new("p")
                .class(&theme.post_excerpt)
                .child(HtmlNode::text(post.excerpt.as_str())),
        );
    }

    header
}

/// Long English date, e.g. `March 5, 2024`.
fn format_date(raw: &str) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|datetime| datetime.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => Some(date.format("%B %-d, %Y").to_string()),
        Err(err) => {
            warn!(published_at = raw, error = %err, "Unparsable publish date, omitting");
            None
        }
    }
}

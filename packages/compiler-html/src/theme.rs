use folio_document::HeadingLevel;
use serde::{Deserialize, Serialize};

/// CSS classes attached to rendered elements.
///
/// Defaults reproduce the site's Tailwind styling. Any field left out of a
/// config file keeps its default; an empty string drops the `class` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub root: String,
    pub paragraph: String,
    /// One entry per heading level, `h1` first.
    pub headings: [String; 6],
    pub ordered_list: String,
    pub unordered_list: String,
    pub list_item: String,
    pub quote: String,
    pub quote_body: String,
    pub code_block: String,
    pub code_block_inner: String,
    pub link: String,
    pub inline_code: String,
    pub math_inline: String,
    pub math_block: String,
    pub math_block_inner: String,

    pub post_cover: String,
    pub post_cover_image: String,
    /// Gradient laid over the cover image; empty omits the overlay.
    pub post_cover_overlay: String,
    pub post_header: String,
    pub post_meta: String,
    pub post_category: String,
    pub post_title: String,
    pub post_excerpt: String,
    pub post_article: String,
    pub post_tags: String,
    pub post_tag: String,
}

impl Theme {
    pub fn heading(&self, level: HeadingLevel) -> &str {
        &self.headings[level.index()]
    }

    pub fn list(&self, ordered: bool) -> &str {
        if ordered {
            &self.ordered_list
        } else {
            &self.unordered_list
        }
    }

    /// A theme that emits no classes at all.
    pub fn unstyled() -> Self {
        Self {
            root: String::new(),
            paragraph: String::new(),
            headings: Default::default(),
            ordered_list: String::new(),
            unordered_list: String::new(),
            list_item: String::new(),
            quote: String::new(),
            quote_body: String::new(),
            code_block: String::new(),
            code_block_inner: String::new(),
            link: String::new(),
            inline_code: String::new(),
            math_inline: String::new(),
            math_block: String::new(),
            math_block_inner: String::new(),
            post_cover: String::new(),
            post_cover_image: String::new(),
            post_cover_overlay: String::new(),
            post_header: String::new(),
            post_meta: String::new(),
            post_category: String::new(),
            post_title: String::new(),
            post_excerpt: String::new(),
            post_article: String::new(),
            post_tags: String::new(),
            post_tag: String::new(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root: "prose prose-invert max-w-none".to_string(),
            paragraph: "mb-4 text-zinc-300 leading-relaxed".to_string(),
            headings: [
                "text-4xl font-bold mb-6 bg-clip-text text-transparent bg-gradient-to-r from-white to-zinc-300"
                    .to_string(),
                "text-3xl font-bold mb-5 text-white".to_string(),
                "text-2xl font-semibold mb-4 text-white".to_string(),
                "text-xl font-semibold mb-3 text-white".to_string(),
                "text-lg font-semibold mb-2 text-white".to_string(),
                "text-base font-semibold mb-2 text-white".to_string(),
            ],
            ordered_list: "list-decimal list-inside mb-4 space-y-2 text-zinc-300".to_string(),
            unordered_list: "list-disc list-inside mb-4 space-y-2 text-zinc-300".to_string(),
            list_item: "text-zinc-300".to_string(),
            quote: "border-l-4 border-purple-500 pl-6 py-4 mb-6 bg-zinc-800/50 rounded-r-lg"
                .to_string(),
            quote_body: "text-zinc-300 italic".to_string(),
            code_block: "bg-zinc-900 rounded-lg p-4 mb-6 overflow-x-auto".to_string(),
            code_block_inner: "text-sm text-zinc-300 font-mono".to_string(),
            link: "text-purple-400 hover:text-purple-300 underline transition-colors".to_string(),
            inline_code: "bg-zinc-800 px-2 py-1 rounded text-sm font-mono text-purple-300"
                .to_string(),
            math_inline: "math math-inline".to_string(),
            math_block: "my-4 text-center".to_string(),
            math_block_inner: "math math-display".to_string(),
            post_cover: "relative overflow-hidden rounded-xl mb-8".to_string(),
            post_cover_image: "w-full h-[400px] object-cover".to_string(),
            post_cover_overlay: "absolute inset-0 bg-gradient-to-t from-black/60 to-transparent"
                .to_string(),
            post_header: "mb-8".to_string(),
            post_meta: "flex items-center gap-4 text-sm text-zinc-400".to_string(),
            post_category: "rounded-full px-3 py-1 text-xs font-medium".to_string(),
            post_title: "text-4xl md:text-5xl font-bold mb-4 bg-clip-text text-transparent bg-gradient-to-r from-white to-zinc-300"
                .to_string(),
            post_excerpt: "text-xl text-zinc-400 leading-relaxed".to_string(),
            post_article: "prose prose-invert prose-lg max-w-none mb-12".to_string(),
            post_tags: "flex flex-wrap gap-2 mb-8".to_string(),
            post_tag: "rounded-full border border-zinc-700 px-3 py-1 text-xs text-zinc-300"
                .to_string(),
        }
    }
}

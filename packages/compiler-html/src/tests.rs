use crate::{compile_post, compile_to_html, render_node, render_text, CompileOptions, Theme};
use folio_document::{load_document, load_source, HeadingLevel, Node, Source, TextNode};

fn compact() -> CompileOptions {
    CompileOptions {
        pretty: false,
        wrap_root: false,
        theme: Theme::unstyled(),
        ..Default::default()
    }
}

fn html(nodes: &[Node]) -> String {
    compile_to_html(nodes, &compact())
}

#[test]
fn test_compile_paragraph() {
    let nodes = vec![Node::paragraph(vec![Node::text("Hello, world")])];
    let output = compile_to_html(&nodes, &CompileOptions::default());

    println!("Generated HTML:\n{}", output);

    assert!(output.starts_with("<div class=\"prose prose-invert max-w-none\">"));
    assert!(output.contains("<p class=\"mb-4 text-zinc-300 leading-relaxed\">Hello, world</p>"));
    assert!(output.ends_with("</div>\n"));
}

#[test]
fn test_sibling_order_is_preserved() {
    let nodes = vec![
        Node::paragraph(vec![Node::text("first")]),
        Node::quote(vec![Node::text("second")]),
        Node::paragraph(vec![Node::text("third "), Node::text("fourth")]),
    ];

    assert_eq!(
        html(&nodes),
        "<p>first</p><blockquote><div>second</div></blockquote><p>third fourth</p>"
    );
}

#[test]
fn test_heading_levels() {
    let theme = Theme::default();
    for level in HeadingLevel::all() {
        let rendered = render_node(&Node::heading(level, vec![Node::text("Title")]), 0, &theme);
        let element = rendered[0].as_element().expect("heading element");

        assert_eq!(element.tag, format!("h{}", level.get()));
        assert_eq!(element.attribute("class"), Some(theme.heading(level)));
    }
}

#[test]
fn test_out_of_range_heading_from_json_renders_nothing() {
    let nodes = load_document(
        r#"[{"type": "heading", "level": 7, "children": [{"type": "text", "text": "x"}]},
            {"type": "paragraph", "children": [{"type": "text", "text": "after"}]}]"#,
    )
    .unwrap();

    assert_eq!(html(&nodes), "<p>after</p>");
}

#[test]
fn test_ordered_and_unordered_lists() {
    let item = || Node::list_item(vec![Node::text("item")]);

    assert_eq!(html(&[Node::list(true, vec![item()])]), "<ol><li>item</li></ol>");
    assert_eq!(html(&[Node::list(false, vec![item()])]), "<ul><li>item</li></ul>");
}

#[test]
fn test_list_item_ignores_parent_ordering() {
    let theme = Theme::default();
    let ordered = render_node(&Node::list(true, vec![Node::list_item(vec![])]), 0, &theme);
    let unordered = render_node(&Node::list(false, vec![Node::list_item(vec![])]), 0, &theme);

    let ordered = ordered[0].as_element().unwrap();
    let unordered = unordered[0].as_element().unwrap();

    assert_eq!(ordered.children[0], unordered.children[0]);
    assert_ne!(ordered.attribute("class"), unordered.attribute("class"));
}

#[test]
fn test_code_block() {
    let nodes = vec![Node::code(vec![Node::text("let x = 1 < 2;")])];

    assert_eq!(html(&nodes), "<pre><code>let x = 1 &lt; 2;</code></pre>");
}

#[test]
fn test_link_in_new_tab_is_hardened() {
    let nodes = vec![Node::link("https://example.com", true, vec![Node::text("site")])];

    assert_eq!(
        html(&nodes),
        r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#
    );
}

#[test]
fn test_link_in_same_tab() {
    let output = html(&[Node::link("/about", false, vec![Node::text("about")])]);

    assert_eq!(output, r#"<a href="/about">about</a>"#);
    assert!(!output.contains("target"));
    assert!(!output.contains("rel="));
}

#[test]
fn test_link_url_is_escaped() {
    let output = html(&[Node::link(r#"/q?a=1&b="2""#, false, vec![])]);

    assert_eq!(output, r#"<a href="/q?a=1&amp;b=&quot;2&quot;"></a>"#);
}

#[test]
fn test_bold_and_italic_nesting() {
    let text = TextNode::new("both").italic().bold();

    assert_eq!(html(&[Node::from(text)]), "<em><strong>both</strong></em>");
}

#[test]
fn test_all_decorations_nesting() {
    let text = TextNode::new("x")
        .bold()
        .italic()
        .underline()
        .strikethrough()
        .inline_code();

    assert_eq!(
        html(&[Node::from(text)]),
        "<code><s><u><em><strong>x</strong></em></u></s></code>"
    );
}

#[test]
fn test_inline_code_class() {
    let output = compile_to_html(
        &[Node::from(TextNode::new("cargo").inline_code())],
        &CompileOptions {
            pretty: false,
            wrap_root: false,
            ..Default::default()
        },
    );

    assert_eq!(
        output,
        r#"<code class="bg-zinc-800 px-2 py-1 rounded text-sm font-mono text-purple-300">cargo</code>"#
    );
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(
        html(&[Node::text("<script>alert('x')</script>")]),
        "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
    );
}

#[test]
fn test_inline_math() {
    let nodes = vec![Node::paragraph(vec![Node::text("Area is $x^2$ units")])];

    assert_eq!(html(&nodes), r"<p>Area is <span>\(x^2\)</span> units</p>");
}

#[test]
fn test_inline_math_classes() {
    let rendered = render_text(&TextNode::new("$a$"), &Theme::default());
    let span = rendered[0].as_element().unwrap();

    assert_eq!(span.tag, "span");
    assert_eq!(span.attribute("class"), Some("math math-inline"));
}

#[test]
fn test_block_math() {
    let output = compile_to_html(
        &[Node::text("$$E=mc^2$$")],
        &CompileOptions {
            pretty: false,
            wrap_root: false,
            ..Default::default()
        },
    );

    assert_eq!(
        output,
        r#"<div class="my-4 text-center"><div class="math math-display">\[E=mc^2\]</div></div>"#
    );
}

#[test]
fn test_math_is_escaped() {
    assert_eq!(html(&[Node::text("$a<b$")]), r"<span>\(a&lt;b\)</span>");
}

#[test]
fn test_unterminated_math_stays_literal() {
    assert_eq!(html(&[Node::text("$x^2 no close")]), "$x^2 no close");
}

#[test]
fn test_decorations_wrap_math() {
    let text = TextNode::new("see $x$").bold();

    assert_eq!(html(&[Node::from(text)]), r"<strong>see <span>\(x\)</span></strong>");
}

#[test]
fn test_empty_text_renders_nothing() {
    assert_eq!(html(&[Node::paragraph(vec![Node::text("")])]), "<p></p>");
}

#[test]
fn test_unsupported_node_between_siblings() {
    let nodes = load_document(
        r#"[
            {"type": "paragraph", "children": [{"type": "text", "text": "before"}]},
            {"type": "table", "children": [{"type": "text", "text": "hidden"}]},
            null,
            {"type": "paragraph", "children": [{"type": "text", "text": "after"}]}
        ]"#,
    )
    .unwrap();

    assert_eq!(html(&nodes), "<p>before</p><p>after</p>");
}

#[test]
fn test_unsupported_node_renders_empty() {
    assert!(render_node(&Node::Unsupported, 3, &Theme::default()).is_empty());
}

#[test]
fn test_pretty_document() {
    let nodes = vec![
        Node::heading(HeadingLevel::new(2).unwrap(), vec![Node::text("Intro")]),
        Node::list(
            false,
            vec![
                Node::list_item(vec![Node::text("one")]),
                Node::list_item(vec![TextNode::new("two").bold().into()]),
            ],
        ),
    ];
    let options = CompileOptions {
        theme: Theme::unstyled(),
        ..Default::default()
    };

    let output = compile_to_html(&nodes, &options);
    println!("Generated HTML:\n{}", output);

    assert_eq!(
        output,
        "<div>\n  <h2>Intro</h2>\n  <ul>\n    <li>one</li>\n    <li><strong>two</strong></li>\n  </ul>\n</div>\n"
    );
}

#[test]
fn test_compact_has_no_newlines() {
    let nodes = vec![
        Node::paragraph(vec![Node::text("a")]),
        Node::list(true, vec![Node::list_item(vec![Node::text("b")])]),
    ];
    let output = compile_to_html(
        &nodes,
        &CompileOptions {
            pretty: false,
            ..Default::default()
        },
    );

    assert!(!output.contains('\n'));
}

#[test]
fn test_lexical_document() {
    let source = r#"{
        "root": {
            "type": "root",
            "children": [
                {"type": "heading", "tag": "h3", "children": [{"type": "text", "text": "Notes", "format": 0}]},
                {"type": "paragraph", "children": [
                    {"type": "text", "text": "Read ", "format": 0},
                    {"type": "link", "fields": {"url": "https://katex.org", "newTab": true},
                     "children": [{"type": "text", "text": "the docs", "format": 2}]}
                ]},
                {"type": "list", "listType": "number", "children": [
                    {"type": "listitem", "children": [{"type": "text", "text": "first", "format": 1}]}
                ]}
            ]
        }
    }"#;

    let nodes = load_document(source).unwrap();
    let output = html(&nodes);

    assert_eq!(
        output,
        concat!(
            "<h3>Notes</h3>",
            r#"<p>Read <a href="https://katex.org" target="_blank" rel="noopener noreferrer"><em>the docs</em></a></p>"#,
            "<ol><li><strong>first</strong></li></ol>"
        )
    );
}

#[test]
fn test_compile_post() {
    let source = r##"{
        "title": "Typesetting <math>",
        "slug": "typesetting-math",
        "excerpt": "Notes on KaTeX",
        "category": {"name": "Notes", "slug": "notes", "color": "#a855f7"},
        "author": {"name": "Shine"},
        "tags": [{"tag": "math"}, {"tag": "web"}],
        "status": "published",
        "publishedAt": "2024-03-05T10:00:00.000Z",
        "content": [{"type": "paragraph", "children": [{"type": "text", "text": "Body"}]}]
    }"##;

    let Source::Post(post) = load_source(source).unwrap() else {
        panic!("expected a post");
    };
    let options = CompileOptions {
        theme: Theme::unstyled(),
        ..Default::default()
    };
    let output = compile_post(&post, &options);

    println!("Generated HTML:\n{}", output);

    assert!(output.contains(r##"<span style="background-color: #a855f720; color: #a855f7">Notes</span>"##));
    assert!(output.contains(r#"<time datetime="2024-03-05T10:00:00.000Z">March 5, 2024</time>"#));
    assert!(output.contains("<span>Shine</span>"));
    assert!(output.contains("<h1>Typesetting &lt;math&gt;</h1>"));
    assert!(output.contains("<p>Notes on KaTeX</p>"));
    assert!(output.contains("<article>\n  <p>Body</p>\n</article>"));
    assert!(output.contains("<ul>\n  <li>math</li>\n  <li>web</li>\n</ul>"));
}

#[test]
fn test_compile_post_minimal() {
    let Source::Post(post) = load_source(r#"{"title": "Bare", "content": []}"#).unwrap() else {
        panic!("expected a post");
    };
    let output = compile_post(
        &post,
        &CompileOptions {
            pretty: false,
            theme: Theme::unstyled(),
            ..Default::default()
        },
    );

    assert_eq!(output, "<header><h1>Bare</h1></header><article></article>");
}

#[test]
fn test_compile_post_bad_date() {
    let Source::Post(post) =
        load_source(r#"{"title": "T", "publishedAt": "soon", "content": []}"#).unwrap()
    else {
        panic!("expected a post");
    };
    let output = compile_post(&post, &CompileOptions::default());

    assert!(!output.contains("<time"));
}

#[test]
fn test_compile_post_cover_image() {
    let Source::Post(post) = load_source(
        r#"{
            "title": "Hero",
            "coverImage": {"url": "/media/hero.png", "alt": "A \"hero\" shot"},
            "content": []
        }"#,
    )
    .unwrap() else {
        panic!("expected a post");
    };
    let output = compile_post(&post, &compact());

    assert_eq!(
        output,
        r#"<div><img src="/media/hero.png" alt="A &quot;hero&quot; shot"></div><header><h1>Hero</h1></header><article></article>"#
    );
}

use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Content directory
    #[arg(short, long, default_value = "content")]
    pub src_dir: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_POST: &str = r##"{
  "title": "Hello, Folio",
  "slug": "hello-folio",
  "excerpt": "A first post with a little math.",
  "category": { "name": "Notes", "slug": "notes", "color": "#a855f7" },
  "author": { "name": "Folio" },
  "tags": [{ "tag": "intro" }],
  "status": "published",
  "publishedAt": "2024-01-01T00:00:00.000Z",
  "content": [
    {
      "type": "heading",
      "level": 2,
      "children": [{ "type": "text", "text": "Welcome" }]
    },
    {
      "type": "paragraph",
      "children": [
        { "type": "text", "text": "Inline math like $a^2 + b^2 = c^2$ sits in the line. " },
        { "type": "text", "text": "Bold", "bold": true },
        { "type": "text", "text": " and " },
        {
          "type": "link",
          "url": "https://katex.org",
          "newTab": true,
          "children": [{ "type": "text", "text": "links", "italic": true }]
        },
        { "type": "text", "text": " work too." }
      ]
    },
    {
      "type": "paragraph",
      "children": [{ "type": "text", "text": "$$\\sum_{k=1}^{n} k = \\frac{n(n+1)}{2}$$" }]
    }
  ]
}
"##;

/// File name of the example post, relative to the content directory.
const EXAMPLE_FILE: &str = "hello-folio.json";

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = Config::path(cwd);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists, use --force to overwrite it",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        return Ok(());
    }

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    fs::create_dir_all(&src_dir)
        .with_context(|| format!("failed to create {}", src_dir.display()))?;

    let mut created = Vec::new();

    let example_file = src_dir.join(EXAMPLE_FILE);
    if example_file.exists() {
        tracing::debug!(path = %example_file.display(), "Keeping existing example post");
    } else {
        fs::write(&example_file, EXAMPLE_POST)?;
        created.push(format!("{}/{}", args.src_dir, EXAMPLE_FILE));
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };
    config.save(cwd)?;
    created.push(DEFAULT_CONFIG_NAME.to_string());

    println!("{}", "📝 Folio is ready".bright_blue().bold());
    for path in &created {
        println!("  {} {}", "✓".green(), path);
    }
    println!();
    println!(
        "Run {} to write {}/{}",
        "folio render".bright_white(),
        args.out_dir,
        Path::new(EXAMPLE_FILE).with_extension("html").display()
    );

    Ok(())
}

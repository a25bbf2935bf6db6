use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use folio_compiler_html::{compile_post, compile_to_html, CompileOptions};
use folio_document::{load_file, Post, Source};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Content file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit HTML without indentation or newlines
    #[arg(long)]
    pub compact: bool,

    /// Omit the root container element
    #[arg(long)]
    pub fragment: bool,

    /// Also render posts whose status is `draft`
    #[arg(long)]
    pub drafts: bool,
}

/// Outcome of a render run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    /// Files with no published post to render.
    pub skipped: usize,
    pub failed: usize,
}

/// One HTML page produced from a content file.
struct Page {
    /// Output path relative to the output directory.
    path: PathBuf,
    html: String,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let summary = render_all(&args, cwd)?;

    println!();
    if summary.skipped > 0 {
        println!(
            "Skipped {} files with nothing published (pass --drafts to include drafts)",
            summary.skipped
        );
    }
    if summary.failed == 0 {
        println!(
            "{} Rendered {} files successfully",
            "✅".green(),
            summary.rendered
        );
    } else {
        println!(
            "{} Rendered {} files, {} errors",
            "⚠️".yellow(),
            summary.rendered,
            summary.failed
        );
    }

    Ok(())
}

fn render_all(args: &RenderArgs, cwd: &str) -> Result<Summary> {
    let config = Config::load(cwd)?;

    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut options = config.compile_options();
    if args.compact {
        options.pretty = false;
    }
    if args.fragment {
        options.wrap_root = false;
    }
    let drafts = args.drafts || config.drafts;

    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else {
        let files = find_content_files(&input);
        (input.clone(), files)
    };

    let mut summary = Summary::default();

    if files.is_empty() {
        println!("{}", "⚠️  No content files found".yellow());
        return Ok(summary);
    }

    println!("{}", "🔨 Rendering content...".bright_blue().bold());
    println!("Found {} files", files.len());

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);

        match render_file(file, relative_path, &out_dir, args.stdout, drafts, &options) {
            Ok(outputs) if outputs.is_empty() => {
                summary.skipped += 1;
                println!("  {} {} (nothing published)", "-".dimmed(), relative_path.display());
            }
            Ok(outputs) => {
                summary.rendered += 1;
                for output_path in outputs {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output_path
                    );
                }
            }
            Err(e) => {
                summary.failed += 1;
                tracing::debug!(file = %file.display(), error = ?e, "Render failed");
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    tracing::info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        failed = summary.failed,
        "Render finished"
    );

    Ok(summary)
}

fn find_content_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().and_then(|s| s.to_str()) == Some("json")
                && path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME)
        })
        .collect();

    files.sort();
    files
}

/// Render one content file, returning where each page went. Drafts are left
/// out unless `drafts` is set, so the list may be empty.
fn render_file(
    file_path: &Path,
    relative_path: &Path,
    out_dir: &Path,
    stdout: bool,
    drafts: bool,
    options: &CompileOptions,
) -> Result<Vec<String>> {
    let source = load_file(file_path)
        .with_context(|| format!("failed to load {}", file_path.display()))?;

    let mut outputs = Vec::new();

    for page in pages(&source, relative_path, drafts, options) {
        if stdout {
            println!("{}", page.html);
            outputs.push("stdout".to_string());
            continue;
        }

        let output_file = out_dir.join(&page.path);

        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&output_file, page.html)
            .with_context(|| format!("failed to write {}", output_file.display()))?;

        outputs.push(output_file.display().to_string());
    }

    Ok(outputs)
}

/// A single document or post maps to `<relative>.html`. A collection maps each
/// post to `<relative>/<slug>.html`, numbering posts that have no slug.
fn pages(source: &Source, relative_path: &Path, drafts: bool, options: &CompileOptions) -> Vec<Page> {
    let shown = |post: &Post| {
        let keep = drafts || post.is_published();
        if !keep {
            tracing::debug!(slug = %post.slug, "Skipping draft post");
        }
        keep
    };

    match source {
        Source::Document(nodes) => vec![Page {
            path: relative_path.with_extension("html"),
            html: compile_to_html(nodes, options),
        }],
        Source::Post(post) if shown(&**post) => vec![Page {
            path: relative_path.with_extension("html"),
            html: compile_post(post, options),
        }],
        Source::Post(_) => Vec::new(),
        Source::Posts(posts) => {
            let dir = relative_path.with_extension("");
            posts
                .iter()
                .enumerate()
                .filter(|(_, post)| shown(*post))
                .map(|(index, post)| {
                    let name = if post.slug.is_empty() {
                        format!("{}.html", index + 1)
                    } else {
                        format!("{}.html", post.slug)
                    };
                    Page {
                        path: dir.join(name),
                        html: compile_post(post, options),
                    }
                })
                .collect()
        }
    }
}

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mailclip_compiler_mjml::SerializeOptions;
use mailclip_editor::Document;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const TREE_EXTENSION: &str = ".tree.json";

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd).join(&args.path);
    let root = root.display().to_string();
    let config = Config::load(&root)?;
    let src_dir = config.get_src_dir(&root);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let out_dir = args
        .out_dir
        .as_ref()
        .or(config.out_dir.as_ref())
        .map(|out| PathBuf::from(&root).join(out));
    let options = config.to_serialize_options();

    println!("{}", "🔨 Compiling Mailclip templates...".bright_blue().bold());

    let tree_files = find_tree_files(&src_dir);

    if tree_files.is_empty() {
        println!("{}", "⚠️  No .tree.json files found".yellow());
        return Ok(());
    }

    println!("Found {} files", tree_files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for tree_file in &tree_files {
        let relative_path = tree_file.strip_prefix(&src_dir).unwrap_or(tree_file);
        let result = compile_file(tree_file, &options).and_then(|markup| {
            if args.stdout {
                println!("{}", markup);
                Ok("stdout".to_string())
            } else {
                let target = output_path(tree_file, &src_dir, out_dir.as_deref());
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, markup)?;
                Ok(target.display().to_string())
            }
        });

        match result {
            Ok(output) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), relative_path.display(), output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        Err(anyhow!(
            "Compiled {} files, {} failed",
            success_count,
            error_count
        ))
    }
}

/// All `*.tree.json` files under `dir`, sorted for stable output
pub fn find_tree_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(TREE_EXTENSION))
        })
        .collect();

    files.sort();
    files
}

/// Load a tree file and serialize it
pub fn compile_file(file_path: &Path, options: &SerializeOptions) -> Result<String> {
    let doc = Document::load(file_path)
        .with_context(|| format!("failed to load {}", file_path.display()))?;
    Ok(doc.markup_with_options(options))
}

/// `src/promo/sale.tree.json` → `<out>/promo/sale.mjml`, or next to the
/// source when there is no output directory
pub fn output_path(file_path: &Path, src_dir: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(TREE_EXTENSION).unwrap_or(file_name);
    let mjml_name = format!("{}.mjml", stem);

    match out_dir {
        Some(out) => {
            let relative = file_path.strip_prefix(src_dir).unwrap_or(file_path);
            match relative.parent() {
                Some(parent) => out.join(parent).join(mjml_name),
                None => out.join(mjml_name),
            }
        }
        None => file_path.with_file_name(mjml_name),
    }
}

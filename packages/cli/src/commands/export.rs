use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailclip_editor::{Document, TemplateRecord};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Template tree file (.tree.json)
    pub file: PathBuf,

    /// Record name (defaults to the file name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output file (defaults to <name>.record.json next to the template)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let file = PathBuf::from(cwd).join(&args.file);

    let record = build_record(&file, args.name, &config)?;

    let target = match args.out {
        Some(out) => PathBuf::from(cwd).join(out),
        None => file.with_file_name(format!("{}.record.json", record.name)),
    };
    fs::write(&target, serde_json::to_string_pretty(&record)?)?;

    println!(
        "{} Exported {} → {}",
        "✓".green(),
        record.name.bright_white(),
        target.display()
    );

    Ok(())
}

/// Load `file` and snapshot it as a record
pub fn build_record(file: &Path, name: Option<String>, config: &Config) -> Result<TemplateRecord> {
    let mut doc =
        Document::load(file).with_context(|| format!("failed to load {}", file.display()))?;
    if let Some(name) = name {
        doc.name = name;
    }
    Ok(doc.to_record(&config.to_serialize_options()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"[
        { "id": "t", "type": "mj-text", "attributes": {}, "content": "Thanks for your order" }
    ]"#;

    #[test]
    fn test_export_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join("receipt.tree.json"), TREE).unwrap();

        export(
            ExportArgs {
                file: PathBuf::from("receipt.tree.json"),
                name: None,
                out: None,
            },
            &cwd,
        )
        .unwrap();

        let json = fs::read_to_string(dir.path().join("receipt.record.json")).unwrap();
        let record: TemplateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.name, "receipt");
        assert_eq!(record.tree.len(), 1);
        assert!(record.markup.contains("Thanks for your order"));
    }

    #[test]
    fn test_export_with_custom_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("receipt.tree.json"), TREE).unwrap();

        let record = build_record(
            &dir.path().join("receipt.tree.json"),
            Some("Order receipt".to_string()),
            &Config::default(),
        )
        .unwrap();

        assert_eq!(record.name, "Order receipt");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_export_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_record(&dir.path().join("nope.tree.json"), None, &Config::default());
        assert!(result.is_err());
    }
}

use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailclip_document::{get_document_seed, ComponentType, IdGenerator, Node};
use std::fs;
use std::path::PathBuf;

const STARTER_NAME: &str = "welcome";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template directory
    #[arg(short, long, default_value = "templates")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Mailclip project...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let starter_file = src_dir.join(format!("{}.tree.json", STARTER_NAME));
    if !starter_file.exists() {
        let tree = serde_json::to_string_pretty(&starter_tree())?;
        fs::write(&starter_file, tree)?;
        println!("  {} Created {}.tree.json", "✓".green(), STARTER_NAME);
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: Some("dist".to_string()),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/{}.tree.json", args.src_dir, STARTER_NAME);
    println!("  2. Run: mailclip compile");
    println!("  3. Check output in dist/");

    Ok(())
}

/// One section with a heading and a call to action
fn starter_tree() -> Vec<Node> {
    let mut ids = IdGenerator::from_seed(get_document_seed(STARTER_NAME));

    let text = Node::from_definition(ids.new_id(), ComponentType::Text)
        .with_content("Welcome aboard!")
        .with_label("Heading");
    let button = Node::from_definition(ids.new_id(), ComponentType::Button)
        .with_attribute("href", "https://example.com")
        .with_content("Get started");
    let column = Node::from_definition(ids.new_id(), ComponentType::Column)
        .with_children(vec![text, button]);

    vec![Node::from_definition(ids.new_id(), ComponentType::Section)
        .with_label("Hero")
        .with_children(vec![column])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_starter() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(
            InitArgs {
                src_dir: "emails".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir.as_deref(), Some("dist"));

        let starter = fs::read_to_string(dir.path().join("emails/welcome.tree.json")).unwrap();
        let nodes: Vec<Node> = serde_json::from_str(&starter).unwrap();
        assert_eq!(nodes, starter_tree());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"srcDir": "mine"}"#).unwrap();

        init(
            InitArgs {
                src_dir: "templates".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        assert_eq!(Config::load(&cwd).unwrap().src_dir, "mine");
        assert!(!dir.path().join("templates").exists());
    }

    #[test]
    fn test_starter_tree_is_valid() {
        let nodes = starter_tree();
        assert!(mailclip_document::validate(&nodes).is_empty());
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

/// SwipeQuiz - answer a few questions, swipe through matching products
#[derive(Parser, Debug)]
#[command(name = "swipequiz")]
#[command(about = "Product recommendation quiz with a swipeable results carousel")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding questions.json and products.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the on-disk data cache
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Neither read nor write the data cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Write logs to this file (the interactive UI discards logs otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the interactive quiz (default)
    Run,
    /// Filter the catalog with the given answers and print the matches
    Filter {
        /// Answer of the category step (matched against gender and labels)
        #[arg(long)]
        category: Option<String>,
        /// Answer of the color step
        #[arg(long)]
        color: Option<String>,
        /// Answer of the price step, e.g. "500-1000" or "1000-"
        #[arg(long)]
        price: Option<String>,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load questions and products and report what was found
    Validate,
    /// Print the quiz steps and their answers
    Questions,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Effective configuration: file values overridden by flags
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if self.no_cache {
            config.use_cache = false;
        }
        if let Some(file) = &self.log_file {
            config.log_file = Some(file.clone());
        }
    }

    /// Whether the interactive terminal UI will run
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_no_args_is_interactive() {
        let cli = Cli::try_parse_from(["swipequiz"]).unwrap();
        assert!(cli.is_interactive());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_filter_command() {
        let cli = Cli::try_parse_from([
            "swipequiz",
            "filter",
            "--category",
            "Women",
            "--price",
            "500-1000",
            "--json",
        ])
        .unwrap();
        assert!(!cli.is_interactive());
        assert_eq!(
            cli.command,
            Some(Commands::Filter {
                category: Some("Women".to_string()),
                color: None,
                price: Some("500-1000".to_string()),
                json: true,
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["swipequiz", "validate", "--data-dir", "/srv/quiz", "--no-cache"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/quiz"));
        assert!(!config.use_cache);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_dir": "from-file", "drag_threshold_px": 50.0}}"#).unwrap();
        file.flush().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["swipequiz", "--config", path, "--cache-dir", "/tmp/c"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("from-file"));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/c")));
        assert_eq!(config.drag_threshold_px, 50.0);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cell_width_px": 0.0}}"#).unwrap();
        file.flush().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["swipequiz", "--config", path]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(["swipequiz", "install"]).is_err());
    }
}

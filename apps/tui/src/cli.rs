use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "sports_mapper",
    version,
    about = "Map sports feed names onto a canonical catalog"
)]
pub struct CliArgs {
    /// Print catalog stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Use the built-in demo catalog instead of the API
    #[arg(long)]
    pub demo: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the catalog API endpoint
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the log file used by the terminal UI
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("MAPPER_API_URL", url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("MAPPER_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "sports_mapper",
            "--headless",
            "--json",
            "--demo",
            "--api-url",
            "https://feeds.example.com/api.php",
        ])?;

        assert!(args.headless && args.json && args.demo);
        assert!(!args.debug);
        assert_eq!(
            args.api_url.as_deref(),
            Some("https://feeds.example.com/api.php")
        );
        assert_eq!(args.log_file, None);
        Ok(())
    }

    #[test]
    fn help_lists_overrides() {
        let help = CliArgs::help_text();
        assert!(help.contains("--api-url"));
        assert!(help.contains("--log-file"));
        assert!(help.contains("--demo"));
    }
}

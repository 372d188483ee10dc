use clap::Parser;
use issueboard_core::ConfigLoader;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Terminal panel listing open Gitea issues")]
pub struct Cli {
    /// Directory holding config.toml. Defaults to $ISSUEBOARD_HOME or
    /// ~/.issueboard.
    #[arg(long = "config-home", value_name = "DIR")]
    pub config_home: Option<PathBuf>,

    /// Directory for log files. Defaults to `log/` under the config home.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Refresh once, print the panel as plain text, and exit.
    #[arg(long = "once", default_value_t = false)]
    pub once: bool,
}

impl Cli {
    /// Settings loader honouring `--config-home`.
    pub fn config_loader(&self) -> ConfigLoader {
        match &self.config_home {
            Some(home) => ConfigLoader::new().with_home(home.clone()),
            None => ConfigLoader::new(),
        }
    }

    /// Resolve the log directory from the flags, falling back to `log/`
    /// under the home directory the config loader reads from.
    pub fn resolve_log_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Some(dir.clone());
        }
        self.config_loader()
            .resolve_home()
            .ok()
            .map(|home| home.join("log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["issueboard", "--config-home", "/tmp/ib", "--once"]);
        assert_eq!(cli.config_home, Some(PathBuf::from("/tmp/ib")));
        assert!(cli.once);
        assert_eq!(cli.resolve_log_dir(), Some(PathBuf::from("/tmp/ib/log")));
    }

    #[test]
    fn explicit_log_dir_wins() {
        let cli = Cli::parse_from(["issueboard", "--config-home", "/tmp/ib", "--log-dir", "/var/log/ib"]);
        assert_eq!(cli.resolve_log_dir(), Some(PathBuf::from("/var/log/ib")));
    }

    #[test]
    #[serial]
    fn log_dir_follows_the_loader_home() {
        let dir = tempfile::tempdir().unwrap();
        unsafe {
            std::env::set_var("ISSUEBOARD_HOME", dir.path());
        }

        let cli = Cli::parse_from(["issueboard"]);
        let home = ConfigLoader::new().resolve_home().unwrap();
        assert_eq!(home, dir.path());
        assert_eq!(cli.resolve_log_dir(), Some(dir.path().join("log")));

        unsafe {
            std::env::remove_var("ISSUEBOARD_HOME");
        }
    }
}

use clap::builder::BoolishValueParser;
use clap::Args;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "27017";
pub const DEFAULT_DUMP_DIR: &str = "dump";
pub const DEFAULT_MONGODUMP: &str = "mongodump";
pub const DEFAULT_MONGORESTORE: &str = "mongorestore";

/// Runtime settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Prefilled answer for the hostname question.
    pub host: String,
    /// Prefilled answer for the port question.
    pub port: String,
    /// Name of the dump directory below the working directory.
    pub dump_dir: String,
    pub mongodump: String,
    pub mongorestore: String,
    /// Print the assembled command instead of running it.
    pub dry_run: bool,
    /// Exit 0 even when the tool failed.
    pub legacy_exit: bool,
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            dump_dir: DEFAULT_DUMP_DIR.to_string(),
            mongodump: DEFAULT_MONGODUMP.to_string(),
            mongorestore: DEFAULT_MONGORESTORE.to_string(),
            dry_run: false,
            legacy_exit: false,
            banner: true,
        }
    }
}

/// Command-line and environment overrides. Every field is optional, so a bare
/// `mogd` stays fully interactive.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Default answer for the hostname prompt
    #[arg(long, env = "MOGD_HOST", value_name = "HOST")]
    pub host: Option<String>,

    /// Default answer for the port prompt
    #[arg(long, env = "MOGD_PORT", value_name = "PORT")]
    pub port: Option<String>,

    /// Dump directory looked up below the working directory
    #[arg(long, env = "MOGD_DUMP_DIR", value_name = "NAME")]
    pub dump_dir: Option<String>,

    /// mongodump executable to run
    #[arg(long, env = "MOGD_MONGODUMP", value_name = "PROGRAM", hide = true)]
    pub mongodump: Option<String>,

    /// mongorestore executable to run
    #[arg(long, env = "MOGD_MONGORESTORE", value_name = "PROGRAM", hide = true)]
    pub mongorestore: Option<String>,

    /// Print the assembled command as JSON and exit without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 0 even when the tool fails
    #[arg(long, env = "MOGD_LEGACY_EXIT", value_parser = BoolishValueParser::new())]
    pub legacy_exit: bool,

    /// Skip the welcome line
    #[arg(long)]
    pub no_banner: bool,
}

impl ConfigArgs {
    /// Layer these overrides on top of the built-in defaults.
    pub fn into_config(self) -> Config {
        let base = Config::default();
        Config {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            dump_dir: self
                .dump_dir
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(base.dump_dir),
            mongodump: self.mongodump.unwrap_or(base.mongodump),
            mongorestore: self.mongorestore.unwrap_or(base.mongorestore),
            dry_run: self.dry_run,
            legacy_exit: self.legacy_exit,
            banner: !self.no_banner,
        }
    }
}

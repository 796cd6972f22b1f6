//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Log level options for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational and success messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// tasl - manage slide topics stored as wrapper/topic file pairs.
#[derive(Debug, Parser)]
#[command(name = "tasl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Set log level; overrides RUST_LOG and the config file
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file path (defaults to $TASL_CONFIG, then the platform config dir)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// tasl subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create new topic files in the destination folder
    Create {
        /// Title of the new topic
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Overwrite existing topic files
        #[arg(long)]
        overwrite: bool,

        /// Basename of the template pair (e.g. template1)
        #[arg(long)]
        template: Option<String>,

        /// Folder for the new files
        #[arg(long, default_value = ".")]
        destination: PathBuf,
    },

    /// Split guide documents into topics, one per level-1 section
    #[command(alias = "scanl")]
    Scan {
        /// Guide documents to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        write: WriteArgs,

        /// Keep lines inside fenced code as topic content
        #[arg(long)]
        keep_code: bool,
    },

    /// Copy topics (wrapper, topic, and assets) to another folder
    Copy {
        /// Wrapper files of the topics to copy
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Rename a topic's files, include reference, and title
    Rename {
        /// Wrapper file of the topic
        wrapper: PathBuf,

        /// New topic title
        #[arg(value_name = "NEW_TOPIC")]
        new_topic: String,

        /// Perform the rename
        #[arg(long)]
        confirm: bool,
    },

    /// Delete a topic's wrapper and topic files
    Delete {
        /// Wrapper file of the topic
        wrapper: PathBuf,

        /// Perform the delete
        #[arg(long)]
        confirm: bool,
    },

    /// List topics by keyword and tag, optionally editing the matches
    List(ListArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by commands that write into a destination.
#[derive(Debug, Clone, Args)]
pub struct WriteArgs {
    /// Write files; without this only report what would happen
    #[arg(long)]
    pub confirm: bool,

    /// Destination folder
    #[arg(long, default_value = ".")]
    pub destination: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments of `tasl list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Keyword filters: +word includes, -word excludes, bare words include.
    /// Put them after `--` when the first one starts with `-`.
    #[arg(allow_hyphen_values = true)]
    pub filters: Vec<String>,

    /// Add a tag to the matching topics
    #[arg(long)]
    pub add_tag: Option<String>,

    /// Remove a tag from the matching topics
    #[arg(long)]
    pub remove_tag: Option<String>,

    /// Only topics carrying any of these comma-separated tags
    #[arg(long, value_name = "TAGS")]
    pub with_tags: Option<String>,

    /// Drop topics carrying any of these comma-separated tags
    #[arg(long, value_name = "TAGS")]
    pub without_tags: Option<String>,

    /// Perform tag edits, deletes, and copies
    #[arg(long)]
    pub confirm: bool,

    /// Delete the matching topics
    #[arg(long)]
    pub delete: bool,

    /// Copy the matching topics to --destination
    #[arg(long, requires = "destination")]
    pub copy: bool,

    /// Destination folder for --copy
    #[arg(long)]
    pub destination: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Get a configuration value by dotted key (e.g. tags.namespace)
    Get {
        /// Dotted key
        key: String,
    },

    /// Create a config file with default values
    Init {
        /// Write to this path instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

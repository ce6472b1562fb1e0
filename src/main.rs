// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use artran::app_config::{self, Config, TranslationProvider};
use artran::file_utils::FileManager;
use artran::{Controller, TranslationSession};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch an article and show it with its code blocks protected
    Fetch(FetchArgs),

    /// Fetch, translate and save an article
    Translate(TranslateArgs),

    /// Generate shell completions for artran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Article URL
    #[arg(value_name = "URL", required_unless_present = "from_file")]
    url: Option<String>,

    /// Read Markdown from a local file instead of fetching
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Article URL
    #[arg(value_name = "URL", required_unless_present = "from_file")]
    url: Option<String>,

    /// Read Markdown from a local file instead of fetching
    #[arg(long, value_name = "PATH")]
    from_file: Option<PathBuf>,

    /// Directory to save the original and translated Markdown into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Target language code (e.g., 'zh', 'de', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Fail instead of warning when a code block placeholder is lost
    #[arg(long)]
    strict: bool,
}

/// artran - AI article translator
///
/// Fetches a web article as Markdown, keeps its code blocks out of reach of the
/// model, translates the prose and puts the code back.
#[derive(Parser, Debug)]
#[command(name = "artran")]
#[command(version)]
#[command(about = "AI-powered web article translation that leaves code blocks untouched")]
#[command(long_about = "artran fetches a web article as Markdown, replaces fenced code blocks with placeholders, \
translates the remaining text with an LLM and restores the original code.

EXAMPLES:
    artran fetch https://example.com/blog/post.html          # Preview the protected Markdown
    artran translate https://example.com/blog/post.html      # Translate with the default config
    artran translate -t de -o out/ https://example.com/post  # Translate to German into out/
    artran translate -p anthropic --from-file post.md        # Translate a local Markdown file
    artran completions bash > artran.bash                    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_MODEL,
    ANTHROPIC_API_KEY and ANTHROPIC_MODEL override the file.

SUPPORTED PROVIDERS:
    openai    - OpenAI API or any compatible endpoint (requires API key)
    anthropic - Anthropic Claude API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "artran", &mut std::io::stdout());
            Ok(())
        }
        Commands::Fetch(args) => {
            let config = load_config(&cli.config_path, cli.log_level.as_ref())?;
            run_fetch(config, args).await
        }
        Commands::Translate(args) => {
            let mut config = load_config(&cli.config_path, cli.log_level.as_ref())?;
            apply_translate_overrides(&mut config, &args);
            run_translate(config, args).await
        }
    }
}

/// Load the configuration file, creating a default one if it does not exist
fn load_config(config_path: &str, cli_log_level: Option<&CliLogLevel>) -> Result<Config> {
    let mut config = if FileManager::file_exists(config_path) {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.apply_env_overrides();

    // Update log level in config if specified via command line
    match cli_log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn apply_translate_overrides(config: &mut Config, args: &TranslateArgs) {
    if let Some(provider) = &args.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &args.model {
        let provider = config.translation.provider.clone();
        config.translation.provider_config_mut(&provider).model = model.clone();
    }

    if let Some(target_lang) = &args.target_language {
        config.target_language = target_lang.clone();
    }
}

/// Load the article from a file or the reader service
async fn load_session(controller: &Controller, url: Option<String>, from_file: Option<&Path>) -> Result<TranslationSession> {
    match (from_file, url) {
        (Some(path), url) => controller.protect_file(path, url),
        (None, Some(url)) => controller.fetch_and_protect(&url).await,
        (None, None) => Err(anyhow!("Either a URL or --from-file is required")),
    }
}

async fn run_fetch(config: Config, args: FetchArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let session = load_session(&controller, args.url, args.from_file.as_deref()).await?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "## Original Markdown\n\n{}\n", session.original_markdown)?;
    writeln!(stdout, "## Protected Markdown (sent to the LLM)\n\n{}\n", session.protected_markdown)?;
    writeln!(stdout, "{} code block(s) protected", session.protected_block_count())?;

    Ok(())
}

async fn run_translate(config: Config, args: TranslateArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;

    // Credentials are checked before anything goes over the network
    controller.config().validate()
        .context("Configuration validation failed")?;
    let translator = controller.translator()?;

    let mut session = load_session(&controller, args.url, args.from_file.as_deref()).await?;
    controller.translate_session(&mut session, &translator, args.strict).await?;

    if let Some(translated) = session.translated_markdown.as_deref() {
        writeln!(std::io::stdout(), "{}", translated)?;
    }

    if session.is_ready_for_download() {
        controller.save_downloads(&session, &args.output_dir)?;
    } else {
        warn!("Translation is empty; nothing saved");
    }

    Ok(())
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use yamler::app_config::{self, Config, TranslationProvider};
use yamler::browser::FileBrowser;
use yamler::file_utils::FileManager;
use yamler::language_utils::{get_language_name, normalize_to_part1_or_part2t};
use yamler::providers::build_provider;
use yamler::review::ConsoleReviewer;
use yamler::session::{SessionOptions, SessionOutcome, TranslationSession};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
    Anthropic,
    #[value(hide = true)]
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
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
    /// Translate a YAML message file (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for yamler
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Source YAML file; when omitted, a directory browser is shown
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Target file name (".yml" is appended if missing); prompted when omitted
    #[arg(long)]
    target: Option<String>,

    /// Directory holding the source and target files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the selected provider
    #[arg(long, env = "YAMLER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Source language code (e.g., 'en', or 'auto' to detect)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'ru', 'de', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Discard a leftover staging file from an earlier run
    #[arg(short, long)]
    force: bool,
}

/// YAMLer - interactive translation of YAML message files
///
/// Translates the quoted values of a YAML message file while keeping
/// placeholders, color codes and tags intact. Every new value is shown for
/// review; keys already present in the target file are reused.
#[derive(Parser, Debug)]
#[command(name = "yamler")]
#[command(version)]
#[command(about = "Interactive machine translation of YAML message files")]
#[command(long_about = "YAMLer translates the values of a YAML message file line by line and asks you to review every new value.

EXAMPLES:
    yamler                                      # Browse the current directory for a file
    yamler translate messages.yml --target ru   # Translate into ru.yml next to the source
    yamler translate -t de -p ollama en.yml     # Translate to German with a local Ollama model
    yamler translate --force en.yml --target ru # Discard a stale ru.yml.tmp first
    yamler completions bash > yamler.bash       # Generate bash completions

REVIEW COMMANDS (configurable in conf.json):
    =-      accept the suggested translation
    =-=     keep the original text
    =-=-    save progress and exit
    other   use the typed text as the translation

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());
            let _ = writeln!(io::stderr(), "{}{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Level is adjusted once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yamler", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        // No subcommand: translate with defaults, starting in the browser
        None => run_translate(TranslateArgs::parse_from(["yamler"])).await,
    }
}

/// Load the config file and apply command line overrides
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.active_provider_config_mut().api_key = api_key.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // Backends expect the short form ("ru", not "rus")
    config.target_language = normalize_to_part1_or_part2t(&config.target_language)?;

    Ok(config)
}

/// Resolve the source and target paths from arguments or the browser.
/// Returns `None` when the user quits the browser.
fn resolve_paths(options: &TranslateArgs, config: &Config) -> Result<Option<(PathBuf, PathBuf)>> {
    let stdin = io::stdin();
    let mut browser = FileBrowser::new(stdin.lock(), io::stdout(), config.session.page_size);

    let (source, dir) = match &options.source {
        Some(source) => {
            if !FileManager::file_exists(source) {
                return Err(anyhow!("Source file does not exist: {:?}", source));
            }
            let dir = match &options.dir {
                Some(dir) => dir.clone(),
                None => source
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
                    .to_path_buf(),
            };
            (source.clone(), dir)
        }
        None => {
            let dir = match &options.dir {
                Some(dir) if FileManager::dir_exists(dir) => dir.clone(),
                Some(dir) => return Err(anyhow!("Directory does not exist: {:?}", dir)),
                None => {
                    let cwd = std::env::current_dir().context("Failed to get current directory")?;
                    browser.prompt_directory(&cwd)?
                }
            };
            match browser.select_file(&dir)? {
                Some(source) => (source, dir),
                None => return Ok(None),
            }
        }
    };

    let target = match options.target.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => dir.join(FileManager::with_yml_extension(name)),
        _ => browser.prompt_target_name(&dir)?,
    };

    if target == source {
        return Err(anyhow!("Target file must differ from the source file: {:?}", target));
    }

    Ok(Some((source, target)))
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    println!("\n                     -=-=   YAMLer   =-=-");

    let Some((source, target)) = resolve_paths(&options, &config)? else {
        info!("No file selected, nothing to do.");
        return Ok(());
    };

    let language_name = get_language_name(&config.target_language)
        .unwrap_or_else(|_| config.target_language.clone());
    info!("Translating {:?} into {:?} ({})", source, target, language_name);

    let provider = build_provider(&config)?;
    debug!("Using provider {}", provider.name());

    let session = TranslationSession::open(&source, &target, SessionOptions::from_config(&config, options.force))?;

    let stdin = io::stdin();
    let mut reviewer = ConsoleReviewer::new(stdin.lock(), io::stdout(), config.review.clone());
    let report = session.run(provider.as_ref(), &mut reviewer).await?;

    info!("Summary: {}", report.stats);
    match report.outcome {
        SessionOutcome::SavedAndStopped { key } => {
            println!("\nChanges saved (stopped at '{}'). Exiting.", key);
        }
        SessionOutcome::Completed => {
            println!("\nTranslation complete.");
        }
    }

    Ok(())
}

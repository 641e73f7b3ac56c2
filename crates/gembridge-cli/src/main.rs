use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use gembridge_application::{ConversationOrchestrator, GetChatResponseUseCase, SubmitOutcome};
use gembridge_core::generation::{GenerationConfig, TEMPERATURE_RANGE, TOP_K_RANGE, TOP_P_RANGE};
use gembridge_core::secret::SecretService;
use gembridge_infrastructure::{GEMINI_API_KEY_ENV, SecretServiceImpl};
use gembridge_interaction::{BackendKind, BackendOptions, create_generation_service};

mod commands;
mod logging;
mod render;

use commands::{COMMANDS, ReplCommand};
use render::{RenderLine, TranscriptRenderer};

#[derive(Parser)]
#[command(name = "gembridge")]
#[command(about = "GemBridge - chat with a generative-AI backend from the terminal", long_about = None)]
struct Cli {
    /// Generation backend: `mock` or `gemini`
    #[arg(long, default_value = "mock")]
    backend: BackendKind,

    /// Gemini model name (overrides secret.json)
    #[arg(long)]
    model: Option<String>,

    /// Simulated latency of the mock backend, in milliseconds
    #[arg(long, default_value_t = 1500)]
    mock_latency_ms: u64,

    /// Directory holding secret.json (defaults to the platform config directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`)
    #[arg(long)]
    log_level: Option<String>,
}

/// Readline helper: completes slash commands, colours them by validity and
/// hints the argument a command expects.
#[derive(Clone, Copy, Default)]
struct CliHelper;

impl CliHelper {
    /// Hint for the text typed so far, if any.
    fn hint_for(line: &str) -> Option<String> {
        if !line.starts_with('/') {
            return None;
        }
        match line.split_once(' ') {
            // "/tem" -> "perature <number>"
            None => COMMANDS
                .iter()
                .find(|(name, _)| name.starts_with(line) && name.len() > line.len())
                .map(|(name, usage)| {
                    let rest = &name[line.len()..];
                    if usage.is_empty() {
                        rest.to_string()
                    } else {
                        format!("{rest} {usage}")
                    }
                }),
            // "/temperature " -> "<number>"
            Some((command, argument)) if argument.is_empty() => commands::usage_of(command)
                .filter(|usage| !usage.is_empty())
                .map(str::to_string),
            Some(_) => None,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if !typed.starts_with('/') || typed.contains(' ') {
            return Ok((pos, Vec::new()));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|(name, _)| name.starts_with(typed))
            .map(|(name, usage)| Pair {
                display: format!("{name} {usage}").trim_end().to_string(),
                replacement: if usage.is_empty() {
                    name.to_string()
                } else {
                    format!("{name} ")
                },
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        let command = line.split_whitespace().next().unwrap_or(line);
        match commands::usage_of(command) {
            Some(_) => Owned(line.bright_cyan().to_string()),
            None => Owned(line.yellow().to_string()),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        Self::hint_for(&line[..pos])
    }
}

impl Validator for CliHelper {}

fn print_line(line: &RenderLine, config: &GenerationConfig) {
    match line {
        RenderLine::User(text) => println!("{}", format!("> {text}").green()),
        RenderLine::Assistant(text) => {
            for text_line in text.lines() {
                println!("{}", text_line.bright_blue());
            }
            println!();
        }
        RenderLine::Thinking => println!("{}", "... thinking".bright_black()),
        RenderLine::Error(error) => println!("{}", format!("Error: {error}").red()),
        RenderLine::SettingsPanel { open: true } => print_settings(config),
        RenderLine::SettingsPanel { open: false } => {
            println!("{}", "Settings closed.".bright_black())
        }
    }
}

fn print_settings(config: &GenerationConfig) {
    println!("{}", "--- Settings ---".bright_yellow());
    println!(
        "  temperature   {:<6} (slider {:?})",
        config.temperature, TEMPERATURE_RANGE
    );
    println!("  topP          {:<6} (slider {:?})", config.top_p, TOP_P_RANGE);
    println!("  topK          {:<6} (slider {:?})", config.top_k, TOP_K_RANGE);
    println!("  system prompt \"{}\"", config.system_prompt);
    if !config.is_within_ui_ranges() {
        println!(
            "{}",
            "  note: some values are outside the usual ranges and will be sent as-is".yellow()
        );
    }
}

fn print_help() {
    println!("{}", "Type a message and press enter to send it.".bright_black());
    println!("{}", "  /settings            open or close the settings panel".bright_black());
    println!("{}", "  /temperature <f>     set sampling temperature".bright_black());
    println!("{}", "  /topp <f>            set nucleus sampling threshold".bright_black());
    println!("{}", "  /topk <n>            set candidate pool size".bright_black());
    println!("{}", "  /system <text>       set the system instruction".bright_black());
    println!("{}", "  /reset-config        restore default settings".bright_black());
    println!("{}", "  quit | exit          leave".bright_black());
}

/// Entry point: wires the backend, the orchestrator and a readline REPL.
///
/// The REPL is a thin presentation host. It forwards intents to the
/// orchestrator and prints whatever the published state says, from a
/// background task subscribed to state changes.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    // ===== Backend Initialization =====
    let secret_service = SecretServiceImpl::new(cli.config_dir.as_deref())?
        .with_env_api_key(std::env::var(GEMINI_API_KEY_ENV).ok());
    let secrets = secret_service
        .load_secrets()
        .await
        .with_context(|| format!("failed to load {}", secret_service.file_path().display()))?;

    let options = BackendOptions {
        mock_latency: Duration::from_millis(cli.mock_latency_ms),
        model: cli.model.clone(),
    };
    let service = create_generation_service(cli.backend, &secrets, &options)?;
    let orchestrator =
        ConversationOrchestrator::new(Arc::new(GetChatResponseUseCase::new(service)));

    // Session settings live in the presentation layer and travel with every submit.
    let config = Arc::new(std::sync::RwLock::new(GenerationConfig::default()));

    // ===== Renderer =====
    let mut state_rx = orchestrator.subscribe();
    let render_config = Arc::clone(&config);
    let renderer = tokio::spawn(async move {
        let mut transcript = TranscriptRenderer::new();
        while state_rx.changed().await.is_ok() {
            let snapshot = state_rx.borrow_and_update().clone();
            let config = render_config
                .read()
                .map(|config| config.clone())
                .unwrap_or_default();
            for line in transcript.render(&snapshot) {
                print_line(&line, &config);
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== GemBridge ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Backend: {}. Type '/help' for commands, 'quit' to exit.", cli.backend.as_str())
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let command = ReplCommand::parse(&line);
                if !matches!(command, ReplCommand::Empty) {
                    let _ = rl.add_history_entry(&line);
                }

                match command {
                    ReplCommand::Empty => continue,
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => print_help(),
                    ReplCommand::ToggleSettings => orchestrator.toggle_settings_panel(),
                    ReplCommand::Invalid(reason) => println!("{}", reason.yellow()),
                    ReplCommand::Message(text) => {
                        let current = config
                            .read()
                            .map(|config| config.clone())
                            .unwrap_or_default();
                        match orchestrator.submit(&text, current) {
                            SubmitOutcome::RejectedBusy => println!(
                                "{}",
                                "Still waiting for the previous reply; message not sent.".yellow()
                            ),
                            SubmitOutcome::RuntimeUnavailable => println!(
                                "{}",
                                "Message not sent: no async runtime available.".red()
                            ),
                            SubmitOutcome::IgnoredBlank | SubmitOutcome::Dispatched(_) => {}
                        }
                    }
                    settings => {
                        if let Ok(mut current) = config.write() {
                            settings.apply_to(&mut current);
                            println!("{}", "Settings updated.".bright_black());
                            if orchestrator.snapshot().is_settings_open() {
                                print_settings(&current);
                            }
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    renderer.abort();

    Ok(())
}

//! REPL input parsing.

use gembridge_core::generation::GenerationConfig;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Plain text to send to the backend.
    Message(String),
    ToggleSettings,
    SetTemperature(f32),
    SetTopP(f32),
    SetTopK(i32),
    SetSystemPrompt(String),
    ResetConfig,
    Help,
    Quit,
    /// A slash command that could not be understood.
    Invalid(String),
    /// Nothing to do (blank line).
    Empty,
}

/// Slash commands and the argument each one expects (empty when none).
pub const COMMANDS: &[(&str, &str)] = &[
    ("/settings", ""),
    ("/temperature", "<number>"),
    ("/topp", "<number>"),
    ("/topk", "<integer>"),
    ("/system", "<instruction text>"),
    ("/reset-config", ""),
    ("/help", ""),
];

/// Returns the argument placeholder for `command`, or `None` for unknown commands.
pub fn usage_of(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, usage)| *usage)
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }
        if trimmed == "quit" || trimmed == "exit" {
            return ReplCommand::Quit;
        }
        if !trimmed.starts_with('/') {
            return ReplCommand::Message(trimmed.to_string());
        }

        let (command, argument) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match command {
            "/settings" => ReplCommand::ToggleSettings,
            "/reset-config" => ReplCommand::ResetConfig,
            "/help" => ReplCommand::Help,
            "/temperature" => parse_number(command, argument, ReplCommand::SetTemperature),
            "/topp" => parse_number(command, argument, ReplCommand::SetTopP),
            "/topk" => parse_number(command, argument, ReplCommand::SetTopK),
            "/system" if !argument.is_empty() => {
                ReplCommand::SetSystemPrompt(argument.to_string())
            }
            "/system" => ReplCommand::Invalid(format!(
                "usage: /system {}",
                usage_of("/system").unwrap_or_default()
            )),
            other => ReplCommand::Invalid(format!("unknown command: {other}")),
        }
    }

    /// Applies a settings command to `config`. Returns `false` for anything
    /// that is not a settings change.
    pub fn apply_to(&self, config: &mut GenerationConfig) -> bool {
        match self {
            ReplCommand::SetTemperature(value) => config.temperature = *value,
            ReplCommand::SetTopP(value) => config.top_p = *value,
            ReplCommand::SetTopK(value) => config.top_k = *value,
            ReplCommand::SetSystemPrompt(text) => config.system_prompt = text.clone(),
            ReplCommand::ResetConfig => *config = GenerationConfig::default(),
            _ => return false,
        }
        true
    }
}

fn parse_number<T: std::str::FromStr>(
    command: &str,
    argument: &str,
    build: impl FnOnce(T) -> ReplCommand,
) -> ReplCommand {
    match argument.parse::<T>() {
        Ok(value) => build(value),
        Err(_) => ReplCommand::Invalid(format!(
            "usage: {command} {}",
            usage_of(command).unwrap_or("<number>")
        )),
    }
}

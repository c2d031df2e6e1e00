//! Chat command grammar.
//!
//! ```text
//! <prefix>emote <channel_name> <emote_name>
//! <prefix>global <emote_name>
//! ```
//!
//! Arguments are whitespace separated and extra arguments are ignored.
//! Lines without the prefix, and unknown command names, are not commands.

use imgify_providers::EmoteRequest;
use thiserror::Error;

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Look up an emote in a channel.
    Emote {
        /// Channel login.
        channel: String,
        /// Emote name.
        emote: String,
    },
    /// Look up a global emote.
    Global {
        /// Emote name.
        emote: String,
    },
}

/// A recognised command with unusable arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A positional argument was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
}

impl From<ChatCommand> for EmoteRequest {
    fn from(command: ChatCommand) -> Self {
        match command {
            ChatCommand::Emote { channel, emote } => EmoteRequest::Channel { channel, emote },
            ChatCommand::Global { emote } => EmoteRequest::Global { emote },
        }
    }
}

/// Parses one chat line.
///
/// Returns `None` when the line is not addressed to this bot.
pub fn parse(line: &str, prefix: &str) -> Option<Result<ChatCommand, CommandError>> {
    let body = line.trim_start().strip_prefix(prefix)?;

    // The command name must follow the prefix directly.
    if body.starts_with(char::is_whitespace) {
        return None;
    }

    let mut words = body.split_whitespace();
    let command = match words.next()? {
        "emote" => {
            let channel = words.next();
            let emote = words.next();
            match (channel, emote) {
                (None, _) => Err(CommandError::MissingArgument("channel_name")),
                (Some(_), None) => Err(CommandError::MissingArgument("emote_name")),
                (Some(channel), Some(emote)) => Ok(ChatCommand::Emote {
                    channel: channel.to_string(),
                    emote: emote.to_string(),
                }),
            }
        }
        "global" => words
            .next()
            .map(|emote| ChatCommand::Global {
                emote: emote.to_string(),
            })
            .ok_or(CommandError::MissingArgument("emote_name")),
        _ => return None,
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emote_command() {
        assert_eq!(
            parse("^emote cohhcarnage cohhLUL", "^"),
            Some(Ok(ChatCommand::Emote {
                channel: "cohhcarnage".to_string(),
                emote: "cohhLUL".to_string(),
            }))
        );
    }

    #[test]
    fn test_global_command() {
        assert_eq!(
            parse("^global   Kappa  ", "^"),
            Some(Ok(ChatCommand::Global {
                emote: "Kappa".to_string()
            }))
        );
    }

    #[test]
    fn test_extra_arguments_ignored() {
        assert_eq!(
            parse("^global Kappa please", "^"),
            Some(Ok(ChatCommand::Global {
                emote: "Kappa".to_string()
            }))
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            parse("^emote", "^"),
            Some(Err(CommandError::MissingArgument("channel_name")))
        );
        assert_eq!(
            parse("^emote forsen", "^"),
            Some(Err(CommandError::MissingArgument("emote_name")))
        );
        assert_eq!(
            parse("^global", "^"),
            Some(Err(CommandError::MissingArgument("emote_name")))
        );
        assert_eq!(
            CommandError::MissingArgument("emote_name").to_string(),
            "Missing required argument: emote_name"
        );
    }

    #[test]
    fn test_not_commands() {
        assert_eq!(parse("hello chat", "^"), None);
        assert_eq!(parse("^help", "^"), None);
        assert_eq!(parse("^ emote a b", "^"), None);
        assert_eq!(parse("^", "^"), None);
        assert_eq!(parse("!emote a b", "^"), None);
    }

    #[test]
    fn test_custom_prefix() {
        assert!(matches!(parse("!!global Kappa", "!!"), Some(Ok(_))));
        assert_eq!(parse("^global Kappa", "!!"), None);
    }

    #[test]
    fn test_into_request() {
        let request: EmoteRequest = ChatCommand::Emote {
            channel: "forsen".to_string(),
            emote: "forsenE".to_string(),
        }
        .into();
        assert_eq!(request, EmoteRequest::channel("forsen", "forsenE"));
    }
}

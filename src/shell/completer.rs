//! Command name completion for the interactive shell

use reedline::{Completer, Span, Suggestion};

use super::commands::COMMANDS;

/// Completes the command name at the start of the line
#[derive(Debug, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let Some(line_to_pos) = line.get(..pos) else {
            return vec![];
        };

        // Only the first word is a command name
        let word_start = line_to_pos.len() - line_to_pos.trim_start().len();
        let partial = &line_to_pos[word_start..];
        if partial.contains(char::is_whitespace) {
            return vec![];
        }
        let partial = partial.to_ascii_uppercase();

        COMMANDS
            .iter()
            .filter(|command| command.name.starts_with(partial.as_str()))
            .map(|command| Suggestion {
                value: command.name.to_string(),
                description: Some(command.summary.to_string()),
                style: None,
                extra: None,
                span: Span::new(word_start, pos),
                append_whitespace: true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(line: &str) -> Vec<String> {
        CommandCompleter::new()
            .complete(line, line.len())
            .into_iter()
            .map(|s| s.value)
            .collect()
    }

    #[test]
    fn test_complete_command_names() {
        assert_eq!(values("b"), vec!["B", "B4", "B8"]);
        assert_eq!(values("  se"), vec!["SET"]);
        assert_eq!(values("").len(), COMMANDS.len());
    }

    #[test]
    fn test_no_completion_for_arguments() {
        assert!(values("C 1").is_empty());
        assert!(values("x").is_empty());
    }
}

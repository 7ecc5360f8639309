//! Prompt of the interactive shell

use std::borrow::Cow;

use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Shows the next expected step: create a canvas, or enter a command
#[derive(Debug, Default)]
pub struct ShellPrompt {
    left: String,
}

impl ShellPrompt {
    /// Refresh the prompt text
    pub fn update(&mut self, text: &str) {
        self.left = Color::Cyan.paint(text.trim_end()).to_string();
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.left)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed(" ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}search: {}) ", history_search.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::messages;

    #[test]
    fn test_prompt_text() {
        let mut prompt = ShellPrompt::default();
        prompt.update(messages::PROMPT);
        assert!(prompt.render_prompt_left().contains("enter command:"));
        assert!(!prompt.render_prompt_left().ends_with(' '));
    }
}

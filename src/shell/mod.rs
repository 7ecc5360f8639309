//! # Drawing shell
//!
//! Line-oriented command interpreter around a [`Canvas`]. Commands come from a
//! script (a file or piped stdin) or from an interactive `reedline` session.

pub mod commands;
mod completer;
pub mod messages;
mod prompt;

use std::io::{self, BufRead, Write};

use reedline::{Reedline, Signal};
use tracing::{debug, info, warn};

use crate::canvas::Canvas;
use crate::config::ShellConfig;
use crate::errors::{DrawError, Result};

pub use completer::CommandCompleter;
pub use prompt::ShellPrompt;

/// What the session does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One shell session: the settings and the current canvas, if any
#[derive(Debug, Default)]
pub struct Shell {
    config: ShellConfig,
    canvas: Option<Canvas>,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            canvas: None,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Prompt for the next command
    pub fn prompt(&self) -> &'static str {
        if self.canvas.is_some() {
            messages::PROMPT
        } else {
            messages::CREATE_CANVAS_PROMPT
        }
    }

    /// Run a single command line
    ///
    /// Mistakes in the command are reported on `out`; only output failures
    /// and broken canvas invariants come back as errors.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();

        let Some(command) = commands::find(name) else {
            debug!(name, "unknown command");
            writeln!(out, "{}", messages::unknown_command(name))?;
            return Ok(Flow::Continue);
        };

        debug!(command = command.name, ?args, "executing command");
        match (command.handler)(self, &args, out) {
            Err(err) if err.is_recoverable() && !matches!(err, DrawError::Io(_)) => {
                warn!(command = command.name, error = %err, "command failed");
                writeln!(out, "{err}")?;
                Ok(Flow::Continue)
            }
            result => result,
        }
    }

    /// Run commands from `input` until `Q` or the end of input
    ///
    /// Each command line is echoed after the prompt so the output reads like
    /// a transcript.
    pub fn run_script<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", self.prompt())?;
            let Some(line) = lines.next() else {
                writeln!(out, "\n{}", messages::EOF_DETECTED)?;
                break;
            };
            let line = line?;
            writeln!(out, "{}", messages::cut(&line))?;

            if self.execute_line(&line, out)? == Flow::Quit {
                info!("quit requested");
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Interactive session on the terminal
    pub fn run_interactive(&mut self) -> Result<()> {
        let mut editor =
            Reedline::create().with_completer(Box::new(CommandCompleter::new()));
        let mut prompt = ShellPrompt::default();
        let mut stdout = io::stdout();

        loop {
            prompt.update(self.prompt());

            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    if self.execute_line(&line, &mut stdout)? == Flow::Quit {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => {
                    writeln!(stdout, "(type Q to quit)")?;
                }
                Ok(Signal::CtrlD) => {
                    writeln!(stdout, "{}", messages::EOF_DETECTED)?;
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read input");
                    return Err(err.into());
                }
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print the canvas when the configuration asks for it after changes
    fn show_changed(&self, out: &mut dyn Write) -> Result<Flow> {
        if self.config.show_canvas_after_command {
            self.print_canvas(out)?;
        }
        Ok(Flow::Continue)
    }

    fn print_canvas(&self, out: &mut dyn Write) -> Result<()> {
        if let Some(canvas) = &self.canvas {
            canvas.render(out, self.config.borders())?;
        }
        Ok(())
    }
}

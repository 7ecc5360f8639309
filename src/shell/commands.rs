//! Command table of the drawing shell
//!
//! Every command is a plain function taking the session, the arguments that
//! followed the command name and the output stream.

use std::io::Write;

use tracing::debug;

use super::messages;
use super::{Flow, Shell};
use crate::canvas::{Canvas, Connectivity};
use crate::errors::{DrawError, Result};

/// Signature shared by all command handlers
pub type Handler = fn(&mut Shell, &[&str], &mut dyn Write) -> Result<Flow>;

/// A shell command
pub struct CommandSpec {
    /// Name typed by the user, matched case-insensitively
    pub name: &'static str,
    /// One-line description used by the completer
    pub summary: &'static str,
    pub handler: Handler,
}

/// All commands, in the order the completer offers them
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "C",
        summary: "create a canvas",
        handler: create,
    },
    CommandSpec {
        name: "L",
        summary: "draw a line",
        handler: line,
    },
    CommandSpec {
        name: "R",
        summary: "draw a rectangle",
        handler: rectangle,
    },
    CommandSpec {
        name: "B",
        summary: "fill an area (edges)",
        handler: fill,
    },
    CommandSpec {
        name: "B4",
        summary: "fill an area (edges)",
        handler: fill_four,
    },
    CommandSpec {
        name: "B8",
        summary: "fill an area (edges and corners)",
        handler: fill_eight,
    },
    CommandSpec {
        name: "P",
        summary: "print the canvas",
        handler: print,
    },
    CommandSpec {
        name: "SET",
        summary: "list or change properties",
        handler: set,
    },
    CommandSpec {
        name: "H",
        summary: "help",
        handler: help,
    },
    CommandSpec {
        name: "Q",
        summary: "quit",
        handler: quit,
    },
];

/// Look up a command by name
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

/// Parse a 32-bit integer with an optional sign and `,` grouping separators
pub fn parse_int(text: &str) -> Option<i32> {
    let digits = text.strip_prefix(&['-', '+'][..]).unwrap_or(text);
    if !digits.starts_with(|c: char| c.is_ascii_digit())
        || !digits.chars().all(|c| c.is_ascii_digit() || c == ',')
    {
        return None;
    }
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    cleaned.parse().ok()
}

fn parse_ints<const N: usize>(args: &[&str]) -> Option<[i32; N]> {
    let mut values = [0; N];
    if args.len() != N {
        return None;
    }
    for (value, arg) in values.iter_mut().zip(args) {
        *value = parse_int(arg)?;
    }
    Some(values)
}

/// A color argument is exactly one character
pub fn parse_color(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn say(out: &mut dyn Write, message: &str) -> Result<Flow> {
    writeln!(out, "{message}")?;
    Ok(Flow::Continue)
}

fn create(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    let usage = messages::usage_c(i32::MAX);
    let Some([width, height]) = parse_ints::<2>(args) else {
        return say(out, &usage);
    };
    if width < 1 || height < 1 {
        return say(out, &usage);
    }

    // Release the old canvas before the new one is allocated
    shell.canvas = None;
    match Canvas::with_options(width, height, &shell.config.canvas_options()) {
        Ok(canvas) => shell.canvas = Some(canvas),
        Err(err @ DrawError::AllocationFailed { .. }) => return say(out, &err.to_string()),
        Err(err) => return Err(err),
    }
    shell.show_changed(out)
}

fn line(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    outline(shell, args, out, messages::USAGE_L, Canvas::draw_line)
}

fn rectangle(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    outline(shell, args, out, messages::USAGE_R, Canvas::draw_rectangle)
}

type Draw = fn(&mut Canvas, i32, i32, i32, i32, Option<char>) -> Result<()>;

fn outline(
    shell: &mut Shell,
    args: &[&str],
    out: &mut dyn Write,
    usage: &str,
    draw: Draw,
) -> Result<Flow> {
    let stroke = shell.config.default_draw_char;
    let Some(canvas) = shell.canvas.as_mut() else {
        return say(out, messages::CANVAS_REQUIRED);
    };
    if !(4..=5).contains(&args.len()) {
        return say(out, usage);
    }
    let color = match args.get(4).map(|arg| parse_color(arg)) {
        None => stroke,
        Some(Some(color)) => color,
        Some(None) => return say(out, usage),
    };
    let Some([x1, y1, x2, y2]) = parse_ints::<4>(&args[..4]) else {
        return say(out, usage);
    };

    match draw(canvas, x1, y1, x2, y2, Some(color)) {
        Ok(()) => shell.show_changed(out),
        Err(DrawError::UnsupportedLine { .. }) => say(out, messages::LINE_NOT_SUPPORTED),
        Err(err) => Err(err),
    }
}

fn fill(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    flood(shell, args, out, "B", Connectivity::Four)
}

fn fill_four(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    flood(shell, args, out, "B4", Connectivity::Four)
}

fn fill_eight(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    flood(shell, args, out, "B8", Connectivity::Eight)
}

fn flood(
    shell: &mut Shell,
    args: &[&str],
    out: &mut dyn Write,
    name: &str,
    connectivity: Connectivity,
) -> Result<Flow> {
    let Some(canvas) = shell.canvas.as_mut() else {
        return say(out, messages::CANVAS_REQUIRED);
    };
    let usage = messages::usage_b(name, canvas.width(), canvas.height());
    if args.len() != 3 {
        return say(out, &usage);
    }
    let (Some([x, y]), Some(color)) = (parse_ints::<2>(&args[..2]), parse_color(args[2])) else {
        return say(out, &usage);
    };
    if x < 1 || y < 1 || x > canvas.width() || y > canvas.height() {
        return say(out, &usage);
    }

    canvas.fill(x, y, color, connectivity)?;
    shell.show_changed(out)
}

fn print(shell: &mut Shell, _args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    if shell.canvas.is_none() {
        return say(out, messages::CANVAS_REQUIRED);
    }
    shell.print_canvas(out)?;
    Ok(Flow::Continue)
}

fn set(shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    match args {
        [] => {
            for (name, value) in shell.config.properties() {
                writeln!(out, "{name:<40}{value}")?;
            }
            Ok(Flow::Continue)
        }
        [name, value] => match shell.config.set(name, value) {
            Ok(property) => {
                debug!(%property, "property changed from the shell");
                Ok(Flow::Continue)
            }
            Err(err @ DrawError::InvalidProperty { .. }) => say(out, &err.to_string()),
            Err(err) => Err(err),
        },
        _ => say(out, messages::USAGE_SET),
    }
}

fn help(_shell: &mut Shell, _args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    say(out, messages::HELP)
}

fn quit(_shell: &mut Shell, args: &[&str], out: &mut dyn Write) -> Result<Flow> {
    if !args.is_empty() {
        return say(out, messages::USAGE_Q);
    }
    Ok(Flow::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-15"), Some(-15));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("2,000"), Some(2000));
        assert_eq!(parse_int("2,147,483,647"), Some(i32::MAX));
        assert_eq!(parse_int("-2147483648"), Some(i32::MIN));
        assert_eq!(parse_int("2147483648"), None);
        assert_eq!(parse_int("A"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int(",1"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("@"), Some('@'));
        assert_eq!(parse_color("é"), Some('é'));
        assert_eq!(parse_color("qwe"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("b8").map(|c| c.name), Some("B8"));
        assert_eq!(find("set").map(|c| c.name), Some("SET"));
        assert!(find("X").is_none());
    }
}

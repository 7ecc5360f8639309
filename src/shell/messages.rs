//! User-facing texts of the shell

/// Longest command text echoed back before it is cut
pub const MAX_ECHO_CHARS: usize = 100;

pub const PROMPT: &str = "enter command: ";
pub const CREATE_CANVAS_PROMPT: &str = "create a canvas (C w h) or type H for help: ";

pub const CANVAS_REQUIRED: &str = "A canvas is required. Create one first with: C w h";
pub const LINE_NOT_SUPPORTED: &str =
    "Only horizontal and vertical lines are supported at the moment.";
pub const EOF_DETECTED: &str = "EOF detected";
pub const REST_IS_CUT: &str = "... (the rest is cut)";

pub const USAGE_L: &str = "Usage: L x1 y1 x2 y2 [c]\n\
    Draws a horizontal or vertical line from (x1, y1) to (x2, y2) with the optional color c.";
pub const USAGE_R: &str = "Usage: R x1 y1 x2 y2 [c]\n\
    Draws a rectangle with opposite corners (x1, y1) and (x2, y2) with the optional color c.";
pub const USAGE_Q: &str = "Usage: Q\nQuits the shell; takes no arguments.";
pub const USAGE_SET: &str = "Usage: SET [name value]\n\
    Without arguments lists the properties; 'SET name default' restores a default.";

pub const HELP: &str = "\
Commands:
  C w h              Create a new canvas of width w and height h.
  L x1 y1 x2 y2 [c]  Draw a horizontal or vertical line from (x1, y1) to (x2, y2).
                     Lines use the color c, or the default draw character.
  R x1 y1 x2 y2 [c]  Draw a rectangle with upper left corner (x1, y1) and
                     lower right corner (x2, y2).
  B x y c            Fill the area connected to (x, y) with the color c,
                     the same as B4.
  B4 x y c           Fill the area connected to (x, y) by edges.
  B8 x y c           Fill the area connected to (x, y) by edges and corners.
  P                  Print the canvas.
  SET [name value]   List the properties or change one of them.
  H                  Show this help.
  Q                  Quit.
Numbers may use ',' as a thousands separator, e.g. C 2,000 2,000.";

pub fn usage_c(limit: i32) -> String {
    format!(
        "Usage: C w h\nCreates a new canvas; w and h must be between 1 and {limit}."
    )
}

pub fn usage_b(name: &str, width: i32, height: i32) -> String {
    format!(
        "Usage: {name} x y c\nFills the area connected to (x, y) with the color c; \
         1 <= x <= {width}, 1 <= y <= {height}, c is a single character."
    )
}

pub fn unknown_command(name: &str) -> String {
    format!(
        "Unknown command: {}. Please use command H for help.",
        cut(name)
    )
}

pub fn file_not_found(path: &str) -> String {
    format!("File {path} does not exist")
}

/// `text` limited to [`MAX_ECHO_CHARS`] characters
pub fn cut(text: &str) -> String {
    match text.char_indices().nth(MAX_ECHO_CHARS) {
        Some((at, _)) => format!("{}{REST_IS_CUT}", &text[..at]),
        None => text.to_string(),
    }
}

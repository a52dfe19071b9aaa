use crate::config::DisplayConfig;

/// Box-drawing character set used by the status bar, cards, and CLI output.
///
/// Two fixed sets exist: rounded unicode and a plain ASCII fallback for
/// terminals without box-drawing glyphs, chosen by the `use_unicode`
/// config flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub horizontal: &'static str,
    pub double_horizontal: &'static str,
    pub vertical: &'static str,
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub left_junction: &'static str,
    pub right_junction: &'static str,
    /// Junction where the status-bar divider meets the separator line.
    pub connector: &'static str,
    pub selector: &'static str,
}

const UNICODE_CHARS: BoxChars = BoxChars {
    horizontal: "─",
    double_horizontal: "═",
    vertical: "│",
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    left_junction: "├",
    right_junction: "┤",
    connector: "┬",
    selector: "►",
};

const ASCII_CHARS: BoxChars = BoxChars {
    horizontal: "-",
    double_horizontal: "=",
    vertical: "|",
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    left_junction: "+",
    right_junction: "+",
    connector: "-",
    selector: ">",
};

impl BoxChars {
    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            UNICODE_CHARS
        } else {
            ASCII_CHARS
        }
    }
}

/// A heading followed by a separator line of matching length.
pub fn format_header(text: &str, double_line: bool, display: &DisplayConfig) -> String {
    let rule = if double_line {
        display.box_chars.double_horizontal
    } else {
        display.box_chars.horizontal
    };
    format!("{}\n{}\n", text, rule.repeat(text.chars().count()))
}

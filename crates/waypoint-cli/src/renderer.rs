//! Terminal output for the markdown produced by the core display types.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled through termimad or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Formats markdown for the terminal.
    ///
    /// Header lines keep their `#` markers so plan, task and comment levels
    /// stay distinguishable; other lines get inline styling only.
    pub fn format(&self, markdown: &str) -> String {
        if !self.rich_enabled {
            return markdown.to_string();
        }

        let mut out = String::with_capacity(markdown.len());
        for line in markdown.lines() {
            if line.starts_with('#') {
                out.push_str(&format!("\x1b[34m{line}\x1b[0m"));
            } else {
                out.push_str(&self.skin.inline(line).to_string());
            }
            out.push('\n');
        }
        out
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        print!("{}", self.format(markdown));
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

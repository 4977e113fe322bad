//! Terminal rendering module for rich markdown output
//!
//! Plans, search results and advice are markdown. With color enabled,
//! headers keep their hash marks, tables are laid out by termimad and other
//! lines are styled inline. Plain mode prints the markdown untouched.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// A run of consecutive lines rendered the same way.
#[derive(Debug, PartialEq)]
enum Block<'a> {
    Header(&'a str),
    Table(Vec<&'a str>),
    Line(&'a str),
}

/// Groups table rows so termimad can align their columns.
fn blocks(markdown: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    for line in markdown.lines() {
        if line.starts_with('|') {
            if let Some(Block::Table(rows)) = blocks.last_mut() {
                rows.push(line);
            } else {
                blocks.push(Block::Table(vec![line]));
            }
        } else if line.starts_with('#') {
            blocks.push(Block::Header(line));
        } else {
            blocks.push(Block::Line(line));
        }
    }
    blocks
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.quote_mark.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for block in blocks(markdown) {
            match block {
                Block::Header(line) => println!("\x1b[34m{line}\x1b[0m"),
                Block::Table(rows) => self.skin.print_text(&rows.join("\n")),
                Block::Line(line) => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

//! The clock in a terminal: one line, redrawn in place.

use std::io::Write;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::clock::Label;
use crate::error::Result;
use crate::params::WidgetConfig;

/// Writes each tick over the previous one on the current line.
pub struct TerminalLabel<W> {
    out: W,
    color: Option<Color>,
    bold: bool,
    transform: TextTransform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTransform {
    None,
    Upper,
    Lower,
    Capitalize,
}

impl TextTransform {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("uppercase") => TextTransform::Upper,
            Some("lowercase") => TextTransform::Lower,
            Some("capitalize") => TextTransform::Capitalize,
            _ => TextTransform::None,
        }
    }

    fn apply(self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Upper => text.to_uppercase(),
            TextTransform::Lower => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if at_word_start {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    at_word_start = c.is_whitespace();
                }
                out
            }
        }
    }
}

/// `#rgb` or `#rrggbb` to its components.
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            (it.next()??, it.next()??, it.next()??)
        }
        6 => (
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        ),
        _ => return None,
    };
    Some(Color::Rgb { r, g, b })
}

fn is_bold(weight: Option<&str>) -> bool {
    match weight.map(str::trim) {
        Some("bold" | "bolder") => true,
        Some(w) => w.parse::<u16>().is_ok_and(|w| w >= 600),
        None => false,
    }
}

impl<W: Write> TerminalLabel<W> {
    pub fn new(out: W, config: &WidgetConfig) -> Self {
        Self {
            out,
            color: parse_hex_color(&config.color),
            bold: is_bold(config.font_weight.as_deref()),
            transform: TextTransform::parse(config.text_transform.as_deref()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_styled(&self) -> bool {
        self.bold || self.color.is_some()
    }
}

impl<W: Write + Send> Label for TerminalLabel<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let text = self.transform.apply(text);
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if self.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if let Some(color) = self.color {
            queue!(self.out, SetForegroundColor(color))?;
        }
        queue!(self.out, Print(text))?;
        if self.is_styled() {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

//! Inline color resolution
//!
//! `git log --graph --color` wraps graph characters (and refs) in SGR escape
//! sequences. A color opened on one physical line may only be closed on a
//! later one, so escapes are resolved over the whole raw block before any
//! line is matched. The result is plain text plus style spans over byte
//! ranges of that text.

use bitflags::bitflags;
use colored::{Color, ColoredString, Colorize};
use derive_new::new;
use std::ops::Range;

const ESCAPE: char = '\x1b';

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnsiAttrs: u8 {
        const BOLD = 0b0001;
        const DIMMED = 0b0010;
        const ITALIC = 0b0100;
        const UNDERLINE = 0b1000;
    }
}

/// Display attributes carried by a character of resolved text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnsiStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: AnsiAttrs,
}

impl AnsiStyle {
    pub fn fg(color: Color) -> Self {
        AnsiStyle {
            fg: Some(color),
            ..Default::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == AnsiStyle::default()
    }

    fn non_plain(self) -> Option<Self> {
        (!self.is_plain()).then_some(self)
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        let mut painted = text.normal();
        if let Some(fg) = self.fg {
            painted = painted.color(fg);
        }
        if let Some(bg) = self.bg {
            painted = painted.on_color(bg);
        }
        if self.attrs.contains(AnsiAttrs::BOLD) {
            painted = painted.bold();
        }
        if self.attrs.contains(AnsiAttrs::DIMMED) {
            painted = painted.dimmed();
        }
        if self.attrs.contains(AnsiAttrs::ITALIC) {
            painted = painted.italic();
        }
        if self.attrs.contains(AnsiAttrs::UNDERLINE) {
            painted = painted.underline();
        }
        painted
    }

    /// Apply the parameters of one `ESC [ ... m` sequence
    fn apply_sgr(&mut self, params: &str) {
        let codes = params
            .split(';')
            .map(|code| if code.is_empty() { Some(0) } else { code.parse::<u16>().ok() })
            .collect::<Vec<_>>();
        let mut codes = codes.into_iter();

        while let Some(code) = codes.next() {
            let Some(code) = code else { continue };
            match code {
                0 => *self = AnsiStyle::default(),
                1 => self.attrs |= AnsiAttrs::BOLD,
                2 => self.attrs |= AnsiAttrs::DIMMED,
                3 => self.attrs |= AnsiAttrs::ITALIC,
                4 => self.attrs |= AnsiAttrs::UNDERLINE,
                22 => self.attrs -= AnsiAttrs::BOLD | AnsiAttrs::DIMMED,
                23 => self.attrs -= AnsiAttrs::ITALIC,
                24 => self.attrs -= AnsiAttrs::UNDERLINE,
                30..=37 => self.fg = Some(basic_color(code - 30, false)),
                39 => self.fg = None,
                40..=47 => self.bg = Some(basic_color(code - 40, false)),
                49 => self.bg = None,
                90..=97 => self.fg = Some(basic_color(code - 90, true)),
                100..=107 => self.bg = Some(basic_color(code - 100, true)),
                38 => self.fg = extended_color(&mut codes),
                48 => self.bg = extended_color(&mut codes),
                _ => {}
            }
        }
    }
}

fn basic_color(index: u16, bright: bool) -> Color {
    match (index, bright) {
        (0, false) => Color::Black,
        (1, false) => Color::Red,
        (2, false) => Color::Green,
        (3, false) => Color::Yellow,
        (4, false) => Color::Blue,
        (5, false) => Color::Magenta,
        (6, false) => Color::Cyan,
        (_, false) => Color::White,
        (0, true) => Color::BrightBlack,
        (1, true) => Color::BrightRed,
        (2, true) => Color::BrightGreen,
        (3, true) => Color::BrightYellow,
        (4, true) => Color::BrightBlue,
        (5, true) => Color::BrightMagenta,
        (6, true) => Color::BrightCyan,
        (_, true) => Color::BrightWhite,
    }
}

/// `38;5;n` (256-color palette) or `38;2;r;g;b` (true color)
fn extended_color(codes: &mut impl Iterator<Item = Option<u16>>) -> Option<Color> {
    match codes.next().flatten()? {
        5 => codes.next().flatten().map(palette_color),
        2 => {
            let r = codes.next().flatten()?;
            let g = codes.next().flatten()?;
            let b = codes.next().flatten()?;
            Some(Color::TrueColor {
                r: r.min(255) as u8,
                g: g.min(255) as u8,
                b: b.min(255) as u8,
            })
        }
        _ => None,
    }
}

fn palette_color(index: u16) -> Color {
    match index {
        0..=7 => basic_color(index, false),
        8..=15 => basic_color(index - 8, true),
        16..=231 => {
            let cube = index - 16;
            let level = |value: u16| if value == 0 { 0 } else { (55 + value * 40) as u8 };
            Color::TrueColor {
                r: level(cube / 36),
                g: level((cube % 36) / 6),
                b: level(cube % 6),
            }
        }
        _ => {
            let gray = (8 + (index.min(255) - 232) * 10) as u8;
            Color::TrueColor {
                r: gray,
                g: gray,
                b: gray,
            }
        }
    }
}

/// A byte range of resolved text sharing one style
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub style: AnsiStyle,
}

/// Plain text plus the styles escapes resolved to
///
/// Spans are sorted, non-overlapping, and never cover unstyled text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledString {
    text: String,
    spans: Vec<StyleSpan>,
}

impl StyledString {
    pub fn plain(text: impl Into<String>) -> Self {
        StyledString {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn push_str(&mut self, text: &str, style: Option<AnsiStyle>) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();

        let Some(style) = style.and_then(AnsiStyle::non_plain) else {
            return;
        };
        match self.spans.last_mut() {
            Some(last) if last.end == start && last.style == style => last.end = end,
            _ => self.spans.push(StyleSpan::new(start, end, style)),
        }
    }

    pub fn push(&mut self, ch: char, style: Option<AnsiStyle>) {
        let mut buf = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut buf), style);
    }

    pub fn style_at(&self, offset: usize) -> Option<AnsiStyle> {
        let index = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(index)
            .filter(|span| span.start <= offset)
            .map(|span| span.style)
    }

    /// Copy out a byte range, keeping the styles that overlap it
    pub fn slice(&self, range: Range<usize>) -> StyledString {
        let spans = self
            .spans
            .iter()
            .filter(|span| span.end > range.start && span.start < range.end)
            .map(|span| {
                StyleSpan::new(
                    span.start.max(range.start) - range.start,
                    span.end.min(range.end) - range.start,
                    span.style,
                )
            })
            .collect();

        StyledString {
            text: self.text[range].to_string(),
            spans,
        }
    }

    pub fn chars(&self) -> impl Iterator<Item = (char, Option<AnsiStyle>)> + '_ {
        self.text
            .char_indices()
            .map(|(offset, ch)| (ch, self.style_at(offset)))
    }

    /// Split into maximal runs of uniform style
    pub fn runs(&self) -> Vec<(&str, Option<AnsiStyle>)> {
        let mut runs = Vec::new();
        let mut position = 0;
        for span in &self.spans {
            if span.start > position {
                runs.push((&self.text[position..span.start], None));
            }
            runs.push((&self.text[span.start..span.end], Some(span.style)));
            position = span.end;
        }
        if position < self.text.len() {
            runs.push((&self.text[position..], None));
        }
        runs
    }
}

impl From<&str> for StyledString {
    fn from(text: &str) -> Self {
        StyledString::plain(text)
    }
}

impl std::fmt::Display for StyledString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Resolve every escape sequence in `raw` into style spans
///
/// SGR sequences update the running style, which carries across line
/// breaks; any other CSI sequence or lone escape is dropped.
pub fn resolve(raw: &str) -> StyledString {
    let mut resolved = StyledString::default();
    let mut style = AnsiStyle::default();
    let mut rest = raw;

    while let Some(escape) = rest.find(ESCAPE) {
        resolved.push_str(&rest[..escape], Some(style));
        rest = &rest[escape + ESCAPE.len_utf8()..];

        let Some(sequence) = rest.strip_prefix('[') else {
            continue;
        };
        match sequence.find(|c: char| ('\x40'..='\x7e').contains(&c)) {
            Some(end) => {
                if sequence[end..].starts_with('m') {
                    style.apply_sgr(&sequence[..end]);
                }
                rest = &sequence[end + 1..];
            }
            None => rest = "",
        }
    }
    resolved.push_str(rest, Some(style));

    resolved
}

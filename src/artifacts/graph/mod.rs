//! Commit graph glyphs
//!
//! - `ansi`: resolution of inline color escapes into styled text
//!
//! The translator substitutes the ASCII graph alphabet drawn by
//! `git log --graph` with an alternate glyph set, character by character,
//! keeping whatever style the source character carried.

pub mod ansi;

use crate::artifacts::graph::ansi::StyledString;
use std::collections::BTreeMap;

/// Characters the translator is allowed to substitute
pub const GRAPH_ALPHABET: [char; 6] = ['/', '|', '\\', '*', 'o', ' '];

/// Box-drawing replacements for the ASCII graph
pub const DEFAULT_GLYPHS: phf::Map<char, char> = phf::phf_map! {
    '/' => '╱',
    '|' => '│',
    '\\' => '╲',
    '*' => '◆',
    'o' => '◇',
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphGlyphTranslator {
    table: BTreeMap<char, char>,
}

impl GraphGlyphTranslator {
    /// Translator using [`DEFAULT_GLYPHS`]
    pub fn new() -> Self {
        Self::with_table(DEFAULT_GLYPHS.entries().map(|(from, to)| (*from, *to)))
    }

    /// Translator that leaves every character unchanged
    pub fn identity() -> Self {
        GraphGlyphTranslator {
            table: BTreeMap::new(),
        }
    }

    /// Build from arbitrary substitutions; keys outside [`GRAPH_ALPHABET`] are ignored.
    pub fn with_table(entries: impl IntoIterator<Item = (char, char)>) -> Self {
        let table = entries
            .into_iter()
            .filter(|(from, _)| GRAPH_ALPHABET.contains(from))
            .collect();

        GraphGlyphTranslator { table }
    }

    pub fn is_identity(&self) -> bool {
        self.table.iter().all(|(from, to)| from == to)
    }

    pub fn glyph(&self, ch: char) -> char {
        self.table.get(&ch).copied().unwrap_or(ch)
    }

    pub fn translate(&self, segment: &StyledString) -> StyledString {
        let mut translated = StyledString::default();
        for (ch, style) in segment.chars() {
            translated.push(self.glyph(ch), style);
        }
        translated
    }

    pub fn translate_str(&self, segment: &str) -> String {
        segment.chars().map(|ch| self.glyph(ch)).collect()
    }
}

impl Default for GraphGlyphTranslator {
    fn default() -> Self {
        Self::new()
    }
}

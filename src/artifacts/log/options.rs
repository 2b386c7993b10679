use crate::artifacts::graph::GraphGlyphTranslator;
use bitflags::bitflags;

pub const DEFAULT_ABBREV_LENGTH: usize = 7;
pub const DEFAULT_REMOTE: &str = "origin";

bitflags! {
    /// Rendering switches of a wash pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Resolve inline color escapes before matching
        const RESOLVE_COLOR = 1 << 0;
        const REFS_AFTER_MESSAGE = 1 << 1;
        /// Hash first, then graph, so continuation lines align under the hash column
        const ALIGN_HASH = 1 << 2;
        const EXTENDED_HEADER = 1 << 3;
        const HIGHLIGHT_KEYWORDS = 1 << 4;
        const SHOW_MARGIN = 1 << 5;
    }
}

impl RenderFlags {
    /// Parse a compact letter form such as `"akm"`
    ///
    /// `c` color, `r` refs after message, `a` align hash, `h` extended
    /// header, `k` keywords, `m` margin. An empty string means no flags.
    pub fn try_parse(letters: &str) -> anyhow::Result<Self> {
        letters
            .chars()
            .try_fold(RenderFlags::empty(), |flags, letter| {
                let flag = match letter {
                    'c' => RenderFlags::RESOLVE_COLOR,
                    'r' => RenderFlags::REFS_AFTER_MESSAGE,
                    'a' => RenderFlags::ALIGN_HASH,
                    'h' => RenderFlags::EXTENDED_HEADER,
                    'k' => RenderFlags::HIGHLIGHT_KEYWORDS,
                    'm' => RenderFlags::SHOW_MARGIN,
                    other => anyhow::bail!("unknown render flag '{other}', expected one of c r a h k m"),
                };
                Ok(flags | flag)
            })
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        RenderFlags::ALIGN_HASH | RenderFlags::HIGHLIGHT_KEYWORDS | RenderFlags::SHOW_MARGIN
    }
}

/// Per-pass options the caller supplies alongside the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WashOptions {
    pub abbrev_length: usize,
    /// Only honored for the log style
    pub limit: Option<usize>,
    pub flags: RenderFlags,
    pub glyphs: GraphGlyphTranslator,
    pub remotes: Vec<String>,
}

impl WashOptions {
    pub fn with_limit(self, limit: Option<usize>) -> Self {
        WashOptions { limit, ..self }
    }

    pub fn with_flags(self, flags: RenderFlags) -> Self {
        WashOptions { flags, ..self }
    }
}

impl Default for WashOptions {
    fn default() -> Self {
        WashOptions {
            abbrev_length: DEFAULT_ABBREV_LENGTH,
            limit: None,
            flags: RenderFlags::default(),
            glyphs: GraphGlyphTranslator::identity(),
            remotes: vec![DEFAULT_REMOTE.to_string()],
        }
    }
}

//! Shared output plumbing
//!
//! Commands write through a `Box<dyn Write>`. [`OutputTarget`] decides
//! whether that writer is stdout or the minus pager, and whether the
//! output should be painted.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Setting this to any value disables paging
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// `Write` adapter over the minus pager
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "abc1234 Fix bug")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct OutputTarget {
    pager: Option<Pager>,
    terminal: bool,
}

impl OutputTarget {
    /// Page and paint when stdout is a terminal, unless `NO_PAGER` is set
    pub fn detect(allow_paging: bool) -> Self {
        let terminal = io::stdout().is_terminal();
        let paged = allow_paging && terminal && std::env::var_os(NO_PAGER_ENV).is_none();

        OutputTarget {
            pager: paged.then(Pager::new),
            terminal,
        }
    }

    pub fn is_paged(&self) -> bool {
        self.pager.is_some()
    }

    /// Whether faces should be turned into terminal colors
    pub fn paint(&self) -> bool {
        self.terminal
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match &self.pager {
            Some(pager) => Box::new(PagerWriter::new(pager.clone())),
            None => Box::new(io::stdout()),
        }
    }

    /// Hand buffered output to the pager, if there is one
    pub fn finish(self) -> anyhow::Result<()> {
        if let Some(pager) = self.pager {
            minus::page_all(pager)?;
        }
        Ok(())
    }
}

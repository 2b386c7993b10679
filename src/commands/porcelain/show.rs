use crate::RecordStyle;
use crate::areas::session::Session;
use anyhow::Context;
use std::io::Write;

impl Session {
    pub fn show(&self, raw: String, style: RecordStyle) -> anyhow::Result<()> {
        let output = self
            .engine()
            .wash(raw, style)
            .with_context(|| format!("failed to wash {style} output"))?;

        write!(self.writer(), "{}", output.to_text(self.paint()))?;

        Ok(())
    }
}

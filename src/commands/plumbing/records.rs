use crate::RecordStyle;
use crate::areas::session::Session;
use crate::artifacts::log::record::{CommitRecord, LogEntry};
use anyhow::Context;
use std::io::Write;

/// Line written in place of the load-more sentinel
const SENTINEL_MARK: &str = "...";

impl Session {
    /// `hash author timestamp refs marker message`, tab separated
    pub fn records(&self, raw: String, style: RecordStyle) -> anyhow::Result<()> {
        let output = self
            .engine()
            .wash(raw, style)
            .with_context(|| format!("failed to wash {style} output"))?;

        for entry in &output.entries {
            match entry {
                LogEntry::Commit(record) => writeln!(self.writer(), "{}", record_fields(record))?,
                LogEntry::LoadMore(load_more) => {
                    writeln!(self.writer(), "{SENTINEL_MARK}\t{}", load_more.limit)?
                }
            }
        }

        Ok(())
    }
}

fn record_fields(record: &CommitRecord) -> String {
    [
        record.hash.clone(),
        record.author.clone().unwrap_or_default(),
        record
            .timestamp
            .map(|timestamp| timestamp.to_string())
            .unwrap_or_default(),
        record.refs.clone().unwrap_or_default(),
        record.marker().unwrap_or_default().to_string(),
        record.message.clone(),
    ]
    .join("\t")
}

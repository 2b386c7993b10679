use crate::areas::session::Session;
use crate::artifacts::reflog::classify;
use std::io::Write;

impl Session {
    pub fn classify(&self, subject: &str) -> anyhow::Result<()> {
        let subject = classify(subject);
        let text = subject.text();

        if self.paint() {
            writeln!(
                self.writer(),
                "{}\t{}",
                subject.category(),
                subject.category().paint(&text)
            )?;
        } else {
            writeln!(self.writer(), "{}\t{text}", subject.category())?;
        }

        Ok(())
    }
}

use crate::areas::session::Session;
use crate::artifacts::margin::duration::format_duration;
use std::io::Write;

impl Session {
    /// Print the duration of `seconds`, in either direction
    pub fn age(&self, seconds: i64) -> anyhow::Result<()> {
        let margin = self.engine().margin();
        let duration = format_duration(
            seconds.unsigned_abs(),
            margin.duration_table(),
            margin.unit_width(),
        );

        writeln!(self.writer(), "{}", duration.trim_end())?;

        Ok(())
    }
}

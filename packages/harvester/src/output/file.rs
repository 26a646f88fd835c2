//! CSV result files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::DATETIME_FORMAT;
use crate::error::Result;
use crate::types::ResultTable;

/// File name `{mode}_{timestamp}.csv`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use pydocs_harvester::output::result_file_name;
///
/// let at = Utc.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();
/// assert_eq!(result_file_name("pep", &at), "pep_2025-03-01_14-05-09.csv");
/// ```
pub fn result_file_name<Tz: TimeZone>(mode: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{mode}_{}.csv", at.format(DATETIME_FORMAT))
}

/// Write every row, header first, with all fields quoted and `\n` line endings.
pub fn write_csv<W: Write>(out: W, table: &ResultTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(out);
    for row in table.all_rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save `table` as a CSV file in `results_dir`, stamped with the current
/// time at offset `tz`.
pub fn save_csv(
    table: &ResultTable,
    results_dir: &Path,
    mode: &str,
    tz: &FixedOffset,
) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)?;
    let path = results_dir.join(result_file_name(mode, &Utc::now().with_timezone(tz)));

    let file = File::create(&path)?;
    write_csv(&file, table)?;
    file.sync_all()?;

    tracing::info!(path = %path.display(), rows = table.len(), "Results saved");
    Ok(path)
}

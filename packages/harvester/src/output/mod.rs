//! Result sink: plain console rows, a pretty table, or a CSV file.

pub mod file;
pub mod pretty;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::Result;
use crate::harvester::Mode;
use crate::types::ResultTable;

pub use file::{result_file_name, save_csv, write_csv};
pub use pretty::render_table;

/// Output formats besides the default plain rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Aligned text table on stdout.
    Pretty,
    /// CSV file in the results directory.
    File,
}

/// Every row's fields separated by single spaces.
pub fn write_plain<W: Write>(out: &mut W, table: &ResultTable) -> io::Result<()> {
    for row in table.all_rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// Hand `table` to the sink chosen by `output`.
///
/// Returns the written file for [`OutputMode::File`].
pub fn control_output(
    table: &ResultTable,
    output: Option<OutputMode>,
    mode: Mode,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    match output {
        None => {
            let stdout = io::stdout();
            write_plain(&mut stdout.lock(), table)?;
            Ok(None)
        }
        Some(OutputMode::Pretty) => {
            println!("{}", render_table(table));
            Ok(None)
        }
        Some(OutputMode::File) => {
            let path = save_csv(table, &settings.results_dir(), mode.as_str(), &settings.timezone)?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_plain() {
        let mut table = ResultTable::new(["Статус", "Количество"]);
        table.push(["Final", "7"]);
        let mut out = Vec::new();

        write_plain(&mut out, &table).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Статус Количество\nFinal 7\n");
    }

    #[test]
    fn test_control_output_file_mode() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(dir.path());
        let mut table = ResultTable::new(["a", "b"]);
        table.push(["1", "2"]);

        let path = control_output(&table, Some(OutputMode::File), Mode::Pep, &settings)
            .unwrap()
            .unwrap();

        assert!(path.starts_with(dir.path().join("results")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("pep_"));
        assert!(name.ends_with(".csv"));
    }
}

use crate::config::ReportOptions;
use crate::error::{Result, SummaryError};
use crate::report::format_line;
use crate::request::SummaryRequest;
use crate::scanner;
use crate::types::DirectoryEntry;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub lines_written: usize,
    pub total_bytes: u64,
    /// Filled only when the caller asked to keep the entries.
    pub entries: Vec<DirectoryEntry>,
}

/// Writes `<output_dir>/<base_name>.txt` with one line per direct child of
/// the input directory.
///
/// Each line is written as soon as its entry is measured. On failure the
/// lines already written stay in the file.
pub fn summarize(
    request: &SummaryRequest,
    options: &ReportOptions,
    keep_entries: bool,
) -> Result<ReportOutcome> {
    let path = request.report_path();
    let file = File::create(&path).map_err(|e| SummaryError::io(&path, e))?;
    let mut out = BufWriter::new(file);

    info!(
        "Summarizing {} into {}",
        request.input_dir.display(),
        path.display()
    );

    let children = scanner::list_children(&request.input_dir, options.sort)?;
    debug!("{} top-level entries", children.len());

    let mut outcome = ReportOutcome {
        path,
        lines_written: 0,
        total_bytes: 0,
        entries: Vec::new(),
    };

    for child in &children {
        let entry = scanner::measure_entry(&request.input_dir, child, options.empty_dirs)?;
        writeln!(out, "{}", format_line(&entry)).map_err(|e| SummaryError::io(&outcome.path, e))?;

        outcome.lines_written += 1;
        outcome.total_bytes += entry.size_bytes;
        if keep_entries {
            outcome.entries.push(entry);
        }
    }

    out.flush().map_err(|e| SummaryError::io(&outcome.path, e))?;
    info!(
        "Wrote {} lines to {}",
        outcome.lines_written,
        outcome.path.display()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyDirPolicy;
    use crate::error::ErrorKind;
    use crate::report::format_timestamp;
    use chrono::{DateTime, Local};
    use std::fs;
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    fn write_file(path: &Path, len: usize, mtime_secs: u64) -> DateTime<Local> {
        fs::write(path, vec![b'x'; len]).unwrap();
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs);
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(mtime).unwrap();
        mtime.into()
    }

    fn sorted_lines(path: &Path) -> Vec<String> {
        let mut lines: Vec<String> = fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_file_and_directory_example() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let t1 = write_file(&input.path().join("a.txt"), 100, 1_690_000_000);
        fs::create_dir(input.path().join("sub")).unwrap();
        write_file(&input.path().join("sub/b.txt"), 50, 1_700_000_000);
        let t3 = write_file(&input.path().join("sub/c.txt"), 25, 1_700_000_900);

        let req = SummaryRequest::new(input.path(), output.path(), "report");
        let outcome = summarize(&req, &ReportOptions::default(), false).unwrap();

        assert_eq!(outcome.path, output.path().join("report.txt"));
        assert_eq!(outcome.lines_written, 2);
        assert_eq!(outcome.total_bytes, 175);
        assert!(outcome.entries.is_empty());

        let mut expected = vec![
            format!("a.txt - 100 bytes - Last Modified: {}", format_timestamp(&t1)),
            format!("sub - 75 bytes - Last Modified: {}", format_timestamp(&t3)),
        ];
        expected.sort();
        assert_eq!(sorted_lines(&outcome.path), expected);
    }

    #[test]
    fn test_one_line_per_file() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for i in 0..7 {
            write_file(&input.path().join(format!("f{i}.bin")), i * 10, 1_650_000_000);
        }

        let req = SummaryRequest::new(input.path(), output.path(), "files");
        let outcome = summarize(&req, &ReportOptions::default(), true).unwrap();

        let content = fs::read_to_string(&outcome.path).unwrap();
        assert_eq!(content.lines().count(), 7);
        assert!(content.ends_with('\n'));
        assert_eq!(outcome.entries.len(), 7);
        assert!(content.contains("f3.bin - 30 bytes - Last Modified: "));
    }

    #[test]
    fn test_empty_input_creates_empty_report() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let req = SummaryRequest::new(input.path(), output.path(), "empty");
        let outcome = summarize(&req, &ReportOptions::default(), false).unwrap();

        assert_eq!(outcome.lines_written, 0);
        assert_eq!(fs::read(&outcome.path).unwrap().len(), 0);
    }

    #[test]
    fn test_rerun_is_identical_and_overwrites() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_file(&input.path().join("one.txt"), 12, 1_680_000_000);
        fs::create_dir(input.path().join("nested")).unwrap();
        write_file(&input.path().join("nested/two.txt"), 3, 1_680_000_100);

        let report = output.path().join("same.txt");
        fs::write(&report, "stale content that is much longer than the real report\n".repeat(20))
            .unwrap();

        let req = SummaryRequest::new(input.path(), output.path(), "same");
        summarize(&req, &ReportOptions::default(), false).unwrap();
        let first = fs::read(&report).unwrap();
        summarize(&req, &ReportOptions::default(), false).unwrap();
        let second = fs::read(&report).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_empty_directory_fails_by_default() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir_all(input.path().join("hollow/inner")).unwrap();

        let req = SummaryRequest::new(input.path(), output.path(), "r");
        let err = summarize(&req, &ReportOptions::default(), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyAggregate);
        assert!(err.to_string().contains("hollow"));
    }

    #[test]
    fn test_failure_keeps_earlier_lines() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let t = write_file(&input.path().join("a.txt"), 100, 1_670_000_000);
        fs::create_dir(input.path().join("b_dir")).unwrap();
        write_file(&input.path().join("c.txt"), 5, 1_670_000_000);

        let options = ReportOptions {
            sort: true,
            empty_dirs: EmptyDirPolicy::Fail,
        };
        let req = SummaryRequest::new(input.path(), output.path(), "partial");
        let err = summarize(&req, &options, false).unwrap_err();
        assert!(matches!(err, SummaryError::EmptyAggregate { ref name } if name == "b_dir"));

        // Lines before the failing entry reach disk, nothing after it does.
        assert_eq!(
            fs::read_to_string(output.path().join("partial.txt")).unwrap(),
            format!("a.txt - 100 bytes - Last Modified: {}\n", format_timestamp(&t))
        );
    }

    #[test]
    fn test_empty_directory_zero_policy_and_sort() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir(input.path().join("b_hollow")).unwrap();
        let t = write_file(&input.path().join("c.dat"), 4, 1_660_000_000);
        fs::create_dir(input.path().join("a_dir")).unwrap();
        write_file(&input.path().join("a_dir/x"), 9, 1_660_000_000);

        let options = ReportOptions {
            sort: true,
            empty_dirs: EmptyDirPolicy::Zero,
        };
        let req = SummaryRequest::new(input.path(), output.path(), "sorted");
        let outcome = summarize(&req, &options, false).unwrap();

        let stamp = format_timestamp(&t);
        let expected = format!(
            "a_dir - 9 bytes - Last Modified: {stamp}\nb_hollow - 0 bytes\nc.dat - 4 bytes - Last Modified: {stamp}\n"
        );
        assert_eq!(fs::read_to_string(&outcome.path).unwrap(), expected);
    }

    #[test]
    fn test_unwritable_destination() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        // Base names that point into a missing directory can't be created.
        let req = SummaryRequest::new(input.path(), output.path(), "missing/report");
        let err = summarize(&req, &ReportOptions::default(), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

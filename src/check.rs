//! Per-file compatibility evaluation and the `check` subcommand driver.

use std::{
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    cli::CheckArgs,
    error::ScanError,
    identifier, io_utils,
    model::CheckResult,
    printable_delimiter, report,
    rules::RuleSet,
    scanner::RowScanner,
};

/// A file stays compatible while its retained data issues do not exceed this
/// count (field issues are disqualifying at any count).
pub const DATA_ISSUE_VERDICT_LIMIT: usize = 10;

pub fn execute(args: &CheckArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let rules = match &args.rules {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::default(),
    };

    let files = discover_csv_files(&args.dir)?;
    info!("Checking {} file(s) under {:?}", files.len(), args.dir);

    let results: Vec<CheckResult> = files
        .iter()
        .map(|path| {
            let delimiter = io_utils::resolve_input_delimiter(path, args.delimiter);
            debug!(
                "Checking {:?} with delimiter '{}'",
                path,
                printable_delimiter(delimiter)
            );
            check_file(path, delimiter, encoding, &rules)
        })
        .collect();

    if args.json {
        println!("{}", report::render_json(&results)?);
    } else {
        print!("{}", report::render_report(&results));
    }

    let compatible = results.iter().filter(|r| r.compatible).count();
    info!(
        "{} of {} file(s) compatible",
        compatible,
        results.len()
    );
    Ok(())
}

/// Lists `*.csv` files directly under `dir`, sorted by name so the report
/// order never depends on directory iteration order.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("Reading directory {dir:?}"))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading directory {dir:?}"))?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Evaluates a single file. Infallible by design: every scan failure is
/// converted into issues on the returned result, so one bad file never
/// aborts the batch.
pub fn check_file(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    rules: &RuleSet,
) -> CheckResult {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let table_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    let mut result = CheckResult::new(file_name, table_name, encoding.name());

    if let Err(err) = scan_file(path, delimiter, encoding, rules, &mut result) {
        let label = if err.is_decode() { "encoding error" } else { "read error" };
        result.field_issues.push(format!("{label}: {err}"));
        result.compatible = false;
    }
    result
}

fn scan_file(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    rules: &RuleSet,
    result: &mut CheckResult,
) -> Result<(), ScanError> {
    let (mut reader, has_bom) = io_utils::open_csv_reader_with_bom_probe(path, delimiter)?;
    if has_bom {
        result
            .warnings
            .push("file starts with a UTF-8 byte-order mark (import tooling tolerates it)".into());
    }

    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    if headers.is_empty() {
        result.field_issues.push("file has no header row".into());
        result.compatible = false;
        return Ok(());
    }

    result.field_count = headers.len();
    result
        .field_issues
        .extend(identifier::validate_field_names(&headers, rules));

    let mut scanner = RowScanner::new(&headers, rules);
    let outcome = drain_rows(&mut reader, encoding, &mut scanner);
    let stats = scanner.finish();
    result.record_count = stats.record_count;
    result.data_issues = stats.data_issues;
    result.key_finding = stats.key_finding;
    // Keep the partial tallies gathered before a mid-scan failure.
    outcome?;

    result.compatible =
        result.field_issues.is_empty() && result.data_issues.len() <= DATA_ISSUE_VERDICT_LIMIT;
    Ok(())
}

fn drain_rows(
    reader: &mut csv::Reader<BufReader<fs::File>>,
    encoding: &'static Encoding,
    scanner: &mut RowScanner<'_>,
) -> Result<(), ScanError> {
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        // Header is logical row 1; the first data row is row 2.
        scanner.scan_row(row_idx + 2, &decoded);
    }
    Ok(())
}

//! Business-card cleaning pipeline.
//!
//! Stages run in a fixed order over one [`RawTable`]; later stages address
//! columns by their normalized names, so header normalization must come
//! before any of them.
//!
//! # Example
//!
//! ```rust,no_run
//! use cardclean::{clean_file, CleanOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = clean_file(Path::new("cards.csv"), &CleanOptions::default())?;
//!     println!("Wrote {} cards to {}", summary.report.rows_written, summary.output.display());
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::rules::{normalize_header, split_name, CellRule};
use crate::config::CleanOptions;
use crate::error::{CleanResult, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{Cell, CleanCard, RawTable, FINAL_COLUMNS};
use crate::output::{output_path, write_cards_file};
use crate::parser::parse_file;

/// Raw column removed before normalization.
pub const MEMO_COLUMN: &str = "Memo";

/// Columns holding phone-like values, after header normalization.
pub const PHONE_COLUMNS: [&str; 3] = ["phone_number", "fax_number", "mobile_phone"];

/// Counters for one cleaning run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub phone_cells_rewritten: usize,
    pub rows_written: usize,
}

/// Cleaned cards plus run counters
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub cards: Vec<CleanCard>,
    pub report: CleanReport,
}

/// Result of [`clean_file`]
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: String,
    pub delimiter: char,
    pub report: CleanReport,
}

// =============================================================================
// Stages
// =============================================================================

/// Remove rows equal to an earlier row. Returns how many were removed.
pub fn dedupe(table: &mut RawTable) -> usize {
    let before = table.rows.len();
    let mut seen = HashSet::new();
    table.rows.retain(|row| seen.insert(row.clone()));
    before - table.rows.len()
}

/// Drop the `Memo` column.
pub fn drop_columns(table: &mut RawTable) -> CleanResult<()> {
    table.drop_column(MEMO_COLUMN)
}

/// Normalize every header name.
pub fn normalize_headers(table: &mut RawTable) {
    table.rename_headers(normalize_header);
}

/// Rewrite phone numbers in the phone, fax and mobile columns.
///
/// Returns the number of cells whose text changed.
pub fn normalize_phones(table: &mut RawTable) -> CleanResult<usize> {
    let indices = PHONE_COLUMNS
        .iter()
        .map(|name| table.column_index(name))
        .collect::<CleanResult<Vec<_>>>()?;

    let mut rewritten = 0;
    for row in &mut table.rows {
        for &idx in &indices {
            let formatted = CellRule::FormatPhone.apply(&row[idx]);
            if formatted != row[idx] {
                rewritten += 1;
                row[idx] = formatted;
            }
        }
    }
    Ok(rewritten)
}

/// Add `first_name` and `last_name` derived from `full_name`.
pub fn derive_names(table: &mut RawTable) -> CleanResult<()> {
    let (first, last): (Vec<Cell>, Vec<Cell>) = table
        .column("full_name")?
        .into_iter()
        .map(split_name)
        .unzip();

    table.set_column("first_name", first);
    table.set_column("last_name", last);
    Ok(())
}

/// Keep only the trailing token of `zip_postal_code`.
pub fn normalize_zip(table: &mut RawTable) -> CleanResult<()> {
    table.map_column("zip_postal_code", |cell| CellRule::LastToken.apply(cell))
}

/// Uppercase `company`, lowercase `e_mail` and `website`.
pub fn normalize_case(table: &mut RawTable) -> CleanResult<()> {
    let rules = [
        ("company", CellRule::Uppercase),
        ("e_mail", CellRule::Lowercase),
        ("website", CellRule::Lowercase),
    ];
    for (name, _) in &rules {
        table.column_index(name)?;
    }
    for (name, rule) in rules {
        table.map_column(name, |cell| rule.apply(cell))?;
    }
    Ok(())
}

/// Select the output columns in order and build the final records.
pub fn finalize(table: &RawTable) -> CleanResult<Vec<CleanCard>> {
    let indices = FINAL_COLUMNS
        .iter()
        .map(|(key, _)| table.column_index(key))
        .collect::<CleanResult<Vec<_>>>()?;

    Ok(table
        .rows
        .iter()
        .map(|row| CleanCard::from_cells(std::array::from_fn(|i| row[indices[i]].clone())))
        .collect())
}

// =============================================================================
// Entry Points
// =============================================================================

/// Run every stage over a loaded table.
pub fn clean_table(mut table: RawTable) -> CleanResult<CleanOutcome> {
    let mut report = CleanReport {
        rows_read: table.len(),
        ..Default::default()
    };

    log_info("🧹 Removing duplicate rows...");
    report.duplicates_removed = dedupe(&mut table);
    log_success(format!(
        "{} duplicates removed, {} rows left",
        report.duplicates_removed,
        table.len()
    ));

    drop_columns(&mut table)?;
    log_success(format!("Dropped column '{}'", MEMO_COLUMN));

    normalize_headers(&mut table);
    log_success(format!("Normalized headers: {}", table.headers.join(", ")));

    log_info("📞 Formatting phone numbers...");
    report.phone_cells_rewritten = normalize_phones(&mut table)?;
    log_success(format!("{} phone cells rewritten", report.phone_cells_rewritten));

    derive_names(&mut table)?;
    log_success("Split full_name into first_name / last_name");

    normalize_zip(&mut table)?;
    log_success("Reduced zip_postal_code to its last token");

    normalize_case(&mut table)?;
    log_success("Uppercased company, lowercased e_mail and website");

    let cards = finalize(&table)?;
    report.rows_written = cards.len();
    log_success(format!("{} cards ready", cards.len()));

    Ok(CleanOutcome { cards, report })
}

/// Load `input`, clean it and write `Clean <file name>`.
///
/// Nothing is written unless every stage succeeds.
pub fn clean_file(input: &Path, options: &CleanOptions) -> PipelineResult<CleanSummary> {
    log_info(format!("📖 Reading {}...", input.display()));
    let parsed = parse_file(input, options.delimiter)?;
    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!("Read {} rows", parsed.table.len()));

    log_info(format!("📋 CSV has {} columns:", parsed.table.headers.len()));
    for (i, col) in parsed.table.headers.iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    if parsed.table.is_empty() {
        log_warning("No data rows, output will only contain headers");
    }

    let outcome = clean_table(parsed.table)?;

    let output = output_path(input, options.output_dir.as_deref());
    write_cards_file(&outcome.cards, &output, options.write_index)?;
    log_success(format!("💾 Output written to: {}", output.display()));

    Ok(CleanSummary {
        input: input.to_path_buf(),
        output,
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        report: outcome.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::parser::parse_str;

    const HEADER: &str = "Full Name,Job Title,Company,Department,Phone Number,Mobile Phone,Fax Number,E-Mail,Website,Address,Zip/Postal Code,Location/Region,Memo";

    fn load(rows: &[&str]) -> RawTable {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        parse_str(&csv, ',').unwrap()
    }

    fn cell(s: &str) -> Cell {
        Some(s.to_string())
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut table = load(&[
            "Ann Lee,CEO,acme,Ops,555.123.4567,,,a@b.com,,,,US,x",
            "Bob Roy,CTO,acme,Eng,,,,,,,,US,",
            "Ann Lee,CEO,acme,Ops,555.123.4567,,,a@b.com,,,,US,x",
        ]);
        assert_eq!(dedupe(&mut table), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], cell("Ann Lee"));
        assert_eq!(table.rows[1][0], cell("Bob Roy"));
    }

    #[test]
    fn test_dedupe_idempotent() {
        let mut table = load(&[
            "A,,,,,,,,,,,,",
            "A,,,,,,,,,,,,",
            "B,,,,,,,,,,,,",
            ",,,,,,,,,,,,",
            ",,,,,,,,,,,,",
        ]);
        dedupe(&mut table);
        let once = table.clone();
        assert_eq!(dedupe(&mut table), 0);
        assert_eq!(table, once);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_memo_required() {
        let mut table = parse_str("Full Name,Company\nAnn,acme", ',').unwrap();
        assert_eq!(
            drop_columns(&mut table),
            Err(CleanError::MissingColumn("Memo".into()))
        );
    }

    #[test]
    fn test_memo_lookup_is_exact() {
        let mut table = parse_str("Full Name,memo\nAnn,x", ',').unwrap();
        assert!(drop_columns(&mut table).is_err());
    }

    #[test]
    fn test_normalize_headers() {
        let mut table = load(&[]);
        drop_columns(&mut table).unwrap();
        normalize_headers(&mut table);
        assert_eq!(
            table.headers,
            vec![
                "full_name",
                "job_title",
                "company",
                "department",
                "phone_number",
                "mobile_phone",
                "fax_number",
                "e_mail",
                "website",
                "address",
                "zip_postal_code",
                "location_region",
            ]
        );
    }

    #[test]
    fn test_normalize_phones_counts_rewrites() {
        let mut table = load(&["Ann,,,,555.123.4567,555-000-1111,n/a,,,,,,"]);
        drop_columns(&mut table).unwrap();
        normalize_headers(&mut table);

        assert_eq!(normalize_phones(&mut table).unwrap(), 2);
        assert_eq!(table.column("phone_number").unwrap()[0], &cell("(555)123-4567"));
        assert_eq!(table.column("mobile_phone").unwrap()[0], &cell("(555)000-1111"));
        assert_eq!(table.column("fax_number").unwrap()[0], &cell("n/a"));
    }

    #[test]
    fn test_normalize_phones_missing_column() {
        let mut table = parse_str("phone_number,mobile_phone\n1,2", ',').unwrap();
        assert_eq!(
            normalize_phones(&mut table),
            Err(CleanError::MissingColumn("fax_number".into()))
        );
    }

    #[test]
    fn test_derive_names() {
        let mut table = parse_str("full_name\nJane Q Public\nPrince\n,", ',').unwrap();
        derive_names(&mut table).unwrap();

        assert_eq!(table.column("first_name").unwrap(), vec![&cell("Jane"), &cell("Prince"), &None]);
        assert_eq!(table.column("last_name").unwrap(), vec![&cell("Public"), &cell("Prince"), &None]);
    }

    #[test]
    fn test_normalize_zip() {
        let mut table = parse_str("zip_postal_code\nSpringfield IL 62704\n10001", ',').unwrap();
        normalize_zip(&mut table).unwrap();

        assert_eq!(table.column("zip_postal_code").unwrap(), vec![&cell("62704"), &cell("10001")]);
    }

    #[test]
    fn test_normalize_case() {
        let mut table = parse_str("company,e_mail,website\nacme corp,Jane@Acme.COM,WWW.Acme.com\n,,", ',').unwrap();
        normalize_case(&mut table).unwrap();

        assert_eq!(table.rows[0], vec![cell("ACME CORP"), cell("jane@acme.com"), cell("www.acme.com")]);
        assert_eq!(table.rows[1], vec![None, None, None]);
    }

    #[test]
    fn test_normalize_case_checks_before_mutating() {
        let mut table = parse_str("company,e_mail\nacme,X@Y.Z", ',').unwrap();
        assert_eq!(
            normalize_case(&mut table),
            Err(CleanError::MissingColumn("website".into()))
        );
        assert_eq!(table.rows[0][0], cell("acme"));
    }

    #[test]
    fn test_finalize_missing_column() {
        let table = parse_str("first_name,last_name\nAnn,Lee", ',').unwrap();
        assert_eq!(
            finalize(&table),
            Err(CleanError::MissingColumn("job_title".into()))
        );
    }

    #[test]
    fn test_clean_table_scenario() {
        let table = load(&[
            "Ann Lee,CEO,acme corp,Ops,555.123.4567,,,Ann@Acme.COM,WWW.ACME.COM,1 Main St,Boston MA 02108,USA,met at expo",
            "Ann Lee,CEO,acme corp,Ops,555.123.4567,,,Ann@Acme.COM,WWW.ACME.COM,1 Main St,Boston MA 02108,USA,met at expo",
            "Prince,Artist,,,,(555)987.6543,,,,,,,",
        ]);

        let outcome = clean_table(table).unwrap();
        assert_eq!(outcome.cards.len(), 2);
        assert_eq!(
            outcome.report,
            CleanReport {
                rows_read: 3,
                duplicates_removed: 1,
                phone_cells_rewritten: 2,
                rows_written: 2,
            }
        );

        let ann = &outcome.cards[0];
        assert_eq!(ann.first_name, cell("Ann"));
        assert_eq!(ann.last_name, cell("Lee"));
        assert_eq!(ann.company, cell("ACME CORP"));
        assert_eq!(ann.phone_number, cell("(555)123-4567"));
        assert_eq!(ann.e_mail, cell("ann@acme.com"));
        assert_eq!(ann.website, cell("www.acme.com"));
        assert_eq!(ann.zip_postal_code, cell("02108"));
        assert_eq!(ann.location_region, cell("USA"));

        let prince = &outcome.cards[1];
        assert_eq!(prince.first_name, cell("Prince"));
        assert_eq!(prince.last_name, cell("Prince"));
        assert_eq!(prince.mobile_phone, cell("(555)987-6543"));
        assert_eq!(prince.company, None);
    }
}

//! CSV loading with encoding and delimiter auto-detection.
//!
//! Produces a [`RawTable`] with headers exactly as written in the file.
//! Cell text is kept verbatim; empty cells become missing values.

use csv::ReaderBuilder;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{RawRow, RawTable};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Loaded table
    pub table: RawTable,
    /// Detected encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "iso-8859-15" | "latin-9" | "latin9" => "iso-8859-15".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// `iso-8859-1` is read as Windows-1252, its WHATWG superset, so exporter
/// punctuation in 0x80-0x9F (curly quotes, dashes) survives. A detected
/// encoding that fails to decode falls back to Windows-1252; unknown labels
/// fall back to lossy UTF-8. A leading byte order mark is
/// removed so it does not end up in the first header.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        "iso-8859-15" | "latin-9" | "latin9" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
                } else {
                    text.into_owned()
                }
            }
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the header line.
///
/// Defaults to a comma when no candidate appears.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// # Example
/// ```
/// use cardclean::parser::parse_str;
///
/// let table = parse_str("Full Name,Memo\nAnn Lee,\n", ',').unwrap();
/// assert_eq!(table.headers, vec!["Full Name", "Memo"]);
/// assert_eq!(table.rows[0][0].as_deref(), Some("Ann Lee"));
/// assert_eq!(table.rows[0][1], None);
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<RawTable> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::Parse {
        line: 0,
        message: format!("Delimiter '{}' is not a single-byte character", delimiter),
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record?;
        let row: RawRow = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Parse CSV bytes with auto-detection of encoding and (optionally) delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let table = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

/// Load a CSV file.
///
/// A missing file is reported as [`CsvError::NotFound`].
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CsvError::NotFound(path.to_path_buf()),
        _ => CsvError::Io(e),
    })?;

    parse_bytes_auto(&bytes, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let table = parse_str("name,age\nAlice,30\nBob,25", ',').unwrap();

        assert_eq!(table.headers, vec!["name", "age"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0].as_deref(), Some("Alice"));
        assert_eq!(table.rows[1][1].as_deref(), Some("25"));
    }

    #[test]
    fn test_quoted_values_keep_commas() {
        let csv = "Address,Zip/Postal Code\n\"1 Main St, Suite 2\",\"Boston MA 02108\"";
        let table = parse_str(csv, ',').unwrap();

        assert_eq!(table.rows[0][0].as_deref(), Some("1 Main St, Suite 2"));
        assert_eq!(table.rows[0][1].as_deref(), Some("Boston MA 02108"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let table = parse_str("a,b,c\n1,,3", ',').unwrap();

        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, Some("3".to_string())]);
    }

    #[test]
    fn test_whitespace_kept_verbatim() {
        let table = parse_str("a,b\n  x , \n", ',').unwrap();

        assert_eq!(table.rows[0][0].as_deref(), Some("  x "));
        assert_eq!(table.rows[0][1].as_deref(), Some(" "));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse_str("a,b\n1,2\n\n3,4\n", ',').unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_short_and_long_rows() {
        let table = parse_str("a,b\n1\n1,2,3,4", ',').unwrap();

        assert_eq!(table.rows[0], vec![Some("1".to_string()), None]);
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_str("", ','), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_str(" \n", ','), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = "\u{feff}Full Name,Memo\nAnn Lee,x".as_bytes();
        let result = parse_bytes_auto(bytes, None).unwrap();

        assert_eq!(result.table.headers[0], "Full Name");
        assert_eq!(result.delimiter, ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_reads_windows_1252_punctuation() {
        assert_eq!(decode_content(b"Sean O\x92Brien", "iso-8859-1"), "Sean O\u{2019}Brien");
        assert_eq!(decode_content(b"\xbd \xa4 \xbc", "iso-8859-1"), "½ ¤ ¼");
        assert_eq!(decode_content(b"\x96", "windows-1252"), "\u{2013}");
    }

    #[test]
    fn test_latin9_keeps_euro() {
        assert_eq!(decode_content(b"\xa4", "iso-8859-15"), "€");
    }

    #[test]
    fn test_failed_guess_falls_back() {
        let bytes: &[u8] = b"Jos\xe9";
        assert_eq!(decode_content(bytes, "shift_jis"), "José");
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("/nonexistent/dir/cards.csv", None).unwrap_err();
        assert!(matches!(err, CsvError::NotFound(_)));
    }
}

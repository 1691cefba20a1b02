//! Writing cleaned cards.
//!
//! The output file is named `Clean <input file name>`. By default each
//! record is preceded by its 0-based row ordinal under an empty header.

use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::OutputResult;
use crate::models::{final_labels, CleanCard};

/// Prefix added to the input file name.
pub const OUTPUT_PREFIX: &str = "Clean ";

/// Input path for a base name entered without extension.
pub fn input_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.csv", name.trim()))
}

/// Output path for `input`, placed in `dir` or next to the input.
pub fn output_path(input: &Path, dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let clean_name = format!("{}{}", OUTPUT_PREFIX, file_name);

    match dir {
        Some(d) => d.join(clean_name),
        None => input.with_file_name(clean_name),
    }
}

/// Write cards as CSV to any writer.
pub fn write_cards<W: Write>(cards: &[CleanCard], writer: W, with_index: bool) -> OutputResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(!with_index).from_writer(writer);

    if with_index {
        let mut header = vec![""];
        header.extend(final_labels());
        wtr.write_record(&header)?;

        for (i, card) in cards.iter().enumerate() {
            let ordinal = i.to_string();
            let mut record = vec![ordinal.as_str()];
            record.extend(card.cells().iter().map(|c| c.unwrap_or("")));
            wtr.write_record(&record)?;
        }
    } else if cards.is_empty() {
        // serde only emits headers alongside the first record
        wtr.write_record(final_labels())?;
    } else {
        for card in cards {
            wtr.serialize(card)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Create `path` and write cards into it.
pub fn write_cards_file(cards: &[CleanCard], path: &Path, with_index: bool) -> OutputResult<()> {
    let file = File::create(path)?;
    write_cards(cards, file, with_index)
}

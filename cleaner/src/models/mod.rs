//! Domain models for the card cleaning pipeline.
//!
//! - [`RawTable`] - Loosely-typed table as loaded, before normalization
//! - [`CleanCard`] - One finalized business card with the 13 output fields
//! - [`FINAL_COLUMNS`] - Output column keys and their human-readable labels

use serde::Serialize;

use crate::error::{CleanError, CleanResult};

// =============================================================================
// Raw Table
// =============================================================================

/// A single cell; `None` marks an empty or missing value.
pub type Cell = Option<String>;

/// One row of cells, aligned with [`RawTable::headers`].
pub type RawRow = Vec<Cell>;

/// Table addressed by column name, used by the stages that run before the
/// schema is fixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: RawRow) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name`, or `MissingColumn`.
    pub fn column_index(&self, name: &str) -> CleanResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CleanError::MissingColumn(name.to_string()))
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> CleanResult<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn drop_column(&mut self, name: &str) -> CleanResult<()> {
        let idx = self.column_index(name)?;
        self.headers.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    pub fn rename_headers<F>(&mut self, f: F)
    where
        F: Fn(&str) -> String,
    {
        for header in &mut self.headers {
            *header = f(header);
        }
    }

    /// Replace every cell of a column with `f(cell)`.
    pub fn map_column<F>(&mut self, name: &str, f: F) -> CleanResult<()>
    where
        F: Fn(&Cell) -> Cell,
    {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Overwrite a column, appending it when absent.
    ///
    /// `values` must hold exactly one cell per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.headers.iter().position(|h| h == name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}

// =============================================================================
// Finalized Card
// =============================================================================

/// Output columns in order: (table key, output label).
pub const FINAL_COLUMNS: [(&str, &str); 13] = [
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("job_title", "Job Title"),
    ("company", "Employer"),
    ("department", "Department"),
    ("phone_number", "Work Phone Number"),
    ("mobile_phone", "Mobile Phone Number"),
    ("fax_number", "Fax Number"),
    ("e_mail", "Work Email"),
    ("website", "Website"),
    ("address", "Work Address"),
    ("zip_postal_code", "Work ZIP Code"),
    ("location_region", "Work Country"),
];

/// Output labels in column order.
pub fn final_labels() -> Vec<&'static str> {
    FINAL_COLUMNS.iter().map(|(_, label)| *label).collect()
}

/// A cleaned business card.
///
/// Field order is the output column order; serde names are the output labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanCard {
    #[serde(rename = "First Name")]
    pub first_name: Option<String>,
    #[serde(rename = "Last Name")]
    pub last_name: Option<String>,
    #[serde(rename = "Job Title")]
    pub job_title: Option<String>,
    #[serde(rename = "Employer")]
    pub company: Option<String>,
    #[serde(rename = "Department")]
    pub department: Option<String>,
    #[serde(rename = "Work Phone Number")]
    pub phone_number: Option<String>,
    #[serde(rename = "Mobile Phone Number")]
    pub mobile_phone: Option<String>,
    #[serde(rename = "Fax Number")]
    pub fax_number: Option<String>,
    #[serde(rename = "Work Email")]
    pub e_mail: Option<String>,
    #[serde(rename = "Website")]
    pub website: Option<String>,
    #[serde(rename = "Work Address")]
    pub address: Option<String>,
    #[serde(rename = "Work ZIP Code")]
    pub zip_postal_code: Option<String>,
    #[serde(rename = "Work Country")]
    pub location_region: Option<String>,
}

impl CleanCard {
    /// Build a card from 13 cells in [`FINAL_COLUMNS`] order.
    pub fn from_cells(cells: [Cell; 13]) -> Self {
        let [first_name, last_name, job_title, company, department, phone_number, mobile_phone, fax_number, e_mail, website, address, zip_postal_code, location_region] =
            cells;
        Self {
            first_name,
            last_name,
            job_title,
            company,
            department,
            phone_number,
            mobile_phone,
            fax_number,
            e_mail,
            website,
            address,
            zip_postal_code,
            location_region,
        }
    }

    /// Field values in [`FINAL_COLUMNS`] order.
    pub fn cells(&self) -> [Option<&str>; 13] {
        [
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.job_title.as_deref(),
            self.company.as_deref(),
            self.department.as_deref(),
            self.phone_number.as_deref(),
            self.mobile_phone.as_deref(),
            self.fax_number.as_deref(),
            self.e_mail.as_deref(),
            self.website.as_deref(),
            self.address.as_deref(),
            self.zip_postal_code.as_deref(),
            self.location_region.as_deref(),
        ]
    }
}

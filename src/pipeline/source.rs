//! Fragment dumps: pages of positioned text stored as JSON.
//!
//! Any PDF text-layout provider can export its per-page spans in this shape
//! and hand the file to the extractor or the `pdf_tabular` binary:
//!
//! ```json
//! {"pages": [[{"text": "Last Name", "x0": 0, "y0": 100, "x1": 40, "y1": 110}]]}
//! ```

use crate::error::Result;
use crate::layout::Fragment;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Pages of fragments, in page order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentDump {
    /// One fragment list per page, each in provider order
    pub pages: Vec<Vec<Fragment>>,
}

impl FragmentDump {
    /// Parse a dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: FragmentDump = serde_json::from_reader(reader)?;
        log::debug!("Loaded fragment dump with {} pages", dump.pages.len());
        Ok(dump)
    }

    /// Parse a dump from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dump from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl IntoIterator for FragmentDump {
    type Item = Vec<Fragment>;
    type IntoIter = std::vec::IntoIter<Vec<Fragment>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

use crate::traits::ListingSink;
use crate::types::{MatchResult, PadwatchError, RawListing, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADERS: &[&str] = &[
    "Date Added",
    "Title",
    "Price",
    "Neighborhood",
    "Apartment Type",
    "Author",
    "Posted",
    "Link",
    "Score",
    "Comments",
];

/// One row of the output sheet, built from an accepted listing and its
/// filter annotations.
#[derive(Debug, Clone)]
pub struct SheetRow {
    fields: Vec<String>,
}

impl SheetRow {
    pub fn from_listing(listing: &RawListing, result: &MatchResult) -> Self {
        let fields = vec![
            Utc::now().format("%Y-%m-%d %H:%M").to_string(),
            listing.title.clone(),
            result.price.map(|p| format!("${}", p)).unwrap_or_default(),
            result.neighborhood.clone().unwrap_or_default(),
            result.apartment_type.clone().unwrap_or_default(),
            listing.author.clone(),
            listing
                .posted_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            listing.url.clone(),
            listing.score.to_string(),
            listing.num_comments.to_string(),
        ];
        Self { fields }
    }

    pub fn title(&self) -> &str {
        &self.fields[1]
    }

    fn to_csv_line(&self) -> String {
        self.fields
            .iter()
            .map(|f| csv_escape(f))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Appends accepted listings to a local CSV file, the stand-in for the
/// shared spreadsheet. The header row is written when the file is created.
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            let mut file = std::fs::File::create(&path)?;
            writeln!(file, "{}", HEADERS.join(","))?;
            info!("created output sheet at {}", path.display());
        }
        Ok(Self { path })
    }
}

#[async_trait]
impl ListingSink for CsvFileSink {
    async fn append_row(&mut self, row: &SheetRow) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| PadwatchError::SinkWrite(e.to_string()))?;
        writeln!(file, "{}", row.to_csv_line())
            .map_err(|e| PadwatchError::SinkWrite(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_commas_and_quotes() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use crate::error::Result;
use crate::models::MovieRecord;

/// Writes the report as a single JSON array.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed over it, so readers never see a partial report.
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn write_report(&self, records: &[MovieRecord]) -> Result<()> {
        let json = serde_json::to_vec(records)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(&json)?;
        file.flush()?;
        file.persist(&self.path)?;

        debug!(
            path = %self.path.display(),
            bytes = json.len(),
            "Wrote report"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClubRatings, FilmDetails};

    fn record(slug: &str) -> MovieRecord {
        let details = FilmDetails {
            slug: slug.to_string(),
            poster_url: format!("https://a.ltrbxd.com/{}.jpg", slug),
            title: slug.to_uppercase(),
            year: 1979,
            runtime: 117,
            avg_rating: 4.3,
            directors: vec!["Ridley Scott".to_string()],
            cast: Vec::new(),
        };
        MovieRecord::build(details, 4, ClubRatings::unrated(&["alice".to_string()]))
    }

    #[test]
    fn writes_a_json_array_and_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stats.json");

        JsonWriter::new(&path).write_report(&[record("alien"), record("heat")]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let slugs: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["alien", "heat"]);
        assert_eq!(value[0]["club_ratings"], serde_json::json!({ "alice": null }));
    }

    #[test]
    fn replaces_an_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, "old").unwrap();

        JsonWriter::new(&path).write_report(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

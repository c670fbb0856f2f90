use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Artist credit used when none is supplied.
pub const UNKNOWN_ARTIST: &str = "TBD";

/// Caller-supplied cover information for a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_issue_number")]
    pub issue_number: u32,
    #[serde(default)]
    pub writer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

fn default_issue_number() -> u32 {
    1
}

/// Resolved cover block printed at the top of a formatted script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverBlock {
    pub title: String,
    pub issue_number: u32,
    pub writer: String,
    pub artist: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl CoverBlock {
    /// Fills the artist and date defaults.
    pub fn resolve(meta: CoverMetadata, today: NaiveDate) -> Self {
        let artist = meta
            .artist
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        let date = meta.date.unwrap_or(today).format("%Y-%m-%d").to_string();
        Self {
            title: meta.title,
            issue_number: meta.issue_number,
            writer: meta.writer,
            artist,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_defaults_artist_and_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let cover = CoverBlock::resolve(
            CoverMetadata {
                title: "Night Shift".to_string(),
                issue_number: 2,
                writer: "R. Okafor".to_string(),
                artist: None,
                date: None,
            },
            today,
        );
        assert_eq!(cover.artist, "TBD");
        assert_eq!(cover.date, "2024-03-09");
    }

    #[test]
    fn test_cover_keeps_supplied_artist_and_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let cover = CoverBlock::resolve(
            CoverMetadata {
                title: "Night Shift".to_string(),
                issue_number: 1,
                writer: "R. Okafor".to_string(),
                artist: Some("J. Lind".to_string()),
                date: NaiveDate::from_ymd_opt(2023, 12, 1),
            },
            today,
        );
        assert_eq!(cover.artist, "J. Lind");
        assert_eq!(cover.date, "2023-12-01");
    }

    #[test]
    fn test_cover_metadata_deserializes_camel_case() {
        let meta: CoverMetadata = serde_json::from_str(
            r#"{"title": "T", "issueNumber": 4, "writer": "W", "date": "2024-01-31"}"#,
        )
        .unwrap();
        assert_eq!(meta.issue_number, 4);
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 1, 31));
    }
}

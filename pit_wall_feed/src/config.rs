use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use strategy_engine::{StrategyError, TyreSeverity};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid track file {path}: {source}")]
    TrackFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no track files found in {0}")]
    NoTracks(PathBuf),
    #[error("unknown track {0:?}")]
    UnknownTrack(String),
    #[error("invalid query: {0}")]
    BadQuery(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] StrategyError),
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Street,
    Permanent,
}

/// Static circuit data; the severity tier and race distance feed the engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrackProfile {
    pub name: String,
    pub country: String,
    pub track_type: TrackType,
    pub tyre_severity: TyreSeverity,
    pub total_laps: u32,
    pub corners: u32,
    pub length_km: f64,
}

impl TrackProfile {
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        let data = fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| FeedError::TrackFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Every track profile in a directory, looked up case-insensitively by name.
#[derive(Debug, Default)]
pub struct TrackCatalog {
    tracks: BTreeMap<String, TrackProfile>,
}

impl TrackCatalog {
    pub fn load_dir(dir: &Path) -> Result<Self, FeedError> {
        let entries = fs::read_dir(dir).map_err(|source| FeedError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut catalog = TrackCatalog::default();
        for entry in entries {
            let path = entry
                .map_err(|source| FeedError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            catalog.insert(TrackProfile::load(&path)?);
        }

        if catalog.is_empty() {
            return Err(FeedError::NoTracks(dir.to_path_buf()));
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, profile: TrackProfile) {
        self.tracks.insert(profile.name.to_lowercase(), profile);
    }

    pub fn get(&self, name: &str) -> Result<&TrackProfile, FeedError> {
        self.tracks
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| FeedError::UnknownTrack(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tracks.values().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONZA: &str = r#"{
        "name": "Monza",
        "country": "Italy",
        "track_type": "permanent",
        "tyre_severity": "low",
        "total_laps": 53,
        "corners": 11,
        "length_km": 5.793
    }"#;

    #[test]
    fn test_load_dir_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("monza.json"), MONZA).unwrap();
        fs::write(dir.path().join("README.txt"), "not a track").unwrap();

        let catalog = TrackCatalog::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);

        let monza = catalog.get("MONZA").unwrap();
        assert_eq!(monza.tyre_severity, TyreSeverity::Low);
        assert_eq!(monza.track_type, TrackType::Permanent);
        assert_eq!(monza.total_laps, 53);
    }

    #[test]
    fn test_bad_track_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), r#"{"name": "Broken"}"#).unwrap();

        let err = TrackCatalog::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, FeedError::TrackFile { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(TrackCatalog::load_dir(dir.path()), Err(FeedError::NoTracks(_))));
    }

    #[test]
    fn test_unknown_track() {
        let catalog = TrackCatalog::default();
        assert!(matches!(catalog.get("Imola"), Err(FeedError::UnknownTrack(_))));
    }

    #[test]
    fn test_bundled_tracks_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tracks");
        let catalog = TrackCatalog::load_dir(&dir).unwrap();
        assert!(catalog.len() >= 5);
        assert_eq!(catalog.get("monaco").unwrap().track_type, TrackType::Street);
    }
}

//! Persisted, lazily created statistical model
//!
//! The artifact is a JSON envelope holding a format version, a SHA-256
//! checksum and the model itself. Any failure to read it (missing file,
//! bad JSON, wrong version, checksum mismatch, inconsistent tables) leads
//! to retraining on the seed corpus and rewriting the artifact. If the
//! rewrite fails the in-memory model is still used.
//!
//! Creation is guarded: readers take a shared lock on the cached handle;
//! the first caller to find it empty takes the creation lock, re-checks,
//! and builds the model, so concurrent first use trains at most once.

use crate::model::{ModelError, ModelParams, StatisticalModel, TrainingExample};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Artifact layout version written by this crate
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    format_version: u32,
    checksum: String,
    model: serde_json::Value,
}

/// Owner of the shared model handle and its on-disk artifact
pub struct ModelStore {
    path: PathBuf,
    corpus: Vec<TrainingExample>,
    params: ModelParams,
    model: RwLock<Option<Arc<StatisticalModel>>>,
    init_lock: Mutex<()>,
}

impl ModelStore {
    /// Create a store; nothing is read or trained until first use
    pub fn new(
        path: impl Into<PathBuf>,
        corpus: Vec<TrainingExample>,
        params: ModelParams,
    ) -> Self {
        Self {
            path: path.into(),
            corpus,
            params,
            model: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// Artifact location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once a model handle has been created in this process
    pub fn is_initialized(&self) -> bool {
        self.model.read().is_some()
    }

    /// Shared model handle, loading or training it on first use
    pub fn get(&self) -> Result<Arc<StatisticalModel>, ModelError> {
        if let Some(model) = self.model.read().as_ref() {
            return Ok(Arc::clone(model));
        }

        let _guard = self.init_lock.lock();
        if let Some(model) = self.model.read().as_ref() {
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(self.load_or_train()?);
        *self.model.write() = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Train from the seed corpus, persist, and replace the cached handle.
    /// The flag reports whether this call wrote the artifact.
    pub fn retrain(&self) -> Result<(Arc<StatisticalModel>, bool), ModelError> {
        let _guard = self.init_lock.lock();

        let (model, persisted) = self.train_and_persist()?;
        let model = Arc::new(model);
        *self.model.write() = Some(Arc::clone(&model));
        Ok((model, persisted))
    }

    fn load_or_train(&self) -> Result<StatisticalModel, ModelError> {
        match load_artifact(&self.path) {
            Ok(model) => {
                info!(path = %self.path.display(), "Loaded statistical model");
                Ok(model)
            }
            Err(e) => {
                if e.is_missing_artifact() {
                    info!(
                        path = %self.path.display(),
                        "No persisted model, training from seed corpus"
                    );
                } else {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        phase = e.phase().as_str(),
                        "Persisted model unusable, retraining"
                    );
                    metrics::counter!(
                        "lexcheck_model_fallbacks_total",
                        "phase" => e.phase().as_str()
                    )
                    .increment(1);
                }
                self.train_and_persist().map(|(model, _)| model)
            }
        }
    }

    fn train_and_persist(&self) -> Result<(StatisticalModel, bool), ModelError> {
        let model = StatisticalModel::train(&self.corpus, self.params)?;
        debug!(examples = self.corpus.len(), "Trained statistical model");

        let persisted = match save_artifact(&self.path, &model) {
            Ok(()) => {
                info!(path = %self.path.display(), "Persisted statistical model");
                true
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to persist model; continuing with in-memory copy"
                );
                metrics::counter!(
                    "lexcheck_model_fallbacks_total",
                    "phase" => e.phase().as_str()
                )
                .increment(1);
                false
            }
        };

        Ok((model, persisted))
    }
}

/// Read and verify a model artifact
pub fn load_artifact(path: &Path) -> Result<StatisticalModel, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(ModelError::Decode)?;
    if artifact.format_version != FORMAT_VERSION {
        return Err(ModelError::Incompatible {
            found: artifact.format_version,
            expected: FORMAT_VERSION,
        });
    }

    if checksum(&artifact.model)? != artifact.checksum {
        return Err(ModelError::ChecksumMismatch);
    }

    let model: StatisticalModel =
        serde_json::from_value(artifact.model).map_err(ModelError::Decode)?;
    model.check_consistency()?;
    Ok(model)
}

/// Write a model artifact via a sibling temp file and rename
pub fn save_artifact(path: &Path, model: &StatisticalModel) -> Result<(), ModelError> {
    let value = serde_json::to_value(model).map_err(ModelError::Serialize)?;
    let artifact = ModelArtifact {
        format_version: FORMAT_VERSION,
        checksum: checksum(&value)?,
        model: value,
    };
    let bytes = serde_json::to_vec(&artifact).map_err(ModelError::Serialize)?;

    let persist_err = |source| ModelError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(persist_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, bytes).map_err(persist_err)?;
    std::fs::rename(&tmp, path).map_err(persist_err)?;
    Ok(())
}

fn checksum(value: &serde_json::Value) -> Result<String, ModelError> {
    let canonical = serde_json::to_vec(value).map_err(ModelError::Serialize)?;
    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_seed_corpus;

    fn store(dir: &tempfile::TempDir) -> ModelStore {
        ModelStore::new(
            dir.path().join("models").join("classifier_model.json"),
            default_seed_corpus(),
            ModelParams::default(),
        )
    }

    fn trained() -> StatisticalModel {
        StatisticalModel::train(&default_seed_corpus(), ModelParams::default()).unwrap()
    }

    #[test]
    fn test_creates_artifact_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        assert!(!store.path().exists());
        assert!(!store.is_initialized());

        store.get().unwrap();
        assert!(store.path().exists());
        assert!(store.is_initialized());
    }

    #[test]
    fn test_roundtrip_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let model = trained();

        save_artifact(&path, &model).unwrap();
        assert_eq!(load_artifact(&path).unwrap(), model);
    }

    #[test]
    fn test_corrupt_artifact_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"not json at all").unwrap();

        assert!(matches!(load_artifact(store.path()), Err(ModelError::Decode(_))));

        store.get().unwrap();
        assert!(load_artifact(store.path()).is_ok());
    }

    #[test]
    fn test_tampered_artifact_fails_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let model = trained();
        save_artifact(&path, &model).unwrap();

        let mut artifact: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        artifact["model"]["class_log_prior"][0] = serde_json::json!(0.0);
        std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        assert!(matches!(load_artifact(&path), Err(ModelError::ChecksumMismatch)));
    }

    #[test]
    fn test_wrong_version_is_incompatible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let model = trained();
        save_artifact(&path, &model).unwrap();

        let mut artifact: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        artifact["format_version"] = serde_json::json!(99);
        std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(err, ModelError::Incompatible { found: 99, expected: 1 }));
        assert_eq!(err.phase(), crate::model::ModelPhase::Load);
    }

    #[test]
    fn test_get_returns_shared_handle() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let a = store.get().unwrap();
        let b = store.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_retrain_replaces_handle() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let a = store.get().unwrap();
        let (b, persisted) = store.retrain().unwrap();
        assert!(persisted);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_retrain_reports_failed_write_over_stale_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.get().unwrap();
        assert!(store.path().exists());

        // A directory where the temp file goes makes the write fail
        let mut tmp = store.path().as_os_str().to_owned();
        tmp.push(".tmp");
        std::fs::create_dir(&tmp).unwrap();

        let (_, persisted) = store.retrain().unwrap();
        assert!(!persisted);
        assert!(store.path().exists());
    }

    #[test]
    fn test_unwritable_path_still_serves_model() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let store = ModelStore::new(
            blocker.join("classifier_model.json"),
            default_seed_corpus(),
            ModelParams::default(),
        );
        assert!(store.get().is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_empty_corpus_fails_training() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("m.json"), Vec::new(), ModelParams::default());
        assert!(matches!(store.get(), Err(ModelError::EmptyCorpus)));
        assert!(!store.is_initialized());
    }
}

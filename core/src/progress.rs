use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressData {
    pub completed_problems: BTreeSet<String>,
    pub hint_usage: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    pub total_completed: usize,
    pub completed_ids: Vec<String>,
}

/// The learner's completed set and hint usage, persisted as JSON.
///
/// Every mutation saves immediately. A failed save is logged and reported as
/// `false`; it never aborts the caller.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    save_path: PathBuf,
    data: ProgressData,
}

impl ProgressStore {
    /// Missing or unreadable files start from empty progress.
    pub fn open(save_path: impl Into<PathBuf>) -> Self {
        let save_path = save_path.into();
        let data = Self::load(&save_path);
        Self { save_path, data }
    }

    fn load(save_path: &Path) -> ProgressData {
        match fsutil::read_json_with_deserialize(save_path) {
            Ok(data) => data,
            Err(e) if e.is_not_found() => ProgressData::default(),
            Err(e) => {
                log::warn!("Ignoring unreadable progress file: {}", e);
                ProgressData::default()
            }
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn data(&self) -> &ProgressData {
        &self.data
    }

    #[must_use]
    pub fn save(&mut self) -> bool {
        self.data.updated_at = Some(Local::now());
        match fsutil::write_json_pretty_atomic(&self.save_path, &self.data) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save progress: {}", e);
                false
            }
        }
    }

    pub fn completed_problems(&self) -> &BTreeSet<String> {
        &self.data.completed_problems
    }

    pub fn is_completed(&self, problem_id: &str) -> bool {
        self.data.completed_problems.contains(problem_id)
    }

    /// Adds `problem_id` to the completed set (a no-op if already there) and saves.
    /// Returns whether the save succeeded.
    pub fn mark_completed(&mut self, problem_id: &str) -> bool {
        self.data.completed_problems.insert(problem_id.to_owned());
        self.save()
    }

    pub fn hint_usage(&self, problem_id: &str) -> usize {
        self.data.hint_usage.get(problem_id).copied().unwrap_or(0)
    }

    pub fn set_hint_usage(&mut self, problem_id: &str, count: usize) -> bool {
        self.data.hint_usage.insert(problem_id.to_owned(), count);
        self.save()
    }

    pub fn reset(&mut self) -> bool {
        self.data = ProgressData::default();
        self.save()
    }

    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            total_completed: self.data.completed_problems.len(),
            completed_ids: self.data.completed_problems.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use maplit::{btreemap, btreeset};

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::open(dir.path().join("progress.json"))
    }

    #[test]
    fn marking_twice_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_in(&tmp);

        assert!(store.mark_completed("syntax_001"));
        assert!(store.mark_completed("syntax_001"));

        assert_eq!(store.completed_problems().len(), 1);
        assert!(store.is_completed("syntax_001"));
        assert!(!store.is_completed("syntax_002"));
    }

    #[test]
    fn progress_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut store = store_in(&tmp);
            assert!(store.mark_completed("b"));
            assert!(store.mark_completed("a"));
            assert!(store.set_hint_usage("c", 2));
        }

        let store = store_in(&tmp);
        assert_eq!(store.completed_problems(), &btreeset! {"a".to_owned(), "b".to_owned()});
        assert_eq!(store.data().hint_usage, btreemap! {"c".to_owned() => 2});
        assert_eq!(store.hint_usage("c"), 2);
        assert_eq!(store.hint_usage("zzz"), 0);
        assert!(store.data().updated_at.is_some());
        assert_eq!(
            store.stats(),
            ProgressStats {
                total_completed: 2,
                completed_ids: vec!["a".to_owned(), "b".to_owned()],
            }
        );
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("progress.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = ProgressStore::open(&path);
        assert_eq!(store.data(), &ProgressData::default());
    }

    #[test]
    fn file_without_optional_fields_loads() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("progress.json");
        std::fs::write(&path, r#"{ "completed_problems": ["x"] }"#).unwrap();

        let store = ProgressStore::open(&path);
        assert!(store.is_completed("x"));
        assert!(store.data().hint_usage.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_in(&tmp);
        assert!(store.mark_completed("a"));
        assert!(store.set_hint_usage("a", 1));

        assert!(store.reset());
        assert_eq!(store.stats().total_completed, 0);
        assert_eq!(store.hint_usage("a"), 0);
        assert_eq!(store_in(&tmp).stats().total_completed, 0);
    }

    #[test]
    fn unwritable_location_reports_false() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        // The parent "directory" is a regular file, so the save must fail.
        let mut store = ProgressStore::open(blocker.join("progress.json"));
        assert!(!store.mark_completed("a"));
        assert!(store.is_completed("a"));
    }
}

use std::{collections::HashSet, path::Path};

use crate::{
    assets,
    problem::{Difficulty, Problem},
};

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fs(#[from] fsutil::Error),

    #[error("Invalid problem catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate problem id '{0}'")]
    DuplicateId(String),
}

/// Filter value meaning "no filter".
pub const ALL: &str = "All";

pub fn categories() -> &'static [&'static str] {
    &[
        ALL,
        "Syntax",
        "Control Flow",
        "Functions",
        "Data Structures",
        "Data Handling",
        "Exception Handling",
        "Advanced",
    ]
}

pub fn difficulties() -> &'static [&'static str] {
    &[ALL, "Beginner", "Intermediate", "Advanced"]
}

/// The problem library, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemCatalog {
    problems: Vec<Problem>,
}

impl ProblemCatalog {
    pub fn new(problems: Vec<Problem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for p in &problems {
            if !seen.insert(p.id.as_str()) {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self { problems })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_json_file(filepath: impl AsRef<Path>) -> Result<Self> {
        Self::new(fsutil::read_json_with_deserialize(filepath)?)
    }

    /// The library shipped inside the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(&assets::text(assets::BUILTIN_PROBLEMS_FILENAME))
    }

    pub fn all(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Problem> {
        self.problems.iter().filter(move |p| p.category == category)
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Problem> {
        self.problems
            .iter()
            .filter(move |p| p.difficulty == difficulty)
    }

    /// `None` or [`ALL`] disables the corresponding filter.
    pub fn filter(&self, category: Option<&str>, difficulty: Option<&str>) -> Vec<&Problem> {
        fn active(f: Option<&str>) -> Option<&str> {
            f.filter(|v| !v.is_empty() && *v != ALL)
        }
        let category = active(category);
        let difficulty = active(difficulty);

        self.problems
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| difficulty.map_or(true, |d| p.difficulty.to_string() == d))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LIBRARY: &str = r#"[
        { "id": "a", "category": "Syntax", "difficulty": "Beginner" },
        { "id": "b", "category": "Syntax", "difficulty": "Advanced" },
        { "id": "c", "category": "Functions" }
    ]"#;

    fn ids(ps: &[&Problem]) -> Vec<String> {
        ps.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn get_by_id() {
        let cat = ProblemCatalog::from_json_str(LIBRARY).unwrap();
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.get("b").map(|p| p.difficulty), Some(Difficulty::Advanced));
        assert_eq!(cat.get("zzz"), None);
    }

    #[test]
    fn filters_combine_and_all_disables() {
        let cat = ProblemCatalog::from_json_str(LIBRARY).unwrap();

        assert_eq!(ids(&cat.filter(None, None)), ["a", "b", "c"]);
        assert_eq!(ids(&cat.filter(Some("All"), Some("All"))), ["a", "b", "c"]);
        assert_eq!(ids(&cat.filter(Some("Syntax"), None)), ["a", "b"]);
        assert_eq!(ids(&cat.filter(Some("Syntax"), Some("Advanced"))), ["b"]);
        assert_eq!(ids(&cat.filter(None, Some("Beginner"))), ["a", "c"]);
        assert!(cat.filter(Some("Nope"), None).is_empty());

        assert_eq!(cat.by_category("Functions").count(), 1);
        assert_eq!(cat.by_difficulty(Difficulty::Beginner).count(), 2);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let res = ProblemCatalog::from_json_str(r#"[{ "id": "x" }, { "id": "x" }]"#);
        assert!(matches!(res, Err(CatalogError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn builtin_library_is_valid() {
        let cat = ProblemCatalog::builtin().unwrap();
        assert!(!cat.is_empty());
        for p in cat.all() {
            assert!(
                categories().contains(&p.category.as_str()),
                "unknown category {:?} in {}",
                p.category,
                p.id
            );
        }
    }

    #[test]
    fn filter_values_start_with_all() {
        assert_eq!(categories()[0], ALL);
        assert_eq!(difficulties()[0], ALL);
    }
}

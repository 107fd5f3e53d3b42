use std::collections::BTreeSet;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::problem::{Difficulty, Problem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyStat {
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_problems: usize,
    pub completed_problems: usize,
    pub total_points: u32,
    pub earned_points: u32,
    /// Always lists every difficulty, easiest first.
    pub difficulty_stats: Vec<DifficultyStat>,
    /// Categories in order of first appearance.
    pub category_stats: Vec<CategoryStat>,
}

impl Stats {
    pub fn summarize(problems: &[Problem], completed: &BTreeSet<String>) -> Self {
        let is_done = |p: &Problem| completed.contains(&p.id);

        let mut difficulty_stats: Vec<_> = Difficulty::iter()
            .map(|difficulty| DifficultyStat {
                difficulty,
                tally: Tally::default(),
            })
            .collect();
        let mut category_stats: Vec<CategoryStat> = Vec::new();
        let mut total_points = 0;
        let mut earned_points = 0;

        for p in problems {
            let done = is_done(p);
            let points = p.difficulty.points();
            total_points += points;
            if done {
                earned_points += points;
            }

            if let Some(s) = difficulty_stats
                .iter_mut()
                .find(|s| s.difficulty == p.difficulty)
            {
                s.tally.add(done);
            }

            let category = if p.category.is_empty() {
                "Unknown"
            } else {
                p.category.as_str()
            };
            match category_stats.iter_mut().find(|s| s.category == category) {
                Some(s) => s.tally.add(done),
                None => {
                    let mut tally = Tally::default();
                    tally.add(done);
                    category_stats.push(CategoryStat {
                        category: category.to_owned(),
                        tally,
                    });
                }
            }
        }

        Self {
            total_problems: problems.len(),
            completed_problems: completed.len(),
            total_points,
            earned_points,
            difficulty_stats,
            category_stats,
        }
    }
}

impl Tally {
    fn add(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use maplit::btreeset;

    use super::*;

    fn problem(id: &str, category: &str, difficulty: Difficulty) -> Problem {
        Problem {
            category: category.to_owned(),
            difficulty,
            ..Problem::new(id)
        }
    }

    #[test]
    fn points_are_weighted_by_difficulty() {
        use Difficulty::*;
        let problems = vec![
            problem("a", "Syntax", Beginner),
            problem("b", "Syntax", Intermediate),
            problem("c", "Functions", Advanced),
            problem("d", "", Advanced),
        ];
        let completed = btreeset! {"b".to_owned(), "c".to_owned(), "gone".to_owned()};

        let s = Stats::summarize(&problems, &completed);

        assert_eq!(s.total_problems, 4);
        assert_eq!(s.completed_problems, 3);
        assert_eq!(s.total_points, 1 + 2 + 4 + 4);
        assert_eq!(s.earned_points, 2 + 4);

        let by_difficulty: Vec<_> = s
            .difficulty_stats
            .iter()
            .map(|d| (d.difficulty, d.tally.total, d.tally.completed))
            .collect();
        assert_eq!(
            by_difficulty,
            [(Beginner, 1, 0), (Intermediate, 1, 1), (Advanced, 2, 1)]
        );

        let by_category: Vec<_> = s
            .category_stats
            .iter()
            .map(|c| (c.category.as_str(), c.tally.total, c.tally.completed))
            .collect();
        assert_eq!(
            by_category,
            [("Syntax", 2, 1), ("Functions", 1, 1), ("Unknown", 1, 0)]
        );
    }

    #[test]
    fn empty_library_still_lists_difficulties() {
        let s = Stats::summarize(&[], &BTreeSet::new());
        assert_eq!(s.total_points, 0);
        assert_eq!(s.difficulty_stats.len(), 3);
        assert!(s.category_stats.is_empty());
    }
}

use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn points(self) -> u32 {
        use Difficulty::*;
        match self {
            Beginner => 1,
            Intermediate => 2,
            Advanced => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    #[default]
    Output,
    VariableExists,
    /// Any tag this version does not know; such cases always pass.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub check_type: CheckType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

impl TestCase {
    pub fn output(expected: impl Into<String>) -> Self {
        Self {
            check_type: CheckType::Output,
            expected: Some(expected.into()),
            variables: Vec::new(),
        }
    }

    pub fn variable_exists<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            check_type: CheckType::VariableExists,
            expected: None,
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }
}

/// One exercise, as stored in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_cases: Vec<TestCase>,
}

impl Problem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// A copy without the reference solution, for listing before the learner asks for it.
    pub fn without_solution(&self) -> Self {
        Self {
            solution: None,
            ..self.clone()
        }
    }

    /// The exact-match expectation, if any. An empty string counts as none.
    pub fn expected_output(&self) -> Option<&str> {
        self.expected_output.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn solution_is_hidden_until_asked_for() {
        let p = Problem {
            solution: Some("print(1)".into()),
            ..Problem::new("p1")
        };
        let hidden = p.without_solution();
        assert_eq!(hidden.solution, None);
        assert_eq!(hidden.id, "p1");

        let json = serde_json::to_string(&hidden).unwrap();
        assert!(!json.contains("solution"), "{}", json);
        assert!(serde_json::to_string(&p).unwrap().contains("\"solution\":\"print(1)\""));
    }

    #[test]
    fn minimal_problem_gets_defaults() {
        let p: Problem = serde_json::from_str(r#"{ "id": "p1" }"#).unwrap();
        assert_eq!(p.difficulty, Difficulty::Beginner);
        assert!(p.hints.is_empty());
        assert!(p.test_cases.is_empty());
        assert_eq!(p.expected_output(), None);
    }

    #[test]
    fn test_case_tags_are_parsed() {
        let p: Problem = serde_json::from_str(
            r#"{
                "id": "p2",
                "difficulty": "Advanced",
                "expected_output": "",
                "test_cases": [
                    { "check_type": "variable_exists", "variables": ["x", "y"] },
                    { "check_type": "output", "expected": "3" },
                    { "expected": "no tag" },
                    { "check_type": "regex", "expected": ".*" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(p.difficulty, Difficulty::Advanced);
        assert_eq!(p.expected_output(), None);
        assert_eq!(p.test_cases[0], TestCase::variable_exists(["x", "y"]));
        assert_eq!(p.test_cases[1], TestCase::output("3"));
        assert_eq!(p.test_cases[2].check_type, CheckType::Output);
        assert_eq!(p.test_cases[3].check_type, CheckType::Unknown);
    }

    #[test]
    fn difficulty_points() {
        assert_eq!(Difficulty::Beginner.points(), 1);
        assert_eq!(Difficulty::Intermediate.points(), 2);
        assert_eq!(Difficulty::Advanced.points(), 4);
        assert_eq!("Intermediate".parse::<Difficulty>(), Ok(Difficulty::Intermediate));
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One (input, expected output) pair. Order within a problem is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testcase {
    #[serde(default, deserialize_with = "lenient_string")]
    pub input: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub expected_output: String,
}

impl Testcase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown(String),
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Difficulty::*;
        match self {
            Easy => write!(f, "Easy"),
            Medium => write!(f, "Medium"),
            Hard => write!(f, "Hard"),
            Unknown(s) if s.is_empty() => write!(f, "Unknown"),
            Unknown(s) => write!(f, "{}", s),
        }
    }
}

impl Difficulty {
    pub fn level(&self) -> u8 {
        use Difficulty::*;
        match self {
            Easy => 1,
            Medium => 2,
            Hard => 3,
            Unknown(_) => 0,
        }
    }
}

impl From<&Value> for Difficulty {
    fn from(v: &Value) -> Self {
        use Difficulty::*;
        let level = match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match level {
            Some(1) => return Easy,
            Some(2) => return Medium,
            Some(3) => return Hard,
            _ => {}
        }
        match v {
            Value::String(s) => match s.trim().to_ascii_uppercase().as_str() {
                "EASY" | "简单" => Easy,
                "MEDIUM" | "中等" => Medium,
                "HARD" | "困难" => Hard,
                _ => Unknown(s.to_owned()),
            },
            Value::Null => Unknown(String::new()),
            other => Unknown(other.to_string()),
        }
    }
}

/// Problem metadata served by `GET /problem/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub problem_id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "difficulty")]
    pub difficulty: Difficulty,

    #[serde(
        default = "ProblemInfo::default_accept_rate",
        deserialize_with = "lenient_string"
    )]
    pub accept_rate: String,

    #[serde(
        default = "ProblemInfo::default_submission_count",
        deserialize_with = "lenient_string"
    )]
    pub submission_count: String,

    #[serde(default)]
    pub tags: Vec<Value>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,

    #[serde(default)]
    pub examples: Vec<Value>,

    #[serde(default)]
    pub hints: Vec<Value>,

    #[serde(default)]
    pub constraints: Vec<Value>,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Unknown(String::new())
    }
}

impl ProblemInfo {
    fn default_accept_rate() -> String {
        "0%".to_owned()
    }

    fn default_submission_count() -> String {
        "0".to_owned()
    }

    /// Tags are served either as plain strings or as `{ "name": .. }` objects.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter_map(|t| match t {
                Value::String(s) => Some(s.as_str()),
                Value::Object(m) => m.get("name").and_then(Value::as_str),
                _ => None,
            })
            .collect()
    }
}

/// Accepts a string, a number or null; null becomes the empty string.
fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn difficulty<'de, D>(de: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(|v| Difficulty::from(&v))
}

//! Exchange formats for a task collection
//!
//! Both formats carry the same record: `id` (omitted for drafts, `null`
//! accepted on input), `title` and `completed`.
//!
//! ```text
//! json:   [{"id": 1, "title": "A", "completed": false}, ...]
//! jsonl:  {"id":1,"title":"A","completed":false}
//!         {"id":2,"title":"B","completed":true}
//! ```

use tracing::debug;

use crate::domain::{Task, Tasks};
use crate::error::{Result, TaskError};

/// Serialization format for a task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            _ => Err(format!("Unknown format: {}. Use: json or jsonl", s)),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Encode tasks in collection order
pub fn encode(tasks: &[Task], format: Format) -> Result<String> {
    debug!(count = tasks.len(), %format, "Encoding tasks");
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(tasks)?;
            out.push('\n');
            Ok(out)
        }
        Format::Jsonl => {
            let mut out = String::new();
            for task in tasks {
                out.push_str(&serde_json::to_string(task)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Decode tasks, preserving their order
pub fn decode(input: &str, format: Format) -> Result<Tasks> {
    let tasks = match format {
        Format::Json => {
            if input.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(input)?
            }
        }
        Format::Jsonl => {
            let mut tasks = Vec::new();
            for (idx, line) in input.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let task = serde_json::from_str(line).map_err(|source| TaskError::MalformedLine { line: idx + 1, source })?;
                tasks.push(task);
            }
            tasks
        }
    };
    debug!(count = tasks.len(), %format, "Decoded tasks");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triples(tasks: &[Task]) -> Vec<(Option<u64>, String, bool)> {
        tasks.iter().map(|t| (t.id, t.title.clone(), t.completed)).collect()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("JSONL".parse::<Format>().unwrap(), Format::Jsonl);
        assert_eq!("ndjson".parse::<Format>().unwrap(), Format::Jsonl);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_decode_example_collection() {
        let input = r#"[{"id":1,"title":"A","completed":false},{"id":2,"title":"B","completed":true}]"#;
        let tasks = decode(input, Format::Json).unwrap();
        assert_eq!(
            triples(&tasks),
            vec![(Some(1), "A".to_string(), false), (Some(2), "B".to_string(), true)]
        );
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("[]", Format::Json).unwrap().is_empty());
        assert!(decode("", Format::Json).unwrap().is_empty());
        assert!(decode("\n\n", Format::Jsonl).unwrap().is_empty());
    }

    #[test]
    fn test_encode_jsonl_one_record_per_line() {
        let tasks = vec![Task::with_id(1, "A", false), Task::new("B")];
        let out = encode(&tasks, Format::Jsonl).unwrap();
        assert_eq!(
            out,
            "{\"id\":1,\"title\":\"A\",\"completed\":false}\n{\"title\":\"B\",\"completed\":false}\n"
        );
    }

    #[test]
    fn test_decode_jsonl_reports_line() {
        let input = "{\"id\":1,\"title\":\"A\",\"completed\":false}\n\n{\"id\":2,\"title\":\"B\"}\n";
        match decode(input, Format::Jsonl) {
            Err(TaskError::MalformedLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_json_rejects_garbage() {
        assert!(matches!(decode("{not json", Format::Json), Err(TaskError::Json(_))));
    }

    fn task_strategy() -> impl Strategy<Value = Task> {
        (proptest::option::of(any::<u64>()), ".{0,24}", any::<bool>()).prop_map(|(id, title, completed)| Task {
            id,
            title,
            completed,
        })
    }

    proptest! {
        #[test]
        fn prop_encode_decode_preserves_triples(tasks in proptest::collection::vec(task_strategy(), 0..16)) {
            for format in [Format::Json, Format::Jsonl] {
                let encoded = encode(&tasks, format).unwrap();
                let decoded = decode(&encoded, format).unwrap();
                prop_assert_eq!(triples(&decoded), triples(&tasks));
            }
        }
    }
}

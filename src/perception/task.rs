// ARC task loading.
// A task document is {"train": [...], "test": [...]}, each entry carrying
// "input" and "output" grids as arrays of integer rows.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::{ArcError, Grid, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Train,
    Test,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => write!(f, "train"),
            Self::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcExample {
    pub input: Grid,
    pub output: Grid,
}

#[derive(Debug, Clone)]
pub struct ArcTask {
    pub id: String,
    pub train: Vec<ArcExample>,
    pub test: Vec<ArcExample>,
}

/// The four grid sequences of a task, split by partition and role.
#[derive(Debug, Clone, Default)]
pub struct TaskGrids {
    pub train_inputs: Vec<Grid>,
    pub train_outputs: Vec<Grid>,
    pub test_inputs: Vec<Grid>,
    pub test_outputs: Vec<Grid>,
}

impl ArcTask {
    pub fn partition(&self, partition: Partition) -> &[ArcExample] {
        match partition {
            Partition::Train => &self.train,
            Partition::Test => &self.test,
        }
    }

    pub fn into_grids(self) -> TaskGrids {
        let (train_inputs, train_outputs) = self.train.into_iter().map(|ex| (ex.input, ex.output)).unzip();
        let (test_inputs, test_outputs) = self.test.into_iter().map(|ex| (ex.input, ex.output)).unzip();
        TaskGrids { train_inputs, train_outputs, test_inputs, test_outputs }
    }
}

#[derive(Deserialize)]
struct RawTask {
    train: Vec<RawExample>,
    test: Vec<RawExample>,
}

#[derive(Deserialize)]
struct RawExample {
    input: Vec<Vec<i64>>,
    output: Vec<Vec<i64>>,
}

/// Locates task documents as `<data_dir>/<task_id>.json`.
#[derive(Debug, Clone)]
pub struct TaskLoader {
    data_dir: PathBuf,
}

impl TaskLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn task_path(&self, task_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", task_id))
    }

    pub fn load(&self, task_id: &str) -> Result<ArcTask> {
        let path = self.task_path(task_id);
        let content = read_task_file(&path)?;
        parse_task(task_id, &path.display().to_string(), &content)
    }
}

/// Load a task from an arbitrary path; the ID is the file stem.
pub fn load_arc_task(path: &Path) -> Result<ArcTask> {
    let content = read_task_file(path)?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    parse_task(id, &path.display().to_string(), &content)
}

fn read_task_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArcError::NotFound(path.to_path_buf())
        } else {
            ArcError::Io { path: path.to_path_buf(), source }
        }
    })
}

/// Bytes that are not valid UTF-8 are malformed data, like any other
/// JSON syntax error.
pub fn parse_task(id: &str, origin: &str, content: impl AsRef<[u8]>) -> Result<ArcTask> {
    let raw: RawTask = serde_json::from_slice(content.as_ref())
        .map_err(|e| ArcError::malformed(origin, e.to_string()))?;

    let train = convert_examples(origin, Partition::Train, raw.train)?;
    let test = convert_examples(origin, Partition::Test, raw.test)?;
    debug!(task = id, train = train.len(), test = test.len(), "loaded task");

    Ok(ArcTask { id: id.to_string(), train, test })
}

fn convert_examples(origin: &str, partition: Partition, raw: Vec<RawExample>) -> Result<Vec<ArcExample>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, ex)| -> Result<ArcExample> {
            Ok(ArcExample {
                input: convert_grid(origin, &format!("{}[{}].input", partition, i), ex.input)?,
                output: convert_grid(origin, &format!("{}[{}].output", partition, i), ex.output)?,
            })
        })
        .collect()
}

fn convert_grid(origin: &str, field: &str, rows: Vec<Vec<i64>>) -> Result<Grid> {
    let mut colors = Vec::with_capacity(rows.len());
    for (r, row) in rows.into_iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for (c, value) in row.into_iter().enumerate() {
            let color = u8::try_from(value).map_err(|_| {
                ArcError::malformed(origin, format!("{} row {} col {}: {} is not a color", field, r, c, value))
            })?;
            out.push(color);
        }
        colors.push(out);
    }
    Grid::new(colors).map_err(|e| ArcError::malformed(origin, format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK: &str = r#"{
        "train": [
            {"input": [[1, 0], [0, 1]], "output": [[1]]},
            {"input": [[2]], "output": [[2, 2]]}
        ],
        "test": [
            {"input": [[3, 3, 3]], "output": [[3], [3], [3]]}
        ]
    }"#;

    fn malformed_reason(content: &str) -> String {
        match parse_task("deadbeef", "fixture", content) {
            Err(ArcError::MalformedData { reason, .. }) => reason,
            other => panic!("expected malformed data, got {:?}", other),
        }
    }

    #[test]
    fn parse_splits_partitions_in_order() {
        let task = parse_task("deadbeef", "fixture", TASK).unwrap();
        assert_eq!(task.id, "deadbeef");
        assert_eq!(task.train.len(), 2);
        assert_eq!(task.test.len(), 1);

        let grids = task.into_grids();
        assert_eq!(grids.train_inputs.len(), grids.train_outputs.len());
        assert_eq!(grids.test_inputs.len(), grids.test_outputs.len());
        assert_eq!(grids.train_inputs[1].to_rows(), vec![vec![2]]);
        assert_eq!(grids.test_outputs[0].shape(), (3, 1));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let content = r#"{"name": "x", "train": [], "test": [{"input": [[1]], "output": [[1]], "note": 1}]}"#;
        let task = parse_task("deadbeef", "fixture", content).unwrap();
        assert!(task.train.is_empty());
        assert_eq!(task.test.len(), 1);
    }

    #[test]
    fn missing_output_is_malformed() {
        let reason = malformed_reason(r#"{"train": [{"input": [[1]]}], "test": []}"#);
        assert!(reason.contains("output"), "{}", reason);
    }

    #[test]
    fn missing_partition_is_malformed() {
        let reason = malformed_reason(r#"{"train": []}"#);
        assert!(reason.contains("test"), "{}", reason);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let reason = malformed_reason(r#"{"train": [{"input": [[1, 2], [3]], "output": [[1]]}], "test": []}"#);
        assert!(reason.starts_with("train[0].input"), "{}", reason);
        assert!(reason.contains("row 1"), "{}", reason);
    }

    #[test]
    fn negative_and_fractional_values_are_malformed() {
        let reason = malformed_reason(r#"{"train": [], "test": [{"input": [[1]], "output": [[0, -1]]}]}"#);
        assert!(reason.contains("test[0].output row 0 col 1"), "{}", reason);
        malformed_reason(r#"{"train": [{"input": [[1.5]], "output": [[1]]}], "test": []}"#);
        malformed_reason(r#"{"train": [{"input": [[256]], "output": [[1]]}], "test": []}"#);
    }

    #[test]
    fn invalid_json_is_malformed() {
        malformed_reason("{\"train\": [");
    }

    #[test]
    fn non_utf8_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0000abcd.json"), b"{\"train\": [\xff]}").unwrap();

        match TaskLoader::new(dir.path()).load("0000abcd") {
            Err(ArcError::MalformedData { origin, .. }) => assert!(origin.ends_with("0000abcd.json")),
            other => panic!("expected malformed data, got {:?}", other),
        }
    }

    #[test]
    fn loader_reads_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0a1b2c3d.json"), TASK).unwrap();

        let loader = TaskLoader::new(dir.path());
        let task = loader.load("0a1b2c3d").unwrap();
        assert_eq!(task.id, "0a1b2c3d");
        assert_eq!(task.train.len(), 2);

        let by_path = load_arc_task(&dir.path().join("0a1b2c3d.json")).unwrap();
        assert_eq!(by_path.id, "0a1b2c3d");
        assert_eq!(by_path.test, task.test);
    }

    #[test]
    fn loader_reports_missing_task() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TaskLoader::new(dir.path());
        match loader.load("ffffffff") {
            Err(ArcError::NotFound(path)) => assert!(path.ends_with("ffffffff.json")),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}

use super::adapter::Oracle;
use crate::data::codec::EncodedBatch;
use crate::error::{Result, SeqEvolveError};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Oracle served by an external scoring program.
///
/// The program is started once per batch as
/// `<program> [args...] --checkpoint <checkpoint>`. Each stdin line carries
/// one sequence as `4 * length` whitespace-separated one-hot values
/// (channel-major). The program must answer with one stdout line per
/// sequence holding `channels` whitespace-separated floats.
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    checkpoint: PathBuf,
    channels: usize,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, checkpoint: impl Into<PathBuf>, channels: usize) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            checkpoint: checkpoint.into(),
            channels: channels.max(1),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn render_input(batch: &EncodedBatch) -> String {
        let mut input = String::new();
        for i in 0..batch.batch {
            let line: Vec<String> = batch
                .item(i)
                .iter()
                .map(|v| if *v == 0.0 { "0".to_string() } else { "1".to_string() })
                .collect();
            input.push_str(&line.join(" "));
            input.push('\n');
        }
        input
    }

    fn parse_output(&self, stdout: &str, expected_rows: usize) -> Result<Vec<f64>> {
        let rows: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.len() != expected_rows {
            return Err(SeqEvolveError::ShapeMismatch(format!(
                "oracle printed {} rows for {} sequences",
                rows.len(),
                expected_rows
            )));
        }

        let mut values = Vec::with_capacity(expected_rows * self.channels);
        for (row_index, row) in rows.iter().enumerate() {
            let parsed = row
                .split_whitespace()
                .map(|v| v.parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    SeqEvolveError::ShapeMismatch(format!("row {}: {}", row_index, e))
                })?;
            if parsed.len() != self.channels {
                return Err(SeqEvolveError::ShapeMismatch(format!(
                    "row {} has {} values, expected {}",
                    row_index,
                    parsed.len(),
                    self.channels
                )));
            }
            values.extend(parsed);
        }
        Ok(values)
    }
}

impl Oracle for CommandOracle {
    fn predict(&self, batch: &EncodedBatch) -> Result<Vec<f64>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--checkpoint")
            .arg(&self.checkpoint)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SeqEvolveError::OracleUnavailable(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Feed stdin from a separate thread so a chatty scorer cannot fill
        // its stdout pipe while we are still writing.
        let input = Self::render_input(batch);
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| {
            SeqEvolveError::OracleUnavailable(format!("'{}' did not finish: {}", self.program, e))
        })?;

        let write_result = match writer.map(|w| w.join()) {
            None | Some(Ok(Ok(()))) => Ok(()),
            Some(Ok(Err(e))) => Err(e.to_string()),
            Some(Err(_)) => Err("stdin writer panicked".to_string()),
        };

        if !output.status.success() {
            return Err(SeqEvolveError::OracleUnavailable(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        write_result.map_err(|e| {
            SeqEvolveError::OracleUnavailable(format!("failed to write to '{}': {}", self.program, e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        self.parse_output(&stdout, batch.batch)
    }
}

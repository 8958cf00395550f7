//! Raw task ingestion
//!
//! Streams newline-delimited JSON records into [`RawTask`]s: lazy, single
//! pass, order-preserving. Blank lines are ignored. A record that fails to
//! decode yields a [`IngestError::MalformedTask`] for that line only; what
//! happens next is the driver's [`MalformedPolicy`].

use std::io::BufRead;

use thiserror::Error;

use crate::task::RawTask;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// A record was missing identifying fields or had ill-shaped geometry
    #[error("Malformed task record on line {line}: {source}")]
    MalformedTask {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do when the stream contains a malformed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Log a warning and drop the record, keep reading
    #[default]
    Skip,
    /// Stop the traversal at the first malformed record
    Abort,
}

/// Streaming reader over newline-delimited JSON task records
pub struct TaskReader<R> {
    reader: R,
    line_num: usize,
    buf: String,
}

impl<R: BufRead> TaskReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_num: 0, buf: String::new() }
    }
}

impl<R: BufRead> Iterator for TaskReader<R> {
    type Item = Result<RawTask, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_num += 1;
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(line).map_err(|source| {
                IngestError::MalformedTask { line: self.line_num, source }
            }));
        }
    }
}

/// Apply a malformed-record policy to an ingestion stream.
///
/// With [`MalformedPolicy::Skip`] malformed records are logged and dropped;
/// with [`MalformedPolicy::Abort`] the first error terminates the stream:
/// once the error has been yielded the upstream is never pulled again, so
/// aborting is safe on unbounded input. Well-formed records keep their
/// order in both modes.
pub fn apply_policy<T, I>(
    mut stream: I,
    policy: MalformedPolicy,
) -> impl Iterator<Item = Result<T, IngestError>>
where
    I: Iterator<Item = Result<T, IngestError>>,
{
    let mut aborted = false;
    std::iter::from_fn(move || {
        if aborted {
            return None;
        }
        loop {
            match stream.next()? {
                Ok(task) => return Some(Ok(task)),
                Err(e) => match policy {
                    MalformedPolicy::Skip => {
                        tracing::warn!("Skipping malformed record: {}", e);
                    }
                    MalformedPolicy::Abort => {
                        aborted = true;
                        return Some(Err(e));
                    }
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const GOOD: &str = r#"{"volume_id":"vol1","page_num":1,"context_area":{"x":0,"y":0,"width":10,"height":10},"line_area":{"x":1,"y":1,"width":5,"height":2}}"#;
    const ALSO_GOOD: &str = r#"{"volume_id":"vol1","page_num":2,"context_area":{"x":0,"y":0,"width":10,"height":10},"line_area":{"x":1,"y":1,"width":5,"height":2}}"#;
    const BAD: &str = r#"{"volume_id":"vol1","page_num":1}"#;

    fn read_all(input: &str) -> Vec<Result<RawTask, IngestError>> {
        TaskReader::new(Cursor::new(input.to_string())).collect()
    }

    #[test]
    fn test_reads_records_in_order() {
        let input = format!("{GOOD}\n{ALSO_GOOD}\n");
        let pages: Vec<i64> = read_all(&input)
            .into_iter()
            .map(|r| r.unwrap().page_num)
            .collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_skips_blank_lines() {
        let input = format!("\n{GOOD}\n\n   \n{ALSO_GOOD}\n");
        assert_eq!(read_all(&input).len(), 2);
    }

    #[test]
    fn test_malformed_record_reports_line_number() {
        let input = format!("{GOOD}\n{BAD}\n");
        let results = read_all(&input);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(IngestError::MalformedTask { line, .. }) => assert_eq!(*line, 2),
            other => panic!("expected MalformedTask, got {:?}", other.as_ref().map(|_| ())),
        }
    }

    #[test]
    fn test_skip_policy_drops_only_bad_records() {
        let input = format!("{GOOD}\n{BAD}\n{ALSO_GOOD}\n");
        let reader = TaskReader::new(Cursor::new(input));
        let pages: Vec<i64> = apply_policy(reader, MalformedPolicy::Skip)
            .map(|r| r.unwrap().page_num)
            .collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_abort_policy_stops_at_first_bad_record() {
        let input = format!("{GOOD}\n{BAD}\n{ALSO_GOOD}\n");
        let reader = TaskReader::new(Cursor::new(input));
        let results: Vec<_> = apply_policy(reader, MalformedPolicy::Abort).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_abort_policy_never_pulls_upstream_again() {
        use std::cell::Cell;

        // Unbounded upstream whose first record is malformed; after the
        // abort the adapter must terminate without consuming it further
        let pulled = Cell::new(0usize);
        let upstream = std::iter::repeat_with(|| -> Result<RawTask, IngestError> {
            pulled.set(pulled.get() + 1);
            let source = serde_json::from_str::<RawTask>("{}").unwrap_err();
            Err(IngestError::MalformedTask { line: pulled.get(), source })
        });

        let mut stream = apply_policy(upstream, MalformedPolicy::Abort);
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        assert_eq!(pulled.get(), 1);
    }
}

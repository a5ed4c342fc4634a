// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output plumbing: shared sinks, the label-prefix transform, and per-task
//! aggregation buffers.
//!
//! Writes are serialized per line by the prefixer or per task by the
//! aggregator; with neither, children inherit the terminal and byte-level
//! interleaving is allowed.

use std::io::Write;
use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Destination shared between tasks; `Arc<Mutex<Vec<u8>>>` coerces for
/// capture in tests and library callers.
pub type SharedSink = Arc<Mutex<dyn Write + Send>>;

/// Cosmetic label styling injected by the caller (per-task color).
pub type LabelDecorator = Arc<dyn Fn(usize, &str) -> String + Send + Sync>;

pub fn stdout_sink() -> SharedSink {
    Arc::new(Mutex::new(std::io::stdout()))
}

pub fn stderr_sink() -> SharedSink {
    Arc::new(Mutex::new(std::io::stderr()))
}

/// Run-wide output configuration computed by the driver.
#[derive(Clone)]
pub struct OutputSettings {
    pub stdout: SharedSink,
    pub stderr: SharedSink,
    /// Widest display name across the run; labels pad to it.
    pub label_width: usize,
    pub print_label: bool,
    pub aggregate: bool,
    pub decorate: Option<LabelDecorator>,
}

impl OutputSettings {
    /// `[name] ` padded to the run-wide width, with cosmetic styling applied
    /// after padding so escapes don't disturb alignment.
    pub fn prefix_for(&self, index: usize, name: &str) -> String {
        let label = format!("[{:<width$}]", name, width = self.label_width);
        let label = match &self.decorate {
            Some(decorate) => decorate(index, &label),
            None => label,
        };
        format!("{label} ")
    }
}

/// How one of a task's standard streams is wired.
#[derive(Clone)]
pub enum StreamTarget {
    /// Child inherits the terminal; engine-side writes go to `sink`.
    Inherit { sink: SharedSink },
    /// Piped through the line prefixer into a shared sink.
    Prefixed { prefix: String, sink: SharedSink },
    /// Buffered per task (optionally prefixed) and flushed on completion.
    Buffered {
        prefix: Option<String>,
        buffer: Arc<Mutex<Vec<u8>>>,
        sink: SharedSink,
    },
}

impl StreamTarget {
    pub fn stdio(&self) -> Stdio {
        match self {
            StreamTarget::Inherit { .. } => Stdio::inherit(),
            _ => Stdio::piped(),
        }
    }

    pub fn is_piped(&self) -> bool {
        !matches!(self, StreamTarget::Inherit { .. })
    }

    /// Engine-side line write (task headers).
    pub fn write_line(&self, line: &str) {
        match self {
            StreamTarget::Inherit { sink } | StreamTarget::Prefixed { sink, .. } => {
                let mut sink = sink.lock();
                let _ = writeln!(sink, "{line}");
                let _ = sink.flush();
            }
            StreamTarget::Buffered { buffer, .. } => {
                let mut buffer = buffer.lock();
                buffer.extend_from_slice(line.as_bytes());
                buffer.push(b'\n');
            }
        }
    }

    /// Flush an aggregation buffer to the real sink as one contiguous block.
    pub fn flush_aggregate(&self) {
        if let StreamTarget::Buffered { buffer, sink, .. } = self {
            let mut buffer = buffer.lock();
            if buffer.is_empty() {
                return;
            }
            let mut sink = sink.lock();
            let _ = sink.write_all(&buffer);
            let _ = sink.flush();
            buffer.clear();
        }
    }

    pub(crate) fn writer(&self) -> Option<StreamWriter> {
        match self {
            StreamTarget::Inherit { .. } => None,
            StreamTarget::Prefixed { prefix, sink } => Some(StreamWriter::Lines(
                LinePrefixer::new(prefix.clone(), sink.clone()),
            )),
            StreamTarget::Buffered {
                prefix: Some(prefix),
                buffer,
                ..
            } => Some(StreamWriter::Lines(LinePrefixer::new(
                prefix.clone(),
                buffer.clone(),
            ))),
            StreamTarget::Buffered {
                prefix: None,
                buffer,
                ..
            } => Some(StreamWriter::Raw(buffer.clone())),
        }
    }
}

/// Both standard streams of one task.
#[derive(Clone)]
pub struct TaskIo {
    pub out: StreamTarget,
    pub err: StreamTarget,
}

impl TaskIo {
    /// Wire a task's streams from the run-wide settings. `aggregate` is the
    /// group-effective value (aggregation applies to parallel groups only).
    pub fn build(settings: &OutputSettings, index: usize, name: &str, aggregate: bool) -> Self {
        let prefix = settings
            .print_label
            .then(|| settings.prefix_for(index, name));
        if aggregate {
            TaskIo {
                out: StreamTarget::Buffered {
                    prefix: prefix.clone(),
                    buffer: Arc::new(Mutex::new(Vec::new())),
                    sink: settings.stdout.clone(),
                },
                err: StreamTarget::Buffered {
                    prefix,
                    buffer: Arc::new(Mutex::new(Vec::new())),
                    sink: settings.stderr.clone(),
                },
            }
        } else if let Some(prefix) = prefix {
            TaskIo {
                out: StreamTarget::Prefixed {
                    prefix: prefix.clone(),
                    sink: settings.stdout.clone(),
                },
                err: StreamTarget::Prefixed {
                    prefix,
                    sink: settings.stderr.clone(),
                },
            }
        } else {
            TaskIo {
                out: StreamTarget::Inherit {
                    sink: settings.stdout.clone(),
                },
                err: StreamTarget::Inherit {
                    sink: settings.stderr.clone(),
                },
            }
        }
    }

    pub fn is_piped(&self) -> bool {
        self.out.is_piped()
    }

    /// Flush both aggregation buffers, stdout first.
    pub fn flush_aggregate(&self) {
        self.out.flush_aggregate();
        self.err.flush_aggregate();
    }
}

/// Line-buffered transform that prepends a label to every line.
///
/// Blank lines keep their prefix; a final partial line is flushed with its
/// prefix and no added newline.
pub struct LinePrefixer {
    prefix: String,
    sink: SharedSink,
    partial: Vec<u8>,
}

impl LinePrefixer {
    pub fn new(prefix: String, sink: SharedSink) -> Self {
        Self {
            prefix,
            sink,
            partial: Vec::new(),
        }
    }

    pub fn write(&mut self, chunk: &[u8]) {
        self.partial.extend_from_slice(chunk);
        let Some(last_newline) = self.partial.iter().rposition(|&b| b == b'\n') else {
            return;
        };
        let complete: Vec<u8> = self.partial.drain(..=last_newline).collect();
        let mut sink = self.sink.lock();
        for line in complete.split_inclusive(|&b| b == b'\n') {
            let _ = sink.write_all(self.prefix.as_bytes());
            let _ = sink.write_all(line);
        }
        let _ = sink.flush();
    }

    /// Flush a trailing partial line, if any.
    pub fn finish(&mut self) {
        if self.partial.is_empty() {
            return;
        }
        let mut sink = self.sink.lock();
        let _ = sink.write_all(self.prefix.as_bytes());
        let _ = sink.write_all(&self.partial);
        let _ = sink.flush();
        drop(sink);
        self.partial.clear();
    }
}

/// Per-stream writer used by the pump tasks.
pub(crate) enum StreamWriter {
    Lines(LinePrefixer),
    Raw(Arc<Mutex<Vec<u8>>>),
}

impl StreamWriter {
    fn write(&mut self, chunk: &[u8]) {
        match self {
            StreamWriter::Lines(prefixer) => prefixer.write(chunk),
            StreamWriter::Raw(buffer) => buffer.lock().extend_from_slice(chunk),
        }
    }

    fn finish(&mut self) {
        if let StreamWriter::Lines(prefixer) = self {
            prefixer.finish();
        }
    }
}

/// Copy a child stream into its writer until EOF.
pub(crate) async fn pump<R: AsyncRead + Unpin>(mut reader: R, mut writer: StreamWriter) {
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => writer.write(&buf[..n]),
        }
    }
    writer.finish();
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

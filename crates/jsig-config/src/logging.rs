use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, Once, PoisonError};

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter, MakeWriterExt};
use tracing_subscriber::prelude::*;

use crate::LoggingConfig;

static TRACING_INIT: Once = Once::new();

/// Installs a global `tracing` subscriber built from `config`.
///
/// Safe to call more than once; only the first call installs anything. Returns `false` when a
/// subscriber was already installed (by this function or by someone else).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let make_writer = log_writer(config);

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        installed = tracing::subscriber::set_global_default(subscriber).is_ok();
        if !installed {
            tracing::warn!(
                target: "jsig.config",
                "a global tracing subscriber is already installed; keeping it"
            );
        }
    });
    installed
}

/// Stderr and/or the append-mode log file; discards output when neither is enabled.
fn log_writer(config: &LoggingConfig) -> BoxMakeWriter {
    let stderr = config.stderr.then(|| {
        if cfg!(debug_assertions) {
            // Route through the test writer so `cargo test` captures output.
            BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
        } else {
            BoxMakeWriter::new(io::stderr)
        }
    });
    let file = config
        .file
        .as_ref()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok())
        .map(|file| SharedFile {
            file: Arc::new(Mutex::new(file)),
        });

    match (stderr, file) {
        (Some(stderr), Some(file)) => BoxMakeWriter::new(stderr.and(file)),
        (Some(stderr), None) => stderr,
        (None, Some(file)) => BoxMakeWriter::new(file),
        (None, None) => BoxMakeWriter::new(io::sink),
    }
}

/// Serializes writes from concurrent events into one file handle.
struct SharedFile {
    file: Arc<Mutex<File>>,
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = SharedFileGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            guard: self.file.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }
}

struct SharedFileGuard<'a> {
    guard: MutexGuard<'a, File>,
}

impl Write for SharedFileGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress and diagnostics reporting.

use {
    crate::error::{ProfileError, ProfileResult},
    log::Level,
    std::{
        fs::File,
        io::Write,
        path::{Path, PathBuf},
        sync::Mutex,
    },
};

/// Receives messages describing the progress of profile updates.
pub trait Reporter {
    /// Record a message at the given severity.
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message)
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message)
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message)
    }

    fn debug(&self, message: &str) {
        self.report(Level::Debug, message)
    }
}

/// A [Reporter] that forwards to the [log] crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// A [Reporter] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _level: Level, _message: &str) {}
}

/// A [Reporter] appending messages to a file.
///
/// Lines take the form `<timestamp> - <LEVEL> - <message>`. Messages more
/// verbose than [Level::Info] are not written.
pub struct FileReporter {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileReporter {
    /// Open a log file for appending, creating it if necessary.
    pub fn open(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ProfileError::LogFile(path.clone(), e))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for FileReporter {
    fn report(&self, level: Level, message: &str) {
        if level > Level::Info {
            return;
        }

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(
            file,
            "{} - {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            level,
            message
        ) {
            log::warn!("unable to write to {}: {}", self.path.display(), e);
        }
    }
}

/// A [Reporter] sending every message to several reporters.
#[derive(Default)]
pub struct MultiReporter {
    reporters: Vec<Box<dyn Reporter>>,
}

impl MultiReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reporter to receive messages.
    pub fn add(&mut self, reporter: impl Reporter + 'static) {
        self.reporters.push(Box::new(reporter));
    }
}

impl Reporter for MultiReporter {
    fn report(&self, level: Level, message: &str) {
        for reporter in &self.reporters {
            reporter.report(level, message);
        }
    }
}

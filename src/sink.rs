// src/sink.rs
//
// Opened log outputs and the writer that fans a record out to all of them

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::errors::{LoggerError, Result};
use crate::output::Destination;

/// An opened output
#[derive(Debug)]
pub enum Sink {
    Stdout,
    Stderr,
    File { path: PathBuf, file: Mutex<File> },
}

impl Sink {
    /// Open a destination. Files are opened for append and created if they
    /// do not exist; their parent directory must already exist.
    pub fn open(destination: &Destination) -> io::Result<Self> {
        match destination {
            Destination::Stdout => Ok(Sink::Stdout),
            Destination::Stderr => Ok(Sink::Stderr),
            Destination::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Sink::File {
                    path: path.clone(),
                    file: Mutex::new(file),
                })
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::File { path, .. } => Some(path),
            _ => None,
        }
    }

    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().lock().write_all(buf),
            Sink::Stderr => io::stderr().lock().write_all(buf),
            Sink::File { file, .. } => {
                let mut file = file
                    .lock()
                    .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
                file.write_all(buf)
            }
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File { file, .. } => file
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?
                .flush(),
        }
    }
}

/// Every sink a logger writes to. Cloning shares the opened files.
#[derive(Debug, Clone)]
pub struct SinkSet {
    sinks: Arc<[Sink]>,
}

impl SinkSet {
    /// Open every output in order. The first failure aborts and nothing
    /// opened so far is kept.
    pub fn open<S: AsRef<str>>(outputs: &[S]) -> Result<Self> {
        let sinks = outputs
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Sink::open(&Destination::parse(name))
                    .map_err(|e| LoggerError::sink_open_failed(name, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sinks: sinks.into() })
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }
}

/// Writer handed out per record by [`SinkSet`]
pub struct SinkWriter<'a> {
    sinks: &'a [Sink],
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // fmt layers hand over one whole formatted record per call. A failing
        // sink must not keep the record from the sinks after it.
        let mut first_err = None;
        for sink in self.sinks {
            if let Err(e) = sink.write_record(buf) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_err = None;
        for sink in self.sinks {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl<'a> MakeWriter<'a> for SinkSet {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { sinks: &self.sinks }
    }
}

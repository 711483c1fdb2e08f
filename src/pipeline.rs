//! Transform pipeline
//!
//! A conversion is a chain of [`TransformReader`]s around the caller's
//! source: decode (charset to UTF-8) then encode (UTF-8 to charset).
//! [`relay`] pulls the chain dry into the sink, either directly or through
//! a staging file.
//!
//! Without staging, a failure half-way leaves whatever was already copied
//! in the sink. With staging, the whole output is captured in a temporary
//! file first and the sink sees nothing unless every byte transformed. The
//! staging file is deleted when the call returns, whatever the outcome.

use std::env;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::transform::{Transform, TransformStatus};
use crate::{Result, TransformError};

/// Size of the input and output buffers of every stage
pub const STAGE_BUFFER_SIZE: usize = 8 * 1024;

/// File name prefix of staging files in the temp directory
pub const STAGING_PREFIX: &str = "ccv_tmp_";

/// Reader that yields the transformed bytes of an inner reader
///
/// Chaining stages is wrapping one `TransformReader` in another. Failures
/// are reported lazily: output produced before a failure is handed out
/// first, then every later read returns an [`io::ErrorKind::InvalidData`]
/// error wrapping the [`TransformError`].
pub struct TransformReader<R> {
    inner: R,
    transform: Box<dyn Transform>,
    input: Box<[u8]>,
    in_start: usize,
    in_end: usize,
    output: Box<[u8]>,
    out_start: usize,
    out_end: usize,
    eof: bool,
    starved: bool,
    finished: bool,
    failure: Option<TransformError>,
}

impl<R: Read> TransformReader<R> {
    /// Wraps `inner` so reads yield its bytes passed through `transform`.
    pub fn new(inner: R, transform: Box<dyn Transform>) -> Self {
        Self {
            inner,
            transform,
            input: vec![0; STAGE_BUFFER_SIZE].into_boxed_slice(),
            in_start: 0,
            in_end: 0,
            output: vec![0; STAGE_BUFFER_SIZE].into_boxed_slice(),
            out_start: 0,
            out_end: 0,
            eof: false,
            starved: false,
            finished: false,
            failure: None,
        }
    }

    /// Charset of the wrapped transform
    pub fn charset(&self) -> &'static str {
        self.transform.charset()
    }

    /// Unwraps the inner reader, dropping buffered data.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Moves unread input to the front and reads more after it.
    fn read_input(&mut self) -> io::Result<()> {
        if self.in_start > 0 {
            self.input.copy_within(self.in_start..self.in_end, 0);
            self.in_end -= self.in_start;
            self.in_start = 0;
        }
        loop {
            match self.inner.read(&mut self.input[self.in_end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.in_end += n;
                    return Ok(());
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Runs the transform until it produces output, fails or finishes.
    fn fill(&mut self) -> io::Result<()> {
        loop {
            if !self.eof && (self.in_start == self.in_end || self.starved) {
                self.read_input()?;
            }

            let last = self.eof;
            let (status, read, written) = self.transform.transform(
                &self.input[self.in_start..self.in_end],
                &mut self.output,
                last,
            );
            self.in_start += read;
            self.out_start = 0;
            self.out_end = written;
            self.starved = false;

            match status {
                TransformStatus::Failed(err) => {
                    self.failure = Some(err);
                    return Ok(());
                }
                TransformStatus::OutputFull => return Ok(()),
                TransformStatus::InputEmpty if last => {
                    self.finished = true;
                    return Ok(());
                }
                TransformStatus::InputEmpty => {
                    self.starved = true;
                    if written > 0 {
                        return Ok(());
                    }
                }
            }
        }
    }
}

impl<R: Read> Read for TransformReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_start < self.out_end {
                let n = buf.len().min(self.out_end - self.out_start);
                buf[..n].copy_from_slice(&self.output[self.out_start..self.out_start + n]);
                self.out_start += n;
                return Ok(n);
            }
            if let Some(err) = &self.failure {
                return Err(err.clone().into());
            }
            if self.finished {
                return Ok(0);
            }
            self.fill()?;
        }
    }
}

/// Copies `source` into `sink`, optionally through a staging file.
///
/// Returns the number of bytes delivered to `sink`. With `use_staging`,
/// `sink` is only written once `source` has been read to the end without
/// error.
pub fn relay<R, W>(mut source: R, sink: &mut W, use_staging: bool) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    if !use_staging {
        let copied = io::copy(&mut source, sink)?;
        sink.flush()?;
        trace!(bytes = copied, "copied to sink");
        return Ok(copied);
    }

    relay_staged(source, sink, &env::temp_dir())
}

/// Staged copy through a temporary file created in `dir`.
fn relay_staged<R, W>(mut source: R, sink: &mut W, dir: &Path) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    // Removed from disk when dropped, on every return path
    let mut stage = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(dir)?;
    debug!(path = %stage.path().display(), "created staging file");

    let staged = io::copy(&mut source, stage.as_file_mut())?;
    trace!(bytes = staged, "staged output");

    stage.as_file_mut().seek(SeekFrom::Start(0))?;
    let copied = io::copy(stage.as_file_mut(), sink)?;
    sink.flush()?;
    debug!(bytes = copied, "relayed staging file to sink");

    Ok(copied)
}

/// Applies one transform to `source` and relays the result into `sink`.
pub fn apply_transform<R, W>(
    source: R,
    transform: Box<dyn Transform>,
    sink: &mut W,
    use_staging: bool,
) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    relay(TransformReader::new(source, transform), sink, use_staging)
}

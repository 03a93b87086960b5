mod header;
mod parser;
mod reader;
mod types;

pub use parser::{DiffParser, Flow};
pub use types::{Diff, DiffFile, DiffLine, DiffSection, FileStatus, LineKind, ParseOptions, SUBMODULE_MODE};

use std::io::{self, BufRead, BufReader, Read};

use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument};

use reader::{read_line, read_line_async, LineBuffer};

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Malformed index line {line_number}: {line:?}")]
    MalformedIndex { line_number: usize, line: String },

    #[error("Failed to read diff input: {0}")]
    Io(#[from] io::Error),

    #[error("Diff parser exited without delivering a result")]
    Abandoned,
}

/// Parse unified diff text from a blocking reader.
///
/// Reads until end of input. Once the file limit is hit the remaining input
/// is still read and discarded, so a writer on the other end of a pipe is
/// never left blocked. Truncation is reported through the `is_incomplete`
/// flags, not as an error.
#[instrument(skip_all, fields(max_files = options.max_files, max_lines_per_file = options.max_lines_per_file, max_line_chars = options.max_line_chars))]
pub fn parse<R: BufRead>(mut reader: R, options: &ParseOptions) -> Result<Diff, DiffError> {
    let mut parser = DiffParser::new(*options);
    let mut line = LineBuffer::new(options.max_line_chars);

    while read_line(&mut reader, &mut line)? {
        let (text, overlong) = line.decode();
        if parser.feed(&text, overlong)? == Flow::Drain {
            let drained = io::copy(&mut reader, &mut io::sink())?;
            debug!(drained, "discarded input after file limit");
            break;
        }
    }

    Ok(finish(parser))
}

/// Parse diff text already held in memory.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Diff, DiffError> {
    parse(text.as_bytes(), options)
}

/// Async counterpart of [`parse`] for tokio readers such as a child's stdout.
#[instrument(skip_all, fields(max_files = options.max_files, max_lines_per_file = options.max_lines_per_file, max_line_chars = options.max_line_chars))]
pub async fn parse_async<R: AsyncBufRead + Unpin>(mut reader: R, options: &ParseOptions) -> Result<Diff, DiffError> {
    let mut parser = DiffParser::new(*options);
    let mut line = LineBuffer::new(options.max_line_chars);

    while read_line_async(&mut reader, &mut line).await? {
        let (text, overlong) = line.decode();
        if parser.feed(&text, overlong)? == Flow::Drain {
            let drained = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await?;
            debug!(drained, "discarded input after file limit");
            break;
        }
    }

    Ok(finish(parser))
}

fn finish(parser: DiffParser) -> Diff {
    let diff = parser.finish();
    info!(
        files = diff.num_files(),
        additions = diff.total_additions,
        deletions = diff.total_deletions,
        incomplete = diff.is_incomplete,
        "diff parsed"
    );
    diff
}

/// Parse `reader` to completion and deliver the single outcome into `tx`.
///
/// Blocks the calling thread; meant for a dedicated worker.
pub fn parse_into<R: Read>(reader: R, options: ParseOptions, tx: oneshot::Sender<Result<Diff, DiffError>>) {
    let outcome = parse(BufReader::new(reader), &options);
    if tx.send(outcome).is_err() {
        debug!("diff result receiver dropped before delivery");
    }
}

/// Run the parser on tokio's blocking pool, concurrently with whatever is
/// producing `reader`. Must be called from within a tokio runtime.
pub fn spawn_parse<R: Read + Send + 'static>(reader: R, options: ParseOptions) -> DiffHandle {
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || parse_into(reader, options, tx));
    DiffHandle { rx }
}

/// Receiving end of a spawned parse. Yields exactly one outcome.
#[derive(Debug)]
pub struct DiffHandle {
    rx: oneshot::Receiver<Result<Diff, DiffError>>,
}

impl DiffHandle {
    pub async fn wait(self) -> Result<Diff, DiffError> {
        self.rx.await.map_err(|_| DiffError::Abandoned)?
    }

    /// Blocking variant of [`DiffHandle::wait`]; must not be called from
    /// inside an async context.
    pub fn blocking_wait(self) -> Result<Diff, DiffError> {
        self.rx.blocking_recv().map_err(|_| DiffError::Abandoned)?
    }
}

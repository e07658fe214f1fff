//! ZIP packaging for export bundles.
//!
//! Every artifact is written under [`ARCHIVE_ROOT`] with Deflate compression.
//! Two modes share one writer:
//!
//! - [`archive_to_vec`] buffers the whole archive (CLI, tests)
//! - [`archive_stream`] emits bytes while entries are still being compressed
//!
//! In streaming mode a writer task feeds an in-memory pipe. If that task
//! fails, the stream ends with an error item instead of a clean EOF, so a
//! client never mistakes a truncated archive for a complete one.

use crate::bundler::ExportBundle;
use crate::bundler::error::{Context, Error, Result};
use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, DeflateOption, ZipEntryBuilder};
use bytes::Bytes;
use chrono::NaiveDate;
use futures_lite::{Stream, StreamExt, stream};
use std::{fmt, io, str::FromStr};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;

/// Folder every archive entry lives under.
pub const ARCHIVE_ROOT: &str = "logoforge-icons";

/// Capacity of the in-memory pipe between the writer task and the stream.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Deflate effort for archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Fastest deflate.
    Fast,
    /// zlib default effort (level 6).
    #[default]
    Balanced,
    /// Best compression (level 9).
    Maximum,
}

impl CompressionLevel {
    /// Name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::Fast => "fast",
            CompressionLevel::Balanced => "balanced",
            CompressionLevel::Maximum => "maximum",
        }
    }

    fn deflate_option(&self) -> DeflateOption {
        match self {
            CompressionLevel::Fast => DeflateOption::Fast,
            CompressionLevel::Balanced => DeflateOption::Normal,
            CompressionLevel::Maximum => DeflateOption::Maximum,
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(CompressionLevel::Fast),
            "balanced" => Ok(CompressionLevel::Balanced),
            "maximum" | "max" => Ok(CompressionLevel::Maximum),
            other => Err(format!(
                "unknown compression level '{other}', expected fast, balanced or maximum"
            )),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download name for an archive created on `date`, e.g. `logoforge-icons-20250301.zip`.
pub fn download_filename(date: NaiveDate) -> String {
    format!("{}-{}.zip", ARCHIVE_ROOT, date.format("%Y%m%d"))
}

/// Writes the bundle as a ZIP into `writer` and returns the writer.
pub async fn write_archive<W>(bundle: &ExportBundle, level: CompressionLevel, writer: W) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    let mut zip = ZipFileWriter::with_tokio(writer);

    for artifact in bundle.iter() {
        let name = format!("{}/{}", ARCHIVE_ROOT, artifact.path);
        let entry = ZipEntryBuilder::new(name.into(), Compression::Deflate)
            .deflate_option(level.deflate_option());
        zip.write_entry_whole(entry, &artifact.bytes)
            .await
            .map_err(Error::from)
            .with_context(|| format!("writing {} to archive", artifact.path))?;
    }

    let writer = zip.close().await?.into_inner();
    log::debug!("Wrote {} archive entries ({} compression)", bundle.len(), level);
    Ok(writer)
}

/// Builds the whole archive in memory.
pub async fn archive_to_vec(bundle: &ExportBundle, level: CompressionLevel) -> Result<Vec<u8>> {
    write_archive(bundle, level, Vec::new()).await
}

/// Streams the archive while it is being written.
///
/// Must be called inside a tokio runtime. The writer task owns the bundle
/// and is dropped once the last byte is consumed.
pub fn archive_stream(
    bundle: ExportBundle,
    level: CompressionLevel,
) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
    let (pipe_writer, pipe_reader) = tokio::io::duplex(PIPE_CAPACITY);

    let task = tokio::spawn(async move {
        let mut pipe_writer = write_archive(&bundle, level, pipe_writer).await?;
        pipe_writer.shutdown().await?;
        Ok::<(), Error>(())
    });

    let outcome = stream::unfold(Some(task), |task| async move {
        let failure = match task?.await {
            Ok(Ok(())) => return None,
            Ok(Err(e)) => {
                log::error!("Archive writer failed: {}", e);
                io::Error::other(e.to_string())
            }
            Err(e) => {
                log::error!("Archive writer task aborted: {}", e);
                io::Error::other(format!("archive writer task aborted: {e}"))
            }
        };
        Some((Err(failure), None))
    });

    ReaderStream::new(pipe_reader).chain(outcome)
}

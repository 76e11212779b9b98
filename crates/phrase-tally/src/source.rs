//! Chunked text sources.
//!
//! A [`Source`] is opened into a [`ChunkReader`], which hands out decoded text
//! one read at a time. Reads are raw byte reads, so a multi-byte character can
//! be cut in two; [`Utf8Decoder`] carries the incomplete bytes forward.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no file found: {label} does not exist")]
    NotFound { label: String },
    #[error("failed to read {label}: {source}")]
    Io {
        label: String,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    fn from_io(label: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                label: label.to_string(),
            },
            _ => SourceError::Io {
                label: label.to_string(),
                source: err,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SourceError::NotFound { label } | SourceError::Io { label, .. } => label,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

/// Where text comes from.
pub enum Source {
    Path(PathBuf),
    Stdin,
    Reader {
        label: String,
        reader: Box<dyn AsyncRead + Send + Unpin>,
    },
}

impl Source {
    pub fn reader(label: impl Into<String>, reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Source::Reader {
            label: label.into(),
            reader: Box::new(reader),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Stdin => "stdin".to_string(),
            Source::Reader { label, .. } => label.clone(),
        }
    }

    /// Acquire the underlying handle. A missing file surfaces here as
    /// [`SourceError::NotFound`].
    pub async fn open(self, chunk_size: usize) -> Result<ChunkReader, SourceError> {
        let label = self.label();
        let inner: Box<dyn AsyncRead + Send + Unpin> = match self {
            Source::Path(path) => {
                let file = tokio::fs::File::open(&path)
                    .await
                    .map_err(|err| SourceError::from_io(&label, err))?;
                Box::new(file)
            }
            Source::Stdin => Box::new(tokio::io::stdin()),
            Source::Reader { reader, .. } => reader,
        };
        Ok(ChunkReader::new(label, inner, chunk_size))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Stdin => f.write_str("Stdin"),
            Source::Reader { label, .. } => f.debug_struct("Reader").field("label", label).finish(),
        }
    }
}

/// Reads an opened source one chunk at a time.
pub struct ChunkReader {
    label: String,
    inner: Box<dyn AsyncRead + Send + Unpin>,
    buf: Vec<u8>,
    decoder: Utf8Decoder,
    done: bool,
}

impl fmt::Debug for ChunkReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkReader")
            .field("label", &self.label)
            .field("chunk_size", &self.buf.len())
            .field("pending_bytes", &self.decoder.pending_bytes())
            .field("done", &self.done)
            .finish()
    }
}

impl ChunkReader {
    fn new(label: String, inner: Box<dyn AsyncRead + Send + Unpin>, chunk_size: usize) -> Self {
        Self {
            label,
            inner,
            buf: vec![0; chunk_size.max(1)],
            decoder: Utf8Decoder::default(),
            done: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Next decoded chunk, or `None` at end of data. A chunk may be empty when
    /// a read ended inside a multi-byte character.
    pub async fn next_chunk(&mut self) -> Result<Option<String>, SourceError> {
        if self.done {
            return Ok(None);
        }
        let read = self
            .inner
            .read(&mut self.buf)
            .await
            .map_err(|err| SourceError::from_io(&self.label, err))?;
        if read == 0 {
            self.done = true;
            let tail = self.decoder.finish();
            return Ok((!tail.is_empty()).then_some(tail));
        }
        Ok(Some(self.decoder.decode(&self.buf[..read])))
    }
}

/// Streaming UTF-8 decoder.
///
/// Incomplete sequences at the end of a read are kept for the next one;
/// invalid sequences become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let joined;
        let mut rest: &[u8] = if self.carry.is_empty() {
            bytes
        } else {
            let mut carry = std::mem::take(&mut self.carry);
            carry.extend_from_slice(bytes);
            joined = carry;
            &joined
        };

        let mut out = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end of data. Leftover bytes were a truncated character.
    pub fn finish(&mut self) -> String {
        if self.carry.is_empty() {
            String::new()
        } else {
            self.carry.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    pub fn pending_bytes(&self) -> usize {
        self.carry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_split_characters() {
        let text = "café’s";
        let mut decoder = Utf8Decoder::default();
        let mut out = String::new();
        for byte in text.as_bytes() {
            out.push_str(&decoder.decode(std::slice::from_ref(byte)));
        }
        assert_eq!(out, text);
        assert_eq!(decoder.pending_bytes(), 0);
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn partial_character_yields_empty_chunk() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&[0xE2, 0x80]), "");
        assert_eq!(decoder.pending_bytes(), 2);
        assert_eq!(decoder.decode(&[0x99, b's']), "’s");
    }

    #[test]
    fn replaces_invalid_and_truncated_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(b"ab\xFFcd"), "ab\u{FFFD}cd");
        assert_eq!(decoder.decode(&[b'x', 0xC3]), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.pending_bytes(), 0);
    }

    #[tokio::test]
    async fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = Source::Path(path.clone()).open(16).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.label(), path.display().to_string());
    }

    #[tokio::test]
    async fn reads_in_bounded_chunks() {
        let mut reader = Source::reader("mem", &b"abcdefg"[..]).open(3).await.unwrap();
        assert_eq!(reader.label(), "mem");
        let mut chunks = Vec::new();
        while let Some(chunk) = reader.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        assert_eq!(chunks, vec!["abc", "def", "g"]);
        assert_eq!(reader.next_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn reader_debug_shows_progress() {
        let mut reader = Source::reader("mem", &b"ab"[..]).open(4).await.unwrap();
        assert_eq!(
            format!("{reader:?}"),
            r#"ChunkReader { label: "mem", chunk_size: 4, pending_bytes: 0, done: false }"#
        );
        while reader.next_chunk().await.unwrap().is_some() {}
        assert!(format!("{reader:?}").ends_with("done: true }"));
    }
}

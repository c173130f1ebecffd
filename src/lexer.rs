mod source_buffer;

use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use thiserror::Error;

pub use source_buffer::*;

/// Byte offset into a source file
type Offset = usize;

/// A pair of source file offsets that capture a range within a source file
type ByteSpan = (Offset, Offset);

/// Longest token `compile` accepts, in bytes. Running past it is a hard
/// failure, never a truncation.
pub const MAX_TOKEN_LEN: usize = 64;

/// One maximal run of non-whitespace bytes, bounded by whitespace or the
/// buffer edges.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'input> {
    /// Raw bytes of the token, borrowed from the source buffer
    pub text: &'input [u8],
    /// Byte range from the source text that this token was found at
    pub source_span: ByteSpan,
}

impl<'input> Token<'input> {
    pub fn new(text: &'input [u8], span: Range<Offset>) -> Self {
        Self {
            text,
            source_span: (span.start, span.end),
        }
    }

    /// Token text for diagnostics; non-UTF-8 bytes are rendered lossily.
    pub fn display(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.text)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A non-whitespace run kept going past the configured limit.
    #[error("token starting at offset {at} is longer than {max} bytes")]
    TokenTooLong { at: Offset, max: usize },
}

/// Anything that can abort the scan of one source file.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Exactly the four byte values that delimit tokens.
const fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Splits a source buffer into whitespace-delimited tokens.
///
/// The cursor only ever moves forward. Once the input is exhausted the
/// stream keeps yielding `None`; once a token overruns the length limit the
/// stream yields the error and goes terminal, and the scan must be thrown
/// away (the cursor is left wherever the failed extraction stopped).
#[derive(Debug)]
pub struct Tokenizer<'input> {
    source: &'input [u8],
    /// Start of unscanned input
    cursor: Offset,
    max_token_len: usize,
    failed: bool,
}

impl<'input> Tokenizer<'input> {
    pub fn new(source: &'input [u8], max_token_len: usize) -> Self {
        Self {
            source,
            cursor: 0,
            max_token_len,
            failed: false,
        }
    }

    /// Length of the non-separator run starting at `from`.
    ///
    /// Space, tab and newline cover nearly every separator in practice and
    /// fit one `memchr3` pass; carriage return takes a second search.
    fn run_len(&self, from: Offset) -> usize {
        let rest = &self.source[from..];
        let common = memchr::memchr3(b' ', b'\t', b'\n', rest);
        let cr = memchr::memchr(b'\r', rest);
        common.into_iter().chain(cr).min().unwrap_or(rest.len())
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Result<Token<'input>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // Separator runs between tokens are short; a plain byte loop beats a
        // vectorized search here.
        while self.cursor < self.source.len() && is_separator(self.source[self.cursor]) {
            self.cursor += 1;
        }
        if self.cursor == self.source.len() {
            return None;
        }

        let start = self.cursor;
        let len = self.run_len(start);
        if len > self.max_token_len {
            self.failed = true;
            return Some(Err(ScanError::TokenTooLong {
                at: start,
                max: self.max_token_len,
            }));
        }
        self.cursor = start + len;

        let token = Token::new(&self.source[start..self.cursor], start..self.cursor);
        // The terminating separator belongs to this extraction; consume it
        // now so the next call starts on fresh input.
        if self.cursor < self.source.len() {
            self.cursor += 1;
        }
        Some(Ok(token))
    }
}

/// Scan one source file from start to finish.
///
/// Acquires the buffer, walks the token stream and hands every token to the
/// diagnostic sink. The first error aborts the scan; the buffer is released
/// on every path out of here.
pub fn compile(path: &Path) -> Result<(), CompileError> {
    let buffer = SourceBuffer::open(path)?;
    log::info!(
        "loaded '{}' into memory, {} bytes",
        path.display(),
        buffer.len()
    );

    if buffer.is_empty() {
        log::info!("end of input, 0 tokens");
        return Ok(());
    }

    let mut count = 0usize;
    for token in Tokenizer::new(buffer.as_bytes(), MAX_TOKEN_LEN) {
        let token = token?;
        let (start, end) = token.source_span;
        // Nothing sits behind the scanner yet, so the sink is the consumer.
        log::warn!("token '{}' at {start}..{end}", token.display());
        count += 1;
    }
    log::info!("end of input, {count} tokens");
    Ok(())
}

//! Incremental decoder for `Transfer-Encoding: chunked` bodies.

use crate::error::Error;
use alloc::vec::Vec;

/// Longest chunk-size or trailer line accepted.
const MAX_LINE_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Size,
    Data(u64),
    /// Inside the CRLF that closes a chunk; `true` once the CR was seen.
    DataEnd(bool),
    Trailer,
}

/// Decodes chunked framing across arbitrarily split input.
#[derive(Debug, Clone)]
pub(crate) struct ChunkedDecoder {
    state: State,
    line: Vec<u8>,
}

impl ChunkedDecoder {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Size,
            line: Vec::new(),
        }
    }

    /// Feeds `input`, passing payload bytes to `on_data`.
    ///
    /// Returns the bytes consumed and whether the terminating chunk and
    /// trailer section were seen. Input after the end of the body is not
    /// consumed.
    pub(crate) fn decode(
        &mut self,
        input: &[u8],
        mut on_data: impl FnMut(&[u8]),
    ) -> Result<(usize, bool), Error> {
        let mut pos = 0;
        while pos < input.len() {
            match self.state {
                State::Size => {
                    let Some(n) = self.read_line(&input[pos..])? else {
                        return Ok((input.len(), false));
                    };
                    pos += n;
                    let size = match httparse::parse_chunk_size(&self.line) {
                        Ok(httparse::Status::Complete((_, size))) => size,
                        _ => return Err(Error::InvalidChunkSize),
                    };
                    self.line.clear();
                    self.state = if size == 0 {
                        State::Trailer
                    } else {
                        State::Data(size)
                    };
                }
                State::Data(remaining) => {
                    let n = remaining.min((input.len() - pos) as u64) as usize;
                    on_data(&input[pos..pos + n]);
                    pos += n;
                    let remaining = remaining - n as u64;
                    self.state = if remaining == 0 {
                        State::DataEnd(false)
                    } else {
                        State::Data(remaining)
                    };
                }
                State::DataEnd(seen_cr) => {
                    self.state = match input[pos] {
                        b'\r' if !seen_cr => State::DataEnd(true),
                        b'\n' => State::Size,
                        _ => return Err(Error::InvalidChunkSize),
                    };
                    pos += 1;
                }
                State::Trailer => {
                    let Some(n) = self.read_line(&input[pos..])? else {
                        return Ok((input.len(), false));
                    };
                    pos += n;
                    // Trailer fields are dropped; an empty line ends the body.
                    let done = matches!(self.line.as_slice(), b"\r\n" | b"\n");
                    self.line.clear();
                    if done {
                        self.state = State::Size;
                        return Ok((pos, true));
                    }
                }
            }
        }
        Ok((pos, false))
    }

    /// Buffers bytes up to and including the next `\n`. Returns how many
    /// bytes of `input` were taken once the line is complete.
    fn read_line(&mut self, input: &[u8]) -> Result<Option<usize>, Error> {
        let end = input.iter().position(|&b| b == b'\n');
        let take = end.map_or(input.len(), |i| i + 1);
        if self.line.len() + take > MAX_LINE_LEN {
            return Err(Error::InvalidChunkSize);
        }
        self.line.extend_from_slice(&input[..take]);
        Ok(end.map(|_| take))
    }
}

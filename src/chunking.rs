use std::io::{ErrorKind, Read};

use crate::constants::record::RECORD_SEPARATOR;
use crate::errors::PipelineError;
use crate::types::Chunk;

/// Reads an input source in fixed-size blocks and realigns each block so
/// every emitted chunk ends exactly on a record boundary.
///
/// Bytes after the last separator of a block are carried forward as leftover
/// and prepended to the next block, so no record is ever split across chunks
/// and concatenating every emitted chunk reproduces the input byte-for-byte.
/// A non-empty leftover at end of input (a file without a trailing
/// separator) is flushed as a final chunk.
pub struct BlockChunker<R> {
    reader: R,
    block_size: usize,
    leftover: Vec<u8>,
    exhausted: bool,
}

impl<R: Read> BlockChunker<R> {
    /// Create a chunker that reads `block_size`-byte blocks from `reader`.
    pub fn new(reader: R, block_size: usize) -> Self {
        Self {
            reader,
            block_size,
            leftover: Vec::new(),
            exhausted: false,
        }
    }

    /// Fill `block` from the reader, retrying short reads until the block is
    /// full or the source is exhausted. Interrupted reads are transparent.
    fn fill_block(&mut self, block: &mut [u8]) -> Result<usize, PipelineError> {
        let mut filled = 0;
        while filled < block.len() {
            match self.reader.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(PipelineError::Read(err)),
            }
        }
        Ok(filled)
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk>, PipelineError> {
        if self.exhausted {
            return Ok(None);
        }
        loop {
            let mut block = vec![0u8; self.block_size];
            let filled = self.fill_block(&mut block)?;
            if filled == 0 {
                self.exhausted = true;
                if self.leftover.is_empty() {
                    return Ok(None);
                }
                // Input without a trailing separator: the partial record
                // becomes the final chunk.
                return Ok(Some(std::mem::take(&mut self.leftover)));
            }
            block.truncate(filled);
            match block.iter().rposition(|&byte| byte == RECORD_SEPARATOR) {
                Some(last_separator) => {
                    let mut chunk = std::mem::take(&mut self.leftover);
                    chunk.extend_from_slice(&block[..=last_separator]);
                    self.leftover.extend_from_slice(&block[last_separator + 1..]);
                    return Ok(Some(chunk));
                }
                None => {
                    // Record longer than a block: grow the leftover until a
                    // separator shows up in a later block.
                    self.leftover.extend_from_slice(&block);
                }
            }
        }
    }
}

impl<R: Read> Iterator for BlockChunker<R> {
    type Item = Result<Chunk, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

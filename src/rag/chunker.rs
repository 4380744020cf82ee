use crate::types::{AppError, Result};

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Requires `chunk_overlap < chunk_size`; a non-positive stride would
    /// never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(AppError::InvalidConfiguration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut chunks = Vec::new();
        let step = self.chunk_size - self.chunk_overlap;

        for i in (0..words.len()).step_by(step) {
            let end = (i + self.chunk_size).min(words.len());
            let chunk = words[i..end].join(" ");
            if !chunk.is_empty() {
                chunks.push(chunk);
            }
        }

        chunks
    }
}

use crate::prelude::StageError;

/// Bounded pool of scratch profile buffers.
pub struct BufferPool {
    buffers: Vec<Vec<f64>>,
    max_capacity: usize,
    outstanding: usize,
}

impl BufferPool {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_capacity),
            max_capacity,
            outstanding: 0,
        }
    }

    /// Hands out a zeroed buffer, reusing a released one when available.
    pub fn checkout(&mut self, length: usize) -> Result<Vec<f64>, StageError> {
        let buffer = if let Some(mut buffer) = self.buffers.pop() {
            buffer.resize(length, 0.0);
            buffer
        } else if self.outstanding < self.max_capacity {
            vec![0.0; length]
        } else {
            return Err(StageError::BufferExhaustion(format!(
                "all {} buffers checked out",
                self.max_capacity
            )));
        };
        self.outstanding += 1;
        Ok(buffer)
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<f64>) {
        buffer.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.buffers.len() < self.max_capacity {
            self.buffers.push(buffer);
        }
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
        self.outstanding = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_fails_once_capacity_is_out() {
        let mut pool = BufferPool::with_capacity(1);
        let buffer = pool.checkout(8).unwrap();
        assert!(matches!(
            pool.checkout(8),
            Err(StageError::BufferExhaustion(_))
        ));
        pool.release(buffer);
        let reused = pool.checkout(4).unwrap();
        assert_eq!(reused, vec![0.0; 4]);
    }
}

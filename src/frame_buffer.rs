use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::{FrameRecord, IngestStats};

/// Bounded FIFO of frame records shared between the ingestion threads
/// (writers) and the query commands (readers). Both sides hold the lock only
/// long enough to push or copy; nothing is serialized under it.
#[derive(Debug)]
pub(crate) struct FrameBuffer {
    inner: Mutex<BufferInner>,
    accepted: AtomicU64,
    rejected: AtomicU64,
    capacity: usize,
}

#[derive(Debug, Default)]
struct BufferInner {
    records: VecDeque<FrameRecord>,
    last: Option<FrameRecord>,
}

impl FrameBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(BufferInner::default()),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a record, evicting the oldest one past capacity. Records that
    /// break `frame_index` strict monotonicity or would make `started_at`
    /// decrease are dropped and counted, never escalated: one bad sample must
    /// not halt the pipeline.
    pub(crate) fn append(&self, record: FrameRecord) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        let monotonic = match inner.last {
            Some(last) => {
                record.frame_index > last.frame_index && record.started_at >= last.started_at
            }
            None => true,
        };
        if !monotonic {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        if inner.records.len() == self.capacity {
            inner.records.pop_front();
        }
        inner.records.push_back(record);
        inner.last = Some(record);
        // Counted under the lock so stats never trail a visible snapshot.
        self.accepted.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Copies out the `size` most recent records in ascending `started_at`
    /// order. Fewer records than requested, or none at all, is a valid
    /// answer, not an error.
    pub(crate) fn tail(&self, size: usize) -> Vec<FrameRecord> {
        if size == 0 {
            return Vec::new();
        }
        let Ok(inner) = self.inner.lock() else {
            return Vec::new();
        };
        let skip = inner.records.len().saturating_sub(size);
        inner.records.iter().skip(skip).copied().collect()
    }

    /// Counts an anomaly that never produced a record, such as an
    /// unparseable wire line.
    pub(crate) fn count_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stats(&self) -> IngestStats {
        IngestStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Tauri-managed wrapper; ingestion threads hold their own clone of the Arc.
#[derive(Debug)]
pub(crate) struct FrameBufferState {
    buffer: Arc<FrameBuffer>,
}

impl FrameBufferState {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(FrameBuffer::new(capacity)),
        }
    }

    pub(crate) fn buffer(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.buffer)
    }
}

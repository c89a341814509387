use crate::sequencer::{NextIdRequest, Segment, Sequencer};
use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Sequencer over a process-local map. Ids start at 1 per key.
#[derive(Default)]
pub struct MemorySequencer {
    inner: Mutex<HashMap<String, i64>>,
}

impl MemorySequencer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Sequencer for MemorySequencer {
    async fn next_id(&self, req: NextIdRequest) -> Result<i64> {
        let mut map = self.inner.lock().unwrap();

        let next = map.entry(req.key).or_insert(1);
        let id = *next;
        *next += 1;
        Ok(id)
    }

    async fn segment(&self, req: NextIdRequest, size: i64) -> Result<Option<Segment>> {
        let mut map = self.inner.lock().unwrap();

        let next = map.entry(req.key).or_insert(1);
        let segment = Segment {
            from: *next,
            to: *next + size,
        };
        *next += size;
        Ok(Some(segment))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_segments_do_not_overlap_issued_ids() {
        let store = MemorySequencer::new();
        let req = |key: &str| NextIdRequest {
            key: key.to_string(),
            ..Default::default()
        };

        assert_eq!(store.next_id(req("k")).await.unwrap(), 1);
        assert_eq!(store.next_id(req("k")).await.unwrap(), 2);

        let segment = store.segment(req("k"), 100).await.unwrap().unwrap();
        assert_eq!(segment, Segment { from: 3, to: 103 });

        assert_eq!(store.next_id(req("k")).await.unwrap(), 103);

        // Keys are independent.
        assert_eq!(store.next_id(req("other")).await.unwrap(), 1);
    }
}

//! Concurrent batch execution
//!
//! Dispatches the requests of one batch over a bounded rayon worker pool.
//! Uses synchronous HTTP underneath, so concurrency comes from worker
//! threads rather than an async runtime, keeping the library
//! executor-agnostic.

use anyhow::{Context, Result};
use log::warn;
use rayon::prelude::*;

use super::{Outcome, RequestDescriptor};
use crate::service::MessageApi;

/// Worker count used by [`BatchExecutor::new`]
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Executes the requests of a batch concurrently.
///
/// The pool bounds how many requests are in flight at once; requests
/// beyond the bound queue in submission order. Output order always equals
/// input order regardless of completion order, and `execute` returns only
/// once every request has reached a terminal outcome.
pub struct BatchExecutor {
    pool: rayon::ThreadPool,
}

impl BatchExecutor {
    /// Create an executor with [`DEFAULT_CONCURRENCY`] workers
    pub fn new() -> Result<Self> {
        Self::with_concurrency(DEFAULT_CONCURRENCY)
    }

    /// Create an executor with a caller-chosen worker count (minimum 1)
    pub fn with_concurrency(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .context("Failed to build batch worker pool")?;
        Ok(Self { pool })
    }

    /// Run every request to completion and return one outcome per request,
    /// in request order.
    ///
    /// A failed request becomes a `Failure` outcome for that entry alone;
    /// it never cancels or aborts the rest of the batch.
    pub fn execute(&self, api: &dyn MessageApi, requests: &[RequestDescriptor]) -> Vec<Outcome> {
        self.pool.install(|| {
            requests
                .par_iter()
                .map(|request| {
                    match api.update_message(&request.message_id, &request.fields) {
                        Ok(body) => Outcome::Success(body),
                        Err(err) => {
                            warn!(
                                "update of message {} failed, continuing batch: {err:#}",
                                request.message_id.as_str()
                            );
                            Outcome::Failure(err)
                        }
                    }
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::build_requests;
    use crate::models::{Category, Message, MessageId};
    use anyhow::bail;
    use serde_json::{Map, Value, json};
    use std::time::Duration;

    /// Completes requests in reverse submission order: earlier ids sleep
    /// longer, so completion order is adversarial to input order.
    struct ReversedLatencyApi {
        total: usize,
    }

    impl MessageApi for ReversedLatencyApi {
        fn list_labels(&self) -> Result<Vec<Category>> {
            unimplemented!("not used by executor tests")
        }

        fn list_folders(&self) -> Result<Vec<Category>> {
            unimplemented!("not used by executor tests")
        }

        fn get_message(&self, _id: &MessageId) -> Result<Message> {
            unimplemented!("not used by executor tests")
        }

        fn update_message(&self, id: &MessageId, _fields: &Map<String, Value>) -> Result<Value> {
            let index: usize = id.as_str().trim_start_matches('m').parse().unwrap();
            let delay = (self.total - index) as u64 * 30;
            std::thread::sleep(Duration::from_millis(delay));
            Ok(json!({"id": id.as_str()}))
        }
    }

    struct FailSecondApi;

    impl MessageApi for FailSecondApi {
        fn list_labels(&self) -> Result<Vec<Category>> {
            unimplemented!("not used by executor tests")
        }

        fn list_folders(&self) -> Result<Vec<Category>> {
            unimplemented!("not used by executor tests")
        }

        fn get_message(&self, _id: &MessageId) -> Result<Message> {
            unimplemented!("not used by executor tests")
        }

        fn update_message(&self, id: &MessageId, _fields: &Map<String, Value>) -> Result<Value> {
            if id.as_str() == "m2" {
                bail!("connection reset");
            }
            Ok(json!({"id": id.as_str()}))
        }
    }

    fn requests_for(ids: &[&str]) -> Vec<crate::batch::RequestDescriptor> {
        let ids: Vec<MessageId> = ids.iter().map(|id| MessageId::new(*id)).collect();
        let mut fields = Map::new();
        fields.insert("unread".to_string(), json!(false));
        build_requests(&ids, &fields).unwrap()
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let executor = BatchExecutor::with_concurrency(4).unwrap();
        let requests = requests_for(&["m0", "m1", "m2", "m3"]);

        let outcomes = executor.execute(&ReversedLatencyApi { total: 4 }, &requests);

        assert_eq!(outcomes.len(), 4);
        for (index, outcome) in outcomes.iter().enumerate() {
            let body = outcome.as_success().unwrap();
            assert_eq!(body["id"], json!(format!("m{index}")));
        }
    }

    #[test]
    fn test_failure_is_scoped_to_one_request() {
        let executor = BatchExecutor::with_concurrency(3).unwrap();
        let requests = requests_for(&["m1", "m2", "m3"]);

        let outcomes = executor.execute(&FailSecondApi, &requests);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert!(outcomes[2].is_success());
    }

    #[test]
    fn test_single_worker_still_completes_batch() {
        let executor = BatchExecutor::with_concurrency(0).unwrap();
        let requests = requests_for(&["m1", "m3"]);

        let outcomes = executor.execute(&FailSecondApi, &requests);
        assert!(outcomes.iter().all(Outcome::is_success));
    }
}

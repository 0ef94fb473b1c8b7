//! Sequential batch processing.
//!
//! Drives the record loop: dispatch, classify, format, delay. Ordering is
//! part of the contract since the record index is embedded in every outcome
//! line.

use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::config::{HTTP_SUCCESS_MAX, HTTP_SUCCESS_MIN};
use crate::dispatch::Dispatcher;
use crate::error_handling::DispatchError;
use crate::request::RequestDescriptor;

/// Classification of one processed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Status inside the success range.
    Success,
    /// Any other status.
    Error,
}

/// One classified, formatted record outcome.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Success or error bucket.
    pub kind: OutcomeKind,
    /// Formatted line, `{index}-{status} - {body}`.
    pub message: String,
}

/// The two ordered outcome lists of a finished batch.
#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Lines for records whose status fell in the success range.
    pub successes: Vec<String>,
    /// Lines for records with any other status.
    pub failures: Vec<String>,
}

/// A dispatch failure that stopped the batch, together with everything
/// accumulated before it.
#[derive(Error, Debug)]
#[error("error processing record {index}: {source}")]
pub struct BatchAbort {
    /// 0-based position of the record whose dispatch failed.
    pub index: usize,
    /// Outcomes accumulated before the failure.
    pub partial: BatchOutput,
    /// The dispatch failure itself.
    #[source]
    pub source: DispatchError,
}

/// Classifies a status code into the success or error bucket.
pub fn classify_status(status: u16) -> OutcomeKind {
    if (HTTP_SUCCESS_MIN..HTTP_SUCCESS_MAX).contains(&status) {
        OutcomeKind::Success
    } else {
        OutcomeKind::Error
    }
}

/// Formats one outcome line: record index, status, then the body as text.
pub fn format_outcome(index: usize, status: u16, body: &[u8]) -> String {
    format!("{}-{} - {}", index, status, String::from_utf8_lossy(body))
}

/// Sequentially dispatches a batch of request descriptors.
pub struct BatchProcessor {
    dispatcher: Box<dyn Dispatcher>,
    delay: Duration,
}

impl BatchProcessor {
    /// Creates a processor over the given dispatcher and inter-request
    /// delay.
    pub fn new(dispatcher: Box<dyn Dispatcher>, delay: Duration) -> Self {
        BatchProcessor { dispatcher, delay }
    }

    /// Processes every descriptor in order.
    ///
    /// Each record is dispatched, classified, and appended to the matching
    /// output list, followed by the configured delay. The first dispatch
    /// failure aborts the remaining batch; the outcomes accumulated up to
    /// that point travel with the error.
    pub async fn process_all(
        &self,
        requests: &[RequestDescriptor],
    ) -> Result<BatchOutput, BatchAbort> {
        let mut output = BatchOutput::default();

        for (index, request) in requests.iter().enumerate() {
            debug!("processing record {}", index);

            let outcome = match self.process_record(request, index).await {
                Ok(outcome) => outcome,
                Err(source) => {
                    return Err(BatchAbort {
                        index,
                        partial: output,
                        source,
                    })
                }
            };

            match outcome.kind {
                OutcomeKind::Success => output.successes.push(outcome.message),
                OutcomeKind::Error => output.failures.push(outcome.message),
            }

            tokio::time::sleep(self.delay).await;
        }

        Ok(output)
    }

    /// Dispatches one descriptor and classifies its response.
    async fn process_record(
        &self,
        request: &RequestDescriptor,
        index: usize,
    ) -> Result<Outcome, DispatchError> {
        let response = self.dispatcher.call(request).await?;
        Ok(Outcome {
            kind: classify_status(response.status),
            message: format_outcome(index, response.status, &response.body),
        })
    }
}

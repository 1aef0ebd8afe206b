// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::errors::StreamError;
use crate::observability::messages::{stream::EmitFailed, StructuredLog};

/// Handle to an emission running on a worker thread.
///
/// Awaiting it yields the outcome of the chain's processing. Dropping it does not
/// cancel the work; once scheduled, an emission always runs to completion.
pub struct EmitHandle {
    stream: String,
    operator: String,
    task: JoinHandle<anyhow::Result<()>>,
}

impl EmitHandle {
    pub(crate) fn new(stream: String, operator: String, task: JoinHandle<anyhow::Result<()>>) -> Self {
        Self {
            stream,
            operator,
            task,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Future for EmitHandle {
    type Output = Result<(), StreamError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let outcome = match Pin::new(&mut self.task).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(outcome) => outcome,
        };

        Poll::Ready(match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => {
                EmitFailed {
                    stream: &self.stream,
                    operator: &self.operator,
                    error: &source,
                }
                .log();
                Err(StreamError::Operator {
                    operator: self.operator.clone(),
                    source,
                })
            }
            Err(join_error) => Err(StreamError::Worker(join_error.to_string())),
        })
    }
}

impl std::fmt::Debug for EmitHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitHandle")
            .field("stream", &self.stream)
            .field("operator", &self.operator)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

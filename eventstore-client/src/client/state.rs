//! Per-in-flight-request state.
//!
//! Every event the connection actor routes here is processed synchronously;
//! the state never suspends. A state that reached `Closed` emits nothing
//! further; the actor removes it from the routing table in the same step.

use bytes::Bytes;
use http::header::HeaderMap;
use tokio::time::Instant;
use tracing::trace;

use crate::client::descriptor::{
    AggregateFailure, AggregateReply, Disposition, PushFault, PushFn,
};
use crate::client::SubscriptionHandle;
use crate::codec::{FrameDecoder, HEADER_SIZE};
use crate::status::{infer_grpc_status, Code, Status};

/// Instruction back to the actor after an event was processed.
#[must_use]
pub(crate) enum After {
    Continue,
    /// Remove the state and its stream driver; optionally reset the
    /// HTTP/2 stream with the given code.
    Close { reset: Option<h2::Reason> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    HalfClosedLocal,
    HalfClosedRemote,
    Closed,
}

enum Delivery {
    Aggregate {
        reply: Option<tokio::sync::oneshot::Sender<AggregateReply>>,
        received: Vec<Bytes>,
    },
    Stream {
        tx: tokio::sync::mpsc::UnboundedSender<Result<Bytes, Status>>,
    },
    Push {
        deliver: PushFn,
        confirm: Option<tokio::sync::oneshot::Sender<Result<SubscriptionHandle, Status>>>,
        handle: SubscriptionHandle,
    },
}

pub(crate) struct RequestState {
    key: u32,
    decoder: FrameDecoder,
    delivery: Delivery,
    phase: Phase,
    http_status: http::StatusCode,
    flow: Option<h2::FlowControl>,
    /// Cleared once a push subscription is confirmed: a live subscription
    /// has no deadline.
    deadline: Option<Instant>,
}

impl RequestState {
    pub(crate) fn new(
        key: u32,
        connection_id: u64,
        disposition: Disposition,
        deadline: Instant,
        max_frame_length: usize,
    ) -> RequestState {
        let delivery = match disposition {
            Disposition::Aggregate { reply } => Delivery::Aggregate {
                reply: Some(reply),
                received: Vec::new(),
            },
            Disposition::Stream { tx } => Delivery::Stream { tx },
            Disposition::Push { deliver, confirm } => Delivery::Push {
                deliver,
                confirm: Some(confirm),
                handle: SubscriptionHandle {
                    key,
                    connection: connection_id,
                },
            },
        };

        RequestState {
            key,
            decoder: FrameDecoder::new(max_frame_length),
            delivery,
            phase: Phase::Open,
            http_status: http::StatusCode::OK,
            flow: None,
            deadline: Some(deadline),
        }
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn on_headers(
        &mut self,
        parts: &http::response::Parts,
        flow: Option<h2::FlowControl>,
    ) -> After {
        self.http_status = parts.status;
        self.flow = flow;

        if !grpc_content_type(&parts.headers) {
            // A non-gRPC response from an intermediary still maps its HTTP
            // status; a 200 without gRPC framing is simply unknown.
            let status = if parts.status != http::StatusCode::OK {
                infer_grpc_status(None, parts.status)
            } else {
                Status::new(
                    Code::Unknown,
                    format!(
                        "unexpected response content-type {:?}",
                        parts.headers.get(http::header::CONTENT_TYPE)
                    ),
                )
            };
            return self.finish(status, Some(h2::Reason::CANCEL));
        }

        // A trailers-only response carries the grpc status in the header
        // block itself.
        if let Some(status) = Status::from_header_map(&parts.headers) {
            return self.finish(status, None);
        }

        if parts.status == http::StatusCode::OK {
            if let Delivery::Push { confirm, handle, .. } = &mut self.delivery {
                if let Some(confirm) = confirm.take() {
                    let _ = confirm.send(Ok(*handle));
                    self.deadline = None;
                }
            }
        }

        After::Continue
    }

    pub(crate) fn on_data(&mut self, data: Bytes, end_of_stream: bool) -> After {
        if self.phase == Phase::Closed {
            return After::Continue;
        }

        self.decoder.extend(&data);
        loop {
            match self.decoder.next_frame() {
                Ok(Some(payload)) => {
                    if let After::Close { reset } = self.deliver(payload) {
                        return After::Close { reset };
                    }
                }
                Ok(None) => break,
                Err(status) => {
                    return self.finish(status, Some(h2::Reason::CANCEL));
                }
            }
        }

        if end_of_stream {
            self.half_close_remote();
            // Stream ended without a trailers frame.
            let status = infer_grpc_status(None, self.http_status);
            return self.finish(status, None);
        }

        After::Continue
    }

    pub(crate) fn on_trailers(&mut self, trailers: Option<&HeaderMap>) -> After {
        self.half_close_remote();
        let status = infer_grpc_status(trailers, self.http_status);
        self.finish(status, None)
    }

    /// Engine-level fault on this stream: reset by the peer, h2 error, or
    /// a failed request submission.
    pub(crate) fn on_error(&mut self, status: Status) -> After {
        self.finish(status, None)
    }

    pub(crate) fn on_write_done(&mut self) {
        self.phase = match self.phase {
            Phase::Open => Phase::HalfClosedLocal,
            Phase::HalfClosedRemote => Phase::HalfClosedRemote,
            other => other,
        };
        trace!(key = self.key, "request body fully written");
    }

    /// The pull-side consumer took `bytes` off its queue; return that much
    /// credit to the peer.
    pub(crate) fn on_credit(&mut self, bytes: usize) {
        self.release(bytes);
    }

    pub(crate) fn on_deadline(&mut self) -> After {
        self.finish(
            Status::deadline_exceeded("request deadline elapsed"),
            Some(h2::Reason::CANCEL),
        )
    }

    /// Caller-initiated cancellation. Idempotent at the actor level: a
    /// state that is gone from the routing table simply never sees this.
    pub(crate) fn on_cancel(&mut self) -> After {
        self.finish(
            Status::cancelled("request cancelled"),
            Some(h2::Reason::CANCEL),
        )
    }

    /// Connection-level teardown: socket error, GOAWAY, keepalive loss.
    pub(crate) fn on_connection_lost(&mut self, cause: &str) {
        let _ = self.finish(
            Status::transport(format!("connection terminated: {}", cause)),
            None,
        );
    }

    fn deliver(&mut self, payload: Bytes) -> After {
        let frame_len = HEADER_SIZE + payload.len();
        match &mut self.delivery {
            Delivery::Aggregate { received, .. } => {
                received.push(payload);
                self.release(frame_len);
                After::Continue
            }
            Delivery::Stream { tx } => {
                // Credit for this frame is withheld until the consumer
                // pulls it; a full peer window is the backpressure bound.
                if tx.send(Ok(payload)).is_err() {
                    trace!(key = self.key, "stream consumer dropped, cancelling");
                    return self.finish(
                        Status::cancelled("response consumer dropped"),
                        Some(h2::Reason::CANCEL),
                    );
                }
                After::Continue
            }
            Delivery::Push { deliver, .. } => match deliver(payload) {
                Ok(()) => {
                    self.release(frame_len);
                    After::Continue
                }
                Err(PushFault::SubscriberGone) => {
                    trace!(key = self.key, "push subscriber gone, cancelling");
                    self.finish(
                        Status::cancelled("subscriber endpoint is gone"),
                        Some(h2::Reason::CANCEL),
                    )
                }
                Err(PushFault::Decode(status)) => self.finish(status, Some(h2::Reason::CANCEL)),
            },
        }
    }

    /// Drive the state to its terminal status and notify the completion
    /// handle. Undelivered frames are preserved for aggregate replies,
    /// already queued for stream consumers, and discarded for push.
    fn finish(&mut self, status: Status, reset: Option<h2::Reason>) -> After {
        if self.phase == Phase::Closed {
            return After::Close { reset: None };
        }
        trace!(key = self.key, code = ?status.code(), "request reached terminal status");
        self.phase = Phase::Closed;

        match &mut self.delivery {
            Delivery::Aggregate { reply, received } => {
                if let Some(reply) = reply.take() {
                    let messages = std::mem::take(received);
                    let result = if status.is_ok() {
                        Ok(messages)
                    } else {
                        Err(AggregateFailure {
                            status,
                            partial: messages,
                        })
                    };
                    let _ = reply.send(result);
                }
            }
            Delivery::Stream { tx } => {
                if !status.is_ok() {
                    let _ = tx.send(Err(status));
                }
                // Dropping the sender with the state ends the consumer's
                // pulls cleanly.
            }
            Delivery::Push { confirm, .. } => {
                if let Some(confirm) = confirm.take() {
                    let failure = if status.is_ok() {
                        Status::new(Code::Unknown, "stream ended before subscription confirmation")
                    } else {
                        status
                    };
                    let _ = confirm.send(Err(failure));
                }
                // Confirmed subscribers get no synthetic end message.
            }
        }

        After::Close { reset }
    }

    fn half_close_remote(&mut self) {
        self.phase = match self.phase {
            Phase::Open => Phase::HalfClosedRemote,
            Phase::HalfClosedLocal => Phase::HalfClosedLocal,
            other => other,
        };
    }

    fn release(&mut self, bytes: usize) {
        if bytes == 0 {
            return;
        }
        if let Some(flow) = &mut self.flow {
            // Failure here means the stream is already reset; the
            // teardown path reclaims the window.
            let _ = flow.release_capacity(bytes);
        }
    }
}

fn grpc_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct == "application/grpc" || ct.starts_with("application/grpc+"))
        .unwrap_or(false)
}

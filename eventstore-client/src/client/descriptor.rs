//! The immutable value describing one RPC invocation.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_core::Stream;
use http::header::{HeaderMap, HeaderValue};
use http::uri::PathAndQuery;
use tokio::sync::{mpsc, oneshot};

use crate::client::SubscriptionHandle;
use crate::status::Status;

pub(crate) type BoxMessageStream = Pin<Box<dyn Stream<Item = Bytes> + Send + 'static>>;

/// The request body producer: a single pre-encoded frame for unary and
/// server-streaming calls, or a lazy sequence of pre-encoded frames for
/// client-streaming calls. Consumed exactly once by the connection actor.
pub(crate) enum RequestBody {
    Single(Bytes),
    Streaming(BoxMessageStream),
}

/// How decoded response frames reach the caller.
///
/// `Aggregate` collects every frame and replies once at terminal status.
/// `Stream` hands frames to a pull-based consumer as they decode.
/// `Push` invokes a delivery callback inline for each frame and confirms
/// the subscription once the server acknowledges the stream open.
pub(crate) enum Disposition {
    Aggregate {
        reply: oneshot::Sender<AggregateReply>,
    },
    Stream {
        tx: mpsc::UnboundedSender<Result<Bytes, Status>>,
    },
    Push {
        deliver: PushFn,
        confirm: oneshot::Sender<Result<SubscriptionHandle, Status>>,
    },
}

/// Inline delivery callback for `Push`. Must not block: the connection
/// actor invokes it from frame dispatch.
pub(crate) type PushFn = Box<dyn FnMut(Bytes) -> Result<(), PushFault> + Send + 'static>;

/// Why a push delivery failed.
pub(crate) enum PushFault {
    /// The subscriber endpoint no longer exists.
    SubscriberGone,
    /// The frame could not be decoded for delivery.
    Decode(Status),
}

pub(crate) type AggregateReply = Result<Vec<Bytes>, AggregateFailure>;

/// Terminal failure for an aggregate request, preserving the frames that
/// decoded before the fault.
#[derive(Debug)]
pub(crate) struct AggregateFailure {
    pub status: Status,
    pub partial: Vec<Bytes>,
}

pub(crate) struct RequestDescriptor {
    pub path: PathAndQuery,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub disposition: Disposition,
    pub deadline: Duration,
}

/// The `grpc-timeout` header value for a request deadline, rounded up to
/// whole seconds.
pub(crate) fn grpc_timeout(deadline: Duration) -> HeaderValue {
    let secs = deadline.as_secs() + u64::from(deadline.subsec_nanos() > 0);
    HeaderValue::from_str(&format!("{}S", secs.max(1)))
        .unwrap_or_else(|_| HeaderValue::from_static("1S"))
}

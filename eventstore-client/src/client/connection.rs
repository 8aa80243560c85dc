//! The connection actor: one task owning one HTTP/2 engine.
//!
//! All routing-table mutation and all engine calls happen on this task.
//! Commands, per-stream network events and deadline timers are processed
//! strictly serially; nothing here suspends inside frame dispatch, so push
//! delivery callbacks must never block back into the same client.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use h2::client::{ResponseFuture, SendRequest};
use h2::{FlowControl, Reason, RecvStream, SendStream};
use http::header::HeaderMap;
use http::{Method, Request, Uri, Version};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};
use tokio_stream::{StreamExt, StreamMap};
use tracing::{debug, trace, warn};

use crate::client::descriptor::{RequestBody, RequestDescriptor};
use crate::client::state::{After, RequestState};
use crate::client::ClientSettings;
use crate::status::Status;

/// Commands accepted by the actor. Submission order from a single caller
/// is preserved; cross-caller order is unspecified.
pub(crate) enum Command {
    Submit { key: u32, desc: RequestDescriptor },
    /// Idempotent: cancelling an unknown key still acknowledges.
    Cancel { key: u32, done: oneshot::Sender<()> },
    /// A pull-side consumer took `bytes` off its queue; return that much
    /// flow-control credit to the peer.
    Credit { key: u32, bytes: usize },
    /// Raised by the connection-driving or keepalive task.
    ConnectionLost { cause: String },
}

pub(crate) struct ConnectionActor {
    commands: mpsc::UnboundedReceiver<Command>,
    send_request: SendRequest<Bytes>,
    settings: Arc<ClientSettings>,
    connection_id: u64,
    /// Routing table: every in-flight request is reachable from exactly
    /// one entry; removal is atomic with releasing its driver.
    states: HashMap<u32, RequestState>,
    drivers: StreamMap<u32, StreamDriver>,
    orphan_events: u64,
}

impl ConnectionActor {
    pub(crate) fn new(
        send_request: SendRequest<Bytes>,
        settings: Arc<ClientSettings>,
        connection_id: u64,
        commands: mpsc::UnboundedReceiver<Command>,
    ) -> ConnectionActor {
        ConnectionActor {
            commands,
            send_request,
            settings,
            connection_id,
            states: HashMap::new(),
            drivers: StreamMap::new(),
            orphan_events: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            let deadline = self.states.values().filter_map(|s| s.deadline()).min();
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(Command::ConnectionLost { cause }) => {
                        self.teardown(&cause);
                        return;
                    }
                    Some(cmd) => self.on_command(cmd),
                    None => {
                        self.teardown("all client handles dropped");
                        return;
                    }
                },
                Some((key, event)) = self.drivers.next(), if !self.drivers.is_empty() => {
                    self.on_event(key, event);
                }
                _ = sleep_until(deadline), if deadline.is_some() => self.on_deadline(),
            }
        }
    }

    fn on_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit { key, desc } => self.submit(key, desc),
            Command::Cancel { key, done } => {
                if let Some(mut state) = self.states.remove(&key) {
                    if let After::Close { reset } = state.on_cancel() {
                        self.drop_driver(key, reset);
                    }
                } else {
                    trace!(key, "cancel for unknown request");
                }
                let _ = done.send(());
            }
            Command::Credit { key, bytes } => {
                if let Some(state) = self.states.get_mut(&key) {
                    state.on_credit(bytes);
                }
            }
            Command::ConnectionLost { .. } => unreachable!("handled by the run loop"),
        }
    }

    fn submit(&mut self, key: u32, desc: RequestDescriptor) {
        let RequestDescriptor {
            path,
            headers,
            body,
            disposition,
            deadline,
        } = desc;

        let uri = Uri::builder()
            .scheme(self.settings.scheme.clone())
            .authority(self.settings.authority.clone())
            .path_and_query(path)
            .build()
            .expect("scheme, authority and rpc path form a valid uri");

        let mut request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .version(Version::HTTP_2)
            .body(())
            .expect("rpc request is a valid http request");
        *request.headers_mut() = headers;

        let state = RequestState::new(
            key,
            self.connection_id,
            disposition,
            Instant::now() + deadline,
            self.settings.max_frame_length,
        );
        let driver = StreamDriver::new(self.send_request.clone(), request, body);

        self.states.insert(key, state);
        self.drivers.insert(key, driver);
        trace!(key, "request admitted");
    }

    fn on_event(&mut self, key: u32, event: DriverEvent) {
        let Some(state) = self.states.get_mut(&key) else {
            // Expected when cancellation races with server output.
            self.orphan_events += 1;
            trace!(
                key,
                orphaned = self.orphan_events,
                "event for unknown request discarded"
            );
            return;
        };

        let after = match event {
            DriverEvent::Headers(parts, flow) => state.on_headers(&parts, Some(flow)),
            DriverEvent::Data {
                bytes,
                end_of_stream,
            } => state.on_data(bytes, end_of_stream),
            DriverEvent::Trailers(map) => state.on_trailers(map.as_ref()),
            DriverEvent::WriteDone => {
                state.on_write_done();
                After::Continue
            }
            DriverEvent::Failed(status) => state.on_error(status),
        };

        if let After::Close { reset } = after {
            self.states.remove(&key);
            self.drop_driver(key, reset);
        }
    }

    fn on_deadline(&mut self) {
        let now = Instant::now();
        let expired: Vec<u32> = self
            .states
            .iter()
            .filter(|(_, state)| state.deadline().is_some_and(|at| at <= now))
            .map(|(key, _)| *key)
            .collect();

        for key in expired {
            debug!(key, "request deadline expired");
            if let Some(mut state) = self.states.remove(&key) {
                if let After::Close { reset } = state.on_deadline() {
                    self.drop_driver(key, reset);
                }
            }
        }
    }

    fn drop_driver(&mut self, key: u32, reset: Option<Reason>) {
        if let Some(mut driver) = self.drivers.remove(&key) {
            if let Some(reason) = reset {
                driver.send_reset(reason);
            }
        }
    }

    fn teardown(&mut self, cause: &str) {
        if !self.states.is_empty() {
            warn!(cause, in_flight = self.states.len(), "connection terminated");
        }
        for (_, mut state) in self.states.drain() {
            state.on_connection_lost(cause);
        }
        self.drivers = StreamMap::new();
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Network-side events for one request, in arrival order.
pub(crate) enum DriverEvent {
    Headers(http::response::Parts, FlowControl),
    Data { bytes: Bytes, end_of_stream: bool },
    Trailers(Option<HeaderMap>),
    /// The request body (and its terminator) has been fully written.
    WriteDone,
    /// Engine-level fault on this stream; terminal.
    Failed(Status),
}

/// Drives one HTTP/2 stream: admission, body flush under flow-control
/// credit, then response headers, data and trailers. Yields `None` once
/// the stream has nothing further to report.
pub(crate) struct StreamDriver {
    submit: Option<(SendRequest<Bytes>, Request<()>)>,
    send: Option<SendStream<Bytes>>,
    body: Option<RequestBody>,
    chunk: Option<Bytes>,
    write_done: bool,
    response: Option<ResponseFuture>,
    recv: RecvPhase,
    finished: bool,
}

enum RecvPhase {
    Idle,
    Body(RecvStream),
    Trailers(RecvStream),
}

impl StreamDriver {
    pub(crate) fn new(
        send_request: SendRequest<Bytes>,
        request: Request<()>,
        body: RequestBody,
    ) -> StreamDriver {
        StreamDriver {
            submit: Some((send_request, request)),
            send: None,
            body: Some(body),
            chunk: None,
            write_done: false,
            response: None,
            recv: RecvPhase::Idle,
            finished: false,
        }
    }

    pub(crate) fn send_reset(&mut self, reason: Reason) {
        if let Some(send) = self.send.as_mut() {
            send.send_reset(reason);
        }
    }

    fn fail(&mut self, status: Status) -> Poll<Option<DriverEvent>> {
        self.finished = true;
        Poll::Ready(Some(DriverEvent::Failed(status)))
    }

    /// Flush as much of the request body as current send capacity allows.
    /// Returns an event to surface, or `None` when the write side is done
    /// or stalled on capacity.
    fn drive_write(&mut self, cx: &mut Context<'_>) -> Option<DriverEvent> {
        if self.write_done || self.send.is_none() {
            return None;
        }

        loop {
            let needs_refill = self.chunk.as_ref().map_or(true, |c| c.is_empty());
            if needs_refill {
                self.chunk = None;
                match self.body.as_mut() {
                    None => {
                        // The producer is exhausted: write the terminator
                        // frame and half-close our side.
                        let send = self.send.as_mut().expect("send stream present");
                        if let Err(err) = send.send_data(Bytes::new(), true) {
                            return Some(DriverEvent::Failed(err.into()));
                        }
                        self.write_done = true;
                        return Some(DriverEvent::WriteDone);
                    }
                    Some(RequestBody::Single(bytes)) => {
                        let bytes = std::mem::take(bytes);
                        self.body = None;
                        self.chunk = Some(bytes);
                    }
                    Some(RequestBody::Streaming(stream)) => match stream.as_mut().poll_next(cx) {
                        Poll::Pending => return None,
                        Poll::Ready(Some(bytes)) => self.chunk = Some(bytes),
                        Poll::Ready(None) => self.body = None,
                    },
                }
                continue;
            }

            let send = self.send.as_mut().expect("send stream present");
            let chunk = self.chunk.as_mut().expect("chunk present");

            send.reserve_capacity(chunk.len());
            let available = send.capacity();
            if available == 0 {
                match send.poll_capacity(cx) {
                    Poll::Pending => return None,
                    Poll::Ready(Some(Ok(_))) => continue,
                    Poll::Ready(Some(Err(err))) => return Some(DriverEvent::Failed(err.into())),
                    Poll::Ready(None) => {
                        return Some(DriverEvent::Failed(Status::transport(
                            "send side closed while flushing request body",
                        )))
                    }
                }
            }

            let piece = chunk.split_to(available.min(chunk.len()));
            let last_piece = chunk.is_empty();
            // A single-frame body carries end-of-stream on its final piece;
            // a streaming body is terminated by an empty frame above.
            let end_of_stream = last_piece && self.body.is_none();
            if let Err(err) = send.send_data(piece, end_of_stream) {
                return Some(DriverEvent::Failed(err.into()));
            }
            if last_piece {
                self.chunk = None;
            }
            if end_of_stream {
                self.write_done = true;
                return Some(DriverEvent::WriteDone);
            }
        }
    }
}

impl Stream for StreamDriver {
    type Item = DriverEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.finished {
            return Poll::Ready(None);
        }

        if let Some((mut send_request, request)) = this.submit.take() {
            match send_request.poll_ready(cx) {
                Poll::Pending => {
                    this.submit = Some((send_request, request));
                    return Poll::Pending;
                }
                Poll::Ready(Err(err)) => return this.fail(err.into()),
                Poll::Ready(Ok(())) => match send_request.send_request(request, false) {
                    Ok((response, send)) => {
                        this.response = Some(response);
                        this.send = Some(send);
                    }
                    Err(err) => return this.fail(err.into()),
                },
            }
        }

        if let Some(event) = this.drive_write(cx) {
            if matches!(event, DriverEvent::Failed(_)) {
                this.finished = true;
            }
            return Poll::Ready(Some(event));
        }

        loop {
            match &mut this.recv {
                RecvPhase::Idle => {
                    let response = this
                        .response
                        .as_mut()
                        .expect("response future present after submission");
                    let response = ready!(Pin::new(response).poll(cx));
                    match response {
                        Ok(resp) => {
                            let (parts, mut body) = resp.into_parts();
                            let flow = body.flow_control().clone();
                            this.recv = RecvPhase::Body(body);
                            return Poll::Ready(Some(DriverEvent::Headers(parts, flow)));
                        }
                        Err(err) => return this.fail(err.into()),
                    }
                }
                RecvPhase::Body(recv) => match ready!(recv.poll_data(cx)) {
                    Some(Ok(bytes)) => {
                        let end_of_stream = recv.is_end_stream();
                        if end_of_stream {
                            this.finished = true;
                        }
                        return Poll::Ready(Some(DriverEvent::Data {
                            bytes,
                            end_of_stream,
                        }));
                    }
                    Some(Err(err)) => return this.fail(err.into()),
                    None => {
                        let RecvPhase::Body(recv) =
                            std::mem::replace(&mut this.recv, RecvPhase::Idle)
                        else {
                            unreachable!()
                        };
                        this.recv = RecvPhase::Trailers(recv);
                    }
                },
                RecvPhase::Trailers(recv) => {
                    let trailers = ready!(recv.poll_trailers(cx));
                    this.finished = true;
                    return match trailers {
                        Ok(map) => Poll::Ready(Some(DriverEvent::Trailers(map))),
                        Err(err) => this.fail(err.into()),
                    };
                }
            }
        }
    }
}

//! Public operations on EventStore streams: chunked reads, the lazy
//! stream iterator, appends, deletes and push subscriptions.

use std::collections::VecDeque;
use std::time::Duration;

use async_stream::try_stream;
use bytes::Bytes;
use futures_core::Stream;
use futures_util::stream;
use prost::Message;
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use tracing::debug;

use crate::client::descriptor::{Disposition, PushFault, PushFn, RequestBody};
use crate::client::{Client, ResponseStream, SubscriptionHandle};
use crate::error::ClientError;
use crate::event::{EventData, Position, ResolvedEvent};
use crate::options::{
    AppendOptions, CurrentRevision, Cursor, DeleteOptions, Direction, ExpectedRevision,
    ReadOptions, ReadTarget, SubscribeOptions,
};
use crate::proto::streams::{
    append_req, append_resp, delete_req, delete_resp, paths, read_req, read_resp, tombstone_req,
    tombstone_resp, AppendReq, AppendResp, DeleteReq, DeleteResp, ReadReq, ReadResp, TombstoneReq,
    TombstoneResp,
};
use crate::codec::encode_message;
use crate::proto::shared;
use crate::status::Status;

/// How long to wait for the actor to acknowledge a cancellation issued on
/// behalf of a timed-out request.
const CANCEL_ACK_GRACE: Duration = Duration::from_secs(5);

/// Outcome of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// The stream revision after the append; `None` when the append wrote
    /// nothing to a stream that does not exist.
    pub current_revision: Option<u64>,
    pub position: Option<Position>,
}

/// Notification delivered to a subscription sink. The envelope type is
/// what distinguishes subscription traffic from anything else the
/// subscriber receives.
#[derive(Debug)]
pub enum SubscriptionEvent {
    Event(ResolvedEvent),
    /// Raw read response, delivered when subscribing with `raw`.
    Raw(ReadResp),
    /// Server checkpoint, delivered when subscribing with `raw`.
    Checkpoint { commit: u64, prepare: u64 },
}

impl Client {
    /// Read one bounded chunk of events. Reading a missing stream yields
    /// an empty sequence, never an error.
    pub async fn read_chunk(
        &self,
        target: impl Into<ReadTarget>,
        options: &ReadOptions,
    ) -> Result<Vec<ResolvedEvent>, ClientError> {
        let target = target.into();
        self.read_chunk_at(&target, options, options.from).await
    }

    /// Like [`read_chunk`](Client::read_chunk), but hands back the raw
    /// read responses without converting them to domain events.
    pub async fn read_chunk_raw(
        &self,
        target: impl Into<ReadTarget>,
        options: &ReadOptions,
    ) -> Result<Vec<ReadResp>, ClientError> {
        let target = target.into();
        self.read_rpc(&target, options, options.from).await
    }

    /// A lazy, finite iterator over a stream, issuing one read RPC per
    /// chunk of `max_count` events. No request is made until the first
    /// pull.
    pub fn stream(&self, target: impl Into<ReadTarget>, options: ReadOptions) -> ReadStream {
        let cursor = options.from;
        ReadStream {
            client: self.clone(),
            target: target.into(),
            options,
            cursor,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Append events to `stream_name`, evaluating `options.expect`
    /// atomically with the write.
    pub async fn append(
        &self,
        stream_name: &str,
        events: impl IntoIterator<Item = EventData>,
        options: &AppendOptions,
    ) -> Result<WriteResult, ClientError> {
        let resp = self.append_rpc(stream_name, events, options).await?;
        match resp.result {
            Some(append_resp::Result::Success(success)) => Ok(write_result(success)),
            Some(append_resp::Result::WrongExpectedVersion(wrong)) => {
                Err(expectation_violation(options.expect, wrong))
            }
            None => Err(ClientError::Grpc(Status::internal(
                "append response carried no result",
            ))),
        }
    }

    /// Like [`append`](Client::append), but returns the full append
    /// response instead of reshaping it.
    pub async fn append_raw(
        &self,
        stream_name: &str,
        events: impl IntoIterator<Item = EventData>,
        options: &AppendOptions,
    ) -> Result<AppendResp, ClientError> {
        self.append_rpc(stream_name, events, options).await
    }

    /// Soft-delete a stream, or tombstone it permanently when
    /// `options.tombstone` is set.
    pub async fn delete(
        &self,
        stream_name: &str,
        options: &DeleteOptions,
    ) -> Result<(), ClientError> {
        if options.tombstone {
            let req = TombstoneReq {
                options: Some(tombstone_req::Options {
                    stream_identifier: Some(shared::StreamIdentifier::from_name(stream_name)),
                    expected_stream_revision: Some(tombstone_expectation(options.expect)),
                }),
            };
            let frame = encode_message(&req).map_err(ClientError::from)?;
            let messages = self
                .call_aggregate(paths::TOMBSTONE, RequestBody::Single(frame), options.timeout)
                .await?;
            let resp = decode_single::<TombstoneResp>(messages)?;
            if let Some(tombstone_resp::PositionOption::Position(position)) = resp.position_option
            {
                debug!(
                    stream = stream_name,
                    commit = position.commit_position,
                    "stream tombstoned"
                );
            }
        } else {
            let req = DeleteReq {
                options: Some(delete_req::Options {
                    stream_identifier: Some(shared::StreamIdentifier::from_name(stream_name)),
                    expected_stream_revision: Some(delete_expectation(options.expect)),
                }),
            };
            let frame = encode_message(&req).map_err(ClientError::from)?;
            let messages = self
                .call_aggregate(paths::DELETE, RequestBody::Single(frame), options.timeout)
                .await?;
            let resp = decode_single::<DeleteResp>(messages)?;
            if let Some(delete_resp::PositionOption::Position(position)) = resp.position_option {
                debug!(
                    stream = stream_name,
                    commit = position.commit_position,
                    "stream deleted"
                );
            }
        }
        Ok(())
    }

    /// Subscribe to a stream (or `$all`), pushing each event into `sink`
    /// as it arrives. Resolves once the server acknowledges the stream
    /// open. Delivery stops silently when the sink is dropped, when the
    /// subscription is cancelled, or when the connection dies; the handle
    /// simply goes dead.
    ///
    /// The sink is serviced inline by the connection actor: never block
    /// on this client from the task draining the sink's receiver.
    pub async fn subscribe(
        &self,
        sink: mpsc::UnboundedSender<SubscriptionEvent>,
        target: impl Into<ReadTarget>,
        options: &SubscribeOptions,
    ) -> Result<SubscriptionHandle, ClientError> {
        let target = target.into();
        let req = subscribe_request(&target, options)?;
        let frame = encode_message(&req).map_err(ClientError::from)?;

        let raw = options.raw;
        let deliver: PushFn = Box::new(move |payload: Bytes| {
            if sink.is_closed() {
                return Err(PushFault::SubscriberGone);
            }
            let resp = ReadResp::decode(payload).map_err(|err| {
                PushFault::Decode(Status::internal(format!(
                    "failed to decode read response: {}",
                    err
                )))
            })?;

            if let Some(read_resp::Content::Confirmation(confirmation)) = &resp.content {
                debug!(
                    subscription_id = %confirmation.subscription_id,
                    "subscription confirmed by server"
                );
                return Ok(());
            }

            let notification = if raw {
                if let Some(read_resp::Content::Checkpoint(checkpoint)) = &resp.content {
                    SubscriptionEvent::Checkpoint {
                        commit: checkpoint.commit_position,
                        prepare: checkpoint.prepare_position,
                    }
                } else {
                    SubscriptionEvent::Raw(resp)
                }
            } else if matches!(&resp.content, Some(read_resp::Content::Event(_))) {
                SubscriptionEvent::Event(
                    ResolvedEvent::from_read_response(resp).map_err(PushFault::Decode)?,
                )
            } else {
                // Checkpoints and unrecognized content stay internal
                // unless the subscriber asked for raw responses.
                return Ok(());
            };
            sink.send(notification).map_err(|_| PushFault::SubscriberGone)
        });

        let (confirm, confirm_rx) = oneshot::channel();
        let desc = self.descriptor(
            paths::READ,
            RequestBody::Single(frame),
            Disposition::Push { deliver, confirm },
            options.timeout,
        );
        let deadline = desc.deadline;
        let key = self.submit(desc)?;

        match time::timeout(deadline, confirm_rx).await {
            Ok(Ok(Ok(handle))) => Ok(handle),
            Ok(Ok(Err(status))) => Err(ClientError::from(status)),
            Ok(Err(_)) => Err(ClientError::transport("connection actor terminated")),
            Err(_) => {
                self.cancel_request(key, CANCEL_ACK_GRACE).await.ok();
                Err(ClientError::Timeout)
            }
        }
    }

    /// Cancel a subscription. Idempotent: cancelling a dead or foreign
    /// handle returns `Ok`.
    pub async fn cancel(
        &self,
        handle: SubscriptionHandle,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        if handle.connection != self.connection_id {
            return Ok(());
        }
        self.cancel_request(handle.key, timeout).await
    }

    async fn read_chunk_at(
        &self,
        target: &ReadTarget,
        options: &ReadOptions,
        cursor: Cursor,
    ) -> Result<Vec<ResolvedEvent>, ClientError> {
        let responses = self.read_rpc(target, options, cursor).await?;
        let mut events = Vec::with_capacity(responses.len());
        for resp in responses {
            if matches!(&resp.content, Some(read_resp::Content::StreamNotFound(_))) {
                return Ok(Vec::new());
            }
            if matches!(&resp.content, Some(read_resp::Content::Event(_))) {
                events.push(ResolvedEvent::from_read_response(resp).map_err(ClientError::Grpc)?);
            }
        }

        // A positional cursor is passed through inclusively on the wire;
        // drop the echoed cursor event to keep the exclusive contract.
        if let Cursor::Position { commit, .. } = cursor {
            while events
                .first()
                .map(|event| event.commit_position == Some(commit))
                .unwrap_or(false)
            {
                events.remove(0);
            }
            events.truncate(options.max_count as usize);
        }

        Ok(events)
    }

    async fn read_rpc(
        &self,
        target: &ReadTarget,
        options: &ReadOptions,
        cursor: Cursor,
    ) -> Result<Vec<ReadResp>, ClientError> {
        let Some(req) = read_request(target, options, cursor)? else {
            // The exclusive cursor has no successor in this direction.
            return Ok(Vec::new());
        };
        let frame = encode_message(&req).map_err(ClientError::from)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let desc = self.descriptor(
            paths::READ,
            RequestBody::Single(frame),
            Disposition::Stream { tx },
            options.timeout,
        );
        let deadline = desc.deadline;
        let key = self.submit(desc)?;
        let mut body = ResponseStream::new(rx, self.commands.clone(), key);

        let collect = async move {
            let mut responses = Vec::new();
            while let Some(item) = body.next().await {
                match item {
                    Ok(bytes) => responses.push(ReadResp::decode(bytes)?),
                    Err(status) => return Err(ClientError::from(status)),
                }
            }
            Ok(responses)
        };

        match time::timeout(deadline, collect).await {
            Ok(result) => result,
            Err(_) => {
                self.cancel_request(key, CANCEL_ACK_GRACE).await.ok();
                Err(ClientError::Timeout)
            }
        }
    }

    async fn append_rpc(
        &self,
        stream_name: &str,
        events: impl IntoIterator<Item = EventData>,
        options: &AppendOptions,
    ) -> Result<AppendResp, ClientError> {
        let options_req = AppendReq {
            content: Some(append_req::Content::Options(append_req::Options {
                stream_identifier: Some(shared::StreamIdentifier::from_name(stream_name)),
                expected_stream_revision: Some(append_expectation(options.expect)),
            })),
        };

        // `[options, event, event, …]`, terminated by half-closing our
        // side once the producer runs dry.
        let mut frames = vec![encode_message(&options_req).map_err(ClientError::from)?];
        for event in events {
            let req = AppendReq {
                content: Some(append_req::Content::ProposedMessage(event.into_proposed())),
            };
            frames.push(encode_message(&req).map_err(ClientError::from)?);
        }
        let body = RequestBody::Streaming(Box::pin(stream::iter(frames)));

        let messages = self
            .call_aggregate(paths::APPEND, body, options.timeout)
            .await?;
        decode_single::<AppendResp>(messages)
    }

    async fn call_aggregate(
        &self,
        path: &'static str,
        body: RequestBody,
        timeout: Option<Duration>,
    ) -> Result<Vec<Bytes>, ClientError> {
        let (reply, reply_rx) = oneshot::channel();
        let desc = self.descriptor(path, body, Disposition::Aggregate { reply }, timeout);
        let deadline = desc.deadline;
        let key = self.submit(desc)?;

        match time::timeout(deadline, reply_rx).await {
            Ok(Ok(Ok(messages))) => Ok(messages),
            Ok(Ok(Err(failure))) => Err(ClientError::from(failure.status)),
            Ok(Err(_)) => Err(ClientError::transport("connection actor terminated")),
            Err(_) => {
                self.cancel_request(key, CANCEL_ACK_GRACE).await.ok();
                Err(ClientError::Timeout)
            }
        }
    }
}

/// Lazy chunked reader over one stream. Consuming it is destructive, but a
/// fresh iterator over the same stream yields the same sequence, modulo
/// new appends.
pub struct ReadStream {
    client: Client,
    target: ReadTarget,
    options: ReadOptions,
    cursor: Cursor,
    buffer: VecDeque<ResolvedEvent>,
    exhausted: bool,
}

impl ReadStream {
    /// Pull the next event, issuing a fresh chunk RPC when the local
    /// buffer runs dry. Events already yielded stay valid if a later pull
    /// fails.
    pub async fn next(&mut self) -> Result<Option<ResolvedEvent>, ClientError> {
        loop {
            if let Some(event) = self.buffer.pop_front() {
                return Ok(Some(event));
            }
            if self.exhausted {
                return Ok(None);
            }

            let batch = self
                .client
                .read_chunk_at(&self.target, &self.options, self.cursor)
                .await?;

            // A short chunk means the stream has no more to give; don't
            // pay for a further RPC just to see it empty.
            if (batch.len() as u64) < self.options.max_count {
                self.exhausted = true;
            }
            let Some(last) = batch.last() else {
                return Ok(None);
            };
            self.cursor = advance_cursor(&self.target, last);
            self.buffer.extend(batch);
        }
    }

    /// Adapt into a `futures` stream for combinator-style consumption.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResolvedEvent, ClientError>> {
        try_stream! {
            let mut this = self;
            while let Some(event) = this.next().await? {
                yield event;
            }
        }
    }
}

fn advance_cursor(target: &ReadTarget, event: &ResolvedEvent) -> Cursor {
    match target {
        ReadTarget::Stream(_) => Cursor::Revision(event.cursor_revision()),
        ReadTarget::All => {
            let recorded = event.recorded();
            Cursor::Position {
                commit: event
                    .commit_position
                    .or(recorded.map(|e| e.position.commit))
                    .unwrap_or_default(),
                prepare: recorded.map(|e| e.position.prepare).unwrap_or_default(),
            }
        }
    }
}

/// Build the wire request for one read chunk. `None` means the exclusive
/// cursor admits nothing in the requested direction, so no RPC is needed.
fn read_request(
    target: &ReadTarget,
    options: &ReadOptions,
    cursor: Cursor,
) -> Result<Option<ReadReq>, ClientError> {
    if options.max_count == 0 {
        return Err(invalid_argument("max_count must be positive"));
    }

    // A positional cursor goes out inclusively and its echoed event is
    // dropped client-side, so fetch one extra to keep chunks full.
    let wire_count = match cursor {
        Cursor::Position { .. } => options.max_count.saturating_add(1),
        _ => options.max_count,
    };

    let stream_option = match target {
        ReadTarget::Stream(name) => {
            // The wire revision is an inclusive start; exclusive numeric
            // cursors map to their successor in the read direction.
            let revision_option = match (cursor, options.direction) {
                (Cursor::Start, _) => read_req::options::stream_options::RevisionOption::Start(
                    shared::Empty {},
                ),
                (Cursor::End, _) => {
                    read_req::options::stream_options::RevisionOption::End(shared::Empty {})
                }
                (Cursor::Revision(revision), Direction::Forwards) => {
                    match revision.checked_add(1) {
                        Some(next) => {
                            read_req::options::stream_options::RevisionOption::Revision(next)
                        }
                        None => return Ok(None),
                    }
                }
                (Cursor::Revision(revision), Direction::Backwards) => {
                    match revision.checked_sub(1) {
                        Some(next) => {
                            read_req::options::stream_options::RevisionOption::Revision(next)
                        }
                        None => return Ok(None),
                    }
                }
                (Cursor::Position { .. }, _) => {
                    return Err(invalid_argument(
                        "positional cursors apply to $all reads only",
                    ))
                }
            };
            read_req::options::StreamOption::Stream(read_req::options::StreamOptions {
                stream_identifier: Some(shared::StreamIdentifier::from_name(name)),
                revision_option: Some(revision_option),
            })
        }
        ReadTarget::All => {
            let all_option = match cursor {
                Cursor::Start => {
                    read_req::options::all_options::AllOption::Start(shared::Empty {})
                }
                Cursor::End => read_req::options::all_options::AllOption::End(shared::Empty {}),
                Cursor::Position { commit, prepare } => {
                    read_req::options::all_options::AllOption::Position(
                        read_req::options::all_options::Position {
                            commit_position: commit,
                            prepare_position: prepare,
                        },
                    )
                }
                Cursor::Revision(_) => {
                    return Err(invalid_argument(
                        "revision cursors apply to named-stream reads only",
                    ))
                }
            };
            read_req::options::StreamOption::All(read_req::options::AllOptions {
                all_option: Some(all_option),
            })
        }
    };

    Ok(Some(ReadReq {
        options: Some(read_req::Options {
            read_direction: match options.direction {
                Direction::Forwards => read_req::options::ReadDirection::Forwards as i32,
                Direction::Backwards => read_req::options::ReadDirection::Backwards as i32,
            },
            resolve_links: options.resolve_links,
            uuid_option: Some(read_req::options::UuidOption {
                content: Some(read_req::options::uuid_option::Content::String(
                    shared::Empty {},
                )),
            }),
            stream_option: Some(stream_option),
            count_option: Some(read_req::options::CountOption::Count(wire_count)),
            filter_option: Some(filter_option(options.filter.clone())),
        }),
    }))
}

/// Build the wire request for a subscription. Subscription revision
/// options are already resume-after-exclusive on the wire, so numeric
/// cursors pass through untouched.
fn subscribe_request(
    target: &ReadTarget,
    options: &SubscribeOptions,
) -> Result<ReadReq, ClientError> {
    let stream_option = match target {
        ReadTarget::Stream(name) => {
            let revision_option = match options.from {
                Cursor::Start => read_req::options::stream_options::RevisionOption::Start(
                    shared::Empty {},
                ),
                Cursor::End => {
                    read_req::options::stream_options::RevisionOption::End(shared::Empty {})
                }
                Cursor::Revision(revision) => {
                    read_req::options::stream_options::RevisionOption::Revision(revision)
                }
                Cursor::Position { .. } => {
                    return Err(invalid_argument(
                        "positional cursors apply to $all subscriptions only",
                    ))
                }
            };
            read_req::options::StreamOption::Stream(read_req::options::StreamOptions {
                stream_identifier: Some(shared::StreamIdentifier::from_name(name)),
                revision_option: Some(revision_option),
            })
        }
        ReadTarget::All => {
            let all_option = match options.from {
                Cursor::Start => {
                    read_req::options::all_options::AllOption::Start(shared::Empty {})
                }
                Cursor::End => read_req::options::all_options::AllOption::End(shared::Empty {}),
                Cursor::Position { commit, prepare } => {
                    read_req::options::all_options::AllOption::Position(
                        read_req::options::all_options::Position {
                            commit_position: commit,
                            prepare_position: prepare,
                        },
                    )
                }
                Cursor::Revision(_) => {
                    return Err(invalid_argument(
                        "revision cursors apply to named-stream subscriptions only",
                    ))
                }
            };
            read_req::options::StreamOption::All(read_req::options::AllOptions {
                all_option: Some(all_option),
            })
        }
    };

    Ok(ReadReq {
        options: Some(read_req::Options {
            read_direction: read_req::options::ReadDirection::Forwards as i32,
            resolve_links: options.resolve_links,
            uuid_option: Some(read_req::options::UuidOption {
                content: Some(read_req::options::uuid_option::Content::String(
                    shared::Empty {},
                )),
            }),
            stream_option: Some(stream_option),
            count_option: Some(read_req::options::CountOption::Subscription(
                read_req::options::SubscriptionOptions {},
            )),
            filter_option: Some(filter_option(options.filter.clone())),
        }),
    })
}

fn filter_option(
    filter: Option<read_req::options::FilterOptions>,
) -> read_req::options::FilterOption {
    match filter {
        Some(filter) => read_req::options::FilterOption::Filter(filter),
        None => read_req::options::FilterOption::NoFilter(shared::Empty {}),
    }
}

fn invalid_argument(message: &str) -> ClientError {
    ClientError::Grpc(Status::new(crate::status::Code::InvalidArgument, message))
}

fn decode_single<M: Message + Default>(messages: Vec<Bytes>) -> Result<M, ClientError> {
    let first = messages
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::Grpc(Status::internal("Missing response message.")))?;
    M::decode(first).map_err(ClientError::from)
}

fn write_result(success: append_resp::Success) -> WriteResult {
    let current_revision = match success.current_revision_option {
        Some(append_resp::success::CurrentRevisionOption::CurrentRevision(revision)) => {
            Some(revision)
        }
        _ => None,
    };
    let position = match success.position_option {
        Some(append_resp::success::PositionOption::Position(position)) => Some(Position {
            commit: position.commit_position,
            prepare: position.prepare_position,
        }),
        _ => None,
    };
    WriteResult {
        current_revision,
        position,
    }
}

fn expectation_violation(
    requested: ExpectedRevision,
    wrong: append_resp::WrongExpectedVersion,
) -> ClientError {
    use append_resp::wrong_expected_version::{CurrentRevisionOption, ExpectedRevisionOption};

    let current = match wrong.current_revision_option {
        Some(CurrentRevisionOption::CurrentRevision(revision)) => {
            CurrentRevision::Revision(revision)
        }
        _ => CurrentRevision::NoStream,
    };
    let expected = match wrong.expected_revision_option {
        Some(ExpectedRevisionOption::ExpectedRevision(revision)) => {
            ExpectedRevision::Exact(revision)
        }
        Some(ExpectedRevisionOption::ExpectedAny(_)) => ExpectedRevision::Any,
        Some(ExpectedRevisionOption::ExpectedStreamExists(_)) => ExpectedRevision::StreamExists,
        Some(ExpectedRevisionOption::ExpectedNoStream(_)) => ExpectedRevision::NoStream,
        None => requested,
    };
    ClientError::WrongExpectedRevision { expected, current }
}

fn append_expectation(expect: ExpectedRevision) -> append_req::options::ExpectedStreamRevision {
    use append_req::options::ExpectedStreamRevision;
    match expect {
        ExpectedRevision::Any => ExpectedStreamRevision::Any(shared::Empty {}),
        ExpectedRevision::StreamExists => ExpectedStreamRevision::StreamExists(shared::Empty {}),
        ExpectedRevision::NoStream => ExpectedStreamRevision::NoStream(shared::Empty {}),
        ExpectedRevision::Exact(revision) => ExpectedStreamRevision::Revision(revision),
    }
}

fn delete_expectation(expect: ExpectedRevision) -> delete_req::options::ExpectedStreamRevision {
    use delete_req::options::ExpectedStreamRevision;
    match expect {
        ExpectedRevision::Any => ExpectedStreamRevision::Any(shared::Empty {}),
        ExpectedRevision::StreamExists => ExpectedStreamRevision::StreamExists(shared::Empty {}),
        ExpectedRevision::NoStream => ExpectedStreamRevision::NoStream(shared::Empty {}),
        ExpectedRevision::Exact(revision) => ExpectedStreamRevision::Revision(revision),
    }
}

fn tombstone_expectation(
    expect: ExpectedRevision,
) -> tombstone_req::options::ExpectedStreamRevision {
    use tombstone_req::options::ExpectedStreamRevision;
    match expect {
        ExpectedRevision::Any => ExpectedStreamRevision::Any(shared::Empty {}),
        ExpectedRevision::StreamExists => ExpectedStreamRevision::StreamExists(shared::Empty {}),
        ExpectedRevision::NoStream => ExpectedStreamRevision::NoStream(shared::Empty {}),
        ExpectedRevision::Exact(revision) => ExpectedStreamRevision::Revision(revision),
    }
}

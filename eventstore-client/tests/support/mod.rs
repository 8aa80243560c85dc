//! An in-process EventStore speaking HTTP/2 with gRPC framing, backed by
//! an in-memory store. Enough of the `Streams` service to drive the
//! client end to end, plus a few sentinel stream names that provoke
//! transport-level misbehavior on demand.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::StreamExt;
use h2::server::SendResponse;
use h2::RecvStream;
use http::{HeaderMap, Request, Response};
use prost::Message;
use tokio::io::DuplexStream;
use tokio::sync::broadcast;

use eventstore_client::codec::{encode_message, FrameDecoder, DEFAULT_MAX_FRAME_LENGTH};
use eventstore_client::proto::streams::{
    append_req, append_resp, delete_resp, read_req, read_resp, tombstone_resp, AppendReq,
    AppendResp, DeleteReq, DeleteResp, ReadReq, ReadResp, TombstoneReq, TombstoneResp,
};
use eventstore_client::proto::shared;
use eventstore_client::{Client, ClientSettings};

/// A stream name that makes the server reset the read mid-response.
pub const RESET_MIDWAY: &str = "reset.midway";
/// A stream name that makes the server send an oversized frame header.
pub const OVERSIZED_FRAME: &str = "oversized.frame";
/// A stream name that makes the server open the response and then stall.
pub const HANG_FOREVER: &str = "hang.forever";

#[derive(Clone)]
pub struct FakeEventStore {
    inner: Arc<Inner>,
}

struct Inner {
    store: Mutex<Store>,
    read_rpcs: AtomicUsize,
    appended: broadcast::Sender<GlobalEvent>,
}

#[derive(Default)]
struct Store {
    streams: HashMap<String, StreamEntry>,
    next_commit: u64,
}

#[derive(Default)]
struct StreamEntry {
    events: Vec<StoredEvent>,
    tombstoned: bool,
}

#[derive(Clone)]
struct StoredEvent {
    id: String,
    event_type: String,
    content_type: String,
    data: Bytes,
    custom_metadata: Bytes,
    revision: u64,
    commit: u64,
}

#[derive(Clone)]
struct GlobalEvent {
    stream: String,
    event: StoredEvent,
}

impl FakeEventStore {
    /// Spin up a server over an in-memory pipe and hand back a connected
    /// client.
    pub async fn start() -> (Client, FakeEventStore) {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);

        let (appended, _) = broadcast::channel(256);
        let server = FakeEventStore {
            inner: Arc::new(Inner {
                store: Mutex::new(Store::default()),
                read_rpcs: AtomicUsize::new(0),
                appended,
            }),
        };

        let inner = server.inner.clone();
        tokio::spawn(serve(server_io, inner));

        let settings = ClientSettings::default();
        let client = Client::handshake(client_io, settings)
            .await
            .expect("handshake with in-process server");
        (client, server)
    }

    /// Number of non-subscription read RPCs handled so far.
    pub fn read_rpcs(&self) -> usize {
        self.inner.read_rpcs.load(Ordering::SeqCst)
    }
}

async fn serve(io: DuplexStream, inner: Arc<Inner>) {
    let mut conn = match h2::server::handshake(io).await {
        Ok(conn) => conn,
        Err(_) => return,
    };
    while let Some(accepted) = conn.accept().await {
        let Ok((request, respond)) = accepted else {
            break;
        };
        tokio::spawn(handle(request, respond, inner.clone()));
    }
}

async fn handle(request: Request<RecvStream>, mut respond: SendResponse<Bytes>, inner: Arc<Inner>) {
    let path = request.uri().path().to_owned();
    match path.as_str() {
        "/event_store.client.streams.Streams/Read" => handle_read(request, respond, inner).await,
        "/event_store.client.streams.Streams/Append" => {
            handle_append(request, respond, inner).await
        }
        "/event_store.client.streams.Streams/Delete" => {
            handle_delete(request, respond, inner).await
        }
        "/event_store.client.streams.Streams/Tombstone" => {
            handle_tombstone(request, respond, inner).await
        }
        _ => {
            let mut send = respond
                .send_response(grpc_response(), false)
                .expect("send response");
            let _ = send.send_trailers(error_trailers(12, &format!("unknown rpc {}", path)));
        }
    }
}

async fn handle_read(
    request: Request<RecvStream>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    let (_, mut body) = request.into_parts();
    let requests: Vec<ReadReq> = read_messages(&mut body).await;
    let options = requests
        .into_iter()
        .next()
        .and_then(|r| r.options)
        .expect("read request carries options");

    let backwards = options.read_direction == read_req::options::ReadDirection::Backwards as i32;
    let (count, subscription) = match options.count_option {
        Some(read_req::options::CountOption::Count(n)) => (n, false),
        Some(read_req::options::CountOption::Subscription(_)) => (u64::MAX, true),
        None => (u64::MAX, false),
    };

    match options.stream_option.expect("read request targets something") {
        read_req::options::StreamOption::Stream(stream_options) => {
            let name = stream_options
                .stream_identifier
                .expect("stream identifier present")
                .name()
                .into_owned();

            if !subscription {
                inner.read_rpcs.fetch_add(1, Ordering::SeqCst);
            }

            match name.as_str() {
                RESET_MIDWAY => return reset_midway(respond).await,
                OVERSIZED_FRAME => return oversized_frame(respond).await,
                HANG_FOREVER => {
                    let _send = respond
                        .send_response(grpc_response(), false)
                        .expect("send response");
                    std::future::pending::<()>().await;
                    return;
                }
                _ => {}
            }

            if subscription {
                serve_stream_subscription(name, stream_options.revision_option, respond, inner)
                    .await;
            } else {
                serve_stream_read(
                    name,
                    stream_options.revision_option,
                    backwards,
                    count,
                    respond,
                    inner,
                );
            }
        }
        read_req::options::StreamOption::All(all_options) => {
            if subscription {
                serve_all_subscription(all_options.all_option, respond, inner).await;
            } else {
                serve_all_read(all_options.all_option, backwards, count, respond, inner);
            }
        }
    }
}

fn serve_stream_read(
    name: String,
    revision: Option<read_req::options::stream_options::RevisionOption>,
    backwards: bool,
    count: u64,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    use read_req::options::stream_options::RevisionOption;

    let selected: Result<Vec<StoredEvent>, String> = {
        let store = inner.store.lock().unwrap();
        match store.streams.get(&name) {
            Some(entry) if entry.tombstoned => {
                Err(format!("Event stream '{}' is deleted.", name))
            }
            None => Ok(Vec::new()),
            Some(entry) => {
                let events: Vec<StoredEvent> = if backwards {
                    let upto = match revision {
                        Some(RevisionOption::End(_)) | None => u64::MAX,
                        Some(RevisionOption::Start(_)) => 0,
                        Some(RevisionOption::Revision(r)) => r,
                    };
                    entry
                        .events
                        .iter()
                        .rev()
                        .filter(|e| e.revision <= upto)
                        .take(count as usize)
                        .cloned()
                        .collect()
                } else {
                    let from = match revision {
                        Some(RevisionOption::Start(_)) | None => 0,
                        Some(RevisionOption::End(_)) => u64::MAX,
                        Some(RevisionOption::Revision(r)) => r,
                    };
                    entry
                        .events
                        .iter()
                        .filter(|e| e.revision >= from)
                        .take(count as usize)
                        .cloned()
                        .collect()
                };
                Ok(events)
            }
        }
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    match selected {
        Err(message) => {
            let _ = send.send_trailers(error_trailers(9, &message));
        }
        Ok(events) => {
            let known = {
                let store = inner.store.lock().unwrap();
                store.streams.contains_key(&name)
            };
            if !known {
                let not_found = ReadResp {
                    content: Some(read_resp::Content::StreamNotFound(
                        read_resp::StreamNotFound {
                            stream_identifier: Some(shared::StreamIdentifier::from_name(&name)),
                        },
                    )),
                };
                let _ = send.send_data(frame(&not_found), false);
            } else {
                for event in events {
                    let _ = send.send_data(frame(&event_response(&name, &event)), false);
                }
            }
            let _ = send.send_trailers(ok_trailers());
        }
    }
}

async fn serve_stream_subscription(
    name: String,
    revision: Option<read_req::options::stream_options::RevisionOption>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    use read_req::options::stream_options::RevisionOption;

    // Subscribe before snapshotting so nothing appended in between is lost.
    let mut live = inner.appended.subscribe();

    let (backlog, mut min_exclusive) = {
        let store = inner.store.lock().unwrap();
        let entry = store.streams.get(&name);
        // Subscription revisions are resume-after-exclusive.
        let min_exclusive = match revision {
            Some(RevisionOption::Start(_)) | None => None,
            Some(RevisionOption::Revision(r)) => Some(r),
            Some(RevisionOption::End(_)) => entry.and_then(|e| e.events.last()).map(|e| e.revision),
        };
        let backlog: Vec<StoredEvent> = entry
            .map(|e| {
                e.events
                    .iter()
                    .filter(|ev| min_exclusive.map_or(true, |min| ev.revision > min))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        (backlog, min_exclusive)
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");

    let confirmation = ReadResp {
        content: Some(read_resp::Content::Confirmation(
            read_resp::SubscriptionConfirmation {
                subscription_id: format!("sub-{}", name),
            },
        )),
    };
    if send.send_data(frame(&confirmation), false).is_err() {
        return;
    }

    for event in backlog {
        min_exclusive = Some(event.revision);
        if send
            .send_data(frame(&event_response(&name, &event)), false)
            .is_err()
        {
            return;
        }
    }

    loop {
        match live.recv().await {
            Ok(global) => {
                if global.stream != name {
                    continue;
                }
                if min_exclusive.is_some_and(|min| global.event.revision <= min) {
                    continue;
                }
                min_exclusive = Some(global.event.revision);
                if send
                    .send_data(frame(&event_response(&name, &global.event)), false)
                    .is_err()
                {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

fn serve_all_read(
    position: Option<read_req::options::all_options::AllOption>,
    backwards: bool,
    count: u64,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    use read_req::options::all_options::AllOption;

    let mut log: Vec<GlobalEvent> = {
        let store = inner.store.lock().unwrap();
        let mut all: Vec<GlobalEvent> = store
            .streams
            .iter()
            .flat_map(|(name, entry)| {
                entry.events.iter().map(|event| GlobalEvent {
                    stream: name.clone(),
                    event: event.clone(),
                })
            })
            .collect();
        all.sort_by_key(|g| g.event.commit);
        all
    };

    match position {
        Some(AllOption::Position(p)) => {
            if backwards {
                log.retain(|g| g.event.commit <= p.commit_position);
            } else {
                log.retain(|g| g.event.commit >= p.commit_position);
            }
        }
        Some(AllOption::End(_)) if !backwards => log.clear(),
        _ => {}
    }
    if backwards {
        log.reverse();
    }
    log.truncate(count as usize);

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    for global in log {
        let _ = send.send_data(frame(&event_response(&global.stream, &global.event)), false);
    }
    let _ = send.send_trailers(ok_trailers());
}

async fn serve_all_subscription(
    position: Option<read_req::options::all_options::AllOption>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    use read_req::options::all_options::AllOption;

    let mut live = inner.appended.subscribe();
    let (backlog, mut min_commit) = {
        let store = inner.store.lock().unwrap();
        let mut all: Vec<GlobalEvent> = store
            .streams
            .iter()
            .flat_map(|(name, entry)| {
                entry.events.iter().map(|event| GlobalEvent {
                    stream: name.clone(),
                    event: event.clone(),
                })
            })
            .collect();
        all.sort_by_key(|g| g.event.commit);

        let min_commit = match position {
            Some(AllOption::Position(p)) => Some(p.commit_position),
            Some(AllOption::End(_)) => all.last().map(|g| g.event.commit),
            _ => None,
        };
        all.retain(|g| min_commit.map_or(true, |min| g.event.commit > min));
        (all, min_commit)
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");

    let confirmation = ReadResp {
        content: Some(read_resp::Content::Confirmation(
            read_resp::SubscriptionConfirmation {
                subscription_id: "sub-all".to_owned(),
            },
        )),
    };
    if send.send_data(frame(&confirmation), false).is_err() {
        return;
    }

    let checkpoint = ReadResp {
        content: Some(read_resp::Content::Checkpoint(read_resp::Checkpoint {
            commit_position: min_commit.unwrap_or(0),
            prepare_position: min_commit.unwrap_or(0),
        })),
    };
    if send.send_data(frame(&checkpoint), false).is_err() {
        return;
    }

    for global in backlog {
        min_commit = Some(global.event.commit);
        if send
            .send_data(frame(&event_response(&global.stream, &global.event)), false)
            .is_err()
        {
            return;
        }
    }

    loop {
        match live.recv().await {
            Ok(global) => {
                if min_commit.is_some_and(|min| global.event.commit <= min) {
                    continue;
                }
                min_commit = Some(global.event.commit);
                if send
                    .send_data(frame(&event_response(&global.stream, &global.event)), false)
                    .is_err()
                {
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

async fn handle_append(
    request: Request<RecvStream>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    use append_req::options::ExpectedStreamRevision;

    let (_, mut body) = request.into_parts();
    let messages: Vec<AppendReq> = read_messages(&mut body).await;
    let mut contents = messages.into_iter().filter_map(|m| m.content);

    let Some(append_req::Content::Options(options)) = contents.next() else {
        let mut send = respond
            .send_response(grpc_response(), false)
            .expect("send response");
        let _ = send.send_trailers(error_trailers(3, "append must start with options"));
        return;
    };
    let name = options
        .stream_identifier
        .expect("stream identifier present")
        .name()
        .into_owned();
    let proposed: Vec<append_req::ProposedMessage> = contents
        .filter_map(|c| match c {
            append_req::Content::ProposedMessage(m) => Some(m),
            append_req::Content::Options(_) => None,
        })
        .collect();

    let outcome = {
        let mut store = inner.store.lock().unwrap();
        let current = store
            .streams
            .get(&name)
            .and_then(|entry| entry.events.last())
            .map(|event| event.revision);
        let tombstoned = store
            .streams
            .get(&name)
            .map(|entry| entry.tombstoned)
            .unwrap_or(false);

        if tombstoned {
            Outcome::Deleted(format!("Event stream '{}' is deleted.", name))
        } else {
            let violated = match options.expected_stream_revision {
                Some(ExpectedStreamRevision::Any(_)) | None => false,
                Some(ExpectedStreamRevision::NoStream(_)) => current.is_some(),
                Some(ExpectedStreamRevision::StreamExists(_)) => current.is_none(),
                Some(ExpectedStreamRevision::Revision(r)) => current != Some(r),
            };
            if violated {
                Outcome::WrongExpectedVersion {
                    current,
                    expected: options.expected_stream_revision,
                }
            } else {
                let base = current.map_or(0, |c| c + 1);
                let mut globals = Vec::new();
                for (i, message) in proposed.into_iter().enumerate() {
                    store.next_commit += 1;
                    let event = stored_event(message, base + i as u64, store.next_commit);
                    globals.push(GlobalEvent {
                        stream: name.clone(),
                        event,
                    });
                }
                let entry = store.streams.entry(name.clone()).or_default();
                for global in &globals {
                    entry.events.push(global.event.clone());
                }
                let last_revision = entry.events.last().map(|e| e.revision);
                let last_commit = entry.events.last().map(|e| e.commit).unwrap_or(0);
                Outcome::Success {
                    globals,
                    current: last_revision,
                    commit: last_commit,
                }
            }
        }
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    match outcome {
        Outcome::Deleted(message) => {
            let _ = send.send_trailers(error_trailers(9, &message));
        }
        Outcome::WrongExpectedVersion { current, expected } => {
            let resp = AppendResp {
                result: Some(append_resp::Result::WrongExpectedVersion(
                    wrong_expected_version(current, expected),
                )),
            };
            let _ = send.send_data(frame(&resp), false);
            let _ = send.send_trailers(ok_trailers());
        }
        Outcome::Success {
            globals,
            current,
            commit,
        } => {
            for global in globals {
                let _ = inner.appended.send(global);
            }
            let resp = AppendResp {
                result: Some(append_resp::Result::Success(append_resp::Success {
                    current_revision_option: Some(match current {
                        Some(revision) => {
                            append_resp::success::CurrentRevisionOption::CurrentRevision(revision)
                        }
                        None => append_resp::success::CurrentRevisionOption::NoStream(
                            shared::Empty {},
                        ),
                    }),
                    position_option: Some(append_resp::success::PositionOption::Position(
                        append_resp::Position {
                            commit_position: commit,
                            prepare_position: commit,
                        },
                    )),
                })),
            };
            let _ = send.send_data(frame(&resp), false);
            let _ = send.send_trailers(ok_trailers());
        }
    }
}

enum Outcome {
    Deleted(String),
    WrongExpectedVersion {
        current: Option<u64>,
        expected: Option<append_req::options::ExpectedStreamRevision>,
    },
    Success {
        globals: Vec<GlobalEvent>,
        current: Option<u64>,
        commit: u64,
    },
}

fn wrong_expected_version(
    current: Option<u64>,
    expected: Option<append_req::options::ExpectedStreamRevision>,
) -> append_resp::WrongExpectedVersion {
    use append_req::options::ExpectedStreamRevision as Req;
    use append_resp::wrong_expected_version::{CurrentRevisionOption, ExpectedRevisionOption};

    append_resp::WrongExpectedVersion {
        current_revision_option: Some(match current {
            Some(revision) => CurrentRevisionOption::CurrentRevision(revision),
            None => CurrentRevisionOption::CurrentNoStream(shared::Empty {}),
        }),
        expected_revision_option: Some(match expected {
            Some(Req::Revision(r)) => ExpectedRevisionOption::ExpectedRevision(r),
            Some(Req::NoStream(_)) => ExpectedRevisionOption::ExpectedNoStream(shared::Empty {}),
            Some(Req::StreamExists(_)) => {
                ExpectedRevisionOption::ExpectedStreamExists(shared::Empty {})
            }
            Some(Req::Any(_)) | None => ExpectedRevisionOption::ExpectedAny(shared::Empty {}),
        }),
    }
}

async fn handle_delete(
    request: Request<RecvStream>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    let (_, mut body) = request.into_parts();
    let requests: Vec<DeleteReq> = read_messages(&mut body).await;
    let name = requests
        .into_iter()
        .next()
        .and_then(|r| r.options)
        .and_then(|o| o.stream_identifier)
        .expect("delete names a stream")
        .name()
        .into_owned();

    let commit = {
        let mut store = inner.store.lock().unwrap();
        store.streams.remove(&name);
        store.next_commit += 1;
        store.next_commit
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    let resp = DeleteResp {
        position_option: Some(delete_resp::PositionOption::Position(delete_resp::Position {
            commit_position: commit,
            prepare_position: commit,
        })),
    };
    let _ = send.send_data(frame(&resp), false);
    let _ = send.send_trailers(ok_trailers());
}

async fn handle_tombstone(
    request: Request<RecvStream>,
    mut respond: SendResponse<Bytes>,
    inner: Arc<Inner>,
) {
    let (_, mut body) = request.into_parts();
    let requests: Vec<TombstoneReq> = read_messages(&mut body).await;
    let name = requests
        .into_iter()
        .next()
        .and_then(|r| r.options)
        .and_then(|o| o.stream_identifier)
        .expect("tombstone names a stream")
        .name()
        .into_owned();

    let commit = {
        let mut store = inner.store.lock().unwrap();
        let entry = store.streams.entry(name).or_default();
        entry.tombstoned = true;
        entry.events.clear();
        store.next_commit += 1;
        store.next_commit
    };

    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    let resp = TombstoneResp {
        position_option: Some(tombstone_resp::PositionOption::Position(
            tombstone_resp::Position {
                commit_position: commit,
                prepare_position: commit,
            },
        )),
    };
    let _ = send.send_data(frame(&resp), false);
    let _ = send.send_trailers(ok_trailers());
}

async fn reset_midway(mut respond: SendResponse<Bytes>) {
    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    let event = StoredEvent {
        id: "00000000-0000-0000-0000-000000000001".to_owned(),
        event_type: "poisoned".to_owned(),
        content_type: "application/octet-stream".to_owned(),
        data: Bytes::from_static(b"poison"),
        custom_metadata: Bytes::new(),
        revision: 0,
        commit: 0,
    };
    let _ = send.send_data(frame(&event_response(RESET_MIDWAY, &event)), false);
    send.send_reset(h2::Reason::INTERNAL_ERROR);
}

async fn oversized_frame(mut respond: SendResponse<Bytes>) {
    let mut send = respond
        .send_response(grpc_response(), false)
        .expect("send response");
    // 64 MiB claimed length; the client's ceiling is 16 MiB.
    let _ = send.send_data(Bytes::from_static(&[0, 0x04, 0x00, 0x00, 0x00]), false);
}

async fn read_messages<M: Message + Default>(body: &mut RecvStream) -> Vec<M> {
    let mut decoder = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
    let mut messages = Vec::new();
    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(_) => break,
        };
        let len = chunk.len();
        decoder.extend(&chunk);
        let _ = body.flow_control().release_capacity(len);
        while let Some(frame) = decoder.next_frame().expect("well-formed request frames") {
            messages.push(M::decode(frame).expect("decodable request message"));
        }
    }
    messages
}

fn stored_event(message: append_req::ProposedMessage, revision: u64, commit: u64) -> StoredEvent {
    let id = match message.id.and_then(|u| u.value) {
        Some(shared::uuid::Value::String(s)) => s,
        _ => "00000000-0000-0000-0000-000000000000".to_owned(),
    };
    StoredEvent {
        id,
        event_type: message.metadata.get("type").cloned().unwrap_or_default(),
        content_type: message
            .metadata
            .get("content-type")
            .cloned()
            .unwrap_or_default(),
        data: message.data,
        custom_metadata: message.custom_metadata,
        revision,
        commit,
    }
}

fn event_response(stream: &str, event: &StoredEvent) -> ReadResp {
    let mut metadata = HashMap::new();
    metadata.insert("type".to_owned(), event.event_type.clone());
    metadata.insert("content-type".to_owned(), event.content_type.clone());

    ReadResp {
        content: Some(read_resp::Content::Event(read_resp::ReadEvent {
            event: Some(read_resp::read_event::RecordedEvent {
                id: Some(shared::Uuid {
                    value: Some(shared::uuid::Value::String(event.id.clone())),
                }),
                stream_identifier: Some(shared::StreamIdentifier::from_name(stream)),
                stream_revision: event.revision,
                prepare_position: event.commit,
                commit_position: event.commit,
                metadata,
                custom_metadata: event.custom_metadata.clone(),
                data: event.data.clone(),
            }),
            link: None,
            position: Some(read_resp::read_event::Position::CommitPosition(event.commit)),
        })),
    }
}

fn frame<M: Message>(message: &M) -> Bytes {
    encode_message(message).expect("encodable response message")
}

fn grpc_response() -> Response<()> {
    Response::builder()
        .status(200)
        .header("content-type", "application/grpc+proto")
        .body(())
        .expect("valid response head")
}

fn ok_trailers() -> HeaderMap {
    let mut trailers = HeaderMap::new();
    trailers.insert("grpc-status", "0".parse().unwrap());
    trailers
}

fn error_trailers(code: u32, message: &str) -> HeaderMap {
    let mut trailers = HeaderMap::new();
    trailers.insert("grpc-status", code.to_string().parse().unwrap());
    trailers.insert("grpc-message", message.parse().unwrap());
    trailers
}

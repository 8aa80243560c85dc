//! The connection handle and its settings.
//!
//! A [`Client`] is a cheap cloneable handle to one connection actor; all
//! engine access is serialized through the actor's command queue. Dropping
//! every handle (and every outstanding response stream) tears the actor
//! down.

pub(crate) mod descriptor;
pub(crate) mod state;

mod connection;

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue};
use http::uri::{Authority, PathAndQuery, Scheme};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::codec::{DEFAULT_MAX_FRAME_LENGTH, HEADER_SIZE};
use crate::error::ClientError;
use crate::status::Status;

pub(crate) use connection::{Command, ConnectionActor};
use descriptor::{Disposition, RequestBody, RequestDescriptor};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to one push subscription, used for cancellation.
/// Equality and ordering are keyed by the request key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle {
    pub(crate) key: u32,
    pub(crate) connection: u64,
}

impl SubscriptionHandle {
    /// Identity of the connection this subscription lives on.
    pub fn connection_id(&self) -> u64 {
        self.connection
    }
}

/// Basic-auth credentials sent with every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    fn header_value(&self) -> HeaderValue {
        let encoded = BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::try_from(format!("Basic {}", encoded))
            .expect("base64 output is a valid header value");
        value.set_sensitive(true);
        value
    }
}

/// Connection-level configuration. No file or environment loading happens
/// here; construct it in code.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub(crate) scheme: Scheme,
    pub(crate) authority: Authority,
    pub(crate) credentials: Option<Credentials>,
    /// Applied when an operation's options carry no timeout.
    pub(crate) default_deadline: Duration,
    /// Incoming gRPC frames beyond this fail the request with
    /// `ResourceExhausted`.
    pub(crate) max_frame_length: usize,
    pub(crate) initial_stream_window_size: Option<u32>,
    pub(crate) initial_connection_window_size: Option<u32>,
    /// PING cadence; `None` disables keepalive.
    pub(crate) keepalive_interval: Option<Duration>,
    /// A PING unanswered for this long tears the connection down.
    pub(crate) keepalive_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            scheme: Scheme::HTTP,
            authority: Authority::from_static("localhost:2113"),
            credentials: None,
            default_deadline: Duration::from_secs(10),
            max_frame_length: DEFAULT_MAX_FRAME_LENGTH,
            initial_stream_window_size: None,
            initial_connection_window_size: None,
            keepalive_interval: Some(Duration::from_secs(10)),
            keepalive_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientSettings {
    pub fn new(authority: &str) -> Result<ClientSettings, http::uri::InvalidUri> {
        Ok(ClientSettings {
            authority: authority.parse()?,
            ..ClientSettings::default()
        })
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn max_frame_length(mut self, limit: usize) -> Self {
        self.max_frame_length = limit;
        self
    }

    pub fn keepalive(mut self, interval: Option<Duration>, timeout: Duration) -> Self {
        self.keepalive_interval = interval;
        self.keepalive_timeout = timeout;
        self
    }
}

/// Handle to one EventStore connection.
#[derive(Clone)]
pub struct Client {
    pub(crate) commands: mpsc::UnboundedSender<Command>,
    pub(crate) connection_id: u64,
    pub(crate) settings: Arc<ClientSettings>,
    /// Client-initiated request keys: odd, monotonically increasing.
    next_key: Arc<AtomicU32>,
}

impl Client {
    /// Connect over TCP to the settings' authority and perform the HTTP/2
    /// handshake.
    pub async fn connect(settings: ClientSettings) -> Result<Client, ClientError> {
        let host = settings.authority.host().to_owned();
        let port = settings.authority.port_u16().unwrap_or(2113);
        let io = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|err| {
                ClientError::transport(format!("failed to connect to {}:{}: {}", host, port, err))
            })?;
        let _ = io.set_nodelay(true);
        Client::handshake(io, settings).await
    }

    /// Perform the HTTP/2 handshake over an established transport and
    /// spawn the connection actor. This is the entry point for custom
    /// transports (and for tests over in-memory pipes).
    pub async fn handshake<T>(io: T, settings: ClientSettings) -> Result<Client, ClientError>
    where
        T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let settings = Arc::new(settings);

        let mut builder = h2::client::Builder::new();
        if let Some(size) = settings.initial_stream_window_size {
            builder.initial_window_size(size);
        }
        if let Some(size) = settings.initial_connection_window_size {
            builder.initial_connection_window_size(size);
        }

        let (send_request, mut connection) = builder
            .handshake::<_, Bytes>(io)
            .await
            .map_err(|err| ClientError::Transport(Status::from_h2_error(&err)))?;

        let connection_id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
        let ping_pong = connection.ping_pong();
        let (commands, command_rx) = mpsc::unbounded_channel();

        // Drive the engine; its termination cascades into the actor.
        let conn_commands = commands.clone();
        tokio::spawn(async move {
            let cause = match connection.await {
                Ok(()) => "connection closed".to_owned(),
                Err(err) => format!("h2 connection error: {}", err),
            };
            debug!(connection_id, %cause, "connection task finished");
            let _ = conn_commands.send(Command::ConnectionLost { cause });
        });

        if let (Some(interval), Some(mut ping_pong)) =
            (settings.keepalive_interval, ping_pong)
        {
            let keepalive_commands = commands.clone();
            let timeout = settings.keepalive_timeout;
            tokio::spawn(async move {
                let mut ticker = time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    match time::timeout(timeout, ping_pong.ping(h2::Ping::opaque())).await {
                        Ok(Ok(_pong)) => {}
                        Ok(Err(err)) => {
                            let _ = keepalive_commands.send(Command::ConnectionLost {
                                cause: format!("keepalive ping failed: {}", err),
                            });
                            break;
                        }
                        Err(_) => {
                            let _ = keepalive_commands.send(Command::ConnectionLost {
                                cause: "keepalive ping timed out".to_owned(),
                            });
                            break;
                        }
                    }
                }
            });
        }

        let actor = ConnectionActor::new(send_request, settings.clone(), connection_id, command_rx);
        tokio::spawn(actor.run());

        Ok(Client {
            commands,
            connection_id,
            settings,
            next_key: Arc::new(AtomicU32::new(1)),
        })
    }

    /// Build a request descriptor with the standard gRPC headers.
    pub(crate) fn descriptor(
        &self,
        path: &'static str,
        body: RequestBody,
        disposition: Disposition,
        timeout: Option<Duration>,
    ) -> RequestDescriptor {
        let deadline = timeout.unwrap_or(self.settings.default_deadline);

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/grpc+proto"),
        );
        headers.insert(http::header::TE, HeaderValue::from_static("trailers"));
        headers.insert("grpc-timeout", descriptor::grpc_timeout(deadline));
        if let Some(credentials) = &self.settings.credentials {
            headers.insert(http::header::AUTHORIZATION, credentials.header_value());
        }

        RequestDescriptor {
            path: PathAndQuery::from_static(path),
            headers,
            body,
            disposition,
            deadline,
        }
    }

    /// Enqueue a request under a freshly allocated key.
    pub(crate) fn submit(&self, desc: RequestDescriptor) -> Result<u32, ClientError> {
        let key = self.next_key.fetch_add(2, Ordering::Relaxed);
        self.commands
            .send(Command::Submit { key, desc })
            .map_err(|_| ClientError::transport("connection actor terminated"))?;
        Ok(key)
    }

    /// Ask the actor to cancel `key` and wait for the acknowledgement.
    pub(crate) async fn cancel_request(
        &self,
        key: u32,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        let (done, done_rx) = oneshot::channel();
        if self
            .commands
            .send(Command::Cancel { key, done })
            .is_err()
        {
            // The actor is gone, so the request is as cancelled as it will
            // ever be.
            return Ok(());
        }
        match time::timeout(timeout, done_rx).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Ok(()),
            Err(_) => Err(ClientError::Timeout),
        }
    }
}

/// Pull side of a `Stream`-disposition request. Each item taken returns
/// that frame's flow-control credit to the peer.
pub(crate) struct ResponseStream {
    rx: mpsc::UnboundedReceiver<Result<Bytes, Status>>,
    commands: mpsc::UnboundedSender<Command>,
    key: u32,
}

impl ResponseStream {
    pub(crate) fn new(
        rx: mpsc::UnboundedReceiver<Result<Bytes, Status>>,
        commands: mpsc::UnboundedSender<Command>,
        key: u32,
    ) -> ResponseStream {
        ResponseStream { rx, commands, key }
    }

    pub(crate) async fn next(&mut self) -> Option<Result<Bytes, Status>> {
        let item = self.rx.recv().await;
        if let Some(Ok(bytes)) = &item {
            let _ = self.commands.send(Command::Credit {
                key: self.key,
                bytes: bytes.len() + HEADER_SIZE,
            });
        }
        item
    }
}

use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use futures_util::Sink;
use futures_util::SinkExt;
use futures_util::Stream;
use futures_util::StreamExt;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as TungsteniteError;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::error::ClientError;
use crate::transport::graphql::GraphqlError;
use crate::transport::graphql::GraphqlRequest;

/// The legacy `subscriptions-transport-ws` subprotocol Hasura speaks.
pub(crate) const GRAPHQL_WS_PROTOCOL: &str = "graphql-ws";

/// Client-to-server frames of the `graphql-ws` protocol.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ConnectionInit { payload: Value },
    ConnectionTerminate,
    Start { id: String, payload: GraphqlRequest },
    Stop { id: String },
}

/// Server-to-client frames of the `graphql-ws` protocol.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Complete { id: String },
    ConnectionAck,
    ConnectionError { payload: Option<Value> },
    Data { id: String, payload: ExecutionPayload },
    Error { id: String, payload: Value },
    Ka,
}

/// The `payload` of a `data` frame: a standard GraphQL execution result.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExecutionPayload {
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<Vec<GraphqlError>>,
}

/// Receives every delivery (or terminal error) for one subscription.
pub type SubscriptionCallback = Box<dyn FnMut(Result<Value, ClientError>) + Send + 'static>;

pub(crate) enum Command {
    Start {
        callback: SubscriptionCallback,
        id: String,
        request: GraphqlRequest,
    },
    Stop {
        id: String,
    },
}

/// A live subscription. Dropping the handle (or calling
/// [`unsubscribe`](SubscriptionHandle::unsubscribe)) sends a `stop` frame
/// for this id and releases the callback; other subscriptions on the shared
/// connection are unaffected.
pub struct SubscriptionHandle {
    commands: mpsc::UnboundedSender<Command>,
    id: String,
}

impl SubscriptionHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn unsubscribe(self) {}
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Stop {
            id: self.id.clone(),
        });
    }
}

/// Multiplexes any number of subscriptions over one lazily-opened
/// `graphql-ws` connection.
///
/// The first [`subscribe`](WebsocketTransport::subscribe) dials the endpoint,
/// performs the `connection_init` handshake, and spawns a driver task that
/// routes `data`/`error`/`complete` frames to callbacks by operation id. A
/// later subscribe after the connection drops dials again.
pub struct WebsocketTransport {
    connection_payload: Value,
    next_id: AtomicU64,
    sender: Mutex<Option<mpsc::UnboundedSender<Command>>>,
    url: String,
}

impl WebsocketTransport {
    pub fn new(url: impl Into<String>, headers: &[(&'static str, String)]) -> Self {
        let headers: serde_json::Map<String, Value> = headers
            .iter()
            .map(|(name, value)| ((*name).to_string(), Value::String(value.clone())))
            .collect();
        WebsocketTransport {
            connection_payload: json!({ "headers": headers }),
            next_id: AtomicU64::new(1),
            sender: Mutex::new(None),
            url: url.into(),
        }
    }

    pub async fn subscribe(
        &self,
        request: GraphqlRequest,
        callback: SubscriptionCallback,
    ) -> Result<SubscriptionHandle, ClientError> {
        let commands = self.ensure_connected().await?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        commands
            .send(Command::Start {
                callback,
                id: id.clone(),
                request,
            })
            .map_err(|_| ClientError::SubscriptionClosed)?;
        Ok(SubscriptionHandle { commands, id })
    }

    async fn ensure_connected(&self) -> Result<mpsc::UnboundedSender<Command>, ClientError> {
        let mut slot = self.sender.lock().await;
        if let Some(sender) = slot.as_ref()
            && !sender.is_closed()
        {
            return Ok(sender.clone());
        }
        let sender = connect(&self.url, self.connection_payload.clone()).await?;
        *slot = Some(sender.clone());
        Ok(sender)
    }
}

async fn connect(
    url: &str,
    connection_payload: Value,
) -> Result<mpsc::UnboundedSender<Command>, ClientError> {
    let mut request = url.into_client_request()?;
    request.headers_mut().insert(
        "sec-websocket-protocol",
        HeaderValue::from_static(GRAPHQL_WS_PROTOCOL),
    );
    tracing::debug!(url, "opening graphql-ws connection");
    let (socket, _) = connect_async(request).await?;
    let (mut sink, mut stream) = socket.split();

    send_frame(
        &mut sink,
        &ClientMessage::ConnectionInit {
            payload: connection_payload,
        },
    )
    .await?;
    await_ack(&mut stream).await?;

    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(drive_connection(sink, stream, receiver));
    Ok(sender)
}

/// Waits out the handshake: no operation may start until the server has
/// answered `connection_init` with `connection_ack`.
pub(crate) async fn await_ack<R>(stream: &mut R) -> Result<(), ClientError>
where
    R: Stream<Item = Result<Message, TungsteniteError>> + Unpin,
{
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(ServerMessage::ConnectionAck) => return Ok(()),
                    Ok(ServerMessage::ConnectionError { payload }) => {
                        return Err(ClientError::Server {
                            message: payload
                                .map(|payload| payload.to_string())
                                .unwrap_or_else(|| "the server rejected the connection".to_string()),
                        });
                    }
                    _ => {}
                }
            }
            Some(Ok(_)) => {}
            Some(Err(error)) => return Err(error.into()),
            None => {
                return Err(ClientError::ConnectionLost {
                    message: "the server closed the connection during the handshake".to_string(),
                });
            }
        }
    }
}

/// The connection driver: forwards commands out, routes frames in. Every
/// exit path that strands registered callbacks reports the loss to them.
pub(crate) async fn drive_connection<S, R>(
    mut sink: S,
    mut stream: R,
    mut commands: mpsc::UnboundedReceiver<Command>,
) where
    S: Sink<Message, Error = TungsteniteError> + Unpin,
    R: Stream<Item = Result<Message, TungsteniteError>> + Unpin,
{
    let mut subscriptions: HashMap<String, SubscriptionCallback> = HashMap::new();
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Start { callback, id, request }) => {
                    subscriptions.insert(id.clone(), callback);
                    let frame = ClientMessage::Start { id, payload: request };
                    if let Err(error) = send_frame(&mut sink, &frame).await {
                        notify_lost(&mut subscriptions, &error.to_string());
                        break;
                    }
                }
                Some(Command::Stop { id }) => {
                    subscriptions.remove(&id);
                    if let Err(error) = send_frame(&mut sink, &ClientMessage::Stop { id }).await {
                        notify_lost(&mut subscriptions, &error.to_string());
                        break;
                    }
                }
                None => {
                    let _ = send_frame(&mut sink, &ClientMessage::ConnectionTerminate).await;
                    break;
                }
            },
            incoming = stream.next() => match incoming {
                Some(Ok(frame)) => route_frame(frame, &mut subscriptions),
                Some(Err(error)) => {
                    notify_lost(&mut subscriptions, &error.to_string());
                    break;
                }
                None => {
                    notify_lost(&mut subscriptions, "the server closed the connection");
                    break;
                }
            },
        }
    }
}

pub(crate) fn route_frame(frame: Message, subscriptions: &mut HashMap<String, SubscriptionCallback>) {
    let Message::Text(text) = frame else {
        return;
    };
    let message = match serde_json::from_str::<ServerMessage>(text.as_str()) {
        Ok(message) => message,
        Err(error) => {
            tracing::warn!(%error, "discarding unparseable graphql-ws frame");
            return;
        }
    };
    match message {
        ServerMessage::Complete { id } => {
            subscriptions.remove(&id);
        }
        ServerMessage::ConnectionAck | ServerMessage::Ka => {}
        ServerMessage::ConnectionError { payload } => {
            tracing::warn!(?payload, "graphql-ws connection error");
        }
        ServerMessage::Data { id, payload } => {
            let Some(callback) = subscriptions.get_mut(&id) else {
                tracing::warn!(id, "dropping delivery for unknown subscription");
                return;
            };
            let delivery = match payload.errors.into_iter().flatten().next() {
                Some(first) => Err(ClientError::Server {
                    message: first.message,
                }),
                None => Ok(payload.data.unwrap_or(Value::Null)),
            };
            callback(delivery);
        }
        ServerMessage::Error { id, payload } => {
            if let Some(callback) = subscriptions.get_mut(&id) {
                callback(Err(ClientError::Server {
                    message: payload.to_string(),
                }));
            }
            subscriptions.remove(&id);
        }
    }
}

fn notify_lost(subscriptions: &mut HashMap<String, SubscriptionCallback>, message: &str) {
    for callback in subscriptions.values_mut() {
        callback(Err(ClientError::ConnectionLost {
            message: message.to_string(),
        }));
    }
    subscriptions.clear();
}

async fn send_frame<S>(sink: &mut S, frame: &ClientMessage) -> Result<(), ClientError>
where
    S: Sink<Message, Error = TungsteniteError> + Unpin,
{
    let text = serde_json::to_string(frame)?;
    sink.send(Message::Text(text.into())).await?;
    Ok(())
}

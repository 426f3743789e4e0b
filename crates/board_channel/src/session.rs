use std::collections::VecDeque;

use board_logging::{board_debug, board_info, board_warn};
use futures_util::{Sink, SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::connect_async;

use crate::packet::{EnginePacket, SocketPacket};
use crate::{ChannelCommand, ChannelError, ChannelEvent, ChannelSettings, EventSink};

/// Runs one channel session until either side closes it.
///
/// Emits issued before the namespace connect is acknowledged are held back and
/// go out in order right after the handshake. A close is honoured at any time.
pub async fn run_session(
    settings: &ChannelSettings,
    mut commands: UnboundedReceiver<ChannelCommand>,
    sink: &dyn EventSink,
) -> Result<(), ChannelError> {
    let url = settings.websocket_url()?;
    let connect = tokio::time::timeout(settings.connect_timeout, connect_async(url.as_str()));
    let (ws_stream, _) = connect
        .await
        .map_err(|_| ChannelError::Timeout(settings.connect_timeout))?
        .map_err(|err| ChannelError::Connect {
            url: url.clone(),
            message: err.to_string(),
        })?;
    board_info!("Channel connected to {}", url);

    let (mut writer, mut reader) = ws_stream.split();
    let mut connected = false;
    let mut pending: VecDeque<(String, Value)> = VecDeque::new();

    loop {
        tokio::select! {
            incoming = reader.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => return Ok(()),
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(ChannelError::Transport(err.to_string())),
                };
                let packet = match EnginePacket::decode(&text) {
                    Ok(packet) => packet,
                    Err(err) => {
                        board_warn!("Skipping channel packet {:?}: {}", text, err);
                        continue;
                    }
                };
                match packet {
                    EnginePacket::Open(handshake) => {
                        board_debug!(
                            "Engine session {} (ping every {} ms)",
                            handshake.sid,
                            handshake.ping_interval
                        );
                        let connect = SocketPacket::connect(settings.namespace.clone());
                        send(&mut writer, EnginePacket::Message(connect)).await?;
                    }
                    EnginePacket::Ping => send(&mut writer, EnginePacket::Pong).await?,
                    EnginePacket::Close => return Ok(()),
                    EnginePacket::Message(packet) => {
                        if packet.namespace() != settings.namespace {
                            board_debug!("Ignoring packet for namespace {}", packet.namespace());
                            continue;
                        }
                        match packet {
                            SocketPacket::Connect { data, .. } => {
                                connected = true;
                                sink.emit(ChannelEvent::Connected {
                                    sid: session_id(data.as_ref()),
                                });
                                while let Some((name, payload)) = pending.pop_front() {
                                    emit(&mut writer, &settings.namespace, name, payload).await?;
                                }
                            }
                            SocketPacket::Event { name, args, .. } => {
                                let payload = args.into_iter().next().unwrap_or(Value::Null);
                                sink.emit(ChannelEvent::Event { name, payload });
                            }
                            SocketPacket::Disconnect { .. } => return Ok(()),
                            SocketPacket::ConnectError { data, .. } => {
                                return Err(ChannelError::Rejected(data.to_string()));
                            }
                            SocketPacket::Ack { ack_id, .. } => {
                                board_debug!("Ignoring ack {}", ack_id);
                            }
                        }
                    }
                    EnginePacket::Pong | EnginePacket::Upgrade | EnginePacket::Noop => {}
                }
            }
            command = commands.recv() => match command {
                Some(ChannelCommand::Emit { name, payload }) if connected => {
                    emit(&mut writer, &settings.namespace, name, payload).await?;
                }
                Some(ChannelCommand::Emit { name, payload }) => {
                    board_debug!("Holding {} until the namespace is connected", name);
                    pending.push_back((name, payload));
                }
                Some(ChannelCommand::Close) | None => {
                    if connected {
                        let disconnect = SocketPacket::Disconnect {
                            namespace: settings.namespace.clone(),
                        };
                        send(&mut writer, EnginePacket::Message(disconnect)).await?;
                    } else if !pending.is_empty() {
                        board_warn!("Channel closed with {} unsent events", pending.len());
                    }
                    let _ = writer.close().await;
                    return Ok(());
                }
            },
        }
    }
}

async fn emit<W>(
    writer: &mut W,
    namespace: &str,
    name: String,
    payload: Value,
) -> Result<(), ChannelError>
where
    W: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    board_debug!("Emitting {}", name);
    let event = SocketPacket::event(namespace.to_string(), name, payload);
    send(writer, EnginePacket::Message(event)).await
}

async fn send<W>(writer: &mut W, packet: EnginePacket) -> Result<(), ChannelError>
where
    W: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    writer
        .send(Message::Text(packet.encode()))
        .await
        .map_err(|err| ChannelError::Transport(err.to_string()))
}

fn session_id(data: Option<&Value>) -> Option<String> {
    data.and_then(|value| value.get("sid"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

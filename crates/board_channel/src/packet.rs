//! Text packet codec for Engine.IO v4 carrying Socket.IO v5.
//!
//! An Engine.IO packet is one type digit followed by its data. Message packets
//! (`4`) wrap a Socket.IO packet: type digit, optional `/namespace,`, optional
//! ack id, optional JSON. Binary attachments are not supported.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown packet type {0:?}")]
    UnknownType(char),
    #[error("binary packets are not supported")]
    BinaryUnsupported,
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed event: {0}")]
    InvalidEvent(&'static str),
    #[error("ack packet without ack id")]
    MissingAckId,
}

/// Session parameters sent by the server in the open packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Message(SocketPacket),
    Upgrade,
    Noop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack_id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        ack_id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Value,
    },
}

impl SocketPacket {
    pub fn connect(namespace: impl Into<String>) -> Self {
        SocketPacket::Connect {
            namespace: namespace.into(),
            data: None,
        }
    }

    /// An event with a single payload argument; a `null` payload sends no arguments.
    pub fn event(namespace: impl Into<String>, name: impl Into<String>, payload: Value) -> Self {
        let args = if payload.is_null() {
            Vec::new()
        } else {
            vec![payload]
        };
        SocketPacket::Event {
            namespace: namespace.into(),
            ack_id: None,
            name: name.into(),
            args,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            SocketPacket::Connect { namespace, .. }
            | SocketPacket::Disconnect { namespace }
            | SocketPacket::Event { namespace, .. }
            | SocketPacket::Ack { namespace, .. }
            | SocketPacket::ConnectError { namespace, .. } => namespace,
        }
    }

    fn encode(&self) -> String {
        let (kind, ack_id, data) = match self {
            SocketPacket::Connect { data, .. } => ('0', None, data.clone()),
            SocketPacket::Disconnect { .. } => ('1', None, None),
            SocketPacket::Event {
                ack_id, name, args, ..
            } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', *ack_id, Some(Value::Array(items)))
            }
            SocketPacket::Ack { ack_id, args, .. } => {
                ('3', Some(*ack_id), Some(Value::Array(args.clone())))
            }
            SocketPacket::ConnectError { data, .. } => ('4', None, Some(data.clone())),
        };

        let mut out = String::new();
        out.push(kind);
        let namespace = self.namespace();
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = ack_id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = data {
            out.push_str(&data.to_string());
        }
        out
    }

    fn decode(raw: &str) -> Result<Self, PacketError> {
        let mut chars = raw.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        match kind {
            '0'..='4' => {}
            '5' | '6' => return Err(PacketError::BinaryUnsupported),
            other => return Err(PacketError::UnknownType(other)),
        }
        let rest = chars.as_str();

        let (namespace, rest) = match rest.strip_prefix('/') {
            Some(_) => match rest.split_once(',') {
                Some((namespace, tail)) => (namespace.to_string(), tail),
                None => (rest.to_string(), ""),
            },
            None => (DEFAULT_NAMESPACE.to_string(), rest),
        };

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let ack_id = if digits > 0 {
            rest[..digits].parse::<u64>().ok()
        } else {
            None
        };
        let rest = &rest[digits..];
        let data: Option<Value> = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str(rest)?)
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, data }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let Some(Value::Array(mut items)) = data else {
                    return Err(PacketError::InvalidEvent("payload is not an array"));
                };
                if items.is_empty() {
                    return Err(PacketError::InvalidEvent("missing event name"));
                }
                let Value::String(name) = items.remove(0) else {
                    return Err(PacketError::InvalidEvent("event name is not a string"));
                };
                Ok(SocketPacket::Event {
                    namespace,
                    ack_id,
                    name,
                    args: items,
                })
            }
            '3' => {
                let ack_id = ack_id.ok_or(PacketError::MissingAckId)?;
                let args = match data {
                    Some(Value::Array(items)) => items,
                    Some(other) => vec![other],
                    None => Vec::new(),
                };
                Ok(SocketPacket::Ack {
                    namespace,
                    ack_id,
                    args,
                })
            }
            '4' => Ok(SocketPacket::ConnectError {
                namespace,
                data: data.unwrap_or(Value::Null),
            }),
            _ => Err(PacketError::UnknownType(kind)),
        }
    }
}

impl EnginePacket {
    pub fn decode(raw: &str) -> Result<Self, PacketError> {
        let mut chars = raw.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let rest = chars.as_str();
        match kind {
            '0' => Ok(EnginePacket::Open(serde_json::from_str(rest)?)),
            '1' => Ok(EnginePacket::Close),
            // Probe payloads ("2probe") only occur during transport upgrades.
            '2' => Ok(EnginePacket::Ping),
            '3' => Ok(EnginePacket::Pong),
            '4' => Ok(EnginePacket::Message(SocketPacket::decode(rest)?)),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(PacketError::UnknownType(other)),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => {
                // Serializing plain strings and integers cannot fail.
                let body = serde_json::to_string(handshake).unwrap_or_default();
                format!("0{body}")
            }
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping => "2".to_string(),
            EnginePacket::Pong => "3".to_string(),
            EnginePacket::Message(packet) => format!("4{}", packet.encode()),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

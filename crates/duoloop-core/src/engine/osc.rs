//! OSC pass-through engine.
//!
//! Speaks to an external pattern server over UDP. The server owns
//! compilation, scheduling and synthesis; this client sends code and
//! relays the server's verdict. Reply waits are bounded by
//! [`REPLY_TIMEOUT`], so a silent server surfaces as an init or compile
//! failure rather than a hang.
//!
//! Wire addresses:
//! - `/status` → any reply confirms the server is up
//! - `/pattern/eval <id> <code>` → `/pattern/ok <id>` or
//!   `/pattern/error <id> <message>`
//! - `/pattern/stop <id>` (no reply)
//! - `/tempo <bpm>` (no reply)

use std::net::UdpSocket;
use std::time::Duration;

use log::{debug, warn};
use rosc::{decoder, encoder, OscMessage, OscPacket, OscType};

use super::{PatternEngine, PatternHandle};
use crate::error::{Error, Result};

/// How long to wait for the server to answer a status or eval request.
const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// UDP/OSC client for an external pattern server.
pub struct OscPatternEngine {
    sock: UdpSocket,
    addr: String,
    next_pattern_id: i32,
}

impl OscPatternEngine {
    /// Create a client targeting `addr` in "host:port" format.
    ///
    /// Binds an ephemeral local port; no traffic is sent until
    /// [`PatternEngine::init_audio`].
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let sock = UdpSocket::bind("0.0.0.0:0")?;
        sock.set_read_timeout(Some(REPLY_TIMEOUT))?;
        Ok(Self {
            sock,
            addr: addr.into(),
            next_pattern_id: 1,
        })
    }

    /// The server address this client targets.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn send(&self, path: &str, args: Vec<OscType>) -> Result<()> {
        let packet = OscPacket::Message(OscMessage {
            addr: path.into(),
            args,
        });
        let buf = encoder::encode(&packet)?;
        self.sock.send_to(&buf, &self.addr)?;
        Ok(())
    }

    fn recv(&self) -> Result<OscMessage> {
        let mut buf = [0u8; 65536];
        let (size, _) = self.sock.recv_from(&mut buf)?;
        let (_, packet) = decoder::decode_udp(&buf[..size])?;
        match packet {
            OscPacket::Message(msg) => Ok(msg),
            // Servers answer requests with single messages; a bundle here
            // means we are talking to something else.
            OscPacket::Bundle(_) => Err(Error::EngineInit(format!(
                "unexpected OSC bundle from {}",
                self.addr
            ))),
        }
    }

    fn first_string(msg: &OscMessage) -> Option<String> {
        msg.args.iter().find_map(|arg| match arg {
            OscType::String(s) => Some(s.clone()),
            _ => None,
        })
    }
}

impl PatternEngine for OscPatternEngine {
    fn init_audio(&mut self) -> Result<()> {
        self.send("/status", vec![])
            .and_then(|_| self.recv())
            .map_err(|e| {
                Error::EngineInit(format!(
                    "pattern server at {} not reachable: {e}",
                    self.addr
                ))
            })?;
        debug!("pattern server at {} answered status ping", self.addr);
        Ok(())
    }

    fn compile_and_play(&mut self, code: &str) -> Result<PatternHandle> {
        let id = self.next_pattern_id;
        self.next_pattern_id += 1;

        self.send(
            "/pattern/eval",
            vec![OscType::Int(id), OscType::String(code.to_string())],
        )?;

        // Exactly one verdict message per eval.
        let reply = self.recv()?;
        match reply.addr.as_str() {
            "/pattern/ok" => {
                debug!("pattern {id} accepted by {}", self.addr);
                Ok(PatternHandle::new(id as u64))
            }
            "/pattern/error" => {
                let message = Self::first_string(&reply)
                    .unwrap_or_else(|| "unknown compile error".to_string());
                Err(Error::Compile(message))
            }
            other => Err(Error::Compile(format!(
                "unexpected reply '{other}' from pattern server"
            ))),
        }
    }

    fn stop(&mut self, handle: PatternHandle) {
        if let Err(e) = self.send("/pattern/stop", vec![OscType::Int(handle.raw() as i32)]) {
            warn!("failed to send stop for pattern {}: {e}", handle.raw());
        }
    }

    fn set_tempo(&mut self, bpm: f64) -> Result<()> {
        self.send("/tempo", vec![OscType::Float(bpm as f32)])
    }
}

impl std::fmt::Debug for OscPatternEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OscPatternEngine")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Loopback server answering each request with a canned reply.
    fn spawn_server(replies: Vec<(&'static str, Vec<OscType>)>) -> (String, thread::JoinHandle<Vec<OscMessage>>) {
        let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = sock.local_addr().unwrap().to_string();
        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for (reply_addr, reply_args) in replies {
                let mut buf = [0u8; 65536];
                let (size, from) = sock.recv_from(&mut buf).unwrap();
                let (_, packet) = decoder::decode_udp(&buf[..size]).unwrap();
                if let OscPacket::Message(msg) = packet {
                    received.push(msg);
                }
                let reply = OscPacket::Message(OscMessage {
                    addr: reply_addr.to_string(),
                    args: reply_args,
                });
                let bytes = encoder::encode(&reply).unwrap();
                sock.send_to(&bytes, from).unwrap();
            }
            received
        });
        (addr, handle)
    }

    #[test]
    fn test_init_audio_pings_server() {
        let (addr, server) = spawn_server(vec![("/status.reply", vec![OscType::Int(1)])]);
        let mut engine = OscPatternEngine::new(addr).unwrap();
        engine.init_audio().unwrap();
        let received = server.join().unwrap();
        assert_eq!(received[0].addr, "/status");
    }

    #[test]
    fn test_init_audio_fails_when_server_silent() {
        // Bound but never answered: the read timeout converts silence
        // into a retryable init error.
        let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = silent.local_addr().unwrap().to_string();
        let mut engine = OscPatternEngine::new(addr).unwrap();
        match engine.init_audio() {
            Err(Error::EngineInit(msg)) => assert!(msg.contains("not reachable")),
            other => panic!("expected EngineInit error, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_ok_reply_yields_handle() {
        let (addr, server) = spawn_server(vec![("/pattern/ok", vec![OscType::Int(1)])]);
        let mut engine = OscPatternEngine::new(addr).unwrap();
        let handle = engine.compile_and_play("note(\"c2\").slow(4)").unwrap();
        assert_eq!(handle.raw(), 1);
        let received = server.join().unwrap();
        assert_eq!(received[0].addr, "/pattern/eval");
        assert!(matches!(&received[0].args[1], OscType::String(code) if code.contains("c2")));
    }

    #[test]
    fn test_compile_error_reply_surfaces_message() {
        let (addr, _server) = spawn_server(vec![(
            "/pattern/error",
            vec![OscType::Int(1), OscType::String("unexpected token ')'".into())],
        )]);
        let mut engine = OscPatternEngine::new(addr).unwrap();
        match engine.compile_and_play("note(") {
            Err(Error::Compile(msg)) => assert_eq!(msg, "unexpected token ')'"),
            other => panic!("expected Compile error, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_reply_is_a_compile_failure() {
        let (addr, _server) = spawn_server(vec![("/banana", vec![])]);
        let mut engine = OscPatternEngine::new(addr).unwrap();
        match engine.compile_and_play("note(\"c2\")") {
            Err(Error::Compile(msg)) => assert!(msg.contains("/banana")),
            other => panic!("expected Compile error, got {other:?}"),
        }
    }

    #[test]
    fn test_eval_ids_increase() {
        let (addr, server) = spawn_server(vec![
            ("/pattern/ok", vec![OscType::Int(1)]),
            ("/pattern/ok", vec![OscType::Int(2)]),
        ]);
        let mut engine = OscPatternEngine::new(addr).unwrap();
        let first = engine.compile_and_play("a").unwrap();
        let second = engine.compile_and_play("b").unwrap();
        assert!(second.raw() > first.raw());
        server.join().unwrap();
    }
}

//! TCP/TLS connection setup and line framing.

use std::sync::Arc;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_util::codec::{Decoder, Encoder, Framed, LinesCodec, LinesCodecError};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ClientError;

/// Longest accepted line: 512 bytes of message plus 8191 bytes of IRCv3 tags.
pub const MAX_LINE_LEN: usize = 512 + 8191;

/// Byte stream the connection runs over (plain TCP or TLS).
pub trait AsyncStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> AsyncStream for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// IRC line codec.
///
/// Decodes LF or CRLF terminated lines and writes CRLF. A line longer than
/// the limit is dropped inside the decoder, so the stream carries on with the
/// next line instead of yielding an error.
#[derive(Debug, Clone)]
pub struct IrcLineCodec {
    inner: LinesCodec,
}

impl IrcLineCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LEN)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn skip_overlong(
        &mut self,
        buf: &mut BytesMut,
        decode: fn(&mut LinesCodec, &mut BytesMut) -> Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<String>, LinesCodecError> {
        loop {
            match decode(&mut self.inner, buf) {
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!(limit = self.inner.max_length(), "Discarding overlong line");
                }
                other => return other,
            }
        }
    }
}

impl Default for IrcLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for IrcLineCodec {
    type Item = String;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        self.skip_overlong(buf, LinesCodec::decode)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        self.skip_overlong(buf, LinesCodec::decode_eof)
    }
}

impl<T: AsRef<str>> Encoder<T> for IrcLineCodec {
    type Error = LinesCodecError;

    fn encode(&mut self, line: T, buf: &mut BytesMut) -> Result<(), LinesCodecError> {
        let line = line.as_ref();
        buf.reserve(line.len() + 2);
        buf.put_slice(line.as_bytes());
        buf.put_slice(b"\r\n");
        Ok(())
    }
}

/// A line-framed connection to the IRC server.
pub type Connection = Framed<Box<dyn AsyncStream>, IrcLineCodec>;

/// Wrap an established stream in the line codec.
pub fn framed<S: AsyncStream + 'static>(stream: S) -> Connection {
    Framed::new(Box::new(stream) as Box<dyn AsyncStream>, IrcLineCodec::new())
}

/// Open a connection to the configured server.
pub async fn connect(server: &ServerConfig) -> Result<Connection, ClientError> {
    let port = server.port();
    let tcp = TcpStream::connect((server.host.as_str(), port)).await?;
    if let Err(e) = tcp.set_nodelay(true) {
        warn!(error = %e, "Failed to set TCP_NODELAY");
    }

    let conn = if server.tls {
        framed(upgrade_to_tls(tcp, &server.host).await?)
    } else {
        framed(tcp)
    };
    info!(host = %server.host, port, tls = server.tls, "Connected to IRC server");
    Ok(conn)
}

/// Upgrades a TCP stream to TLS, verifying against the system root store.
pub async fn upgrade_to_tls(
    tcp_stream: TcpStream,
    hostname: &str,
) -> Result<TlsStream<TcpStream>, ClientError> {
    let mut roots = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs();
    for cert in certs.certs {
        if let Err(e) = roots.add(cert) {
            warn!("Failed to add root cert: {}", e);
        }
    }
    for e in &certs.errors {
        warn!("Error loading native certs: {}", e);
    }

    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));
    let server_name = ServerName::try_from(hostname.to_string())?;

    let tls_stream = connector.connect(server_name, tcp_stream).await?;
    info!(hostname = %hostname, "TLS handshake completed");
    Ok(tls_stream)
}

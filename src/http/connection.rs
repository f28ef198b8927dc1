use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::parser::{ParseError, find_headers_end, parse_http_request, request_line_of};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::ServerContext;
use crate::static_files;

const READ_CHUNK: usize = 4096;

pub struct Connection<S> {
    stream: S,
    peer: String,
    buffer: BytesMut,
    state: ConnectionState,
    ctx: Arc<ServerContext>,
}

pub enum ConnectionState {
    AwaitingRequest,
    /// Parse result, or the failure plus the raw request line for logging
    RequestParsed(Result<Request, (ParseError, String)>),
    Responding {
        writer: ResponseWriter,
        keep_alive: bool,
        request_line: String,
        status: StatusCode,
    },
    Closed,
}

enum ReadOutcome {
    Block(Bytes),
    TooLarge(String),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: impl Into<String>, ctx: Arc<ServerContext>) -> Self {
        Self {
            stream,
            peer: peer.into(),
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::AwaitingRequest,
            ctx,
        }
    }

    /// Serves requests in arrival order until the connection closes.
    ///
    /// A failed write abandons the connection and is returned as an error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::AwaitingRequest => {
                    self.state = match self.read_header_block().await? {
                        ReadOutcome::Block(block) => {
                            let parsed = parse_http_request(&block)
                                .map_err(|e| (e, request_line_of(&block)));
                            ConnectionState::RequestParsed(parsed)
                        }
                        ReadOutcome::TooLarge(line) => ConnectionState::RequestParsed(Err((
                            ParseError::HeaderTooLarge,
                            line,
                        ))),
                        ReadOutcome::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::RequestParsed(parsed) => {
                    let (response, request_line) = match parsed {
                        Ok(req) => {
                            let response = self.handle_request(&req).await;
                            (response, req.request_line)
                        }
                        Err((e, line)) => {
                            tracing::debug!(peer = %self.peer, error = %e, "rejected request");
                            let mut response = Response::error(e.status());
                            response.set_keep_alive(false);
                            (response, line)
                        }
                    };

                    self.state = ConnectionState::Responding {
                        keep_alive: response.keep_alive(),
                        status: response.status,
                        writer: ResponseWriter::new(response),
                        request_line,
                    };
                }

                ConnectionState::Responding {
                    mut writer,
                    keep_alive,
                    request_line,
                    status,
                } => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.ctx
                        .access_log
                        .record(&self.peer, &request_line, status);

                    if keep_alive {
                        self.state = ConnectionState::AwaitingRequest;
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        tracing::debug!(peer = %self.peer, "closing connection");
        // The peer may already be gone.
        let _ = self.stream.shutdown().await;
        Ok(())
    }

    async fn handle_request(&self, req: &Request) -> Response {
        let outcome = self.ctx.resolver.resolve(&req.path).await;
        let mut response = static_files::respond(req, outcome).await;

        let keep_alive = req.keep_alive() && !response.status.is_fatal();
        response.set_keep_alive(keep_alive);

        if req.is_head() {
            response = response.into_head();
        }
        response
    }

    /// Reads until one full header block is buffered and splits it off.
    ///
    /// Bytes after the block stay buffered for the next request, which is
    /// what makes pipelining work.
    async fn read_header_block(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            if let Some(end) = find_headers_end(&self.buffer) {
                let block = self.buffer.split_to(end + 4).freeze();
                return Ok(ReadOutcome::Block(block));
            }

            if self.buffer.len() > self.ctx.max_header_bytes {
                let line = request_line_of(&self.buffer);
                self.buffer.clear();
                return Ok(ReadOutcome::TooLarge(line));
            }

            self.buffer.reserve(READ_CHUNK);
            let read = timeout(
                self.ctx.keep_alive_timeout,
                self.stream.read_buf(&mut self.buffer),
            )
            .await;

            let n = match read {
                Ok(n) => n?,
                Err(_) => {
                    tracing::debug!(peer = %self.peer, "read timed out");
                    return Ok(ReadOutcome::Closed);
                }
            };

            if n == 0 {
                // Client closed connection
                return Ok(ReadOutcome::Closed);
            }
        }
    }
}

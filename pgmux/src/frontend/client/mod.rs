//! Client connection, as seen by the prepared statements layer.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

use super::{ClientStatements, Error};
use crate::backend::{Released, Server};
use crate::config::config;
use crate::net::{
    Bind, Close, Describe, ErrorResponse, FromBytes, Message, Parse, Protocol, Stream,
};
use crate::stats::Stats;

pub mod bind;
pub mod close;
pub mod describe;
pub mod parse;

/// One client connection.
#[derive(Debug)]
pub struct Client<S> {
    stream: Stream<S>,
    prepared_statements: ClientStatements,
    enabled: bool,
    stats: Stats,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Wrap a connected client socket. Prepared statements
    /// are handled if the configuration enables them.
    pub fn new(stream: S, stats: Stats) -> Self {
        let enabled = config().general.prepared_statements.enabled();
        Self::with_enabled(stream, enabled, stats)
    }

    pub fn with_enabled(stream: S, enabled: bool, stats: Stats) -> Self {
        Self {
            stream: Stream::new(stream),
            prepared_statements: ClientStatements::default(),
            enabled,
            stats,
        }
    }

    /// Statements this client prepared.
    pub fn prepared_statements(&self) -> &ClientStatements {
        &self.prepared_statements
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Read one message from the client.
    pub async fn read(&mut self) -> Result<Message, Error> {
        Ok(self.stream.read().await?)
    }

    /// Queue a message for the client.
    pub async fn send(&mut self, message: &impl Protocol) -> Result<(), Error> {
        self.stream.send(message).await?;
        Ok(())
    }

    /// Send a message to the client immediately.
    pub async fn send_flush(&mut self, message: &impl Protocol) -> Result<(), Error> {
        self.stream.send_flush(message).await?;
        Ok(())
    }

    /// Handle a message from the client, sending whatever it turns
    /// into to the server it's currently linked to.
    pub async fn handle<T>(&mut self, server: &mut Server<T>, message: Message) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        if !self.enabled {
            return self.forward(server, message).await;
        }

        match message.code() {
            'P' => self.parse(server, Parse::from_bytes(message.payload())?).await,

            'B' => self.bind(server, Bind::from_bytes(message.payload())?).await,

            'D' => {
                let describe = Describe::from_bytes(message.payload())?;
                if describe.is_statement() {
                    self.describe(server, describe).await
                } else {
                    self.forward(server, message).await
                }
            }

            'C' => {
                let close = Close::from_bytes(message.payload())?;
                if close.is_statement() {
                    self.close(close).await
                } else {
                    self.forward(server, message).await
                }
            }

            _ => self.forward(server, message).await,
        }
    }

    /// Send the message to the server as-is.
    async fn forward<T>(&mut self, server: &mut Server<T>, message: Message) -> Result<(), Error>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        match message.code() {
            'P' => {
                let parse = Parse::from_bytes(message.payload())?;
                server.state_mut().add_parse(parse.name(), false);
            }
            'C' => server.state_mut().add_close(false),
            'S' => server.state_mut().add_sync(),
            'Q' => server.state_mut().add_query(),
            _ => (),
        }

        match message.code() {
            'S' | 'H' | 'Q' => server.send_flush(&message).await?,
            _ => server.send(&message).await?,
        }

        Ok(())
    }

    /// Client used a statement it never prepared. Tell it
    /// and return the error that closes the connection.
    async fn missing(&mut self, name: &str) -> Error {
        warn!("prepared statement \"{}\" not found", name);

        let error = ErrorResponse::missing_prepared_statement(name);
        match self.stream.fatal(error).await {
            Ok(()) => Error::MissingPreparedStatement(name.to_owned()),
            Err(err) => err.into(),
        }
    }

    /// Client is gone. Drop all its statements.
    pub fn teardown(mut self) -> Released {
        let statements = self.prepared_statements.clear();
        debug!("client disconnected, dropped {} statements", statements);

        Released {
            statements,
            outstanding: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use tokio::io::{duplex, DuplexStream};

    use super::*;
    use crate::backend::server::test::server;
    use crate::frontend::ErrorKind;
    use crate::net::{CloseComplete, Flush, ParseComplete, Payload, ReadyForQuery, Sync, ToBytes};

    fn client(enabled: bool) -> (Client<DuplexStream>, Stream<DuplexStream>) {
        let (a, b) = duplex(64 * 1024);
        (Client::with_enabled(a, enabled, Stats::new()), Stream::new(b))
    }

    fn message(protocol: impl Protocol) -> Message {
        Message::new(protocol.to_bytes().unwrap())
    }

    async fn read_parse(stream: &mut Stream<DuplexStream>) -> Parse {
        Parse::from_bytes(stream.read().await.unwrap().payload()).unwrap()
    }

    #[tokio::test]
    async fn test_parse_miss_forwards_renamed() {
        let (mut client, mut frontend) = client(true);
        let (mut server, mut backend) = server(10);

        client
            .handle(&mut server, message(Parse::named("__sqlx_1", "SELECT 1")))
            .await
            .unwrap();
        client.handle(&mut server, message(Sync)).await.unwrap();

        let parse = read_parse(&mut backend).await;
        assert_eq!(parse.name(), "B_0");
        assert_eq!(parse.query(), "SELECT 1");
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        backend.send(&ParseComplete).await.unwrap();
        backend.send_flush(&ReadyForQuery::idle()).await.unwrap();

        // Client asked for this Parse, so it sees the ParseComplete.
        for code in ['1', 'Z'] {
            let reply = server.read().await.unwrap();
            assert_eq!(reply.code(), code);
            client.send_flush(&reply).await.unwrap();
            assert_eq!(frontend.read().await.unwrap().code(), code);
        }

        assert!(server.state().done());
        assert_eq!(
            client.prepared_statements().lookup("__sqlx_1").unwrap().query(),
            "SELECT 1"
        );
    }

    #[tokio::test]
    async fn test_parse_hit_not_sent_to_server() {
        let (mut first, _first_frontend) = client(true);
        let (mut second, mut second_frontend) = client(true);
        let (mut server, mut backend) = server(10);

        first
            .handle(&mut server, message(Parse::named("a", "SELECT 1")))
            .await
            .unwrap();
        second
            .handle(&mut server, message(Parse::named("b", "SELECT 1")))
            .await
            .unwrap();
        second.handle(&mut server, message(Sync)).await.unwrap();

        assert_eq!(second_frontend.read().await.unwrap().code(), '1');

        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        assert_eq!(backend.read().await.unwrap().code(), 'S');
        assert_eq!(server.prepared_statements().len(), 1);

        let counts = server.stats().counts();
        assert_eq!(counts.server_parse, 1);
        assert_eq!(first.stats().counts().client_parse, 1);
        assert_eq!(second.stats().counts().cache_hits, 1);
    }

    #[tokio::test]
    async fn test_bind_prepares_on_new_server() {
        let (mut client, mut frontend) = client(true);
        let (mut old, _old_backend) = server(10);
        let (mut server, mut backend) = server(10);

        client
            .handle(&mut old, message(Parse::named("__sqlx_1", "SELECT $1")))
            .await
            .unwrap();

        // Client moved to another server connection.
        let bind = Bind::new_params("__sqlx_1", &[Some(&b"5"[..])]).unwrap();
        client
            .handle(&mut server, message(bind.clone()))
            .await
            .unwrap();
        client.handle(&mut server, message(Sync)).await.unwrap();

        let parse = read_parse(&mut backend).await;
        assert_eq!(parse.name(), "B_0");
        assert_eq!(parse.query(), "SELECT $1");

        let rewritten = Bind::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(rewritten.statement(), "B_0");
        assert_eq!(rewritten.tail(), bind.tail());
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        backend.send(&ParseComplete).await.unwrap();
        let bind_complete = Message::new(Payload::named('2').freeze());
        backend.send(&bind_complete).await.unwrap();
        backend.send_flush(&ReadyForQuery::idle()).await.unwrap();

        // ParseComplete is hidden from the client.
        for code in ['2', 'Z'] {
            let reply = server.read().await.unwrap();
            assert_eq!(reply.code(), code);
            client.send_flush(&reply).await.unwrap();
            assert_eq!(frontend.read().await.unwrap().code(), code);
        }
        assert!(server.state().done());
    }

    #[tokio::test]
    async fn test_bind_dedup_by_query() {
        let (mut first, _first_frontend) = client(true);
        let (mut second, _second_frontend) = client(true);
        let (mut old, _old_backend) = server(10);
        let (mut server, mut backend) = server(10);

        first
            .handle(&mut old, message(Parse::named("a", "SELECT 1")))
            .await
            .unwrap();
        second
            .handle(&mut old, message(Parse::named("b", "SELECT 1")))
            .await
            .unwrap();

        first
            .handle(&mut server, message(Bind::new_statement("a")))
            .await
            .unwrap();
        second
            .handle(&mut server, message(Bind::new_statement("b")))
            .await
            .unwrap();
        second.handle(&mut server, message(Sync)).await.unwrap();

        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        for _ in 0..2 {
            let bind = Bind::from_bytes(backend.read().await.unwrap().payload()).unwrap();
            assert_eq!(bind.statement(), "B_0");
        }
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        assert_eq!(server.prepared_statements().len(), 1);
        assert_eq!(server.prepared_statements().iter().next().unwrap().binds, 2);
    }

    #[tokio::test]
    async fn test_bind_unknown_statement() {
        let (mut client, mut frontend) = client(true);
        let (mut server, _backend) = server(10);

        let err = client
            .handle(&mut server, message(Bind::new_statement("__sqlx_9")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientProtocol);

        let error = ErrorResponse::from_bytes(frontend.read().await.unwrap().payload()).unwrap();
        assert_eq!(error.severity, "FATAL");
        assert_eq!(
            error.message,
            "prepared statement \"__sqlx_9\" does not exist"
        );
        assert!(server.state().is_empty());
    }

    #[tokio::test]
    async fn test_describe_rewritten() {
        let (mut client, _frontend) = client(true);
        let (mut server, mut backend) = server(10);

        client
            .handle(&mut server, message(Parse::named("__sqlx_1", "SELECT 1")))
            .await
            .unwrap();
        client
            .handle(&mut server, message(Describe::new_statement("__sqlx_1")))
            .await
            .unwrap();

        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        let describe = Describe::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(describe, Describe::new_statement("B_0"));
    }

    #[tokio::test]
    async fn test_describe_not_on_server() {
        let (mut client, _frontend) = client(true);
        let (mut old, _old_backend) = server(10);
        let (mut server, _backend) = server(10);

        client
            .handle(&mut old, message(Parse::named("__sqlx_1", "SELECT 1")))
            .await
            .unwrap();

        let err = client
            .handle(&mut server, message(Describe::new_statement("__sqlx_1")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invariant);
        match err {
            Error::ServerStatementMissing { name, query } => {
                assert_eq!(name, "__sqlx_1");
                assert_eq!(query, "SELECT 1");
            }
            err => panic!("unexpected error: {}", err),
        }
    }

    #[tokio::test]
    async fn test_close_keeps_server_statement() {
        let (mut client, mut frontend) = client(true);
        let (mut server, _backend) = server(10);

        client
            .handle(&mut server, message(Parse::named("a", "SELECT 1")))
            .await
            .unwrap();
        client
            .handle(&mut server, message(Close::named("a")))
            .await
            .unwrap();

        assert_eq!(frontend.read().await.unwrap().code(), '3');
        assert!(client.prepared_statements().is_empty());
        assert_eq!(server.prepared_statements().name("SELECT 1"), Some("B_0"));

        // Unknown statement, still acknowledged.
        client
            .handle(&mut server, message(Close::named("b")))
            .await
            .unwrap();
        assert!(CloseComplete::from_bytes(frontend.read().await.unwrap().payload()).is_ok());

        // Only the Parse is outstanding, nothing was sent for the Closes.
        assert_eq!(server.state().len(), 1);
    }

    #[tokio::test]
    async fn test_portal_close_forwarded() {
        let (mut client, _frontend) = client(true);
        let (mut server, mut backend) = server(10);

        client
            .handle(&mut server, message(Close::portal("")))
            .await
            .unwrap();
        client.handle(&mut server, message(Flush)).await.unwrap();

        let close = Close::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(close.kind(), 'P');
        assert_eq!(backend.read().await.unwrap().code(), 'H');

        backend.send_flush(&CloseComplete).await.unwrap();
        assert_eq!(server.read().await.unwrap().code(), '3');
        assert!(server.state().done());
    }

    #[tokio::test]
    async fn test_parse_evicts_lru() {
        let (mut client, _frontend) = client(true);
        let (mut server, mut backend) = server(1);

        client
            .handle(&mut server, message(Parse::named("a", "SELECT 1")))
            .await
            .unwrap();
        client
            .handle(&mut server, message(Parse::named("b", "SELECT 2")))
            .await
            .unwrap();

        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        let close = Close::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(close, Close::named("B_0"));

        client.handle(&mut server, message(Sync)).await.unwrap();
        assert_eq!(read_parse(&mut backend).await.name(), "B_1");
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        // Both client statements survive, only the server forgot one.
        assert_eq!(client.prepared_statements().len(), 2);
        assert_eq!(server.prepared_statements().len(), 1);
    }

    #[tokio::test]
    async fn test_bind_recency_decides_eviction() {
        let (mut client, _frontend) = client(true);
        let (mut server, mut backend) = server(2);

        for (name, query) in [("a", "SELECT 1"), ("b", "SELECT 2")] {
            client
                .handle(&mut server, message(Parse::named(name, query)))
                .await
                .unwrap();
        }
        client
            .handle(&mut server, message(Bind::new_statement("a")))
            .await
            .unwrap();
        client
            .handle(&mut server, message(Parse::named("c", "SELECT 3")))
            .await
            .unwrap();
        client.handle(&mut server, message(Sync)).await.unwrap();

        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        assert_eq!(read_parse(&mut backend).await.name(), "B_1");
        let bind = Bind::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(bind.statement(), "B_0");
        let close = Close::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(close, Close::named("B_1"));
        let parse = read_parse(&mut backend).await;
        assert_eq!(parse.name(), "B_2");
        assert_eq!(parse.query(), "SELECT 3");
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        let queries: Vec<_> = server
            .prepared_statements()
            .iter()
            .map(|statement| statement.query.as_str())
            .collect();
        assert_eq!(queries, vec!["SELECT 1", "SELECT 3"]);
    }

    #[tokio::test]
    async fn test_query_error_keeps_pipelined_parse() {
        let (mut client, _frontend) = client(true);
        let (mut server, mut backend) = server(10);

        let mut query = Payload::named('Q');
        query.put_string("SELECT bad");
        let query = Message::new(query.freeze());

        client.handle(&mut server, query).await.unwrap();
        client
            .handle(&mut server, message(Parse::named("x", "SELECT 1")))
            .await
            .unwrap();
        client.handle(&mut server, message(Sync)).await.unwrap();

        assert_eq!(backend.read().await.unwrap().code(), 'Q');
        assert_eq!(read_parse(&mut backend).await.name(), "B_0");
        assert_eq!(backend.read().await.unwrap().code(), 'S');

        backend.send(&ErrorResponse::default()).await.unwrap();
        backend.send(&ReadyForQuery::idle()).await.unwrap();
        backend.send(&ParseComplete).await.unwrap();
        backend.send_flush(&ReadyForQuery::idle()).await.unwrap();

        for code in ['E', 'Z', '1', 'Z'] {
            assert_eq!(server.read().await.unwrap().code(), code);
        }

        assert!(server.state().done());
        assert_eq!(server.prepared_statements().name("SELECT 1"), Some("B_0"));
    }

    #[tokio::test]
    async fn test_disabled_forwards_untouched() {
        let (mut client, _frontend) = client(false);
        let (mut server, mut backend) = server(10);

        client
            .handle(&mut server, message(Parse::named("__sqlx_1", "SELECT 1")))
            .await
            .unwrap();
        client
            .handle(&mut server, message(Bind::new_statement("__sqlx_1")))
            .await
            .unwrap();
        client.handle(&mut server, message(Sync)).await.unwrap();

        assert_eq!(read_parse(&mut backend).await.name(), "__sqlx_1");
        let bind = Bind::from_bytes(backend.read().await.unwrap().payload()).unwrap();
        assert_eq!(bind.statement(), "__sqlx_1");

        assert!(client.prepared_statements().is_empty());
        assert!(server.prepared_statements().is_empty());

        backend.send(&ParseComplete).await.unwrap();
        backend.send_flush(&ReadyForQuery::idle()).await.unwrap();
        assert_eq!(server.read().await.unwrap().code(), '1');
        assert_eq!(server.read().await.unwrap().code(), 'Z');
    }

    #[tokio::test]
    async fn test_teardown() {
        let (mut client, _frontend) = client(true);
        let (mut server, _backend) = server(10);

        for (name, query) in [("a", "SELECT 1"), ("b", "SELECT 2")] {
            client
                .handle(&mut server, message(Parse::named(name, query)))
                .await
                .unwrap();
        }

        assert_eq!(client.teardown().statements, 2);
        assert_eq!(server.teardown().statements, 2);
    }
}

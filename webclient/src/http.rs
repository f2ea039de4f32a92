use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;

pub use ::reqwest::{Error, IntoUrl, Request, Response, StatusCode};

use crate::model::SessionContext;

/// Thin wrapper around `reqwest::Client` that stamps every request with the
/// session's bearer token.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    session: SessionContext,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

macro_rules! emit_request_fn {
    ($method:ident) => {
        pub fn $method(&self, u: impl IntoUrl) -> RequestBuilder {
            RequestBuilder::new(self.inner.$method(u), self.clone())
        }
    };
}

impl Client {
    pub fn new(session: SessionContext) -> Self {
        Self {
            // gzip is on by default with the crate feature enabled
            inner: ::reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn set_session(&mut self, session: SessionContext) {
        self.session = session;
    }

    emit_request_fn!(get);
    emit_request_fn!(post);

    pub(super) async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        log::debug!("{} {}", req.method(), req.url());
        self.inner.execute(req).await
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        let b = b.header(ACCEPT, "*/*");
        let b = match client.session.bearer() {
            Some(bearer) => b.header(AUTHORIZATION, bearer),
            None => b,
        };
        Self { inner: b, client }
    }

    pub fn build(self) -> Result<Request, Error> {
        self.inner.build()
    }

    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }

    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }
}

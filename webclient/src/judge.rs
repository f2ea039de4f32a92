use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::*, http, model::*, util};

macro_rules! bail {
    ($e:expr) => {
        return Err($e.into())
    };
}

/// Operations the judging backend offers to this client.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// `POST /code/run` with exactly one input. One round trip, no retry.
    async fn run_code(&self, code: &str, language: &str, input: &str) -> Result<RawRunResponse>;

    /// `POST /code/submit`. Judging happens asynchronously on the backend.
    async fn submit(
        &self,
        problem_id: &ProblemId,
        code: &str,
        language: &str,
    ) -> Result<SubmissionReceipt>;

    /// `GET /problem/{id}`
    async fn fetch_problem(&self, problem_id: &ProblemId) -> Result<ProblemInfo>;

    /// `GET /problem/{id}/test-cases`
    async fn fetch_testcases(&self, problem_id: &ProblemId) -> Result<Vec<Testcase>>;
}

pub struct JudgeClient {
    http: http::Client,
    base_url: Url,
}

impl JudgeClient {
    pub fn new(base_url: Url, session: SessionContext) -> Self {
        Self {
            http: http::Client::new(session),
            base_url,
        }
    }

    pub fn new_with_parse_url(base_url: &str, session: SessionContext) -> Result<Self> {
        let base_url = util::parse_url(base_url)?;
        Ok(Self::new(base_url, session))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        self.http.session()
    }

    pub fn set_session(&mut self, session: SessionContext) {
        self.http.set_session(session)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        util::join_path(&self.base_url, path)
    }

    /// Normalize a `/code/run` response body.
    ///
    /// Success is judged on parseability: an envelope carrying `data` is
    /// returned even when `code` is not 200, so the backend `message` reaches
    /// the classifier. Only a non-200 envelope without `data` is rejected.
    pub fn decode_run_envelope(status: StatusCode, body: &str) -> Result<RawRunResponse> {
        let envelope: RawRunResponse = serde_json::from_str(body)?;
        if envelope.data.is_some() || envelope.is_ok() {
            return Ok(envelope);
        }
        log::debug!("Run rejected: http={} code={}", status, envelope.code);
        Err(Error::BackendRejected {
            code: envelope.code,
            message: envelope.message.unwrap_or_else(|| "run failed".to_owned()),
        })
    }

    /// Decode `{ code: 200, data }` into `data`.
    pub fn decode_data<T: DeserializeOwned>(
        status: StatusCode,
        body: &str,
        requested_url: &str,
    ) -> Result<T> {
        let envelope: Envelope<Value> = serde_json::from_str(body)?;
        if !status.is_success() || !envelope.is_ok() {
            bail!(Error::BackendRejected {
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("request failed ({})", status)),
            });
        }
        match envelope.data {
            None | Some(Value::Null) => Err(Error::EmptyPayload {
                requested_url: requested_url.to_owned(),
            }),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Self::decode_data(status, &body, url.as_str())
    }
}

#[async_trait]
impl JudgeBackend for JudgeClient {
    async fn run_code(&self, code: &str, language: &str, input: &str) -> Result<RawRunResponse> {
        let url = self.endpoint("/code/run")?;
        let resp = self
            .http
            .post(url)
            .json(&RunRequest {
                code,
                language,
                input,
            })
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        Self::decode_run_envelope(status, &body)
    }

    async fn submit(
        &self,
        problem_id: &ProblemId,
        code: &str,
        language: &str,
    ) -> Result<SubmissionReceipt> {
        let url = self.endpoint("/code/submit")?;
        let resp = self
            .http
            .post(url.clone())
            .json(&SubmitRequest {
                problem_id: problem_id.as_str(),
                code,
                language,
            })
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        Self::decode_data(status, &body, url.as_str())
    }

    async fn fetch_problem(&self, problem_id: &ProblemId) -> Result<ProblemInfo> {
        self.get_data(&format!("/problem/{}", problem_id)).await
    }

    async fn fetch_testcases(&self, problem_id: &ProblemId) -> Result<Vec<Testcase>> {
        self.get_data(&format!("/problem/{}/test-cases", problem_id))
            .await
    }
}

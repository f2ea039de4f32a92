use judge_webclient::{problem_id, JudgeBackend, ProblemId, SubmissionReceipt};

pub type Result<T> = std::result::Result<T, SubmitError>;

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Cannot determine which problem is being solved from '{path}'")]
    MissingContext {
        path: String,

        #[source]
        source: problem_id::Error,
    },

    #[error("Failed to reach the judging backend: {0}")]
    Transport(#[source] judge_webclient::Error),

    #[error("{message}")]
    BackendRejected { code: i64, message: String },

    #[error("Unexpected response from the judging backend: {0}")]
    Unknown(#[source] judge_webclient::Error),
}

impl From<judge_webclient::Error> for SubmitError {
    fn from(e: judge_webclient::Error) -> Self {
        use judge_webclient::Error::*;
        match e {
            BackendRejected { code, message } => SubmitError::BackendRejected { code, message },
            e if e.is_transport() => SubmitError::Transport(e),
            e => SubmitError::Unknown(e),
        }
    }
}

/// Submit for full evaluation on the backend. Nothing is judged locally.
pub async fn submit<B>(
    backend: &B,
    problem_id: &ProblemId,
    code: &str,
    language: &str,
) -> Result<SubmissionReceipt>
where
    B: JudgeBackend + ?Sized,
{
    log::info!("Submitting to problem {} ({})", problem_id, language);
    let receipt = backend.submit(problem_id, code, language).await?;
    log::info!("Accepted as submission {}", receipt.submission_id);
    Ok(receipt)
}

/// Like [`submit`], deriving the problem from a `/problems/:id/solve` path.
pub async fn submit_from_route<B>(
    backend: &B,
    route_path: &str,
    code: &str,
    language: &str,
) -> Result<SubmissionReceipt>
where
    B: JudgeBackend + ?Sized,
{
    let problem_id =
        ProblemId::from_route_path(route_path).map_err(|source| SubmitError::MissingContext {
            path: route_path.to_owned(),
            source,
        })?;
    self::submit(backend, &problem_id, code, language).await
}

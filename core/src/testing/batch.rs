use std::sync::Arc;

use judge_webclient::{JudgeBackend, Testcase};

use super::{
    state::{BatchResult, ExecutionState},
    verdict::{classify, message, CaseVerdict},
};

/// Drives remote runs and publishes their outcome to an [`ExecutionState`].
///
/// Cases are run strictly one after another, in input order. A failure of
/// one case becomes that case's verdict and never aborts the batch.
pub struct BatchRunner<B> {
    backend: B,
    state: Arc<ExecutionState>,
}

impl<B: JudgeBackend> BatchRunner<B> {
    pub fn new(backend: B) -> Self {
        Self::with_state(backend, Arc::new(ExecutionState::new()))
    }

    pub fn with_state(backend: B, state: Arc<ExecutionState>) -> Self {
        Self { backend, state }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &Arc<ExecutionState> {
        &self.state
    }

    async fn run_case(&self, code: &str, language: &str, input: &str, expected: &str) -> CaseVerdict {
        match self.backend.run_code(code, language, input).await {
            Ok(raw) => classify(&raw, expected),
            Err(e) => {
                log::warn!("Run request failed: {:#}", e);
                CaseVerdict::transport_error(&e)
            }
        }
    }

    /// Run every test case and return the final batch.
    ///
    /// With no test cases nothing is published and an `Error` batch is
    /// returned to the caller only.
    pub async fn run_batch(&self, code: &str, language: &str, testcases: &[Testcase]) -> BatchResult {
        if testcases.is_empty() {
            log::error!("No test cases to run");
            return BatchResult::error(message::NO_TESTCASES);
        }

        let gen = self.state.begin_batch(testcases.len());
        log::info!("Running {} test case(s) in {}", testcases.len(), language);

        let mut result = BatchResult::running(testcases.len());
        for (i, t) in testcases.iter().enumerate() {
            let verdict = self
                .run_case(code, language, &t.input, &t.expected_output)
                .await;
            log::debug!("Case #{}: {}", i + 1, verdict.verdict);

            if i == 0 {
                self.state.publish_quick_view(gen, verdict.clone());
            }
            self.state.publish_case(gen, verdict.clone());
            result.case_results.push(verdict);
        }

        result.finish();
        self.state.publish_finish(gen);
        log::info!("{} ({}/{})", result.message, result.num_passed(), testcases.len());
        result
    }

    /// Run one input against one expected output, updating only the quick view.
    pub async fn run_single(
        &self,
        code: &str,
        language: &str,
        input: &str,
        expected_output: &str,
    ) -> CaseVerdict {
        let gen = self.state.begin_quick_view();
        let verdict = self.run_case(code, language, input, expected_output).await;
        self.state.publish_quick_view(gen, verdict.clone());
        verdict
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{BatchStatus, QuickView, VerdictKind};
    use judge_webclient::{Error, MockJudgeBackend, RawRunResponse};
    use mockall::Sequence;

    fn accepted(stdout: &str) -> RawRunResponse {
        serde_json::from_value(serde_json::json!({
            "code": 200,
            "data": {
                "compileError": null,
                "testCaseResults": [{
                    "status": "Accepted",
                    "stdout": stdout,
                    "timeInMsWithUnit": "12ms",
                    "memoryInMBWithUnit": "3.2MB",
                }],
            },
        }))
        .unwrap()
    }

    fn compile_error() -> RawRunResponse {
        serde_json::from_value(serde_json::json!({
            "code": 500,
            "data": { "compileError": "syntax error" },
        }))
        .unwrap()
    }

    fn refused() -> Error {
        Error::Json(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
    }

    /// Backend that echoes the input back as stdout.
    fn echo_backend() -> MockJudgeBackend {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .returning(|_, _, input| Ok(accepted(input)));
        backend
    }

    #[tokio::test]
    async fn scenario_single_accepted_case() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .withf(|code: &str, lang: &str, input: &str| {
                code == "print(5)" && lang == "python" && input == "2 3"
            })
            .times(1)
            .returning(|_, _, _| Ok(accepted("5\n")));

        let runner = BatchRunner::new(backend);
        let res = runner
            .run_batch("print(5)", "python", &[Testcase::new("2 3", "5")])
            .await;

        assert_eq!(res.status, BatchStatus::Done);
        assert!(res.all_passed);
        assert!(!res.has_compile_error);
        assert_eq!(res.message, message::ALL_PASSED);
        assert_eq!(res.case_results.len(), 1);

        let v = &res.case_results[0];
        assert_eq!(v.verdict, VerdictKind::Accepted);
        assert_eq!(v.output, "5\n");
        assert_eq!(v.elapsed, "12ms");
        assert_eq!(v.memory, "3.2MB");

        assert_eq!(runner.state().batch(), res);
        assert_eq!(runner.state().quick_view(), QuickView::Finished(v.clone()));
    }

    #[tokio::test]
    async fn cases_run_in_input_order() {
        let mut backend = MockJudgeBackend::new();
        let mut seq = Sequence::new();
        for input in ["a", "b", "c", "d"] {
            backend
                .expect_run_code()
                .withf(move |_: &str, _: &str, i: &str| i == input)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, input| Ok(accepted(input)));
        }

        let testcases: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| Testcase::new(*s, *s))
            .collect();
        let res = BatchRunner::new(backend)
            .run_batch("cat", "bash", &testcases)
            .await;

        let outputs: Vec<_> = res.case_results.iter().map(|v| v.output.as_str()).collect();
        assert_eq!(outputs, vec!["a", "b", "c", "d"]);
        assert!(res.all_passed);
    }

    #[tokio::test]
    async fn transport_failure_is_contained_to_its_case() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .returning(|_, _, input| match input {
                "2" => Err(refused()),
                _ => Ok(accepted(input)),
            });

        let testcases = vec![
            Testcase::new("1", "1"),
            Testcase::new("2", "2"),
            Testcase::new("3", "wrong"),
        ];
        let res = BatchRunner::new(backend)
            .run_batch("cat", "bash", &testcases)
            .await;

        assert_eq!(res.status, BatchStatus::Done);
        assert_eq!(res.case_results.len(), 3);
        let kinds: Vec<_> = res.case_results.iter().map(|v| v.verdict).collect();
        assert_eq!(
            kinds,
            vec![
                VerdictKind::Accepted,
                VerdictKind::TransportError,
                VerdictKind::WrongAnswer
            ]
        );
        assert!(!res.case_results[1].passed);
        assert!(!res.all_passed);
        assert_eq!(res.message, message::SOME_FAILED);
    }

    #[tokio::test]
    async fn all_transport_failures_still_reach_done() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .times(2)
            .returning(|_, _, _| Err(refused()));

        let res = BatchRunner::new(backend)
            .run_batch("x", "c", &[Testcase::new("", ""), Testcase::new("", "")])
            .await;

        assert_eq!(res.status, BatchStatus::Done);
        assert!(!res.all_passed);
        assert!(res
            .case_results
            .iter()
            .all(|v| v.verdict == VerdictKind::TransportError));
    }

    #[tokio::test]
    async fn compile_error_dominates_batch_message() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .returning(|_, _, input| match input {
                "bad" => Ok(compile_error()),
                _ => Ok(accepted(input)),
            });

        let res = BatchRunner::new(backend)
            .run_batch(
                "x",
                "cpp",
                &[Testcase::new("ok", "ok"), Testcase::new("bad", "bad")],
            )
            .await;

        assert!(res.has_compile_error);
        assert!(!res.all_passed);
        assert_eq!(res.message, message::COMPILE_ERROR);
        assert_eq!(res.case_results[1].output, "syntax error");
        assert_eq!(res.case_results[1].elapsed, "0ms");
        assert_eq!(res.case_results[1].memory, "0MB");
    }

    #[tokio::test]
    async fn compile_error_status_marks_batch() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_run_code()
            .returning(|_, _, input| match input {
                "2" => Ok(serde_json::from_value(serde_json::json!({
                    "code": 200,
                    "data": {
                        "compileError": null,
                        "testCaseResults": [{ "status": "Compile Error", "stdout": "" }],
                    },
                }))
                .unwrap()),
                _ => Ok(accepted(input)),
            });

        let runner = BatchRunner::new(backend);
        let res = runner
            .run_batch(
                "x",
                "cpp",
                &[Testcase::new("1", "1"), Testcase::new("2", "2")],
            )
            .await;

        assert_eq!(res.status, BatchStatus::Done);
        assert_eq!(res.case_results[1].verdict, VerdictKind::CompileError);
        assert!(res.has_compile_error);
        assert!(!res.all_passed);
        assert_eq!(res.message, message::COMPILE_ERROR);
        assert_eq!(runner.state().batch(), res);
    }

    #[tokio::test]
    async fn empty_batch_publishes_nothing() {
        let mut backend = MockJudgeBackend::new();
        backend.expect_run_code().never();

        let runner = BatchRunner::new(backend);
        let res = runner.run_batch("x", "c", &[]).await;

        assert_eq!(res.status, BatchStatus::Error);
        assert_eq!(res.message, message::NO_TESTCASES);
        assert_eq!(runner.state().batch(), BatchResult::idle());
        assert_eq!(runner.state().quick_view(), QuickView::Idle);
    }

    #[tokio::test]
    async fn next_batch_starts_from_scratch() {
        let runner = BatchRunner::new(echo_backend());
        let first = runner
            .run_batch("cat", "bash", &[Testcase::new("1", "1"), Testcase::new("2", "x")])
            .await;
        assert_eq!(first.case_results.len(), 2);

        let mut rx = runner.state().subscribe_batch();
        let second = runner
            .run_batch("cat", "bash", &[Testcase::new("3", "3")])
            .await;
        assert_eq!(second.case_results.len(), 1);
        assert!(second.all_passed);
        assert_eq!(*rx.borrow_and_update(), second);
    }

    #[tokio::test]
    async fn single_run_updates_quick_view_only() {
        let runner = BatchRunner::new(echo_backend());
        let v = runner.run_single("cat", "bash", "hi", "hi\n").await;

        assert_eq!(v.verdict, VerdictKind::Accepted);
        assert_eq!(runner.state().quick_view(), QuickView::Finished(v));
        assert_eq!(runner.state().batch().status, BatchStatus::Idle);
    }
}

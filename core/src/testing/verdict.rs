use judge_webclient::{RawRunResponse, STATUS_ACCEPTED};

/// Fixed, user-facing vocabulary attached to verdicts and batches.
pub mod message {
    pub const ACCEPTED: &str = "accepted";
    pub const OUTPUT_MISMATCH: &str = "output does not match expected";
    pub const COMPILE_ERROR: &str = "compile error";
    pub const WRONG_ANSWER: &str = "wrong answer";
    pub const TIME_LIMIT_EXCEEDED: &str = "time limit exceeded";
    pub const MEMORY_LIMIT_EXCEEDED: &str = "memory limit exceeded";
    pub const NO_RESULT: &str = "no result obtained";

    pub const ALL_PASSED: &str = "all test cases passed";
    pub const SOME_FAILED: &str = "some test cases failed";
    pub const RUNNING: &str = "running test cases";
    pub const NO_TESTCASES: &str = "no test cases to run";
}

pub const ZERO_ELAPSED: &str = "0ms";
pub const ZERO_MEMORY: &str = "0MB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum VerdictKind {
    Accepted,
    WrongAnswer,
    CompileError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    TransportError,
    Unknown,
}

impl VerdictKind {
    /// Map a non-accepted backend status to a kind.
    pub fn from_status(status: &str) -> Self {
        use VerdictKind::*;
        match status {
            "Time Limit Exceeded" => TimeLimitExceeded,
            "Memory Limit Exceeded" => MemoryLimitExceeded,
            "Compile Error" => CompileError,
            "Wrong Answer" => WrongAnswer,
            _ => RuntimeError,
        }
    }

    pub const fn abbr(&self) -> &'static str {
        use VerdictKind::*;
        match self {
            Accepted => "AC",
            WrongAnswer => "WA",
            CompileError => "CE",
            TimeLimitExceeded => "TLE",
            MemoryLimitExceeded => "MLE",
            RuntimeError => "RE",
            TransportError => "ERR",
            Unknown => "UKE",
        }
    }
}

/// Normalized outcome of one test case run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseVerdict {
    pub verdict: VerdictKind,
    pub message: String,
    pub output: String,
    pub elapsed: String,
    pub memory: String,
    pub passed: bool,
}

impl CaseVerdict {
    fn failed(verdict: VerdictKind, message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
            output: output.into(),
            elapsed: ZERO_ELAPSED.to_owned(),
            memory: ZERO_MEMORY.to_owned(),
            passed: false,
        }
    }

    /// The call for this case never produced a classifiable response.
    pub fn transport_error(err: &judge_webclient::Error) -> Self {
        use judge_webclient::Error::*;
        let msg = match err {
            BackendRejected { message, .. } => message.to_owned(),
            e => e.to_string(),
        };
        Self::failed(VerdictKind::TransportError, msg.clone(), msg)
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

fn default_message(kind: VerdictKind, status: &str) -> String {
    use VerdictKind::*;
    match kind {
        TimeLimitExceeded => message::TIME_LIMIT_EXCEEDED.to_owned(),
        MemoryLimitExceeded => message::MEMORY_LIMIT_EXCEEDED.to_owned(),
        CompileError => message::COMPILE_ERROR.to_owned(),
        WrongAnswer => message::WRONG_ANSWER.to_owned(),
        _ => format!("runtime error: {}", status),
    }
}

/// Decide the verdict of one case. Pure.
///
/// Precedence: compile error, then a non-accepted backend status, then the
/// output comparison. Output is compared with surrounding whitespace trimmed
/// on both sides; interior whitespace is significant.
pub fn classify(raw: &RawRunResponse, expected_output: &str) -> CaseVerdict {
    use VerdictKind::*;

    let Some(data) = &raw.data else {
        return CaseVerdict::failed(Unknown, message::NO_RESULT, "");
    };

    if let Some(compile_error) = non_empty(&data.compile_error) {
        return CaseVerdict::failed(CompileError, message::COMPILE_ERROR, compile_error);
    }

    let Some(res) = data.test_case_results.first() else {
        return CaseVerdict::failed(Unknown, message::NO_RESULT, "");
    };

    let output = res.stdout.clone().unwrap_or_default();
    let elapsed = non_empty(&res.time_in_ms_with_unit)
        .unwrap_or(ZERO_ELAPSED)
        .to_owned();
    let memory = non_empty(&res.memory_in_mb_with_unit)
        .unwrap_or(ZERO_MEMORY)
        .to_owned();

    if let Some(status) = non_empty(&res.status).filter(|&s| s != STATUS_ACCEPTED) {
        let verdict = VerdictKind::from_status(status);
        // A success envelope's message ("success") says nothing about the case.
        let backend_message = non_empty(&raw.message).filter(|_| !raw.is_ok());
        let message = match backend_message {
            Some(m) => m.to_owned(),
            None => default_message(verdict, status),
        };
        return CaseVerdict {
            verdict,
            message,
            output,
            elapsed,
            memory,
            passed: false,
        };
    }

    let passed = output.trim() == expected_output.trim();
    let (verdict, message) = if passed {
        (Accepted, message::ACCEPTED)
    } else {
        (WrongAnswer, message::OUTPUT_MISMATCH)
    };
    CaseVerdict {
        verdict,
        message: message.to_owned(),
        output,
        elapsed,
        memory,
        passed,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(json: &str) -> RawRunResponse {
        serde_json::from_str(json).unwrap()
    }

    fn ok_with_stdout(stdout: &str) -> RawRunResponse {
        let json = serde_json::json!({
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
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn should_be_accepted() {
        let v = classify(&ok_with_stdout("5\n"), "5");
        assert_eq!(
            v,
            CaseVerdict {
                verdict: VerdictKind::Accepted,
                message: message::ACCEPTED.into(),
                output: "5\n".into(),
                elapsed: "12ms".into(),
                memory: "3.2MB".into(),
                passed: true,
            }
        );
    }

    #[test]
    fn interior_whitespace_is_significant() {
        let v = classify(&ok_with_stdout("5 \n6"), "5\n6");
        assert_eq!(v.verdict, VerdictKind::WrongAnswer);
        assert!(!v.passed);

        let v = classify(&ok_with_stdout("  5\n6\n\n"), "5\n6");
        assert_eq!(v.verdict, VerdictKind::Accepted);
    }

    #[test]
    fn compile_error_without_case_results() {
        let v = classify(&parse(r#"{ "code": 500, "data": { "compileError": "syntax error" } }"#), "5");
        assert_eq!(
            v,
            CaseVerdict {
                verdict: VerdictKind::CompileError,
                message: message::COMPILE_ERROR.into(),
                output: "syntax error".into(),
                elapsed: ZERO_ELAPSED.into(),
                memory: ZERO_MEMORY.into(),
                passed: false,
            }
        );
    }

    #[test]
    fn compile_error_masks_status() {
        let raw = parse(
            r#"{ "code": 500, "message": "时间超限", "data": {
                "compileError": "main.cpp:1: error",
                "testCaseResults": [{ "status": "Time Limit Exceeded", "stdout": "" }]
            } }"#,
        );
        let v = classify(&raw, "");
        assert_eq!(v.verdict, VerdictKind::CompileError);
        assert_eq!(v.message, message::COMPILE_ERROR);
    }

    #[test]
    fn status_masks_output_comparison() {
        let raw = parse(
            r#"{ "code": 200, "data": { "testCaseResults": [{
                "status": "Time Limit Exceeded", "stdout": "5", "timeInMsWithUnit": "2001ms"
            }] } }"#,
        );
        let v = classify(&raw, "5");
        assert_eq!(v.verdict, VerdictKind::TimeLimitExceeded);
        assert_eq!(v.message, message::TIME_LIMIT_EXCEEDED);
        assert_eq!(v.output, "5");
        assert_eq!(v.elapsed, "2001ms");
        assert_eq!(v.memory, ZERO_MEMORY);
        assert!(!v.passed);
    }

    #[test]
    fn backend_message_wins_over_default() {
        let raw = parse(
            r#"{ "code": 500, "message": "Memory exhausted (256MB)", "data": { "testCaseResults": [{
                "status": "Memory Limit Exceeded", "stdout": ""
            }] } }"#,
        );
        let v = classify(&raw, "");
        assert_eq!(v.verdict, VerdictKind::MemoryLimitExceeded);
        assert_eq!(v.message, "Memory exhausted (256MB)");
    }

    #[test]
    fn success_envelope_message_is_not_a_verdict_message() {
        let raw = parse(
            r#"{ "code": 200, "message": "success", "data": { "compileError": null, "testCaseResults": [{
                "status": "Time Limit Exceeded", "stdout": ""
            }] } }"#,
        );
        let v = classify(&raw, "");
        assert_eq!(v.verdict, VerdictKind::TimeLimitExceeded);
        assert_eq!(v.message, message::TIME_LIMIT_EXCEEDED);
    }

    #[test]
    fn compile_error_and_wrong_answer_statuses() {
        let raw = parse(
            r#"{ "code": 200, "data": { "compileError": null, "testCaseResults": [{
                "status": "Compile Error", "stdout": "main.cpp:3: expected ';'"
            }] } }"#,
        );
        let v = classify(&raw, "5");
        assert_eq!(v.verdict, VerdictKind::CompileError);
        assert_eq!(v.message, message::COMPILE_ERROR);
        assert_eq!(v.output, "main.cpp:3: expected ';'");
        assert!(!v.passed);

        let raw = parse(
            r#"{ "code": 200, "message": "success", "data": { "testCaseResults": [{
                "status": "Wrong Answer", "stdout": "4"
            }] } }"#,
        );
        let v = classify(&raw, "5");
        assert_eq!(v.verdict, VerdictKind::WrongAnswer);
        assert_eq!(v.message, message::WRONG_ANSWER);
        assert_eq!(v.output, "4");
        assert!(!v.passed);
    }

    #[test]
    fn unknown_status_is_runtime_error() {
        let raw = parse(
            r#"{ "code": 200, "data": { "testCaseResults": [{ "status": "Segmentation Fault", "stdout": "" }] } }"#,
        );
        let v = classify(&raw, "");
        assert_eq!(v.verdict, VerdictKind::RuntimeError);
        assert_eq!(v.message, "runtime error: Segmentation Fault");
    }

    #[test]
    fn missing_result_is_unknown() {
        for json in [
            r#"{ "code": 200 }"#,
            r#"{ "code": 200, "data": { "compileError": null, "testCaseResults": [] } }"#,
        ] {
            let v = classify(&parse(json), "5");
            assert_eq!(v.verdict, VerdictKind::Unknown);
            assert_eq!(v.message, message::NO_RESULT);
            assert_eq!(v.elapsed, ZERO_ELAPSED);
            assert_eq!(v.memory, ZERO_MEMORY);
            assert!(!v.passed);
        }
    }

    #[test]
    fn missing_units_default_to_zero() {
        let raw = parse(r#"{ "code": 200, "data": { "testCaseResults": [{ "stdout": "ok", "timeInMsWithUnit": "" }] } }"#);
        let v = classify(&raw, "ok");
        assert_eq!(v.verdict, VerdictKind::Accepted);
        assert_eq!(v.elapsed, ZERO_ELAPSED);
        assert_eq!(v.memory, ZERO_MEMORY);
    }

    #[test]
    fn classify_is_deterministic() {
        let raw = ok_with_stdout("42");
        assert_eq!(classify(&raw, "41"), classify(&raw, "41"));
    }

    #[test]
    fn backend_rejection_message_is_kept_verbatim() {
        let err = judge_webclient::Error::BackendRejected {
            code: 401,
            message: "请先登录".into(),
        };
        let v = CaseVerdict::transport_error(&err);
        assert_eq!(v.verdict, VerdictKind::TransportError);
        assert_eq!(v.message, "请先登录");
        assert!(!v.passed);
    }
}

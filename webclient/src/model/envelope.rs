use serde::{Deserialize, Serialize};

/// Status code the backend uses in the envelope for a successful call.
pub const CODE_OK: i64 = 200;

/// Inner status string the backend reports for a clean run.
pub const STATUS_ACCEPTED: &str = "Accepted";

/// The backend's JSON envelope: `{ code, message?, data? }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

pub type RawRunResponse = Envelope<RawCaseResult>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCaseResult {
    #[serde(default)]
    pub compile_error: Option<String>,

    #[serde(default)]
    pub test_case_results: Vec<RawTestCaseResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestCaseResult {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub stdout: Option<String>,

    #[serde(default)]
    pub time_in_ms_with_unit: Option<String>,

    #[serde(default, rename = "memoryInMBWithUnit")]
    pub memory_in_mb_with_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
    pub input: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest<'a> {
    pub problem_id: &'a str,
    pub code: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepted_envelope() {
        let json = r#"{
            "code": 200,
            "data": {
                "compileError": null,
                "testCaseResults": [{
                    "status": "Accepted",
                    "stdout": "5\n",
                    "timeInMsWithUnit": "12ms",
                    "memoryInMBWithUnit": "3.2MB"
                }]
            }
        }"#;
        let r: RawRunResponse = serde_json::from_str(json).unwrap();
        assert!(r.is_ok());
        assert_eq!(r.message, None);

        let data = r.data.unwrap();
        assert_eq!(data.compile_error, None);
        assert_eq!(
            data.test_case_results,
            vec![RawTestCaseResult {
                status: Some("Accepted".into()),
                stdout: Some("5\n".into()),
                time_in_ms_with_unit: Some("12ms".into()),
                memory_in_mb_with_unit: Some("3.2MB".into()),
            }]
        );
    }

    #[test]
    fn compile_error_envelope_without_results() {
        let json = r#"{ "code": 500, "message": "编译失败", "data": { "compileError": "syntax error" } }"#;
        let r: RawRunResponse = serde_json::from_str(json).unwrap();
        assert!(!r.is_ok());
        assert_eq!(r.message.as_deref(), Some("编译失败"));

        let data = r.data.unwrap();
        assert_eq!(data.compile_error.as_deref(), Some("syntax error"));
        assert!(data.test_case_results.is_empty());
    }

    #[test]
    fn envelope_without_data() {
        let r: RawRunResponse = serde_json::from_str(r#"{ "code": 401, "message": "unauthorized" }"#).unwrap();
        assert_eq!(r.code, 401);
        assert_eq!(r.data, None);
    }

    #[test]
    fn submit_request_uses_camel_case() {
        let req = SubmitRequest {
            problem_id: "42",
            code: "int main(){}",
            language: "cpp",
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"problemId":"42","code":"int main(){}","language":"cpp"}"#
        );
    }
}

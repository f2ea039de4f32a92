pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::time::Duration;

use colored::Colorize as _;
use error::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use judge_webclient::{JudgeBackend, ProblemId, ProblemInfo, SubmissionReceipt, Testcase};

use crate::client::SessionPersistentClient;
use crate::interactive::{ask_token, waiting_spinner};
use crate::style;
use crate::testing::{self, BatchResult, BatchRunner, CaseVerdict, QuickView};

pub fn login(cli: &mut SessionPersistentClient, token: Option<String>) -> Result<()> {
    ensure!(!cli.is_logged_in(), "Already logged in");

    let token = match token {
        Some(t) => t,
        None => ask_token().context("Failed to read token")?,
    };
    ensure!(!token.is_empty(), "Empty token");

    cli.login(token)
}

pub fn logout(cli: &mut SessionPersistentClient) -> Result<()> {
    ensure!(cli.is_logged_in(), "Already logged out");
    cli.logout()
}

pub async fn fetch_problem<B>(backend: &B, problem_id: &ProblemId) -> Result<(ProblemInfo, Vec<Testcase>)>
where
    B: JudgeBackend + ?Sized,
{
    let (info, testcases) = tokio::try_join!(
        backend.fetch_problem(problem_id),
        backend.fetch_testcases(problem_id),
    )
    .with_context(|| format!("Failed to fetch problem {}", problem_id))?;
    Ok((info, testcases))
}

/// Run every test case, rendering progress from the runner's observable state.
pub async fn do_run<B: JudgeBackend>(
    runner: &BatchRunner<B>,
    code: &str,
    language: &str,
    testcases: &[Testcase],
) -> Result<BatchResult> {
    ensure!(!testcases.is_empty(), "No test cases to run");

    let mut rx = runner.state().subscribe_batch();
    rx.borrow_and_update();

    let num_cases = testcases.len();
    let renderer = tokio::spawn(async move {
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let container = MultiProgress::new();
        let bars: Vec<_> = (0..num_cases)
            .map(|i| {
                let bar = container
                    .add(ProgressBar::new_spinner())
                    .with_style(style.clone())
                    .with_message(format!("Case #{} ...", i + 1));
                bar.enable_steady_tick(Duration::from_millis(80));
                bar
            })
            .collect();

        let mut rendered = 0;
        while rx.changed().await.is_ok() {
            let batch = rx.borrow_and_update().clone();
            for (i, v) in batch.case_results.iter().enumerate().skip(rendered) {
                if let Some(bar) = bars.get(i) {
                    bar.finish_with_message(format!(
                        "Case #{} ... {} [{}, {}]",
                        i + 1,
                        style::verdict_icon(v.verdict),
                        v.elapsed,
                        v.memory,
                    ));
                }
            }
            rendered = rendered.max(batch.case_results.len());
            if batch.is_terminal() {
                break;
            }
        }
        bars.iter()
            .filter(|bar| !bar.is_finished())
            .for_each(|bar| bar.abandon());
    });

    let result = runner.run_batch(code, language, testcases).await;
    if let Err(e) = renderer.await {
        log::warn!("Progress renderer stopped: {}", e);
    }
    println!();

    result
        .case_results
        .iter()
        .zip(testcases)
        .enumerate()
        .filter(|(_, (v, _))| !v.passed)
        .for_each(|(i, (v, t))| style::print_case_detail(&format!("Case #{}", i + 1), t, v));

    style::print_batch_summary(&result);
    Ok(result)
}

/// Run a single input and print the quick view.
pub async fn do_run_single<B: JudgeBackend>(
    runner: &BatchRunner<B>,
    code: &str,
    language: &str,
    testcase: &Testcase,
) -> Result<CaseVerdict> {
    let v = runner
        .run_single(code, language, &testcase.input, &testcase.expected_output)
        .await;

    match runner.state().quick_view() {
        QuickView::Finished(shown) => style::print_case_detail("Quick run", testcase, &shown),
        other => log::debug!("Quick view not finished: {:?}", other),
    }
    Ok(v)
}

pub async fn submit<B>(
    backend: &B,
    problem_id: &ProblemId,
    code: &str,
    language: &str,
) -> Result<SubmissionReceipt>
where
    B: JudgeBackend + ?Sized,
{
    let label = format!("problem {}", problem_id);
    with_submit_spinner(&label, testing::submit(backend, problem_id, code, language)).await
}

pub async fn submit_from_route<B>(
    backend: &B,
    route_path: &str,
    code: &str,
    language: &str,
) -> Result<SubmissionReceipt>
where
    B: JudgeBackend + ?Sized,
{
    let label = format!("route {:?}", route_path);
    with_submit_spinner(
        &label,
        testing::submit_from_route(backend, route_path, code, language),
    )
    .await
}

async fn with_submit_spinner<F>(label: &str, fut: F) -> Result<SubmissionReceipt>
where
    F: std::future::Future<Output = testing::submission::Result<SubmissionReceipt>>,
{
    let spinner = waiting_spinner(format!("Submitting to {} ...", label));

    let res = fut.await;

    match &res {
        Ok(receipt) => spinner.finish_with_message(format!(
            "Submitted: {}",
            receipt.submission_id.as_str().cyan()
        )),
        Err(e) => spinner.abandon_with_message(format!("{}", e.to_string().bright_red())),
    }

    res.with_context(|| format!("Failed to submit to {}", label))
}

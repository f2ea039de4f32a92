use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use super::verdict::{message, CaseVerdict, VerdictKind};

/// Identifies one `run_batch`/`run_single` invocation.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum BatchStatus {
    #[default]
    Idle,
    Running,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchResult {
    pub case_results: Vec<CaseVerdict>,
    pub all_passed: bool,
    pub has_compile_error: bool,
    pub status: BatchStatus,
    pub message: String,
}

impl BatchResult {
    pub fn idle() -> Self {
        Self::default()
    }

    pub(crate) fn running(capacity: usize) -> Self {
        Self {
            case_results: Vec::with_capacity(capacity),
            status: BatchStatus::Running,
            message: message::RUNNING.to_owned(),
            ..Self::default()
        }
    }

    pub(crate) fn error(msg: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Error,
            message: msg.into(),
            ..Self::default()
        }
    }

    /// Aggregate the collected verdicts and mark the batch done.
    pub(crate) fn finish(&mut self) {
        self.has_compile_error = self
            .case_results
            .iter()
            .any(|v| v.verdict == VerdictKind::CompileError);
        self.all_passed = !self.has_compile_error && self.case_results.iter().all(|v| v.passed);
        self.status = BatchStatus::Done;
        self.message = if self.has_compile_error {
            message::COMPILE_ERROR
        } else if self.all_passed {
            message::ALL_PASSED
        } else {
            message::SOME_FAILED
        }
        .to_owned();
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, BatchStatus::Done | BatchStatus::Error)
    }

    pub fn num_passed(&self) -> usize {
        self.case_results.iter().filter(|v| v.passed).count()
    }
}

/// Live single-case panel. Mirrors the first case of a batch, or the
/// outcome of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuickView {
    #[default]
    Idle,
    Running,
    Finished(CaseVerdict),
}

/// Observable projection of the latest run.
///
/// Readers subscribe and never write; only the runner publishes, and only
/// for the generation it currently owns. A publish from a superseded
/// invocation is dropped.
#[derive(Debug)]
pub struct ExecutionState {
    batch: watch::Sender<BatchResult>,
    quick_view: watch::Sender<QuickView>,
    next_generation: AtomicU64,
    batch_owner: AtomicU64,
    quick_view_owner: AtomicU64,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionState {
    pub fn new() -> Self {
        let (batch, _) = watch::channel(BatchResult::idle());
        let (quick_view, _) = watch::channel(QuickView::Idle);
        Self {
            batch,
            quick_view,
            next_generation: AtomicU64::new(0),
            batch_owner: AtomicU64::new(0),
            quick_view_owner: AtomicU64::new(0),
        }
    }

    pub fn subscribe_batch(&self) -> watch::Receiver<BatchResult> {
        self.batch.subscribe()
    }

    pub fn subscribe_quick_view(&self) -> watch::Receiver<QuickView> {
        self.quick_view.subscribe()
    }

    pub fn batch(&self) -> BatchResult {
        self.batch.borrow().clone()
    }

    pub fn quick_view(&self) -> QuickView {
        self.quick_view.borrow().clone()
    }

    fn next_generation(&self) -> Generation {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the batch wholesale with a fresh `Running` one.
    pub(crate) fn begin_batch(&self, num_cases: usize) -> Generation {
        let gen = self.next_generation();
        self.batch_owner.store(gen, Ordering::SeqCst);
        self.quick_view_owner.store(gen, Ordering::SeqCst);
        self.batch.send_replace(BatchResult::running(num_cases));
        self.quick_view.send_replace(QuickView::Running);
        gen
    }

    pub(crate) fn begin_quick_view(&self) -> Generation {
        let gen = self.next_generation();
        self.quick_view_owner.store(gen, Ordering::SeqCst);
        self.quick_view.send_replace(QuickView::Running);
        gen
    }

    /// Returns false if `gen` is stale and nothing was published.
    pub(crate) fn publish_case(&self, gen: Generation, verdict: CaseVerdict) -> bool {
        self.batch.send_if_modified(|b| {
            if self.batch_owner.load(Ordering::SeqCst) != gen {
                log::debug!("Dropping case result of stale batch #{}", gen);
                return false;
            }
            b.case_results.push(verdict);
            true
        })
    }

    pub(crate) fn publish_finish(&self, gen: Generation) -> bool {
        self.batch.send_if_modified(|b| {
            if self.batch_owner.load(Ordering::SeqCst) != gen {
                log::debug!("Dropping completion of stale batch #{}", gen);
                return false;
            }
            b.finish();
            true
        })
    }

    pub(crate) fn publish_quick_view(&self, gen: Generation, verdict: CaseVerdict) -> bool {
        self.quick_view.send_if_modified(|q| {
            if self.quick_view_owner.load(Ordering::SeqCst) != gen {
                log::debug!("Dropping quick view of stale run #{}", gen);
                return false;
            }
            *q = QuickView::Finished(verdict);
            true
        })
    }
}

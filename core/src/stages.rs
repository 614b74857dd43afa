//! Cosmetic staged progress shown once a result is already in hand.
//!
//! The stages say nothing about what the backend actually did. They walk a
//! fixed list of labels on a timer so the user sees the analysis "happen".
//! The timer is any [`Stream`], so tests drive it without waiting.

use futures::stream::{Stream, StreamExt};
use std::future::Future;

/// Display state of one stage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Active,
    Pending,
}

/// Stage index plus terminal flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgress {
    labels: &'static [&'static str],
    stage: usize,
    complete: bool,
}

impl StageProgress {
    /// Start at stage 0. An empty label list is complete from the start.
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            stage: 0,
            complete: labels.len() <= 1,
        }
    }

    /// The five claim-analysis stages.
    pub fn claim() -> Self {
        Self::new(&crate::config::CLAIM_STAGES)
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Label of the current stage.
    pub fn label(&self) -> &'static str {
        self.labels.get(self.stage).copied().unwrap_or("")
    }

    fn last_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    /// Move one stage forward. Reaching the last stage completes the
    /// machine; once complete this does nothing. Returns whether anything
    /// changed.
    pub fn advance(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.stage += 1;
        if self.stage >= self.last_index() {
            self.stage = self.last_index();
            self.complete = true;
        }
        true
    }

    /// Progress between 0.0 and 1.0.
    pub fn fraction(&self) -> f32 {
        if self.complete {
            1.0
        } else {
            self.stage as f32 / self.last_index().max(1) as f32
        }
    }

    pub fn status_of(&self, index: usize) -> StageStatus {
        if self.complete || index < self.stage {
            StageStatus::Done
        } else if index == self.stage {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

/// Advance `progress` once per tick until it completes.
///
/// `on_change` sees the starting state, then every new one. If `ticks` ends
/// first the progress is returned incomplete.
pub async fn play_stages<S>(
    mut progress: StageProgress,
    ticks: S,
    mut on_change: impl FnMut(&StageProgress),
) -> StageProgress
where
    S: Stream,
{
    futures::pin_mut!(ticks);
    on_change(&progress);
    while !progress.is_complete() {
        if ticks.next().await.is_none() {
            log::debug!("stage ticker ended at stage {}", progress.stage());
            break;
        }
        if progress.advance() {
            on_change(&progress);
        }
    }
    progress
}

/// Await `request`, then play the stages.
///
/// The ticker is only created after the result exists, so the timer never
/// runs alongside the pending request.
pub async fn present<T, R, S, M>(
    request: R,
    progress: StageProgress,
    make_ticks: M,
    on_change: impl FnMut(&StageProgress),
) -> (T, StageProgress)
where
    R: Future<Output = T>,
    M: FnOnce() -> S,
    S: Stream,
{
    let result = request.await;
    let progress = play_stages(progress, make_ticks(), on_change).await;
    (result, progress)
}

/// Tokio ticker firing every `period`, first tick one period from now.
#[cfg(feature = "native")]
pub fn interval_ticks(period: std::time::Duration) -> impl Stream<Item = tokio::time::Instant> {
    let start = tokio::time::Instant::now() + period;
    tokio_stream::wrappers::IntervalStream::new(tokio::time::interval_at(start, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;
    use std::cell::RefCell;

    #[test]
    fn test_claim_stages_complete_after_four_ticks() {
        let mut progress = StageProgress::claim();
        assert_eq!(progress.stage(), 0);
        assert!(!progress.is_complete());

        for expected in 1..4 {
            assert!(progress.advance());
            assert_eq!(progress.stage(), expected);
            assert!(!progress.is_complete());
        }
        assert!(progress.advance());
        assert_eq!(progress.stage(), 4);
        assert!(progress.is_complete());

        assert!(!progress.advance());
        assert_eq!(progress.stage(), 4);
    }

    #[test]
    fn test_fraction_and_status() {
        let mut progress = StageProgress::claim();
        assert_eq!(progress.fraction(), 0.0);
        progress.advance();
        progress.advance();
        assert_eq!(progress.fraction(), 0.5);
        assert_eq!(progress.status_of(1), StageStatus::Done);
        assert_eq!(progress.status_of(2), StageStatus::Active);
        assert_eq!(progress.status_of(3), StageStatus::Pending);
        assert_eq!(progress.label(), "Verifying policy coverage");
    }

    #[test]
    fn test_single_label_is_complete() {
        static ONE: [&str; 1] = ["Done"];
        let mut progress = StageProgress::new(&ONE);
        assert!(progress.is_complete());
        assert!(!progress.advance());
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_play_stops_at_complete() {
        let seen = RefCell::new(Vec::new());
        let progress = block_on(play_stages(StageProgress::claim(), stream::repeat(()), |p| {
            seen.borrow_mut().push((p.stage(), p.is_complete()))
        }));
        assert!(progress.is_complete());
        assert_eq!(
            seen.into_inner(),
            vec![(0, false), (1, false), (2, false), (3, false), (4, true)]
        );
    }

    #[test]
    fn test_play_with_short_ticker_stays_incomplete() {
        let progress = block_on(play_stages(StageProgress::claim(), stream::iter([(), ()]), |_| {}));
        assert_eq!(progress.stage(), 2);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_present_builds_ticker_after_result() {
        let events = RefCell::new(Vec::new());
        let request = async {
            events.borrow_mut().push("request resolved");
            "result"
        };
        let (result, progress) = block_on(present(
            request,
            StageProgress::claim(),
            || {
                events.borrow_mut().push("ticker created");
                stream::repeat(())
            },
            |_| {},
        ));
        assert_eq!(result, "result");
        assert!(progress.is_complete());
        assert_eq!(events.into_inner(), vec!["request resolved", "ticker created"]);
    }

    #[test]
    fn test_aborted_presentation_stops_callbacks() {
        let calls = RefCell::new(0);
        let (future, handle) = futures::future::abortable(play_stages(
            StageProgress::claim(),
            stream::pending::<()>(),
            |_| *calls.borrow_mut() += 1,
        ));
        handle.abort();
        assert!(block_on(future).is_err());
        assert_eq!(*calls.borrow(), 0);
    }
}

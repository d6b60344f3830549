//! Three-screen flow controller.
//!
//! Owns the [`UserInput`] and the last [`AnalysisResult`]. Intents are applied
//! one at a time through `&mut self`; the only suspension point is the
//! analysis call, which is split into [`FlowController::begin_analysis`] and
//! [`FlowController::complete_analysis`] so that a response arriving after the
//! user navigated away can be recognised and dropped.

use tracing::{debug, info, warn};

use crate::domain::errors::{AnalysisError, FlowError, FlowResult, ValidationError};
use crate::domain::models::{
    AnalysisResult, AnalysisTicket, FlowState, Intent, PendingAnalysis, UserInput,
};
use crate::services::analysis_client::AnalysisClient;

/// What happened to an `Analyze` intent.
#[derive(Debug, Clone)]
pub enum AnalyzeOutcome {
    /// Input failed validation; a message is set and no request was issued.
    Invalid(ValidationError),
    /// A request may now be issued for this snapshot.
    Dispatched(PendingAnalysis),
}

/// What happened to a delivered analysis response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result stored, now on the result screen.
    Stored,
    /// Error message set, back to an interactive input screen.
    Failed,
    /// The response no longer matches an in-flight request and was ignored.
    Stale,
}

/// State machine driving `intro → input → result`.
#[derive(Debug, Default)]
pub struct FlowController {
    state: FlowState,
    input: UserInput,
    result: Option<AnalysisResult>,
    pending: Option<AnalysisTicket>,
    error: Option<String>,
}

impl FlowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with pre-filled input, still on the intro screen.
    pub fn with_input(input: UserInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub const fn state(&self) -> FlowState {
        self.state
    }

    pub const fn input(&self) -> &UserInput {
        &self.input
    }

    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn transition(&mut self, to: FlowState, intent: &Intent) {
        debug!(from = %self.state, to = %to, intent = %intent.describe(), "flow transition");
        self.state = to;
    }

    fn reject(&self, intent: &Intent) -> FlowError {
        FlowError::InvalidTransition {
            intent: intent.describe(),
            state: self.state,
        }
    }

    /// Apply a synchronous intent.
    ///
    /// `Analyze` is refused with [`FlowError::AnalyzeNeedsRequest`]: it only
    /// makes sense together with the request, see
    /// [`begin_analysis`](Self::begin_analysis) and
    /// [`run_analysis`](Self::run_analysis).
    pub fn dispatch(&mut self, intent: Intent) -> FlowResult<()> {
        if self.is_loading() && !matches!(intent, Intent::Back | Intent::DismissError) {
            return Err(FlowError::Busy);
        }

        if intent.is_mutation() {
            if self.state != FlowState::Input {
                return Err(self.reject(&intent));
            }
            return self.apply_mutation(intent);
        }

        match (&intent, self.state) {
            (Intent::DismissError, _) => {
                self.error = None;
                Ok(())
            }
            (Intent::Start, FlowState::Intro) => {
                self.transition(FlowState::Input, &intent);
                Ok(())
            }
            (Intent::Back, FlowState::Input) => {
                if let Some(ticket) = self.pending.take() {
                    info!(%ticket, "abandoning in-flight analysis");
                }
                self.transition(FlowState::Intro, &intent);
                Ok(())
            }
            (Intent::Analyze, FlowState::Input) => Err(FlowError::AnalyzeNeedsRequest),
            (Intent::Reset, FlowState::Result) => {
                self.result = None;
                self.transition(FlowState::Input, &intent);
                Ok(())
            }
            _ => Err(self.reject(&intent)),
        }
    }

    fn apply_mutation(&mut self, intent: Intent) -> FlowResult<()> {
        match intent {
            Intent::AddItem { bucket, text } => {
                self.input.add_item(bucket, &text);
            }
            Intent::RemoveItem { bucket, index } => {
                self.input.remove_item(bucket, index)?;
            }
            Intent::AddValue(text) => {
                self.input.add_value(&text);
            }
            Intent::RemoveValue(index) => {
                self.input.remove_value(index)?;
            }
            Intent::AddConstraint(text) => {
                self.input.add_constraint(&text);
            }
            Intent::RemoveConstraint(index) => {
                self.input.remove_constraint(index)?;
            }
            Intent::SetEnergy(level) => self.input.set_energy_level(level)?,
            other => return Err(self.reject(&other)),
        }
        Ok(())
    }

    /// Validate the input and, if it passes, enter the loading sub-state.
    pub fn begin_analysis(&mut self) -> FlowResult<AnalyzeOutcome> {
        if self.is_loading() {
            return Err(FlowError::Busy);
        }
        if self.state != FlowState::Input {
            return Err(self.reject(&Intent::Analyze));
        }

        if let Err(validation) = self.input.validate() {
            debug!(reason = %validation, "analysis blocked by validation");
            self.error = Some(validation.to_string());
            return Ok(AnalyzeOutcome::Invalid(validation));
        }

        let ticket = AnalysisTicket::new();
        self.pending = Some(ticket);
        self.error = None;
        info!(%ticket, "analysis dispatched");

        Ok(AnalyzeOutcome::Dispatched(PendingAnalysis {
            ticket,
            input: self.input.clone(),
        }))
    }

    /// Deliver the outcome of a dispatched analysis.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        if self.pending != Some(ticket) || self.state != FlowState::Input {
            warn!(%ticket, state = %self.state, "discarding stale analysis response");
            return Completion::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                info!(%ticket, score = result.viability.score, "analysis stored");
                self.result = Some(result);
                self.error = None;
                self.transition(FlowState::Result, &Intent::Analyze);
                Completion::Stored
            }
            Err(err) => {
                warn!(%ticket, kind = ?err.kind(), error = %err, "analysis failed");
                self.error = Some(err.user_message());
                Completion::Failed
            }
        }
    }

    /// Validate, call `client` and apply the outcome.
    ///
    /// Returns `Ok(None)` when validation blocked the request.
    pub async fn run_analysis(&mut self, client: &AnalysisClient) -> FlowResult<Option<Completion>> {
        let pending = match self.begin_analysis()? {
            AnalyzeOutcome::Invalid(_) => return Ok(None),
            AnalyzeOutcome::Dispatched(pending) => pending,
        };
        let outcome = client.analyze(&pending.input).await;
        Ok(Some(self.complete_analysis(pending.ticket, outcome)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::sample_analysis;
    use crate::domain::models::Bucket;

    fn on_input() -> FlowController {
        let mut flow = FlowController::new();
        flow.dispatch(Intent::Start).unwrap();
        flow
    }

    fn fill(flow: &mut FlowController) {
        for bucket in Bucket::ALL {
            flow.dispatch(Intent::AddItem {
                bucket,
                text: format!("{bucket} item"),
            })
            .unwrap();
        }
        flow.dispatch(Intent::AddValue("freedom".into())).unwrap();
    }

    fn dispatched(flow: &mut FlowController) -> PendingAnalysis {
        match flow.begin_analysis().unwrap() {
            AnalyzeOutcome::Dispatched(p) => p,
            AnalyzeOutcome::Invalid(v) => panic!("unexpected validation failure: {v}"),
        }
    }

    #[test]
    fn test_start_and_back() {
        let mut flow = on_input();
        assert_eq!(flow.state(), FlowState::Input);
        flow.dispatch(Intent::AddItem {
            bucket: Bucket::Love,
            text: "x".into(),
        })
        .unwrap();
        flow.dispatch(Intent::Back).unwrap();
        assert_eq!(flow.state(), FlowState::Intro);
        assert_eq!(flow.input().bucket(Bucket::Love), ["x"]);
    }

    #[test]
    fn test_mutations_rejected_outside_input() {
        let mut flow = FlowController::new();
        let err = flow.dispatch(Intent::AddValue("v".into())).unwrap_err();
        assert!(matches!(
            err,
            FlowError::InvalidTransition {
                state: FlowState::Intro,
                ..
            }
        ));
        assert!(flow.input().values().is_empty());
    }

    #[test]
    fn test_reset_rejected_on_input() {
        let mut flow = on_input();
        assert!(flow.dispatch(Intent::Reset).is_err());
    }

    #[test]
    fn test_validation_sets_message_without_loading() {
        let mut flow = on_input();
        match flow.begin_analysis().unwrap() {
            AnalyzeOutcome::Invalid(ValidationError::EmptyBucket(Bucket::Love)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!flow.is_loading());
        assert_eq!(flow.state(), FlowState::Input);
        assert!(flow.error_message().is_some());
    }

    #[test]
    fn test_busy_while_loading() {
        let mut flow = on_input();
        fill(&mut flow);
        let _pending = dispatched(&mut flow);
        assert!(flow.is_loading());
        assert_eq!(flow.begin_analysis().unwrap_err(), FlowError::Busy);
        assert_eq!(
            flow.dispatch(Intent::SetEnergy(2)).unwrap_err(),
            FlowError::Busy
        );
    }

    #[test]
    fn test_success_then_reset_keeps_input() {
        let mut flow = on_input();
        fill(&mut flow);
        flow.dispatch(Intent::SetEnergy(5)).unwrap();
        let before = flow.input().clone();

        let pending = dispatched(&mut flow);
        assert_eq!(
            flow.complete_analysis(pending.ticket, Ok(sample_analysis())),
            Completion::Stored
        );
        assert_eq!(flow.state(), FlowState::Result);
        assert!(flow.result().is_some());

        flow.dispatch(Intent::Reset).unwrap();
        assert_eq!(flow.state(), FlowState::Input);
        assert!(flow.result().is_none());
        assert_eq!(flow.input(), &before);
    }

    #[test]
    fn test_failure_keeps_input_screen() {
        let mut flow = on_input();
        fill(&mut flow);
        let pending = dispatched(&mut flow);
        let completion =
            flow.complete_analysis(pending.ticket, Err(AnalysisError::Parse("bad".into())));
        assert_eq!(completion, Completion::Failed);
        assert_eq!(flow.state(), FlowState::Input);
        assert!(!flow.is_loading());
        assert!(flow.error_message().is_some());
    }

    #[test]
    fn test_stale_response_after_back_is_ignored() {
        let mut flow = on_input();
        fill(&mut flow);
        let pending = dispatched(&mut flow);
        flow.dispatch(Intent::Back).unwrap();
        assert!(!flow.is_loading());

        let completion = flow.complete_analysis(pending.ticket, Ok(sample_analysis()));
        assert_eq!(completion, Completion::Stale);
        assert_eq!(flow.state(), FlowState::Intro);
        assert!(flow.result().is_none());
    }

    #[test]
    fn test_old_ticket_ignored_after_redispatch() {
        let mut flow = on_input();
        fill(&mut flow);
        let first = dispatched(&mut flow);
        flow.dispatch(Intent::Back).unwrap();
        flow.dispatch(Intent::Start).unwrap();
        let second = dispatched(&mut flow);

        assert_eq!(
            flow.complete_analysis(first.ticket, Ok(sample_analysis())),
            Completion::Stale
        );
        assert!(flow.is_loading());
        assert_eq!(
            flow.complete_analysis(second.ticket, Ok(sample_analysis())),
            Completion::Stored
        );
    }

    #[test]
    fn test_dismiss_error() {
        let mut flow = on_input();
        let _ = flow.begin_analysis().unwrap();
        assert!(flow.error_message().is_some());
        flow.dispatch(Intent::DismissError).unwrap();
        assert!(flow.error_message().is_none());
    }

    #[test]
    fn test_remove_out_of_range_reports_error() {
        let mut flow = on_input();
        let err = flow
            .dispatch(Intent::RemoveItem {
                bucket: Bucket::Paid,
                index: 0,
            })
            .unwrap_err();
        assert_eq!(err, FlowError::IndexOutOfRange { index: 0, len: 0 });
    }
}

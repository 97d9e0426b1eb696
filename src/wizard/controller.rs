//! WizardController owns one wizard session and drives validation,
//! collection, step transitions and submission.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{SubmissionClient, SubmissionOutcome, submit};
use crate::error::{PrintError, SubmissionError, ValidationError};
use crate::itinerary::ItineraryResult;
use crate::print::Printer;
use crate::render::{RenderedResult, ResultRenderer};

use super::collect::collect_step;
use super::form::FormValues;
use super::model::{Profile, ProfileDraft};
use super::notify::{NotificationKind, Notifications};
use super::state::{StepState, WizardStep};
use super::validate::validate_step;
use super::view::{GenerationStatus, ProgressEntry, ViewState};

/// Notification shown whenever either backend call fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate itinerary. Please try again.";
pub const PRINT_FAILED_MESSAGE: &str = "Printing failed. Please try again.";

/// Result of a "next" action.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Validation passed and the wizard moved to this form step.
    Moved(WizardStep),
    /// Validation failed; nothing changed except a new notification.
    Blocked(ValidationError),
    /// The last form step passed; the profile is complete and ready to send.
    ReadyToSubmit,
    /// Submission ran; carries the resulting status.
    Submitted(GenerationStatus),
    /// Already on the result panel, which "next" cannot leave.
    Stayed,
}

/// A started generation. `ticket` identifies it so that a stale finish
/// (after a reset or a newer attempt) is ignored.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub ticket: u64,
    pub profile: Profile,
}

/// All state for one user's pass through the wizard.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    pub steps: StepState,
    pub form: FormValues,
    pub draft: ProfileDraft,
    pub submitted: Option<Profile>,
    pub result: Option<ItineraryResult>,
    pub rendered: Option<RenderedResult>,
    pub generation: GenerationStatus,
    generation_ticket: u64,
    pub chrome_hidden: bool,
    pub notifications: Notifications,
}

impl WizardSession {
    pub fn in_progress(&self) -> bool {
        self.generation == GenerationStatus::Loading
    }
}

/// Drives a single `WizardSession`.
pub struct WizardController {
    session: WizardSession,
    client: Arc<dyn SubmissionClient>,
    renderer: ResultRenderer,
}

impl WizardController {
    pub fn new(
        client: Arc<dyn SubmissionClient>,
        renderer: ResultRenderer,
        notifications: Notifications,
    ) -> Self {
        Self {
            session: WizardSession {
                notifications,
                ..WizardSession::default()
            },
            client,
            renderer,
        }
    }

    pub fn with_defaults(client: Arc<dyn SubmissionClient>) -> Self {
        Self::new(client, ResultRenderer::default(), Notifications::default())
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn current_step(&self) -> WizardStep {
        self.session.steps.current
    }

    pub fn client(&self) -> Arc<dyn SubmissionClient> {
        Arc::clone(&self.client)
    }

    /// Mutable access to the form inputs, for input events.
    pub fn form_mut(&mut self) -> &mut FormValues {
        &mut self.session.form
    }

    /// Replace the form inputs wholesale (see `FormValues::apply_update`).
    pub fn update_form(&mut self, form: FormValues) {
        self.session.form.apply_update(form);
    }

    /// Validate and collect the current step, then move forward. On the
    /// last form step a pass yields `ReadyToSubmit` without moving.
    pub fn try_advance(&mut self) -> Advance {
        let step = self.session.steps.current;
        if step.is_terminal() {
            return Advance::Stayed;
        }

        if let Err(e) = validate_step(step, &self.session.form) {
            debug!(step = %step, reason = %e.message, "Step validation failed");
            self.notify(NotificationKind::Error, e.message.clone());
            return Advance::Blocked(e);
        }

        collect_step(step, &self.session.form, &mut self.session.draft);

        match self.session.steps.advance() {
            Ok(next) => {
                info!(from = %step, to = %next, "Wizard advanced");
                Advance::Moved(next)
            }
            Err(_) => Advance::ReadyToSubmit,
        }
    }

    /// "Next" button: like `try_advance`, but runs the submission when the
    /// last form step passes.
    pub async fn advance(&mut self) -> Advance {
        match self.try_advance() {
            Advance::ReadyToSubmit => match self.generate().await {
                Ok(status) => Advance::Submitted(status),
                Err(e) => {
                    self.generation_not_started(&e);
                    Advance::Submitted(self.session.generation)
                }
            },
            other => other,
        }
    }

    /// "Back" button: no validation, no collection. Ignored while a
    /// generation is in flight.
    pub fn retreat(&mut self) -> WizardStep {
        if self.session.in_progress() {
            debug!("Retreat ignored while generating");
            return self.session.steps.current;
        }
        let from = self.session.steps.current;
        let to = self.session.steps.retreat();
        debug!(from = %from, to = %to, "Wizard retreated");
        to
    }

    /// "Start over": back to an empty first step. Notifications survive.
    pub fn reset(&mut self) {
        let session = &mut self.session;
        session.steps.reset();
        session.form.clear();
        session.draft = ProfileDraft::default();
        session.submitted = None;
        session.result = None;
        session.rendered = None;
        session.generation = GenerationStatus::Idle;
        session.chrome_hidden = false;
        // Keep counting so an in-flight finish from before the reset is stale.
        session.generation_ticket += 1;
        info!("Wizard reset");
    }

    /// Start a generation: freeze the profile, show the loading panel.
    pub fn begin_generation(&mut self) -> Result<PendingGeneration, SubmissionError> {
        if self.session.in_progress() {
            return Err(SubmissionError::AlreadyInProgress);
        }
        let profile = self
            .session
            .draft
            .to_profile()
            .ok_or(SubmissionError::NoProfile)?;

        self.session.generation_ticket += 1;
        self.session.submitted = Some(profile.clone());
        self.session.result = None;
        self.session.rendered = None;
        self.session.generation = GenerationStatus::Loading;
        self.session.steps.enter_itinerary();

        info!(
            ticket = self.session.generation_ticket,
            destination = %profile.destination,
            days = profile.days,
            "Generation started"
        );
        Ok(PendingGeneration {
            ticket: self.session.generation_ticket,
            profile,
        })
    }

    /// Apply the outcome of a generation started with `begin_generation`.
    /// Returns false when the ticket is stale and the outcome was dropped.
    pub fn finish_generation(&mut self, ticket: u64, outcome: SubmissionOutcome) -> bool {
        if ticket != self.session.generation_ticket || !self.session.in_progress() {
            debug!(ticket, current = self.session.generation_ticket, "Stale generation dropped");
            return false;
        }

        match outcome {
            SubmissionOutcome::Success(result) => match self.renderer.render(&result) {
                Ok(rendered) => {
                    self.session.rendered = Some(rendered);
                    self.session.result = Some(result);
                    self.session.generation = GenerationStatus::Ready;
                    info!(ticket, "Itinerary ready");
                }
                Err(e) => {
                    self.session.generation = GenerationStatus::Failed;
                    warn!(ticket, error = %e, "Rendering the itinerary failed");
                    self.notify(NotificationKind::Error, GENERATION_FAILED_MESSAGE);
                }
            },
            SubmissionOutcome::Failure(reason) => {
                self.session.generation = GenerationStatus::Failed;
                warn!(ticket, reason = %reason, "Generation failed");
                self.notify(NotificationKind::Error, GENERATION_FAILED_MESSAGE);
            }
        }
        true
    }

    /// Like `begin_generation`, but only after a failed generation.
    pub fn begin_retry(&mut self) -> Result<PendingGeneration, SubmissionError> {
        match self.session.generation {
            GenerationStatus::Loading => Err(SubmissionError::AlreadyInProgress),
            GenerationStatus::Failed => {
                info!("Retrying generation");
                self.begin_generation()
            }
            GenerationStatus::Idle | GenerationStatus::Ready => Err(SubmissionError::NothingToRetry),
        }
    }

    /// Run the whole create → generate sequence.
    pub async fn generate(&mut self) -> Result<GenerationStatus, SubmissionError> {
        let pending = self.begin_generation()?;
        Ok(self.run_generation(pending).await)
    }

    /// "Try again" after a failure: restart the full sequence.
    pub async fn retry(&mut self) -> Result<GenerationStatus, SubmissionError> {
        let pending = self.begin_retry()?;
        Ok(self.run_generation(pending).await)
    }

    async fn run_generation(&mut self, pending: PendingGeneration) -> GenerationStatus {
        let client = self.client();
        let outcome = submit(client.as_ref(), &pending.profile).await;
        self.finish_generation(pending.ticket, outcome);
        self.session.generation
    }

    /// A validated form whose generation could not even start still gets
    /// the failure notification.
    fn generation_not_started(&mut self, error: &SubmissionError) {
        warn!(error = %error, "Could not start generation");
        self.notify(NotificationKind::Error, GENERATION_FAILED_MESSAGE);
    }

    /// Print the rendered itinerary. Chrome is hidden for the duration and
    /// restored whether or not printing succeeds.
    pub async fn print(&mut self, printer: &dyn Printer) -> Result<(), PrintError> {
        let Some(rendered) = &self.session.rendered else {
            return Err(PrintError::NothingToPrint);
        };
        let document = match rendered.to_document(self.session.submitted.as_ref()) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Could not build the printable document");
                self.notify(NotificationKind::Error, PRINT_FAILED_MESSAGE);
                return Err(e.into());
            }
        };

        self.session.chrome_hidden = true;
        let result = printer.print(&document).await;
        self.session.chrome_hidden = false;

        if let Err(e) = &result {
            warn!(printer = printer.name(), error = %e, "Print failed");
            self.notify(NotificationKind::Error, PRINT_FAILED_MESSAGE);
        }
        result
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        self.session.notifications.push(kind, message)
    }

    pub fn dismiss_notification(&mut self, id: Uuid) -> bool {
        self.session.notifications.dismiss(id)
    }

    pub fn prune_notifications(&mut self, now: DateTime<Utc>) -> usize {
        self.session.notifications.prune_expired(now)
    }

    /// Derive the render state at `now`.
    pub fn view_state_at(&self, now: DateTime<Utc>) -> ViewState {
        let session = &self.session;
        let step = session.steps.current;
        ViewState {
            step,
            active_panel: step.panel_id(),
            progress: session
                .steps
                .markers()
                .into_iter()
                .map(|(step, marker)| ProgressEntry {
                    step,
                    number: step.number(),
                    marker,
                })
                .collect(),
            form: session.form.clone(),
            companions_visible: session.form.companions_visible(),
            other_health_visible: session.form.other_health_visible(),
            generation: session.generation,
            result: match session.generation {
                GenerationStatus::Ready => session.rendered.clone(),
                _ => None,
            },
            retry_available: session.generation == GenerationStatus::Failed,
            chrome_visible: !session.chrome_hidden,
            notifications: session.notifications.active(now),
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state_at(Utc::now())
    }
}

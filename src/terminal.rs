//! Terminal front-end. Drives a wizard over stdin/stdout.
//!
//! Every prompt accepts `back` (previous step) and `quit`. A blank answer
//! keeps the value shown in brackets.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::Result;
use crate::print::Printer;
use crate::render::format::split_activity;
use crate::wizard::form::OTHER_HEALTH_CONDITION;
use crate::wizard::{
    Advance, FormValues, GenerationStatus, NotificationKind, WizardController, WizardStep,
};

enum PromptInput {
    Value(String),
    Back,
    Quit,
}

enum StepInput {
    Filled,
    Back,
    Quit,
}

/// Unwrap a prompt answer or leave the step on `back`/`quit`.
macro_rules! answer {
    ($prompt:expr) => {
        match $prompt {
            PromptInput::Value(v) => v,
            PromptInput::Back => return Ok(StepInput::Back),
            PromptInput::Quit => return Ok(StepInput::Quit),
        }
    };
}

pub struct TerminalFrontend<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> TerminalFrontend<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user quits or input ends.
    pub async fn run(&mut self, wizard: &mut WizardController, printer: &dyn Printer) -> Result<()> {
        writeln!(self.out, "✈️  Trip planner — type 'back' to go back, 'quit' to exit.")?;

        loop {
            self.show_progress(wizard)?;

            let step = wizard.current_step();
            let input = match step {
                WizardStep::PersonalInfo => self.personal_info(wizard.form_mut()).await?,
                WizardStep::TravelDetails => self.travel_details(wizard.form_mut()).await?,
                WizardStep::Preferences => self.preferences(wizard.form_mut()).await?,
                WizardStep::Itinerary => self.result_menu(wizard, printer).await?,
            };

            match input {
                StepInput::Filled if step.is_form() => {
                    let advance = wizard.advance().await;
                    self.report(wizard, &advance)?;
                }
                StepInput::Filled => {}
                StepInput::Back => {
                    wizard.retreat();
                }
                StepInput::Quit => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    async fn prompt(&mut self, label: &str, current: &str) -> Result<PromptInput> {
        if current.is_empty() {
            write!(self.out, "{label}: ")?;
        } else {
            write!(self.out, "{label} [{current}]: ")?;
        }
        self.out.flush()?;

        let Some(line) = self.lines.next_line().await? else {
            return Ok(PromptInput::Quit);
        };
        let line = line.trim();
        Ok(match line.to_lowercase().as_str() {
            "back" => PromptInput::Back,
            "quit" | "exit" => PromptInput::Quit,
            "" => PromptInput::Value(current.to_string()),
            _ => PromptInput::Value(line.to_string()),
        })
    }

    async fn personal_info(&mut self, form: &mut FormValues) -> Result<StepInput> {
        writeln!(self.out, "\n— Personal information —")?;
        form.name = answer!(self.prompt("Your name", &form.name.clone()).await?);

        let current = form.travel_type.map(|t| t.to_string()).unwrap_or_default();
        let travel_type = answer!(self.prompt("Travelling (alone/couple/group)", &current).await?);
        let travel_type = travel_type.parse().ok();
        if travel_type != form.travel_type {
            form.select_travel_type(travel_type);
        }

        if form.companions_visible() {
            form.companions =
                answer!(self.prompt("Number of travellers", &form.companions.clone()).await?);
        }

        let current = form.health_conditions.join(", ");
        let conditions = answer!(
            self.prompt(
                &format!(
                    "Health conditions, comma separated (e.g. heart, mobility, {OTHER_HEALTH_CONDITION}; 'none')"
                ),
                &current
            )
            .await?
        );
        form.health_conditions.clear();
        for condition in split_list(&conditions) {
            form.set_health_condition(&condition, true);
        }

        if form.other_health_visible() {
            form.other_health_condition = answer!(
                self.prompt(
                    "Describe the other condition",
                    &form.other_health_condition.clone()
                )
                .await?
            );
        }
        Ok(StepInput::Filled)
    }

    async fn travel_details(&mut self, form: &mut FormValues) -> Result<StepInput> {
        writeln!(self.out, "\n— Travel details —")?;
        form.destination = answer!(self.prompt("Destination", &form.destination.clone()).await?);
        form.days = answer!(self.prompt("Number of days (1-30)", &form.days.clone()).await?);
        let current = form.budget.map(|b| b.to_string()).unwrap_or_default();
        let budget = answer!(self.prompt("Budget (low/medium/high)", &current).await?);
        form.budget = budget.parse().ok();
        Ok(StepInput::Filled)
    }

    async fn preferences(&mut self, form: &mut FormValues) -> Result<StepInput> {
        writeln!(self.out, "\n— Preferences —")?;
        let current = form.interests.join(", ");
        let interests = answer!(
            self.prompt(
                "Interests, comma separated (museums, parks, restaurants, shopping, nightlife, beaches, adventure, culture)",
                &current
            )
            .await?
        );
        form.interests.clear();
        for interest in split_list(&interests) {
            form.set_interest(&interest, true);
        }
        Ok(StepInput::Filled)
    }

    /// Result panel: print, retry, start over or quit.
    async fn result_menu(
        &mut self,
        wizard: &mut WizardController,
        printer: &dyn Printer,
    ) -> Result<StepInput> {
        let status = wizard.session().generation;
        let options = match status {
            GenerationStatus::Failed => "[r]etry, [s]tart over, [q]uit",
            _ => "[p]rint, [s]tart over, [q]uit",
        };
        let choice = match self.prompt(options, "").await? {
            PromptInput::Value(v) => v.to_lowercase(),
            PromptInput::Back => return Ok(StepInput::Back),
            PromptInput::Quit => return Ok(StepInput::Quit),
        };

        match choice.as_str() {
            "r" | "retry" if status == GenerationStatus::Failed => {
                writeln!(self.out, "⏳ Generating your itinerary...")?;
                if let Err(e) = wizard.retry().await {
                    writeln!(self.out, "❌ {e}")?;
                }
                self.report_generation(wizard)?;
            }
            "p" | "print" if status == GenerationStatus::Ready => {
                match wizard.print(printer).await {
                    Ok(()) => writeln!(self.out, "🖨️  Sent to {} printer", printer.name())?,
                    Err(e) => writeln!(self.out, "❌ {e}")?,
                }
            }
            "s" | "start over" | "restart" => {
                wizard.reset();
                writeln!(self.out, "Starting over.")?;
            }
            "q" => return Ok(StepInput::Quit),
            _ => writeln!(self.out, "Please choose one of: {options}")?,
        }
        Ok(StepInput::Filled)
    }

    fn show_progress(&mut self, wizard: &mut WizardController) -> Result<()> {
        let view = wizard.view_state();
        let markers: Vec<String> = view
            .progress
            .iter()
            .map(|entry| match entry.marker {
                crate::wizard::StepMarker::Completed => format!("✓{}", entry.number),
                crate::wizard::StepMarker::Active => format!("[{}]", entry.number),
                crate::wizard::StepMarker::Pending => entry.number.to_string(),
            })
            .collect();
        writeln!(self.out, "\nStep {}", markers.join(" · "))?;

        // Terminal output is not transient: show once, then close.
        for notification in &view.notifications {
            let icon = match notification.kind {
                NotificationKind::Error => "❌",
                NotificationKind::Info => "ℹ️ ",
            };
            writeln!(self.out, "{icon} {}", notification.message)?;
            wizard.dismiss_notification(notification.id);
        }
        Ok(())
    }

    fn report(&mut self, wizard: &WizardController, advance: &Advance) -> Result<()> {
        if let Advance::Submitted(_) = advance {
            self.report_generation(wizard)?;
        }
        Ok(())
    }

    fn report_generation(&mut self, wizard: &WizardController) -> Result<()> {
        let session = wizard.session();
        match session.generation {
            GenerationStatus::Ready => {
                writeln!(self.out, "\n✅ Your itinerary is ready!")?;
                if let Some(result) = &session.result {
                    let days = result
                        .itinerary
                        .as_ref()
                        .and_then(|it| it.days.as_deref())
                        .unwrap_or_default();
                    for (index, day) in days.iter().enumerate() {
                        writeln!(self.out, "\nDay {}: {}", day.label(index), day.title)?;
                        for activity in &day.activities {
                            let (time, text) = split_activity(activity);
                            if time.is_empty() {
                                writeln!(self.out, "   • {text}")?;
                            } else {
                                writeln!(self.out, "   • {time:>8}  {text}")?;
                            }
                        }
                    }
                    writeln!(self.out, "\n🏨 {} hotel suggestion(s)", result.hotels.len())?;
                }
            }
            GenerationStatus::Failed => {
                writeln!(
                    self.out,
                    "\n⚠️  Oops! Something went wrong. Check your connection and try again."
                )?;
            }
            GenerationStatus::Idle | GenerationStatus::Loading => {}
        }
        Ok(())
    }
}

/// Split a comma separated answer, dropping blanks and the word "none".
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != "none")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::client::SubmissionClient;
    use crate::error::{PrintError, SubmissionError};
    use crate::itinerary::ItineraryResult;
    use crate::wizard::Profile;

    struct CannedClient;

    #[async_trait]
    impl SubmissionClient for CannedClient {
        async fn create_profile(&self, _profile: &Profile) -> std::result::Result<String, SubmissionError> {
            Ok("user_1".to_string())
        }

        async fn generate_itinerary(
            &self,
            _user_id: &str,
        ) -> std::result::Result<ItineraryResult, SubmissionError> {
            Ok(serde_json::from_value(serde_json::json!({
                "itinerary": {"days": [{"day": 1, "title": "Old City",
                                        "activities": ["9:00 AM - Visit museum"]}]}
            }))
            .unwrap())
        }
    }

    struct NullPrinter;

    #[async_trait]
    impl Printer for NullPrinter {
        fn name(&self) -> &str {
            "null"
        }
        async fn print(&self, _document: &str) -> std::result::Result<(), PrintError> {
            Ok(())
        }
    }

    async fn run_script(script: &str) -> (String, WizardController) {
        let mut wizard = WizardController::with_defaults(Arc::new(CannedClient));
        let mut frontend = TerminalFrontend::new(script.as_bytes(), Vec::new());
        frontend.run(&mut wizard, &NullPrinter).await.unwrap();
        let output = String::from_utf8(frontend.into_output()).unwrap();
        (output, wizard)
    }

    #[test]
    fn list_splitting() {
        assert_eq!(split_list("Heart, , mobility "), vec!["heart", "mobility"]);
        assert!(split_list("none").is_empty());
    }

    #[tokio::test]
    async fn full_session_generates_and_prints() {
        let script = "Asha\ncouple\n\nnone\nJaipur\n3\nmedium\nculture\np\nq\n";
        let (output, wizard) = run_script(script).await;
        assert!(output.contains("Your itinerary is ready"));
        assert!(output.contains("Visit museum"));
        assert!(output.contains("Sent to null printer"));
        assert_eq!(wizard.session().submitted.as_ref().unwrap().companions, 2);
    }

    #[tokio::test]
    async fn validation_errors_are_shown_and_step_repeats() {
        let script = "\nalone\nnone\nquit\n";
        let (output, wizard) = run_script(script).await;
        assert!(output.contains("Please enter your name"));
        assert_eq!(wizard.current_step(), WizardStep::PersonalInfo);
    }

    #[tokio::test]
    async fn back_returns_to_previous_step() {
        let script = "Ravi\nalone\nnone\nback\nquit\n";
        let (_output, wizard) = run_script(script).await;
        assert_eq!(wizard.current_step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.session().form.name, "Ravi");
    }

    #[tokio::test]
    async fn eof_quits() {
        let (output, _wizard) = run_script("Ravi\n").await;
        assert!(output.contains("Goodbye!"));
    }
}

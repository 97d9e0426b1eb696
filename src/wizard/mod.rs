//! Travel profile wizard: three form steps and a result panel.
//!
//! The controller validates and collects each form step into a profile
//! draft, submits the finished profile, and exposes a derived `ViewState`
//! for whichever front-end draws the panels.

pub mod collect;
pub mod controller;
pub mod form;
pub mod model;
pub mod notify;
pub mod state;
pub mod validate;
pub mod view;

pub use controller::{Advance, PendingGeneration, WizardController, WizardSession};
pub use form::FormValues;
pub use model::{BudgetRange, Profile, ProfileDraft, TravelType};
pub use notify::{Notification, NotificationKind, Notifications};
pub use state::{StepMarker, StepState, WizardStep};
pub use view::{GenerationStatus, ProgressEntry, ViewState};

use uuid::Uuid;

use crate::client::api::{CaseApiClient, ClientError};
use crate::models::claim::NewClaim;

/// Fallback message when the server gives no usable error text.
const GENERIC_SUBMIT_ERROR: &str =
    "Something went wrong while submitting your claim. Please try again.";

/// Which screen of the intake flow is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// The FAQ must be completed before the form becomes visible.
    #[default]
    FaqGate,
    Editing,
    Submitting,
    Submitted,
}

/// Editable text fields of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OrderNumber,
    Email,
    Name,
    Street,
    PostalCode,
    City,
    PhoneNumber,
    ProblemDescription,
}

/// One user interaction with the intake flow.
#[derive(Debug, Clone)]
pub enum FormEvent {
    FaqCompleted,
    FieldChanged(Field, String),
    /// Brand is chosen through the selector sub-component; picking a new
    /// brand resets the notification acknowledgment, since the disclosure
    /// is tied to the selected brand.
    BrandSelected(String),
    NotificationAcknowledged(bool),
    SubmitStarted,
    SubmitSucceeded(Uuid),
    SubmitFailed(String),
}

/// Immutable intake form state, advanced only through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeFormState {
    pub phase: FormPhase,
    pub order_number: String,
    pub email: String,
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub brand: String,
    pub problem_description: String,
    pub notification_acknowledged: bool,
    pub error: Option<String>,
    pub claim_id: Option<Uuid>,
}

impl IntakeFormState {
    /// Submission stays blocked until every required field is filled, the
    /// notification disclosure is acknowledged, and no request is in flight.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing
            && self.notification_acknowledged
            && !self.order_number.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.street.trim().is_empty()
            && !self.postal_code.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.phone_number.trim().is_empty()
            && !self.brand.trim().is_empty()
            && !self.problem_description.trim().is_empty()
    }

    /// The JSON body posted to the create-claim endpoint.
    pub fn payload(&self) -> NewClaim {
        NewClaim {
            order_number: self.order_number.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            street: self.street.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
            phone_number: self.phone_number.clone(),
            brand: self.brand.clone(),
            problem_description: self.problem_description.clone(),
            notification_acknowledged: self.notification_acknowledged,
        }
    }
}

/// Pure reducer over the intake form state machine.
///
/// `FaqGate → Editing → Submitting → Submitted`, with a failed submit
/// falling back to `Editing` carrying the error text. Events that do not
/// apply in the current phase are ignored.
pub fn reduce(state: IntakeFormState, event: FormEvent) -> IntakeFormState {
    let mut next = state;
    match event {
        FormEvent::FaqCompleted => {
            if next.phase == FormPhase::FaqGate {
                next.phase = FormPhase::Editing;
            }
        }
        FormEvent::FieldChanged(field, value) => {
            if next.phase == FormPhase::Editing {
                match field {
                    Field::OrderNumber => next.order_number = value,
                    Field::Email => next.email = value,
                    Field::Name => next.name = value,
                    Field::Street => next.street = value,
                    Field::PostalCode => next.postal_code = value,
                    Field::City => next.city = value,
                    Field::PhoneNumber => next.phone_number = value,
                    Field::ProblemDescription => next.problem_description = value,
                }
            }
        }
        FormEvent::BrandSelected(brand) => {
            if next.phase == FormPhase::Editing {
                next.brand = brand;
                next.notification_acknowledged = false;
            }
        }
        FormEvent::NotificationAcknowledged(acknowledged) => {
            if next.phase == FormPhase::Editing {
                next.notification_acknowledged = acknowledged;
            }
        }
        FormEvent::SubmitStarted => {
            if next.can_submit() {
                next.error = None;
                next.phase = FormPhase::Submitting;
            }
        }
        FormEvent::SubmitSucceeded(id) => {
            if next.phase == FormPhase::Submitting {
                next.phase = FormPhase::Submitted;
                next.claim_id = Some(id);
            }
        }
        FormEvent::SubmitFailed(message) => {
            if next.phase == FormPhase::Submitting {
                next.phase = FormPhase::Editing;
                next.error = Some(message);
            }
        }
    }
    next
}

/// Drives the intake form against the API. Owns the state; nothing else
/// mutates it, so there is no update racing a dropped driver.
pub struct IntakeForm {
    state: IntakeFormState,
    api: CaseApiClient,
}

impl IntakeForm {
    pub fn new(api: CaseApiClient) -> Self {
        Self {
            state: IntakeFormState::default(),
            api,
        }
    }

    pub fn state(&self) -> &IntakeFormState {
        &self.state
    }

    pub fn apply(&mut self, event: FormEvent) {
        self.state = reduce(self.state.clone(), event);
    }

    /// Submit the claim. Issues no network request unless the gate
    /// conditions hold; returns the created claim id for navigation to the
    /// status view.
    pub async fn submit(&mut self) -> Option<Uuid> {
        if !self.state.can_submit() {
            return None;
        }
        self.apply(FormEvent::SubmitStarted);

        let result = self.api.create_claim(&self.state.payload()).await;
        match result {
            Ok(claim) => {
                self.apply(FormEvent::SubmitSucceeded(claim.id));
                Some(claim.id)
            }
            Err(ClientError::Api { message, .. }) => {
                self.apply(FormEvent::SubmitFailed(message));
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "claim submission failed in transit");
                self.apply(FormEvent::SubmitFailed(GENERIC_SUBMIT_ERROR.to_string()));
                None
            }
        }
    }
}

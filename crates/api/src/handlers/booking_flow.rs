//! Handlers for the booking flow resource.
//!
//! A flow is addressed by the UUID issued at open time. Every mutating
//! endpoint returns the full [`FlowSnapshot`] so clients stay in sync
//! after stage changes they did not ask for (leaving the wizard at its
//! entry boundary, for instance).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inkflow_core::design::FlashDesignRef;
use inkflow_core::draft::{BookingDraft, DraftUpdate};
use inkflow_core::fields::{BookingOption, TattooPlacement, TattooSize, Weekday};
use inkflow_core::flow::{BackOutcome, BookingFlow, Stage};
use inkflow_core::image::ImageAttachment;
use inkflow_core::steps::{WizardStep, TOTAL_STEPS};
use inkflow_core::submission;
use inkflow_core::wizard::WizardSession;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Body for `select-option`.
#[derive(Debug, Deserialize)]
pub struct SelectOptionBody {
    pub option: BookingOption,
}

/// Everything a client needs to render one flow.
#[derive(Debug, Serialize)]
pub struct FlowSnapshot {
    pub id: Uuid,
    pub stage: Stage,
    /// Present only while the flow is in the wizard stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wizard: Option<WizardView>,
}

impl FlowSnapshot {
    fn of(id: Uuid, flow: &BookingFlow) -> Self {
        Self {
            id,
            stage: flow.stage(),
            wizard: flow.session().map(WizardView::of),
        }
    }
}

/// The wizard portion of a [`FlowSnapshot`].
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub label: &'static str,
    pub prompt: &'static str,
    pub submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_design: Option<FlashDesignRef>,
    pub draft: DraftView,
}

impl WizardView {
    fn of(session: &WizardSession) -> Self {
        let step = session.current_step();
        Self {
            step,
            step_number: step.to_number(),
            total_steps: TOTAL_STEPS,
            label: step.label(),
            prompt: step.prompt(),
            submitting: session.is_submitting(),
            linked_design: session.entry().linked_design().cloned(),
            draft: DraftView::of(session.draft()),
        }
    }
}

/// Draft progress as the client sees it. Image bytes never travel back;
/// attachments are listed by name and size only.
#[derive(Debug, Serialize)]
pub struct DraftView {
    pub idea: String,
    pub reference_images: Vec<ImageView>,
    pub size: Option<TattooSize>,
    pub placement: Option<TattooPlacement>,
    pub available_days: Vec<Weekday>,
    pub pronouns: String,
    pub age_confirmed: bool,
    pub allergies: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl DraftView {
    fn of(draft: &BookingDraft) -> Self {
        Self {
            idea: draft.idea().to_string(),
            reference_images: draft
                .reference_images()
                .iter()
                .enumerate()
                .map(|(index, image)| ImageView {
                    index,
                    file_name: image.file_name().to_string(),
                    content_type: image.content_type(),
                    size_bytes: image.size_bytes(),
                })
                .collect(),
            size: draft.size(),
            placement: draft.placement(),
            available_days: draft.available_days().iter().copied().collect(),
            pronouns: draft.pronouns().to_string(),
            age_confirmed: draft.age_confirmed(),
            allergies: draft.allergies().to_string(),
            first_name: draft.first_name().to_string(),
            last_name: draft.last_name().to_string(),
            email: draft.email().to_string(),
            phone: draft.phone().to_string(),
        }
    }
}

/// One attached reference image, as listed in [`DraftView`].
#[derive(Debug, Serialize)]
pub struct ImageView {
    pub index: usize,
    pub file_name: String,
    pub content_type: &'static str,
    pub size_bytes: usize,
}

// ---------------------------------------------------------------------------
// POST /booking-flows
// ---------------------------------------------------------------------------

/// Open a fresh booking flow on the choosing screen.
pub async fn open_flow(State(state): State<AppState>) -> impl IntoResponse {
    let (id, stage) = state.flows.open().await;
    (
        StatusCode::CREATED,
        Json(DataResponse {
            data: FlowSnapshot {
                id,
                stage,
                wizard: None,
            },
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /booking-flows/{id}
// ---------------------------------------------------------------------------

/// Get the current snapshot of a flow.
pub async fn get_flow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .flows
        .with_flow(id, |flow| Ok(FlowSnapshot::of(id, flow)))
        .await?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/close
// ---------------------------------------------------------------------------

/// Close a flow, discarding any wizard session and draft.
pub async fn close_flow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.flows.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/select-option
// ---------------------------------------------------------------------------

/// From the choosing screen, enter the custom wizard or the flash gallery.
pub async fn select_option(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectOptionBody>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .flows
        .with_flow(id, |flow| {
            flow.select_option(body.option)?;
            Ok(FlowSnapshot::of(id, flow))
        })
        .await?;

    tracing::info!(
        flow_id = %id,
        stage = snapshot.stage.as_str(),
        "Booking option selected"
    );

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/select-design
// ---------------------------------------------------------------------------

/// From the gallery, enter the wizard seeded with the chosen flash design.
pub async fn select_design(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(design): Json<FlashDesignRef>,
) -> AppResult<impl IntoResponse> {
    let design_id = design.id;
    let snapshot = state
        .flows
        .with_flow(id, |flow| {
            flow.select_design(design)?;
            Ok(FlowSnapshot::of(id, flow))
        })
        .await?;

    tracing::info!(flow_id = %id, design_id, "Flash design selected");

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// PUT /booking-flows/{id}/draft
// ---------------------------------------------------------------------------

/// Write one draft field. Writes land on any step; validation gates
/// navigation, not typing.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<DraftUpdate>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state
        .flows
        .with_flow(id, |flow| {
            flow.apply(update)?;
            Ok(FlowSnapshot::of(id, flow))
        })
        .await?;

    tracing::debug!(flow_id = %id, "Draft updated");

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/images
// ---------------------------------------------------------------------------

/// Attach a reference image from a multipart `image` field.
///
/// The payload is sniffed; the declared file name and content type are
/// display metadata only.
pub async fn attach_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("reference-image").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload = Some((file_name, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;

    let image = ImageAttachment::from_bytes(file_name, data)?;
    let file_name = image.file_name().to_string();
    let content_type = image.content_type();
    let size_bytes = image.size_bytes();

    let index = state
        .flows
        .with_flow(id, |flow| flow.attach_image(image))
        .await?;

    tracing::debug!(flow_id = %id, index, file_name = %file_name, "Reference image attached");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ImageView {
                index,
                file_name,
                content_type,
                size_bytes,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /booking-flows/{id}/images/{index}
// ---------------------------------------------------------------------------

/// Detach the reference image at the given position.
pub async fn detach_image(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<StatusCode> {
    state
        .flows
        .with_flow(id, |flow| flow.detach_image(index))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/next
// ---------------------------------------------------------------------------

/// Advance the wizard one step, gated by the current step's predicate.
pub async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (step, snapshot) = state
        .flows
        .with_flow(id, |flow| {
            let step = flow.next()?;
            Ok((step, FlowSnapshot::of(id, flow)))
        })
        .await?;

    tracing::debug!(flow_id = %id, step = step.to_number(), "Advanced to next step");

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/previous
// ---------------------------------------------------------------------------

/// Step back one step. At the wizard's entry boundary this leaves the
/// wizard instead: back to choosing for a custom session, back to the
/// gallery for a flash one.
pub async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (outcome, snapshot) = state
        .flows
        .with_flow(id, |flow| {
            let outcome = flow.previous()?;
            Ok((outcome, FlowSnapshot::of(id, flow)))
        })
        .await?;

    match outcome {
        BackOutcome::MovedTo(step) => {
            tracing::debug!(flow_id = %id, step = step.to_number(), "Stepped back");
        }
        BackOutcome::ReturnedTo(stage) => {
            tracing::info!(
                flow_id = %id,
                stage = stage.as_str(),
                "Left the wizard at its entry boundary"
            );
        }
    }

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /booking-flows/{id}/submit
// ---------------------------------------------------------------------------

/// Submit the finished draft.
///
/// Latches the session, snapshots the draft and runs the upload/create
/// pipeline without holding the registry lock. Success closes the flow;
/// failure releases the latch with the draft intact for a retry.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let draft = state
        .flows
        .with_flow(id, |flow| flow.begin_submit())
        .await?;

    let result = submission::submit(state.store.as_ref(), &draft).await;

    match result {
        Ok(receipt) => {
            state.flows.finish(id, true).await;
            tracing::info!(
                flow_id = %id,
                booking_id = receipt.booking.id,
                photo_count = receipt.photo_urls.len(),
                failed_uploads = receipt.failed_uploads,
                "Booking submitted"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
        }
        Err(error) => {
            state.flows.finish(id, false).await;
            Err(AppError::Core(error))
        }
    }
}

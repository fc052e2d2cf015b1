//! Server-rendered admin pages.
//!
//! Each request builds a [`PageController`] over the database stores, so the
//! pages run the same mount/submit/delete flow as any other client of the
//! [`admin::Api`] trait. Forms post back to the page; success answers with a
//! `303` redirect, failure re-renders the page with the error and the input.

use std::sync::Arc;

use admin::label::{character_options, relic_options, relic_set_options, stat_options};
use admin::{
    Api, ApiError, CharacterBuild, FormState, Mode, PageController, Record, RelicPiece, Slot,
    unique_substats,
};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::AppState;
use crate::builds::BuildStore;
use crate::error::{AppError, Result};
use crate::relics::PieceStore;
use crate::templates::render;

const BUILD_PATH: &str = "/build";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/body", get(|| async { Redirect::permanent("/relic/bodypiece") }))
        .route("/relic/:slot", get(piece_page).post(submit_piece))
        .route("/relic/:slot/delete", post(delete_piece))
        .route(BUILD_PATH, get(build_page).post(submit_build))
        .route("/build/delete", post(delete_build))
}

#[derive(Serialize)]
struct NavLink {
    href: String,
    label: String,
}

fn nav() -> Vec<NavLink> {
    Slot::ALL
        .iter()
        .map(|slot| NavLink {
            href: slot_path(*slot),
            label: format!("{}s", slot.title()),
        })
        .chain(std::iter::once(NavLink {
            href: BUILD_PATH.into(),
            label: "Character Builds".into(),
        }))
        .collect()
}

pub fn slot_path(slot: Slot) -> String {
    format!("/relic/{slot}")
}

fn parse_slot(name: &str) -> Result<Slot> {
    name.parse()
        .map_err(|_| AppError::NotFound(format!("no relic slot named `{name}`")))
}

/// HTTP status a failed controller call re-renders its page with.
fn status_of(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Conflict(_) => StatusCode::CONFLICT,
        ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
        ApiError::Unexpected { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Split the hidden `mode` input from the submitted field pairs.
fn form_mode(pairs: &[(String, String)]) -> Result<Mode> {
    match pairs.iter().find(|(name, _)| name == "mode") {
        Some((_, value)) => value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("unknown form mode `{value}`"))),
        None => Ok(Mode::Creating),
    }
}

fn restore<R: Record>(pairs: &[(String, String)]) -> Result<(FormState<R>, Option<String>)> {
    let mode = form_mode(pairs)?;
    let (form, error) =
        FormState::restore(mode, pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Ok((form, error.map(|e| e.to_string())))
}

/// Fields every entity page renders.
fn page_context<R: Record, A: Api<R>>(
    page: &PageController<R, A>,
    heading: &str,
    noun: &str,
    action: &str,
    error: Option<String>,
) -> Context {
    let mut ctx = Context::new();
    ctx.insert("nav", &nav());
    ctx.insert("heading", heading);
    ctx.insert("noun", noun);
    ctx.insert("action", action);
    ctx.insert("mode", page.form().mode().as_str());
    ctx.insert("editing", &page.form().is_editing());
    ctx.insert("record", page.form().record());
    ctx.insert("table", &page.table());
    let error = error.or_else(|| page.last_error().map(ToString::to_string));
    ctx.insert("error", &error);
    ctx
}

fn html(status: StatusCode, template: &str, ctx: &Context) -> Result<Response> {
    Ok((status, Html(render(template, ctx)?)).into_response())
}

async fn index() -> Result<Response> {
    let mut ctx = Context::new();
    ctx.insert("nav", &nav());
    html(StatusCode::OK, "index.html", &ctx)
}

#[derive(Debug, Default, Deserialize)]
struct EditParam {
    edit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdForm {
    id: String,
}

#[derive(Serialize)]
struct SubstatInput {
    n: usize,
    value: f64,
    options: Vec<admin::SelectOption>,
}

fn render_pieces(
    slot: Slot,
    page: &PageController<RelicPiece, PieceStore>,
    error: Option<String>,
    status: StatusCode,
) -> Result<Response> {
    let record = page.form().record();
    let mut ctx = page_context(
        page,
        &format!("Manage {}s", slot.title()),
        slot.title(),
        &slot_path(slot),
        error,
    );
    ctx.insert(
        "set_options",
        &relic_set_options(page.references(), slot, &record.relic_set_id),
    );
    ctx.insert(
        "main_options",
        &stat_options("Select Main Stat", slot.main_stats(), &record.main_stat),
    );
    let substat_names = unique_substats();
    let substats: Vec<SubstatInput> = record
        .substats()
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| SubstatInput {
            n: i + 1,
            value,
            options: stat_options(&format!("Select Substat {}", i + 1), &substat_names, name),
        })
        .collect();
    ctx.insert("substats", &substats);
    html(status, "pieces.html", &ctx)
}

/// A mounted page, plus the status to render with when mounting failed. The
/// failure itself is kept on the page as its last error.
type Mounted<R, A> = (PageController<R, A>, Option<StatusCode>);

async fn mount<R: Record, A: Api<R>>(api: A) -> Mounted<R, A> {
    let mut page = PageController::new(api);
    let failed = page.mount().await.err().map(|err| status_of(&err));
    (page, failed)
}

async fn piece_page(
    Path(slot): Path<String>,
    Query(params): Query<EditParam>,
    State(state): State<Arc<AppState>>,
) -> Result<Response> {
    let slot = parse_slot(&slot)?;
    let (mut page, failed) = mount(state.pieces(slot)).await;
    if let Some(status) = failed {
        return render_pieces(slot, &page, None, status);
    }
    if let Some(id) = params.edit {
        if !page.begin_edit_by_id(&id) {
            let error = format!("{} `{id}` does not exist", slot.table());
            return render_pieces(slot, &page, Some(error), StatusCode::NOT_FOUND);
        }
    }
    render_pieces(slot, &page, None, StatusCode::OK)
}

async fn submit_piece(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let slot = parse_slot(&slot)?;
    let (form, form_error) = restore::<RelicPiece>(&pairs)?;
    let (mut page, failed) = mount(state.pieces(slot)).await;
    page.load_form(form);
    if let Some(status) = failed {
        return render_pieces(slot, &page, None, status);
    }
    if form_error.is_some() {
        return render_pieces(slot, &page, form_error, StatusCode::UNPROCESSABLE_ENTITY);
    }
    match page.submit().await {
        Ok(()) => Ok(Redirect::to(&slot_path(slot)).into_response()),
        Err(err) => render_pieces(slot, &page, None, status_of(&err)),
    }
}

async fn delete_piece(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdForm>,
) -> Result<Response> {
    let slot = parse_slot(&slot)?;
    let (mut page, failed) = mount(state.pieces(slot)).await;
    if let Some(status) = failed {
        return render_pieces(slot, &page, None, status);
    }
    match page.delete(&form.id).await {
        Ok(()) => Ok(Redirect::to(&slot_path(slot)).into_response()),
        Err(err) => render_pieces(slot, &page, None, status_of(&err)),
    }
}

#[derive(Serialize)]
struct SlotInput {
    field: &'static str,
    options: Vec<admin::SelectOption>,
}

fn render_builds(
    page: &PageController<CharacterBuild, BuildStore>,
    error: Option<String>,
    status: StatusCode,
) -> Result<Response> {
    let record = page.form().record();
    let refs = page.references();
    let mut ctx = page_context(
        page,
        "Manage Character Builds",
        "Character Build",
        BUILD_PATH,
        error,
    );
    ctx.insert(
        "character_options",
        &character_options(&refs.characters, &record.playable_character_id),
    );
    let slots: Vec<SlotInput> = Slot::ALL
        .iter()
        .map(|slot| SlotInput {
            field: slot.build_field(),
            options: relic_options(*slot, refs.relics.for_slot(*slot), record.relic(*slot)),
        })
        .collect();
    ctx.insert("slots", &slots);
    html(status, "builds.html", &ctx)
}

async fn build_page(
    Query(params): Query<EditParam>,
    State(state): State<Arc<AppState>>,
) -> Result<Response> {
    let (mut page, failed) = mount(state.builds()).await;
    if let Some(status) = failed {
        return render_builds(&page, None, status);
    }
    if let Some(id) = params.edit {
        if !page.begin_edit_by_id(&id) {
            let error = format!("character_build `{id}` does not exist");
            return render_builds(&page, Some(error), StatusCode::NOT_FOUND);
        }
    }
    render_builds(&page, None, StatusCode::OK)
}

async fn submit_build(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let (form, form_error) = restore::<CharacterBuild>(&pairs)?;
    let (mut page, failed) = mount(state.builds()).await;
    page.load_form(form);
    if let Some(status) = failed {
        return render_builds(&page, None, status);
    }
    if form_error.is_some() {
        return render_builds(&page, form_error, StatusCode::UNPROCESSABLE_ENTITY);
    }
    match page.submit().await {
        Ok(()) => Ok(Redirect::to(BUILD_PATH).into_response()),
        Err(err) => render_builds(&page, None, status_of(&err)),
    }
}

async fn delete_build(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdForm>,
) -> Result<Response> {
    let (mut page, failed) = mount(state.builds()).await;
    if let Some(status) = failed {
        return render_builds(&page, None, status);
    }
    match page.delete(&form.id).await {
        Ok(()) => Ok(Redirect::to(BUILD_PATH).into_response()),
        Err(err) => render_builds(&page, None, status_of(&err)),
    }
}

//! Character build storage and the `/api/character_build` endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use admin::{
    Api, ApiResult, BuildReferences, Character, CharacterBuild, Relic, RelicCatalog, RelicSet,
    Slot,
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::AppState;
use crate::entities::{character_build, playable_characters, relic_set};
use crate::error::{AppError, Result};
use crate::relics::{Body, IdParam, PieceStore, ReadParams};

#[derive(Clone, Debug)]
pub struct BuildStore {
    db: DatabaseConnection,
}

impl BuildStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<CharacterBuild>> {
        let builds = character_build::Entity::find()
            .order_by_asc(character_build::Column::Id)
            .all(&self.db)
            .await?;
        Ok(builds.into_iter().map(CharacterBuild::from).collect())
    }

    pub async fn characters(&self) -> Result<Vec<Character>> {
        let characters = playable_characters::Entity::find()
            .order_by_asc(playable_characters::Column::Name)
            .all(&self.db)
            .await?;
        Ok(characters.into_iter().map(Character::from).collect())
    }

    /// Every stored piece, joined with its relic set for display.
    pub async fn relics(&self) -> Result<RelicCatalog> {
        let sets: HashMap<String, RelicSet> = relic_set::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), RelicSet::from(m)))
            .collect();
        let mut catalog = RelicCatalog::default();
        for slot in Slot::ALL {
            let pieces = PieceStore::new(self.db.clone(), slot).list().await?;
            let relics = pieces
                .iter()
                .map(|piece| Relic::from_piece(piece, sets.get(&piece.relic_set_id), slot))
                .collect();
            catalog.set_slot(slot, relics);
        }
        Ok(catalog)
    }

    pub async fn references(&self) -> Result<BuildReferences> {
        Ok(BuildReferences {
            characters: self.characters().await?,
            relics: self.relics().await?,
        })
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let found = character_build::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }

    /// Check that the character and every slot piece exist.
    async fn check(&self, build: &CharacterBuild) -> Result<()> {
        if build.playable_character_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Playable_Characters_id must not be empty".into(),
            ));
        }
        let character = playable_characters::Entity::find_by_id(build.playable_character_id.clone())
            .one(&self.db)
            .await?;
        if character.is_none() {
            return Err(AppError::Validation(format!(
                "unknown character `{}`",
                build.playable_character_id
            )));
        }
        for slot in Slot::ALL {
            let id = build.relic(slot);
            if id.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "{} must not be empty",
                    slot.build_field()
                )));
            }
            if !PieceStore::new(self.db.clone(), slot).exists(id).await? {
                return Err(AppError::Validation(format!(
                    "unknown {} `{id}`",
                    slot.table()
                )));
            }
        }
        Ok(())
    }

    /// Insert `build`, generating an id when it has none. Returns the stored
    /// build.
    pub async fn create(&self, build: &CharacterBuild) -> Result<CharacterBuild> {
        let mut build = build.clone();
        if build.id.trim().is_empty() {
            build.id = Uuid::new_v4().to_string();
        }
        self.check(&build).await?;
        if self.exists(&build.id).await? {
            return Err(AppError::Conflict(format!(
                "character_build `{}` already exists",
                build.id
            )));
        }
        character_build::Entity::insert(character_build::ActiveModel::from(&build))
            .exec_without_returning(&self.db)
            .await?;
        log::debug!("created character_build `{}`", build.id);
        Ok(build)
    }

    pub async fn update(&self, build: &CharacterBuild) -> Result<()> {
        if !self.exists(&build.id).await? {
            return Err(AppError::NotFound(format!(
                "character_build `{}` does not exist",
                build.id
            )));
        }
        self.check(build).await?;
        character_build::ActiveModel::from(build)
            .update(&self.db)
            .await?;
        log::debug!("updated character_build `{}`", build.id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = character_build::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from(e).on_delete())?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "character_build `{id}` does not exist"
            )));
        }
        log::debug!("deleted character_build `{id}`");
        Ok(())
    }
}

#[async_trait]
impl Api<CharacterBuild> for BuildStore {
    async fn list(&self) -> ApiResult<Vec<CharacterBuild>> {
        Ok(BuildStore::list(self).await?)
    }

    async fn references(&self) -> ApiResult<BuildReferences> {
        Ok(BuildStore::references(self).await?)
    }

    async fn create(&self, record: &CharacterBuild) -> ApiResult<()> {
        BuildStore::create(self, record).await?;
        Ok(())
    }

    async fn update(&self, record: &CharacterBuild) -> ApiResult<()> {
        Ok(BuildStore::update(self, record).await?)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        Ok(BuildStore::delete(self, id).await?)
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/character_build",
        get(read).post(create).put(update).delete(delete),
    )
}

async fn read(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadParams>,
) -> Result<Response> {
    let store = state.builds();
    match params.action.as_deref() {
        None => Ok(Json(store.list().await?).into_response()),
        Some("get-characters") => Ok(Json(store.characters().await?).into_response()),
        Some("get-relics") => Ok(Json(store.relics().await?).into_response()),
        Some(other) => Err(AppError::BadRequest(format!("unknown action `{other}`"))),
    }
}

async fn create(
    State(state): State<Arc<AppState>>,
    body: Body<CharacterBuild>,
) -> Result<impl IntoResponse> {
    let Json(build) = body?;
    let build = state
        .builds()
        .create(&build)
        .await
        .inspect_err(|e| log::warn!("rejected character_build create: {e}"))?;
    Ok((StatusCode::CREATED, Json(build)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    body: Body<CharacterBuild>,
) -> Result<Json<CharacterBuild>> {
    let Json(build) = body?;
    state
        .builds()
        .update(&build)
        .await
        .inspect_err(|e| log::warn!("rejected character_build update: {e}"))?;
    Ok(Json(build))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParam>,
) -> Result<StatusCode> {
    let id = params.required()?;
    state
        .builds()
        .delete(&id)
        .await
        .inspect_err(|e| log::warn!("rejected character_build delete of `{id}`: {e}"))?;
    Ok(StatusCode::OK)
}

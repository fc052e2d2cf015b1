//! Relic piece storage and the `/api/relic_<slot>` endpoints.
//!
//! All six piece tables share one layout, so a [`PieceStore`] is just a
//! connection plus the [`Slot`] naming its table.

use std::collections::HashSet;
use std::sync::Arc;

use admin::{Api, ApiResult, RelicPiece, RelicSet, SUBSTATS, Slot, Stat};
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::sea_query::{Alias, Expr, Order, Query as Sql, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;

use crate::AppState;
use crate::entities::{character_build, relic_set};
use crate::error::{AppError, Result};

const COLUMNS: [&str; 12] = [
    "id",
    "main_stat",
    "main_stat_num",
    "substat_1",
    "substat_1_num",
    "substat_2",
    "substat_2_num",
    "substat_3",
    "substat_3_num",
    "substat_4",
    "substat_4_num",
    "relic_set_id",
];

#[derive(Debug, FromQueryResult)]
struct PieceRow {
    id: String,
    main_stat: String,
    main_stat_num: i32,
    substat_1: String,
    substat_1_num: f64,
    substat_2: String,
    substat_2_num: f64,
    substat_3: String,
    substat_3_num: f64,
    substat_4: String,
    substat_4_num: f64,
    relic_set_id: String,
}

impl From<PieceRow> for RelicPiece {
    fn from(r: PieceRow) -> Self {
        Self {
            id: r.id,
            main_stat: r.main_stat,
            main_stat_num: r.main_stat_num,
            substat_1: r.substat_1,
            substat_1_num: r.substat_1_num,
            substat_2: r.substat_2,
            substat_2_num: r.substat_2_num,
            substat_3: r.substat_3,
            substat_3_num: r.substat_3_num,
            substat_4: r.substat_4,
            substat_4_num: r.substat_4_num,
            relic_set_id: r.relic_set_id,
        }
    }
}

/// Column values of `piece`, in [`COLUMNS`] order.
fn values(piece: &RelicPiece) -> [SimpleExpr; 12] {
    [
        Expr::val(piece.id.as_str()).into(),
        Expr::val(piece.main_stat.as_str()).into(),
        Expr::val(piece.main_stat_num).into(),
        Expr::val(piece.substat_1.as_str()).into(),
        Expr::val(piece.substat_1_num).into(),
        Expr::val(piece.substat_2.as_str()).into(),
        Expr::val(piece.substat_2_num).into(),
        Expr::val(piece.substat_3.as_str()).into(),
        Expr::val(piece.substat_3_num).into(),
        Expr::val(piece.substat_4.as_str()).into(),
        Expr::val(piece.substat_4_num).into(),
        Expr::val(piece.relic_set_id.as_str()).into(),
    ]
}

/// Field checks that need no database access.
pub fn validate(slot: Slot, piece: &RelicPiece) -> Result<()> {
    if piece.id.trim().is_empty() {
        return Err(AppError::Validation("id must not be empty".into()));
    }
    let main = piece.main_stat.parse::<Stat>().ok();
    if !main.is_some_and(|stat| slot.main_stats().contains(&stat)) {
        return Err(AppError::Validation(format!(
            "`{}` is not a main stat of a {}",
            piece.main_stat,
            slot.title()
        )));
    }
    let mut seen = HashSet::new();
    for (n, (name, _)) in piece.substats().into_iter().enumerate() {
        let stat = name
            .parse::<Stat>()
            .ok()
            .filter(|stat| SUBSTATS.contains(stat))
            .ok_or_else(|| {
                AppError::Validation(format!("substat {} `{name}` is not a substat", n + 1))
            })?;
        if !seen.insert(stat) {
            return Err(AppError::Validation(format!(
                "substat `{name}` appears more than once"
            )));
        }
    }
    if piece.relic_set_id.trim().is_empty() {
        return Err(AppError::Validation("Relic_Set_id must not be empty".into()));
    }
    Ok(())
}

/// Relic sets that have a piece for `slot`.
pub async fn sets_for(db: &DatabaseConnection, slot: Slot) -> Result<Vec<RelicSet>> {
    let sets = relic_set::Entity::find()
        .order_by_asc(relic_set::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(RelicSet::from)
        .filter(|set| set.piece(slot).is_some())
        .collect();
    Ok(sets)
}

#[derive(Clone, Debug)]
pub struct PieceStore {
    db: DatabaseConnection,
    slot: Slot,
}

impl PieceStore {
    pub fn new(db: DatabaseConnection, slot: Slot) -> Self {
        Self { db, slot }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    fn table(&self) -> Alias {
        Alias::new(self.slot.table())
    }

    pub async fn list(&self) -> Result<Vec<RelicPiece>> {
        let stmt = Sql::select()
            .columns(COLUMNS.map(Alias::new))
            .from(self.table())
            .order_by(Alias::new("id"), Order::Asc)
            .to_owned();
        let backend = self.db.get_database_backend();
        let rows = PieceRow::find_by_statement(backend.build(&stmt))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(RelicPiece::from).collect())
    }

    pub async fn sets(&self) -> Result<Vec<RelicSet>> {
        sets_for(&self.db, self.slot).await
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let stmt = Sql::select()
            .column(Alias::new("id"))
            .from(self.table())
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .limit(1)
            .to_owned();
        let backend = self.db.get_database_backend();
        Ok(self.db.query_one(backend.build(&stmt)).await?.is_some())
    }

    async fn check(&self, piece: &RelicPiece) -> Result<()> {
        validate(self.slot, piece)?;
        let set = relic_set::Entity::find_by_id(piece.relic_set_id.clone())
            .one(&self.db)
            .await?
            .map(RelicSet::from)
            .ok_or_else(|| {
                AppError::Validation(format!("unknown relic set `{}`", piece.relic_set_id))
            })?;
        if set.piece(self.slot).is_none() {
            return Err(AppError::Validation(format!(
                "relic set `{}` has no {}",
                set.id, self.slot
            )));
        }
        Ok(())
    }

    pub async fn create(&self, piece: &RelicPiece) -> Result<()> {
        self.check(piece).await?;
        if self.exists(&piece.id).await? {
            return Err(AppError::Conflict(format!(
                "{} `{}` already exists",
                self.slot.table(),
                piece.id
            )));
        }
        let stmt = Sql::insert()
            .into_table(self.table())
            .columns(COLUMNS.map(Alias::new))
            .values(values(piece))
            .map_err(|e| AppError::BadRequest(e.to_string()))?
            .to_owned();
        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&stmt)).await?;
        log::debug!("created {} `{}`", self.slot.table(), piece.id);
        Ok(())
    }

    pub async fn update(&self, piece: &RelicPiece) -> Result<()> {
        self.check(piece).await?;
        if !self.exists(&piece.id).await? {
            return Err(self.not_found(&piece.id));
        }
        let changes = COLUMNS
            .into_iter()
            .zip(values(piece))
            .skip(1)
            .map(|(column, value)| (Alias::new(column), value));
        let stmt = Sql::update()
            .table(self.table())
            .values(changes)
            .and_where(Expr::col(Alias::new("id")).eq(piece.id.as_str()))
            .to_owned();
        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&stmt)).await?;
        log::debug!("updated {} `{}`", self.slot.table(), piece.id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let builds = character_build::Entity::find()
            .filter(character_build::slot_column(self.slot).eq(id))
            .count(&self.db)
            .await?;
        if builds > 0 {
            return Err(AppError::Conflict(format!(
                "{} `{id}` is used by {builds} build(s)",
                self.slot.table()
            )));
        }
        let stmt = Sql::delete()
            .from_table(self.table())
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned();
        let backend = self.db.get_database_backend();
        let result = self
            .db
            .execute(backend.build(&stmt))
            .await
            .map_err(|e| AppError::from(e).on_delete())?;
        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }
        log::debug!("deleted {} `{id}`", self.slot.table());
        Ok(())
    }

    fn not_found(&self, id: &str) -> AppError {
        AppError::NotFound(format!("{} `{id}` does not exist", self.slot.table()))
    }
}

#[async_trait]
impl Api<RelicPiece> for PieceStore {
    async fn list(&self) -> ApiResult<Vec<RelicPiece>> {
        Ok(PieceStore::list(self).await?)
    }

    async fn references(&self) -> ApiResult<Vec<RelicSet>> {
        Ok(self.sets().await?)
    }

    async fn create(&self, record: &RelicPiece) -> ApiResult<()> {
        Ok(PieceStore::create(self, record).await?)
    }

    async fn update(&self, record: &RelicPiece) -> ApiResult<()> {
        Ok(PieceStore::update(self, record).await?)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        Ok(PieceStore::delete(self, id).await?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
    pub action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdParam {
    pub id: Option<String>,
}

impl IdParam {
    pub fn required(self) -> Result<String> {
        self.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("missing `id` query parameter".into()))
    }
}

/// A JSON request body whose rejection is turned into an [`AppError`].
pub type Body<T> = std::result::Result<Json<T>, JsonRejection>;

/// JSON routes for every slot table, to be nested under `/api`.
pub fn routes() -> Router<Arc<AppState>> {
    let mut router = Router::new();
    for slot in Slot::ALL {
        router = router.route(
            &format!("/{}", slot.table()),
            get(
                move |state: State<Arc<AppState>>, params: Query<ReadParams>| {
                    read(slot, state, params)
                },
            )
            .post(
                move |state: State<Arc<AppState>>, body: Body<RelicPiece>| {
                    create(slot, state, body)
                },
            )
            .put(
                move |state: State<Arc<AppState>>, body: Body<RelicPiece>| {
                    update(slot, state, body)
                },
            )
            .delete(
                move |state: State<Arc<AppState>>, params: Query<IdParam>| {
                    delete(slot, state, params)
                },
            ),
        );
    }
    router
}

async fn read(
    slot: Slot,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadParams>,
) -> Result<Response> {
    let store = state.pieces(slot);
    match params.action.as_deref() {
        None => Ok(Json(store.list().await?).into_response()),
        Some("get-relic-sets") => Ok(Json(store.sets().await?).into_response()),
        Some(other) => Err(AppError::BadRequest(format!("unknown action `{other}`"))),
    }
}

async fn create(
    slot: Slot,
    State(state): State<Arc<AppState>>,
    body: Body<RelicPiece>,
) -> Result<impl IntoResponse> {
    let Json(piece) = body?;
    state.pieces(slot).create(&piece).await.inspect_err(|e| {
        log::warn!("rejected {} create: {e}", slot.table());
    })?;
    Ok((StatusCode::CREATED, Json(piece)))
}

async fn update(
    slot: Slot,
    State(state): State<Arc<AppState>>,
    body: Body<RelicPiece>,
) -> Result<Json<RelicPiece>> {
    let Json(piece) = body?;
    state.pieces(slot).update(&piece).await.inspect_err(|e| {
        log::warn!("rejected {} update: {e}", slot.table());
    })?;
    Ok(Json(piece))
}

async fn delete(
    slot: Slot,
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParam>,
) -> Result<StatusCode> {
    let id = params.required()?;
    state.pieces(slot).delete(&id).await.inspect_err(|e| {
        log::warn!("rejected {} delete of `{id}`: {e}", slot.table());
    })?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece() -> RelicPiece {
        RelicPiece {
            id: "relic001".into(),
            main_stat: "ATK".into(),
            main_stat_num: 500,
            substat_1: "SPD".into(),
            substat_1_num: 4.0,
            substat_2: "HP".into(),
            substat_2_num: 33.0,
            substat_3: "CRIT Rate".into(),
            substat_3_num: 2.9,
            substat_4: "CRIT DMG".into(),
            substat_4_num: 5.8,
            relic_set_id: "genius".into(),
        }
    }

    #[test]
    fn accepts_well_formed_bodypiece() {
        assert!(validate(Slot::Bodypiece, &piece()).is_ok());
    }

    #[test]
    fn rejects_main_stat_from_another_slot() {
        let p = RelicPiece {
            main_stat: "SPD".into(),
            ..piece()
        };
        assert!(matches!(
            validate(Slot::Bodypiece, &p),
            Err(AppError::Validation(_))
        ));
        assert!(validate(Slot::Feetpiece, &p).is_ok());
    }

    #[test]
    fn rejects_repeated_substat() {
        let p = RelicPiece {
            substat_4: "SPD".into(),
            ..piece()
        };
        let err = validate(Slot::Bodypiece, &p).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_unknown_or_empty_substat() {
        let p = RelicPiece {
            substat_2: "Outgoing Healing Boost".into(),
            ..piece()
        };
        assert!(validate(Slot::Bodypiece, &p).is_err());
        let p = RelicPiece {
            substat_3: String::new(),
            ..piece()
        };
        assert!(validate(Slot::Bodypiece, &p).is_err());
    }

    #[test]
    fn rejects_blank_ids() {
        let p = RelicPiece {
            id: " ".into(),
            ..piece()
        };
        assert!(validate(Slot::Bodypiece, &p).is_err());
        let p = RelicPiece {
            relic_set_id: String::new(),
            ..piece()
        };
        assert!(validate(Slot::Bodypiece, &p).is_err());
    }

    #[test]
    fn missing_id_parameter_is_bad_request() {
        let err = IdParam::default().required().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(
            IdParam {
                id: Some("x".into())
            }
            .required()
            .unwrap(),
            "x"
        );
    }
}

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::m0001_create_tables::{PlayableCharacters, RelicSet};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// id, name, head, hands, body, feet
const CAVERN_SETS: [[&str; 6]; 3] = [
    [
        "genius",
        "Genius of Brilliant Stars",
        "Genius's Ultraremote Sensing Visor",
        "Genius's Frequency Catcher",
        "Genius's Metafield Suit",
        "Genius's Gravity Walker",
    ],
    [
        "musketeer",
        "Musketeer of Wild Wheat",
        "Musketeer's Wild Wheat Felt Hat",
        "Musketeer's Coarse Leather Gloves",
        "Musketeer's Wind-Hunting Shawl",
        "Musketeer's Rivets Riding Boots",
    ],
    [
        "passerby",
        "Passerby of Wandering Cloud",
        "Passerby's Rejuvenated Wooden Hairstick",
        "Passerby's Roaming Dragon Bracer",
        "Passerby's Ragged Embroided Coat",
        "Passerby's Stygian Hiking Boots",
    ],
];

/// id, name, sphere, rope
const PLANAR_SETS: [[&str; 4]; 2] = [
    [
        "space_sealing",
        "Space Sealing Station",
        "Herta's Space Station",
        "Herta's Wandering Trek",
    ],
    [
        "fleet",
        "Fleet of the Ageless",
        "The Xianzhou Luofu's Celestial Ark",
        "The Xianzhou Luofu's Ambrosial Arbor Vines",
    ],
];

const CHARACTERS: [[&str; 2]; 5] = [
    ["kafka", "Kafka"],
    ["seele", "Seele"],
    ["bronya", "Bronya"],
    ["march_7th", "March 7th"],
    ["dan_heng", "Dan Heng"],
];

fn rows<const N: usize>(
    stmt: &mut InsertStatement,
    rows: &[[&str; N]],
) -> Result<InsertStatement, DbErr> {
    for row in rows {
        stmt.values(row.iter().map(|v| Expr::val(*v).into()))
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }
    Ok(stmt.to_owned())
}

async fn exec(manager: &SchemaManager<'_>, stmt: &InsertStatement) -> Result<(), DbErr> {
    let backend = manager.get_database_backend();
    manager.get_connection().execute(backend.build(stmt)).await?;
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let cavern = rows(
            Query::insert().into_table(RelicSet::Table).columns([
                RelicSet::Id,
                RelicSet::Name,
                RelicSet::Head,
                RelicSet::Hands,
                RelicSet::Body,
                RelicSet::Feet,
            ]),
            &CAVERN_SETS,
        )?;
        exec(manager, &cavern).await?;

        let planar = rows(
            Query::insert().into_table(RelicSet::Table).columns([
                RelicSet::Id,
                RelicSet::Name,
                RelicSet::Sphere,
                RelicSet::Rope,
            ]),
            &PLANAR_SETS,
        )?;
        exec(manager, &planar).await?;

        let characters = rows(
            Query::insert()
                .into_table(PlayableCharacters::Table)
                .columns([PlayableCharacters::Id, PlayableCharacters::Name]),
            &CHARACTERS,
        )?;
        exec(manager, &characters).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let character_ids = CHARACTERS.iter().map(|[id, _]| *id);
        let delete = Query::delete()
            .from_table(PlayableCharacters::Table)
            .and_where(Expr::col(PlayableCharacters::Id).is_in(character_ids))
            .to_owned();
        let backend = manager.get_database_backend();
        manager.get_connection().execute(backend.build(&delete)).await?;

        let set_ids = CAVERN_SETS
            .iter()
            .map(|row| row[0])
            .chain(PLANAR_SETS.iter().map(|row| row[0]));
        let delete = Query::delete()
            .from_table(RelicSet::Table)
            .and_where(Expr::col(RelicSet::Id).is_in(set_ids))
            .to_owned();
        manager.get_connection().execute(backend.build(&delete)).await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

/// The six relic piece tables share one layout.
const PIECE_TABLES: [&str; 6] = [
    "relic_headpiece",
    "relic_handpiece",
    "relic_bodypiece",
    "relic_feetpiece",
    "relic_planarsphere",
    "relic_linkrope",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

fn piece_table(name: &str) -> TableCreateStatement {
    let table = Alias::new(name);
    let mut stmt = Table::create();
    stmt.table(table.clone())
        .if_not_exists()
        .col(ColumnDef::new(Alias::new("id")).string().not_null().primary_key())
        .col(ColumnDef::new(Alias::new("main_stat")).string().not_null())
        .col(ColumnDef::new(Alias::new("main_stat_num")).integer().not_null())
        .col(ColumnDef::new(Alias::new("substat_1")).string().not_null())
        .col(ColumnDef::new(Alias::new("substat_1_num")).double().not_null())
        .col(ColumnDef::new(Alias::new("substat_2")).string().not_null())
        .col(ColumnDef::new(Alias::new("substat_2_num")).double().not_null())
        .col(ColumnDef::new(Alias::new("substat_3")).string().not_null())
        .col(ColumnDef::new(Alias::new("substat_3_num")).double().not_null())
        .col(ColumnDef::new(Alias::new("substat_4")).string().not_null())
        .col(ColumnDef::new(Alias::new("substat_4_num")).double().not_null())
        .col(ColumnDef::new(Alias::new("relic_set_id")).string().not_null())
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_relic_set"))
                .from(table, Alias::new("relic_set_id"))
                .to(RelicSet::Table, RelicSet::Id)
                .on_delete(ForeignKeyAction::Restrict),
        );
    stmt
}

fn build_slot(column: CharacterBuild, table: &str) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(format!("fk_character_build_{table}"))
        .from(CharacterBuild::Table, column)
        .to(Alias::new(table), Alias::new("id"))
        .on_delete(ForeignKeyAction::Restrict)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // relic_set
        manager
            .create_table(
                Table::create()
                    .table(RelicSet::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RelicSet::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(RelicSet::Name).string().not_null())
                    .col(ColumnDef::new(RelicSet::Head).string().null())
                    .col(ColumnDef::new(RelicSet::Hands).string().null())
                    .col(ColumnDef::new(RelicSet::Body).string().null())
                    .col(ColumnDef::new(RelicSet::Feet).string().null())
                    .col(ColumnDef::new(RelicSet::Sphere).string().null())
                    .col(ColumnDef::new(RelicSet::Rope).string().null())
                    .to_owned(),
            )
            .await?;
        // playable_characters
        manager
            .create_table(
                Table::create()
                    .table(PlayableCharacters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayableCharacters::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayableCharacters::Name).string().not_null())
                    .to_owned(),
            )
            .await?;
        for name in PIECE_TABLES {
            manager.create_table(piece_table(name)).await?;
        }
        // character_build
        manager
            .create_table(
                Table::create()
                    .table(CharacterBuild::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CharacterBuild::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::PlayableCharactersId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicHeadpieceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicHandpieceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicBodypieceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicFeetpieceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicPlanarsphereId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterBuild::RelicLinkropeId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_character_build_character")
                            .from(CharacterBuild::Table, CharacterBuild::PlayableCharactersId)
                            .to(PlayableCharacters::Table, PlayableCharacters::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicHeadpieceId,
                        "relic_headpiece",
                    ))
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicHandpieceId,
                        "relic_handpiece",
                    ))
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicBodypieceId,
                        "relic_bodypiece",
                    ))
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicFeetpieceId,
                        "relic_feetpiece",
                    ))
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicPlanarsphereId,
                        "relic_planarsphere",
                    ))
                    .foreign_key(&mut build_slot(
                        CharacterBuild::RelicLinkropeId,
                        "relic_linkrope",
                    ))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CharacterBuild::Table).to_owned())
            .await?;
        for name in PIECE_TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*name)).to_owned())
                .await?;
        }
        manager
            .drop_table(Table::drop().table(PlayableCharacters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelicSet::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum RelicSet {
    Table,
    Id,
    Name,
    Head,
    Hands,
    Body,
    Feet,
    Sphere,
    Rope,
}

#[derive(Iden)]
pub(crate) enum PlayableCharacters {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum CharacterBuild {
    Table,
    Id,
    PlayableCharactersId,
    RelicHeadpieceId,
    RelicHandpieceId,
    RelicBodypieceId,
    RelicFeetpieceId,
    RelicPlanarsphereId,
    RelicLinkropeId,
}

//! SeaORM entities for the reference tables and character builds.
//!
//! The six relic piece tables share one layout and are queried through
//! [`crate::relics::PieceStore`] by table name instead of one entity each.

use sea_orm::entity::prelude::*;

pub mod relic_set {
    use super::*;
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "relic_set")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
        pub head: Option<String>,
        pub hands: Option<String>,
        pub body: Option<String>,
        pub feet: Option<String>,
        pub sphere: Option<String>,
        pub rope: Option<String>,
    }
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}
    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for admin::RelicSet {
        fn from(m: Model) -> Self {
            Self {
                id: m.id,
                name: m.name,
                head: m.head,
                hands: m.hands,
                body: m.body,
                feet: m.feet,
                sphere: m.sphere,
                rope: m.rope,
            }
        }
    }
}

pub mod playable_characters {
    use super::*;
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "playable_characters")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: String,
    }
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::character_build::Entity")]
        CharacterBuild,
    }
    impl Related<super::character_build::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CharacterBuild.def()
        }
    }
    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for admin::Character {
        fn from(m: Model) -> Self {
            Self {
                id: m.id,
                name: m.name,
            }
        }
    }
}

pub mod character_build {
    use super::*;
    use admin::{CharacterBuild, Slot};
    use sea_orm::Set;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "character_build")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub playable_characters_id: String,
        pub relic_headpiece_id: String,
        pub relic_handpiece_id: String,
        pub relic_bodypiece_id: String,
        pub relic_feetpiece_id: String,
        pub relic_planarsphere_id: String,
        pub relic_linkrope_id: String,
    }
    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::playable_characters::Entity",
            from = "Column::PlayableCharactersId",
            to = "super::playable_characters::Column::Id"
        )]
        PlayableCharacters,
    }
    impl Related<super::playable_characters::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PlayableCharacters.def()
        }
    }
    impl ActiveModelBehavior for ActiveModel {}

    /// Column holding the piece id for `slot`.
    pub fn slot_column(slot: Slot) -> Column {
        match slot {
            Slot::Headpiece => Column::RelicHeadpieceId,
            Slot::Handpiece => Column::RelicHandpieceId,
            Slot::Bodypiece => Column::RelicBodypieceId,
            Slot::Feetpiece => Column::RelicFeetpieceId,
            Slot::Planarsphere => Column::RelicPlanarsphereId,
            Slot::Linkrope => Column::RelicLinkropeId,
        }
    }

    impl From<Model> for CharacterBuild {
        fn from(m: Model) -> Self {
            Self {
                id: m.id,
                playable_character_id: m.playable_characters_id,
                headpiece_id: m.relic_headpiece_id,
                handpiece_id: m.relic_handpiece_id,
                bodypiece_id: m.relic_bodypiece_id,
                feetpiece_id: m.relic_feetpiece_id,
                planarsphere_id: m.relic_planarsphere_id,
                linkrope_id: m.relic_linkrope_id,
            }
        }
    }

    impl From<&CharacterBuild> for ActiveModel {
        fn from(b: &CharacterBuild) -> Self {
            Self {
                id: Set(b.id.clone()),
                playable_characters_id: Set(b.playable_character_id.clone()),
                relic_headpiece_id: Set(b.headpiece_id.clone()),
                relic_handpiece_id: Set(b.handpiece_id.clone()),
                relic_bodypiece_id: Set(b.bodypiece_id.clone()),
                relic_feetpiece_id: Set(b.feetpiece_id.clone()),
                relic_planarsphere_id: Set(b.planarsphere_id.clone()),
                relic_linkrope_id: Set(b.linkrope_id.clone()),
            }
        }
    }
}

//! Form, table and page-controller logic for the relic admin pages.
//!
//! The controller talks to its data through the [`Api`] trait. [`HttpApi`]
//! reaches a running server over HTTP; the server implements the same trait
//! directly on top of its database stores to render its own pages.

pub mod api;
pub mod controller;
pub mod form;
pub mod http;
pub mod label;
pub mod model;
pub mod stats;
pub mod table;

pub use api::{Api, ApiError, ApiResult};
pub use controller::PageController;
pub use form::{BuildField, FormError, FormState, Mode, PieceField, Record, reduce};
pub use http::HttpApi;
pub use label::{SelectOption, relic_label};
pub use model::{
    BuildReferences, Character, CharacterBuild, Relic, RelicCatalog, RelicDetails, RelicPiece,
    RelicSet, Substat,
};
pub use stats::{SUBSTATS, Slot, Stat, unique_substats};
pub use table::{Table, TableRow, render_table};

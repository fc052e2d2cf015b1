use serde::Serialize;

use crate::form::Record;

/// Table of records in the order the API returned them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

/// One record rendered as text. `id` feeds the row's edit and delete actions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

pub fn render_table<R: Record>(records: &[R]) -> Table {
    Table {
        headers: R::headers().to_vec(),
        rows: records
            .iter()
            .map(|record| TableRow {
                id: record.id().to_owned(),
                cells: record.cells(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CharacterBuild;

    #[test]
    fn rows_follow_input_order() {
        let builds: Vec<CharacterBuild> = ["b2", "b1", "b3"]
            .into_iter()
            .map(|id| CharacterBuild {
                id: id.into(),
                playable_character_id: format!("char-{id}"),
                ..Default::default()
            })
            .collect();

        let table = render_table(&builds);
        let ids: Vec<&str> = table.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b2", "b1", "b3"]);
        assert_eq!(table.headers[0], "Character");
        assert_eq!(table.rows[1].cells[0], "char-b1");
    }

    #[test]
    fn empty_list_renders_headers_only() {
        let table = render_table::<CharacterBuild>(&[]);
        assert_eq!(table.headers.len(), 7);
        assert!(table.rows.is_empty());
    }
}

//! Nearest-stations result table.

use aed_map_station_models::RankedResult;
use serde::Serialize;
use strum_macros::Display;

/// Display width of the table in pixels.
pub const TABLE_WIDTH: u32 = 700;

/// How the frontend renders a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// Distance in meters.
    Distance,
    /// Clickable link with fixed display text.
    Link,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Key of the cell in each row.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Cell renderer.
    pub kind: ColumnKind,
    /// Fixed link text for [`ColumnKind::Link`] columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<&'static str>,
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Station title.
    pub title: String,
    /// Station location description.
    pub location_description: String,
    /// Straight-line distance in meters.
    pub distance: f64,
    /// Navigation link.
    pub navi: String,
}

impl From<&RankedResult> for TableRow {
    fn from(result: &RankedResult) -> Self {
        Self {
            title: result.title.clone(),
            location_description: result.location_description.clone(),
            distance: result.distance_meters,
            navi: result.navigation_url.clone(),
        }
    }
}

/// Serializable result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Columns in display order.
    pub columns: Vec<TableColumn>,
    /// Rows in rank order.
    pub rows: Vec<TableRow>,
    /// Whether the row index is hidden.
    pub hide_index: bool,
    /// Display width in pixels.
    pub width: u32,
}

/// Column layout of the result table.
#[must_use]
pub fn columns() -> Vec<TableColumn> {
    vec![
        TableColumn {
            key: "title",
            label: "タイトル",
            kind: ColumnKind::Text,
            display_text: None,
        },
        TableColumn {
            key: "location_description",
            label: "場所",
            kind: ColumnKind::Text,
            display_text: None,
        },
        TableColumn {
            key: "distance",
            label: "直線距離",
            kind: ColumnKind::Distance,
            display_text: None,
        },
        TableColumn {
            key: "navi",
            label: "ナビ",
            kind: ColumnKind::Link,
            display_text: Some("🔗案内"),
        },
    ]
}

/// Builds the result table. Rows keep the given order.
#[must_use]
pub fn render_table(results: &[RankedResult]) -> TableView {
    TableView {
        columns: columns(),
        rows: results.iter().map(TableRow::from).collect(),
        hide_index: true,
        width: TABLE_WIDTH,
    }
}

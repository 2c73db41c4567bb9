use crate::table::ParsedTable;
use crate::Origin;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub transcript: Vec<MessageView>,
    pub draft: String,
    pub file_name: Option<String>,
    /// Label of the preview button; `None` hides the button.
    pub preview_label: Option<&'static str>,
    pub preview: Option<TablePreview>,
    pub drag_active: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub origin: Origin,
    pub text: String,
}

/// Table cells aligned to the header row; missing cells render empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TablePreview {
    pub(crate) fn from_table(table: &ParsedTable) -> Self {
        let headers = table.headers().to_vec();
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                // Positional, so repeated header names keep their own cells.
                let mut cells: Vec<String> =
                    row.fields().map(|(_, value)| value.to_string()).collect();
                cells.resize(headers.len(), String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }
}

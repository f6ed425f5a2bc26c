use crate::table::TableController;
use crate::utils::text::truncate_text_unicode;
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;

const MAX_CELL_WIDTH: usize = 60;

/// Formatter for table controller snapshots.
pub struct TableRenderer {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => {
                let width = cols as usize;
                // Clamp for stability on degenerate terminals
                Some(width.clamp(40, 200))
            }
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Renders the controller's current page: visible columns as headers
    /// (with sort indicators), one row per visible record.
    pub fn render<R>(&self, controller: &TableController<R>) -> String {
        self.render_with_selection(controller, None)
    }

    /// Same as [`render`](Self::render), with a cursor marker on one
    /// page-local row (used by the interactive pager).
    pub fn render_with_selection<R>(
        &self,
        controller: &TableController<R>,
        selected: Option<usize>,
    ) -> String {
        let columns = controller.visible_columns();
        if columns.is_empty() {
            return "No visible columns.".to_string();
        }

        let rows = controller.page_rows();
        if rows.is_empty() {
            return "No records found.".to_string();
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        let marker_column = selected.is_some();
        let mut headers: Vec<Cell> = Vec::new();
        if marker_column {
            headers.push(Cell::new(""));
        }
        for column in &columns {
            let direction = controller.sort_direction(column.id());
            let label = match direction {
                Some(false) => format!("{} ▲", column.header()),
                Some(true) => format!("{} ▼", column.header()),
                None => column.header().to_string(),
            };
            let cell = Cell::new(label).add_attribute(Attribute::Bold);
            headers.push(if self.use_colors {
                cell.fg(Color::Cyan)
            } else {
                cell
            });
        }
        table.set_header(headers);

        for (row_index, row) in rows.iter().enumerate() {
            let mut cells: Vec<Cell> = Vec::new();
            if marker_column {
                let marker = if selected == Some(row_index) { "▶" } else { "" };
                cells.push(Cell::new(marker));
            }
            for column in &columns {
                let value = column.value(row);
                let value = if value.is_empty() {
                    "-".to_string()
                } else {
                    truncate_text_unicode(&value, MAX_CELL_WIDTH)
                };
                let is_empty = value == "-";
                let cell = Cell::new(value);
                cells.push(if self.use_colors && is_empty {
                    cell.fg(Color::DarkGrey).add_attribute(Attribute::Italic)
                } else {
                    cell
                });
            }
            table.add_row(cells);
        }

        table.to_string()
    }

    /// Summary line under the table, e.g.
    /// `Showing 11-20 of 45 records (Page 2 of 5)`.
    pub fn render_page_info<R>(&self, controller: &TableController<R>) -> String {
        let total = controller.total_records();
        if total == 0 {
            return "No records found".to_string();
        }

        let state = controller.page_state();
        let start = state.page_index * state.page_size + 1;
        let end = ((state.page_index + 1) * state.page_size).min(total);
        let mut info = format!(
            "Showing {}-{} of {} records (Page {} of {})",
            start,
            end,
            total,
            state.page_index + 1,
            controller.page_count().max(1)
        );

        if controller.is_filtered() {
            info.push_str(" | 🔍 Filter applied");
        }
        info
    }

    /// Renders a single record as a two-column Field | Value table.
    pub fn render_details(&self, fields: &[(&str, String)]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        if self.use_colors {
            table.set_header(vec![
                Cell::new("Field")
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Green),
                Cell::new("Value")
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Green),
            ]);
        } else {
            table.set_header(vec![
                Cell::new("Field").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);
        }

        for (name, value) in fields {
            let value_cell = if value.is_empty() {
                Cell::new("-")
            } else {
                Cell::new(value)
            };
            let name_cell = if self.use_colors {
                Cell::new(*name).fg(Color::Yellow)
            } else {
                Cell::new(*name)
            };
            table.add_row(vec![name_cell, value_cell]);
        }

        table.to_string()
    }

    fn configure_table_width(&self, table: &mut Table) {
        if let Some(terminal_width) = self.max_width {
            // Leave room for borders and padding
            let available_width = if terminal_width > 20 {
                terminal_width - 6
            } else {
                terminal_width.max(40)
            };
            table.set_width(available_width as u16);
        } else {
            table.set_width(80);
        }
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnDef, PageUpdate, SortDescriptor, TableController, TableOptions};

    #[derive(Clone)]
    struct Row {
        id: u32,
        name: &'static str,
        note: &'static str,
    }

    fn controller(rows: Vec<Row>) -> TableController<Row> {
        TableController::builder(vec![
            ColumnDef::new("id", "ID", |row: &Row| row.id.to_string()),
            ColumnDef::new("name", "Name", |row: &Row| row.name.to_string()),
            ColumnDef::new("note", "Note", |row: &Row| row.note.to_string()),
        ])
        .rows(rows)
        .options(TableOptions {
            initial_page_size: 10,
            ..TableOptions::default()
        })
        .build()
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "Maria Santos",
                note: "priority",
            },
            Row {
                id: 2,
                name: "João Silva",
                note: "",
            },
        ]
    }

    #[test]
    fn test_render_includes_headers_and_values() {
        let renderer = TableRenderer::new().with_max_width(100).with_colors(false);
        let output = renderer.render(&controller(sample_rows()));
        assert!(output.contains("Name"));
        assert!(output.contains("Maria Santos"));
        assert!(output.contains("João Silva"));
        // Empty cells render as a dash.
        assert!(output.contains('-'));
    }

    #[test]
    fn test_render_empty_controller() {
        let renderer = TableRenderer::new().with_colors(false);
        let output = renderer.render(&controller(Vec::new()));
        assert_eq!(output, "No records found.");
    }

    #[test]
    fn test_render_marks_sorted_column() {
        let renderer = TableRenderer::new().with_max_width(100).with_colors(false);
        let mut controller = controller(sample_rows());
        controller.set_sorting(vec![SortDescriptor::desc("name")]);
        let output = renderer.render(&controller);
        assert!(output.contains("Name ▼"));
    }

    #[test]
    fn test_render_with_selection_marks_cursor_row() {
        let renderer = TableRenderer::new().with_max_width(100).with_colors(false);
        let output = renderer.render_with_selection(&controller(sample_rows()), Some(1));
        assert!(output.contains('▶'));
    }

    #[test]
    fn test_hidden_columns_are_not_rendered() {
        let renderer = TableRenderer::new().with_max_width(100).with_colors(false);
        let mut controller = controller(sample_rows());
        controller.set_column_visible("note", false);
        let output = renderer.render(&controller);
        assert!(!output.contains("Note"));
    }

    #[test]
    fn test_page_info_line() {
        let renderer = TableRenderer::new().with_colors(false);
        let rows: Vec<Row> = (1..=45)
            .map(|id| Row {
                id,
                name: "Lead",
                note: "",
            })
            .collect();
        let mut controller = controller(rows);
        controller.set_pagination(PageUpdate::page(2));
        assert_eq!(
            renderer.render_page_info(&controller),
            "Showing 11-20 of 45 records (Page 2 of 5)"
        );

        controller.set_rows(Vec::new());
        assert_eq!(renderer.render_page_info(&controller), "No records found");
    }

    #[test]
    fn test_render_details() {
        let renderer = TableRenderer::new().with_max_width(100).with_colors(false);
        let output = renderer.render_details(&[
            ("ID", "3".to_string()),
            ("Name", "Receptionist".to_string()),
            ("Description", String::new()),
        ]);
        assert!(output.contains("Field"));
        assert!(output.contains("Receptionist"));
        assert!(output.contains('-'));
    }
}

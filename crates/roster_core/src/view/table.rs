//! Roster table projection and row-action dispatch.
//!
//! # Responsibility
//! - Project the record store into display rows, escaping every text cell.
//! - Tag each row control with an action kind and row index, and map a
//!   clicked control's tags back to a controller command.
//!
//! # Invariants
//! - Rows follow store order; row `i` carries actions for index `i`.
//! - An empty store projects to exactly one placeholder row and no actions.
//! - No unescaped record text reaches [`TableView::to_html`].

use crate::model::student::StudentRecord;
use crate::service::roster_controller::RosterCommand;

/// Text shown in the placeholder row of an empty roster.
pub const EMPTY_ROSTER_MESSAGE: &str = "No students registered yet.";

/// Number of columns including the actions column.
const TABLE_COLUMNS: usize = 5;

/// Kind tag carried by a row control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    Edit,
    Delete,
}

impl RowActionKind {
    /// Stable tag used in `data-action` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One control on a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub index: usize,
}

impl RowAction {
    pub fn command(self) -> RosterCommand {
        match self.kind {
            RowActionKind::Edit => RosterCommand::Edit(self.index),
            RowActionKind::Delete => RosterCommand::Delete(self.index),
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Placeholder {
        message: &'static str,
    },
    Data {
        index: usize,
        /// Escaped name, student id, email, contact.
        cells: [String; 4],
        actions: [RowAction; 2],
    },
}

/// Snapshot of the roster as displayed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<TableRow>,
}

impl TableView {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn data_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, TableRow::Data { .. }))
            .count()
    }

    pub fn action_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| match row {
                TableRow::Data { actions, .. } => actions.len(),
                TableRow::Placeholder { .. } => 0,
            })
            .sum()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }

    /// Renders the table body markup for a web host.
    ///
    /// Buttons carry `data-action` and `data-index` so a single delegated
    /// listener on the body can feed [`parse_row_action`].
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            match row {
                TableRow::Placeholder { message } => {
                    html.push_str(&format!(
                        "<tr><td colspan=\"{TABLE_COLUMNS}\" class=\"empty-row\">{}</td></tr>\n",
                        escape_html(message)
                    ));
                }
                TableRow::Data { cells, actions, .. } => {
                    html.push_str("<tr>");
                    for cell in cells {
                        html.push_str(&format!("<td>{cell}</td>"));
                    }
                    html.push_str("<td>");
                    for action in actions {
                        html.push_str(&format!(
                            "<button class=\"action-btn {kind}-btn\" data-action=\"{kind}\" data-index=\"{index}\">{label}</button>",
                            kind = action.kind.as_str(),
                            index = action.index,
                            label = action.kind.label(),
                        ));
                    }
                    html.push_str("</td></tr>\n");
                }
            }
        }
        html
    }
}

/// Projects records into display rows.
pub fn render_table(records: &[StudentRecord]) -> TableView {
    if records.is_empty() {
        return TableView {
            rows: vec![TableRow::Placeholder {
                message: EMPTY_ROSTER_MESSAGE,
            }],
        };
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| TableRow::Data {
            index,
            cells: [
                escape_html(&record.name),
                escape_html(&record.student_id),
                escape_html(&record.email),
                escape_html(&record.contact),
            ],
            actions: [
                RowAction {
                    kind: RowActionKind::Edit,
                    index,
                },
                RowAction {
                    kind: RowActionKind::Delete,
                    index,
                },
            ],
        })
        .collect();
    TableView { rows }
}

/// Escapes `& < > " '` for insertion into markup.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Maps the `data-action` / `data-index` tags of a clicked control to a
/// command. Unknown kinds or non-numeric indexes yield `None`.
pub fn parse_row_action(action: &str, index: &str) -> Option<RosterCommand> {
    let kind = RowActionKind::parse(action.trim())?;
    let index = index.trim().parse::<usize>().ok()?;
    Some(RowAction { kind, index }.command())
}

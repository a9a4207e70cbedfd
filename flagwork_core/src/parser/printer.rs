use terminal_size::{terminal_size, Width};

use crate::api::{prefixed_names, unquote_usage, with_default};
use crate::parser::interface::{
    ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth, UserInterface,
};

pub(crate) struct Row {
    names: String,
    usage: String,
}

pub(crate) struct Printer {
    rows: Vec<Row>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 2;

impl Printer {
    /// Produce the row of a single flag: its prefixed names, and its usage followed by the default.
    pub(crate) fn row(
        names: &[&str],
        usage: &str,
        is_switch: bool,
        default_text: Option<&str>,
    ) -> Row {
        let (placeholder, usage) = unquote_usage(usage);
        let placeholder = if is_switch { "" } else { placeholder.as_str() };

        Row {
            names: prefixed_names(names, placeholder),
            usage: with_default(&usage, default_text),
        }
    }

    pub(crate) fn terminal(rows: Vec<Row>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(rows, terminal_width)
    }

    pub(crate) fn new(rows: Vec<Row>, terminal_width: Option<usize>) -> Self {
        Self {
            rows,
            terminal_width,
        }
    }

    pub(crate) fn print(&self, user_interface: &(impl UserInterface + ?Sized)) {
        if self.rows.is_empty() {
            return;
        }

        let left_column_width = self
            .rows
            .iter()
            .map(|row| row.names.chars().count())
            .max()
            .unwrap_or_default();
        let middle_column_width = self
            .rows
            .iter()
            .map(|row| row.usage.chars().count() + MAIN_INDENT)
            .max()
            .unwrap_or_default();
        let padding = PaddingWidth::new(PADDING_WIDTH)
            .expect("internal error - padding width must be at least 1");
        let left = LeftWidth::new(std::cmp::max(left_column_width, 1))
            .expect("internal error - left width must be at least 1");
        let middle = MiddleWidth::new(std::cmp::max(middle_column_width, 2))
            .expect("internal error - middle width must be at least 2");
        let renderer = match self.terminal_width {
            Some(total) => ColumnRenderer::guided(padding, left, middle, TotalWidth(total)),
            None => ColumnRenderer::new(padding, left, middle),
        };

        for row in &self.rows {
            for line in renderer.render(MAIN_INDENT, &row.names, &row.usage) {
                user_interface.print(line.trim_end().to_string());
            }
        }
    }
}

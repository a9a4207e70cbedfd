#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out a names column followed by a wrapped usage column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// Target 95% of the total width, so the renderer doesn't butt up against the terminal edge.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// With an average word length of 5, 17 allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle: usize = left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Names column {non_middle} and usage fit within the target total {target_total_width}.  Selecting usage width: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle =
                std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Names column {non_middle} fits within the total {}.  Selecting usage width: {calculated_middle}.", total_width.0);
            }

            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Names column {non_middle} does not fit within the total {}.  Selecting usage width: {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
            }

            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let padding = format!("{:padding$}", "");
        let left_column_width = self.left.0;
        assert!(left.chars().count() <= left_column_width);
        let middle_column_width = std::cmp::max(self.middle.0.saturating_sub(indent), 2);
        let middle_parts = chunk(middle, middle_column_width);
        let mut out = Vec::default();

        for (i, part) in middle_parts.iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", left, part
                ));
            } else {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", "", part
                ));
            }
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < characters.len() {
        let piece: String = characters[left..right].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
        right += increment;
    }

    current.extend(&characters[left..]);
}

/// Where the flag set writes its output.
pub trait UserInterface {
    /// Print one line of output.
    fn print(&self, message: String);
}

/// Prints to stdout.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }
}

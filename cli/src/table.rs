// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "  ";

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

#[derive(Debug)]
pub struct Table<'a, C, T> {
    columns: &'a [C],
    data: &'a [T],
    header: bool,
}

impl<'a, C: TableColumn<T>, T> Table<'a, C, T> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            header: true,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

impl<C: TableColumn<T>, T> fmt::Display for Table<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<Cow<'_, str>> = self.columns.iter().map(|c| c.name()).collect();
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();

        let mut widths: Vec<usize> = if self.header {
            headers.iter().map(|h| h.width()).collect()
        } else {
            vec![0; self.columns.len()]
        };
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        if self.header {
            let cells = headers.iter().map(|h| (&**h, None));
            self.write_row(f, &widths, cells, true)?;
        }
        for (row, item) in rows.iter().zip(self.data) {
            let cells = row
                .iter()
                .zip(self.columns)
                .map(|(cell, col)| (&**cell, col.color(item)));
            self.write_row(f, &widths, cells, false)?;
        }
        Ok(())
    }
}

impl<C: TableColumn<T>, T> Table<'_, C, T> {
    fn write_row<'c>(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: impl Iterator<Item = (&'c str, Option<Color>)>,
        bold: bool,
    ) -> fmt::Result {
        let last = self.columns.len().saturating_sub(1);
        for (i, ((cell, color), (col, width))) in
            cells.zip(self.columns.iter().zip(widths)).enumerate()
        {
            let padded = pad(cell, *width, col.padding_direction(), i == last);
            let styled = match color {
                Some(color) => padded.color(color),
                None => padded.normal(),
            };
            if bold {
                write!(f, "{}", styled.bold())?;
            } else {
                write!(f, "{styled}")?;
            }

            if i < last {
                f.write_str(SEPARATOR)?;
            }
        }
        writeln!(f)
    }
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, is_last: bool) -> String {
    let fill = width.saturating_sub(cell.width());
    match direction {
        // trailing spaces on the last column are noise
        PaddingDirection::Left if is_last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
        PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}

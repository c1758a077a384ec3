//! Grid layout engine for table nodes.
//!
//! Tables are placed left to right in input order and wrap into a new row
//! after a fixed count, with the row advancing by the tallest box placed in
//! it. Single pass, no packing: identical input always yields identical
//! positions.

use crate::label::format_column_label;
use crate::schema::Table;
use crate::style::{TableColor, table_color};
use std::collections::HashMap;

/// Grid placement constants.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub tables_per_row: usize,
    pub table_width: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub footer_padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tables_per_row: 4,
            table_width: 300.0,
            spacing_x: 350.0,
            spacing_y: 50.0,
            start_x: 50.0,
            start_y: 50.0,
            header_height: 30.0,
            row_height: 26.0,
            footer_padding: 10.0,
        }
    }
}

/// A positioned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One diagram node per table.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub rect: Rect,
    pub color: TableColor,
    pub cells: Vec<Cell>,
}

/// One row per column, stacked inside the parent node below its header.
#[derive(Debug, Clone)]
pub struct Cell {
    pub id: String,
    pub label: String,
    pub is_primary_key: bool,
    /// Y offset relative to the parent node's top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Layout result: positioned nodes plus the lookups the edge resolver reads.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub nodes: Vec<Node>,
    /// Table name -> node box.
    pub positions: HashMap<String, Rect>,
    /// Table name -> column name -> cell identifier.
    pub cell_ids: HashMap<String, HashMap<String, String>>,
    /// Edge routing points sit at this offset below a node's top edge.
    pub header_height: f64,
}

/// Cell identifiers are `{table}-{column}`; table names are unique (the
/// loader enforces this) and column names are unique within a table, so the
/// pair is unique document-wide.
pub fn cell_id(table: &str, column: &str) -> String {
    format!("{table}-{column}")
}

pub struct GridLayout {
    config: GridConfig,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridLayout {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn table_height(&self, column_count: usize) -> f64 {
        self.config.header_height
            + column_count as f64 * self.config.row_height
            + self.config.footer_padding
    }

    /// Place every table on the grid.
    pub fn layout(&self, tables: &[Table]) -> Layout {
        let c = &self.config;
        let mut layout = Layout {
            header_height: c.header_height,
            ..Layout::default()
        };

        let mut x = c.start_x;
        let mut y = c.start_y;
        let mut row_height = 0.0_f64;

        for (idx, table) in tables.iter().enumerate() {
            let height = self.table_height(table.columns.len());

            if idx > 0 && idx % c.tables_per_row == 0 {
                y += row_height + c.spacing_y;
                x = c.start_x;
                row_height = 0.0;
            }
            row_height = row_height.max(height);

            let rect = Rect {
                x,
                y,
                width: c.table_width,
                height,
            };

            let mut cells = Vec::with_capacity(table.columns.len());
            let mut ids = HashMap::new();
            let mut cell_y = c.header_height;
            for column in &table.columns {
                let id = cell_id(&table.name, &column.name);
                ids.insert(column.name.clone(), id.clone());
                cells.push(Cell {
                    id,
                    label: format_column_label(table, column),
                    is_primary_key: table.is_primary_key(&column.name),
                    y: cell_y,
                    width: c.table_width,
                    height: c.row_height,
                });
                cell_y += c.row_height;
            }

            layout.positions.insert(table.name.clone(), rect);
            layout.cell_ids.insert(table.name.clone(), ids);
            layout.nodes.push(Node {
                id: table.name.clone(),
                label: table.name.clone(),
                rect,
                color: table_color(&table.name),
                cells,
            });

            x += c.table_width + c.spacing_x;
        }

        layout
    }
}

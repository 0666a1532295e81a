use std::collections::BTreeMap;

use crate::foundation::{
    core::BoundingBox,
    error::{TifoError, TifoResult},
};

/// Grid dimensions and cell gap for a template.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    #[serde(default)]
    pub gap_px: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 6,
            gap_px: 0.0,
        }
    }
}

/// A named area's cell span. Row/column indices are zero-based and
/// inclusive on both ends.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridArea {
    pub name: String,
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl GridArea {
    fn span_cells(&self) -> u64 {
        let rows = u64::from(self.end_row - self.start_row + 1);
        let cols = u64::from(self.end_col - self.start_col + 1);
        rows * cols
    }
}

/// Parsed grid template resolved against a logical canvas size.
///
/// Templates are newline-separated rows of whitespace-separated area-name
/// tokens (optionally quoted). Area bounds are a pure function of the parsed
/// template plus the canvas size: the same lookup always returns the same
/// rectangle.
#[derive(Clone, Debug)]
pub struct GridResolver {
    spec: GridSpec,
    canvas_width: f64,
    canvas_height: f64,
    areas: BTreeMap<String, GridArea>,
}

impl GridResolver {
    /// Parse `template` over a `canvas_width` x `canvas_height` canvas.
    ///
    /// Rejects templates whose row/column counts disagree with `spec`, and
    /// templates that reuse an area name across non-contiguous cells: a name
    /// must cover exactly the rectangle spanned by its min/max row/column,
    /// otherwise the bounding rectangle would silently lie about the shape.
    pub fn parse(
        template: &str,
        spec: GridSpec,
        canvas_width: f64,
        canvas_height: f64,
    ) -> TifoResult<Self> {
        if spec.columns == 0 || spec.rows == 0 {
            return Err(TifoError::template("grid must have columns > 0 and rows > 0"));
        }
        if !(canvas_width > 0.0) || !(canvas_height > 0.0) {
            return Err(TifoError::template("canvas size must be positive"));
        }

        let rows: Vec<Vec<String>> = template
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .map(|tok| tok.trim_matches('"').trim_matches('\'').to_string())
                    .filter(|tok| !tok.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|tokens: &Vec<String>| !tokens.is_empty())
            .collect();

        if rows.len() != spec.rows as usize {
            return Err(TifoError::template(format!(
                "template has {} rows, grid expects {}",
                rows.len(),
                spec.rows
            )));
        }

        let mut areas: BTreeMap<String, GridArea> = BTreeMap::new();
        let mut cell_counts: BTreeMap<String, u64> = BTreeMap::new();

        for (row_idx, tokens) in rows.iter().enumerate() {
            if tokens.len() != spec.columns as usize {
                return Err(TifoError::template(format!(
                    "template row {} has {} columns, grid expects {}",
                    row_idx,
                    tokens.len(),
                    spec.columns
                )));
            }
            for (col_idx, name) in tokens.iter().enumerate() {
                let row = row_idx as u32;
                let col = col_idx as u32;
                *cell_counts.entry(name.clone()).or_insert(0) += 1;
                areas
                    .entry(name.clone())
                    .and_modify(|area| {
                        area.start_row = area.start_row.min(row);
                        area.end_row = area.end_row.max(row);
                        area.start_col = area.start_col.min(col);
                        area.end_col = area.end_col.max(col);
                    })
                    .or_insert_with(|| GridArea {
                        name: name.clone(),
                        start_row: row,
                        end_row: row,
                        start_col: col,
                        end_col: col,
                    });
            }
        }

        for (name, area) in &areas {
            let observed = cell_counts.get(name).copied().unwrap_or(0);
            if observed != area.span_cells() {
                return Err(TifoError::template(format!(
                    "area '{name}' is not a contiguous rectangle ({} cells seen, span covers {})",
                    observed,
                    area.span_cells()
                )));
            }
        }

        Ok(Self {
            spec,
            canvas_width,
            canvas_height,
            areas,
        })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Pixel bounds for a named area; `None` for unknown names. Callers
    /// treat a miss as "skip this element and warn", never as fatal.
    pub fn area_bounds(&self, name: &str) -> Option<BoundingBox> {
        let area = self.areas.get(name)?;
        let cell_w = self.canvas_width / f64::from(self.spec.columns);
        let cell_h = self.canvas_height / f64::from(self.spec.rows);
        let gap = self.spec.gap_px;

        let span_cols = f64::from(area.end_col - area.start_col + 1);
        let span_rows = f64::from(area.end_row - area.start_row + 1);

        Some(BoundingBox::new(
            f64::from(area.start_col) * cell_w + gap,
            f64::from(area.start_row) * cell_h + gap,
            span_cols * cell_w - 2.0 * gap,
            span_rows * cell_h - 2.0 * gap,
        ))
    }

    /// Full canvas rectangle.
    pub fn canvas_bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// All named areas in name order.
    pub fn areas(&self) -> impl Iterator<Item = &GridArea> {
        self.areas.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.areas.contains_key(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;

//! Render contract: read-only board snapshots and the renderers that draw them.

use crate::board::Board;
use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Which rock numbers a snapshot exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Every number visible. Shown once, when the board is dealt.
    RevealAll,
    /// Hidden rocks keep their numbers to themselves; found pairs show theirs.
    MaskRevealed,
}

/// One rock as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerView {
    /// Number, when the mode allows it.
    pub id: Option<u32>,
    /// Whether the rock was matched.
    pub revealed: bool,
}

/// One grid position as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellView {
    /// Open water.
    Empty,
    /// A raft with its rocks in slot order.
    Occupied {
        /// Rocks in slot order.
        markers: Vec<MarkerView>,
    },
}

/// Everything a renderer needs to draw the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Positions in row-major order.
    pub cells: Vec<CellView>,
}

impl Board {
    /// Takes a snapshot for rendering.
    pub fn snapshot(&self, mode: RenderMode) -> BoardSnapshot {
        let cells = self
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Empty { .. } => CellView::Empty,
                Cell::Occupied(raft) => CellView::Occupied {
                    markers: raft
                        .markers()
                        .iter()
                        .map(|marker| {
                            let visible = match mode {
                                RenderMode::RevealAll => true,
                                RenderMode::MaskRevealed => marker.is_revealed(),
                            };
                            MarkerView {
                                id: visible.then_some(marker.id().0),
                                revealed: marker.is_revealed(),
                            }
                        })
                        .collect(),
                },
            })
            .collect();

        BoardSnapshot {
            width: self.width(),
            height: self.height(),
            cells,
        }
    }
}

/// Turns a snapshot into a presentable artifact (image, message, text).
pub trait Renderer {
    /// What the renderer produces. The engine never looks inside.
    type Artifact;
    /// Render failure.
    type Error: std::error::Error;

    /// Draws the snapshot.
    fn render(&self, snapshot: &BoardSnapshot) -> Result<Self::Artifact, Self::Error>;
}

/// Plain-text grid renderer for terminals and logs.
///
/// Rafts are labelled with their 1-based position. Hidden rocks show their
/// number when visible and `?` otherwise; found rocks are drawn as `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn cell_label(position: usize, cell: &CellView) -> String {
        match cell {
            CellView::Empty => "~~ water ~~".to_string(),
            CellView::Occupied { markers } => {
                let rocks: Vec<String> = markers
                    .iter()
                    .map(|marker| match (marker.revealed, marker.id) {
                        (true, _) => ".".to_string(),
                        (false, Some(id)) => id.to_string(),
                        (false, None) => "?".to_string(),
                    })
                    .collect();
                format!("#{}: {}", position + 1, rocks.join(" "))
            }
        }
    }
}

impl Renderer for TextRenderer {
    type Artifact = String;
    type Error = std::fmt::Error;

    fn render(&self, snapshot: &BoardSnapshot) -> Result<String, std::fmt::Error> {
        let labels: Vec<String> = snapshot
            .cells
            .iter()
            .enumerate()
            .map(|(position, cell)| Self::cell_label(position, cell))
            .collect();
        let column = labels.iter().map(String::len).max().unwrap_or(0);

        let mut out = String::new();
        for (row, chunk) in labels.chunks(snapshot.width.max(1)).enumerate() {
            if row > 0 {
                writeln!(out)?;
            }
            let line: Vec<String> = chunk
                .iter()
                .map(|label| format!("{:<width$}", label, width = column))
                .collect();
            write!(out, "{}", line.join(" | ").trim_end())?;
        }
        Ok(out)
    }
}

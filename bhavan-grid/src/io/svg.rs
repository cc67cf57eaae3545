//! SVG floor-plan export.
//!
//! Renders one panel per floor, stacked top floor first. When a path is
//! attached only the floors it visits are drawn. Cells are colored by
//! category, the path is drawn as a polyline per floor (jumps between
//! non-adjacent cells dashed) and start/goal cells get markers.
//!
//! Grid `y` grows upward in the drawing, like world coordinates.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::{CellPos, CellType};
use crate::grid::{BuildingGrid, FloorGrid};

/// Fill colors per category plus overlay colors.
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    pub empty: &'static str,
    pub wall: &'static str,
    pub door: &'static str,
    pub stair: &'static str,
    pub floor: &'static str,
    pub wall_buffer: &'static str,
    pub path: &'static str,
    pub jump: &'static str,
    pub start: &'static str,
    pub goal: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            empty: "#FFFFFF",
            wall: "#000000",
            door: "#FFA500",
            stair: "#FF0000",
            floor: "#FFF0F5",
            wall_buffer: "#B0B0B0",
            path: "#0000FF",
            jump: "#008000",
            start: "#00AA00",
            goal: "#DD0000",
        }
    }
}

impl SvgColorScheme {
    pub fn cell(&self, cell: CellType) -> &'static str {
        match cell {
            CellType::Empty => self.empty,
            CellType::Wall => self.wall,
            CellType::Door => self.door,
            CellType::Stair => self.stair,
            CellType::Floor => self.floor,
            CellType::WallBuffer => self.wall_buffer,
        }
    }
}

/// Layout settings in pixels.
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Edge length of one cell
    pub cell_px: f64,
    pub path_width: f64,
    pub marker_radius: f64,
    /// Margin around and between panels
    pub padding: f64,
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            cell_px: 8.0,
            path_width: 2.0,
            marker_radius: 5.0,
            padding: 20.0,
            colors: SvgColorScheme::default(),
        }
    }
}

const PANEL_TITLE_PX: f64 = 24.0;

/// SVG builder for a [`BuildingGrid`] with an optional path overlay.
pub struct FloorPlanSvg<'a> {
    grid: &'a BuildingGrid,
    config: SvgConfig,
    title: Option<String>,
    path: Vec<CellPos>,
    start: Option<CellPos>,
    goals: Vec<CellPos>,
}

impl<'a> FloorPlanSvg<'a> {
    pub fn new(grid: &'a BuildingGrid, config: SvgConfig) -> Self {
        Self {
            grid,
            config,
            title: None,
            path: Vec::new(),
            start: None,
            goals: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_path(mut self, path: &[CellPos]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub fn with_start(mut self, start: CellPos) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_goals(mut self, goals: &[CellPos]) -> Self {
        self.goals = goals.to_vec();
        self
    }

    /// Floors drawn, top floor first.
    pub fn floors(&self) -> Vec<usize> {
        let mut floors: Vec<usize> = if self.path.is_empty() {
            (0..self.grid.floor_count()).collect()
        } else {
            self.path.iter().map(|p| p.floor).collect()
        };
        floors.sort_unstable_by(|a, b| b.cmp(a));
        floors.dedup();
        floors
    }

    /// Render and write to `path`.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_string())?;
        log::info!("Wrote floor plan to {}", path.display());
        Ok(())
    }

    fn panel_size(&self) -> (f64, f64) {
        let c = self.config.cell_px;
        (
            self.grid.width() as f64 * c,
            self.grid.height() as f64 * c + PANEL_TITLE_PX,
        )
    }

    /// Pixel center of a cell inside its panel's map area.
    fn cell_center(&self, x: i32, y: i32) -> (f64, f64) {
        let c = self.config.cell_px;
        let px = (x as f64 + 0.5) * c;
        let py = (self.grid.height() as f64 - y as f64 - 0.5) * c;
        (px, py)
    }

    fn write_floor(&self, f: &mut fmt::Formatter<'_>, floor: &FloorGrid) -> fmt::Result {
        let c = self.config.cell_px;
        let colors = &self.config.colors;
        writeln!(
            f,
            r#"    <rect width="{:.1}" height="{:.1}" fill="{}" stroke="{}"/>"#,
            floor.width() as f64 * c,
            floor.height() as f64 * c,
            colors.empty,
            colors.wall
        )?;
        for (coord, cell) in floor.iter() {
            if cell == CellType::Empty {
                continue;
            }
            let (cx, cy) = self.cell_center(coord.x, coord.y);
            writeln!(
                f,
                r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                cx - c / 2.0,
                cy - c / 2.0,
                c,
                c,
                colors.cell(cell)
            )?;
        }
        Ok(())
    }

    fn write_path(&self, f: &mut fmt::Formatter<'_>, floor_index: usize) -> fmt::Result {
        let on_floor: Vec<&CellPos> = self.path.iter().filter(|p| p.floor == floor_index).collect();
        for pair in on_floor.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let jump = (a.x - b.x).abs() > 1 || (a.y - b.y).abs() > 1;
            let (x1, y1) = self.cell_center(a.x, a.y);
            let (x2, y2) = self.cell_center(b.x, b.y);
            let (color, dash) = if jump {
                (self.config.colors.jump, r#" stroke-dasharray="6,4""#)
            } else {
                (self.config.colors.path, "")
            };
            writeln!(
                f,
                r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}" stroke-linecap="round"{}/>"#,
                x1, y1, x2, y2, color, self.config.path_width, dash
            )?;
        }
        Ok(())
    }

    fn write_markers(&self, f: &mut fmt::Formatter<'_>, floor_index: usize) -> fmt::Result {
        let r = self.config.marker_radius;
        if let Some(start) = self.start.filter(|s| s.floor == floor_index) {
            let (cx, cy) = self.cell_center(start.x, start.y);
            writeln!(
                f,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                cx, cy, r, self.config.colors.start
            )?;
        }
        for (i, goal) in self.goals.iter().enumerate() {
            if goal.floor != floor_index {
                continue;
            }
            let (cx, cy) = self.cell_center(goal.x, goal.y);
            writeln!(
                f,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                cx, cy, r, self.config.colors.goal
            )?;
            writeln!(
                f,
                r#"    <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="9" fill="white" text-anchor="middle" dy="3">{}</text>"#,
                cx,
                cy,
                i + 1
            )?;
        }
        Ok(())
    }
}

/// Escape special XML characters in text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for FloorPlanSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = self.config.padding;
        let floors = self.floors();
        let (panel_w, panel_h) = self.panel_size();
        let header = if self.title.is_some() { 30.0 } else { 0.0 };
        let width = panel_w + 2.0 * pad;
        let height = header + floors.len() as f64 * (panel_h + pad) + pad;

        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(f, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;
        if let Some(title) = &self.title {
            writeln!(
                f,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape_xml(title)
            )?;
        }

        for (slot, &floor_index) in floors.iter().enumerate() {
            let Some(floor) = self.grid.floor(floor_index) else {
                continue;
            };
            let top = header + pad + slot as f64 * (panel_h + pad);
            writeln!(f, r#"  <g id="floor-{}" transform="translate({:.0}, {:.0})">"#, floor_index, pad, top)?;
            writeln!(
                f,
                r##"    <text x="0" y="16" font-family="sans-serif" font-size="13" fill="#333">Floor {}</text>"##,
                floor_index + 1
            )?;
            writeln!(f, r#"   <g transform="translate(0, {:.0})">"#, PANEL_TITLE_PX)?;
            self.write_floor(f, floor)?;
            self.write_path(f, floor_index)?;
            self.write_markers(f, floor_index)?;
            writeln!(f, "   </g>")?;
            writeln!(f, "  </g>")?;
        }

        writeln!(f, "</svg>")
    }
}

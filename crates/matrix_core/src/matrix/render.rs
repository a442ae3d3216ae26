//! SVG rendering of a single cell.
//!
//! Occurrences are laid out on a near-square sub-grid (`k` per row, where
//! `k = ceil(sqrt(count))`), and the whole group is rotated about the canvas
//! centre. A cell with count 0 renders as an empty canvas of the same size.
//!
//! Markup is produced through `quick_xml::Writer`, so attribute values are
//! escaped and the output is always well-formed.

use std::f64::consts::PI;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::cell::{CellContent, ShapeKind};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Error from producing SVG markup.
#[derive(Debug)]
pub enum RenderError {
    /// The XML writer failed.
    Xml(String),
    /// The produced markup was not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Xml(msg) => write!(f, "XML write error: {}", msg),
            RenderError::Utf8(e) => write!(f, "Markup is not UTF-8: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::string::FromUtf8Error> for RenderError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        RenderError::Utf8(e)
    }
}

/// Placement of the occurrences inside one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Occurrences per row of the sub-grid.
    pub per_row: u32,
    /// Edge length of one shape.
    pub shape_size: f64,
    pub padding: f64,
}

impl Layout {
    pub fn new(count: u32, cell_size: f64) -> Self {
        let per_row = ((count as f64).sqrt().ceil() as u32).max(1);
        let k = per_row as f64;
        let shape_size = cell_size / (1.2 * k + 0.2 * (k - 1.0));
        Self {
            per_row,
            shape_size,
            padding: 0.15 * shape_size,
        }
    }

    /// Centre of occurrence `index` out of `count`.
    pub fn position(&self, index: u32, count: u32, cell_size: f64) -> (f64, f64) {
        if count == 1 {
            return (cell_size / 2.0, cell_size / 2.0);
        }
        let row = (index / self.per_row) as f64;
        let col = (index % self.per_row) as f64;
        let step = self.shape_size + self.padding;
        let offset = self.shape_size / 2.0 + self.padding;
        (col * step + offset, row * step + offset)
    }
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut s = format!("{:.2}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn points(vertices: &[(f64, f64)]) -> String {
    vertices
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ten alternating outer/inner vertices of a five-pointed star.
pub fn star_vertices(x: f64, y: f64, size: f64) -> Vec<(f64, f64)> {
    let outer = size / 2.0;
    let inner = size / 4.0;
    let mut vertices = Vec::with_capacity(10);
    for k in 0..5 {
        let a = PI / 2.0 + 2.0 * PI * k as f64 / 5.0;
        vertices.push((x + outer * a.cos(), y - outer * a.sin()));
        let b = PI / 2.0 + 2.0 * PI * (k as f64 + 0.5) / 5.0;
        vertices.push((x + inner * b.cos(), y - inner * b.sin()));
    }
    vertices
}

/// Equilateral triangle pointing up, centred on `(x, y)`.
pub fn triangle_vertices(x: f64, y: f64, size: f64) -> Vec<(f64, f64)> {
    let h = 3f64.sqrt() / 2.0 * size;
    vec![
        (x, y - h / 2.0),
        (x - size / 2.0, y + h / 2.0),
        (x + size / 2.0, y + h / 2.0),
    ]
}

fn shape_element(kind: ShapeKind, x: f64, y: f64, size: f64, fill: &str) -> BytesStart<'static> {
    match kind {
        ShapeKind::Circle => BytesStart::new("circle").with_attributes([
            ("cx", fmt_num(x).as_str()),
            ("cy", fmt_num(y).as_str()),
            ("r", fmt_num(size / 2.0).as_str()),
            ("fill", fill),
        ]),
        ShapeKind::Square => BytesStart::new("rect").with_attributes([
            ("x", fmt_num(x - size / 2.0).as_str()),
            ("y", fmt_num(y - size / 2.0).as_str()),
            ("width", fmt_num(size).as_str()),
            ("height", fmt_num(size).as_str()),
            ("fill", fill),
        ]),
        ShapeKind::Triangle => BytesStart::new("polygon").with_attributes([
            ("points", points(&triangle_vertices(x, y, size)).as_str()),
            ("fill", fill),
        ]),
        ShapeKind::Star => BytesStart::new("polygon").with_attributes([
            ("points", points(&star_vertices(x, y, size)).as_str()),
            ("fill", fill),
        ]),
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), RenderError> {
    writer
        .write_event(event)
        .map_err(|e| RenderError::Xml(e.to_string()))
}

/// Render `cell` on a `cell_size` x `cell_size` canvas.
pub fn render_cell(cell: &CellContent, cell_size: u32) -> Result<String, RenderError> {
    let size = cell_size as f64;
    let size_attr = cell_size.to_string();
    let view_box = format!("0 0 {} {}", cell_size, cell_size);

    let mut writer = Writer::new(Vec::new());
    let root = BytesStart::new("svg").with_attributes([
        ("width", size_attr.as_str()),
        ("height", size_attr.as_str()),
        ("viewBox", view_box.as_str()),
        ("xmlns", SVG_NS),
    ]);
    write_event(&mut writer, Event::Start(root))?;

    if cell.is_visible() {
        let centre = fmt_num(size / 2.0);
        let transform = format!(
            "rotate({} {} {})",
            cell.rotation.degrees(),
            centre,
            centre
        );
        let group = BytesStart::new("g").with_attributes([("transform", transform.as_str())]);
        write_event(&mut writer, Event::Start(group))?;

        let layout = Layout::new(cell.count, size);
        for i in 0..cell.count {
            let shape = &cell.shapes[i as usize % cell.shapes.len()];
            let (x, y) = layout.position(i, cell.count, size);
            let element = shape_element(shape.kind, x, y, layout.shape_size, shape.color.hex());
            write_event(&mut writer, Event::Empty(element))?;
        }

        write_event(&mut writer, Event::End(BytesEnd::new("g")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("svg")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

//! Cell descriptors: the value objects every rule manipulates.
//!
//! A `CellContent` is one matrix or option cell. Cells are never mutated in
//! place once built; every transformation returns a new cell so that
//! candidates derived from a shared base cannot alias each other.

use std::fmt;

/// Shape primitive drawn inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Star,
}

impl ShapeKind {
    /// All shape kinds, in table order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Star,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fill color of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Pink,
}

impl ShapeColor {
    /// All colors, in palette order.
    pub const ALL: [ShapeColor; 6] = [
        ShapeColor::Red,
        ShapeColor::Blue,
        ShapeColor::Green,
        ShapeColor::Orange,
        ShapeColor::Purple,
        ShapeColor::Pink,
    ];

    /// SVG fill value.
    pub fn hex(self) -> &'static str {
        match self {
            ShapeColor::Red => "#FF0000",
            ShapeColor::Blue => "#0000FF",
            ShapeColor::Green => "#00FF00",
            ShapeColor::Orange => "#FFA500",
            ShapeColor::Purple => "#800080",
            ShapeColor::Pink => "#FFC0CB",
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Rotation of a whole cell, always a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Build from a number of quarter turns, wrapping in both directions.
    pub fn from_quarter_turns(turns: i64) -> Self {
        match turns.rem_euclid(4) {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn quarter_turns(self) -> i64 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }

    /// Rotate further by `quarter_turns` steps of 90 degrees, modulo 360.
    pub fn turned(self, quarter_turns: i64) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + quarter_turns)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// The atomic unit manipulated by every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeAttributes {
    pub kind: ShapeKind,
    pub color: ShapeColor,
    pub count: u32,
    pub rotation: Rotation,
}

/// One matrix or option cell.
///
/// `count` and `rotation` are mirrored from the shape records onto the cell.
/// Use the `with_*` constructors to keep both in step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellContent {
    /// Shape records. Length 1 for every cell the catalog produces.
    pub shapes: Vec<ShapeAttributes>,
    /// Number of shape occurrences drawn. 0 renders an empty canvas.
    pub count: u32,
    pub rotation: Rotation,
}

impl CellContent {
    /// A cell holding one shape record.
    pub fn single(kind: ShapeKind, color: ShapeColor, count: u32, rotation: Rotation) -> Self {
        Self {
            shapes: vec![ShapeAttributes {
                kind,
                color,
                count,
                rotation,
            }],
            count,
            rotation,
        }
    }

    /// A cell holding several shape records drawn as one group.
    pub fn multi(shapes: Vec<(ShapeKind, ShapeColor)>, count: u32, rotation: Rotation) -> Self {
        Self {
            shapes: shapes
                .into_iter()
                .map(|(kind, color)| ShapeAttributes {
                    kind,
                    color,
                    count,
                    rotation,
                })
                .collect(),
            count,
            rotation,
        }
    }

    pub fn primary(&self) -> Option<&ShapeAttributes> {
        self.shapes.first()
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.primary().map(|s| s.kind)
    }

    pub fn color(&self) -> Option<ShapeColor> {
        self.primary().map(|s| s.color)
    }

    pub fn is_visible(&self) -> bool {
        self.count > 0 && !self.shapes.is_empty()
    }

    pub fn with_count(&self, count: u32) -> Self {
        let mut next = self.clone();
        next.count = count;
        for shape in &mut next.shapes {
            shape.count = count;
        }
        next
    }

    /// Add `delta` to the count, flooring at zero.
    pub fn with_count_delta(&self, delta: i32) -> Self {
        let count = (self.count as i64 + delta as i64).max(0);
        self.with_count(count.min(u32::MAX as i64) as u32)
    }

    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        let mut next = self.clone();
        next.rotation = rotation;
        for shape in &mut next.shapes {
            shape.rotation = rotation;
        }
        next
    }

    pub fn with_color(&self, color: ShapeColor) -> Self {
        let mut next = self.clone();
        for shape in &mut next.shapes {
            shape.color = color;
        }
        next
    }

    pub fn with_kind(&self, kind: ShapeKind) -> Self {
        let mut next = self.clone();
        for shape in &mut next.shapes {
            shape.kind = kind;
        }
        next
    }

    /// Attribute key used for equality and uniqueness within one item.
    pub fn signature(&self, rule_id: u32) -> Signature {
        Signature {
            kind: self.kind(),
            color: self.color(),
            count: self.count,
            rotation: self.rotation,
            rule_id,
        }
    }
}

/// Derived key (shape, color, count, rotation, rule id).
///
/// The rule id scopes uniqueness to a single generated item: two cells
/// built under different rule sets never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub kind: Option<ShapeKind>,
    pub color: Option<ShapeColor>,
    pub count: u32,
    pub rotation: Rotation,
    pub rule_id: u32,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.map(ShapeKind::name).unwrap_or("none");
        let color = self.color.map(ShapeColor::hex).unwrap_or("none");
        write!(
            f,
            "{}-{}-{}-{}-{}",
            kind, color, self.count, self.rotation, self.rule_id
        )
    }
}

use fxp::{BitCategory, Fpf, InvalidFormatError};
use smallvec::SmallVec;

use crate::options::{DiagramOptions, LabelPlacement, NotationMode};

/// One drawn cell of a bit-field diagram.
///
/// The cell spans `x .. x + width` horizontally and `y .. y + 1`
/// vertically. Only runs of missing bits are wider than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitCell {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub category: BitCategory,
    /// Weight exponent of the leftmost bit of the cell.
    pub position: i32,
    /// Numeric label (exponent or field index).
    pub label: Option<String>,
    /// Exponent `p` to write as `2^p`.
    pub weight: Option<i32>,
    /// Literal bit value.
    pub value: Option<bool>,
}

impl BitCell {
    /// Horizontal center.
    pub fn center(&self) -> f64 {
        self.x as f64 + self.width as f64 / 2.0
    }
}

/// TikZ node anchor of a text mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    East,
    West,
    South,
    North,
}

impl Anchor {
    pub fn name(self) -> &'static str {
        match self {
            Anchor::East => "east",
            Anchor::West => "west",
            Anchor::South => "south",
            Anchor::North => "north",
        }
    }
}

/// A decoration that is not a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Dot on the bottom edge at the binary point.
    BinaryPoint { x: i64, y: i64 },
    /// Vertical rule between the integer and fractional regions.
    Separator { x: i64, y: i64 },
    /// Word-level label; `text` is math-mode content.
    Label {
        x: f64,
        y: f64,
        anchor: Anchor,
        text: String,
    },
}

/// Cells in left-to-right order plus decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub cells: Vec<BitCell>,
    pub marks: SmallVec<[Mark; 4]>,
}

impl Diagram {
    /// Left edge of the leftmost cell.
    pub fn left(&self) -> i64 {
        self.cells.first().map_or(0, |c| c.x)
    }

    /// Right edge of the rightmost cell.
    pub fn right(&self) -> i64 {
        self.cells.last().map_or(0, |c| c.x + c.width)
    }
}

/// Lay out the bit-field diagram of `fpf`.
///
/// The bit of weight `2^p` occupies `x_shift - p - 1 .. x_shift - p`, so the
/// binary point sits at `x = x_shift` and the msb is leftmost.
pub fn layout(fpf: &Fpf, options: &DiagramOptions) -> Result<Diagram, InvalidFormatError> {
    if let Some(bits) = &options.bits {
        if usize::try_from(fpf.wl()).ok() != Some(bits.len()) {
            return Err(InvalidFormatError::BitsLength {
                expected: fpf.wl(),
                got: bits.len(),
            });
        }
    }

    let (msb, lsb) = (fpf.msb(), fpf.lsb());
    let y = i64::from(options.y_origin);
    let x_shift = i64::from(options.x_shift);
    let cell_x = |p: i32| x_shift - i64::from(p) - 1;

    let mut cells = Vec::new();

    // Implicit zeros between the binary point and a purely fractional word.
    if options.draw_missing && msb < -1 {
        cells.push(missing_cell(cell_x(-1), y, -i64::from(msb) - 1, -1));
    }

    let values = options.bits.as_ref().map(|b| b.bits());
    for (i, p) in fpf.positions().enumerate() {
        let category = fpf.category(p);
        cells.push(BitCell {
            x: cell_x(p),
            y,
            width: 1,
            category,
            position: p,
            label: options
                .numeric
                .then(|| cell_label(options.notation, category, p)),
            weight: options.power2.then_some(p),
            value: values.and_then(|v| v.get(i).copied()),
        });
    }

    // Implicit zeros between a purely integer word and the binary point.
    if options.draw_missing && lsb > 0 {
        cells.push(missing_cell(cell_x(lsb - 1), y, i64::from(lsb), lsb - 1));
    }

    let mut marks = SmallVec::new();
    if options.binary_point {
        marks.push(Mark::BinaryPoint { x: x_shift, y });
    }
    if options.intfrac && msb >= 0 && lsb < 0 {
        marks.push(Mark::Separator { x: x_shift, y });
    }

    let mut diagram = Diagram { cells, marks };
    let labels = word_labels(fpf, options, &diagram, cell_x);
    diagram.marks.extend(labels);

    tracing::debug!(
        format = %fpf,
        cells = diagram.cells.len(),
        marks = diagram.marks.len(),
        "laid out bit-field diagram"
    );
    Ok(diagram)
}

fn missing_cell(x: i64, y: i64, width: i64, position: i32) -> BitCell {
    BitCell {
        x,
        y,
        width,
        category: BitCategory::Missing,
        position,
        label: None,
        weight: None,
        value: None,
    }
}

/// Numeric cell label: the exponent in `mlsb` mode, the index inside the
/// integer or fractional field in `ifwl` mode.
fn cell_label(mode: NotationMode, category: BitCategory, p: i32) -> String {
    match (mode, category) {
        (NotationMode::Mlsb, _) => p.to_string(),
        (NotationMode::Ifwl, BitCategory::Sign) => "s".to_string(),
        (NotationMode::Ifwl, BitCategory::Fractional) => (-i64::from(p)).to_string(),
        (NotationMode::Ifwl, _) => p.to_string(),
    }
}

fn word_labels(
    fpf: &Fpf,
    options: &DiagramOptions,
    diagram: &Diagram,
    cell_x: impl Fn(i32) -> i64,
) -> Vec<Mark> {
    let (msb, lsb) = (fpf.msb(), fpf.lsb());
    let y = f64::from(options.y_origin);
    let numeric = options.numeric;
    let unsigned = if fpf.signed() { "" } else { "u" };
    let iwl = i64::from(msb) + 1;
    let fwl = -i64::from(lsb);

    // Above clears the weight annotations; below clears labels pushed under
    // cells that carry a literal bit.
    let above = y + if options.power2 { 1.5 } else { 1.05 };
    let below = y - if options.numeric && options.bits.is_some() { 0.5 } else { 0.05 };
    let center = |from: i32, to: i32| (cell_x(from) + cell_x(to) + 1) as f64 / 2.0;

    let side = |x: f64, anchor: Anchor, text: String| Mark::Label {
        x,
        y: y + 0.5,
        anchor,
        text,
    };
    let whole_word = || match options.notation {
        NotationMode::Mlsb if numeric => format!("{unsigned}({msb},{lsb})"),
        NotationMode::Mlsb => format!("{unsigned}(m,\\ell)"),
        NotationMode::Ifwl if numeric => format!("{unsigned}Q_{{{iwl}.{fwl}}}"),
        NotationMode::Ifwl => format!("{unsigned}Q_{{i.f}}"),
    };

    let (row, anchor) = match options.label {
        LabelPlacement::No => return Vec::new(),
        LabelPlacement::Left => {
            return vec![side(diagram.left() as f64 - 0.2, Anchor::East, whole_word())]
        }
        LabelPlacement::Right => {
            return vec![side(diagram.right() as f64 + 0.2, Anchor::West, whole_word())]
        }
        LabelPlacement::Above => (above, Anchor::South),
        LabelPlacement::Below => (below, Anchor::North),
    };
    let at = |x: f64, text: String| Mark::Label {
        x,
        y: row,
        anchor,
        text,
    };

    match options.notation {
        NotationMode::Mlsb => {
            let (m, l) = if numeric {
                (msb.to_string(), lsb.to_string())
            } else {
                ("m".to_string(), "\\ell".to_string())
            };
            if msb == lsb {
                vec![at(center(msb, msb), format!("{m}={l}"))]
            } else {
                vec![at(center(msb, msb), m), at(center(lsb, lsb), l)]
            }
        }
        NotationMode::Ifwl => {
            let mut labels = Vec::with_capacity(2);
            if msb >= 0 {
                let text = if numeric { iwl.to_string() } else { "i".to_string() };
                labels.push(at(center(msb, lsb.max(0)), text));
            }
            if lsb < 0 {
                let text = if numeric { fwl.to_string() } else { "f".to_string() };
                labels.push(at(center(msb.min(-1), lsb), text));
            }
            labels
        }
    }
}

use fxp::{BitCategory, Fpf, InvalidFormatError};

use crate::layout::{layout, BitCell, Diagram, Mark};
use crate::options::DiagramOptions;

/// Fill used when `colors` has no override for a category.
pub fn default_fill(category: BitCategory) -> &'static str {
    match category {
        BitCategory::Sign => "purple!15",
        BitCategory::Integer => "blue!15",
        BitCategory::Fractional => "red!40",
        BitCategory::Missing => "white",
    }
}

/// TikZ commands drawing the bit-field diagram of `fpf`, one per line,
/// to be placed inside a `tikzpicture`.
pub fn render(fpf: &Fpf, options: &DiagramOptions) -> Result<String, InvalidFormatError> {
    let diagram = layout(fpf, options)?;
    Ok(render_diagram(&diagram, options))
}

/// Same as [`render`], wrapped in a `tikzpicture` environment.
pub fn render_picture(fpf: &Fpf, options: &DiagramOptions) -> Result<String, InvalidFormatError> {
    let body = render(fpf, options)?;
    Ok(format!(
        "\\begin{{tikzpicture}}\n{body}\\end{{tikzpicture}}\n"
    ))
}

/// Serialize an already laid out diagram.
///
/// Only the `colors` and `hatches` of `options` are consulted here.
pub fn render_diagram(diagram: &Diagram, options: &DiagramOptions) -> String {
    let mut out = String::new();
    for cell in &diagram.cells {
        render_cell(&mut out, cell, options);
    }
    for mark in &diagram.marks {
        render_mark(&mut out, mark);
    }
    out
}

fn render_cell(out: &mut String, cell: &BitCell, options: &DiagramOptions) {
    let fill = options
        .colors
        .get(cell.category)
        .unwrap_or_else(|| default_fill(cell.category));
    let mut style = format!("fill={fill}");
    if let Some(pattern) = options.hatches.get(cell.category) {
        style.push_str(&format!(", pattern={pattern}"));
    }
    if cell.category == BitCategory::Missing {
        style.push_str(", dashed");
    }

    out.push_str(&format!(
        "\\draw[{style}] ({},{}) rectangle ({},{});\n",
        cell.x,
        cell.y,
        cell.x + cell.width,
        cell.y + 1
    ));

    let cx = num(cell.center());
    let y = cell.y as f64;
    if let Some(bit) = cell.value {
        out.push_str(&format!(
            "\\node at ({cx},{}) {{${}$}};\n",
            num(y + 0.5),
            u8::from(bit)
        ));
    }
    if let Some(label) = &cell.label {
        if cell.value.is_some() {
            out.push_str(&format!(
                "\\node[anchor=north, font=\\tiny] at ({cx},{}) {{${label}$}};\n",
                num(y)
            ));
        } else {
            out.push_str(&format!(
                "\\node at ({cx},{}) {{${label}$}};\n",
                num(y + 0.5)
            ));
        }
    }
    if let Some(p) = cell.weight {
        out.push_str(&format!(
            "\\node[anchor=south, font=\\tiny] at ({cx},{}) {{$2^{{{p}}}$}};\n",
            num(y + 1.0)
        ));
    }
}

fn render_mark(out: &mut String, mark: &Mark) {
    match mark {
        Mark::BinaryPoint { x, y } => {
            out.push_str(&format!("\\fill ({x},{y}) circle (1.5pt);\n"));
        }
        Mark::Separator { x, y } => {
            let y = *y as f64;
            out.push_str(&format!(
                "\\draw[very thick] ({x},{}) -- ({x},{});\n",
                num(y - 0.25),
                num(y + 1.25)
            ));
        }
        Mark::Label { x, y, anchor, text } => {
            out.push_str(&format!(
                "\\node[anchor={}] at ({},{}) {{${text}$}};\n",
                anchor.name(),
                num(*x),
                num(*y)
            ));
        }
    }
}

/// Shortest decimal form with at most two fractional digits.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

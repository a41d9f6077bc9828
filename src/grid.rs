//! Plain-text scene map.
//!
//! Discretizes the continuous scene onto a character grid and serializes it
//! together with exact node and obstacle listings. The artifact is a
//! debugging aid, not a protocol, but its structure is stable so snapshots
//! can be diffed across runs.

use crate::geometry::Bounds;
use crate::scene::{Node, Role};

const FIELD_MIN: f64 = 0.0;

const FREE_GLYPH: char = '.';
const OBSTACLE_GLYPH: char = '#';

/// Render the scene to a character map plus node and obstacle listings.
///
/// The map reads with +Y up and +X right. Obstacles are painted first and
/// nodes after them, so a node standing on an obstacle cell stays visible.
/// Identical inputs produce byte-identical output.
pub fn render_map(nodes: &[Node], obstacles: &[Bounds], field: f64, cell: f64) -> String {
    let w = ((field - FIELD_MIN) / cell) as usize + 1;
    let h = w;

    let mut rows = vec![vec![FREE_GLYPH; w]; h];

    // Obstacle footprints, floored to cell ranges and clamped to the grid.
    for bx in obstacles {
        let x0 = (((bx.x_min() - FIELD_MIN) / cell).floor() as isize).max(0);
        let x1 = (((bx.x_max() - FIELD_MIN) / cell).floor() as isize).min(w as isize - 1);
        let y0 = (((bx.y_min() - FIELD_MIN) / cell).floor() as isize).max(0);
        let y1 = (((bx.y_max() - FIELD_MIN) / cell).floor() as isize).min(h as isize - 1);
        for gy in y0..=y1 {
            for gx in x0..=x1 {
                rows[h - 1 - gy as usize][gx as usize] = OBSTACLE_GLYPH;
            }
        }
    }

    // Node markers, rounded to the nearest cell. Nodes outside the grid are
    // skipped here but still show up in the listing below.
    for (i_node, node) in nodes.iter().enumerate() {
        let gx = ((node.pos.x - FIELD_MIN) / cell).round() as isize;
        let gy = ((node.pos.y - FIELD_MIN) / cell).round() as isize;
        if gx < 0 || gx >= w as isize || gy < 0 || gy >= h as isize {
            continue;
        }
        rows[h - 1 - gy as usize][gx as usize] = node_glyph(node.role, i_node);
    }

    let mut out = String::new();
    out.push_str(&format!("Grid {w}x{h} (cell={cell}m). Top=+Y, Right=+X\n"));
    out.push_str(
        "Legend: '.'=free, '#'=obstacle, 'S'=source, 'D'=destination, \
         digits/letters=other nodes\n\n",
    );

    // Column ruler every 5 cells, labeled in tens of units modulo 100.
    out.push_str("     ");
    for gx in 0..w {
        if gx % 5 == 0 {
            out.push_str(&format!("{:2}", (gx * cell as usize) / 10 % 100));
        } else {
            out.push(' ');
        }
    }
    out.push('\n');

    for (gy, row) in rows.iter().enumerate() {
        let y_units = ((h - 1 - gy) as f64 * cell) as i64;
        let row_str: String = row.iter().collect();
        out.push_str(&format!("{y_units:4} {row_str}\n"));
    }

    out.push_str("\nNodes:\n");
    for (i_node, node) in nodes.iter().enumerate() {
        out.push_str(&format!(
            " - {:>6} (node {}): ({:.1}, {:.1})\n",
            node_name(node.role, i_node),
            i_node,
            node.pos.x,
            node.pos.y
        ));
    }

    out.push_str("\nObstacles (xMin..xMax, yMin..yMax):\n");
    for (i_obs, bx) in obstacles.iter().enumerate() {
        out.push_str(&format!(
            " - B{}: x[{:.1},{:.1}], y[{:.1},{:.1}]\n",
            i_obs,
            bx.x_min(),
            bx.x_max(),
            bx.y_min(),
            bx.y_max()
        ));
    }

    out
}

fn node_glyph(role: Role, i_node: usize) -> char {
    match role {
        Role::Source => 'S',
        Role::Destination => 'D',
        Role::Plain => {
            if i_node < 10 {
                (b'0' + i_node as u8) as char
            } else if i_node < 36 {
                (b'a' + (i_node - 10) as u8) as char
            } else {
                '?'
            }
        }
    }
}

fn node_name(role: Role, i_node: usize) -> String {
    match role {
        Role::Source => "source".to_string(),
        Role::Destination => "destination".to_string(),
        Role::Plain => format!("mobile{i_node}"),
    }
}

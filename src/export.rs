//! Adjacency export — render a graph's raw weights as a text table.
//!
//! One row per source state, one column per target state, both in
//! insertion order:
//!
//! ```text
//!    A  B
//! A  0  1
//! B  1  0
//! ```

use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::io::Write;

use crate::markov::WeightedTransitionGraph;
use crate::Result;

/// Write the adjacency table of `graph` to `writer`.
pub fn write_adjacency<S>(graph: &WeightedTransitionGraph<S>, writer: &mut dyn Write) -> Result<()>
where
    S: Clone + Eq + Hash + Debug + Display,
{
    writeln!(writer, "{}", render_adjacency(graph))?;
    Ok(())
}

/// Render the adjacency table of `graph`, cells right-aligned per column.
pub fn render_adjacency<S>(graph: &WeightedTransitionGraph<S>) -> String
where
    S: Clone + Eq + Hash + Debug + Display,
{
    let states = graph.states();
    let labels: Vec<String> = states.iter().map(ToString::to_string).collect();
    let cells: Vec<Vec<String>> = states
        .iter()
        .map(|from| {
            states
                .iter()
                .map(|to| format_weight(graph.raw_weight(from, to)))
                .collect()
        })
        .collect();

    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..states.len())
        .map(|j| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(labels[j].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(states.len() + 1);

    let mut header = " ".repeat(label_width);
    for (label, &width) in labels.iter().zip(&widths) {
        header.push_str(&format!("  {label:>width$}"));
    }
    lines.push(header);

    for (label, row) in labels.iter().zip(&cells) {
        let mut line = format!("{label:<label_width$}");
        for (cell, &width) in row.iter().zip(&widths) {
            line.push_str(&format!("  {cell:>width$}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn format_weight(weight: f64) -> String {
    format!("{weight}")
}

impl<S> fmt::Display for WeightedTransitionGraph<S>
where
    S: Clone + Eq + Hash + Debug + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_adjacency(self))
    }
}

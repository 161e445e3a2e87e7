//! Growable table of discovered colors and their substitutes.

mod color_table;

pub use color_table::{ColorMapping, ColorTable, GROWTH_INCREMENT, IDENTICAL_DISTANCE};

// Evaluation exports: JSON download and slide deck outline.

pub mod deck;
pub mod json;

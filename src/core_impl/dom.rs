use super::*;

mod content;
mod query;
mod style_and_class;
mod tree;

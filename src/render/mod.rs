//! Presentation layer. Everything here is a pure function of a stored paper.

pub mod answer_key;
pub mod html;
pub mod layout;
pub mod omr;
pub mod text;
pub mod word;

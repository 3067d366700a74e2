//! Forecast interpretation: bias and uncertainty labels plus a narrative summary

pub mod classifier;
pub mod error;
pub mod templates;

pub use classifier::{
    classify_bias, classify_uncertainty, generate_automated_response, interpret,
    interpret_with_style, range_ratio,
};
pub use error::InterpretError;
pub use templates::{render_narrative, NarrativeInput, NarrativeStyle};

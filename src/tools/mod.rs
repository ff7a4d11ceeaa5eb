//! The tools module holds the collaborators around the codec itself.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - files: Whole-file text, binary and CSV wrappers that load on first use.
//! - freq_count: Character and word frequencies, useful when authoring a dictionary.
//! - normalize: Folds typographic punctuation into plain ASCII before compression.
//! - report: Accuracy of a round trip and the size reduction achieved.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
pub mod normalize;
pub mod report;

//! Count every three-word phrase across one or more chunked text sources.
//!
//! Each source runs through its own pipeline: raw reads are decoded
//! ([`source`]), split into words ([`phrase_tokenizer`]), and fed through a
//! [`SlidingWindow`] that only retires a phrase once all three of its words are
//! known to be complete. Every pipeline writes into one shared [`PhraseTally`].
//! The [`Coordinator`] drives the pipelines concurrently and joins them.
//!
//! # Example
//! ```no_run
//! use phrase_tally::{Coordinator, CoordinatorConfig, Source};
//!
//! # async fn demo() -> Result<(), phrase_tally::CoordinatorError> {
//! let outcome = Coordinator::new(CoordinatorConfig::default())
//!     .run([Source::Path("moby.txt".into()), Source::Stdin])
//!     .await?;
//! for label in &outcome.missing {
//!     println!("missing: {label}");
//! }
//! println!("distinct phrases: {}", outcome.tally.len());
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p phrase-tally --example tally_file -- <path>`.

pub mod coordinator;
pub mod source;
pub mod tally;
pub mod window;

pub use coordinator::{
    Coordinator, CoordinatorConfig, CoordinatorError, DEFAULT_CHUNK_SIZE, RunOutcome,
    SourceReport,
};
pub use source::{ChunkReader, Source, SourceError, Utf8Decoder};
pub use tally::PhraseTally;
pub use window::{PHRASE_LEN, SlidingWindow, WindowStats, phrase_key};

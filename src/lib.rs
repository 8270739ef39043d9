//! Scenename - round-trip codec for scene release names
//!
//! Wires the naming and parsing crates into a [`Codec`] configured from a
//! TOML file, and backs the `scenename` command-line tool.
//!
//! ```
//! use scenename::Codec;
//!
//! let codec = Codec::shared();
//! assert_eq!(
//!     codec.rename("Psych_S08E01_HDTV_x264-EXCELLENCE").unwrap(),
//!     "Psych.S08E01.HDTV.x264-EXCELLENCE"
//! );
//! ```

pub mod codec;
pub mod config;

pub use codec::Codec;
pub use config::Config;

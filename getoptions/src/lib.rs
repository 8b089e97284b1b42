//! Command-line option parsing in the style of Perl's Getopt::Long.
//!
//! - Options are declared with [`Opt`] and registered on a [`GetOpt`].
//! - Names may be abbreviated as long as the abbreviation is unambiguous.
//! - Single-dash tokens are read according to the [`Mode`]: bundled short
//!   options, a short option with an attached value, or a long name.
//! - Values land in typed storage owned by the parser or bound to caller
//!   variables; read them back with `opt.get::<T>("name")`.
//!
//! ```
//! use getoptions::{GetOpt, Opt};
//!
//! let mut verbose = false;
//! let mut opt = GetOpt::new();
//! opt.define(Opt::negatable_var(&mut verbose, "verbose", false).alias("v"))
//!     .unwrap()
//!     .define(Opt::string_list("include"))
//!     .unwrap();
//! let rest = opt
//!     .parse(["-v", "--inc", "a", "file", "--include=b"])
//!     .unwrap();
//! assert_eq!(rest, vec!["file"]);
//! assert_eq!(opt.get::<Vec<String>>("include").unwrap(), vec!["a", "b"]);
//! drop(opt);
//! assert!(verbose);
//! ```

mod consumer;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod option;
pub mod parser;
pub mod registry;
pub mod tokenizer;

pub use error::{DefinitionError, Error, Result};
pub use matcher::{resolve, Match};
pub use option::{Arity, FromValue, Kind, Opt, Value};
pub use parser::{GetOpt, ParseResult, UnknownMode};
pub use registry::{Registry, Target};
pub use tokenizer::{classify, Classified, Mode};

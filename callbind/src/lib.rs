//! Callbind - signature-matched callback dispatch
//!
//! An event source declares a closed set of event kinds, each with a fixed
//! parameter signature and, optionally, a default handler. Callers hand over
//! an ordered list of plain functions or closures. [`Dispatcher::bind`]
//! matches them to kinds once, by parameter signature, and every occurrence
//! afterwards is a table lookup.
//!
//! Mistakes surface at bind time, before the first event:
//! - a callback that fits no kind is rejected ([`Error::UnmatchedCallback`]),
//! - a required kind nobody handles is rejected ([`Error::MissingRequiredHandler`]).
//!
//! ```rust
//! use callbind::{Event, callbacks};
//!
//! #[derive(Event)]
//! #[event(output = Result<(), String>)]
//! enum Poll {
//!     Message(Vec<u8>),
//!     #[event(default = Err::<(), String>)]
//!     Error(String),
//!     #[event(default = || Ok(()))]
//!     Eof,
//! }
//!
//! let binding = callbind::bind::<Poll, _>(callbacks![|payload: Vec<u8>| {
//!     println!("{} bytes", payload.len());
//!     Ok(())
//! }])?;
//!
//! binding.dispatch(Poll::Message(b"hello".to_vec())).unwrap();
//! assert!(binding.dispatch(Poll::Error("broker down".into())).is_err());
//! # Ok::<(), callbind::Error>(())
//! ```
//!
//! See `examples/consumer.rs` for a polling loop driving a binding.

mod binding;
mod callback;
mod config;
mod dispatcher;
mod error;
mod event;
mod kind;
mod report;
mod signature;

pub use binding::{Binding, Bound, Source};
pub use callback::{Callback, IntoCallback};
pub use config::Config;
pub use dispatcher::{Dispatcher, bind};
pub use error::Error;
pub use event::Event;
pub use kind::EventKind;
pub use report::{BindingEntry, BindingReport};
pub use signature::{Args, ParamType, Signature};

#[cfg(feature = "macros")]
pub use callbind_macros::Event;

pub type Result<T = ()> = std::result::Result<T, Error>;

// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive menu.
//
// Module responsibilities:
// - `model`: the immutable `Monkey` record and its JSON shape.
// - `config`: environment-driven settings (remote endpoint, timeout).
// - `api`: one-shot HTTP fetch of the remote monkey list.
// - `provider`: remote-or-seed resolution, lookup by name, random picks
//   and the selection counter.
// - `random`: pluggable index selection for random picks.
// - `ui` / `art`: the terminal menu and its decorations.
pub mod api;
pub mod art;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod random;
pub mod ui;

pub use error::{ProviderError, ProviderResult};
pub use model::Monkey;
pub use provider::{MonkeyProvider, Pick};

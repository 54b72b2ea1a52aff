// Library root
// -----------
// The binary (`main.rs`) wires clap subcommands onto these modules.
//
// Module responsibilities:
// - `config`: the `.putconfig` file recording the instance URI.
// - `instance`: the verification handshake and the per-run gate that must
//   pass before any file operation.
// - `api`: blocking HTTP calls for list/upload/download/rename/remove.
// - `ui`: prompt, spinner, and table output.
// - `error`: the typed error taxonomy shared by all of the above.
pub mod api;
pub mod config;
pub mod error;
pub mod instance;
pub mod ui;

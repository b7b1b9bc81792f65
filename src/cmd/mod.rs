/// Class database inspection command.
pub mod classdb;
/// Schema-driven value decode command.
pub mod decode;
/// Template and value rendering helpers.
pub mod print;
/// Flat schema inspection command.
pub mod template;
/// Shared CLI parsing and loading helpers.
pub mod util;

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

/// Surrounds a message with blank lines.
pub fn wrap_msg(msg: Message) -> String {
    format!("\n{}\n", msg)
}

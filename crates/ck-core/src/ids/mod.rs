//! Identifier newtypes.

mod clipboard;
mod id_macro;

pub use clipboard::EntryId;

//! External delivery channels for editor notifications.

pub mod email;

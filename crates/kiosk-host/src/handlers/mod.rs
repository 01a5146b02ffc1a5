//! One module per handler concern, all operating on the shared session.

pub mod app;
pub mod connect;
pub mod tts;
pub mod volume;

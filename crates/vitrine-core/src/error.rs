//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("session error: {0}")]
    Session(#[from] vitrine_session::SessionError),

    #[error("configuration error: {0}")]
    Config(String),
}

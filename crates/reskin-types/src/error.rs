//! Error types for reskin.

use std::io;

use crate::resource::ScreenId;

/// Errors produced by the skinning layer.
#[derive(Debug, thiserror::Error)]
pub enum SkinError {
    /// An observer handle was expected but none was supplied.
    #[error("cannot subscribe an unset observer")]
    NullObserver,

    #[error("skin not found: {0}")]
    SkinNotFound(String),

    /// The screen's inflater already carries an interceptor.
    #[error("a view-inflation factory is already installed on screen {0}")]
    FactoryAlreadySet(ScreenId),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SkinError>;

use thiserror::Error;

use crate::StyleTarget;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("a {target} style named `{name}` already exists")]
    DuplicateName { target: StyleTarget, name: String },

    #[error("no {target} style named `{name}`")]
    NotFound { target: StyleTarget, name: String },

    #[error("the default {target} style `{name}` can't be removed")]
    DefaultStyle { target: StyleTarget, name: String },

    #[error("invalid style sheet: {0}")]
    Sheet(#[from] serde_json::Error),
}

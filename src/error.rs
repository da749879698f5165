//! Error types shared across the crate.

use crate::abs::ShaderStage;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while turning GLSL sources into a linked program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("Failed to create shader object: {0}")]
    Create(String),
    #[error("Failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Failed to link shader program:\n{log}")]
    Link { log: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to create window: {0}")]
    SurfaceCreation(String),
    #[error("Failed to load OpenGL functions: {0}")]
    GraphicsFunctionLoad(String),
    #[error("Failed to create GPU resource: {0}")]
    ResourceCreation(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

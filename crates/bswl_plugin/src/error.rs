use camino::Utf8PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] bswl_core::Error),

    /// The host failed to turn an image file into a texture.
    #[error("Failed to load texture {path}: {message}")]
    Texture { path: Utf8PathBuf, message: String },

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid loader config: {0}")]
    Config(#[from] toml::de::Error),
}

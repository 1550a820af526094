use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    /// The craft sprite atlas could not be read or decoded.
    #[error("craft sprites unavailable at {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("craft sprite strip is {width}x{height}; expected a row of square tiles")]
    InvalidAtlas { width: u32, height: u32 },
}

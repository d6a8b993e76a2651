use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("template missing: {0}")]
    TemplateMissing(std::path::PathBuf),

    #[error("no qualifying data table in template")]
    TableNotFound,

    #[error("artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

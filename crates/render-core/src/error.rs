use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Image '{id}' has {actual} bytes of pixel data, expected {expected}")]
    InvalidImage {
        id: String,
        actual: usize,
        expected: usize,
    },
    #[error("Renderer used outside begin_document/finish: {0}")]
    NotStarted(&'static str),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

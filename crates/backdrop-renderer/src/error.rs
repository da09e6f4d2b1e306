//! Errors raised while bringing up the GPU context

#[derive(Debug)]
pub enum BackdropError {
    CreateSurface(String),
    NoAdapter(String),
    RequestDevice(String),
    UnsupportedSurface,
}

impl std::fmt::Display for BackdropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateSurface(msg) => write!(f, "failed to create drawing surface: {}", msg),
            Self::NoAdapter(msg) => write!(f, "no compatible GPU adapter: {}", msg),
            Self::RequestDevice(msg) => write!(f, "failed to open GPU device: {}", msg),
            Self::UnsupportedSurface => write!(f, "surface reports no usable texture format"),
        }
    }
}

impl std::error::Error for BackdropError {}

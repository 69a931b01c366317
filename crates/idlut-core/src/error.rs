#[derive(Debug, thiserror::Error)]
pub enum LutError {
    #[error("LUT must have {expected} entries, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("input range is inverted: min {input_min} > max {input_max}")]
    InvertedInputRange { input_min: i32, input_max: i32 },
    #[error("entry {index} holds {value}, outside 0..=255")]
    OutOfRange { index: usize, value: i64 },
    #[error("pixel buffer holds {actual} bytes, expected {width}x{height}")]
    Dimensions { width: u32, height: u32, actual: usize },
    #[error("invalid percentile window: low {low}, high {high}")]
    InvalidPercentile { low: f64, high: f64 },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] ::image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layout request {generation} was superseded by request {latest}")]
    Superseded { generation: u64, latest: u64 },
}

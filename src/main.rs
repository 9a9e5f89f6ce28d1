use logsink::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logsink::app::run().await
}

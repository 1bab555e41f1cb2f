//! Server binary for the good-luck message board.

#[tokio::main]
async fn main() {
    wishboard::web::run().await;
}

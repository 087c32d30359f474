#[tokio::main]
async fn main() {
    wakesurf_backend::run().await;
}

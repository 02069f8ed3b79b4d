#[tokio::main]
async fn main() {
    feather_scores::start_server().await;
}

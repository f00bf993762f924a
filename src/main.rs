use std::env;
use std::net::SocketAddr;

use routebook::engine::Engine;
use routebook::error::Error;
use routebook::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let addr: SocketAddr = env::var("ROUTEBOOK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".into())
        .parse()
        .map_err(|_| Error::Config("invalid ROUTEBOOK_ADDR".into()))?;

    serve(Engine::new(), addr).await
}

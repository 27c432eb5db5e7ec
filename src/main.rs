use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = plaid_link_server::args::parse();
    plaid_link_server::server::serve(args).await
}

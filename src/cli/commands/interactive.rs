//! Implementation of the `ikigai interactive` command.

use anyhow::Result;
use tokio::io::BufReader;

use crate::cli::session::Session;
use crate::services::AnalysisClient;

pub async fn execute(client: AnalysisClient, json_mode: bool) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut session = Session::new(client, std::io::stdout()).with_json_results(json_mode);
    session.run(stdin).await
}

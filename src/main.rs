use std::process::ExitCode;

use miette::Result;
use sinopia_auth::SinopiaAuth;

#[async_std::main]
async fn main() -> Result<ExitCode> {
    SinopiaAuth::load().await
}

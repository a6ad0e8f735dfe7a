//! Command-line client for the message server
//!
//! ```text
//! msg-client post hello there
//! msg-client get 1
//! ```

use clap::{Parser, Subcommand};
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, LOCATION};
use hyper::{Request, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "msg-client", version, about = "Post and fetch messages on a msgd server")]
struct Cli {
    /// Base URL of the server
    #[arg(long, default_value = "http://localhost:6969")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store a message; words are joined with single spaces
    Post {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Fetch a message by id
    Get { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let base = cli.url.trim_end_matches('/');
    let client: Client<HttpConnector, Full<Bytes>> =
        Client::builder(TokioExecutor::new()).build_http();

    match cli.command {
        Command::Post { text } => {
            let req = Request::post(format!("{base}/messages"))
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(Full::new(Bytes::from(text.join(" "))))?;
            let resp = client.request(req).await?;

            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("(none)")
                .to_string();
            let status = resp.status().as_u16();
            let body = read_body(resp).await?;

            println!("HTTP {status}");
            println!("Location: {location}");
            println!("ID: {body}");
        }
        Command::Get { id } => {
            let uri = format!("{base}/messages/{id}").parse()?;
            let resp = client.get(uri).await?;

            let status = resp.status().as_u16();
            let body = read_body(resp).await?;

            println!("HTTP {status}");
            println!("Body:");
            println!("{body}");
        }
    }

    Ok(())
}

async fn read_body(resp: Response<Incoming>) -> Result<String, BoxError> {
    let bytes = resp.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

use std::path::PathBuf;

use axum::body::Body;
use axum::http::Request;
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use tenant_gateway::config::load_config;
use tenant_gateway::routing::{RequestView, RouteMatcher};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Route table tooling for the tenant gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a config's routes and print conflict/shadowing warnings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Score every route against a hypothetical request
    Explain {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value = "GET")]
        method: String,
        #[arg(long, default_value = "")]
        host: String,
        #[arg(long, default_value = "/")]
        path: String,
        /// Request header as NAME=VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_key_value)]
        headers: Vec<(String, String)>,
        /// Raw query string, e.g. "tenant_id=acme"
        #[arg(long)]
        query: Option<String>,
    },
    /// List the live route table of a running gateway
    Routes {
        #[arg(short, long, default_value = "http://localhost:8081")]
        url: String,
        #[arg(short, long, env = "GATEWAY_ADMIN_KEY")]
        key: String,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => {
            let config = load_config(&config)?;
            let matcher = RouteMatcher::new(config.routes)?;
            let warnings = matcher.validate_routes();
            println!("{} routes compiled, {} warnings", matcher.len(), warnings.len());
            for warning in warnings {
                println!("  warning: {warning}");
            }
        }
        Commands::Explain {
            config,
            method,
            host,
            path,
            headers,
            query,
        } => {
            let config = load_config(&config)?;
            let matcher = RouteMatcher::new(config.routes)?;

            let uri = match query {
                Some(q) => format!("{path}?{q}"),
                None => path,
            };
            let mut builder = Request::builder().method(method.as_str()).uri(uri);
            if !host.is_empty() {
                builder = builder.header("host", host);
            }
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
            let request = builder.body(Body::empty())?;
            let view = RequestView::from_request(&request);

            for score in matcher.explain(&view) {
                println!("  [{:>3}] {:>6}  {}", score.index, score.score, score.description);
            }
            match matcher.best_match(&view) {
                Ok(m) => println!("=> route {} ({}) -> {}", m.index, m.route.description, m.route.target),
                Err(e) => println!("=> {e}"),
            }
        }
        Commands::Routes { url, key } => {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);

            let res = reqwest::Client::new()
                .get(format!("{url}/admin/routes"))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

use logresolve::config::ResolveConfig;
use logresolve::resolver::{Address, Resolve, SystemResolver};
use logresolve::rewrite::HostnameRewriter;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let resolver = ResolveConfig::default().build_resolver(Arc::new(SystemResolver::new()))?;

    println!("=== First lookup (cold) ===");
    let start = Instant::now();
    let name = resolver.resolve(Address::new("127.0.0.1")).await;
    println!("127.0.0.1 -> {name} ({:?})", start.elapsed());

    println!("\n=== Second lookup (cached) ===");
    let start = Instant::now();
    let name = resolver.resolve(Address::new("127.0.0.1")).await;
    println!("127.0.0.1 -> {name} ({:?})", start.elapsed());

    println!("\n=== Stream rewriting ===");
    let log = "127.0.0.1 - - \"GET /\" 200\n203.0.113.9 - - \"GET /health\" 204\n";
    let mut rewriter = HostnameRewriter::new(log.as_bytes(), resolver);
    while let Some(line) = rewriter.read_line().await? {
        println!("{line}");
    }

    Ok(())
}

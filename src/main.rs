#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::struct_excessive_bools)]

use console::style;

#[tokio::main]
async fn main() {
  // Install the default crypto provider for rustls
  let _ = rustls::crypto::ring::default_provider().install_default();

  if let Err(err) = phonetrace::run().await {
    eprintln!("{} {err:#}", style("error:").red().bold());
    std::process::exit(1);
  }
}

use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use roman_core::ServiceConfig;

/// Runtime configuration for the `roman-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first), with defaults suitable for production.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "roman-server",
    version,
    about = "An HTTP service converting integers to Roman numerals"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,

    /// Number of worker tasks converting range chunks concurrently.
    ///
    /// Defaults to the number of logical CPUs.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS")]
    pub num_workers: Option<usize>,

    /// Number of integers converted per unit of work.
    ///
    /// Small chunks spread a range across more workers; large chunks cut
    /// dispatch overhead. A full `1..=3999` range at the default produces 63
    /// chunks.
    ///
    /// Environment variable: `CHUNK_SIZE`
    #[arg(long, env = "CHUNK_SIZE", default_value_t = 64)]
    pub chunk_size: usize,

    /// Capacity of each worker's inbound queue.
    ///
    /// Environment variable: `WORKER_QUEUE_SIZE`
    #[arg(long, env = "WORKER_QUEUE_SIZE", default_value_t = 1)]
    pub worker_queue_size: usize,

    /// Seconds to wait for in-flight range requests during shutdown.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 3)]
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub service: ServiceConfig,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let num_workers = args.num_workers.unwrap_or_else(num_cpus::get);

        if num_workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.chunk_size == 0 {
            bail!("CHUNK_SIZE must be greater than 0");
        }

        if args.worker_queue_size == 0 {
            bail!("WORKER_QUEUE_SIZE must be greater than 0");
        }

        Ok(Self {
            server_addr: args.server_addr,
            service: ServiceConfig {
                num_workers,
                chunk_size: args.chunk_size,
                worker_queue_size: args.worker_queue_size,
                shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
            },
        })
    }
}

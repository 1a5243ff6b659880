use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use tagtrends::config::{self, Config};
use tagtrends::output::terminal;
use tagtrends::pipeline::runner::{answer_json, TrendPipeline, TrendsResponse};
use tagtrends::tags::{export, frequency};
use tagtrends::trends::google::GoogleTrendsClient;
use tagtrends::trends::throttle::Throttle;
use tagtrends::trends::traits::TrendSource;
use tagtrends::youtube::client::YouTubeClient;
use tagtrends::youtube::models::{collect_tags, VideoSummary};

/// tagtrends: rank video tags by Google Trends interest.
///
/// With no arguments, asks for a keyword file ("Common Tags: ... Unique Tags:
/// ..."), ranks its keywords by average interest and writes the plain list
/// to tags.txt.
#[derive(Parser)]
#[command(name = "tagtrends", version, about)]
struct Cli {
    /// Read a {"common": [[tag, count]], "unique": [...]} document from stdin
    /// and print {"trends": ..., "status": ...} to stdout (no subcommand)
    #[arg(long)]
    json: bool,

    /// Seconds to wait before each trends request (default: 3)
    #[arg(long, global = true)]
    delay: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the keywords of a "Common Tags / Unique Tags" file
    Analyze {
        /// Keyword file (prompted for when omitted)
        path: Option<PathBuf>,

        /// Where to write the plain keyword list (default: tags.txt)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Count tags and export the common and unique sets
    Tags {
        /// File of raw tags, separated by commas or newlines
        #[arg(required_unless_present = "title", conflicts_with = "title")]
        path: Option<PathBuf>,

        /// Collect the tags of the most viewed YouTube videos matching this
        /// title instead (needs TAGTRENDS_YOUTUBE_API_KEY)
        #[arg(long)]
        title: Option<String>,

        /// How many of the most frequent tags count as common (default: 10)
        #[arg(long, default_value_t = frequency::DEFAULT_COMMON_LIMIT)]
        common_limit: usize,

        /// Export file (default: youtube-tags-<timestamp>.txt)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the analysis as JSON for `tagtrends --json` instead of
        /// writing the export file
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tagtrends=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.check_conflicts() {
        e.exit();
    }

    if cli.json {
        return run_json(cli.delay).await;
    }

    let config = load_config(cli.delay)?;

    match cli.command {
        None => {
            let path = prompt_for_path()?;
            run_file(&config, &path, None).await
        }

        Some(Commands::Analyze { path, output }) => {
            let path = match path {
                Some(path) => path,
                None => prompt_for_path()?,
            };
            run_file(&config, &path, output.as_deref()).await
        }

        Some(Commands::Tags {
            path,
            title,
            common_limit,
            output,
            json,
        }) => {
            let (tags, videos) = match (path, title) {
                (_, Some(title)) => {
                    let videos = fetch_videos(&config, &title).await?;
                    (collect_tags(&videos), videos)
                }
                (Some(path), None) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    (frequency::parse_raw_tags(&raw), Vec::new())
                }
                (None, None) => anyhow::bail!("Pass a tag file or --title"),
            };
            let analysis = frequency::analyze_tags(&tags, common_limit);
            info!(
                tags = tags.len(),
                common = analysis.common.len(),
                unique = analysis.unique.len(),
                "Analyzed tags"
            );

            if json {
                println!("{}", serde_json::to_string(&analysis)?);
                return Ok(());
            }

            terminal::display_tag_analysis(&analysis);
            if !videos.is_empty() {
                terminal::display_videos(&videos);
            }
            let output =
                output.unwrap_or_else(|| export::default_export_path(chrono::Utc::now()));
            export::write_export(&analysis, &videos, &output)?;
            println!("\nExport written to {}", output.display().to_string().bold());
            println!(
                "{}",
                format!("Next: tagtrends analyze {}", output.display()).dimmed()
            );
            Ok(())
        }
    }
}

impl Cli {
    /// `--json` reads stdin and takes no subcommand.
    fn check_conflicts(&self) -> Result<(), clap::Error> {
        if self.json && self.command.is_some() {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--json reads a tag document from stdin and cannot be combined with a subcommand",
            ));
        }
        Ok(())
    }
}

/// Load configuration from the environment, applying the --delay override.
fn load_config(delay: Option<f64>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(secs) = delay {
        config.delay = config::seconds(secs)?;
    }
    Ok(config)
}

/// `--json` mode: stdin document in, response document out.
///
/// Every failure, configuration and client setup included, still prints the
/// error document on stdout.
async fn run_json(delay: Option<f64>) -> Result<()> {
    let mut input = String::new();
    let outcome = match io::stdin().read_to_string(&mut input) {
        Ok(_) => {
            answer_json(&input, || {
                let config = load_config(delay)?;
                let client: Box<dyn TrendSource> = Box::new(create_client(&config)?);
                Ok((config, client))
            })
            .await
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to read JSON from stdin")),
    };

    match outcome {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string(&TrendsResponse::failure(&e))?);
            Err(e)
        }
    }
}

/// Keyword-file mode: rank, write the tags file, print the summary.
async fn run_file(config: &Config, path: &Path, output: Option<&Path>) -> Result<()> {
    let output = output.unwrap_or_else(|| Path::new(&config.output_path));

    let client = create_client(config)?;
    let pipeline = TrendPipeline {
        source: &client,
        settings: &config.query,
        throttle: Throttle::new(config.delay),
        char_limit: config.char_limit,
    };

    match pipeline.analyze_file(path, output).await? {
        Some(run) => {
            terminal::display_ranking(&run.records);
            terminal::display_summary(
                &run.summary,
                &config.query.timeframe,
                config.char_limit,
                &output.display().to_string(),
            );
        }
        None => {
            println!(
                "{}",
                "Failed to load keywords. Check file contents.".red().bold()
            );
        }
    }
    Ok(())
}

/// Create the Google Trends client from configuration.
fn create_client(config: &Config) -> Result<GoogleTrendsClient> {
    info!(
        base_url = %config.base_url,
        geo = %config.query.geo,
        property = %config.query.property,
        timeframe = %config.query.timeframe,
        "Using Google Trends"
    );
    GoogleTrendsClient::new(&config.base_url, &config.hl, config.tz, config.timeout)
}

/// Search YouTube for `title` and return the analyzed videos with their tags.
async fn fetch_videos(config: &Config, title: &str) -> Result<Vec<VideoSummary>> {
    config.require_youtube()?;
    let client = YouTubeClient::new(
        &config.youtube_base_url,
        &config.youtube_api_key,
        config.timeout,
    )?;
    let videos = client.top_videos(title, chrono::Utc::now()).await?;
    if videos.is_empty() {
        println!("{}", format!("No 4-20 minute videos found for '{title}'.").yellow());
    }
    Ok(videos)
}

/// Ask for the keyword file path on stdin.
fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter the path to the keywords file: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read file path from stdin")?;
    Ok(PathBuf::from(line.trim()))
}

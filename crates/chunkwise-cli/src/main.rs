use anyhow::{Context, Result};
use chunkwise_core::config::{ChunkwiseConfig, ConfigLoader, LlmProvider};
use chunkwise_core::llm::LLMFactory;
use chunkwise_core::{Conversation, Role, Summarizer};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

mod progress_bar;

use progress_bar::TerminalProgress;

#[derive(Parser, Debug)]
#[clap(name = "chunkwise", author, version = "0.1.0", about = "Summarize large documents chunk by chunk and ask follow-up questions")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "chunkwise.yaml", help = "Configuration file (optional)")]
    config: String,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a text file, then answer follow-up questions
    Summarize {
        #[clap(help = "Path to a UTF-8 text file, or '-' for stdin")]
        input: String,

        #[clap(long, short, help = "Follow-up question to ask after summarizing (repeatable)")]
        question: Vec<String>,

        #[clap(long, short, help = "Keep asking questions read from the terminal")]
        interactive: bool,

        #[clap(long, help = "Write the full conversation as JSON to this path")]
        transcript: Option<String>,

        #[clap(flatten)]
        overrides: Overrides,
    },
    /// Print the effective configuration as YAML
    ShowConfig {
        #[clap(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct Overrides {
    #[clap(long, help = "Model identifier")]
    model: Option<String>,

    #[clap(long, help = "Sampling temperature (0.0 - 2.0)")]
    temperature: Option<f32>,

    #[clap(long, help = "API key (overrides config and environment)")]
    api_key: Option<String>,

    #[clap(long, help = "Base URL of an OpenAI-compatible endpoint")]
    api_base: Option<String>,

    #[clap(long, help = "Maximum characters of the document to summarize")]
    max_total_chars: Option<usize>,

    #[clap(long, help = "Maximum characters per completion request")]
    max_chars_per_chunk: Option<usize>,

    #[clap(long, help = "Target length of each chunk summary in characters")]
    summary_chars: Option<usize>,
}

impl Overrides {
    fn apply(&self, config: &mut ChunkwiseConfig) -> Result<()> {
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.llm.parameters.temperature = temperature;
        }
        if let Some(api_key) = &self.api_key {
            config.llm.auth.api_key = Some(api_key.clone());
        }
        if let Some(api_base) = &self.api_base {
            config.llm.provider = LlmProvider::Custom {
                base_url: api_base.clone(),
            };
        }
        if let Some(max_total_chars) = self.max_total_chars {
            config.chunking.max_total_chars = max_total_chars;
        }
        if let Some(max_chars_per_chunk) = self.max_chars_per_chunk {
            config.chunking.max_chars_per_chunk = max_chars_per_chunk;
        }
        if let Some(summary_chars) = self.summary_chars {
            config.chunking.summary_target_chars = summary_chars;
        }

        config.validate()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let mut config = ConfigLoader::from_file_or_default(&cli.config).await?;

    match cli.command {
        Commands::Summarize {
            input,
            question,
            interactive,
            transcript,
            overrides,
        } => {
            overrides.apply(&mut config)?;
            run_summarize(config, input, question, interactive, transcript).await
        }
        Commands::ShowConfig { overrides } => {
            overrides.apply(&mut config)?;
            if config.llm.auth.api_key.is_some() {
                config.llm.auth.api_key = Some("***".to_string());
            }
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read document from stdin")?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read document {}", input))
    }
}

async fn run_summarize(
    config: ChunkwiseConfig,
    input: String,
    questions: Vec<String>,
    interactive: bool,
    transcript: Option<String>,
) -> Result<()> {
    let text = read_input(&input).await?;
    log::info!("Read {} characters from {}", text.chars().count(), input);

    let llm = LLMFactory::create_llm_with_config(&config.llm)?;
    let summarizer = Summarizer::new(llm)
        .with_progress(Arc::new(TerminalProgress::new()))
        .with_min_chars_per_chunk(config.chunking.min_chars_per_chunk)
        .with_shrink_factor(config.chunking.shrink_factor);

    let mut conversation = Conversation::new();
    let report = summarizer
        .summarize(&mut conversation, &text, &config.chunking.plan())
        .await?;

    // Aborted attempts may have left earlier summaries in front of the final ones
    let summaries = conversation.messages_by_role(Role::Assistant);
    let start = summaries.len().saturating_sub(report.chunks_summarized);
    for (idx, summary) in summaries[start..].iter().enumerate() {
        println!("## Part {}\n\n{}\n", idx + 1, summary.content);
    }

    if report.chunks_discarded > 0 {
        eprintln!(
            "Note: only the first {} of {} chunks were summarized (max_total_chars = {}).",
            report.chunks_summarized,
            report.chunks_summarized + report.chunks_discarded,
            config.chunking.max_total_chars
        );
    }

    for question in &questions {
        ask(&summarizer, &mut conversation, question).await;
    }

    if interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() || line == "exit" || line == "quit" {
                break;
            }
            ask(&summarizer, &mut conversation, line).await;
        }
    }

    if let Some(path) = transcript {
        let json = serde_json::to_string_pretty(&conversation)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write transcript {}", path))?;
        log::info!("Wrote {} messages to {}", conversation.len(), path);
    }

    Ok(())
}

async fn ask(summarizer: &Summarizer, conversation: &mut Conversation, question: &str) {
    match summarizer.continue_conversation(conversation, question).await {
        Some(answer) => println!("{}\n", answer),
        None => eprintln!("No answer: the completion request failed (see log)."),
    }
}

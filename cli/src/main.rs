//! TableQA command line: build a corpus snapshot from cleaned records, then
//! chat over it with answers grounded in retrieved rows.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tableqa_corpus::{Record, render_document};
use tableqa_index::{CorpusSnapshot, FlatIndex};
use tableqa_retrieval::{
    ChatClient, ChatConfig, EmbeddingConfig, EmbeddingProviderKind, OllamaChat, RetrievalConfig,
    Retriever, ScoredDocument, SYSTEM_INSTRUCTION, build_prompt,
};

#[derive(Parser)]
#[command(name = "tableqa", about = "Dataset Q&A over an exact-search vector index")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the corpus snapshot from a file of cleaned records.
    Build {
        /// JSON array of cleaned records (field name to typed value).
        #[arg(long)]
        records: PathBuf,

        /// Path prefix for the snapshot artifact pair.
        #[arg(long)]
        out: PathBuf,

        /// Embedding provider.
        #[arg(long, value_enum, default_value = "ollama")]
        provider: ProviderArg,

        /// Embedding model override.
        #[arg(long)]
        embed_model: Option<String>,

        /// Embedding endpoint base URL override.
        #[arg(long)]
        embed_url: Option<String>,
    },

    /// Chat over a previously built snapshot.
    Chat {
        /// Path prefix of the snapshot artifact pair.
        #[arg(long)]
        index: PathBuf,

        /// Embedding provider (must match the one used at build time).
        #[arg(long, value_enum, default_value = "ollama")]
        provider: ProviderArg,

        /// Embedding model override.
        #[arg(long)]
        embed_model: Option<String>,

        /// Embedding endpoint base URL override.
        #[arg(long)]
        embed_url: Option<String>,

        /// Chat model.
        #[arg(long, default_value = "llama3.2:3b")]
        chat_model: String,

        /// Ollama base URL for the chat model.
        #[arg(long, default_value = "http://localhost:11434")]
        chat_url: String,

        /// Number of rows retrieved per question.
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Ollama,
    Openai,
}

impl ProviderArg {
    fn embedding_config(self, model: Option<String>, base_url: Option<String>) -> EmbeddingConfig {
        let provider = match self {
            ProviderArg::Ollama => EmbeddingProviderKind::Ollama,
            ProviderArg::Openai => EmbeddingProviderKind::OpenAi,
        };
        EmbeddingConfig {
            provider,
            model,
            base_url,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            records,
            out,
            provider,
            embed_model,
            embed_url,
        } => build(records, out, provider.embedding_config(embed_model, embed_url)).await,
        Command::Chat {
            index,
            provider,
            embed_model,
            embed_url,
            chat_model,
            chat_url,
            top_k,
        } => {
            let config = RetrievalConfig::default()
                .with_top_k(top_k)
                .with_embedding(provider.embedding_config(embed_model, embed_url))
                .with_chat(ChatConfig {
                    model: chat_model,
                    base_url: chat_url,
                });
            run_chat(index, config).await
        }
    }
}

async fn build(
    records_path: PathBuf,
    out: PathBuf,
    embedding: EmbeddingConfig,
) -> anyhow::Result<()> {
    let file = File::open(&records_path)
        .with_context(|| format!("cannot open records file {}", records_path.display()))?;
    let records: Vec<Record> =
        serde_json::from_reader(BufReader::new(file)).context("cannot parse records file")?;

    let documents: Vec<String> = records.iter().map(render_document).collect();
    info!("rendered {} documents", documents.len());

    let provider = embedding.build();
    let embeddings = provider
        .embed_batch(&documents)
        .await
        .context("embedding the corpus failed")?;

    let mut index = FlatIndex::new();
    for embedding in &embeddings {
        index.insert(embedding)?;
    }

    let snapshot = CorpusSnapshot::new(index, documents, records)?;
    snapshot.save(&out)?;

    println!("Index built and saved to:");
    println!(" - {}.vec", out.display());
    println!(" - {}.docs.json", out.display());
    Ok(())
}

async fn run_chat(index_prefix: PathBuf, config: RetrievalConfig) -> anyhow::Result<()> {
    // Any snapshot load failure aborts here, before a single query is served.
    let snapshot = CorpusSnapshot::load(&index_prefix)
        .with_context(|| format!("cannot load snapshot {}", index_prefix.display()))?;

    let retriever = Retriever::new(config.embedding.build(), snapshot);
    let chat_client = OllamaChat::new()
        .with_base_url(config.chat.base_url)
        .with_model(config.chat.model);

    println!("Ready. Ask questions about the dataset. Type 'exit' to quit.");
    println!("Tip: Type '/show' after a question to display the retrieved rows.\n");

    let stdin = io::stdin();
    let mut last_hits: Option<Vec<ScoredDocument>> = None;

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();

        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        if question.eq_ignore_ascii_case("/show") {
            show_evidence(last_hits.as_deref());
            continue;
        }

        let hits = match retriever.retrieve(question, config.top_k).await {
            Ok(hits) => hits,
            Err(e) => {
                eprintln!("\nretrieval failed: {e}\n");
                continue;
            }
        };
        let prompt = build_prompt(question, &hits);
        last_hits = Some(hits);

        match chat_client.complete(SYSTEM_INSTRUCTION, &prompt).await {
            Ok(answer) => println!("\nAssistant: {answer}\n"),
            Err(e) => eprintln!("\nchat failed: {e}\n"),
        }
    }

    Ok(())
}

fn show_evidence(hits: Option<&[ScoredDocument]>) {
    match hits {
        None | Some([]) => {
            println!("\n(No retrieved rows yet — ask a question first.)\n");
        }
        Some(hits) => {
            println!("\nTop retrieved rows (evidence):");
            for (rank, hit) in hits.iter().enumerate() {
                println!("{}. score={:.3} | {}", rank + 1, hit.score, hit.document);
            }
            println!();
        }
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use search_core::{paginate, remove_duplicates, DocId, Document, DocumentStatus, RequestQueue, SearchServer};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Rank JSON/JSONL documents against plus/minus word queries with TF-IDF", long_about = None)]
struct Cli {
    /// Whitespace-separated stop words
    #[arg(long, global = true, default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for each query
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Query, may be repeated
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only rank documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Only rank documents rated at least this
        #[arg(long)]
        min_rating: Option<i32>,
        /// Documents per printed page
        #[arg(long, default_value = "2")]
        page_size: NonZeroUsize,
        /// Print results as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the query words found in every document
    Match {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
    },
    /// Remove documents with the same set of words as an earlier one
    Dedup {
        #[arg(long)]
        input: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

struct SearchOptions {
    status: DocumentStatus,
    min_rating: Option<i32>,
    page_size: NonZeroUsize,
    json: bool,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    results: &'a [Document],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search { input, queries, status, min_rating, page_size, json } => {
            let server = load_server(&input, &cli.stop_words)?;
            let options = SearchOptions { status: status.into(), min_rating, page_size, json };
            run_search(&server, &queries, &options, &mut out)
        }
        Commands::Match { input, query } => {
            let server = load_server(&input, &cli.stop_words)?;
            run_match(&server, &query, &mut out)
        }
        Commands::Dedup { input } => {
            let mut server = load_server(&input, &cli.stop_words)?;
            run_dedup(&mut server, &mut out)
        }
    }
}

fn load_server(input: &str, stop_words: &str) -> Result<SearchServer> {
    let docs = load_documents(Path::new(input))?;
    let mut server = SearchServer::from_stop_words_text(stop_words)?;
    let skipped = add_documents(&mut server, docs);
    tracing::info!(num_docs = server.document_count(), skipped, "documents loaded");
    Ok(server)
}

/// Add every document, reporting and skipping the ones the server rejects.
fn add_documents(server: &mut SearchServer, docs: Vec<InputDoc>) -> usize {
    let mut skipped = 0;
    for doc in docs {
        if let Err(e) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            tracing::warn!(doc_id = doc.id, error = %e, "skipping document");
            skipped += 1;
        }
    }
    skipped
}

fn collect_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

fn load_documents(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in collect_files(input_path) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "expected a JSON object or array"),
    }
    Ok(())
}

fn run_search(server: &SearchServer, queries: &[String], options: &SearchOptions, out: &mut impl Write) -> Result<()> {
    let mut requests = RequestQueue::new(server);
    let status = options.status;
    let min_rating = options.min_rating.unwrap_or(i32::MIN);

    for query in queries {
        let start = Instant::now();
        let results = match requests.add_find_request_by(query, |_, doc_status, rating| {
            doc_status == status && rating >= min_rating
        }) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "search failed");
                continue;
            }
        };
        tracing::info!(query = %query, hits = results.len(), took_s = start.elapsed().as_secs_f64(), "search done");

        if options.json {
            writeln!(out, "{}", serde_json::to_string(&QueryOutput { query, results: &results })?)?;
            continue;
        }
        writeln!(out, "Search results for query: {query}")?;
        for (n, page) in paginate(&results, options.page_size.get())?.iter().enumerate() {
            writeln!(out, "Page {}: {page}", n + 1)?;
        }
    }

    tracing::info!(no_result_requests = requests.no_result_requests(), total = requests.len(), "search finished");
    Ok(())
}

fn run_match(server: &SearchServer, query: &str, out: &mut impl Write) -> Result<()> {
    let start = Instant::now();
    writeln!(out, "Matching documents for query: {query}")?;
    for doc_id in server {
        let (words, status) = match server.match_document(query, doc_id) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(query, error = %e, "match failed");
                return Ok(());
            }
        };
        writeln!(out, "{{ document_id = {doc_id}, status = {status}, words = {} }}", words.join(" "))?;
    }
    tracing::info!(query, num_docs = server.document_count(), took_s = start.elapsed().as_secs_f64(), "match done");
    Ok(())
}

fn run_dedup(server: &mut SearchServer, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Before duplicates removed: {}", server.document_count())?;
    let removed = remove_duplicates(server);
    let removed: Vec<String> = removed.iter().map(ToString::to_string).collect();
    writeln!(out, "Removed: {}", removed.join(" "))?;
    writeln!(out, "After duplicates removed: {}", server.document_count())?;
    Ok(())
}

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use the_streamwood::config::{load_options, StreamOptions};
use the_streamwood::observability::init_tracing;
use the_streamwood::stream::{BranchOperator, StreamBuilder};
use the_streamwood::traits::{DataStore, Operator, Stateful, TelemetryAware, TelemetryProvider};
use tokio_util::sync::CancellationToken;

/// Word counts keyed by lowercase word
struct WordCounts {
    counts: Mutex<HashMap<String, u64>>,
}

impl DataStore for WordCounts {
    fn name(&self) -> &str {
        "word_counts"
    }
}

/// Splits a line into words and forwards each one
struct Tokenize {
    next: Vec<Arc<dyn Operator<String>>>,
}

impl Operator<String> for Tokenize {
    fn name(&self) -> &str {
        "tokenize"
    }

    fn process(&self, line: String) -> anyhow::Result<()> {
        for word in line.split_whitespace() {
            for successor in &self.next {
                successor.process(word.to_lowercase())?;
            }
        }
        Ok(())
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<String>>> {
        self.next.clone()
    }
}

/// Counts words into its store and reports each update to telemetry
struct CountWords {
    store: Arc<WordCounts>,
    telemetry: OnceLock<Arc<dyn TelemetryProvider>>,
}

impl TelemetryAware for CountWords {
    fn init_telemetry(&self, provider: Arc<dyn TelemetryProvider>) {
        let _ = self.telemetry.set(provider);
    }
}

impl Stateful for CountWords {
    fn stores(&self) -> Vec<Arc<dyn DataStore>> {
        vec![self.store.clone()]
    }
}

impl Operator<String> for CountWords {
    fn name(&self) -> &str {
        "count_words"
    }

    fn process(&self, word: String) -> anyhow::Result<()> {
        let mut counts = self
            .store
            .counts
            .lock()
            .map_err(|_| anyhow::anyhow!("word count store poisoned"))?;
        let count = counts.entry(word).or_insert(0);
        *count += 1;

        if let Some(telemetry) = self.telemetry.get() {
            telemetry.record(self.name(), "count", *count as f64);
        }
        Ok(())
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<String>>> {
        Vec::new()
    }

    fn as_telemetry_aware(&self) -> Option<&dyn TelemetryAware> {
        Some(self)
    }

    fn as_stateful(&self) -> Option<&dyn Stateful> {
        Some(self)
    }
}

/// Prints every word it sees
struct Echo;

impl Operator<String> for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn process(&self, word: String) -> anyhow::Result<()> {
        println!("  echo: {}", word);
        Ok(())
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<String>>> {
        Vec::new()
    }
}

/// Demo: tokenize lines, fan out into a counting branch and an echo branch
/// Usage: cargo run --example stream_demo [options.yaml]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = match env::args().nth(1) {
        Some(path) => load_options(&path)?,
        None => StreamOptions::default(),
    };
    init_tracing(&options.logging.filter);

    let store = Arc::new(WordCounts {
        counts: Mutex::new(HashMap::new()),
    });
    let counting = Arc::new(BranchOperator::<String>::new(
        "counting",
        vec![Arc::new(CountWords {
            store: store.clone(),
            telemetry: OnceLock::new(),
        })],
    ));
    let echo = Arc::new(BranchOperator::<String>::new("echo", vec![Arc::new(Echo)]));
    let tokenize = Arc::new(Tokenize {
        next: vec![counting.clone(), echo.clone()],
    });

    let stream = StreamBuilder::<String>::new("word_count")
        .root(tokenize)
        .branch(counting)
        .branch(echo)
        .options(options)
        .build()?;

    println!("=== Streamwood Word Count Demo ===\n");
    println!("Stream: {}", stream.name());
    println!("Branches: {:?}", stream.branches().keys().collect::<Vec<_>>());
    println!("Status: {}", stream.status());

    stream.start();
    println!("Status: {}\n", stream.status());

    let start = Instant::now();
    stream.emit("the quick brown fox".to_string())?;

    let token = CancellationToken::new();
    let pending = vec![
        stream.emit_async("jumps over the lazy dog".to_string(), &token)?,
        stream.emit_async("the end".to_string(), &token)?,
    ];
    for handle in pending {
        handle.await?;
    }

    stream.stop();
    println!("\nProcessed in {:?}", start.elapsed());

    if let Some(counts) = stream.state_store_by_name::<WordCounts>("word_counts") {
        let counts = counts
            .counts
            .lock()
            .map_err(|_| "word count store poisoned")?;
        let mut words: Vec<_> = counts.iter().collect();
        words.sort();
        println!("\nWord counts:");
        for (word, count) in words {
            println!("  {}: {}", word, count);
        }
    }

    Ok(())
}

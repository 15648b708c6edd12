//! Command implementations for the Falx CLI.
//!
//! Every command loads the snapshot named on the command line, applies one
//! operation and writes the snapshot back when the operation mutated it.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, bail};
use indexmap::IndexMap;

use crate::classifier::TextClassifier;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::model::{CountModel, NaiveBayes};
use crate::training::events::TrainingEvent;

/// Execute a CLI command.
pub async fn execute_command(args: FalxArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Init(init_args) => init(init_args.clone(), &args).await,
        Command::Add(add_args) => add(add_args.clone(), &args).await,
        Command::Remove(remove_args) => remove(remove_args.clone(), &args).await,
        Command::Train(model_args) => train(model_args.clone(), &args, false).await,
        Command::Retrain(model_args) => train(model_args.clone(), &args, true).await,
        Command::Classify(classify_args) => classify(classify_args.clone(), &args).await,
        Command::Stats(model_args) => stats(model_args.clone(), &args).await,
    }
}

async fn load(path: &Path) -> anyhow::Result<TextClassifier<NaiveBayes>> {
    TextClassifier::load(path, None)
        .await
        .with_context(|| format!("failed to load classifier from {}", path.display()))
}

async fn save(classifier: &TextClassifier<NaiveBayes>, path: &Path) -> anyhow::Result<()> {
    classifier
        .save(path)
        .await
        .with_context(|| format!("failed to save classifier to {}", path.display()))
}

/// Create an empty snapshot.
async fn init(args: InitArgs, cli_args: &FalxArgs) -> anyhow::Result<()> {
    if args.model.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.model.display()
        );
    }

    let config = match &args.config {
        Some(path) => ClassifierConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    let model = NaiveBayes::with_smoothing(args.smoothing)?;
    let classifier = TextClassifier::with_model(model, config)?;
    save(&classifier, &args.model).await?;

    output_result(
        "Classifier created",
        &InitResult {
            path: args.model.display().to_string(),
            model: classifier.model().name().to_string(),
            smoothing: classifier.model().smoothing(),
            analyzer: classifier.config().analyzer.as_str().to_string(),
        },
        cli_args,
    )
}

/// Add one document.
async fn add(args: AddArgs, cli_args: &FalxArgs) -> anyhow::Result<()> {
    let mut classifier = load(&args.model).await?;

    let tokens = classifier.tokens(args.text.as_str())?;
    let accepted = classifier.add_document(&tokens, &args.label)?;
    let trained = if args.train { classifier.train() } else { 0 };
    if accepted || args.train {
        save(&classifier, &args.model).await?;
    }

    let message = if accepted {
        "Document added"
    } else {
        "Document ignored: no tokens after analysis"
    };
    output_result(
        message,
        &AddResult {
            label: args.label,
            accepted,
            tokens,
            documents: classifier.documents().len(),
            pending: classifier.pending(),
            trained,
        },
        cli_args,
    )
}

/// Remove one document.
async fn remove(args: RemoveArgs, cli_args: &FalxArgs) -> anyhow::Result<()> {
    let mut classifier = load(&args.model).await?;

    let removal = classifier.remove_document(args.text.as_str(), &args.label)?;
    if removal.matched() || removal.rolled_back {
        save(&classifier, &args.model).await?;
    }

    let message = if removal.matched() {
        "Document removed"
    } else {
        "No matching document"
    };
    output_result(
        message,
        &RemoveResult {
            label: args.label,
            matched: removal.matched(),
            rolled_back: removal.rolled_back,
            documents: classifier.documents().len(),
            features: classifier.vocabulary().len(),
            watermark: classifier.watermark(),
        },
        cli_args,
    )
}

/// Train pending documents, or rebuild the model from scratch.
async fn train(args: ModelArgs, cli_args: &FalxArgs, from_scratch: bool) -> anyhow::Result<()> {
    let mut classifier = load(&args.model).await?;

    if cli_args.verbosity() > 1 {
        classifier.subscribe_fn(|event| {
            if let TrainingEvent::DocumentTrained {
                index,
                total,
                document,
            } = event
            {
                eprintln!("[{}/{}] {}", index + 1, total, document.label);
            }
        });
    }

    let start_time = Instant::now();
    let trained = if from_scratch {
        classifier.retrain()
    } else {
        classifier.train()
    };
    let duration = start_time.elapsed();
    save(&classifier, &args.model).await?;

    output_result(
        if from_scratch {
            "Model retrained"
        } else {
            "Model trained"
        },
        &TrainResult {
            trained,
            documents: classifier.documents().len(),
            watermark: classifier.watermark(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Classify a text.
async fn classify(args: ClassifyArgs, cli_args: &FalxArgs) -> anyhow::Result<()> {
    let classifier = load(&args.model).await?;

    let label = classifier.classify(args.text.as_str())?;
    let classifications = if args.all {
        Some(classifier.classifications(args.text.as_str())?)
    } else {
        None
    };

    output_result(
        "Classification",
        &ClassifyResult {
            label,
            classifications,
        },
        cli_args,
    )
}

/// Show statistics.
async fn stats(args: ModelArgs, cli_args: &FalxArgs) -> anyhow::Result<()> {
    let classifier = load(&args.model).await?;

    let mut labels: IndexMap<String, usize> = IndexMap::new();
    for document in classifier.documents() {
        *labels.entry(document.label.clone()).or_insert(0) += 1;
    }

    let config = classifier.config();
    let model = classifier.model();
    output_result(
        "Classifier statistics",
        &ClassifierStats {
            documents: classifier.documents().len(),
            pending: classifier.pending(),
            watermark: classifier.watermark(),
            features: classifier.vocabulary().len(),
            labels,
            model: model.name().to_string(),
            smoothing: model.smoothing(),
            total_examples: model.counts().total_examples,
            analyzer: config.analyzer.as_str().to_string(),
            retraction: config.retraction.as_str().to_string(),
            rollback: config.rollback.as_str().to_string(),
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn args(argv: &[&str]) -> FalxArgs {
        let mut full = vec!["falx", "--quiet"];
        full.extend_from_slice(argv);
        FalxArgs::try_parse_from(full).unwrap()
    }

    #[tokio::test]
    async fn test_command_workflow() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model.json");
        let model = model.to_str().unwrap();

        execute_command(args(&["init", model])).await.unwrap();
        execute_command(args(&["add", model, "spam", "buy cheap watches now"]))
            .await
            .unwrap();
        execute_command(args(&["add", model, "ham", "meeting at noon", "--train"]))
            .await
            .unwrap();
        execute_command(args(&["classify", model, "cheap", "--all"]))
            .await
            .unwrap();

        let classifier = TextClassifier::<NaiveBayes>::load(model, None).await.unwrap();
        assert_eq!(classifier.documents().len(), 2);
        assert_eq!(classifier.watermark(), 2);

        execute_command(args(&["remove", model, "spam", "buy cheap watches now"]))
            .await
            .unwrap();
        execute_command(args(&["retrain", model])).await.unwrap();
        execute_command(args(&["stats", model])).await.unwrap();

        let classifier = TextClassifier::<NaiveBayes>::load(model, None).await.unwrap();
        assert_eq!(classifier.documents().len(), 1);
        assert_eq!(classifier.watermark(), 1);
        assert_eq!(
            classifier.classify("noon").unwrap().as_deref(),
            Some("ham")
        );
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model.json");
        let model = model.to_str().unwrap();

        execute_command(args(&["init", model])).await.unwrap();
        assert!(execute_command(args(&["init", model])).await.is_err());
        assert!(execute_command(args(&["init", model, "--force"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_snapshot_reports_path() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("missing.json");

        let error = execute_command(args(&["stats", model.to_str().unwrap()]))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("missing.json"));
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Quill CLI: render, query, and inspect token corpora.
//!
//! ```bash
//! # Render 50 tokens conditioned on 3-token windows
//! quill generate --input corpus.txt -k 3 --max-tokens 50 --seed 7
//!
//! # Where does a bigram occur?
//! quill positions --input corpus.txt the quick
//!
//! # Corpus statistics
//! quill inspect --input corpus.txt
//! ```

use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser;

use quill::{
    AppConfig, BernoulliSplitTokenizer, CharTokenizer, DefaultPicker, LineTokenizer, Pen,
    PenError, Picker, RandomPicker, RegexMatchTokenizer, RegexSplitTokenizer, SplitMode,
    SubstringSplitTokenizer, Token, Tokenizer,
};

mod cli;
use cli::{Cli, Commands, CorpusArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            corpus,
            relevant_tokens,
            seed,
            from_position,
            max_tokens,
            joiner,
        } => run_generate(
            &corpus,
            relevant_tokens,
            seed,
            from_position,
            max_tokens,
            &joiner,
        ),
        Commands::Count { corpus, sample } => run_count(&corpus, &sample),
        Commands::Positions {
            corpus,
            sample,
            limit,
        } => run_positions(&corpus, &sample, limit),
        Commands::Inspect { corpus } => run_inspect(&corpus),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load config, read the corpus text, and build the Pen.
fn build_pen(args: &CorpusArgs) -> Result<(Pen, AppConfig), PenError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.tokenizer.mode = mode;
    }
    if let Some(pattern) = &args.pattern {
        config.tokenizer.pattern = pattern.clone();
    }
    if let Some(comparison) = args.comparison {
        config.pen.comparison_type = comparison;
    }
    if let Some(sentinel) = &args.sentinel {
        config.pen.sentinel_token = quill::token(sentinel);
    }
    if args.intern {
        config.pen.intern = true;
    }
    if config.text.web_source.is_some() {
        eprintln!("note: webSource config is ignored; reading local input");
    }

    let text = read_text(args, &config)?;
    let tokens = shatter_text(&text, &config)?;
    let pen = Pen::new(
        tokens,
        config.pen.comparison_type,
        config.pen.sentinel_token.clone(),
        config.pen.intern,
    );
    Ok((pen, config))
}

fn read_text(args: &CorpusArgs, config: &AppConfig) -> Result<String, PenError> {
    let path = args.input.as_ref().or(config.text.file.as_ref());
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| PenError::InvalidArgument {
            argument: "input",
            reason: format!("{}: {}", path.display(), e),
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| PenError::InvalidArgument {
                    argument: "input",
                    reason: format!("stdin: {}", e),
                })?;
            Ok(text)
        }
    }
}

fn shatter_text(text: &str, config: &AppConfig) -> Result<Vec<Token>, PenError> {
    let tokenizer_config = &config.tokenizer;
    let options = &config.shattering_options;
    let tokens = match tokenizer_config.mode {
        SplitMode::RegexSplit => {
            RegexSplitTokenizer::new(&tokenizer_config.pattern, tokenizer_config.inclusive)?
                .shatter(text, options)
        }
        SplitMode::RegexMatch => {
            RegexMatchTokenizer::new(&tokenizer_config.pattern)?.shatter(text, options)
        }
        SplitMode::Substring => SubstringSplitTokenizer::new(
            tokenizer_config.separators.clone(),
            tokenizer_config.remove_empty,
        )
        .shatter(text, options),
        SplitMode::Chars => CharTokenizer.shatter(text, options),
        SplitMode::Lines => LineTokenizer.shatter(text, options),
        SplitMode::Random => {
            let seed = config.random_generator.seed.unwrap_or(0);
            BernoulliSplitTokenizer::new(tokenizer_config.probability, seed)?
                .shatter(text, options)
        }
    };
    Ok(tokens)
}

fn sample_tokens(sample: &[String]) -> Vec<Token> {
    sample.iter().map(|s| quill::token(s)).collect()
}

fn run_generate(
    args: &CorpusArgs,
    relevant_tokens: Option<usize>,
    seed: Option<u64>,
    from_position: Option<usize>,
    max_tokens: Option<usize>,
    joiner: &str,
) -> Result<(), PenError> {
    let (pen, config) = build_pen(args)?;
    let generator = &config.random_generator;
    let window = relevant_tokens.unwrap_or(generator.relevant_tokens);
    let seed = seed.or(generator.seed);
    let from_position = from_position.or(generator.from_position);
    let max_tokens = max_tokens.unwrap_or(generator.max_tokens);

    let rendered = match seed {
        Some(seed) => collect_rendered(
            pen.render(window, RandomPicker::from_seed(seed), from_position)?,
            max_tokens,
        )?,
        None => collect_rendered(pen.render(window, DefaultPicker, from_position)?, max_tokens)?,
    };

    let pieces: Vec<&str> = rendered.iter().map(|t| t.as_deref().unwrap_or("")).collect();
    println!("{}", pieces.join(joiner));
    Ok(())
}

fn collect_rendered<P: Picker>(
    render: quill::Render<'_, P>,
    max_tokens: usize,
) -> Result<Vec<Token>, PenError> {
    render.take(max_tokens).collect()
}

fn run_count(args: &CorpusArgs, sample: &[String]) -> Result<(), PenError> {
    let (pen, _) = build_pen(args)?;
    println!("{}", pen.count(&sample_tokens(sample)));
    Ok(())
}

fn run_positions(args: &CorpusArgs, sample: &[String], limit: usize) -> Result<(), PenError> {
    let (pen, _) = build_pen(args)?;
    let sample = sample_tokens(sample);
    let mut positions: Vec<usize> = pen.positions_of(&sample).into_iter().collect();
    positions.sort_unstable();

    println!("count: {}", positions.len());
    for position in positions.iter().take(limit) {
        println!("{}", position);
    }
    if positions.len() > limit {
        println!("... {} more", positions.len() - limit);
    }
    Ok(())
}

fn run_inspect(args: &CorpusArgs) -> Result<(), PenError> {
    let (pen, config) = build_pen(args)?;

    let distinct: std::collections::HashSet<Option<&str>> =
        pen.context().iter().map(|t| t.as_deref()).collect();
    let absent = pen.context().iter().filter(|t| t.is_none()).count();

    println!("tokens:          {}", pen.len());
    println!("distinct tokens: {}", distinct.len());
    println!("absent tokens:   {}", absent);
    println!("comparison:      {}", config.pen.comparison_type);
    println!("interned:        {}", pen.interned());
    println!(
        "sentinel:        {}",
        pen.sentinel()
            .as_deref()
            .map_or_else(|| "(absent)".to_string(), |s| format!("{:?}", s))
    );

    // rank spot check: the first few suffixes in order
    let preview = pen.rank().iter().take(5);
    for (i, &position) in preview.enumerate() {
        let suffix: Vec<&str> = pen.context()[position..]
            .iter()
            .take(4)
            .map(|t| t.as_deref().unwrap_or("∅"))
            .collect();
        println!("rank[{}] -> {} : {:?}", i, position, suffix);
    }
    Ok(())
}

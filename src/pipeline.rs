//! Pipeline orchestrator.
//!
//! One run loads the four indexes, walks the source sentences in file order,
//! joins each one to its translation, picks the cloze word, and streams
//! tab-delimited card rows to the output file. Every lookup miss is expected
//! control flow: the row is skipped and counted, never an error.

use std::collections::HashSet;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::cloze::{RandomSource, find_cloze};
use crate::config::Config;
use crate::index::{FrequencyIndex, load_column_index};

/// Counters for one generation run.
///
/// Skips are surfaced here so callers can log them; they have no effect on
/// the output file contents.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub written: usize,
    pub no_link: usize,
    pub duplicate_target: usize,
    pub missing_target: usize,
    pub no_cloze_word: usize,
}

/// Wrap the first occurrence of `word` in `{{c1::…}}` markup.
///
/// Plain substring match against the original punctuated sentence; if `word`
/// also occurs inside an earlier, longer word, that occurrence is the one
/// that gets wrapped.
fn apply_cloze_markup(sentence: &str, word: &str) -> String {
    sentence.replacen(word, &format!("{{{{c1::{word}}}}}"), 1)
}

/// Run the whole pipeline described by `config`.
///
/// Loader failures (unreadable file, malformed row) abort the run. The
/// output writer flushes before returning, so a completed run leaves a fully
/// written file; an aborted run leaves no half-written row behind the last
/// flush boundary.
pub fn generate(config: &Config, rng: &mut dyn RandomSource) -> Result<GenerateReport> {
    info!("Building indexes ...");
    let source = load_column_index(&config.source_sentences, b'\t', 2)
        .context("loading source sentence table")?;
    let target = load_column_index(&config.target_sentences, b'\t', 2)
        .context("loading target sentence table")?;
    let links =
        load_column_index(&config.links, b'\t', 1).context("loading link table")?;
    let frequency =
        FrequencyIndex::load(&config.frequency_list).context("loading frequency list")?;

    info!(
        "Indexes ready: {} source sentences, {} target sentences, {} links, {} frequency entries",
        source.len(),
        target.len(),
        links.len(),
        frequency.len()
    );

    info!("Generating clozes ...");
    let out = std::fs::File::create(&config.output)
        .with_context(|| format!("cannot create output file {}", config.output.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote(b'|')
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    let mut used_targets: HashSet<&str> = HashSet::new();
    let mut report = GenerateReport::default();

    for (source_id, source_text) in &source {
        let target_id = match links.get(source_id.as_str()) {
            Some(id) if !id.is_empty() => id,
            _ => {
                report.no_link += 1;
                continue;
            }
        };

        // Claim the target id up front; a later lookup miss on this row
        // still blocks the target for every following source sentence.
        if !used_targets.insert(target_id.as_str()) {
            report.duplicate_target += 1;
            continue;
        }

        let target_text = match target.get(target_id.as_str()) {
            Some(text) if !text.is_empty() => text,
            _ => {
                report.missing_target += 1;
                continue;
            }
        };

        let Some(word) = find_cloze(source_text, &frequency, rng) else {
            report.no_cloze_word += 1;
            continue;
        };
        let clozed = apply_cloze_markup(source_text, &word);

        writer
            .write_record([
                source_id.as_str(),
                clozed.as_str(),
                target_id.as_str(),
                target_text.as_str(),
            ])
            .context("writing output row")?;
        report.written += 1;
    }

    writer.flush().context("flushing output file")?;

    info!(
        "Done: {} rows written ({} without link, {} duplicate targets, {} missing targets, {} without cloze word)",
        report.written,
        report.no_link,
        report.duplicate_target,
        report.missing_target,
        report.no_cloze_word
    );
    Ok(report)
}

use anyhow::Result;

use stride::config::StrideConfig;
use stride::extract::classify::{ItemClassifier, KeywordClassifier};
use stride::extract::intent::IntentScorer;
use stride::extract::segment as segmenter;
use stride::extract::tables::KeywordTables;
use stride::extract::types::Route;
use stride::extract::Extractor;

use super::{print_json, read_text};

pub fn extract(config: &StrideConfig, text: &str, history: &[Route]) -> Result<()> {
    let text = read_text(text)?;
    let tables = KeywordTables::from_config(&config.extraction)?;
    let extraction = Extractor::new(&tables).extract_with_history(&text, history);
    print_json(&extraction)
}

pub fn segment(text: &str, explain: bool) -> Result<()> {
    let text = read_text(text)?;
    if explain {
        print_json(&segmenter::segment_detailed(&text))
    } else {
        print_json(&segmenter::segment(&text))
    }
}

pub fn classify(config: &StrideConfig, text: &str) -> Result<()> {
    let text = read_text(text)?;
    let tables = KeywordTables::from_config(&config.extraction)?;
    print_json(&KeywordClassifier::new(&tables).classify(text.trim()))
}

pub fn intent(config: &StrideConfig, text: &str, history: &[Route], explain: bool) -> Result<()> {
    let text = read_text(text)?;
    let tables = KeywordTables::from_config(&config.extraction)?;
    let scorer = IntentScorer::new(&tables);
    if explain {
        print_json(&scorer.rank(&text, history))
    } else {
        print_json(&scorer.score_with_history(&text, history))
    }
}

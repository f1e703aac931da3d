//! Parsing of model replies into typed values.

use serde::Deserialize;

use super::fence::unwrap_code_fence;
use crate::model::{Question, QuestionBatch};

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsWire {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

/// Parse a question batch from a raw reply.
///
/// Accepts `{"questions": [...]}` or a bare array, optionally fenced or
/// preceded by prose. Blank questions are dropped; an empty result is an error.
pub(crate) fn parse_question_batch(raw: &str) -> anyhow::Result<QuestionBatch> {
    let text = unwrap_code_fence(raw);

    // Object first: prose like "here are [5] questions: {...}" must not
    // start the parse at the bracket.
    let mut last_err = anyhow::anyhow!("no JSON object or array found in reply");
    let mut wire = None;
    for start in [text.find('{'), text.find('[')].into_iter().flatten() {
        match first_value(&text[start..]) {
            Ok(value) => {
                wire = Some(value);
                break;
            }
            Err(e) => last_err = e,
        }
    }
    let wire = wire.ok_or(last_err)?;

    let questions = match wire {
        QuestionsWire::Wrapped { questions } | QuestionsWire::Bare(questions) => questions,
    };

    let batch: QuestionBatch = questions
        .into_iter()
        .map(|q| Question::new(q.id, q.text.trim()))
        .filter(|q| !q.text.is_empty())
        .collect();

    if batch.is_empty() {
        anyhow::bail!("reply contained no questions");
    }
    Ok(batch)
}

fn first_value(text: &str) -> anyhow::Result<QuestionsWire> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<QuestionsWire>()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no JSON value found in reply"))?
        .map_err(|e| anyhow::anyhow!("invalid questions JSON: {}", e))
}

const WRAPPERS: [char; 5] = ['"', '\'', '`', '*', '_'];

/// Clean a raw guess into a label: fence removed, first non-empty line,
/// matching quote and emphasis pairs stripped (`**"Apple"**` -> `Apple`).
pub(crate) fn parse_label(raw: &str) -> anyhow::Result<String> {
    let line = unwrap_code_fence(raw)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| anyhow::anyhow!("model returned an empty guess"))?;

    let mut unquoted = line;
    while let Some(inner) = WRAPPERS
        .iter()
        .find_map(|q| unquoted.strip_prefix(*q).and_then(|l| l.strip_suffix(*q)))
    {
        unquoted = inner.trim();
    }

    if unquoted.is_empty() {
        anyhow::bail!("model returned an empty guess");
    }
    Ok(unquoted.to_string())
}

//! CSV import for decks and quiz runs
//!
//! Two formats are accepted:
//! - deck CSV, positional and headerless:
//!   `question,answer,memo,learned,hide,review`
//! - quiz CSV, header driven: columns titled `問題` and `答え`
//!
//! Neither format supports quoting. Short rows are padded with empty
//! strings and `false` flags rather than rejected.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::models::{Card, CardStatus, QuizCard};

/// Header text of the question column in quiz CSV
pub const QUESTION_HEADER: &str = "問題";
/// Header text of the answer column in quiz CSV
pub const ANSWER_HEADER: &str = "答え";

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

fn reader(text: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .from_reader(text.trim().as_bytes())
}

fn read_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Parse a headerless deck CSV into cards
pub fn parse_deck_csv(text: &str) -> Result<Vec<Card>> {
    let mut cards = Vec::new();
    for result in reader(text, false).records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let flag = |i: usize| record.get(i) == Some("true");

        cards.push(Card {
            question: field(0),
            answer: field(1),
            memo: field(2),
            status: CardStatus {
                learned: flag(3),
                hide: flag(4),
                review: flag(5),
            },
        });
    }
    Ok(cards)
}

/// Parse a quiz CSV, locating question and answer columns by header text
pub fn parse_quiz_csv(text: &str) -> Result<Vec<QuizCard>> {
    let mut reader = reader(text, true);
    let headers = reader.headers()?.clone();
    let q_idx = headers.iter().position(|h| h == QUESTION_HEADER);
    let a_idx = headers.iter().position(|h| h == ANSWER_HEADER);

    let mut cards = Vec::new();
    for result in reader.records() {
        let record = result?;
        let column = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string()
        };
        cards.push(QuizCard {
            question: column(q_idx),
            answer: column(a_idx),
        });
    }

    if q_idx.is_none() || a_idx.is_none() {
        log::warn!(
            "Quiz CSV is missing a '{}' or '{}' header; those fields will be empty",
            QUESTION_HEADER,
            ANSWER_HEADER
        );
    }

    Ok(cards)
}

/// Read and parse a deck CSV file
pub fn read_deck_file(path: &Path) -> Result<Vec<Card>> {
    let cards = parse_deck_csv(&read_text(path)?)?;
    log::debug!("Parsed {} cards from {:?}", cards.len(), path);
    Ok(cards)
}

/// Read and parse a quiz CSV file
pub fn read_quiz_file(path: &Path) -> Result<Vec<QuizCard>> {
    let cards = parse_quiz_csv(&read_text(path)?)?;
    log::debug!("Parsed {} quiz cards from {:?}", cards.len(), path);
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_row() {
        let cards = parse_deck_csv("What is 2+2?,4,easy,true,false,true").unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is 2+2?");
        assert_eq!(cards[0].answer, "4");
        assert_eq!(cards[0].memo, "easy");
        assert!(cards[0].status.learned);
        assert!(!cards[0].status.hide);
        assert!(cards[0].status.review);
    }

    #[test]
    fn test_short_rows_default() {
        let cards = parse_deck_csv("only question\nq2,a2").unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "only question");
        assert_eq!(cards[0].answer, "");
        assert_eq!(cards[0].status, CardStatus::default());
        assert_eq!(cards[1].answer, "a2");
        assert_eq!(cards[1].memo, "");
    }

    #[test]
    fn test_flags_require_exact_true() {
        let cards = parse_deck_csv("q,a,,TRUE,yes,1").unwrap();
        assert_eq!(cards[0].status, CardStatus::default());
    }

    #[test]
    fn test_crlf_and_surrounding_whitespace() {
        let cards = parse_deck_csv("\n\nq1,a1\r\nq2,a2\r\n\n").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].question, "q2");
        assert_eq!(cards[1].answer, "a2");
    }

    #[test]
    fn test_quotes_are_literal() {
        let cards = parse_deck_csv("\"say\",it").unwrap();
        assert_eq!(cards[0].question, "\"say\"");
    }

    #[test]
    fn test_quiz_locates_columns_by_header() {
        let cards = parse_quiz_csv("メモ,答え,問題\nx,Tokyo,Capital of Japan").unwrap();

        assert_eq!(
            cards,
            vec![QuizCard {
                question: "Capital of Japan".to_string(),
                answer: "Tokyo".to_string(),
            }]
        );
    }

    #[test]
    fn test_quiz_missing_column_is_empty() {
        let cards = parse_quiz_csv("問題\nq1\nq2").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].answer, "");
    }

    #[test]
    fn test_quiz_header_only_is_empty() {
        assert!(parse_quiz_csv("問題,答え").unwrap().is_empty());
        assert!(parse_quiz_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_read_file_strips_bom() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quiz.csv");
        fs::write(&path, "\u{feff}問題,答え\nCapital of Japan,Tokyo\n").unwrap();

        let cards = read_quiz_file(&path).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].answer, "Tokyo");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_deck_file(&temp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}

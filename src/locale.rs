//! Display labels for the two supported languages

use serde::{Deserialize, Serialize};

use crate::flashcards::CardStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Fixed strings shown to the user
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub learned: &'static str,
    pub hide: &'static str,
    pub review: &'static str,
    pub save_prompt: &'static str,
    pub delete_prompt: &'static str,
    pub missing_name_or_file: &'static str,
    pub missing_file: &'static str,
    pub no_cards: &'static str,
}

static JA: Labels = Labels {
    learned: "覚えた",
    hide: "非表示",
    review: "見直す",
    save_prompt: "結果を保存しますか?",
    delete_prompt: "削除しますか?",
    missing_name_or_file: "名前とCSVを指定してください",
    missing_file: "CSVを指定してください",
    no_cards: "カードがありません",
};

static EN: Labels = Labels {
    learned: "learned",
    hide: "hide",
    review: "review",
    save_prompt: "Save the result?",
    delete_prompt: "Delete this test?",
    missing_name_or_file: "Enter a name and a CSV file",
    missing_file: "Enter a CSV file",
    no_cards: "No cards",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }
}

impl Labels {
    /// One-line summary of a card's flags, e.g. `覚えた:true 非表示:false 見直す:false`
    pub fn status_line(&self, status: &CardStatus) -> String {
        format!(
            "{}:{} {}:{} {}:{}",
            self.learned, status.learned, self.hide, status.hide, self.review, status.review
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_japanese() {
        let status = CardStatus { learned: true, hide: false, review: false };
        assert_eq!(
            Locale::Ja.labels().status_line(&status),
            "覚えた:true 非表示:false 見直す:false"
        );
    }

    #[test]
    fn test_status_line_english() {
        let status = CardStatus { learned: false, hide: true, review: true };
        assert_eq!(
            Locale::En.labels().status_line(&status),
            "learned:false hide:true review:true"
        );
    }
}

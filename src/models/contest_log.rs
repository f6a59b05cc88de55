//! Contest log model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_LOG_DESCRIPTION_LENGTH;
use crate::error::AppError;

macro_rules! language_codes {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Language a log was studied in; `Global` aggregates all languages
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum LanguageCode {
            $(#[serde(rename = $code)] $variant,)+
        }

        impl LanguageCode {
            /// Every supported language code
            pub const ALL: &'static [LanguageCode] = &[$(LanguageCode::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::str::FromStr for LanguageCode {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    other => Err(AppError::Validation(format!("unknown language code: {}", other))),
                }
            }
        }
    };
}

language_codes! {
    Global => "GLO",
    Arabic => "ara",
    Chinese => "chi",
    Croatian => "hrv",
    Czech => "cze",
    Danish => "dan",
    Dutch => "dut",
    English => "eng",
    Esperanto => "epo",
    Finnish => "fin",
    French => "fre",
    German => "ger",
    Greek => "gre",
    Hebrew => "heb",
    Indonesian => "ind",
    Irish => "gle",
    Italian => "ita",
    Japanese => "jpn",
    Korean => "kor",
    Norwegian => "nor",
    Polish => "pol",
    Portuguese => "por",
    Russian => "rus",
    Spanish => "spa",
    Swedish => "swe",
    Thai => "tha",
    Turkish => "tur",
    Ukrainian => "ukr",
    Vietnamese => "vie",
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of material a log was studied with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum MediumId {
    Book = 1,
    Comic = 2,
    Net = 3,
    FullGame = 4,
    Game = 5,
    Lyric = 6,
    News = 7,
    Sentences = 8,
}

impl MediumId {
    /// Weight applied to raw amounts so different media rank fairly
    pub fn multiplier(&self) -> f32 {
        match self {
            Self::Book | Self::Net | Self::Lyric | Self::News => 1.0,
            Self::Comic => 0.2,
            Self::FullGame => 1.0 / 6.0,
            Self::Game | Self::Sentences => 0.05,
        }
    }
}

impl TryFrom<i32> for MediumId {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Book),
            2 => Ok(Self::Comic),
            3 => Ok(Self::Net),
            4 => Ok(Self::FullGame),
            5 => Ok(Self::Game),
            6 => Ok(Self::Lyric),
            7 => Ok(Self::News),
            8 => Ok(Self::Sentences),
            other => Err(AppError::Validation(format!("unknown medium id: {}", other))),
        }
    }
}

impl From<MediumId> for i32 {
    fn from(medium: MediumId) -> Self {
        medium as i32
    }
}

/// A single study log submitted to a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContestLog {
    pub id: i64,
    pub contest_id: i64,
    pub user_id: i64,
    pub language_code: LanguageCode,
    pub medium_id: MediumId,
    #[validate(range(min = 0.0))]
    pub amount: f32,
    #[validate(length(max = MAX_LOG_DESCRIPTION_LENGTH))]
    pub description: String,
}

impl ContestLog {
    /// Amount weighted by the medium multiplier
    pub fn adjusted_amount(&self) -> f32 {
        self.amount * self.medium_id.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_parse_and_serialize() {
        assert_eq!("jpn".parse::<LanguageCode>().unwrap(), LanguageCode::Japanese);
        assert_eq!(LanguageCode::Global.as_str(), "GLO");
        assert!("xx".parse::<LanguageCode>().is_err());
        assert_eq!(serde_json::to_string(&LanguageCode::Korean).unwrap(), "\"kor\"");

        for code in LanguageCode::ALL {
            assert_eq!(code.as_str().parse::<LanguageCode>().unwrap(), *code);
        }
    }

    #[test]
    fn test_medium_is_numeric_on_the_wire() {
        assert_eq!(serde_json::to_string(&MediumId::Comic).unwrap(), "2");
        assert_eq!(serde_json::from_str::<MediumId>("3").unwrap(), MediumId::Net);
        assert!(serde_json::from_str::<MediumId>("42").is_err());
    }

    #[test]
    fn test_adjusted_amount() {
        let log = ContestLog {
            id: 0,
            contest_id: 1,
            user_id: 1,
            language_code: LanguageCode::Japanese,
            medium_id: MediumId::Comic,
            amount: 10.0,
            description: String::new(),
        };
        assert!((log.adjusted_amount() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_amount_fails_validation() {
        let log = ContestLog {
            id: 0,
            contest_id: 1,
            user_id: 1,
            language_code: LanguageCode::Japanese,
            medium_id: MediumId::Book,
            amount: -1.0,
            description: String::new(),
        };
        assert!(log.validate().is_err());
    }
}

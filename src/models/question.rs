//! Questions and the question bank they are drawn from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A multiple-choice question. Immutable once drawn into a pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub subject: String,
    pub grade_level: u32,
    pub points: u32,
    /// Seconds; overrides the tournament's time per question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// Errors loading a question bank.
#[derive(Debug)]
pub enum QuestionBankError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    /// A CSV row names a correct answer that is not one of its options.
    InvalidRow { line: usize, reason: String },
    /// A question whose correct answer is not one of its options.
    InvalidQuestion { id: String, reason: String },
    /// Two questions share an id.
    DuplicateId(String),
    UnknownFormat(String),
}

impl std::fmt::Display for QuestionBankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionBankError::Io(e) => write!(f, "Could not read question bank: {}", e),
            QuestionBankError::Json(e) => write!(f, "Invalid question bank JSON: {}", e),
            QuestionBankError::Csv(e) => write!(f, "Invalid question bank CSV: {}", e),
            QuestionBankError::InvalidRow { line, reason } => {
                write!(f, "Question bank line {}: {}", line, reason)
            }
            QuestionBankError::InvalidQuestion { id, reason } => {
                write!(f, "Question {}: {}", id, reason)
            }
            QuestionBankError::DuplicateId(id) => {
                write!(f, "Question id {} appears more than once", id)
            }
            QuestionBankError::UnknownFormat(ext) => {
                write!(f, "Unknown question bank format '{}' (use .json or .csv)", ext)
            }
        }
    }
}

impl std::error::Error for QuestionBankError {}

impl From<std::io::Error> for QuestionBankError {
    fn from(e: std::io::Error) -> Self {
        QuestionBankError::Io(e)
    }
}

impl From<serde_json::Error> for QuestionBankError {
    fn from(e: serde_json::Error) -> Self {
        QuestionBankError::Json(e)
    }
}

impl From<csv::Error> for QuestionBankError {
    fn from(e: csv::Error) -> Self {
        QuestionBankError::Csv(e)
    }
}

/// One CSV row: options are `|`-separated.
#[derive(Deserialize)]
struct CsvQuestion {
    id: String,
    text: String,
    options: String,
    correct_answer: usize,
    subject: String,
    grade_level: u32,
    points: u32,
    #[serde(default)]
    time_limit: Option<u32>,
}

/// All questions available to draw from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse a JSON array of questions.
    pub fn from_json_str(s: &str) -> Result<Self, QuestionBankError> {
        let questions: Vec<Question> = serde_json::from_str(s)?;
        for q in &questions {
            if q.correct_answer >= q.options.len() {
                return Err(QuestionBankError::InvalidQuestion {
                    id: q.id.clone(),
                    reason: answer_out_of_range(q.correct_answer, q.options.len()),
                });
            }
        }
        check_unique_ids(&questions)?;
        Ok(Self::new(questions))
    }

    /// Parse CSV with header `id,text,options,correct_answer,subject,grade_level,points,time_limit`.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, QuestionBankError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut questions = Vec::new();
        for (i, result) in rdr.deserialize().enumerate() {
            let row: CsvQuestion = result?;
            let options: Vec<String> = row.options.split('|').map(|o| o.trim().to_string()).collect();
            if row.correct_answer >= options.len() {
                return Err(QuestionBankError::InvalidRow {
                    line: i + 2,
                    reason: answer_out_of_range(row.correct_answer, options.len()),
                });
            }
            questions.push(Question {
                id: row.id,
                text: row.text,
                options,
                correct_answer: row.correct_answer,
                subject: row.subject,
                grade_level: row.grade_level,
                points: row.points,
                time_limit: row.time_limit,
            });
        }
        check_unique_ids(&questions)?;
        Ok(Self::new(questions))
    }

    /// Load from a `.json` or `.csv` file.
    pub fn from_path(path: &Path) -> Result<Self, QuestionBankError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?),
            _ => Err(QuestionBankError::UnknownFormat(ext)),
        }
    }

    /// Questions for `subject` (case-insensitive) within one grade of `grade_level`.
    pub fn filtered<'a>(
        &'a self,
        subject: &'a str,
        grade_level: u32,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| {
            q.subject.eq_ignore_ascii_case(subject) && q.grade_level.abs_diff(grade_level) <= 1
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn answer_out_of_range(correct_answer: usize, options: usize) -> String {
    format!("correct_answer {} but only {} options", correct_answer, options)
}

fn check_unique_ids(questions: &[Question]) -> Result<(), QuestionBankError> {
    let mut seen = HashSet::new();
    match questions.iter().find(|q| !seen.insert(q.id.as_str())) {
        Some(q) => Err(QuestionBankError::DuplicateId(q.id.clone())),
        None => Ok(()),
    }
}


use std::{fs::File, io::{self, BufRead, BufReader}, path::Path};

use lazy_static::lazy_static;
use nom::{
  IResult,
  Parser,
  branch::alt,
  bytes::complete::{tag, take_till},
  character::complete::{char, none_of},
  combinator::cut,
  multi::{many0, separated_list1},
  sequence::{preceded, terminated},
};
use regex::Regex;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

pub const WORD_COLUMN: &str = "Word";
pub const PHONO_COLUMN: &str = "Phono";
pub const FREQUENCY_COLUMN: &str = "Frequency";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
  pub word: String,
  pub transcription: String,
  pub frequency: u64,
}

impl WordRecord {
  pub fn new(word: &str, transcription: &str, frequency: u64) -> WordRecord {
    WordRecord {
      word: word.to_owned(),
      transcription: transcription.to_owned(),
      frequency
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
  pub words: Vec<WordRecord>
}

impl Lexicon {
  pub fn from_records(words: Vec<WordRecord>) -> Lexicon {
    Lexicon { words }
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }
}

#[derive(Error, Debug)]
pub enum LexiconError {
  #[error("could not read lexicon: {0}")]
  Io(#[from] io::Error),

  #[error("lexicon has no header row")]
  MissingHeader,

  #[error("lexicon header has no `{0}` column")]
  MissingColumn(&'static str),

  #[error("line {line}: {reason}")]
  MalformedRow { line: usize, reason: String },

  #[error("line {line}: frequency `{value}` is not a non-negative integer")]
  BadFrequency { line: usize, value: String },
}

lazy_static! {
  static ref SKIPPED_LINE_RE: Regex = Regex::new(r"^\s*(#.*)?$").unwrap();
}

// once a field opens with a quote it must close with one
fn quoted_field(i: &str) -> IResult<&str, String> {
  preceded(
    char('"'),
    cut(terminated(
      many0(alt((
        tag("\"\"").map(|_| '"'),
        none_of("\""),
      ))),
      char('"')
    ))
  ).map(|cs: Vec<char>| cs.into_iter().collect())
  .parse(i)
}

fn bare_field(i: &str) -> IResult<&str, String> {
  take_till(|c: char| c == ',').map(|s: &str| s.to_owned()).parse(i)
}

pub fn parse_row(i: &str) -> IResult<&str, Vec<String>> {
  separated_list1(char(','), alt((quoted_field, bare_field)))(i)
}

fn split_row(line: &str, line_no: usize) -> Result<Vec<String>, LexiconError> {
  match parse_row(line) {
    Ok(("", fields)) => Ok(fields.into_iter().map(|f| f.trim().to_owned()).collect()),
    Ok((rest, _)) => Err(LexiconError::MalformedRow {
      line: line_no,
      reason: format!("unexpected text `{}`", rest)
    }),
    Err(e) => Err(LexiconError::MalformedRow { line: line_no, reason: e.to_string() })
  }
}

struct ColumnIndices {
  word: usize,
  phono: usize,
  frequency: usize,
}

impl ColumnIndices {
  fn from_header(header: &[String]) -> Result<ColumnIndices, LexiconError> {
    let find = |name: &'static str| {
      header.iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or(LexiconError::MissingColumn(name))
    };
    Ok(ColumnIndices {
      word: find(WORD_COLUMN)?,
      phono: find(PHONO_COLUMN)?,
      frequency: find(FREQUENCY_COLUMN)?,
    })
  }

  fn width(&self) -> usize {
    self.word.max(self.phono).max(self.frequency) + 1
  }
}

pub fn read_lexicon<R: BufRead>(reader: R) -> Result<Lexicon, LexiconError> {
  let mut columns: Option<ColumnIndices> = None;
  let mut words = Vec::new();

  for (k, line) in reader.lines().enumerate() {
    let line = line?;
    let line = line.trim_end_matches('\r');
    let line_no = k + 1;

    if SKIPPED_LINE_RE.is_match(line) {
      debug!(line = line_no, "skipping blank or comment line");
      continue;
    }

    let fields = split_row(line, line_no)?;

    let cols = match &columns {
      None => {
        columns = Some(ColumnIndices::from_header(&fields)?);
        continue;
      },
      Some(cols) => cols
    };

    if fields.len() < cols.width() {
      return Err(LexiconError::MalformedRow {
        line: line_no,
        reason: format!("expected at least {} fields, found {}", cols.width(), fields.len())
      });
    }

    let frequency: u64 = fields[cols.frequency].parse().map_err(|_| LexiconError::BadFrequency {
      line: line_no,
      value: fields[cols.frequency].clone()
    })?;

    words.push(WordRecord {
      word: fields[cols.word].clone(),
      transcription: fields[cols.phono].clone(),
      frequency
    });
  }

  if columns.is_none() {
    return Err(LexiconError::MissingHeader);
  }

  debug!(words = words.len(), "parsed lexicon");
  Ok(Lexicon { words })
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon, LexiconError> {
  let lexicon = read_lexicon(BufReader::new(File::open(path)?))?;
  info!("loaded {} words from {}", lexicon.len(), path.display());
  Ok(lexicon)
}


use std::str::FromStr;

use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::environments::{DorsalFricativeRule, EnvironmentClassifier, SibilantRule, VoicingRule};
use crate::lexicon::WordRecord;
use crate::pprm::{pprm_for_pair, PairResult};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Rule {
  DorsalFricative,
  Sibilant,
  Voicing,
}

impl Rule {
  pub fn name(&self) -> &'static str {
    match self {
      Rule::DorsalFricative => "x-c",
      Rule::Sibilant => "s-sh",
      Rule::Voicing => "d-t",
    }
  }

  pub fn classifier(&self) -> Box<dyn EnvironmentClassifier> {
    match self {
      Rule::DorsalFricative => Box::new(DorsalFricativeRule::default()),
      Rule::Sibilant => Box::new(SibilantRule::default()),
      Rule::Voicing => Box::new(VoicingRule::default()),
    }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PairSpecError {
  #[error("unknown rule `{0}` (expected x-c, s-sh or d-t)")]
  UnknownRule(String),

  #[error("pair `{0}` should look like X,Y,RULE")]
  Malformed(String),
}

impl FromStr for Rule {
  type Err = PairSpecError;

  fn from_str(s: &str) -> Result<Rule, PairSpecError> {
    [Rule::DorsalFricative, Rule::Sibilant, Rule::Voicing].into_iter()
      .find(|r| r.name() == s)
      .ok_or_else(|| PairSpecError::UnknownRule(s.to_owned()))
  }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PhonePair {
  pub phone_x: String,
  pub phone_y: String,
  pub rule: Rule,
}

impl PhonePair {
  pub fn new(phone_x: &str, phone_y: &str, rule: Rule) -> PhonePair {
    PhonePair { phone_x: phone_x.to_owned(), phone_y: phone_y.to_owned(), rule }
  }

  pub fn analyze(&self, dataset: &[WordRecord]) -> PairResult {
    pprm_for_pair(dataset, &self.phone_x, &self.phone_y, self.rule.classifier().as_ref())
  }
}

// x,C,x-c
impl FromStr for PhonePair {
  type Err = PairSpecError;

  fn from_str(s: &str) -> Result<PhonePair, PairSpecError> {
    let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
    match parts.as_slice() {
      [x, y, rule] if !x.is_empty() && !y.is_empty() => Ok(PhonePair::new(x, y, rule.parse()?)),
      _ => Err(PairSpecError::Malformed(s.to_owned()))
    }
  }
}

// CPSAMPA writes [ç] as C and [ʃ] as S
pub fn german_pairs() -> Vec<PhonePair> {
  vec![
    PhonePair::new("x", "C", Rule::DorsalFricative),
    PhonePair::new("s", "S", Rule::Sibilant),
    PhonePair::new("d", "t", Rule::Voicing),
  ]
}

// Pairs are independent, so they run in parallel; results keep the order of `pairs`.
pub fn analyze_pairs(dataset: &[WordRecord], pairs: &[PhonePair]) -> Vec<PairResult> {
  info!("analyzing {} pairs over {} words", pairs.len(), dataset.len());
  pairs.par_iter().map(|pair| pair.analyze(dataset)).collect()
}

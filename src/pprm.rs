
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::entropy::shannon_entropy;
use crate::environments::{Environment, EnvironmentClassifier};
use crate::lexicon::WordRecord;
use crate::transcription::phone_sequence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhoneCounts {
  // distinct words
  pub types: u64,
  // summed corpus frequency, once per occurrence; wider than a single frequency so
  // large corpora cannot overflow the sum
  pub tokens: u128,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentCounts {
  pub x: PhoneCounts,
  pub y: PhoneCounts,
}

impl EnvironmentCounts {
  pub fn types(&self) -> u64 {
    self.x.types + self.y.types
  }

  pub fn tokens(&self) -> u128 {
    self.x.tokens + self.y.tokens
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scheme {
  Type,
  Token,
}

impl Scheme {
  fn count(&self, c: &PhoneCounts) -> u128 {
    match self {
      Scheme::Type => c.types as u128,
      Scheme::Token => c.tokens,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentEntropy {
  pub environment: Environment,
  // p(X | environment)
  pub p_x: f64,
  pub entropy: f64,
  // p(environment), the weight of this environment in the overall sum
  pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeResult {
  pub scheme: Scheme,
  pub total: u128,
  // weighted mean of the per-environment entropies, None when neither phone was counted
  // under this scheme
  pub entropy: Option<f64>,
  pub environments: Vec<EnvironmentEntropy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
  pub pair: String,
  pub phone_x: String,
  pub phone_y: String,
  pub classifier: String,
  pub counts: BTreeMap<Environment, EnvironmentCounts>,
  pub types: SchemeResult,
  pub tokens: SchemeResult,
}

impl PairResult {
  pub fn type_entropy(&self) -> Option<f64> {
    self.types.entropy
  }

  pub fn token_entropy(&self) -> Option<f64> {
    self.tokens.entropy
  }

  pub fn has_data(&self) -> bool {
    !self.counts.is_empty()
  }

  pub fn scheme(&self, scheme: Scheme) -> &SchemeResult {
    match scheme {
      Scheme::Type => &self.types,
      Scheme::Token => &self.tokens,
    }
  }
}

pub fn pair_label(phone_x: &str, phone_y: &str) -> String {
  format!("[{}]~[{}]", phone_x, phone_y)
}

pub fn count_environments(
  dataset: &[WordRecord],
  phone_x: &str,
  phone_y: &str,
  classifier: &dyn EnvironmentClassifier
) -> BTreeMap<Environment, EnvironmentCounts> {
  let mut counts: BTreeMap<Environment, EnvironmentCounts> = BTreeMap::new();
  // (environment, is_y, word) cells that already received their type increment
  let mut counted: HashSet<(Environment, bool, &str)> = HashSet::new();

  for record in dataset {
    let phones = phone_sequence(&record.transcription);

    for (i, &ph) in phones.iter().enumerate() {
      let is_y = if ph == phone_x { false } else if ph == phone_y { true } else { continue };

      let env = classifier.classify(&phones, i);
      let entry = counts.entry(env).or_default();
      let cell = if is_y { &mut entry.y } else { &mut entry.x };

      if counted.insert((env, is_y, record.word.as_str())) {
        cell.types += 1;
      }
      cell.tokens += record.frequency as u128;
    }
  }

  counts
}

fn scheme_result(scheme: Scheme, counts: &BTreeMap<Environment, EnvironmentCounts>) -> SchemeResult {
  let total: u128 = counts.values().map(|c| scheme.count(&c.x) + scheme.count(&c.y)).sum();

  if total == 0 {
    return SchemeResult { scheme, total, entropy: None, environments: vec![] };
  }

  let mut overall = 0.0;
  let mut environments = vec![];

  for (&environment, c) in counts {
    let x = scheme.count(&c.x);
    let n = x + scheme.count(&c.y);
    if n == 0 {
      continue;
    }

    let p_x = x as f64 / n as f64;
    let entropy = shannon_entropy(p_x, 1.0 - p_x);
    let probability = n as f64 / total as f64;
    overall += probability * entropy;

    environments.push(EnvironmentEntropy { environment, p_x, entropy, probability });
  }

  SchemeResult { scheme, total, entropy: Some(overall), environments }
}

// Each occurrence of `phone_x` or `phone_y` gets an environment from `classifier`.
// Within an environment a word adds at most one type per phone, but its frequency is
// added once per occurrence. The overall entropy of each scheme is the mean of the
// per-environment entropies weighted by each environment's share of the scheme total.
pub fn pprm_for_pair(
  dataset: &[WordRecord],
  phone_x: &str,
  phone_y: &str,
  classifier: &dyn EnvironmentClassifier
) -> PairResult {
  let counts = count_environments(dataset, phone_x, phone_y, classifier);

  let types = scheme_result(Scheme::Type, &counts);
  let tokens = scheme_result(Scheme::Token, &counts);

  let pair = pair_label(phone_x, phone_y);
  debug!(
    "{} ({}): {} environments, {} types, {} tokens",
    pair, classifier.name(), counts.len(), types.total, tokens.total
  );

  PairResult {
    pair,
    phone_x: phone_x.to_owned(),
    phone_y: phone_y.to_owned(),
    classifier: classifier.name().to_owned(),
    counts,
    types,
    tokens,
  }
}


use serde::{Serialize, Deserialize};
use crate::phones::{PhoneInventory, GERMAN_CPSAMPA};

// Declaration order is the order environments are reported and summed in.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Environment {
  WordInitial,
  WordInitial_s_plus_stop,
  WordInitial_s_alone,
  Medial_AfterBackVowel,
  Medial_AfterFrontOrCons,
  WordMedial,
  Intervocalic_V_V,
  ClusterOrOther,
  WordFinal_AfterBackVowel,
  WordFinal_AfterFrontOrCons,
  WordFinal,
}

impl Environment {
  pub fn label(&self) -> &'static str {
    use Environment::*;
    match self {
      WordInitial => "WordInitial",
      WordInitial_s_plus_stop => "WordInitial_s_plus_stop",
      WordInitial_s_alone => "WordInitial_s_alone",
      Medial_AfterBackVowel => "Medial_AfterBackVowel",
      Medial_AfterFrontOrCons => "Medial_AfterFrontOrCons",
      WordMedial => "WordMedial",
      Intervocalic_V_V => "Intervocalic_V_V",
      ClusterOrOther => "ClusterOrOther",
      WordFinal_AfterBackVowel => "WordFinal_AfterBackVowel",
      WordFinal_AfterFrontOrCons => "WordFinal_AfterFrontOrCons",
      WordFinal => "WordFinal",
    }
  }
}

// Only called for positions holding one of the two phones of the pair, so `i` is
// always a valid index into a non-empty sequence.
pub trait EnvironmentClassifier: Sync {
  fn name(&self) -> &'static str;

  fn classify(&self, phones: &[&str], i: usize) -> Environment;
}

// [x] vs. [ç]: position in the word, and whether the preceding phone is a back vowel.
#[derive(Debug, Clone, Copy)]
pub struct DorsalFricativeRule<'a> {
  pub inventory: &'a PhoneInventory
}

// [s] vs. [ʃ]: word-initial before a stop, word-initial otherwise, final, medial.
#[derive(Debug, Clone, Copy)]
pub struct SibilantRule {
  pub stops: [&'static str; 2]
}

// [d] vs. [t]: initial, final, between two vowels, anything else.
#[derive(Debug, Clone, Copy)]
pub struct VoicingRule<'a> {
  pub inventory: &'a PhoneInventory
}

impl Default for DorsalFricativeRule<'static> {
  fn default() -> Self {
    DorsalFricativeRule { inventory: &GERMAN_CPSAMPA }
  }
}

impl Default for SibilantRule {
  fn default() -> Self {
    SibilantRule { stops: ["p", "t"] }
  }
}

impl Default for VoicingRule<'static> {
  fn default() -> Self {
    VoicingRule { inventory: &GERMAN_CPSAMPA }
  }
}

impl<'a> EnvironmentClassifier for DorsalFricativeRule<'a> {
  fn name(&self) -> &'static str {
    "x-c"
  }

  fn classify(&self, phones: &[&str], i: usize) -> Environment {
    use Environment::*;
    if i == 0 {
      return WordInitial;
    }

    let is_final = i == phones.len() - 1;
    match (is_final, self.inventory.is_back_vowel(phones[i - 1])) {
      (true, true) => WordFinal_AfterBackVowel,
      (true, false) => WordFinal_AfterFrontOrCons,
      (false, true) => Medial_AfterBackVowel,
      (false, false) => Medial_AfterFrontOrCons,
    }
  }
}

impl EnvironmentClassifier for SibilantRule {
  fn name(&self) -> &'static str {
    "s-sh"
  }

  fn classify(&self, phones: &[&str], i: usize) -> Environment {
    use Environment::*;
    if i == 0 {
      return match phones.get(1) {
        Some(next) if self.stops.iter().any(|s| s == next) => WordInitial_s_plus_stop,
        _ => WordInitial_s_alone
      };
    }

    if i == phones.len() - 1 { WordFinal } else { WordMedial }
  }
}

impl<'a> EnvironmentClassifier for VoicingRule<'a> {
  fn name(&self) -> &'static str {
    "d-t"
  }

  fn classify(&self, phones: &[&str], i: usize) -> Environment {
    use Environment::*;
    if i == 0 {
      return WordInitial;
    }
    if i == phones.len() - 1 {
      return WordFinal;
    }

    if self.inventory.is_vowel(phones[i - 1]) && self.inventory.is_vowel(phones[i + 1]) {
      Intervocalic_V_V
    }
    else {
      ClusterOrOther
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::Environment::*;
  use crate::transcription::phone_sequence;

  fn classify_at(rule: &dyn EnvironmentClassifier, transcription: &str, i: usize) -> Environment {
    rule.classify(&phone_sequence(transcription), i)
  }

  #[test]
  fn test_dorsal_fricative() {
    let rule = DorsalFricativeRule::default();
    assert_eq!(classify_at(&rule, "C.i:.n.a:", 0), WordInitial);
    assert_eq!(classify_at(&rule, "I.C", 1), WordFinal_AfterFrontOrCons);
    assert_eq!(classify_at(&rule, "b.U.x", 2), WordFinal_AfterBackVowel);
    assert_eq!(classify_at(&rule, "m.I.l.C", 3), WordFinal_AfterFrontOrCons);
    assert_eq!(classify_at(&rule, "l.a.x.@.n", 2), Medial_AfterBackVowel);
    assert_eq!(classify_at(&rule, "l.E.C.@.l.n", 2), Medial_AfterFrontOrCons);
    assert_eq!(classify_at(&rule, "aU.x.t", 1), Medial_AfterBackVowel);
  }

  #[test]
  fn test_dorsal_fricative_one_phone_word() {
    assert_eq!(classify_at(&DorsalFricativeRule::default(), "x", 0), WordInitial);
  }

  #[test]
  fn test_sibilant() {
    let rule = SibilantRule::default();
    assert_eq!(classify_at(&rule, "S.t.a:.t", 0), WordInitial_s_plus_stop);
    assert_eq!(classify_at(&rule, "S.p.i:.l", 0), WordInitial_s_plus_stop);
    assert_eq!(classify_at(&rule, "S.a:.f", 0), WordInitial_s_alone);
    assert_eq!(classify_at(&rule, "h.a.s", 2), WordFinal);
    assert_eq!(classify_at(&rule, "v.a.s.@.r", 2), WordMedial);
  }

  #[test]
  fn test_sibilant_one_phone_word_is_initial() {
    assert_eq!(classify_at(&SibilantRule::default(), "s", 0), WordInitial_s_alone);
  }

  #[test]
  fn test_voicing() {
    let rule = VoicingRule::default();
    assert_eq!(classify_at(&rule, "d.a:", 0), WordInitial);
    assert_eq!(classify_at(&rule, "h.U.n.t", 3), WordFinal);
    assert_eq!(classify_at(&rule, "l.a:.d.@.n", 2), Intervocalic_V_V);
    assert_eq!(classify_at(&rule, "aI.t.@.l", 1), Intervocalic_V_V);
    assert_eq!(classify_at(&rule, "h.a.l.t.@", 3), ClusterOrOther);
    assert_eq!(classify_at(&rule, "a.t.m", 1), ClusterOrOther);
  }

  #[test]
  fn test_voicing_one_phone_word_is_initial() {
    assert_eq!(classify_at(&VoicingRule::default(), "t", 0), WordInitial);
  }

  #[test]
  fn test_rules_follow_inventory() {
    let inv = PhoneInventory::new("toy", &["ɛ"], &["ɛ"], &["ɔ"]);
    let rule = DorsalFricativeRule { inventory: &inv };
    assert_eq!(classify_at(&rule, "ɔ.x", 1), WordFinal_AfterBackVowel);
    assert_eq!(classify_at(&rule, "a.x", 1), WordFinal_AfterFrontOrCons);

    let rule = VoicingRule { inventory: &inv };
    assert_eq!(classify_at(&rule, "ɛ.d.ɛ", 1), Intervocalic_V_V);
    assert_eq!(classify_at(&rule, "a.d.a", 1), ClusterOrOther);
  }

  #[test]
  fn test_labels() {
    assert_eq!(WordInitial_s_plus_stop.label(), "WordInitial_s_plus_stop");
    assert_eq!(serde_json::to_string(&Intervocalic_V_V).unwrap(), "\"Intervocalic_V_V\"");
  }
}

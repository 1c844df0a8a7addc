
use lazy_static::lazy_static;
use std::collections::HashSet;

// Vowel tables for one transcription alphabet.
//
// `is_vowel` looks only at the first character of a phone, while the front/back tests
// are prefix matches against longer symbols ("e:", "u:"). The two styles are not
// interchangeable: "aI" is a vowel because of its "a", and "e:" is front because of "e".
#[derive(Debug, Clone)]
pub struct PhoneInventory {
  pub name: &'static str,
  vowels: HashSet<&'static str>,
  front_vowels: Vec<&'static str>,
  back_vowels: Vec<&'static str>,
}

impl PhoneInventory {
  pub fn new(
    name: &'static str,
    vowels: &[&'static str],
    front_vowels: &[&'static str],
    back_vowels: &[&'static str]
  ) -> PhoneInventory {
    PhoneInventory {
      name,
      vowels: vowels.iter().copied().collect(),
      front_vowels: front_vowels.to_vec(),
      back_vowels: back_vowels.to_vec(),
    }
  }

  // German CPSAMPA, as used by the CELEX-style `Phono` column.
  pub fn german_cpsampa() -> PhoneInventory {
    PhoneInventory::new(
      "german-cpsampa",
      &["a", "A", "e", "E", "i", "I", "o", "O", "u", "U", "y", "Y", "2", "9", "@", "3", "aI", "aU", "OY"],
      &["i", "I", "e", "E", "y", "Y", "2", "9", "e:", "i:", "ø", "œ", "æ"],
      &["a", "A", "o", "O", "u", "U", "o:", "u:", "ɔ", "ʊ", "ɑ"],
    )
  }

  pub fn is_vowel(&self, phone: &str) -> bool {
    let mut first = [0u8; 4];
    match phone.chars().next() {
      None => false,
      Some(c) => self.vowels.contains(&*c.encode_utf8(&mut first))
    }
  }

  pub fn is_front_vowel(&self, phone: &str) -> bool {
    self.front_vowels.iter().any(|v| phone.starts_with(v))
  }

  pub fn is_back_vowel(&self, phone: &str) -> bool {
    self.back_vowels.iter().any(|v| phone.starts_with(v))
  }
}

lazy_static! {
  pub static ref GERMAN_CPSAMPA: PhoneInventory = PhoneInventory::german_cpsampa();
}

pub fn is_vowel(phone: &str) -> bool {
  GERMAN_CPSAMPA.is_vowel(phone)
}

pub fn is_front_vowel(phone: &str) -> bool {
  GERMAN_CPSAMPA.is_front_vowel(phone)
}

pub fn is_back_vowel(phone: &str) -> bool {
  GERMAN_CPSAMPA.is_back_vowel(phone)
}

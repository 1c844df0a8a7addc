
use console::style;
use float_ord::FloatOrd;
use itertools::Itertools;

use crate::pprm::{EnvironmentEntropy, PairResult, Scheme};

pub const SEPARATOR: &str = "===========================================";

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum EnvironmentOrder {
  #[default]
  Declared,
  ByWeight,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ReportOptions {
  pub show_counts: bool,
  pub order: EnvironmentOrder,
}

fn format_overall(h: Option<f64>) -> String {
  match h {
    Some(h) => format!("{:.4}", h),
    None => format!("{}", style("n/a (no data)").dim()),
  }
}

fn ordered<'a>(environments: &'a [EnvironmentEntropy], order: EnvironmentOrder) -> Vec<&'a EnvironmentEntropy> {
  let mut res: Vec<&EnvironmentEntropy> = environments.iter().collect();
  if order == EnvironmentOrder::ByWeight {
    res.sort_by_key(|e| FloatOrd(-e.probability));
  }
  res
}

fn write_scheme(out: &mut String, result: &PairResult, scheme: Scheme, options: &ReportOptions) {
  let heading = match scheme {
    Scheme::Type => "Environment (Type) Entropies:",
    Scheme::Token => "Environment (Token) Entropies:",
  };
  out.push_str(&format!("  {}\n", heading));

  for e in ordered(&result.scheme(scheme).environments, options.order) {
    out.push_str(&format!("    {}: H(e)={:.3}, p(e)={:.4}", e.environment.label(), e.entropy, e.probability));

    if options.show_counts {
      if let Some(c) = result.counts.get(&e.environment) {
        let (x, y) = match scheme {
          Scheme::Type => (c.x.types as u128, c.y.types as u128),
          Scheme::Token => (c.x.tokens, c.y.tokens),
        };
        out.push_str(&format!("  {}", style(format!("[{}={}, {}={}]", result.phone_x, x, result.phone_y, y)).dim()));
      }
    }
    out.push('\n');
  }
}

// Overall type and token entropy, then the per-environment breakdown for types followed
// by tokens.
pub fn render_pair(result: &PairResult, options: &ReportOptions) -> String {
  let mut out = [
    SEPARATOR.to_owned(),
    format!("Results for pair: {}", style(&result.pair).bold()),
    format!("  Type-based Entropy  = {}", format_overall(result.type_entropy())),
    format!("  Token-based Entropy = {}", format_overall(result.token_entropy())),
  ].join("\n");
  out.push('\n');

  write_scheme(&mut out, result, Scheme::Type, options);
  write_scheme(&mut out, result, Scheme::Token, options);

  out
}

pub fn render_text(results: &[PairResult], options: &ReportOptions) -> String {
  results.iter().map(|r| render_pair(r, options)).join("")
}

pub fn render_json(results: &[PairResult]) -> serde_json::Result<String> {
  serde_json::to_string_pretty(results)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::environments::{DorsalFricativeRule, VoicingRule};
  use crate::lexicon::WordRecord;
  use crate::pprm::pprm_for_pair;
  use console::strip_ansi_codes;

  fn plain(s: &str) -> String {
    strip_ansi_codes(s).to_string()
  }

  fn voicing_result() -> PairResult {
    let data = vec![
      WordRecord::new("Tag", "t.a:.k", 10),
      WordRecord::new("Dach", "d.a.x", 30),
      WordRecord::new("Rad", "r.a:.t", 60),
    ];
    pprm_for_pair(&data, "d", "t", &VoicingRule::default())
  }

  #[test]
  fn test_render_ich() {
    let data = vec![WordRecord::new("ich", "I.C", 10)];
    let res = pprm_for_pair(&data, "x", "C", &DorsalFricativeRule::default());

    assert_eq!(plain(&render_pair(&res, &ReportOptions::default())), [
      SEPARATOR,
      "Results for pair: [x]~[C]",
      "  Type-based Entropy  = 0.0000",
      "  Token-based Entropy = 0.0000",
      "  Environment (Type) Entropies:",
      "    WordFinal_AfterFrontOrCons: H(e)=0.000, p(e)=1.0000",
      "  Environment (Token) Entropies:",
      "    WordFinal_AfterFrontOrCons: H(e)=0.000, p(e)=1.0000",
      "",
    ].join("\n"));
  }

  #[test]
  fn test_render_no_data() {
    let res = pprm_for_pair(&[], "d", "t", &VoicingRule::default());
    let text = plain(&render_pair(&res, &ReportOptions::default()));
    assert!(text.contains("  Type-based Entropy  = n/a (no data)\n"));
    assert!(text.contains("  Token-based Entropy = n/a (no data)\n"));
  }

  #[test]
  fn test_order_and_counts() {
    let res = voicing_result();

    let declared = plain(&render_pair(&res, &ReportOptions::default()));
    let initial = declared.find("WordInitial").unwrap();
    let fin = declared.find("WordFinal").unwrap();
    assert!(initial < fin);

    let options = ReportOptions { show_counts: true, order: EnvironmentOrder::ByWeight };
    let by_weight = plain(&render_pair(&res, &options));
    // tokens: WordFinal 60 of 100, WordInitial 40 of 100
    let token_block = &by_weight[by_weight.find("(Token)").unwrap() ..];
    assert!(token_block.find("WordFinal").unwrap() < token_block.find("WordInitial").unwrap());
    assert!(token_block.contains("    WordInitial: H(e)=0.811, p(e)=0.4000  [d=30, t=10]"));
    assert!(by_weight.contains("    WordFinal: H(e)=0.000, p(e)=0.3333  [d=0, t=1]"));
  }

  #[test]
  fn test_render_json() {
    let json = render_json(&[voicing_result()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["pair"], "[d]~[t]");
    assert_eq!(value[0]["counts"]["WordFinal"]["y"]["tokens"], 60);
    assert_eq!(value[0]["types"]["environments"][0]["environment"], "WordInitial");
    assert!(value[0]["tokens"]["entropy"].is_number());

    let big = vec![WordRecord::new("Rad", "r.a:.t", u64::MAX), WordRecord::new("Bad", "b.a:.t", 1)];
    let big = pprm_for_pair(&big, "d", "t", &VoicingRule::default());
    let text = plain(&render_pair(&big, &ReportOptions { show_counts: true, ..Default::default() }));
    assert!(text.contains("[d=0, t=18446744073709551616]"));
    assert!(render_json(&[big]).unwrap().contains("\"tokens\": 18446744073709551616"));

    let empty = pprm_for_pair(&[], "d", "t", &VoicingRule::default());
    let value: serde_json::Value = serde_json::from_str(&render_json(&[empty]).unwrap()).unwrap();
    assert!(value[0]["types"]["entropy"].is_null());
  }
}

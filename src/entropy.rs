
// Binary Shannon entropy in bits. Terms with zero probability contribute nothing.
pub fn shannon_entropy(p1: f64, p2: f64) -> f64 {
  let mut h = 0.0;
  if p1 > 0.0 {
    h -= p1 * p1.log2();
  }
  if p2 > 0.0 {
    h -= p2 * p2.log2();
  }
  h
}


pub const PHONE_DELIMITER: char = '.';

// h.a:.b@n -> ["h", "a:", "b@n"]; empty segments are dropped
pub fn phone_sequence(transcription: &str) -> Vec<&str> {
  phone_sequence_with(transcription, PHONE_DELIMITER)
}

pub fn phone_sequence_with(transcription: &str, delimiter: char) -> Vec<&str> {
  transcription.split(delimiter).filter(|t| !t.is_empty()).collect()
}

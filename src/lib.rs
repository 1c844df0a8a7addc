pub mod phones;
pub mod transcription;
pub mod environments;
pub mod entropy;
pub mod lexicon;
pub mod pprm;
pub mod pairs;
pub mod report;

// Tag frequency analysis.
//
// Turns a raw dump of video tags into the "common" / "unique" lists that the
// trends pipeline takes as input, either as JSON or as the labelled text file.

pub mod export;
pub mod frequency;

use crate::constants::UNPARSABLE_RESPONSE_PLACEHOLDER;
use crate::generation::response::{Candidate, Part, RawGenerationResponse};

/// Flattens a generation reply into plain text. Never fails: replies with
/// no usable shape yield [`UNPARSABLE_RESPONSE_PLACEHOLDER`].
///
/// A top-level `parts` list whose parts carry no text yields `""`, not the
/// placeholder.
pub fn extract_text(raw: &RawGenerationResponse) -> String {
    let extracted = match raw {
        RawGenerationResponse::Text(text) if !text.is_empty() => Some(text.clone()),
        RawGenerationResponse::Text(_) => None,
        RawGenerationResponse::Parts(parts) => Some(join_part_texts(parts)),
        RawGenerationResponse::Candidates(candidates) => {
            candidates.first().and_then(first_candidate_text)
        }
        RawGenerationResponse::Unrecognized => None,
    };

    extracted.unwrap_or_else(|| UNPARSABLE_RESPONSE_PLACEHOLDER.to_string())
}

// Parts without text contribute nothing.
fn join_part_texts(parts: &[Part]) -> String {
    parts.iter().filter_map(|p| p.text.as_deref()).collect()
}

fn first_candidate_text(candidate: &Candidate) -> Option<String> {
    let parts = candidate.content.as_ref()?.parts.as_ref()?;
    if parts.is_empty() {
        return None;
    }
    Some(join_part_texts(parts))
}
